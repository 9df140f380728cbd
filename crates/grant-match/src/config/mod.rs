use std::env;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::matching::{MatchEngine, ScoringConfig, ScoringConfigError, SectorSimilarity};

/// Distinguishes runtime behavior for different stages of the embedding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for applications embedding the match engine.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let scoring = ScoringSettings {
            config_path: non_empty_path("GRANT_MATCH_SCORING_CONFIG"),
            sector_table_path: non_empty_path("GRANT_MATCH_SECTOR_TABLE"),
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            scoring,
        })
    }
}

fn non_empty_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Optional overrides for the engine's calibration constants and sector table.
#[derive(Debug, Clone, Default)]
pub struct ScoringSettings {
    pub config_path: Option<PathBuf>,
    pub sector_table_path: Option<PathBuf>,
}

impl ScoringSettings {
    pub fn scoring_config(&self) -> Result<ScoringConfig, ConfigError> {
        match &self.config_path {
            Some(path) => {
                let file = open(path)?;
                ScoringConfig::from_reader(file).map_err(|source| ConfigError::ScoringConfig {
                    path: path.clone(),
                    source,
                })
            }
            None => Ok(ScoringConfig::default()),
        }
    }

    pub fn sector_table(&self) -> Result<Arc<SectorSimilarity>, ConfigError> {
        match &self.sector_table_path {
            Some(path) => {
                let file = open(path)?;
                SectorSimilarity::from_reader(file)
                    .map(Arc::new)
                    .map_err(|source| ConfigError::SectorTable {
                        path: path.clone(),
                        source,
                    })
            }
            None => Ok(SectorSimilarity::shared()),
        }
    }

    /// Build an engine from the configured overrides, falling back to the defaults.
    pub fn engine(&self) -> Result<MatchEngine, ConfigError> {
        let config = self.scoring_config()?;
        let sectors = self.sector_table()?;
        MatchEngine::with_sectors(config, sectors).map_err(|source| {
            ConfigError::ScoringConfig {
                path: self.config_path.clone().unwrap_or_default(),
                source,
            }
        })
    }
}

fn open(path: &Path) -> Result<File, ConfigError> {
    File::open(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug)]
pub enum ConfigError {
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    ScoringConfig {
        path: PathBuf,
        source: ScoringConfigError,
    },
    SectorTable {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Unreadable { path, .. } => {
                write!(f, "unable to read {}", path.display())
            }
            ConfigError::ScoringConfig { path, source } => write!(
                f,
                "GRANT_MATCH_SCORING_CONFIG ({}) is invalid: {}",
                path.display(),
                source
            ),
            ConfigError::SectorTable { path, .. } => write!(
                f,
                "GRANT_MATCH_SECTOR_TABLE ({}) must be a JSON document with sector groups",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Unreadable { source, .. } => Some(source),
            ConfigError::ScoringConfig { source, .. } => Some(source),
            ConfigError::SectorTable { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("GRANT_MATCH_SCORING_CONFIG");
        env::remove_var("GRANT_MATCH_SECTOR_TABLE");
    }

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("grant-match-{}-{name}", std::process::id()));
        let mut file = File::create(&path).expect("temp file created");
        file.write_all(contents.as_bytes()).expect("temp file written");
        path
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.scoring.config_path.is_none());
        assert!(config.scoring.sector_table_path.is_none());

        let engine = config.scoring.engine().expect("default engine builds");
        assert_eq!(engine.config(), &ScoringConfig::default());
    }

    #[test]
    fn blank_override_paths_are_ignored() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "ci");
        env::set_var("GRANT_MATCH_SCORING_CONFIG", "   ");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Test);
        assert!(config.scoring.config_path.is_none());
        reset_env();
    }

    #[test]
    fn scoring_override_is_loaded_and_validated() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let good = write_temp("good.json", r#"{ "historical_multiplier": 1.5 }"#);
        env::set_var("GRANT_MATCH_SCORING_CONFIG", &good);
        let config = AppConfig::load().expect("config loads");
        let engine = config.scoring.engine().expect("override engine builds");
        assert_eq!(engine.config().historical_multiplier, 1.5);

        let bad = write_temp("bad.json", r#"{ "weights": { "sector": 0.9 } }"#);
        env::set_var("GRANT_MATCH_SCORING_CONFIG", &bad);
        let config = AppConfig::load().expect("config loads");
        assert!(matches!(
            config.scoring.engine(),
            Err(ConfigError::ScoringConfig {
                source: ScoringConfigError::WeightSum(_),
                ..
            })
        ));
        reset_env();
    }

    #[test]
    fn missing_sector_table_is_reported() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("GRANT_MATCH_SECTOR_TABLE", "/nonexistent/sectors.json");
        let config = AppConfig::load().expect("config loads");
        assert!(matches!(
            config.scoring.sector_table(),
            Err(ConfigError::Unreadable { .. })
        ));
        reset_env();
    }
}
