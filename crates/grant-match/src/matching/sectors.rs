use std::collections::BTreeSet;
use std::io::Read;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use super::normalizer::normalize_tag;

const STANDARD_GROUPS: &[&[&str]] = &[
    &[
        "technology",
        "software",
        "fintech",
        "health-tech",
        "artificial-intelligence",
        "digital",
        "cybersecurity",
    ],
    &[
        "health",
        "healthcare",
        "health-tech",
        "biotech",
        "medical-devices",
        "life-sciences",
    ],
    &[
        "energy",
        "clean-energy",
        "renewable-energy",
        "cleantech",
        "climate",
        "sustainability",
    ],
    &[
        "agriculture",
        "agritech",
        "food",
        "rural-development",
        "sustainability",
    ],
    &["education", "edtech", "training", "skills", "research"],
    &[
        "manufacturing",
        "advanced-manufacturing",
        "engineering",
        "industry",
        "robotics",
    ],
    &["culture", "arts", "creative-industries", "media", "heritage"],
    &[
        "social",
        "social-inclusion",
        "community",
        "social-innovation",
        "employment",
    ],
    &["mobility", "transport", "logistics", "automotive"],
];

/// Curated adjacency groups used when a profile shares no sector with a grant.
///
/// Two tags are adjacent when some group contains both. The table is read-only once built;
/// share it through [`Arc`] rather than rebuilding it per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSectorTable")]
pub struct SectorSimilarity {
    groups: Vec<BTreeSet<String>>,
}

#[derive(Deserialize)]
struct RawSectorTable {
    groups: Vec<Vec<String>>,
}

impl From<RawSectorTable> for SectorSimilarity {
    fn from(raw: RawSectorTable) -> Self {
        Self::new(raw.groups)
    }
}

impl SectorSimilarity {
    pub fn new<I, G, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let groups = groups
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .map(|tag| normalize_tag(tag.as_ref()))
                    .filter(|tag| !tag.is_empty())
                    .collect::<BTreeSet<_>>()
            })
            .filter(|group| group.len() > 1)
            .collect();

        Self { groups }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_GROUPS.iter().map(|group| group.iter()))
    }

    /// Process-wide standard table, built on first use.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<SectorSimilarity>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Self::standard())).clone()
    }

    /// Parse a `{"groups": [[...], ...]}` document.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn groups(&self) -> &[BTreeSet<String>] {
        &self.groups
    }

    pub fn are_adjacent(&self, left: &str, right: &str) -> bool {
        left != right
            && self
                .groups
                .iter()
                .any(|group| group.contains(left) && group.contains(right))
    }

    /// Every `(profile, grant)` sector pair that is adjacent, in sorted order.
    pub fn adjacent_pairs<'a>(
        &self,
        profile_sectors: &'a BTreeSet<String>,
        grant_sectors: &'a BTreeSet<String>,
    ) -> Vec<(&'a str, &'a str)> {
        profile_sectors
            .iter()
            .flat_map(|profile| {
                grant_sectors
                    .iter()
                    .filter(move |grant| self.are_adjacent(profile, grant))
                    .map(move |grant| (profile.as_str(), grant.as_str()))
            })
            .collect()
    }
}

impl Default for SectorSimilarity {
    fn default() -> Self {
        Self::standard()
    }
}
