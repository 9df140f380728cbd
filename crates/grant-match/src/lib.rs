//! Explainable grant-to-organization compatibility scoring.
//!
//! [`matching::MatchEngine`] scores one organization profile against one grant and
//! [`matching::BatchRanker`] ranks a whole catalog. Configuration and tracing setup for
//! embedding applications live in [`config`] and [`telemetry`].

pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
