//! Runtime configuration.
//!
//! Engine tuning lives as documented constants next to the code that uses it
//! (`engine::duel`, `engine::condition`, ...). What changes per deployment is
//! reveal pacing.

mod reveal_config;

pub use reveal_config::{RevealConfig, REVEAL_PROFILE_ENV};
