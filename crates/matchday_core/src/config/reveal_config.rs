//! Reveal Timing Configuration
//!
//! How simulated match time maps onto wall-clock time when a pre-computed
//! match is disclosed progressively.
//!
//! | Field | Standard | Accelerated |
//! |-------|----------|-------------|
//! | minute | 60 s | 10 s |
//! | half-time break | 15 min | 2 min |
//! | extra-time break | 5 min | 1 min |
//! | extra-time half break | 1 min | 15 s |
//! | shootout break | 3 min | 30 s |
//! | per kick | 45 s | 10 s |
//!
//! ## Usage
//!
//! ```rust
//! use matchday_core::config::RevealConfig;
//!
//! let live = RevealConfig::standard();
//! let quick = RevealConfig::accelerated();
//! let from_env = RevealConfig::from_env_or_default();
//! assert!(quick.minute_secs < live.minute_secs);
//! # let _ = from_env;
//! ```
//!
//! ## Environment Variables
//!
//! - `MATCHDAY_REVEAL_PROFILE`: Select preset (standard, accelerated)

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::env;

pub const REVEAL_PROFILE_ENV: &str = "MATCHDAY_REVEAL_PROFILE";

/// Durations are whole seconds so fixtures can override them in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Wall-clock length of one simulated minute.
    pub minute_secs: u32,
    /// Between the half-time whistle and the second-half kick-off.
    pub half_time_break_secs: u32,
    /// Between the end of regulation and the extra-time kick-off.
    pub extra_time_break_secs: u32,
    /// Between the two halves of extra time.
    pub extra_time_half_break_secs: u32,
    /// Between the end of extra time and the first penalty.
    pub shootout_break_secs: u32,
    /// Between consecutive penalty kicks.
    pub kick_interval_secs: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl RevealConfig {
    /// Real-time pacing.
    pub fn standard() -> Self {
        Self {
            minute_secs: 60,
            half_time_break_secs: 15 * 60,
            extra_time_break_secs: 5 * 60,
            extra_time_half_break_secs: 60,
            shootout_break_secs: 3 * 60,
            kick_interval_secs: 45,
        }
    }

    /// Condensed pacing for highlights and previews.
    pub fn accelerated() -> Self {
        Self {
            minute_secs: 10,
            half_time_break_secs: 2 * 60,
            extra_time_break_secs: 60,
            extra_time_half_break_secs: 15,
            shootout_break_secs: 30,
            kick_interval_secs: 10,
        }
    }

    /// Load from environment variable MATCHDAY_REVEAL_PROFILE or use default
    pub fn from_env_or_default() -> Self {
        match env::var(REVEAL_PROFILE_ENV).unwrap_or_default().to_lowercase().as_str() {
            "accelerated" | "fast" => Self::accelerated(),
            _ => Self::default(),
        }
    }

    pub fn minute(&self) -> Duration {
        Duration::seconds(self.minute_secs as i64)
    }

    pub fn half_time_break(&self) -> Duration {
        Duration::seconds(self.half_time_break_secs as i64)
    }

    pub fn extra_time_break(&self) -> Duration {
        Duration::seconds(self.extra_time_break_secs as i64)
    }

    pub fn extra_time_half_break(&self) -> Duration {
        Duration::seconds(self.extra_time_half_break_secs as i64)
    }

    pub fn shootout_break(&self) -> Duration {
        Duration::seconds(self.shootout_break_secs as i64)
    }

    pub fn kick_interval(&self) -> Duration {
        Duration::seconds(self.kick_interval_secs as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_is_real_time() {
        let cfg = RevealConfig::default();
        assert_eq!(cfg, RevealConfig::standard());
        assert_eq!(cfg.minute(), Duration::minutes(1));
        assert_eq!(cfg.half_time_break(), Duration::minutes(15));
        assert!(cfg.extra_time_half_break() < cfg.extra_time_break());
    }

    #[test]
    fn test_accelerated_is_shorter_everywhere() {
        let standard = RevealConfig::standard();
        let fast = RevealConfig::accelerated();
        assert!(fast.minute() < standard.minute());
        assert!(fast.half_time_break() < standard.half_time_break());
        assert!(fast.shootout_break() < standard.shootout_break());
        assert!(fast.kick_interval() < standard.kick_interval());
    }

    #[test]
    fn test_partial_json_override() {
        let cfg: RevealConfig = serde_json::from_str(r#"{"minute_secs": 5}"#).unwrap();
        assert_eq!(cfg.minute_secs, 5);
        assert_eq!(cfg.half_time_break_secs, RevealConfig::standard().half_time_break_secs);
    }
}
