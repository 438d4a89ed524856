use std::fmt;

use serde::{Deserialize, Serialize};

pub const CRITICAL_THRESHOLD: f64 = 90.0;
pub const HIGH_THRESHOLD: f64 = 75.0;
pub const MEDIUM_THRESHOLD: f64 = 50.0;

/// Display band for a fatigue score, declared in ascending severity so the
/// derived `Ord` matches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Low,
    Medium,
    High,
    Critical,
}

impl Band {
    pub fn rest_advisory(self) -> bool {
        self == Band::Critical
    }

    pub fn color(self) -> &'static str {
        match self {
            Band::Low => "green",
            Band::Medium => "yellow",
            Band::High => "orange",
            Band::Critical => "red",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Band::Low => "low",
            Band::Medium => "medium",
            Band::High => "high",
            Band::Critical => "critical",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a fatigue score to its band. Thresholds are inclusive lower bounds.
/// Out-of-range scores are not clamped; NaN falls through to `Low`.
pub fn classify(fatigue: f64) -> Band {
    if fatigue >= CRITICAL_THRESHOLD {
        Band::Critical
    } else if fatigue >= HIGH_THRESHOLD {
        Band::High
    } else if fatigue >= MEDIUM_THRESHOLD {
        Band::Medium
    } else {
        Band::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_values_land_in_expected_band() {
        assert_eq!(classify(49.0), Band::Low);
        assert_eq!(classify(49.99), Band::Low);
        assert_eq!(classify(50.0), Band::Medium);
        assert_eq!(classify(74.0), Band::Medium);
        assert_eq!(classify(75.0), Band::High);
        assert_eq!(classify(89.0), Band::High);
        assert_eq!(classify(90.0), Band::Critical);
    }

    #[test]
    fn classification_is_monotonic() {
        let mut previous = classify(-50.0);
        for step in -500..=2000 {
            let band = classify(step as f64 / 10.0);
            assert!(band >= previous, "band dropped at {}", step as f64 / 10.0);
            previous = band;
        }
    }

    #[test]
    fn out_of_range_and_nan_do_not_panic() {
        assert_eq!(classify(-12.0), Band::Low);
        assert_eq!(classify(180.5), Band::Critical);
        assert_eq!(classify(f64::INFINITY), Band::Critical);
        assert_eq!(classify(f64::NAN), Band::Low);
    }

    #[test]
    fn only_critical_raises_rest_advisory() {
        assert!(Band::Critical.rest_advisory());
        assert!(!Band::High.rest_advisory());
        assert!(!Band::Medium.rest_advisory());
        assert!(!Band::Low.rest_advisory());
    }
}
