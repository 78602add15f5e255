//! Filter configuration.

use serde::{Deserialize, Serialize};

use crate::catalog::Difficulty;

/// What a random pick has to satisfy.
///
/// Tier flags mark difficulties that must be present; tiers left `false` are
/// never checked. Numeric bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub easy: bool,
    #[serde(default)]
    pub normal: bool,
    #[serde(default)]
    pub hard: bool,
    #[serde(default)]
    pub expert: bool,
    #[serde(default)]
    pub expert_plus: bool,

    /// Minimum community rating.
    #[serde(default)]
    pub min_rating: f64,
    /// Minimum download count.
    #[serde(default)]
    pub min_downloads: u64,

    /// Minimum song length in seconds.
    #[serde(default = "default_min_duration")]
    pub min_duration: f64,
    /// Maximum song length in seconds.
    #[serde(default = "default_max_duration")]
    pub max_duration: f64,

    /// Minimum tempo in BPM.
    #[serde(default)]
    pub min_bpm: f64,
    /// Maximum tempo in BPM.
    #[serde(default = "default_max_bpm")]
    pub max_bpm: f64,
}

fn default_min_duration() -> f64 {
    30.0
}

fn default_max_duration() -> f64 {
    3600.0
}

fn default_max_bpm() -> f64 {
    600.0
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            easy: false,
            normal: false,
            hard: false,
            expert: false,
            expert_plus: false,
            min_rating: 0.0,
            min_downloads: 0,
            min_duration: default_min_duration(),
            max_duration: default_max_duration(),
            min_bpm: 0.0,
            max_bpm: default_max_bpm(),
        }
    }
}

impl FilterCriteria {
    /// Whether a tier is required.
    pub fn requires(&self, difficulty: Difficulty) -> bool {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
            Difficulty::Expert => self.expert,
            Difficulty::ExpertPlus => self.expert_plus,
        }
    }

    /// Required tiers, easiest first.
    pub fn required_difficulties(&self) -> impl Iterator<Item = Difficulty> + '_ {
        Difficulty::ALL.into_iter().filter(|d| self.requires(*d))
    }

    /// Check that the ranges make sense.
    pub fn validate(&self) -> Result<(), String> {
        if !self.min_rating.is_finite() || self.min_rating < 0.0 {
            return Err(format!(
                "filter.min_rating must be a non-negative number, got {}",
                self.min_rating
            ));
        }
        if !self.min_bpm.is_finite() || !self.max_bpm.is_finite() || self.min_bpm < 0.0 {
            return Err(format!(
                "filter bpm bounds must be non-negative numbers, got {}..{}",
                self.min_bpm, self.max_bpm
            ));
        }
        if self.min_bpm > self.max_bpm {
            return Err(format!(
                "filter.min_bpm ({}) is greater than filter.max_bpm ({})",
                self.min_bpm, self.max_bpm
            ));
        }
        if !self.min_duration.is_finite()
            || !self.max_duration.is_finite()
            || self.min_duration < 0.0
        {
            return Err(format!(
                "filter duration bounds must be non-negative numbers, got {}..{}",
                self.min_duration, self.max_duration
            ));
        }
        if self.min_duration > self.max_duration {
            return Err(format!(
                "filter.min_duration ({}) is greater than filter.max_duration ({})",
                self.min_duration, self.max_duration
            ));
        }
        Ok(())
    }
}
