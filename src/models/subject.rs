use serde::{Deserialize, Serialize};
use crate::error::{PKError, PKResult};

/// Clearance multipliers for activity levels 1 through 5.
pub const ACTIVITY_MULTIPLIERS: [f64; 5] = [0.8, 0.9, 1.0, 1.2, 1.5];

/// Subjects older than this clear compounds more slowly.
pub const ELDERLY_AGE_YEARS: f64 = 65.0;
pub const ELDERLY_CLEARANCE_FACTOR: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Ordinal activity level, 1 (sedentary) to 5 (highly active).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ActivityLevel {
    Sedentary = 1,
    Light = 2,
    Normal = 3,
    Active = 4,
    HyperMetabolic = 5,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Normal,
        ActivityLevel::Active,
        ActivityLevel::HyperMetabolic,
    ];

    pub fn multiplier(self) -> f64 {
        ACTIVITY_MULTIPLIERS[self as usize - 1]
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Light => "Light",
            ActivityLevel::Normal => "Normal",
            ActivityLevel::Active => "Active",
            ActivityLevel::HyperMetabolic => "Hyper-Metabolic",
        }
    }
}

impl TryFrom<u8> for ActivityLevel {
    type Error = PKError;

    fn try_from(value: u8) -> PKResult<Self> {
        match value {
            1 => Ok(ActivityLevel::Sedentary),
            2 => Ok(ActivityLevel::Light),
            3 => Ok(ActivityLevel::Normal),
            4 => Ok(ActivityLevel::Active),
            5 => Ok(ActivityLevel::HyperMetabolic),
            _ => Err(PKError::InvalidSubject(format!(
                "activity level must be between 1 and 5, got {}",
                value
            ))),
        }
    }
}

impl From<ActivityLevel> for u8 {
    fn from(level: ActivityLevel) -> u8 {
        level as u8
    }
}

/// Snapshot of the subject a simulation is run for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectProfile {
    pub age: f64,
    pub sex: Sex,
    pub weight: f64,
    pub height: f64,
    pub activity_level: ActivityLevel,
}

impl Default for SubjectProfile {
    fn default() -> Self {
        Self {
            age: 30.0,
            sex: Sex::Male,
            weight: 75.0,
            height: 180.0,
            activity_level: ActivityLevel::Normal,
        }
    }
}

impl SubjectProfile {
    pub fn age_multiplier(&self) -> f64 {
        if self.age > ELDERLY_AGE_YEARS {
            ELDERLY_CLEARANCE_FACTOR
        } else {
            1.0
        }
    }

    pub fn with_activity(&self, activity_level: ActivityLevel) -> Self {
        Self {
            activity_level,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> PKResult<()> {
        if !(self.age.is_finite() && self.age > 0.0) {
            return Err(PKError::InvalidSubject("age must be positive".to_string()));
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(PKError::InvalidSubject("weight must be positive".to_string()));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(PKError::InvalidSubject("height must be positive".to_string()));
        }
        Ok(())
    }
}
