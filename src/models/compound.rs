use serde::{Deserialize, Serialize};
use super::Metabolism;
use crate::error::{PKError, PKResult};

/// A drug or supplement with its pharmacokinetic parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compound {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub half_life_hours: f64,
    pub bioavailability: f64,
    pub time_to_peak_hours: f64,
    /// Volume of distribution in L/kg
    pub vol_dist_factor: f64,
    pub toxicity_threshold_mg_l: f64,
    pub metabolism: Metabolism,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub default_dose_mg: f64,
}

impl Compound {
    pub fn validate(&self) -> PKResult<()> {
        let positive = [
            ("halfLifeHours", self.half_life_hours),
            ("timeToPeakHours", self.time_to_peak_hours),
            ("volDistFactor", self.vol_dist_factor),
            ("toxicityThresholdMgL", self.toxicity_threshold_mg_l),
        ];

        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(self.invalid(format!("{} must be positive, got {}", name, value)));
            }
        }

        if !(self.bioavailability > 0.0 && self.bioavailability <= 1.0) {
            return Err(self.invalid(format!(
                "bioavailability must be in (0, 1], got {}",
                self.bioavailability
            )));
        }

        if self.default_dose_mg < 0.0 {
            return Err(self.invalid("defaultDoseMg must not be negative".to_string()));
        }

        Ok(())
    }

    fn invalid(&self, reason: String) -> PKError {
        PKError::InvalidCompound {
            id: self.id.clone(),
            reason,
        }
    }
}
