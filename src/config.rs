use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use log::{debug, warn};
use crate::catalog;
use crate::dosing::{Dose, DoseSchedule};
use crate::error::{PKError, PKResult};
use crate::models::{Compound, SubjectProfile};
use crate::simulation::{CohortConfig, TimeGrid};

/// A simulation scenario as read from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default)]
    pub subject: SubjectProfile,
    pub compounds: Vec<CompoundSource>,
    #[serde(default)]
    pub doses: Vec<DoseConfig>,
    #[serde(default)]
    pub grid: GridConfig,
    pub status_time: Option<f64>,
    /// Compound whose threshold the status readout is judged against.
    /// Defaults to the first compound.
    pub selected_compound: Option<String>,
    pub cohort: Option<CohortConfig>,
}

/// Either a catalog id or a full inline definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompoundSource {
    Catalog(String),
    Inline(Compound),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoseConfig {
    pub id: Option<String>,
    pub compound: String,
    pub timestamp: f64,
    /// Falls back to the compound's default dose
    pub amount_mg: Option<f64>,
}

/// Missing fields fall back to the 0 to 24 h quarter-hour grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 24.0,
            step: 0.25,
        }
    }
}

impl Scenario {
    pub fn from_file<P: AsRef<Path>>(path: P) -> PKResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> PKResult<Self> {
        let scenario: Scenario = serde_json::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> PKResult<()> {
        self.subject.validate()?;

        if self.compounds.is_empty() {
            return Err(PKError::Validation(
                "At least one compound must be specified".to_string()
            ));
        }

        let compounds = self.resolve_compounds()?;
        let mut ids = HashSet::new();
        for compound in &compounds {
            compound.validate()?;
            if !ids.insert(compound.id.as_str()) {
                return Err(PKError::Validation(
                    format!("Duplicate compound id: {}", compound.id)
                ));
            }
        }

        self.validate_doses(&ids)?;
        self.time_grid()?;

        if let Some(selected) = &self.selected_compound {
            if !ids.contains(selected.as_str()) {
                return Err(PKError::UnknownCompound(selected.clone()));
            }
        }

        if let Some(cohort) = &self.cohort {
            cohort.validate()?;
        }

        Ok(())
    }

    fn validate_doses(&self, compound_ids: &HashSet<&str>) -> PKResult<()> {
        for dose in &self.doses {
            if !(dose.timestamp.is_finite() && dose.timestamp >= 0.0) {
                return Err(PKError::InvalidDosing(format!(
                    "Dose timestamp must be a non-negative number of hours, got {}",
                    dose.timestamp
                )));
            }

            if let Some(amount) = dose.amount_mg {
                if !(amount.is_finite() && amount >= 0.0) {
                    return Err(PKError::InvalidDosing(
                        format!("Dose amount must not be negative, got {}", amount)
                    ));
                }
            }

            // tolerated: the engine treats these doses as contributing nothing
            if !compound_ids.contains(dose.compound.as_str()) {
                warn!("Dose at {}h references unknown compound '{}'", dose.timestamp, dose.compound);
            }
        }
        Ok(())
    }

    /// Catalog ids replaced by their library definitions, in scenario order.
    pub fn resolve_compounds(&self) -> PKResult<Vec<Compound>> {
        self.compounds
            .iter()
            .map(|source| match source {
                CompoundSource::Catalog(id) => catalog::find(id)
                    .cloned()
                    .ok_or_else(|| PKError::UnknownCompound(id.clone())),
                CompoundSource::Inline(compound) => Ok(compound.clone()),
            })
            .collect()
    }

    pub fn dose_schedule(&self, compounds: &[Compound]) -> DoseSchedule {
        let doses = self.doses
            .iter()
            .map(|config| {
                let amount = config.amount_mg.unwrap_or_else(|| {
                    compounds
                        .iter()
                        .find(|c| c.id == config.compound)
                        .map_or(0.0, |c| c.default_dose_mg)
                });

                match &config.id {
                    Some(id) => Dose::with_id(id.clone(), config.compound.clone(), config.timestamp, amount),
                    None => Dose::new(config.compound.clone(), config.timestamp, amount),
                }
            })
            .collect();

        let schedule = DoseSchedule::from_doses(doses);
        debug!("Built dose schedule with {} doses", schedule.len());
        schedule
    }

    pub fn time_grid(&self) -> PKResult<TimeGrid> {
        TimeGrid::uniform(self.grid.start, self.grid.end, self.grid.step)
    }

    /// The compound status readouts are judged against.
    pub fn selected<'a>(&self, compounds: &'a [Compound]) -> Option<&'a Compound> {
        match &self.selected_compound {
            Some(id) => compounds.iter().find(|c| &c.id == id),
            None => compounds.first(),
        }
    }
}
