//! Deterministic clinical status annotation of a concentration curve.

pub mod crowding;

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::simulation::{sample_index, SimulationResult};

pub use crowding::{metabolic_crowding, CrowdingWarning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Danger,
    Warning,
    Success,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Absorption,
    Peak,
    Elimination,
    Cleared,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Absorption => "Absorption",
            Phase::Peak => "Peak",
            Phase::Elimination => "Elimination",
            Phase::Cleared => "Cleared",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClinicalStatus {
    pub message: &'static str,
    pub severity: Severity,
    pub phase: Phase,
}

pub const CRITICAL_MESSAGE: &str =
    "CRITICAL: Plasma concentration exceeds therapeutic safety threshold. Toxicity risk detected.";
pub const WARNING_MESSAGE: &str =
    "WARNING: Approaching upper limit of therapeutic window. Monitor closely.";
pub const CLEARED_MESSAGE: &str =
    "Drug effectively cleared from system. Concentration negligible.";
pub const PEAK_MESSAGE: &str =
    "Peak plasma concentration (Cmax) reached. Bioavailability maximized.";
pub const RISING_MESSAGE: &str =
    "Absorption phase active. Plasma concentration rising.";
pub const FALLING_MESSAGE: &str =
    "Elimination phase active. Metabolic clearance proceeding.";

const WARNING_FRACTION: f64 = 0.8;
const CLEARED_CONCENTRATION: f64 = 0.1;
const CLEARED_AFTER_HOURS: f64 = 2.0;
const FLAT_SLOPE: f64 = 0.001;
const PEAK_MIN_CONCENTRATION: f64 = 0.5;

/// Inputs to the classifier: the current sample, the one before it, and the
/// threshold of the compound being watched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub concentration: f64,
    pub previous: f64,
    pub toxicity_threshold: f64,
    pub time_hours: f64,
}

impl Reading {
    fn slope(&self) -> f64 {
        self.concentration - self.previous
    }

    fn trend(&self) -> Phase {
        if self.concentration > self.previous {
            Phase::Absorption
        } else {
            Phase::Elimination
        }
    }
}

type Guard = fn(&Reading) -> bool;
type Verdict = fn(&Reading) -> ClinicalStatus;

/// Evaluated top to bottom; the first matching guard decides.
const DECISION_LIST: [(Guard, Verdict); 5] = [
    (is_toxic, critical),
    (is_near_threshold, near_threshold),
    (is_cleared, cleared),
    (is_flat_peak, peak),
    (is_rising, rising),
];

/// Verdict when no guard in [`DECISION_LIST`] matches.
const FALLBACK: Verdict = falling;

fn is_toxic(r: &Reading) -> bool {
    r.concentration > r.toxicity_threshold
}

fn is_near_threshold(r: &Reading) -> bool {
    r.concentration > WARNING_FRACTION * r.toxicity_threshold
}

fn is_cleared(r: &Reading) -> bool {
    r.concentration < CLEARED_CONCENTRATION && r.time_hours > CLEARED_AFTER_HOURS
}

fn is_flat_peak(r: &Reading) -> bool {
    r.slope().abs() < FLAT_SLOPE && r.concentration > PEAK_MIN_CONCENTRATION
}

fn is_rising(r: &Reading) -> bool {
    r.slope() > 0.0
}

fn critical(r: &Reading) -> ClinicalStatus {
    ClinicalStatus { message: CRITICAL_MESSAGE, severity: Severity::Danger, phase: r.trend() }
}

fn near_threshold(r: &Reading) -> ClinicalStatus {
    ClinicalStatus { message: WARNING_MESSAGE, severity: Severity::Warning, phase: r.trend() }
}

fn cleared(_: &Reading) -> ClinicalStatus {
    ClinicalStatus { message: CLEARED_MESSAGE, severity: Severity::Success, phase: Phase::Cleared }
}

fn peak(_: &Reading) -> ClinicalStatus {
    ClinicalStatus { message: PEAK_MESSAGE, severity: Severity::Neutral, phase: Phase::Peak }
}

fn rising(_: &Reading) -> ClinicalStatus {
    ClinicalStatus { message: RISING_MESSAGE, severity: Severity::Neutral, phase: Phase::Absorption }
}

fn falling(_: &Reading) -> ClinicalStatus {
    ClinicalStatus { message: FALLING_MESSAGE, severity: Severity::Neutral, phase: Phase::Elimination }
}

impl Reading {
    pub fn classify(&self) -> ClinicalStatus {
        let verdict = DECISION_LIST
            .iter()
            .find(|(guard, _)| guard(self))
            .map_or(FALLBACK, |&(_, verdict)| verdict);
        verdict(self)
    }
}

pub fn classify(
    concentration: f64,
    prev_concentration: f64,
    toxicity_threshold: f64,
    current_time_hours: f64,
) -> ClinicalStatus {
    Reading {
        concentration,
        previous: prev_concentration,
        toxicity_threshold,
        time_hours: current_time_hours,
    }
    .classify()
}

/// Classifies the grid point nearest `time` against the point before it.
pub fn status_at(results: &[SimulationResult], time: f64, toxicity_threshold: f64) -> Option<ClinicalStatus> {
    let index = sample_index(results, time)?;
    let current = &results[index];
    let previous = &results[index.saturating_sub(1)];

    Some(classify(current.concentration, previous.concentration, toxicity_threshold, time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::dosing::Dose;
    use crate::models::SubjectProfile;
    use crate::simulation::{simulate, TimeGrid};

    #[test]
    fn test_toxic_rising_and_falling() {
        let status = classify(70.0, 65.0, 60.0, 1.0);
        assert_eq!(status.severity, Severity::Danger);
        assert_eq!(status.phase, Phase::Absorption);
        assert_eq!(status.message, CRITICAL_MESSAGE);

        let status = classify(70.0, 75.0, 60.0, 3.0);
        assert_eq!(status.phase, Phase::Elimination);
    }

    #[test]
    fn test_toxic_wins_over_flat_peak() {
        // flat slope and above 0.5 would also match the peak rule
        let status = classify(70.0, 70.0, 60.0, 1.0);
        assert_eq!(status.severity, Severity::Danger);
        assert_eq!(status.phase, Phase::Elimination);
    }

    #[test]
    fn test_near_threshold() {
        let status = classify(50.0, 49.0, 60.0, 1.0);
        assert_eq!(status.severity, Severity::Warning);
        assert_eq!(status.phase, Phase::Absorption);

        // exactly 80% is not "above"
        let status = classify(48.0, 49.0, 60.0, 1.0);
        assert_eq!(status.severity, Severity::Neutral);
    }

    #[test]
    fn test_cleared_only_after_two_hours() {
        let status = classify(0.05, 0.06, 60.0, 2.5);
        assert_eq!(status.severity, Severity::Success);
        assert_eq!(status.phase, Phase::Cleared);

        let status = classify(0.05, 0.0, 60.0, 2.0);
        assert_eq!(status.phase, Phase::Absorption);

        let status = classify(0.0, 0.0, 60.0, 0.0);
        assert_eq!(status.phase, Phase::Elimination);
    }

    #[test]
    fn test_peak_requires_meaningful_concentration() {
        let status = classify(1.6427, 1.6421, 60.0, 1.0);
        assert_eq!(status.phase, Phase::Peak);
        assert_eq!(status.severity, Severity::Neutral);

        let status = classify(0.3, 0.3, 60.0, 1.0);
        assert_eq!(status.phase, Phase::Elimination);
    }

    #[test]
    fn test_slope_phases() {
        assert_eq!(classify(1.0, 0.5, 60.0, 0.5).message, RISING_MESSAGE);
        assert_eq!(classify(1.0, 1.5, 60.0, 5.0).message, FALLING_MESSAGE);
    }

    #[test]
    fn test_unmatched_reading_falls_back_to_elimination() {
        let reading = Reading { concentration: 0.2, previous: 0.2, toxicity_threshold: 60.0, time_hours: 1.0 };
        assert!(DECISION_LIST.iter().all(|(guard, _)| !guard(&reading)));

        let status = reading.classify();
        assert_eq!(status.message, FALLING_MESSAGE);
        assert_eq!(status.phase, Phase::Elimination);
        assert_eq!(status.severity, Severity::Neutral);
    }

    #[test]
    fn test_status_along_curve() {
        let compound = catalog::find("caffeine").unwrap().clone();
        let threshold = compound.toxicity_threshold_mg_l;
        let doses = vec![Dose::with_id("a", "caffeine", 0.0, 100.0)];
        let results = simulate(TimeGrid::default().points(), &doses, &[compound], &SubjectProfile::default());

        assert_eq!(status_at(&results, 0.5, threshold).unwrap().phase, Phase::Absorption);
        assert_eq!(status_at(&results, 12.0, threshold).unwrap().phase, Phase::Elimination);
        assert!(status_at(&[], 1.0, threshold).is_none());

        // first sample compares against itself
        let status = status_at(&results, 0.0, threshold).unwrap();
        assert_eq!(status.phase, Phase::Elimination);
    }

    #[test]
    fn test_status_flags_toxicity() {
        let compound = catalog::find("caffeine").unwrap().clone();
        let doses = vec![Dose::with_id("a", "caffeine", 0.0, 5000.0)];
        let results = simulate(TimeGrid::default().points(), &doses, &[compound], &SubjectProfile::default());

        let status = status_at(&results, 1.0, 60.0).unwrap();
        assert_eq!(status.severity, Severity::Danger);
    }
}
