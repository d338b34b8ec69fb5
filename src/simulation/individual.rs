use serde::{Deserialize, Serialize};
use super::{OrganLoads, SimulationResult};
use crate::models::Metabolism;

/// Exposure endpoints derived from one simulated curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureSummary {
    pub cmax: f64,
    pub tmax: Option<f64>,
    /// mg*h/L
    pub auc: f64,
    pub toxic_samples: usize,
    pub first_toxic_time: Option<f64>,
    pub peak_organ_loads: OrganLoads,
}

impl ExposureSummary {
    pub fn from_results(results: &[SimulationResult]) -> Self {
        let mut peak_organ_loads = OrganLoads::default();
        for result in results {
            for (pathway, load) in result.organ_loads.iter() {
                peak_organ_loads.raise(pathway, load);
            }
        }

        Self {
            cmax: max_concentration(results),
            tmax: time_to_max(results),
            auc: auc(results),
            toxic_samples: results.iter().filter(|r| r.is_toxic).count(),
            first_toxic_time: results.iter().find(|r| r.is_toxic).map(|r| r.time),
            peak_organ_loads,
        }
    }

    pub fn peak_load(&self, pathway: Metabolism) -> f64 {
        self.peak_organ_loads.get(pathway)
    }
}

pub fn max_concentration(results: &[SimulationResult]) -> f64 {
    results.iter()
        .map(|r| r.concentration)
        .fold(0.0, f64::max)
}

/// Trapezoidal AUC over consecutive results
pub fn auc(results: &[SimulationResult]) -> f64 {
    results.windows(2)
        .map(|w| (w[1].time - w[0].time) * (w[0].concentration + w[1].concentration) / 2.0)
        .sum()
}

/// Time of the first maximum
pub fn time_to_max(results: &[SimulationResult]) -> Option<f64> {
    let mut best: Option<&SimulationResult> = None;
    for result in results {
        if best.map_or(true, |b| result.concentration > b.concentration) {
            best = Some(result);
        }
    }
    best.map(|r| r.time)
}
