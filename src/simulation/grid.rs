use serde::{Deserialize, Serialize};
use crate::error::{PKError, PKResult};
use super::SimulationResult;

/// Upper bound on the number of points a uniform grid may hold.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Evenly spaced simulation time points in hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    points: Vec<f64>,
}

impl Default for TimeGrid {
    /// 0 to 24 h in quarter-hour steps (97 points).
    fn default() -> Self {
        Self {
            points: (0..=96).map(|i| i as f64 * 0.25).collect(),
        }
    }
}

impl TimeGrid {
    pub fn uniform(start: f64, end: f64, step: f64) -> PKResult<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(PKError::Validation(format!("Grid step must be positive, got {}", step)));
        }
        if !(start.is_finite() && end.is_finite()) || end < start {
            return Err(PKError::Validation(format!(
                "Grid end ({}) must not precede start ({})",
                end, start
            )));
        }

        let intervals = ((end - start) / step).round();
        if !intervals.is_finite() || intervals >= MAX_GRID_POINTS as f64 {
            return Err(PKError::Validation(format!(
                "Grid from {} to {} in steps of {} exceeds {} points",
                start, end, step, MAX_GRID_POINTS
            )));
        }

        let intervals = intervals as usize;
        let points = (0..=intervals).map(|i| start + i as f64 * step).collect();

        Ok(Self { points })
    }

    pub fn from_points(points: Vec<f64>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Index of the result whose time is closest to `time`; the earlier one wins a tie.
pub fn sample_index(results: &[SimulationResult], time: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (index, result) in results.iter().enumerate() {
        let distance = (result.time - time).abs();
        if best.map_or(true, |(_, closest)| distance < closest) {
            best = Some((index, distance));
        }
    }

    best.map(|(index, _)| index)
}
