use serde::{Deserialize, Serialize};
use crate::dosing::Dose;
use crate::models::{ActivityLevel, Compound, SubjectProfile};
use super::simulate;

/// Total concentration at one time point for three activity variants of the
/// same subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityComparison {
    pub time: f64,
    pub sedentary: f64,
    pub normal: f64,
    pub hyper_metabolic: f64,
}

pub const COMPARED_LEVELS: [ActivityLevel; 3] = [
    ActivityLevel::Sedentary,
    ActivityLevel::Normal,
    ActivityLevel::HyperMetabolic,
];

/// Simulates the subject at activity levels 1, 3 and 5 with everything else
/// held fixed.
pub fn compare_activity_levels(
    time_points: &[f64],
    doses: &[Dose],
    compounds: &[Compound],
    subject: &SubjectProfile,
) -> Vec<ActivityComparison> {
    let [sedentary, normal, hyper] = COMPARED_LEVELS
        .map(|level| simulate(time_points, doses, compounds, &subject.with_activity(level)));

    time_points
        .iter()
        .enumerate()
        .map(|(i, &time)| ActivityComparison {
            time,
            sedentary: sedentary[i].concentration,
            normal: normal[i].concentration,
            hyper_metabolic: hyper[i].concentration,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::simulation::TimeGrid;

    #[test]
    fn test_comparison_rows() {
        let grid = TimeGrid::default();
        let compounds = vec![catalog::find("caffeine").unwrap().clone()];
        let doses = vec![Dose::with_id("a", "caffeine", 0.0, 100.0)];
        let subject = SubjectProfile::default().with_activity(ActivityLevel::Active);

        let rows = compare_activity_levels(grid.points(), &doses, &compounds, &subject);
        assert_eq!(rows.len(), grid.len());

        // the normal column ignores the subject's own activity level
        let normal = simulate(grid.points(), &doses, &compounds, &SubjectProfile::default());
        for (row, result) in rows.iter().zip(&normal) {
            assert_eq!(row.normal, result.concentration);
        }

        // 6 h is well past the peak for every variant
        let row = &rows[24];
        assert_eq!(row.time, 6.0);
        assert!(row.sedentary > row.normal);
        assert!(row.normal > row.hyper_metabolic);
    }
}
