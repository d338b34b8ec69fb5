pub mod organ_load;
pub mod grid;
pub mod comparison;
pub mod individual;
pub mod population;

use serde::{Deserialize, Serialize};
use log::debug;
use crate::dosing::Dose;
use crate::models::{point_concentration, Compound, SubjectProfile};

pub use organ_load::OrganLoads;
pub use grid::{sample_index, TimeGrid, MAX_GRID_POINTS};
pub use comparison::{compare_activity_levels, ActivityComparison};
pub use individual::ExposureSummary;
pub use population::{simulate_cohort, CohortConfig, CohortMember, CohortSummary};

/// State of the subject at one grid point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub time: f64,
    /// Total plasma concentration (mg/L)
    pub concentration: f64,
    pub is_toxic: bool,
    pub organ_loads: OrganLoads,
}

/// Total concentration at `time` and the per-compound contributions, aligned
/// with `compounds`.
fn contributions(
    time: f64,
    doses: &[Dose],
    compounds: &[Compound],
    subject: &SubjectProfile,
) -> (f64, Vec<f64>) {
    let mut per_compound = vec![0.0; compounds.len()];
    let mut total = 0.0;

    for dose in doses {
        // unknown compounds contribute nothing
        if let Some(index) = compounds.iter().position(|c| c.id == dose.compound_id) {
            let conc = point_concentration(time, dose, &compounds[index], subject);
            per_compound[index] += conc;
            total += conc;
        }
    }

    (total, per_compound)
}

/// Compound with the largest positive contribution; the earliest in
/// `compounds` wins a tie.
fn dominant<'a>(compounds: &'a [Compound], per_compound: &[f64]) -> Option<&'a Compound> {
    let mut best: Option<(usize, f64)> = None;

    for (index, &conc) in per_compound.iter().enumerate() {
        if conc > 0.0 && best.map_or(true, |(_, top)| conc > top) {
            best = Some((index, conc));
        }
    }

    best.map(|(index, _)| &compounds[index])
}

/// Runs the concentration model over `time_points`, one result per point in
/// the order given.
pub fn simulate(
    time_points: &[f64],
    doses: &[Dose],
    compounds: &[Compound],
    subject: &SubjectProfile,
) -> Vec<SimulationResult> {
    debug!(
        "Simulating {} time points for {} doses across {} compounds",
        time_points.len(),
        doses.len(),
        compounds.len()
    );

    time_points
        .iter()
        .map(|&time| {
            let (concentration, per_compound) = contributions(time, doses, compounds, subject);
            let main = dominant(compounds, &per_compound);

            SimulationResult {
                time,
                concentration,
                is_toxic: main.map_or(false, |c| concentration > c.toxicity_threshold_mg_l),
                organ_loads: OrganLoads::from_exposure(concentration, main),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::models::Metabolism;
    use approx::assert_relative_eq;

    fn caffeine() -> Compound {
        catalog::find("caffeine").unwrap().clone()
    }

    fn default_grid() -> Vec<f64> {
        TimeGrid::default().points().to_vec()
    }

    #[test]
    fn test_empty_inputs() {
        let subject = SubjectProfile::default();
        let grid = default_grid();

        let results = simulate(&grid, &[], &[caffeine()], &subject);
        assert_eq!(results.len(), 97);
        for result in &results {
            assert_eq!(result.concentration, 0.0);
            assert!(!result.is_toxic);
            assert!(result.organ_loads.iter().all(|(_, load)| load == 0.0));
        }

        let dose = Dose::with_id("d1", "caffeine", 0.0, 100.0);
        let results = simulate(&grid, &[dose], &[], &subject);
        assert!(results.iter().all(|r| r.concentration == 0.0 && !r.is_toxic));
    }

    #[test]
    fn test_unknown_compound_is_ignored() {
        let subject = SubjectProfile::default();
        let grid = default_grid();
        let known = Dose::with_id("d1", "caffeine", 0.0, 100.0);
        let unknown = Dose::with_id("d2", "ghost", 0.0, 100.0);

        let with_unknown = simulate(&grid, &[known.clone(), unknown], &[caffeine()], &subject);
        let without = simulate(&grid, &[known], &[caffeine()], &subject);
        assert_eq!(with_unknown, without);
    }

    #[test]
    fn test_grid_order_is_preserved() {
        let subject = SubjectProfile::default();
        let grid = vec![12.0, 0.0, 3.5, 1.0];
        let dose = Dose::with_id("d1", "caffeine", 0.0, 100.0);

        let results = simulate(&grid, &[dose], &[caffeine()], &subject);
        let times: Vec<f64> = results.iter().map(|r| r.time).collect();
        assert_eq!(times, grid);
    }

    #[test]
    fn test_caffeine_single_dose_scenario() {
        let subject = SubjectProfile::default();
        let dose = Dose::with_id("d1", "caffeine", 0.0, 100.0);
        let results = simulate(&default_grid(), &[dose], &[caffeine()], &subject);

        let cmax = results.iter().map(|r| r.concentration).fold(0.0, f64::max);
        assert_eq!(results[0].concentration, 0.0);
        assert!(results[3].concentration > 0.95 * cmax);
        assert!(!results[3].is_toxic);
        assert!(results[96].concentration < 5.0);
        assert!(results.iter().all(|r| r.concentration >= 0.0));
    }

    #[test]
    fn test_toxic_peak_saturates_dominant_pathway() {
        let subject = SubjectProfile::default();
        // peak is ~16.4 mg/L per 1000 mg for a 75 kg subject
        let dose = Dose::with_id("d1", "caffeine", 0.0, 5000.0);
        let results = simulate(&default_grid(), &[dose], &[caffeine()], &subject);

        let peak = results
            .iter()
            .max_by(|a, b| a.concentration.total_cmp(&b.concentration))
            .unwrap();
        assert!(peak.concentration > 60.0);
        assert!(peak.is_toxic);
        assert_eq!(peak.organ_loads.get(Metabolism::Neurological), 100.0);

        let intensity = peak.concentration / 60.0;
        assert_relative_eq!(
            peak.organ_loads.get(Metabolism::Cardiovascular),
            (intensity * 30.0).min(50.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_split_dose_superposition() {
        let subject = SubjectProfile::default();
        let grid = default_grid();

        let split = vec![
            Dose::with_id("a", "caffeine", 0.0, 60.0),
            Dose::with_id("b", "caffeine", 0.0, 40.0),
        ];
        let whole = vec![Dose::with_id("c", "caffeine", 0.0, 100.0)];

        let split_results = simulate(&grid, &split, &[caffeine()], &subject);
        let whole_results = simulate(&grid, &whole, &[caffeine()], &subject);

        for (s, w) in split_results.iter().zip(&whole_results) {
            assert_relative_eq!(s.concentration, w.concentration, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_staggered_doses_add_up() {
        let subject = SubjectProfile::default();
        let compound = caffeine();
        let first = Dose::with_id("a", "caffeine", 0.0, 100.0);
        let second = Dose::with_id("b", "caffeine", 4.0, 100.0);

        let results = simulate(&[4.01], &[first.clone(), second.clone()], &[compound.clone()], &subject);
        let expected = point_concentration(4.01, &first, &compound, &subject)
            + point_concentration(4.01, &second, &compound, &subject);

        assert_relative_eq!(results[0].concentration, expected, epsilon = 1e-12);
        assert!(point_concentration(4.01, &second, &compound, &subject) > 0.0);
    }

    #[test]
    fn test_dominant_compound_drives_threshold() {
        let subject = SubjectProfile::default();
        let compounds = vec![caffeine(), catalog::find("melatonin").unwrap().clone()];
        let doses = vec![
            Dose::with_id("a", "caffeine", 0.0, 100.0),
            Dose::with_id("b", "melatonin", 0.0, 3.0),
        ];

        let results = simulate(&[1.0], &doses, &compounds, &subject);
        let result = &results[0];
        // caffeine dominates, so intensity is measured against 60 mg/L
        let intensity = result.concentration / 60.0;
        assert_relative_eq!(
            result.organ_loads.get(Metabolism::Neurological),
            intensity * 100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_dominant_tie_prefers_compound_list_order() {
        let mut twin = caffeine();
        twin.id = "caffeine-b".to_string();
        twin.metabolism = Metabolism::Gastric;
        let compounds = vec![caffeine(), twin];

        let per_compound = vec![1.5, 1.5];
        assert_eq!(dominant(&compounds, &per_compound).unwrap().id, "caffeine");

        let per_compound = vec![1.0, 1.5];
        assert_eq!(dominant(&compounds, &per_compound).unwrap().id, "caffeine-b");

        assert!(dominant(&compounds, &[0.0, 0.0]).is_none());
    }

    #[test]
    fn test_pre_dose_points_have_no_dominant() {
        let subject = SubjectProfile::default();
        let dose = Dose::with_id("a", "caffeine", 6.0, 100.0);
        let results = simulate(&[0.0, 5.0], &[dose], &[caffeine()], &subject);

        for result in &results {
            assert_eq!(result.concentration, 0.0);
            assert!(result.organ_loads.iter().all(|(_, load)| load == 0.0));
        }
    }
}
