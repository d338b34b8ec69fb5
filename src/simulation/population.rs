use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use serde::{Deserialize, Serialize};
use log::{debug, info};
use crate::dosing::Dose;
use crate::error::{PKError, PKResult};
use crate::models::{Compound, SubjectProfile};
use super::{simulate, ExposureSummary};

const WEIGHT_BOUNDS_KG: (f64, f64) = (30.0, 200.0);
const AGE_BOUNDS_YEARS: (f64, f64) = (18.0, 100.0);

/// Demographic spread of a simulated cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortConfig {
    pub size: usize,
    pub weight_mean: f64,
    pub weight_sd: f64,
    pub age_mean: f64,
    pub age_sd: f64,
}

impl Default for CohortConfig {
    fn default() -> Self {
        Self {
            size: 100,
            weight_mean: 70.0,
            weight_sd: 15.0,
            age_mean: 45.0,
            age_sd: 12.0,
        }
    }
}

impl CohortConfig {
    pub fn validate(&self) -> PKResult<()> {
        if self.size == 0 {
            return Err(PKError::Validation("Cohort size must be at least 1".to_string()));
        }
        if self.weight_mean <= 0.0 || self.age_mean <= 0.0 {
            return Err(PKError::Validation(
                "Cohort weight and age means must be positive".to_string()
            ));
        }
        if self.weight_sd < 0.0 || self.age_sd < 0.0 {
            return Err(PKError::Validation(
                "Cohort standard deviations must not be negative".to_string()
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortMember {
    pub member_id: usize,
    pub subject: SubjectProfile,
    pub exposure: ExposureSummary,
}

/// Simulates `config.size` subjects whose weight and age are drawn around
/// `base`. The remaining subject fields are copied from `base`.
pub fn simulate_cohort(
    config: &CohortConfig,
    base: &SubjectProfile,
    time_points: &[f64],
    doses: &[Dose],
    compounds: &[Compound],
    seed: Option<u64>,
) -> PKResult<Vec<CohortMember>> {
    config.validate()?;

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let weight_dist = Normal::new(config.weight_mean, config.weight_sd)?;
    let age_dist = Normal::new(config.age_mean, config.age_sd)?;

    info!("Starting cohort simulation for {} subjects", config.size);

    let mut members = Vec::with_capacity(config.size);
    for member_id in 1..=config.size {
        let weight: f64 = rng.sample(weight_dist);
        let age: f64 = rng.sample(age_dist);

        let subject = SubjectProfile {
            weight: weight.clamp(WEIGHT_BOUNDS_KG.0, WEIGHT_BOUNDS_KG.1),
            age: age.clamp(AGE_BOUNDS_YEARS.0, AGE_BOUNDS_YEARS.1),
            ..base.clone()
        };
        debug!("Cohort member {}: {:.1} kg, {:.1} years", member_id, subject.weight, subject.age);

        let results = simulate(time_points, doses, compounds, &subject);
        members.push(CohortMember {
            member_id,
            subject,
            exposure: ExposureSummary::from_results(&results),
        });
    }

    info!("Cohort simulation completed");
    Ok(members)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortSummary {
    pub n_subjects: usize,
    pub n_toxic: usize,
    pub cmax_mean: f64,
    pub cmax_sd: f64,
    pub auc_mean: f64,
    pub auc_sd: f64,
    pub tmax_mean: f64,
    pub tmax_sd: f64,
}

impl CohortSummary {
    pub fn from_members(members: &[CohortMember]) -> Self {
        let cmax_values: Vec<f64> = members.iter().map(|m| m.exposure.cmax).collect();
        let auc_values: Vec<f64> = members.iter().map(|m| m.exposure.auc).collect();
        let tmax_values: Vec<f64> = members.iter()
            .filter_map(|m| m.exposure.tmax)
            .collect();

        Self {
            n_subjects: members.len(),
            n_toxic: members.iter().filter(|m| m.exposure.toxic_samples > 0).count(),
            cmax_mean: mean(&cmax_values),
            cmax_sd: std_dev(&cmax_values),
            auc_mean: mean(&auc_values),
            auc_sd: std_dev(&auc_values),
            tmax_mean: mean(&tmax_values),
            tmax_sd: std_dev(&tmax_values),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        0.0
    } else {
        let mean_val = mean(values);
        let variance = values.iter()
            .map(|v| (v - mean_val).powi(2))
            .sum::<f64>() / (values.len() - 1) as f64;
        variance.sqrt()
    }
}
