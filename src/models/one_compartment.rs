use super::{Compound, SubjectProfile};
use crate::dosing::Dose;
use std::f64::consts::LN_2;

/// Absorption rate is approximated from the time to peak as `KA_PEAK_FACTOR / tmax`.
pub const KA_PEAK_FACTOR: f64 = 2.5;

/// Below this gap between ka and ke the limiting Bateman form is used.
pub const RATE_COLLISION_TOLERANCE: f64 = 1e-9;

/// Subject-adjusted one-compartment parameters for a compound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateConstants {
    /// Elimination rate constant (1/h)
    pub ke: f64,
    /// Absorption rate constant (1/h)
    pub ka: f64,
    /// Volume of distribution (L)
    pub vd: f64,
}

impl RateConstants {
    pub fn new(compound: &Compound, subject: &SubjectProfile) -> Self {
        let ke = LN_2 / compound.half_life_hours
            * subject.activity_level.multiplier()
            * subject.age_multiplier();

        Self {
            ke,
            ka: KA_PEAK_FACTOR / compound.time_to_peak_hours,
            vd: subject.weight * compound.vol_dist_factor,
        }
    }

    /// Concentration `t` hours after an oral dose reaching circulation with
    /// `effective_dose` mg.
    pub fn bateman(&self, effective_dose: f64, t: f64) -> f64 {
        let Self { ke, ka, vd } = *self;

        let concentration = if (ka - ke).abs() < RATE_COLLISION_TOLERANCE {
            // ka == ke limit
            effective_dose * ka * t * (-ka * t).exp() / vd
        } else {
            (effective_dose * ka / (vd * (ka - ke))) * ((-ke * t).exp() - (-ka * t).exp())
        };

        concentration.max(0.0)
    }
}

/// Plasma concentration (mg/L) contributed by a single dose at `time` hours.
///
/// Doses that have not yet been taken contribute nothing. Invalid compound
/// parameters (zero half-life, zero volume) are not checked here and surface
/// as non-finite values.
pub fn point_concentration(time: f64, dose: &Dose, compound: &Compound, subject: &SubjectProfile) -> f64 {
    let t = time - dose.timestamp;
    if t < 0.0 {
        return 0.0;
    }

    let effective_dose = dose.amount_mg * compound.bioavailability;
    RateConstants::new(compound, subject).bateman(effective_dose, t)
}
