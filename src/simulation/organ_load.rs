use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::models::{Compound, Metabolism};

/// Percentage load per clearance pathway, always holding all five pathways.
///
/// Backed by a `BTreeMap` so iteration follows [`Metabolism::ALL`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganLoads(BTreeMap<Metabolism, f64>);

impl Default for OrganLoads {
    fn default() -> Self {
        Self(Metabolism::ALL.iter().map(|&m| (m, 0.0)).collect())
    }
}

impl OrganLoads {
    pub fn get(&self, pathway: Metabolism) -> f64 {
        self.0.get(&pathway).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metabolism, f64)> + '_ {
        self.0.iter().map(|(&m, &load)| (m, load))
    }

    fn set(&mut self, pathway: Metabolism, load: f64) {
        self.0.insert(pathway, load);
    }

    /// Raises a pathway's load, never lowering what is already there.
    pub(crate) fn raise(&mut self, pathway: Metabolism, load: f64) {
        let current = self.get(pathway);
        self.set(pathway, current.max(load));
    }

    /// Stylised stress estimate driven by the dominant compound.
    ///
    /// `intensity` is total concentration over the dominant compound's
    /// toxicity threshold. The dominant pathway saturates at 100. The renal
    /// and hepatic secondary loads are capped lower and only ever raise a
    /// pathway; the cardiovascular load is assigned outright.
    pub fn from_exposure(total_concentration: f64, dominant: Option<&Compound>) -> Self {
        let mut loads = Self::default();
        let Some(compound) = dominant else {
            return loads;
        };

        let intensity = total_concentration / compound.toxicity_threshold_mg_l;

        loads.set(compound.metabolism, (intensity * 100.0).min(100.0));
        loads.raise(Metabolism::Renal, (intensity * 40.0).min(60.0));
        loads.raise(Metabolism::Hepatic, (intensity * 50.0).min(70.0));

        let cardiovascular = if compound.metabolism == Metabolism::Neurological {
            (intensity * 30.0).min(50.0)
        } else {
            (intensity * 15.0).min(30.0)
        };
        loads.set(Metabolism::Cardiovascular, cardiovascular);

        loads
    }
}
