use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use crate::models::{Compound, Metabolism};

/// Two or more active compounds share a clearance pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrowdingWarning {
    pub pathway: Metabolism,
}

impl fmt::Display for CrowdingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Metabolic crowding detected: Multiple drugs competing for {} clearance pathway.",
            self.pathway
        )
    }
}

/// Reports the pathway of the first compound whose pathway was already taken
/// by an earlier compound in the list.
pub fn metabolic_crowding(compounds: &[Compound]) -> Option<CrowdingWarning> {
    let mut seen = HashSet::new();
    compounds
        .iter()
        .map(|c| c.metabolism)
        .find(|&pathway| !seen.insert(pathway))
        .map(|pathway| CrowdingWarning { pathway })
}
