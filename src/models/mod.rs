pub mod compound;
pub mod subject;
pub mod one_compartment;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use compound::Compound;
pub use subject::{ActivityLevel, Sex, SubjectProfile};
pub use one_compartment::{point_concentration, RateConstants};

/// Clearance pathway a compound is primarily metabolised through.
///
/// Declaration order is the canonical pathway order used for organ load
/// maps, CSV columns and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metabolism {
    Hepatic,
    Renal,
    Cardiovascular,
    Neurological,
    Gastric,
}

impl Metabolism {
    pub const ALL: [Metabolism; 5] = [
        Metabolism::Hepatic,
        Metabolism::Renal,
        Metabolism::Cardiovascular,
        Metabolism::Neurological,
        Metabolism::Gastric,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metabolism::Hepatic => "hepatic",
            Metabolism::Renal => "renal",
            Metabolism::Cardiovascular => "cardiovascular",
            Metabolism::Neurological => "neurological",
            Metabolism::Gastric => "gastric",
        }
    }
}

impl fmt::Display for Metabolism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metabolism_serializes_lowercase() {
        let json = serde_json::to_string(&Metabolism::Cardiovascular).unwrap();
        assert_eq!(json, "\"cardiovascular\"");

        let parsed: Metabolism = serde_json::from_str("\"gastric\"").unwrap();
        assert_eq!(parsed, Metabolism::Gastric);
    }

    #[test]
    fn test_unknown_pathway_rejected() {
        assert!(serde_json::from_str::<Metabolism>("\"pulmonary\"").is_err());
    }

    #[test]
    fn test_canonical_order_matches_ord() {
        let mut sorted = Metabolism::ALL;
        sorted.sort();
        assert_eq!(sorted, Metabolism::ALL);
    }
}
