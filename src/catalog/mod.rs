//! Built-in compound library.
//!
//! The simulation engine never reads this module; callers resolve ids into
//! [`Compound`] values and pass them in.

use std::sync::OnceLock;
use crate::models::{Compound, Metabolism};

struct Entry {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    description: &'static str,
    half_life_hours: f64,
    bioavailability: f64,
    time_to_peak_hours: f64,
    vol_dist_factor: f64,
    toxicity_threshold_mg_l: f64,
    metabolism: Metabolism,
    color: &'static str,
    default_dose_mg: f64,
}

const ENTRIES: [Entry; 11] = [
    Entry {
        id: "caffeine",
        name: "Caffeine",
        category: "Stimulant",
        description: "CNS stimulant. Blocks adenosine receptors.",
        half_life_hours: 5.0,
        bioavailability: 0.99,
        time_to_peak_hours: 0.75,
        vol_dist_factor: 0.7,
        toxicity_threshold_mg_l: 60.0,
        metabolism: Metabolism::Neurological,
        color: "#d97706",
        default_dose_mg: 100.0,
    },
    Entry {
        id: "methylphenidate",
        name: "Methylphenidate",
        category: "Stimulant",
        description: "CNS stimulant used for ADHD.",
        half_life_hours: 3.5,
        bioavailability: 0.3,
        time_to_peak_hours: 2.0,
        vol_dist_factor: 2.7,
        // upper therapeutic bound rather than a toxic level
        toxicity_threshold_mg_l: 0.04,
        metabolism: Metabolism::Hepatic,
        color: "#f97316",
        default_dose_mg: 20.0,
    },
    Entry {
        id: "ibuprofen",
        name: "Ibuprofen",
        category: "Analgesic",
        description: "NSAID used for pain and inflammation.",
        half_life_hours: 2.0,
        bioavailability: 0.85,
        time_to_peak_hours: 1.5,
        vol_dist_factor: 0.15,
        toxicity_threshold_mg_l: 80.0,
        metabolism: Metabolism::Gastric,
        color: "#ef4444",
        default_dose_mg: 400.0,
    },
    Entry {
        id: "paracetamol",
        name: "Acetaminophen",
        category: "Analgesic",
        description: "Analgesic and antipyretic.",
        half_life_hours: 2.5,
        bioavailability: 0.88,
        time_to_peak_hours: 1.0,
        vol_dist_factor: 0.95,
        toxicity_threshold_mg_l: 150.0,
        metabolism: Metabolism::Hepatic,
        color: "#3b82f6",
        default_dose_mg: 500.0,
    },
    Entry {
        id: "aspirin",
        name: "Aspirin",
        category: "Analgesic",
        description: "Salicylate used to reduce pain, fever, or inflammation.",
        // parent compound only
        half_life_hours: 0.25,
        bioavailability: 0.68,
        time_to_peak_hours: 0.5,
        vol_dist_factor: 0.17,
        toxicity_threshold_mg_l: 300.0,
        metabolism: Metabolism::Renal,
        color: "#ec4899",
        default_dose_mg: 325.0,
    },
    Entry {
        id: "sertraline",
        name: "Sertraline",
        category: "Psychotropic",
        description: "SSRI antidepressant.",
        half_life_hours: 26.0,
        bioavailability: 0.44,
        time_to_peak_hours: 6.0,
        vol_dist_factor: 25.0,
        toxicity_threshold_mg_l: 0.5,
        metabolism: Metabolism::Hepatic,
        color: "#10b981",
        default_dose_mg: 50.0,
    },
    Entry {
        id: "alprazolam",
        name: "Alprazolam",
        category: "Psychotropic",
        description: "Benzodiazepine for anxiety disorders.",
        half_life_hours: 11.2,
        bioavailability: 0.90,
        time_to_peak_hours: 1.5,
        vol_dist_factor: 1.0,
        toxicity_threshold_mg_l: 0.1,
        metabolism: Metabolism::Hepatic,
        color: "#14b8a6",
        default_dose_mg: 1.0,
    },
    Entry {
        id: "atorvastatin",
        name: "Atorvastatin",
        category: "Cardiovascular",
        description: "Statin medication for high cholesterol.",
        half_life_hours: 14.0,
        bioavailability: 0.14,
        time_to_peak_hours: 1.5,
        vol_dist_factor: 5.5,
        toxicity_threshold_mg_l: 0.05,
        metabolism: Metabolism::Hepatic,
        color: "#f59e0b",
        default_dose_mg: 20.0,
    },
    Entry {
        id: "metoprolol",
        name: "Metoprolol",
        category: "Cardiovascular",
        description: "Beta-blocker for high blood pressure.",
        half_life_hours: 3.5,
        bioavailability: 0.50,
        // tartrate
        time_to_peak_hours: 1.5,
        vol_dist_factor: 4.2,
        toxicity_threshold_mg_l: 0.5,
        metabolism: Metabolism::Cardiovascular,
        color: "#6366f1",
        default_dose_mg: 50.0,
    },
    Entry {
        id: "amoxicillin",
        name: "Amoxicillin",
        category: "Antibiotic",
        description: "Penicillin antibiotic.",
        half_life_hours: 1.0,
        bioavailability: 0.95,
        time_to_peak_hours: 2.0,
        vol_dist_factor: 0.3,
        toxicity_threshold_mg_l: 20.0,
        metabolism: Metabolism::Renal,
        color: "#8b5cf6",
        default_dose_mg: 500.0,
    },
    Entry {
        id: "melatonin",
        name: "Melatonin",
        category: "Supplement",
        description: "Hormone regulating sleep-wake cycles.",
        half_life_hours: 0.8,
        bioavailability: 0.15,
        time_to_peak_hours: 0.5,
        vol_dist_factor: 1.2,
        toxicity_threshold_mg_l: 500.0,
        metabolism: Metabolism::Neurological,
        color: "#8b5cf6",
        default_dose_mg: 3.0,
    },
];

impl Entry {
    fn to_compound(&self) -> Compound {
        Compound {
            id: self.id.to_string(),
            name: self.name.to_string(),
            category: self.category.to_string(),
            description: self.description.to_string(),
            half_life_hours: self.half_life_hours,
            bioavailability: self.bioavailability,
            time_to_peak_hours: self.time_to_peak_hours,
            vol_dist_factor: self.vol_dist_factor,
            toxicity_threshold_mg_l: self.toxicity_threshold_mg_l,
            metabolism: self.metabolism,
            color: self.color.to_string(),
            default_dose_mg: self.default_dose_mg,
        }
    }
}

/// All library compounds in catalog order.
pub fn library() -> &'static [Compound] {
    static LIBRARY: OnceLock<Vec<Compound>> = OnceLock::new();
    LIBRARY.get_or_init(|| ENTRIES.iter().map(Entry::to_compound).collect())
}

pub fn find(id: &str) -> Option<&'static Compound> {
    library().iter().find(|c| c.id == id)
}

/// Case-insensitive match on name or category. An empty query matches everything.
pub fn search(query: &str) -> Vec<&'static Compound> {
    let query = query.trim().to_lowercase();
    library()
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&query) || c.category.to_lowercase().contains(&query))
        .collect()
}
