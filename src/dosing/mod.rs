use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

const DOSE_ID_LEN: usize = 9;

/// A single administration of a compound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dose {
    pub id: String,
    pub compound_id: String,
    /// Hours from simulation start
    pub timestamp: f64,
    pub amount_mg: f64,
}

impl Dose {
    /// Creates a dose with a random 9-character id.
    pub fn new(compound_id: impl Into<String>, timestamp: f64, amount_mg: f64) -> Self {
        let id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(DOSE_ID_LEN)
            .map(|c| char::from(c).to_ascii_lowercase())
            .collect();

        Self::with_id(id, compound_id, timestamp, amount_mg)
    }

    pub fn with_id(
        id: impl Into<String>,
        compound_id: impl Into<String>,
        timestamp: f64,
        amount_mg: f64,
    ) -> Self {
        Self {
            id: id.into(),
            compound_id: compound_id.into(),
            timestamp,
            amount_mg,
        }
    }
}

/// Caller-owned list of doses, kept ordered by timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoseSchedule {
    doses: Vec<Dose>,
}

impl DoseSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_doses(doses: Vec<Dose>) -> Self {
        let mut schedule = Self { doses };
        schedule.sort();
        schedule
    }

    pub fn doses(&self) -> &[Dose] {
        &self.doses
    }

    pub fn len(&self) -> usize {
        self.doses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doses.is_empty()
    }

    pub fn add(&mut self, dose: Dose) {
        self.doses.push(dose);
        self.sort();
    }

    /// Sets a new amount on the dose with `dose_id`, clamping negatives to zero.
    /// Returns `false` when no such dose exists.
    pub fn update_amount(&mut self, dose_id: &str, amount_mg: f64) -> bool {
        match self.doses.iter_mut().find(|d| d.id == dose_id) {
            Some(dose) => {
                dose.amount_mg = amount_mg.max(0.0);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, dose_id: &str) -> Option<Dose> {
        let index = self.doses.iter().position(|d| d.id == dose_id)?;
        Some(self.doses.remove(index))
    }

    /// Drops every dose of a compound, returning how many were removed.
    pub fn remove_compound(&mut self, compound_id: &str) -> usize {
        let before = self.doses.len();
        self.doses.retain(|d| d.compound_id != compound_id);
        before - self.doses.len()
    }

    pub fn events_before(&self, time: f64) -> Vec<Dose> {
        self.doses.iter()
            .filter(|dose| dose.timestamp <= time)
            .cloned()
            .collect()
    }

    fn sort(&mut self) {
        // stable, so equal timestamps keep insertion order
        self.doses.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    }
}
