//! One-compartment plasma concentration simulation with organ load estimates
//! and clinical phase annotation.
//!
//! The engine ([`simulate`], [`point_concentration`], [`classify`]) is pure:
//! it reads the doses, compounds and subject it is given and returns fresh
//! results, so independent runs can be evaluated side by side.

pub mod catalog;
pub mod clinical;
pub mod config;
pub mod dosing;
pub mod error;
pub mod models;
pub mod output;
pub mod simulation;

pub use clinical::{classify, status_at, ClinicalStatus, Phase, Severity};
pub use dosing::{Dose, DoseSchedule};
pub use error::{PKError, PKResult};
pub use models::{point_concentration, ActivityLevel, Compound, Metabolism, Sex, SubjectProfile};
pub use simulation::{simulate, OrganLoads, SimulationResult, TimeGrid};
