//! Patient aggregate
//!
//! Contains the Patient entity, its search filter, and repository interface.

pub mod filter;
pub mod model;
pub mod repository;

pub use filter::PatientFilter;
pub use model::{NewPatient, Patient, PatientChanges, PatientWithHistory};
pub use repository::PatientRepository;
