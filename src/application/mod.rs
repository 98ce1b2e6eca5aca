pub mod dto;
pub mod medical_history;
pub mod patients;

// Re-export key types for convenience
pub use medical_history::MedicalHistoryLedger;
pub use patients::{PatientDirectory, PatientSearchQuery};
