//! Medical history module
//!
//! `MedicalHistoryLedger` creates, reads and deletes medical records
//! together with their diagnoses, exams and prescriptions.

pub mod service;

pub use service::MedicalHistoryLedger;
