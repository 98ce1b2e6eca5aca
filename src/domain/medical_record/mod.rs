//! Medical record aggregate
//!
//! Contains the MedicalRecord entity with its diagnoses, exams and
//! prescriptions, and the repository interface.

pub mod model;
pub mod repository;

pub use model::{
    Diagnosis, Exam, MedicalRecord, MedicalRecordHeader, NewDiagnosis, NewExam,
    NewMedicalRecord, NewPrescription, Prescription,
};
pub use repository::MedicalRecordRepository;
