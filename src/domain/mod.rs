pub mod cpf;
pub mod medical_record;
pub mod patient;
pub mod repositories;

// Re-export commonly used types
pub use cpf::Cpf;
pub use medical_record::{
    Diagnosis, Exam, MedicalRecord, MedicalRecordHeader, MedicalRecordRepository, NewDiagnosis,
    NewExam, NewMedicalRecord, NewPrescription, Prescription,
};
pub use patient::{
    NewPatient, Patient, PatientChanges, PatientFilter, PatientRepository, PatientWithHistory,
};
pub use repositories::RepositoryProvider;

// Re-export error types from shared for convenience
pub use crate::shared::{DomainError, DomainResult};
