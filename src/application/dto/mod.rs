//! Request and response shapes exchanged with the request layer

pub mod medical_record;
pub mod patient;

pub use medical_record::{
    CreateDiagnosisRequest, CreateExamRequest, CreateMedicalRecordRequest,
    CreatePrescriptionRequest, DiagnosisView, ExamView, MedicalRecordView, PrescriptionView,
};
pub use patient::{
    CreatePatientRequest, PatientRecord, PatientSearchResult, PatientWithHistoryView,
    UpdatePatientRequest,
};
