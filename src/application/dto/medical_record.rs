//! Medical record DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Diagnosis, Exam, MedicalRecord, Prescription};

// ── Requests ───────────────────────────────────────────────────

/// Creates a record with every nested entry in one unit.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMedicalRecordRequest {
    pub patient_id: Uuid,
    pub consultation_date: DateTime<Utc>,
    #[serde(default)]
    #[validate(length(max = 2000, message = "notes must be at most 2000 characters"))]
    pub notes: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub diagnoses: Vec<CreateDiagnosisRequest>,
    #[serde(default)]
    #[validate(nested)]
    pub exams: Vec<CreateExamRequest>,
    #[serde(default)]
    #[validate(nested)]
    pub prescriptions: Vec<CreatePrescriptionRequest>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiagnosisRequest {
    #[validate(length(min = 1, max = 10, message = "code must be between 1 and 10 characters"))]
    pub code: String,
    #[validate(length(
        min = 1,
        max = 500,
        message = "description must be between 1 and 500 characters"
    ))]
    pub description: String,
    pub diagnosis_date: DateTime<Utc>,
    #[serde(default)]
    #[validate(length(max = 1000, message = "notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExamRequest {
    #[validate(length(min = 1, max = 100, message = "exam type must be between 1 and 100 characters"))]
    pub exam_type: String,
    #[validate(length(min = 1, max = 200, message = "name must be between 1 and 200 characters"))]
    pub name: String,
    pub performed_at: DateTime<Utc>,
    #[serde(default)]
    #[validate(length(max = 2000, message = "result must be at most 2000 characters"))]
    pub result: Option<String>,
    #[serde(default)]
    #[validate(length(max = 200, message = "lab name must be at most 200 characters"))]
    pub lab_name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50, message = "external code must be at most 50 characters"))]
    pub external_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrescriptionRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "medication must be between 1 and 200 characters"
    ))]
    pub medication: String,
    #[validate(length(min = 1, max = 100, message = "dosage must be between 1 and 100 characters"))]
    pub dosage: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "frequency must be between 1 and 100 characters"
    ))]
    pub frequency: String,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(length(max = 1000, message = "instructions must be at most 1000 characters"))]
    pub instructions: Option<String>,
}

// ── Views ──────────────────────────────────────────────────────

/// A fully hydrated medical record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecordView {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub consultation_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub diagnoses: Vec<DiagnosisView>,
    pub exams: Vec<ExamView>,
    pub prescriptions: Vec<PrescriptionView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisView {
    pub id: Uuid,
    pub code: String,
    pub description: String,
    pub diagnosis_date: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamView {
    pub id: Uuid,
    pub exam_type: String,
    pub name: String,
    pub performed_at: DateTime<Utc>,
    pub result: Option<String>,
    pub lab_name: Option<String>,
    pub external_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionView {
    pub id: Uuid,
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub instructions: Option<String>,
}

impl From<MedicalRecord> for MedicalRecordView {
    fn from(r: MedicalRecord) -> Self {
        Self {
            id: r.id,
            patient_id: r.patient_id,
            consultation_date: r.consultation_date,
            notes: r.notes,
            created_at: r.created_at,
            diagnoses: r.diagnoses.into_iter().map(Into::into).collect(),
            exams: r.exams.into_iter().map(Into::into).collect(),
            prescriptions: r.prescriptions.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Diagnosis> for DiagnosisView {
    fn from(d: Diagnosis) -> Self {
        Self {
            id: d.id,
            code: d.code,
            description: d.description,
            diagnosis_date: d.diagnosis_date,
            notes: d.notes,
        }
    }
}

impl From<Exam> for ExamView {
    fn from(e: Exam) -> Self {
        Self {
            id: e.id,
            exam_type: e.exam_type,
            name: e.name,
            performed_at: e.performed_at,
            result: e.result,
            lab_name: e.lab_name,
            external_code: e.external_code,
        }
    }
}

impl From<Prescription> for PrescriptionView {
    fn from(p: Prescription) -> Self {
        Self {
            id: p.id,
            medication: p.medication,
            dosage: p.dosage,
            frequency: p.frequency,
            start_date: p.start_date,
            end_date: p.end_date,
            instructions: p.instructions,
        }
    }
}
