//! Patient DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidateEmail, ValidationError};

use super::medical_record::MedicalRecordView;
use crate::domain::{Patient, PatientWithHistory};
use crate::shared::PaginatedResult;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientRequest {
    #[validate(length(min = 1, max = 200, message = "name must be between 1 and 200 characters"))]
    pub name: String,
    pub cpf: String,
    pub birth_date: NaiveDate,
    #[validate(length(min = 1, max = 20, message = "contact must be between 1 and 20 characters"))]
    pub contact: String,
    #[serde(default)]
    #[validate(
        length(max = 255, message = "email must be at most 255 characters"),
        custom(function = "trimmed_email")
    )]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500, message = "address must be at most 500 characters"))]
    pub address: Option<String>,
}

/// Replaces every mutable field. The CPF cannot be changed.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatientRequest {
    #[validate(length(min = 1, max = 200, message = "name must be between 1 and 200 characters"))]
    pub name: String,
    pub birth_date: NaiveDate,
    #[validate(length(min = 1, max = 20, message = "contact must be between 1 and 20 characters"))]
    pub contact: String,
    #[serde(default)]
    #[validate(
        length(max = 255, message = "email must be at most 255 characters"),
        custom(function = "trimmed_email")
    )]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500, message = "address must be at most 500 characters"))]
    pub address: Option<String>,
    pub active: bool,
}

/// Blank e-mails are treated as absent later on, so only check non-blank ones.
fn trimmed_email(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.to_string().validate_email() {
        Ok(())
    } else {
        let mut err = ValidationError::new("email");
        err.message = Some("invalid email format".into());
        Err(err)
    }
}

/// Patient API representation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub id: Uuid,
    pub name: String,
    /// Formatted, `ddd.ddd.ddd-dd`
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub contact: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Patient> for PatientRecord {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            name: p.name,
            cpf: p.cpf,
            birth_date: p.birth_date,
            contact: p.contact,
            email: p.email,
            address: p.address,
            active: p.active,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// A patient with the full medical history
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientWithHistoryView {
    #[serde(flatten)]
    pub patient: PatientRecord,
    pub medical_history: Vec<MedicalRecordView>,
}

impl From<PatientWithHistory> for PatientWithHistoryView {
    fn from(p: PatientWithHistory) -> Self {
        Self {
            patient: p.patient.into(),
            medical_history: p.medical_records.into_iter().map(Into::into).collect(),
        }
    }
}

pub type PatientSearchResult = PaginatedResult<PatientRecord>;
