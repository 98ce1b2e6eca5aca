//! Patient domain entity

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::cpf::Cpf;
use crate::domain::medical_record::MedicalRecord;
use crate::shared::{optional_text, required_text, DomainResult};

/// Stored patient identity record
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    /// Formatted (`ddd.ddd.ddd-dd`), immutable after creation
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub contact: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    /// Set by storage on every update, `None` until the first one
    pub updated_at: Option<DateTime<Utc>>,
}

impl Patient {
    /// Digits-only CPF used for comparisons.
    pub fn cpf_digits(&self) -> String {
        self.cpf.chars().filter(char::is_ascii_digit).collect()
    }

    /// Overwrite the mutable fields. The CPF is not part of `changes`.
    pub fn apply(&mut self, changes: PatientChanges) {
        self.name = changes.name;
        self.birth_date = changes.birth_date;
        self.contact = changes.contact;
        self.email = changes.email;
        self.address = changes.address;
        self.active = changes.active;
    }
}

/// A validated patient that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewPatient {
    pub name: String,
    pub cpf: Cpf,
    pub birth_date: NaiveDate,
    pub contact: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl NewPatient {
    /// Trim text fields and validate the CPF checksum.
    pub fn new(
        name: &str,
        cpf: &str,
        birth_date: NaiveDate,
        contact: &str,
        email: Option<&str>,
        address: Option<&str>,
    ) -> DomainResult<Self> {
        Ok(Self {
            name: required_text("name", name)?,
            cpf: Cpf::parse(cpf)?,
            birth_date,
            contact: required_text("contact", contact)?,
            email: optional_text(email),
            address: optional_text(address),
        })
    }
}

/// Validated replacement values for a patient's mutable fields
#[derive(Debug, Clone, PartialEq)]
pub struct PatientChanges {
    pub name: String,
    pub birth_date: NaiveDate,
    pub contact: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub active: bool,
}

impl PatientChanges {
    pub fn new(
        name: &str,
        birth_date: NaiveDate,
        contact: &str,
        email: Option<&str>,
        address: Option<&str>,
        active: bool,
    ) -> DomainResult<Self> {
        Ok(Self {
            name: required_text("name", name)?,
            birth_date,
            contact: required_text("contact", contact)?,
            email: optional_text(email),
            address: optional_text(address),
            active,
        })
    }
}

/// A patient together with every medical record it owns, fully hydrated
#[derive(Debug, Clone, PartialEq)]
pub struct PatientWithHistory {
    pub patient: Patient,
    /// Most recent consultation first
    pub medical_records: Vec<MedicalRecord>,
}
