//! Patient repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::filter::PatientFilter;
use super::model::{NewPatient, Patient, PatientWithHistory};
use crate::shared::{DomainResult, PageRequest};

#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Patient>>;
    /// Assigns id and creation timestamp. Must reject a CPF already on
    /// file with `DomainError::DuplicateIdentifier`.
    async fn add(&self, patient: NewPatient) -> DomainResult<Patient>;
    /// Stamps `updated_at`.
    async fn update(&self, patient: Patient) -> DomainResult<Patient>;
    /// Removes the patient and every medical record it owns.
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
    async fn find_by_cpf(&self, digits: &str) -> DomainResult<Option<Patient>>;
    /// Ordered by name ascending.
    async fn search(&self, filter: &PatientFilter, page: PageRequest) -> DomainResult<Vec<Patient>>;
    async fn count(&self, filter: &PatientFilter) -> DomainResult<u64>;
    async fn find_with_history(&self, id: Uuid) -> DomainResult<Option<PatientWithHistory>>;
}
