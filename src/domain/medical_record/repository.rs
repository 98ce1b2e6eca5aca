//! Medical record repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{MedicalRecord, MedicalRecordHeader, NewMedicalRecord};
use crate::shared::DomainResult;

#[async_trait]
pub trait MedicalRecordRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<MedicalRecordHeader>>;
    /// Stores the record and all nested entries as one unit. Fails with
    /// `DomainError::UnknownPatient` when the owner does not exist.
    async fn add(&self, record: NewMedicalRecord) -> DomainResult<MedicalRecordHeader>;
    /// Removes the record and its nested entries.
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
    /// Hydrated, most recent consultation first.
    async fn find_by_patient(&self, patient_id: Uuid) -> DomainResult<Vec<MedicalRecord>>;
    async fn find_with_children(&self, id: Uuid) -> DomainResult<Option<MedicalRecord>>;
}
