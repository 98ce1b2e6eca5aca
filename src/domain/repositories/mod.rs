//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives unified access to the per-aggregate
//! repositories. Services request only the repository they need:
//!
//! ```ignore
//! async fn handle(repos: &dyn RepositoryProvider) {
//!     let patient = repos.patients().find_by_id(id).await?;
//!     let history = repos.medical_records().find_by_patient(id).await?;
//! }
//! ```

use super::medical_record::MedicalRecordRepository;
use super::patient::PatientRepository;

pub trait RepositoryProvider: Send + Sync {
    fn patients(&self) -> &dyn PatientRepository;
    fn medical_records(&self) -> &dyn MedicalRecordRepository;
}
