//! Medical history ledger

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::{CreateMedicalRecordRequest, MedicalRecordView};
use crate::domain::{
    DomainError, DomainResult, NewDiagnosis, NewExam, NewMedicalRecord, NewPrescription,
    RepositoryProvider,
};

/// Medical records are written as one unit with all nested entries and
/// always read back fully hydrated.
pub struct MedicalHistoryLedger {
    repos: Arc<dyn RepositoryProvider>,
}

impl MedicalHistoryLedger {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(
        &self,
        request: CreateMedicalRecordRequest,
    ) -> DomainResult<MedicalRecordView> {
        request.validate()?;

        if self
            .repos
            .patients()
            .find_by_id(request.patient_id)
            .await?
            .is_none()
        {
            warn!(patient_id = %request.patient_id, "Medical record for unknown patient");
            return Err(DomainError::UnknownPatient(request.patient_id));
        }

        let record = Self::build(request)?;
        let patient_id = record.patient_id;
        let header = self.repos.medical_records().add(record).await?;

        // Read back what was actually stored
        let stored = self
            .repos
            .medical_records()
            .find_with_children(header.id)
            .await?
            .ok_or_else(|| {
                DomainError::Storage(format!(
                    "medical record {} was stored but could not be retrieved",
                    header.id
                ))
            })?;

        info!(
            record_id = %stored.id,
            patient_id = %patient_id,
            diagnoses = stored.diagnoses.len(),
            exams = stored.exams.len(),
            prescriptions = stored.prescriptions.len(),
            "Medical record created"
        );
        Ok(stored.into())
    }

    fn build(request: CreateMedicalRecordRequest) -> DomainResult<NewMedicalRecord> {
        let mut record = NewMedicalRecord::new(
            request.patient_id,
            request.consultation_date,
            request.notes.as_deref(),
        );
        for d in &request.diagnoses {
            record = record.with_diagnosis(NewDiagnosis::new(
                &d.code,
                &d.description,
                d.diagnosis_date,
                d.notes.as_deref(),
            )?);
        }
        for e in &request.exams {
            record = record.with_exam(NewExam::new(
                &e.exam_type,
                &e.name,
                e.performed_at,
                e.result.as_deref(),
                e.lab_name.as_deref(),
                e.external_code.as_deref(),
            )?);
        }
        for p in &request.prescriptions {
            record = record.with_prescription(NewPrescription::new(
                &p.medication,
                &p.dosage,
                &p.frequency,
                p.start_date,
                p.end_date,
                p.instructions.as_deref(),
            )?);
        }
        Ok(record)
    }

    pub async fn get_by_id(&self, id: Uuid) -> DomainResult<Option<MedicalRecordView>> {
        Ok(self
            .repos
            .medical_records()
            .find_with_children(id)
            .await?
            .map(Into::into))
    }

    /// Most recent consultation first.
    pub async fn get_by_patient(&self, patient_id: Uuid) -> DomainResult<Vec<MedicalRecordView>> {
        let records = self.repos.medical_records().find_by_patient(patient_id).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        if self.repos.medical_records().find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        match self.repos.medical_records().delete(id).await {
            Ok(()) => {
                info!(record_id = %id, "Medical record deleted");
                Ok(true)
            }
            Err(DomainError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
