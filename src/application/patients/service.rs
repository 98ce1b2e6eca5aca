//! Patient directory: application-layer orchestration
//!
//! Owns the patient use-cases: registration with CPF validation and
//! uniqueness, profile updates, paginated search and removal. Request
//! handlers should be thin wrappers that delegate here.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use super::queries::PatientSearchQuery;
use crate::application::dto::{
    CreatePatientRequest, PatientRecord, PatientSearchResult, PatientWithHistoryView,
    UpdatePatientRequest,
};
use crate::config::PaginationConfig;
use crate::domain::{DomainError, DomainResult, NewPatient, PatientChanges, RepositoryProvider};
use crate::shared::logging::mask_cpf;
use crate::shared::{validate_pagination, PaginatedResult};

pub struct PatientDirectory {
    repos: Arc<dyn RepositoryProvider>,
    pagination: PaginationConfig,
}

impl PatientDirectory {
    pub fn new(repos: Arc<dyn RepositoryProvider>, pagination: PaginationConfig) -> Self {
        Self { repos, pagination }
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new patient. The CPF must carry valid check digits and
    /// must not already be on file, whatever punctuation it was sent with.
    pub async fn create(&self, request: CreatePatientRequest) -> DomainResult<PatientRecord> {
        request.validate()?;

        let new = NewPatient::new(
            &request.name,
            &request.cpf,
            request.birth_date,
            &request.contact,
            request.email.as_deref(),
            request.address.as_deref(),
        )
        .inspect_err(|e| warn!(error = %e, "Patient registration rejected"))?;

        if self
            .repos
            .patients()
            .find_by_cpf(new.cpf.digits())
            .await?
            .is_some()
        {
            let cpf = new.cpf.formatted().to_string();
            warn!(cpf = %mask_cpf(&cpf), "Duplicate CPF on registration");
            return Err(DomainError::DuplicateIdentifier(cpf));
        }

        let patient = self.repos.patients().add(new).await?;

        info!(
            patient_id = %patient.id,
            cpf = %mask_cpf(&patient.cpf),
            "Patient registered"
        );
        Ok(patient.into())
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_by_id(&self, id: Uuid) -> DomainResult<Option<PatientRecord>> {
        Ok(self.repos.patients().find_by_id(id).await?.map(Into::into))
    }

    /// Patient plus every medical record, most recent consultation first.
    pub async fn get_with_history(&self, id: Uuid) -> DomainResult<PatientWithHistoryView> {
        self.repos
            .patients()
            .find_with_history(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| DomainError::not_found("Patient", id))
    }

    /// Substring search on name (case-insensitive) and CPF digits, ordered
    /// by name. Paging is clamped rather than rejected.
    pub async fn search(&self, query: PatientSearchQuery) -> DomainResult<PatientSearchResult> {
        let page = validate_pagination(query.page, query.page_size, &self.pagination);
        let filter = query.filter();

        let repo = self.repos.patients();
        let items = repo.search(&filter, page).await?;
        let total_count = repo.count(&filter).await?;

        debug!(
            name_filter = ?filter.name(),
            cpf_filter = filter.cpf_digits().is_some(),
            page = page.page,
            page_size = page.page_size,
            total_count,
            "Patient search"
        );
        Ok(PaginatedResult::new(items, total_count, page).map(Into::into))
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Overwrite the mutable fields. The CPF is not part of the request
    /// and never changes.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdatePatientRequest,
    ) -> DomainResult<PatientRecord> {
        request.validate()?;

        let changes = PatientChanges::new(
            &request.name,
            request.birth_date,
            &request.contact,
            request.email.as_deref(),
            request.address.as_deref(),
            request.active,
        )?;

        let mut patient = self
            .repos
            .patients()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Patient", id))?;

        patient.apply(changes);
        let patient = self.repos.patients().update(patient).await?;

        info!(patient_id = %patient.id, active = patient.active, "Patient updated");
        Ok(patient.into())
    }

    /// Remove a patient and, with it, every medical record it owns.
    /// Returns `false` when there was nothing to remove.
    pub async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        if self.repos.patients().find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        match self.repos.patients().delete(id).await {
            Ok(()) => {
                info!(patient_id = %id, "Patient deleted");
                Ok(true)
            }
            // Removed concurrently between the lookup and the delete
            Err(DomainError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
