//! In-memory storage implementation
//!
//! One DashMap per entity kind. Children point at their record through
//! `medical_record_id` and carry an insertion sequence so hydrated
//! collections come back in the order they were written.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{
    Diagnosis, DomainError, DomainResult, Exam, MedicalRecord, MedicalRecordHeader,
    MedicalRecordRepository, NewMedicalRecord, NewPatient, Patient, PatientFilter,
    PatientRepository, PatientWithHistory, Prescription, RepositoryProvider,
};
use crate::shared::PageRequest;

#[derive(Debug, Clone)]
struct Sequenced<T> {
    seq: u64,
    item: T,
}

/// Row counts, mostly useful in tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageStats {
    pub patients: usize,
    pub medical_records: usize,
    pub diagnoses: usize,
    pub exams: usize,
    pub prescriptions: usize,
}

#[derive(Default)]
struct Tables {
    patients: DashMap<Uuid, Patient>,
    /// Normalized CPF -> patient id. The uniqueness constraint.
    cpf_index: DashMap<String, Uuid>,
    records: DashMap<Uuid, Sequenced<MedicalRecordHeader>>,
    diagnoses: DashMap<Uuid, Sequenced<Diagnosis>>,
    exams: DashMap<Uuid, Sequenced<Exam>>,
    prescriptions: DashMap<Uuid, Sequenced<Prescription>>,
    sequence: AtomicU64,
}

impl Tables {
    fn next_seq(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst)
    }

    fn children<T: Clone>(
        table: &DashMap<Uuid, Sequenced<T>>,
        record_id: Uuid,
        owner: impl Fn(&T) -> Uuid,
    ) -> Vec<T> {
        let mut rows: Vec<Sequenced<T>> = table
            .iter()
            .filter(|row| owner(&row.item) == record_id)
            .map(|row| row.value().clone())
            .collect();
        rows.sort_by_key(|row| row.seq);
        rows.into_iter().map(|row| row.item).collect()
    }

    fn hydrate(&self, header: MedicalRecordHeader) -> MedicalRecord {
        let id = header.id;
        MedicalRecord::hydrate(
            header,
            Self::children(&self.diagnoses, id, |d| d.medical_record_id),
            Self::children(&self.exams, id, |e| e.medical_record_id),
            Self::children(&self.prescriptions, id, |p| p.medical_record_id),
        )
    }

    fn records_for_patient(&self, patient_id: Uuid) -> Vec<MedicalRecord> {
        let mut headers: Vec<Sequenced<MedicalRecordHeader>> = self
            .records
            .iter()
            .filter(|row| row.item.patient_id == patient_id)
            .map(|row| row.value().clone())
            .collect();
        headers.sort_by(|a, b| {
            b.item
                .consultation_date
                .cmp(&a.item.consultation_date)
                .then(b.seq.cmp(&a.seq))
        });
        headers
            .into_iter()
            .map(|row| self.hydrate(row.item))
            .collect()
    }

    fn remove_records(&self, ids: &[Uuid]) {
        self.diagnoses
            .retain(|_, row| !ids.contains(&row.item.medical_record_id));
        self.exams
            .retain(|_, row| !ids.contains(&row.item.medical_record_id));
        self.prescriptions
            .retain(|_, row| !ids.contains(&row.item.medical_record_id));
        for id in ids {
            self.records.remove(id);
        }
    }
}

// ── Patients ────────────────────────────────────────────────────

pub struct InMemoryPatientRepository {
    tables: Arc<Tables>,
}

#[async_trait]
impl PatientRepository for InMemoryPatientRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Patient>> {
        Ok(self.tables.patients.get(&id).map(|p| p.clone()))
    }

    async fn add(&self, new: NewPatient) -> DomainResult<Patient> {
        let patient = Patient {
            id: Uuid::new_v4(),
            name: new.name,
            cpf: new.cpf.formatted().to_string(),
            birth_date: new.birth_date,
            contact: new.contact,
            email: new.email,
            address: new.address,
            active: true,
            created_at: Utc::now(),
            updated_at: None,
        };

        match self.tables.cpf_index.entry(new.cpf.digits().to_string()) {
            Entry::Occupied(_) => Err(DomainError::DuplicateIdentifier(patient.cpf)),
            Entry::Vacant(slot) => {
                self.tables.patients.insert(patient.id, patient.clone());
                slot.insert(patient.id);
                Ok(patient)
            }
        }
    }

    async fn update(&self, patient: Patient) -> DomainResult<Patient> {
        let mut stored = self
            .tables
            .patients
            .get_mut(&patient.id)
            .ok_or_else(|| DomainError::not_found("Patient", patient.id))?;

        // Identity and creation time are owned by storage
        let cpf = std::mem::take(&mut stored.cpf);
        let created_at = stored.created_at;
        *stored = Patient {
            cpf,
            created_at,
            updated_at: Some(Utc::now()),
            ..patient
        };
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let (_, patient) = self
            .tables
            .patients
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Patient", id))?;
        self.tables.cpf_index.remove(&patient.cpf_digits());

        let owned: Vec<Uuid> = self
            .tables
            .records
            .iter()
            .filter(|row| row.item.patient_id == id)
            .map(|row| *row.key())
            .collect();
        self.tables.remove_records(&owned);
        Ok(())
    }

    async fn find_by_cpf(&self, digits: &str) -> DomainResult<Option<Patient>> {
        let Some(id) = self.tables.cpf_index.get(digits).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.tables.patients.get(&id).map(|p| p.clone()))
    }

    async fn search(&self, filter: &PatientFilter, page: PageRequest) -> DomainResult<Vec<Patient>> {
        let mut matches: Vec<Patient> = self
            .tables
            .patients
            .iter()
            .filter(|p| filter.matches(p.value()))
            .map(|p| p.value().clone())
            .collect();
        matches.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        Ok(matches
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.page_size).unwrap_or(usize::MAX))
            .collect())
    }

    async fn count(&self, filter: &PatientFilter) -> DomainResult<u64> {
        Ok(self
            .tables
            .patients
            .iter()
            .filter(|p| filter.matches(p.value()))
            .count() as u64)
    }

    async fn find_with_history(&self, id: Uuid) -> DomainResult<Option<PatientWithHistory>> {
        let Some(patient) = self.tables.patients.get(&id).map(|p| p.clone()) else {
            return Ok(None);
        };
        Ok(Some(PatientWithHistory {
            medical_records: self.tables.records_for_patient(id),
            patient,
        }))
    }
}

// ── Medical records ─────────────────────────────────────────────

pub struct InMemoryMedicalRecordRepository {
    tables: Arc<Tables>,
}

#[async_trait]
impl MedicalRecordRepository for InMemoryMedicalRecordRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<MedicalRecordHeader>> {
        Ok(self.tables.records.get(&id).map(|row| row.item.clone()))
    }

    async fn add(&self, record: NewMedicalRecord) -> DomainResult<MedicalRecordHeader> {
        // Holding the owner's entry keeps a concurrent patient delete out
        // until every row below is in place, so its cascade sees them.
        let Some(_owner) = self.tables.patients.get(&record.patient_id) else {
            return Err(DomainError::UnknownPatient(record.patient_id));
        };

        let header = MedicalRecordHeader {
            id: Uuid::new_v4(),
            patient_id: record.patient_id,
            consultation_date: record.consultation_date,
            notes: record.notes,
            created_at: Utc::now(),
        };
        let tables = &self.tables;

        // Children first: nothing is reachable until the header lands
        for diagnosis in record.diagnoses {
            let row = diagnosis.into_stored(Uuid::new_v4(), header.id);
            tables.diagnoses.insert(row.id, Sequenced { seq: tables.next_seq(), item: row });
        }
        for exam in record.exams {
            let row = exam.into_stored(Uuid::new_v4(), header.id);
            tables.exams.insert(row.id, Sequenced { seq: tables.next_seq(), item: row });
        }
        for prescription in record.prescriptions {
            let row = prescription.into_stored(Uuid::new_v4(), header.id);
            tables
                .prescriptions
                .insert(row.id, Sequenced { seq: tables.next_seq(), item: row });
        }
        tables.records.insert(
            header.id,
            Sequenced {
                seq: tables.next_seq(),
                item: header.clone(),
            },
        );
        Ok(header)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if !self.tables.records.contains_key(&id) {
            return Err(DomainError::not_found("MedicalRecord", id));
        }
        self.tables.remove_records(&[id]);
        Ok(())
    }

    async fn find_by_patient(&self, patient_id: Uuid) -> DomainResult<Vec<MedicalRecord>> {
        Ok(self.tables.records_for_patient(patient_id))
    }

    async fn find_with_children(&self, id: Uuid) -> DomainResult<Option<MedicalRecord>> {
        let header = self.tables.records.get(&id).map(|row| row.item.clone());
        Ok(header.map(|h| self.tables.hydrate(h)))
    }
}

// ── Provider ────────────────────────────────────────────────────

/// In-memory storage for development and testing
pub struct InMemoryStorage {
    tables: Arc<Tables>,
    patients: InMemoryPatientRepository,
    medical_records: InMemoryMedicalRecordRepository,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        let tables = Arc::new(Tables::default());
        Self {
            patients: InMemoryPatientRepository {
                tables: tables.clone(),
            },
            medical_records: InMemoryMedicalRecordRepository {
                tables: tables.clone(),
            },
            tables,
        }
    }

    pub fn stats(&self) -> StorageStats {
        StorageStats {
            patients: self.tables.patients.len(),
            medical_records: self.tables.records.len(),
            diagnoses: self.tables.diagnoses.len(),
            exams: self.tables.exams.len(),
            prescriptions: self.tables.prescriptions.len(),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryStorage {
    fn patients(&self) -> &dyn PatientRepository {
        &self.patients
    }

    fn medical_records(&self) -> &dyn MedicalRecordRepository {
        &self.medical_records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewDiagnosis, NewExam, NewPrescription};
    use chrono::{DateTime, NaiveDate, TimeZone};

    fn new_patient(name: &str, cpf: &str) -> NewPatient {
        NewPatient::new(
            name,
            cpf,
            NaiveDate::from_ymd_opt(1985, 10, 20).unwrap(),
            "(11) 98888-8888",
            None,
            None,
        )
        .unwrap()
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 10, 0, 0).unwrap()
    }

    fn record_for(patient_id: Uuid, d: u32) -> NewMedicalRecord {
        NewMedicalRecord::new(patient_id, day(d), None)
            .with_diagnosis(NewDiagnosis::new("J11", "influenza", day(d), None).unwrap())
            .with_diagnosis(NewDiagnosis::new("R50", "fever", day(d), None).unwrap())
            .with_exam(NewExam::new("blood", "CBC", day(d), None, None, None).unwrap())
            .with_prescription(
                NewPrescription::new("Oseltamivir", "75mg", "12/12h", day(d), None, None).unwrap(),
            )
    }

    #[tokio::test]
    async fn add_assigns_identity_and_formats_cpf() {
        let storage = InMemoryStorage::new();
        let patient = storage
            .patients()
            .add(new_patient("Ana", "52998224725"))
            .await
            .unwrap();
        assert_eq!(patient.cpf, "529.982.247-25");
        assert!(patient.active);
        assert!(patient.updated_at.is_none());

        let found = storage.patients().find_by_cpf("52998224725").await.unwrap();
        assert_eq!(found.map(|p| p.id), Some(patient.id));
    }

    #[tokio::test]
    async fn cpf_index_rejects_second_insert() {
        let storage = InMemoryStorage::new();
        storage
            .patients()
            .add(new_patient("Ana", "529.982.247-25"))
            .await
            .unwrap();
        let err = storage
            .patients()
            .add(new_patient("Bia", "52998224725"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateIdentifier(_)));
        assert_eq!(storage.stats().patients, 1);
    }

    #[tokio::test]
    async fn update_stamps_time_and_keeps_cpf() {
        let storage = InMemoryStorage::new();
        let mut patient = storage
            .patients()
            .add(new_patient("Ana", "529.982.247-25"))
            .await
            .unwrap();
        patient.name = "Ana Clara".into();
        patient.cpf = "123.456.789-09".into();

        let updated = storage.patients().update(patient.clone()).await.unwrap();
        assert_eq!(updated.name, "Ana Clara");
        assert_eq!(updated.cpf, "529.982.247-25");
        assert_eq!(updated.created_at, patient.created_at);
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn update_missing_patient_is_not_found() {
        let storage = InMemoryStorage::new();
        let ghost = Patient {
            id: Uuid::new_v4(),
            name: "Ghost".into(),
            cpf: "529.982.247-25".into(),
            birth_date: NaiveDate::from_ymd_opt(1985, 10, 20).unwrap(),
            contact: "0".into(),
            email: None,
            address: None,
            active: true,
            created_at: Utc::now(),
            updated_at: None,
        };
        let err = storage.patients().update(ghost).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn search_orders_by_name_and_pages() {
        let storage = InMemoryStorage::new();
        for (name, cpf) in [
            ("Carla", "529.982.247-25"),
            ("ana", "123.456.789-09"),
            ("Bruno", "111.444.777-35"),
        ] {
            storage.patients().add(new_patient(name, cpf)).await.unwrap();
        }

        let filter = PatientFilter::default();
        let first = storage
            .patients()
            .search(&filter, PageRequest { page: 1, page_size: 2 })
            .await
            .unwrap();
        let names: Vec<_> = first.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["ana", "Bruno"]);

        let second = storage
            .patients()
            .search(&filter, PageRequest { page: 2, page_size: 2 })
            .await
            .unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].name, "Carla");
        assert_eq!(storage.patients().count(&filter).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn record_for_unknown_patient_stores_nothing() {
        let storage = InMemoryStorage::new();
        let ghost = Uuid::new_v4();
        let err = storage
            .medical_records()
            .add(record_for(ghost, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UnknownPatient(id) if id == ghost));
        assert_eq!(storage.stats(), StorageStats::default());
    }

    #[tokio::test]
    async fn hydration_keeps_child_order_and_sorts_records() {
        let storage = InMemoryStorage::new();
        let patient = storage
            .patients()
            .add(new_patient("Ana", "529.982.247-25"))
            .await
            .unwrap();
        let older = storage
            .medical_records()
            .add(record_for(patient.id, 3))
            .await
            .unwrap();
        let newer = storage
            .medical_records()
            .add(record_for(patient.id, 9))
            .await
            .unwrap();

        let records = storage
            .medical_records()
            .find_by_patient(patient.id)
            .await
            .unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, [newer.id, older.id]);

        let codes: Vec<_> = records[0].diagnoses.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, ["J11", "R50"]);
        assert_eq!(records[0].exams.len(), 1);
        assert_eq!(records[0].prescriptions.len(), 1);
        assert!(records[0].diagnoses.iter().all(|d| d.medical_record_id == newer.id));
    }

    #[tokio::test]
    async fn deleting_record_removes_children() {
        let storage = InMemoryStorage::new();
        let patient = storage
            .patients()
            .add(new_patient("Ana", "529.982.247-25"))
            .await
            .unwrap();
        let keep = storage
            .medical_records()
            .add(record_for(patient.id, 1))
            .await
            .unwrap();
        let discarded = storage
            .medical_records()
            .add(record_for(patient.id, 2))
            .await
            .unwrap();

        storage.medical_records().delete(discarded.id).await.unwrap();

        let stats = storage.stats();
        assert_eq!(stats.medical_records, 1);
        assert_eq!(stats.diagnoses, 2);
        assert_eq!(stats.exams, 1);
        assert!(storage
            .medical_records()
            .find_with_children(keep.id)
            .await
            .unwrap()
            .is_some());
        assert!(matches!(
            storage.medical_records().delete(discarded.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn deleting_patient_cascades() {
        let storage = InMemoryStorage::new();
        let ana = storage
            .patients()
            .add(new_patient("Ana", "529.982.247-25"))
            .await
            .unwrap();
        let bia = storage
            .patients()
            .add(new_patient("Bia", "123.456.789-09"))
            .await
            .unwrap();
        storage.medical_records().add(record_for(ana.id, 1)).await.unwrap();
        storage.medical_records().add(record_for(ana.id, 2)).await.unwrap();
        storage.medical_records().add(record_for(bia.id, 3)).await.unwrap();

        storage.patients().delete(ana.id).await.unwrap();

        assert_eq!(
            storage.stats(),
            StorageStats {
                patients: 1,
                medical_records: 1,
                diagnoses: 2,
                exams: 1,
                prescriptions: 1,
            }
        );
        assert!(storage
            .medical_records()
            .find_by_patient(ana.id)
            .await
            .unwrap()
            .is_empty());
        // The CPF is free again
        assert!(storage
            .patients()
            .find_by_cpf("52998224725")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_patient_delete_leaves_no_orphans() {
        let storage = Arc::new(InMemoryStorage::new());

        for i in 0..200u32 {
            let owner_id = storage
                .patients()
                .add(new_patient("Ana", "529.982.247-25"))
                .await
                .unwrap()
                .id;

            let writer = {
                let storage = storage.clone();
                tokio::spawn(async move {
                    storage
                        .medical_records()
                        .add(record_for(owner_id, 1 + i % 28))
                        .await
                })
            };
            let remover = {
                let storage = storage.clone();
                tokio::spawn(async move { storage.patients().delete(owner_id).await })
            };

            let written = writer.await.unwrap();
            remover.await.unwrap().unwrap();
            if let Err(e) = written {
                assert!(matches!(e, DomainError::UnknownPatient(_)));
            }

            let stats = storage.stats();
            assert_eq!(stats, StorageStats::default(), "iteration {i}");
        }
    }
}
