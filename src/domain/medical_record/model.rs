//! Medical record domain entities
//!
//! A medical record is one clinical encounter. It exclusively owns its
//! diagnoses, exams and prescriptions; children only carry the id of the
//! record they belong to.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::{optional_text, required_text, DomainError, DomainResult};

/// Record header without its child collections
#[derive(Debug, Clone, PartialEq)]
pub struct MedicalRecordHeader {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub consultation_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fully hydrated medical record
#[derive(Debug, Clone, PartialEq)]
pub struct MedicalRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub consultation_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub diagnoses: Vec<Diagnosis>,
    pub exams: Vec<Exam>,
    pub prescriptions: Vec<Prescription>,
}

impl MedicalRecord {
    pub fn hydrate(
        header: MedicalRecordHeader,
        diagnoses: Vec<Diagnosis>,
        exams: Vec<Exam>,
        prescriptions: Vec<Prescription>,
    ) -> Self {
        Self {
            id: header.id,
            patient_id: header.patient_id,
            consultation_date: header.consultation_date,
            notes: header.notes,
            created_at: header.created_at,
            diagnoses,
            exams,
            prescriptions,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    pub id: Uuid,
    pub medical_record_id: Uuid,
    /// ICD-style code, upper case
    pub code: String,
    pub description: String,
    pub diagnosis_date: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exam {
    pub id: Uuid,
    pub medical_record_id: Uuid,
    pub exam_type: String,
    pub name: String,
    pub performed_at: DateTime<Utc>,
    pub result: Option<String>,
    pub lab_name: Option<String>,
    pub external_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prescription {
    pub id: Uuid,
    pub medical_record_id: Uuid,
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub instructions: Option<String>,
}

// ── Unsaved aggregate ───────────────────────────────────────────

/// A normalized medical record, stored as one unit
#[derive(Debug, Clone, PartialEq)]
pub struct NewMedicalRecord {
    pub patient_id: Uuid,
    pub consultation_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub diagnoses: Vec<NewDiagnosis>,
    pub exams: Vec<NewExam>,
    pub prescriptions: Vec<NewPrescription>,
}

impl NewMedicalRecord {
    pub fn new(
        patient_id: Uuid,
        consultation_date: DateTime<Utc>,
        notes: Option<&str>,
    ) -> Self {
        Self {
            patient_id,
            consultation_date,
            notes: optional_text(notes),
            diagnoses: Vec::new(),
            exams: Vec::new(),
            prescriptions: Vec::new(),
        }
    }

    pub fn with_diagnosis(mut self, diagnosis: NewDiagnosis) -> Self {
        self.diagnoses.push(diagnosis);
        self
    }

    pub fn with_exam(mut self, exam: NewExam) -> Self {
        self.exams.push(exam);
        self
    }

    pub fn with_prescription(mut self, prescription: NewPrescription) -> Self {
        self.prescriptions.push(prescription);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDiagnosis {
    pub code: String,
    pub description: String,
    pub diagnosis_date: DateTime<Utc>,
    pub notes: Option<String>,
}

impl NewDiagnosis {
    pub fn new(
        code: &str,
        description: &str,
        diagnosis_date: DateTime<Utc>,
        notes: Option<&str>,
    ) -> DomainResult<Self> {
        Ok(Self {
            code: required_text("diagnosis code", code)?.to_uppercase(),
            description: required_text("diagnosis description", description)?,
            diagnosis_date,
            notes: optional_text(notes),
        })
    }

    pub fn into_stored(self, id: Uuid, medical_record_id: Uuid) -> Diagnosis {
        Diagnosis {
            id,
            medical_record_id,
            code: self.code,
            description: self.description,
            diagnosis_date: self.diagnosis_date,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExam {
    pub exam_type: String,
    pub name: String,
    pub performed_at: DateTime<Utc>,
    pub result: Option<String>,
    pub lab_name: Option<String>,
    pub external_code: Option<String>,
}

impl NewExam {
    pub fn new(
        exam_type: &str,
        name: &str,
        performed_at: DateTime<Utc>,
        result: Option<&str>,
        lab_name: Option<&str>,
        external_code: Option<&str>,
    ) -> DomainResult<Self> {
        Ok(Self {
            exam_type: required_text("exam type", exam_type)?,
            name: required_text("exam name", name)?,
            performed_at,
            result: optional_text(result),
            lab_name: optional_text(lab_name),
            external_code: optional_text(external_code),
        })
    }

    pub fn into_stored(self, id: Uuid, medical_record_id: Uuid) -> Exam {
        Exam {
            id,
            medical_record_id,
            exam_type: self.exam_type,
            name: self.name,
            performed_at: self.performed_at,
            result: self.result,
            lab_name: self.lab_name,
            external_code: self.external_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPrescription {
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub instructions: Option<String>,
}

impl NewPrescription {
    pub fn new(
        medication: &str,
        dosage: &str,
        frequency: &str,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
        instructions: Option<&str>,
    ) -> DomainResult<Self> {
        if let Some(end) = end_date {
            if end < start_date {
                return Err(DomainError::Validation(
                    "prescription end date precedes its start date".into(),
                ));
            }
        }
        Ok(Self {
            medication: required_text("medication", medication)?,
            dosage: required_text("dosage", dosage)?,
            frequency: required_text("frequency", frequency)?,
            start_date,
            end_date,
            instructions: optional_text(instructions),
        })
    }

    pub fn into_stored(self, id: Uuid, medical_record_id: Uuid) -> Prescription {
        Prescription {
            id,
            medical_record_id,
            medication: self.medication,
            dosage: self.dosage,
            frequency: self.frequency,
            start_date: self.start_date,
            end_date: self.end_date,
            instructions: self.instructions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 9, 30, 0).unwrap()
    }

    #[test]
    fn diagnosis_code_is_upper_cased_and_trimmed() {
        let d = NewDiagnosis::new(" a10 ", " flu ", at(1), Some("  ")).unwrap();
        assert_eq!(d.code, "A10");
        assert_eq!(d.description, "flu");
        assert_eq!(d.notes, None);
    }

    #[test]
    fn diagnosis_requires_description() {
        let err = NewDiagnosis::new("A10", "  ", at(1), None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn exam_trims_every_text_field() {
        let e = NewExam::new(
            " blood ",
            " Hemograma ",
            at(2),
            Some(" normal "),
            Some(" Lab X "),
            Some(" EXT-1 "),
        )
        .unwrap();
        assert_eq!(e.exam_type, "blood");
        assert_eq!(e.name, "Hemograma");
        assert_eq!(e.result.as_deref(), Some("normal"));
        assert_eq!(e.lab_name.as_deref(), Some("Lab X"));
        assert_eq!(e.external_code.as_deref(), Some("EXT-1"));
    }

    #[test]
    fn prescription_end_before_start_is_rejected() {
        let err = NewPrescription::new(
            "Dipirona",
            "500mg",
            "8/8h",
            at(5),
            Some(at(5) - Duration::days(1)),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn prescription_open_ended_is_fine() {
        let p = NewPrescription::new(" Dipirona ", "500mg", "8/8h", at(5), None, Some(" with food "))
            .unwrap();
        assert_eq!(p.medication, "Dipirona");
        assert_eq!(p.instructions.as_deref(), Some("with food"));
    }

    #[test]
    fn builder_keeps_child_order() {
        let record = NewMedicalRecord::new(Uuid::new_v4(), at(1), Some(" checkup "))
            .with_diagnosis(NewDiagnosis::new("B01", "first", at(1), None).unwrap())
            .with_diagnosis(NewDiagnosis::new("A00", "second", at(1), None).unwrap());
        assert_eq!(record.notes.as_deref(), Some("checkup"));
        let codes: Vec<_> = record.diagnoses.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, ["B01", "A00"]);
    }
}
