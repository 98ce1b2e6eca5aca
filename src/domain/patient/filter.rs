//! Patient search predicate
//!
//! Shared by the page query and the count query so the two can never
//! disagree about which patients match.

use super::model::Patient;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientFilter {
    /// Lower-cased name fragment
    name: Option<String>,
    /// Digits-only CPF fragment. `Some("")` means the caller sent a CPF
    /// filter without any digit, which matches nothing.
    cpf_digits: Option<String>,
}

impl PatientFilter {
    /// Blank filters are ignored.
    pub fn new(name: Option<&str>, cpf: Option<&str>) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_lowercase);
        let cpf_digits = cpf
            .filter(|c| !c.trim().is_empty())
            .map(|c| c.chars().filter(char::is_ascii_digit).collect());
        Self { name, cpf_digits }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn cpf_digits(&self) -> Option<&str> {
        self.cpf_digits.as_deref()
    }

    pub fn matches(&self, patient: &Patient) -> bool {
        if let Some(name) = &self.name {
            if !patient.name.to_lowercase().contains(name.as_str()) {
                return false;
            }
        }
        if let Some(digits) = &self.cpf_digits {
            if digits.is_empty() || !patient.cpf_digits().contains(digits.as_str()) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn patient(name: &str, cpf: &str) -> Patient {
        Patient {
            id: Uuid::new_v4(),
            name: name.into(),
            cpf: cpf.into(),
            birth_date: NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(),
            contact: "123".into(),
            email: None,
            address: None,
            active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn empty_filter_matches_everyone() {
        let filter = PatientFilter::new(None, Some("   "));
        assert!(filter.matches(&patient("Ana", "529.982.247-25")));
    }

    #[test]
    fn name_is_case_insensitive_substring() {
        let filter = PatientFilter::new(Some(" SILV "), None);
        assert!(filter.matches(&patient("João Silva", "529.982.247-25")));
        assert!(!filter.matches(&patient("Maria Santos", "123.456.789-09")));
    }

    #[test]
    fn cpf_ignores_punctuation() {
        let filter = PatientFilter::new(None, Some("982.247"));
        assert_eq!(filter.cpf_digits(), Some("982247"));
        assert!(filter.matches(&patient("Ana", "529.982.247-25")));
        assert!(!filter.matches(&patient("Bia", "123.456.789-09")));
    }

    #[test]
    fn cpf_filter_without_digits_matches_nothing() {
        let filter = PatientFilter::new(None, Some("abc"));
        assert!(!filter.matches(&patient("Ana", "529.982.247-25")));
    }

    #[test]
    fn both_filters_must_match() {
        let filter = PatientFilter::new(Some("ana"), Some("123"));
        assert!(!filter.matches(&patient("Ana", "529.982.247-25")));
        assert!(filter.matches(&patient("Ana", "123.456.789-09")));
    }
}
