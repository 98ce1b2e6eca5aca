//! Patient query types

use serde::Deserialize;

use crate::domain::PatientFilter;

/// Search parameters as received from the caller. Paging is clamped by
/// the directory, so any integer is accepted here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSearchQuery {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

impl PatientSearchQuery {
    pub fn filter(&self) -> PatientFilter {
        PatientFilter::new(self.name.as_deref(), self.cpf.as_deref())
    }
}
