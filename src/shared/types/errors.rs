use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid identifier format: {0}")]
    InvalidFormat(String),

    #[error("Invalid CPF: {0}")]
    InvalidIdentifier(String),

    #[error("A patient with CPF {0} already exists")]
    DuplicateIdentifier(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Patient {0} does not exist")]
    UnknownPatient(Uuid),

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        DomainError::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    /// HTTP status the request layer answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::NotFound { .. } => 404,
            DomainError::Storage(_) => 500,
            _ => 400,
        }
    }

    /// Whether the caller sent something wrong (as opposed to the storage failing).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DomainError::Storage(_))
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, msg)
                })
            })
            .collect();

        if field_errors.is_empty() {
            // Only nested (list/struct) errors, which have no top-level field entry
            DomainError::Validation(errors.to_string())
        } else {
            DomainError::Validation(field_errors.join("; "))
        }
    }
}
