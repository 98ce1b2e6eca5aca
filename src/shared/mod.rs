pub mod logging;
pub mod types;
pub mod validations;

pub use types::*;
pub use validations::*;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
