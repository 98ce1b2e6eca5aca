//! Patient module: registration, profile updates, search and removal

pub mod queries;
pub mod service;

pub use queries::PatientSearchQuery;
pub use service::PatientDirectory;
