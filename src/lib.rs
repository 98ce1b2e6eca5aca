//! # Patient Registry
//!
//! Patient identity records and their medical history.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core entities, the CPF check-digit rules and repository ports
//! - **application**: Use cases (`PatientDirectory`, `MedicalHistoryLedger`) and DTOs
//! - **infrastructure**: Storage implementations
//! - **shared**: Error type, pagination, input normalization and logging setup
//!
//! ```ignore
//! let storage = Arc::new(InMemoryStorage::new());
//! let patients = PatientDirectory::new(storage.clone(), config.pagination.clone());
//! let history = MedicalHistoryLedger::new(storage);
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig, LoggingConfig, PaginationConfig};

pub use application::{MedicalHistoryLedger, PatientDirectory, PatientSearchQuery};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::InMemoryStorage;
pub use shared::logging::init_tracing;
