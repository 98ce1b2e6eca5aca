//! Storage implementations

mod memory;

pub use memory::{
    InMemoryMedicalRecordRepository, InMemoryPatientRepository, InMemoryStorage, StorageStats,
};
