//! Subsystem classification and curated-list auditing over a normalized
//! arcade machine catalog.

pub mod classify;
pub mod config;
pub mod error;
pub mod validate;

pub use classify::{SubsystemPlan, classify, classify_all};
pub use config::{CuratedList, SubsystemMapping};
pub use error::ConfigError;
pub use validate::{Finding, FindingKind, validate};
