//! # MedPredict Core
//!
//! Core logic for the MedPredict symptom assessment tool.
//!
//! This crate contains the pure assessment engine and its reference data:
//! - Symptom vocabulary and intake records
//! - Condition catalog loading and validation
//! - Deterministic scoring, ranking and confidence
//!
//! **No API concerns**: HTTP servers, CLI parsing, disclaimers and simulated latency belong in
//! `api-rest`, `api-shared` or `medpredict-cli`.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod engine;
mod error;
pub mod intake;
pub mod service;
pub mod symptoms;
pub mod validation;

pub use catalog::{load_catalog, ConditionCandidate, ConditionCatalog, SeverityClass};
pub use config::EngineConfig;
pub use engine::{assess, AssessmentResult, ConfidenceBand, RankedCondition};
pub use error::{AssessmentError, EngineResult};
pub use intake::{Gender, IntakeRecord, ReportedSeverity, SymptomDuration};
pub use service::AssessmentService;
pub use symptoms::{Symptom, SymptomSet};

pub use medpredict_types::{NonEmptyText, Probability};
