//! # API Shared
//!
//! Shared definitions for MedPredict front ends.
//!
//! Contains:
//! - Request/response types with OpenAPI schemas (`dto` module)
//! - Translation from engine types into response types
//! - The `HealthService`
//! - The medical disclaimer shown alongside every result
//!
//! Used by `api-rest` and `medpredict-cli`.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;

/// Disclaimer attached to every rendered assessment. Not part of the engine output.
pub const MEDICAL_DISCLAIMER: &str = "Medical Disclaimer: This AI prediction is for informational \
purposes only and should not replace professional medical diagnosis. Always consult with a \
qualified healthcare provider for proper medical evaluation and treatment.";
