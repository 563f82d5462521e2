//! Constants used throughout the MedPredict core crate.
//!
//! Reference vocabularies, scoring defaults and environment variable names live here so the
//! engine, the REST API and the CLI agree on them.

/// Known symptom names offered by the intake form, in display order.
pub const SYMPTOM_VOCABULARY: [&str; 14] = [
    "Fever",
    "Headache",
    "Cough",
    "Fatigue",
    "Nausea",
    "Dizziness",
    "Chest Pain",
    "Shortness of Breath",
    "Abdominal Pain",
    "Joint Pain",
    "Sore Throat",
    "Runny Nose",
    "Muscle Aches",
    "Loss of Appetite",
];

/// Default number of ranked conditions returned by an assessment.
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// Default minimum match score; zero keeps every candidate.
pub const DEFAULT_MIN_MATCH_SCORE: f64 = 0.0;

/// Default weight of a candidate's prior probability in its match score.
pub const DEFAULT_PRIOR_WEIGHT: f64 = 0.3;

/// Default weight of symptom overlap in a candidate's match score.
pub const DEFAULT_OVERLAP_WEIGHT: f64 = 0.7;

/// Confidence above which a result is reported as high confidence.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Confidence above which a result is reported as moderate confidence.
pub const MODERATE_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Advisory strings attached to every assessment unless configured otherwise.
pub const DEFAULT_RECOMMENDATIONS: [&str; 4] = [
    "Consult with a healthcare professional for proper diagnosis",
    "Monitor symptoms and seek immediate care if they worsen",
    "Stay hydrated and get adequate rest",
    "Consider over-the-counter medications for symptom relief",
];

/// Built-in condition catalog, embedded at compile time.
pub const BUILTIN_CATALOG_YAML: &str = include_str!("../catalog/conditions.yaml");

/// Environment variable naming an alternative catalog YAML file.
pub const CATALOG_PATH_ENV: &str = "MEDPREDICT_CATALOG_PATH";

/// Environment variable overriding the maximum number of results.
pub const MAX_RESULTS_ENV: &str = "MEDPREDICT_MAX_RESULTS";

/// Environment variable overriding the minimum match score.
pub const MIN_MATCH_SCORE_ENV: &str = "MEDPREDICT_MIN_MATCH_SCORE";
