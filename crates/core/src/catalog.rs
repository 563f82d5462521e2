//! Condition catalog: the static reference data the engine ranks against.
//!
//! Responsibilities:
//! - Define the domain-level [`ConditionCandidate`] and [`ConditionCatalog`] types
//! - Define a strict wire model for the catalog YAML
//! - Translate and validate between the two
//!
//! Notes:
//! - The catalog is loaded once at process start and shared read-only afterwards
//! - A builtin catalog is embedded in the binary; a file may replace it

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use medpredict_types::{NonEmptyText, Probability};

use crate::constants::BUILTIN_CATALOG_YAML;
use crate::symptoms::{Symptom, SymptomSet};
use crate::{AssessmentError, EngineResult};

// ============================================================================
// Public domain-level types
// ============================================================================

/// Clinical seriousness of a catalog condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityClass {
    Mild,
    Moderate,
    Serious,
}

impl SeverityClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityClass::Mild => "mild",
            SeverityClass::Moderate => "moderate",
            SeverityClass::Serious => "serious",
        }
    }
}

impl fmt::Display for SeverityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference condition the engine can match against.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConditionCandidate {
    /// Unique identifier within a catalog.
    pub name: NonEmptyText,

    /// Prior likelihood, independent of any intake.
    pub base_probability: Probability,

    pub severity_class: SeverityClass,

    pub description: String,

    /// Symptoms typical of this condition. Overlap with the reported symptoms drives the match
    /// score.
    pub associated_symptoms: SymptomSet,
}

/// A validated, non-empty collection of conditions with unique names.
///
/// Conditions keep the order they were declared in; the engine does its own ranking.
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionCatalog {
    conditions: Vec<ConditionCandidate>,
}

impl ConditionCatalog {
    /// Build a catalog from already-typed conditions.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentError::Catalog`] if `conditions` is empty or contains duplicate names.
    pub fn new(conditions: Vec<ConditionCandidate>) -> EngineResult<Self> {
        if conditions.is_empty() {
            return Err(AssessmentError::Catalog(
                "catalog must contain at least one condition".into(),
            ));
        }

        let mut seen = HashSet::new();
        for condition in &conditions {
            if !seen.insert(condition.name.as_str()) {
                return Err(AssessmentError::Catalog(format!(
                    "duplicate condition name: {}",
                    condition.name
                )));
            }
        }

        Ok(Self { conditions })
    }

    /// Parse the catalog embedded in the binary.
    pub fn builtin() -> EngineResult<Self> {
        Self::parse(BUILTIN_CATALOG_YAML)
    }

    /// Parse a catalog from YAML text.
    ///
    /// This uses `serde_path_to_error` to point at the failing field (for example
    /// `conditions[2].base_probability`) when the YAML does not match the wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentError::Catalog`] if:
    /// - the YAML does not match the wire schema or contains unknown keys,
    /// - a name is blank or duplicated,
    /// - a base probability is outside `[0, 1]`,
    /// - an associated symptom is not in the vocabulary,
    /// - there are no conditions.
    pub fn parse(yaml_text: &str) -> EngineResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, CatalogWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(AssessmentError::Catalog(format!(
                    "catalog schema mismatch at {path}: {source}"
                )));
            }
        };

        wire_to_domain(wire)
    }

    /// Render the catalog as YAML text accepted by [`ConditionCatalog::parse`].
    pub fn render(&self) -> EngineResult<String> {
        serde_yaml::to_string(&domain_to_wire(self)).map_err(AssessmentError::CatalogSerialization)
    }

    pub fn conditions(&self) -> &[ConditionCandidate] {
        &self.conditions
    }

    pub fn get(&self, name: &str) -> Option<&ConditionCandidate> {
        self.conditions.iter().find(|c| c.name.as_str() == name)
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Load the condition catalog, preferring an override file when one is given.
///
/// Intended to be called once at startup; the caller reads any environment variable and passes
/// the path in.
pub fn load_catalog(override_path: Option<&Path>) -> EngineResult<ConditionCatalog> {
    match override_path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(AssessmentError::CatalogRead)?;
            let catalog = ConditionCatalog::parse(&text)?;
            tracing::info!(
                "loaded {} conditions from {}",
                catalog.len(),
                path.display()
            );
            Ok(catalog)
        }
        None => {
            let catalog = ConditionCatalog::builtin()?;
            tracing::debug!("using builtin catalog with {} conditions", catalog.len());
            Ok(catalog)
        }
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct CatalogWire {
    conditions: Vec<ConditionWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct ConditionWire {
    name: String,
    base_probability: f64,
    severity_class: SeverityClass,
    description: String,
    #[serde(default)]
    associated_symptoms: Vec<String>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: CatalogWire) -> EngineResult<ConditionCatalog> {
    let conditions = wire
        .conditions
        .into_iter()
        .map(condition_from_wire)
        .collect::<EngineResult<Vec<_>>>()?;

    ConditionCatalog::new(conditions)
}

fn condition_from_wire(wire: ConditionWire) -> EngineResult<ConditionCandidate> {
    let name = NonEmptyText::new(&wire.name)
        .map_err(|_| AssessmentError::Catalog("condition name cannot be empty".into()))?;

    let base_probability = Probability::new(wire.base_probability).map_err(|e| {
        AssessmentError::Catalog(format!("invalid base_probability for {name}: {e}"))
    })?;

    let associated_symptoms = wire
        .associated_symptoms
        .iter()
        .map(|s| {
            Symptom::parse(s).map_err(|_| {
                AssessmentError::Catalog(format!("unknown symptom {s:?} listed for {name}"))
            })
        })
        .collect::<EngineResult<SymptomSet>>()?;

    Ok(ConditionCandidate {
        name,
        base_probability,
        severity_class: wire.severity_class,
        description: wire.description.trim().to_owned(),
        associated_symptoms,
    })
}

fn domain_to_wire(catalog: &ConditionCatalog) -> CatalogWire {
    CatalogWire {
        conditions: catalog
            .conditions
            .iter()
            .map(|c| ConditionWire {
                name: c.name.to_string(),
                base_probability: c.base_probability.value(),
                severity_class: c.severity_class,
                description: c.description.clone(),
                associated_symptoms: c
                    .associated_symptoms
                    .iter()
                    .map(|s| s.as_str().to_owned())
                    .collect(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"conditions:
  - name: Common Cold
    base_probability: 0.75
    severity_class: mild
    description: Viral upper respiratory infection
    associated_symptoms: [Cough, Runny Nose]
  - name: Hypertension
    base_probability: 0.25
    severity_class: serious
    description: High blood pressure condition
"#;

    #[test]
    fn builtin_catalog_has_the_five_source_conditions() {
        let catalog = ConditionCatalog::builtin().expect("builtin catalog parses");
        let names: Vec<_> = catalog
            .conditions()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "Common Cold",
                "Influenza",
                "Migraine",
                "Gastroenteritis",
                "Hypertension"
            ]
        );

        let hypertension = catalog.get("Hypertension").expect("present");
        assert_eq!(hypertension.severity_class, SeverityClass::Serious);
        assert_eq!(hypertension.base_probability.value(), 0.25);
    }

    #[test]
    fn parses_sample_and_defaults_missing_symptoms() {
        let catalog = ConditionCatalog::parse(SAMPLE).expect("parse yaml");
        assert_eq!(catalog.len(), 2);
        assert!(catalog
            .get("Hypertension")
            .expect("present")
            .associated_symptoms
            .is_empty());
    }

    #[test]
    fn render_then_parse_preserves_catalog() {
        let catalog = ConditionCatalog::builtin().expect("builtin");
        let yaml = catalog.render().expect("render");
        let reparsed = ConditionCatalog::parse(&yaml).expect("reparse");
        assert_eq!(catalog, reparsed);
    }

    #[test]
    fn strict_validation_rejects_unknown_keys() {
        let input = SAMPLE.replace("severity_class: mild", "severity_class: mild\n    icd10: J00");
        let err = ConditionCatalog::parse(&input).expect_err("should reject unknown key");
        match err {
            AssessmentError::Catalog(msg) => assert!(msg.contains("icd10")),
            other => panic!("expected Catalog error, got {other:?}"),
        }
    }

    #[test]
    fn schema_errors_report_the_failing_path() {
        let input = SAMPLE.replace("base_probability: 0.75", "base_probability: high");
        let err = ConditionCatalog::parse(&input).expect_err("should reject wrong type");
        match err {
            AssessmentError::Catalog(msg) => assert!(msg.contains("base_probability")),
            other => panic!("expected Catalog error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_probability_outside_unit_interval() {
        let input = SAMPLE.replace("base_probability: 0.75", "base_probability: 1.75");
        let err = ConditionCatalog::parse(&input).expect_err("should reject probability");
        match err {
            AssessmentError::Catalog(msg) => assert!(msg.contains("Common Cold")),
            other => panic!("expected Catalog error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_associated_symptom() {
        let input = SAMPLE.replace("[Cough, Runny Nose]", "[Cough, Sneezing]");
        let err = ConditionCatalog::parse(&input).expect_err("should reject symptom");
        match err {
            AssessmentError::Catalog(msg) => assert!(msg.contains("Sneezing")),
            other => panic!("expected Catalog error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_names() {
        let input = SAMPLE.replace("name: Hypertension", "name: Common Cold");
        let err = ConditionCatalog::parse(&input).expect_err("should reject duplicate");
        assert!(matches!(err, AssessmentError::Catalog(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn rejects_empty_catalog() {
        let err = ConditionCatalog::parse("conditions: []\n").expect_err("should reject empty");
        assert!(matches!(err, AssessmentError::Catalog(_)));
    }

    #[test]
    fn load_catalog_reads_override_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("conditions.yaml");
        std::fs::write(&path, SAMPLE).expect("write catalog");

        let catalog = load_catalog(Some(&path)).expect("load override");
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn load_catalog_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_catalog(Some(&dir.path().join("missing.yaml"))).expect_err("missing");
        assert!(matches!(err, AssessmentError::CatalogRead(_)));
    }

    #[test]
    fn load_catalog_defaults_to_builtin() {
        let catalog = load_catalog(None).expect("builtin");
        assert_eq!(catalog.len(), 5);
    }
}
