//! Request and response types for the MedPredict APIs.
//!
//! These are the wire shapes; the engine's own types stay free of presentation concerns such as
//! the disclaimer or percentage rounding. Form fields arrive as plain strings (an unset select
//! is `""`), so conversion into an [`IntakeRecord`] treats blank strings as absent.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use medpredict_core::{
    AssessmentResult, ConditionCandidate, ConditionCatalog, EngineResult, IntakeRecord,
    RankedCondition, Symptom,
};

use crate::MEDICAL_DISCLAIMER;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssessReq {
    #[serde(default)]
    pub age: Option<i32>,
    /// One of `male`, `female`, `other`.
    #[serde(default)]
    pub gender: Option<String>,
    pub symptoms: Vec<String>,
    #[serde(default, alias = "additionalNotes")]
    pub additional_notes: Option<String>,
    /// One of `1-2days`, `3-7days`, `1-2weeks`, `2weeks+`.
    #[serde(default)]
    pub duration: Option<String>,
    /// One of `mild`, `moderate`, `severe`.
    #[serde(default)]
    pub severity: Option<String>,
    /// Overrides the configured result limit for this request.
    #[serde(default)]
    pub max_results: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RankedConditionRes {
    pub name: String,
    pub description: String,
    pub severity_class: String,
    pub match_score: f64,
    /// `match_score` as a whole percentage, as displayed.
    pub match_percent: u8,
    pub matched_symptoms: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssessRes {
    pub conditions: Vec<RankedConditionRes>,
    pub confidence: f64,
    pub confidence_percent: u8,
    /// One of `high`, `moderate`, `low`.
    pub confidence_band: String,
    pub confidence_summary: String,
    pub recommendations: Vec<String>,
    pub disclaimer: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConditionRes {
    pub name: String,
    pub description: String,
    pub severity_class: String,
    pub base_probability: f64,
    pub associated_symptoms: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogRes {
    pub conditions: Vec<ConditionRes>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SymptomsRes {
    pub symptoms: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl AssessReq {
    /// Convert the request into an intake record.
    ///
    /// # Errors
    ///
    /// Returns [`medpredict_core::AssessmentError::InvalidInput`] for unknown symptom names or
    /// unrecognised gender, duration or severity values. Empty symptoms and negative ages are
    /// left for the engine to reject.
    pub fn to_intake(&self) -> EngineResult<IntakeRecord> {
        let mut intake = IntakeRecord::new(&self.symptoms)?;

        if let Some(age) = self.age {
            intake = intake.with_age(age);
        }
        if let Some(gender) = non_blank(&self.gender) {
            intake = intake.with_gender(gender.parse()?);
        }
        if let Some(duration) = non_blank(&self.duration) {
            intake = intake.with_duration(duration.parse()?);
        }
        if let Some(severity) = non_blank(&self.severity) {
            intake = intake.with_severity(severity.parse()?);
        }
        if let Some(notes) = &self.additional_notes {
            intake = intake.with_notes(notes.as_str());
        }

        Ok(intake)
    }
}

impl AssessRes {
    pub fn from_result(result: &AssessmentResult) -> Self {
        let band = result.confidence_band();
        Self {
            conditions: result.conditions.iter().map(RankedConditionRes::from).collect(),
            confidence: result.confidence.value(),
            confidence_percent: percent(result.confidence.value()),
            confidence_band: match band {
                medpredict_core::ConfidenceBand::High => "high",
                medpredict_core::ConfidenceBand::Moderate => "moderate",
                medpredict_core::ConfidenceBand::Low => "low",
            }
            .into(),
            confidence_summary: band.summary().into(),
            recommendations: result.recommendations.clone(),
            disclaimer: MEDICAL_DISCLAIMER.into(),
        }
    }
}

impl From<&RankedCondition> for RankedConditionRes {
    fn from(ranked: &RankedCondition) -> Self {
        Self {
            name: ranked.condition.name.to_string(),
            description: ranked.condition.description.clone(),
            severity_class: ranked.condition.severity_class.to_string(),
            match_score: ranked.match_score.value(),
            match_percent: percent(ranked.match_score.value()),
            matched_symptoms: ranked
                .matched_symptoms
                .iter()
                .map(|s| s.as_str().to_owned())
                .collect(),
        }
    }
}

impl From<&ConditionCandidate> for ConditionRes {
    fn from(condition: &ConditionCandidate) -> Self {
        Self {
            name: condition.name.to_string(),
            description: condition.description.clone(),
            severity_class: condition.severity_class.to_string(),
            base_probability: condition.base_probability.value(),
            associated_symptoms: condition
                .associated_symptoms
                .iter()
                .map(|s| s.as_str().to_owned())
                .collect(),
        }
    }
}

impl From<&ConditionCatalog> for CatalogRes {
    fn from(catalog: &ConditionCatalog) -> Self {
        Self {
            conditions: catalog.conditions().iter().map(ConditionRes::from).collect(),
        }
    }
}

impl SymptomsRes {
    pub fn vocabulary() -> Self {
        Self {
            symptoms: Symptom::all().map(|s| s.as_str().to_owned()).collect(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn percent(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use medpredict_core::{
        AssessmentError, AssessmentService, Gender, ReportedSeverity, SymptomDuration,
    };

    #[test]
    fn blank_form_selects_are_treated_as_absent() {
        let req = AssessReq {
            symptoms: vec!["Fever".into()],
            gender: Some("".into()),
            duration: Some("  ".into()),
            severity: None,
            ..AssessReq::default()
        };

        let intake = req.to_intake().expect("valid request");
        assert_eq!(intake.gender, None);
        assert_eq!(intake.duration, None);
    }

    #[test]
    fn accepts_camel_case_notes_from_the_intake_form() {
        let req: AssessReq = serde_json::from_value(serde_json::json!({
            "symptoms": ["Fever"],
            "additionalNotes": "worse at night"
        }))
        .expect("valid json");

        assert_eq!(req.additional_notes.as_deref(), Some("worse at night"));
        let intake = req.to_intake().expect("valid request");
        assert_eq!(intake.additional_notes.as_deref(), Some("worse at night"));
    }

    #[test]
    fn parses_all_form_fields() {
        let req = AssessReq {
            age: Some(29),
            gender: Some("female".into()),
            symptoms: vec!["Fever".into(), "Cough".into()],
            additional_notes: Some("started after travel".into()),
            duration: Some("3-7days".into()),
            severity: Some("moderate".into()),
            max_results: None,
        };

        let intake = req.to_intake().expect("valid request");
        assert_eq!(intake.age, Some(29));
        assert_eq!(intake.gender, Some(Gender::Female));
        assert_eq!(intake.duration, Some(SymptomDuration::ThreeToSevenDays));
        assert_eq!(intake.severity, Some(ReportedSeverity::Moderate));
        assert_eq!(intake.symptoms.len(), 2);
    }

    #[test]
    fn rejects_unknown_select_values() {
        let req = AssessReq {
            symptoms: vec!["Fever".into()],
            severity: Some("unbearable".into()),
            ..AssessReq::default()
        };
        assert!(matches!(
            req.to_intake(),
            Err(AssessmentError::InvalidInput(_))
        ));
    }

    #[test]
    fn response_carries_disclaimer_and_percentages() {
        let service = AssessmentService::with_builtin_catalog().expect("builtin");
        let intake = IntakeRecord::new(["Fever", "Cough"]).expect("intake");
        let result = service.assess(&intake).expect("assess");

        let res = AssessRes::from_result(&result);
        assert_eq!(res.disclaimer, MEDICAL_DISCLAIMER);
        assert_eq!(res.conditions.len(), 3);
        assert_eq!(res.conditions[0].name, "Common Cold");
        assert_eq!(
            res.conditions[0].match_percent,
            percent(res.conditions[0].match_score)
        );
        assert_eq!(res.confidence_band, "moderate");
        assert_eq!(res.recommendations.len(), 4);
    }

    #[test]
    fn catalog_response_lists_every_condition() {
        let catalog = ConditionCatalog::builtin().expect("builtin");
        let res = CatalogRes::from(&catalog);
        assert_eq!(res.conditions.len(), 5);
        assert_eq!(res.conditions[4].severity_class, "serious");
    }

    #[test]
    fn request_deserializes_with_missing_optionals() {
        let req: AssessReq =
            serde_json::from_str(r#"{"symptoms": ["Headache"]}"#).expect("valid json");
        assert_eq!(req.symptoms, ["Headache"]);
        assert_eq!(req.max_results, None);
    }
}
