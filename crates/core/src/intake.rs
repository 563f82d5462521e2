//! Symptom intake records.
//!
//! An [`IntakeRecord`] is what the presentation layer collects from the user and hands to the
//! engine. It is a plain value object: construction only resolves symptom names, while the
//! engine-level checks (non-empty symptoms, non-negative age) run in
//! [`crate::validation::validate_intake`] when an assessment is requested.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::symptoms::{parse_symptoms, SymptomSet};
use crate::{AssessmentError, EngineResult};

/// Self-reported gender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// How long the symptoms have been present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymptomDuration {
    #[serde(rename = "1-2days")]
    OneToTwoDays,
    #[serde(rename = "3-7days")]
    ThreeToSevenDays,
    #[serde(rename = "1-2weeks")]
    OneToTwoWeeks,
    #[serde(rename = "2weeks+")]
    MoreThanTwoWeeks,
}

/// Self-rated severity of the reported symptoms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportedSeverity {
    Mild,
    Moderate,
    Severe,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl SymptomDuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymptomDuration::OneToTwoDays => "1-2days",
            SymptomDuration::ThreeToSevenDays => "3-7days",
            SymptomDuration::OneToTwoWeeks => "1-2weeks",
            SymptomDuration::MoreThanTwoWeeks => "2weeks+",
        }
    }

    /// Human-readable label as shown on the intake form.
    pub fn label(&self) -> &'static str {
        match self {
            SymptomDuration::OneToTwoDays => "1-2 days",
            SymptomDuration::ThreeToSevenDays => "3-7 days",
            SymptomDuration::OneToTwoWeeks => "1-2 weeks",
            SymptomDuration::MoreThanTwoWeeks => "More than 2 weeks",
        }
    }
}

impl ReportedSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportedSeverity::Mild => "mild",
            ReportedSeverity::Moderate => "moderate",
            ReportedSeverity::Severe => "severe",
        }
    }
}

impl FromStr for Gender {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(AssessmentError::InvalidInput(format!(
                "unknown gender: {other}"
            ))),
        }
    }
}

impl FromStr for SymptomDuration {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1-2days" => Ok(SymptomDuration::OneToTwoDays),
            "3-7days" => Ok(SymptomDuration::ThreeToSevenDays),
            "1-2weeks" => Ok(SymptomDuration::OneToTwoWeeks),
            "2weeks+" => Ok(SymptomDuration::MoreThanTwoWeeks),
            other => Err(AssessmentError::InvalidInput(format!(
                "unknown duration: {other} (expected 1-2days, 3-7days, 1-2weeks or 2weeks+)"
            ))),
        }
    }
}

impl FromStr for ReportedSeverity {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mild" => Ok(ReportedSeverity::Mild),
            "moderate" => Ok(ReportedSeverity::Moderate),
            "severe" => Ok(ReportedSeverity::Severe),
            other => Err(AssessmentError::InvalidInput(format!(
                "unknown severity: {other}"
            ))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SymptomDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ReportedSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structured set of user-reported symptoms and attributes submitted for assessment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeRecord {
    /// Age in years. Signed so that a negative value reaches validation instead of failing
    /// deserialisation.
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    pub symptoms: SymptomSet,
    /// Free text. Carried for the presentation layer; never interpreted by the engine.
    #[serde(default)]
    pub additional_notes: Option<String>,
    #[serde(default)]
    pub duration: Option<SymptomDuration>,
    #[serde(default)]
    pub severity: Option<ReportedSeverity>,
}

impl IntakeRecord {
    /// Create an intake record from symptom names.
    ///
    /// An empty list is accepted here; it is rejected when the record is assessed.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentError::InvalidInput`] if any name is not in the symptom vocabulary.
    pub fn new<I, S>(symptoms: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            symptoms: parse_symptoms(symptoms)?,
            ..Self::default()
        })
    }

    pub fn with_age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_duration(mut self, duration: SymptomDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_severity(mut self, severity: ReportedSeverity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Attach free-text notes. Blank notes are dropped.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.additional_notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_record_with_optional_fields() {
        let intake = IntakeRecord::new(["Fever", "Cough"])
            .expect("valid symptoms")
            .with_age(34)
            .with_gender(Gender::Female)
            .with_duration(SymptomDuration::ThreeToSevenDays)
            .with_severity(ReportedSeverity::Moderate)
            .with_notes("worse at night");

        assert_eq!(intake.symptoms.len(), 2);
        assert_eq!(intake.age, Some(34));
        assert_eq!(intake.gender, Some(Gender::Female));
        assert_eq!(intake.additional_notes.as_deref(), Some("worse at night"));
    }

    #[test]
    fn blank_notes_are_dropped() {
        let intake = IntakeRecord::new(["Fever"])
            .expect("valid symptoms")
            .with_notes("   ");
        assert_eq!(intake.additional_notes, None);
    }

    #[test]
    fn rejects_unknown_symptom_names() {
        let err = IntakeRecord::new(["Fever", "Glowing"]).expect_err("unknown symptom");
        assert!(matches!(err, AssessmentError::InvalidInput(_)));
    }

    #[test]
    fn parses_form_values() {
        assert_eq!(
            "2weeks+".parse::<SymptomDuration>().unwrap(),
            SymptomDuration::MoreThanTwoWeeks
        );
        assert_eq!("Severe".parse::<ReportedSeverity>().unwrap(), ReportedSeverity::Severe);
        assert_eq!("other".parse::<Gender>().unwrap(), Gender::Other);
        assert!("fortnight".parse::<SymptomDuration>().is_err());
    }

    #[test]
    fn deserializes_wire_spellings() {
        let json = r#"{
            "age": 41,
            "gender": "male",
            "symptoms": ["Fever", "headache"],
            "duration": "1-2weeks",
            "severity": "mild"
        }"#;

        let intake: IntakeRecord = serde_json::from_str(json).expect("valid intake");
        assert_eq!(intake.duration, Some(SymptomDuration::OneToTwoWeeks));
        assert_eq!(intake.severity, Some(ReportedSeverity::Mild));
        assert!(intake
            .symptoms
            .iter()
            .any(|s| s.as_str() == "Headache"));
    }

    #[test]
    fn negative_age_survives_deserialisation() {
        let intake: IntakeRecord =
            serde_json::from_str(r#"{"age": -1, "symptoms": ["Fever"]}"#).expect("parses");
        assert_eq!(intake.age, Some(-1));
    }

    #[test]
    fn duration_label_matches_form_text() {
        assert_eq!(SymptomDuration::MoreThanTwoWeeks.label(), "More than 2 weeks");
    }
}
