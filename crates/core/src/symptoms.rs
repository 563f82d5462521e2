//! Fixed symptom vocabulary.
//!
//! Symptoms reported on an intake and symptoms associated with a catalog condition must both be
//! drawn from [`SYMPTOM_VOCABULARY`]. Parsing is case-insensitive and tolerant of repeated
//! whitespace, so `"shortness  of breath"` resolves to `Shortness of Breath`.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::constants::SYMPTOM_VOCABULARY;
use crate::{AssessmentError, EngineResult};

/// A symptom name from the known vocabulary.
///
/// Holds the canonical spelling, so two `Symptom`s compare equal exactly when they name the same
/// vocabulary entry. Ordering is lexicographic on the canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symptom(&'static str);

/// A set of symptoms with deterministic iteration order.
pub type SymptomSet = BTreeSet<Symptom>;

impl Symptom {
    /// Resolve a symptom name against the vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentError::InvalidInput`] if the name is blank or not a known symptom.
    pub fn parse(name: &str) -> EngineResult<Self> {
        let wanted = normalise(name);
        if wanted.is_empty() {
            return Err(AssessmentError::InvalidInput(
                "symptom name cannot be empty".into(),
            ));
        }

        SYMPTOM_VOCABULARY
            .iter()
            .find(|known| known.to_ascii_lowercase() == wanted)
            .map(|known| Symptom(*known))
            .ok_or_else(|| {
                AssessmentError::InvalidInput(format!("unknown symptom: {}", name.trim()))
            })
    }

    /// All known symptoms in intake-form order.
    pub fn all() -> impl Iterator<Item = Symptom> {
        SYMPTOM_VOCABULARY.iter().map(|known| Symptom(*known))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Parse a list of names into a [`SymptomSet`], collapsing duplicates.
pub fn parse_symptoms<I, S>(names: I) -> EngineResult<SymptomSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| Symptom::parse(name.as_ref()))
        .collect()
}

fn normalise(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

impl FromStr for Symptom {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symptom::parse(s)
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl serde::Serialize for Symptom {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Symptom {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Symptom::parse(&s).map_err(serde::de::Error::custom)
    }
}
