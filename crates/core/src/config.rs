//! Engine configuration.
//!
//! Configuration is resolved once at process startup and then passed into the engine. The
//! library never reads environment variables itself; binaries read them and use the
//! `*_from_env_value` helpers below to turn optional strings into typed values.

use medpredict_types::{NonEmptyText, Probability};

use crate::constants::{
    DEFAULT_MAX_RESULTS, DEFAULT_MIN_MATCH_SCORE, DEFAULT_OVERLAP_WEIGHT, DEFAULT_PRIOR_WEIGHT,
    DEFAULT_RECOMMENDATIONS,
};
use crate::{AssessmentError, EngineResult};

/// Tunables for a single assessment.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    max_results: usize,
    min_match_score: Probability,
    prior_weight: f64,
    overlap_weight: f64,
    recommendations: Vec<NonEmptyText>,
}

impl EngineConfig {
    /// Create a new `EngineConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentError::InvalidConfig`] if:
    /// - `max_results` is zero,
    /// - either weight is negative or not finite,
    /// - both weights are zero.
    pub fn new(
        max_results: usize,
        min_match_score: Probability,
        prior_weight: f64,
        overlap_weight: f64,
        recommendations: Vec<NonEmptyText>,
    ) -> EngineResult<Self> {
        if max_results == 0 {
            return Err(AssessmentError::InvalidConfig(
                "max_results must be at least 1".into(),
            ));
        }

        let weights = [
            ("prior_weight", prior_weight),
            ("overlap_weight", overlap_weight),
        ];
        for (label, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AssessmentError::InvalidConfig(format!(
                    "{label} must be a finite, non-negative number"
                )));
            }
        }

        if prior_weight + overlap_weight <= 0.0 {
            return Err(AssessmentError::InvalidConfig(
                "prior_weight and overlap_weight cannot both be zero".into(),
            ));
        }

        Ok(Self {
            max_results,
            min_match_score,
            prior_weight,
            overlap_weight,
            recommendations,
        })
    }

    /// Return a copy with a different result limit.
    pub fn with_max_results(self, max_results: usize) -> EngineResult<Self> {
        Self::new(
            max_results,
            self.min_match_score,
            self.prior_weight,
            self.overlap_weight,
            self.recommendations,
        )
    }

    /// Return a copy with a different minimum match score.
    pub fn with_min_match_score(self, min_match_score: Probability) -> Self {
        Self {
            min_match_score,
            ..self
        }
    }

    /// Return a copy with a different recommendation list.
    pub fn with_recommendations(self, recommendations: Vec<NonEmptyText>) -> Self {
        Self {
            recommendations,
            ..self
        }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn min_match_score(&self) -> Probability {
        self.min_match_score
    }

    pub fn prior_weight(&self) -> f64 {
        self.prior_weight
    }

    pub fn overlap_weight(&self) -> f64 {
        self.overlap_weight
    }

    pub fn recommendations(&self) -> &[NonEmptyText] {
        &self.recommendations
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            min_match_score: Probability::clamped(DEFAULT_MIN_MATCH_SCORE),
            prior_weight: DEFAULT_PRIOR_WEIGHT,
            overlap_weight: DEFAULT_OVERLAP_WEIGHT,
            recommendations: default_recommendations(),
        }
    }
}

/// The advisory strings shown with every assessment.
pub fn default_recommendations() -> Vec<NonEmptyText> {
    DEFAULT_RECOMMENDATIONS
        .iter()
        .filter_map(|r| NonEmptyText::new(r).ok())
        .collect()
}

/// Parse the result limit from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_MAX_RESULTS`].
pub fn max_results_from_env_value(value: Option<String>) -> EngineResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let parsed = value
        .map(|v| {
            v.parse::<usize>().map_err(|_| {
                AssessmentError::InvalidConfig(format!("max results is not a whole number: {v}"))
            })
        })
        .transpose()?;

    match parsed {
        Some(0) => Err(AssessmentError::InvalidConfig(
            "max results must be at least 1".into(),
        )),
        Some(n) => Ok(n),
        None => Ok(DEFAULT_MAX_RESULTS),
    }
}

/// Parse the minimum match score from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_MIN_MATCH_SCORE`].
pub fn min_match_score_from_env_value(value: Option<String>) -> EngineResult<Probability> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let Some(v) = value else {
        return Ok(Probability::clamped(DEFAULT_MIN_MATCH_SCORE));
    };

    let raw = v.parse::<f64>().map_err(|_| {
        AssessmentError::InvalidConfig(format!("min match score is not a number: {v}"))
    })?;

    Probability::new(raw)
        .map_err(|e| AssessmentError::InvalidConfig(format!("min match score: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_values() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.max_results(), 3);
        assert_eq!(cfg.min_match_score(), Probability::ZERO);
        assert_eq!(cfg.recommendations().len(), 4);
        assert_eq!(
            cfg.recommendations()[0].as_str(),
            "Consult with a healthcare professional for proper diagnosis"
        );
    }

    #[test]
    fn rejects_zero_max_results() {
        let err = EngineConfig::default()
            .with_max_results(0)
            .expect_err("zero is invalid");
        assert!(matches!(err, AssessmentError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_bad_weights() {
        let recs = default_recommendations();
        assert!(EngineConfig::new(3, Probability::ZERO, -0.1, 0.7, recs.clone()).is_err());
        assert!(EngineConfig::new(3, Probability::ZERO, f64::NAN, 0.7, recs.clone()).is_err());
        assert!(EngineConfig::new(3, Probability::ZERO, 0.0, 0.0, recs.clone()).is_err());
        assert!(EngineConfig::new(3, Probability::ZERO, 0.0, 1.0, recs).is_ok());
    }

    #[test]
    fn max_results_env_value_defaults_when_blank() {
        assert_eq!(max_results_from_env_value(None).unwrap(), 3);
        assert_eq!(max_results_from_env_value(Some("  ".into())).unwrap(), 3);
        assert_eq!(max_results_from_env_value(Some(" 5 ".into())).unwrap(), 5);
    }

    #[test]
    fn max_results_env_value_rejects_garbage() {
        assert!(max_results_from_env_value(Some("three".into())).is_err());
        assert!(max_results_from_env_value(Some("0".into())).is_err());
        assert!(max_results_from_env_value(Some("-2".into())).is_err());
    }

    #[test]
    fn min_match_score_env_value_validates_range() {
        assert_eq!(
            min_match_score_from_env_value(None).unwrap(),
            Probability::ZERO
        );
        assert_eq!(
            min_match_score_from_env_value(Some("0.4".into()))
                .unwrap()
                .value(),
            0.4
        );
        assert!(min_match_score_from_env_value(Some("1.4".into())).is_err());
        assert!(min_match_score_from_env_value(Some("lots".into())).is_err());
    }
}
