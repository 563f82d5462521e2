//! The assessment engine.
//!
//! [`assess`] maps an intake record to a ranked list of catalog conditions, an overall
//! confidence and a fixed list of recommendations. It is a pure function: no I/O, no clock, no
//! randomness. Identical inputs always produce identical results.
//!
//! Scoring:
//! - `overlap` is the Dice coefficient between reported and associated symptoms,
//!   `2|S ∩ A| / (|S| + |A|)`.
//! - `match_score` is the weighted mean of the candidate's prior probability and `overlap`.
//! - `confidence` is the mean of symptom coverage (share of reported symptoms explained by at
//!   least one returned condition) and the top match score.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use medpredict_types::Probability;

use crate::catalog::ConditionCandidate;
use crate::config::EngineConfig;
use crate::constants::{HIGH_CONFIDENCE_THRESHOLD, MODERATE_CONFIDENCE_THRESHOLD};
use crate::intake::IntakeRecord;
use crate::symptoms::SymptomSet;
use crate::validation::validate_intake;
use crate::EngineResult;

/// A catalog condition together with how well it matches the intake.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedCondition {
    pub condition: ConditionCandidate,
    pub match_score: Probability,
    /// Reported symptoms that also appear in the condition's associated symptoms.
    pub matched_symptoms: SymptomSet,
}

/// Output of a single assessment. Newly built per call and owned by the caller.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssessmentResult {
    /// Ranked non-increasing by match score, ties by name.
    pub conditions: Vec<RankedCondition>,
    pub confidence: Probability,
    pub recommendations: Vec<String>,
}

/// Coarse reading of an assessment's confidence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    High,
    Moderate,
    Low,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: Probability) -> Self {
        let value = confidence.value();
        if value > HIGH_CONFIDENCE_THRESHOLD {
            ConfidenceBand::High
        } else if value > MODERATE_CONFIDENCE_THRESHOLD {
            ConfidenceBand::Moderate
        } else {
            ConfidenceBand::Low
        }
    }

    /// Summary line shown next to the confidence score.
    pub fn summary(&self) -> &'static str {
        match self {
            ConfidenceBand::High => "High confidence prediction",
            ConfidenceBand::Moderate => "Moderate confidence prediction",
            ConfidenceBand::Low => "Low confidence - consider professional consultation",
        }
    }
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.summary())
    }
}

impl AssessmentResult {
    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }

    pub fn top(&self) -> Option<&RankedCondition> {
        self.conditions.first()
    }
}

/// Assess an intake record against a catalog.
///
/// # Errors
///
/// Returns [`crate::AssessmentError::InvalidInput`] if the intake has no symptoms or a negative
/// age. No other failure is possible.
pub fn assess(
    intake: &IntakeRecord,
    catalog: &[ConditionCandidate],
    cfg: &EngineConfig,
) -> EngineResult<AssessmentResult> {
    validate_intake(intake)?;

    let mut ranked: Vec<RankedCondition> = catalog
        .iter()
        .map(|candidate| score_candidate(&intake.symptoms, candidate, cfg))
        .collect();

    ranked.sort_by(compare_ranked);

    let threshold = cfg.min_match_score();
    let best = ranked.first().cloned();
    ranked.retain(|r| r.match_score >= threshold);
    if ranked.is_empty() {
        // Keep the best candidate so a non-empty catalog always yields a result.
        if let Some(best) = best {
            tracing::debug!(
                "no candidate reached min match score {}, keeping {}",
                threshold.value(),
                best.condition.name
            );
            ranked.push(best);
        }
    }

    ranked.truncate(cfg.max_results());

    let confidence = confidence(&intake.symptoms, &ranked);

    tracing::debug!(
        candidates = catalog.len(),
        returned = ranked.len(),
        confidence = confidence.value(),
        "assessment complete"
    );

    Ok(AssessmentResult {
        conditions: ranked,
        confidence,
        recommendations: cfg
            .recommendations()
            .iter()
            .map(|r| r.as_str().to_owned())
            .collect(),
    })
}

fn score_candidate(
    reported: &SymptomSet,
    candidate: &ConditionCandidate,
    cfg: &EngineConfig,
) -> RankedCondition {
    let matched_symptoms: SymptomSet = reported
        .intersection(&candidate.associated_symptoms)
        .copied()
        .collect();

    let overlap = dice(
        matched_symptoms.len(),
        reported.len(),
        candidate.associated_symptoms.len(),
    );

    let weighted = cfg.prior_weight() * candidate.base_probability.value()
        + cfg.overlap_weight() * overlap;
    let total_weight = cfg.prior_weight() + cfg.overlap_weight();

    RankedCondition {
        condition: candidate.clone(),
        match_score: Probability::clamped(weighted / total_weight),
        matched_symptoms,
    }
}

fn dice(matched: usize, reported: usize, associated: usize) -> f64 {
    let denom = reported + associated;
    if denom == 0 {
        return 0.0;
    }
    (2 * matched) as f64 / denom as f64
}

fn confidence(reported: &SymptomSet, ranked: &[RankedCondition]) -> Probability {
    let Some(top) = ranked.first() else {
        return Probability::ZERO;
    };

    let explained: SymptomSet = ranked
        .iter()
        .flat_map(|r| r.matched_symptoms.iter().copied())
        .collect();
    let coverage = if reported.is_empty() {
        0.0
    } else {
        explained.len() as f64 / reported.len() as f64
    };

    Probability::clamped(0.5 * coverage + 0.5 * top.match_score.value())
}

fn compare_ranked(a: &RankedCondition, b: &RankedCondition) -> Ordering {
    b.match_score
        .total_cmp(&a.match_score)
        .then_with(|| a.condition.name.cmp(&b.condition.name))
}
