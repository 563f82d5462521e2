//! Input validation utilities.
//!
//! Checks an [`IntakeRecord`] meets the engine's preconditions before any scoring happens.

use crate::intake::IntakeRecord;
use crate::{AssessmentError, EngineResult};

/// Validates that an intake record can be assessed.
///
/// # Errors
///
/// Returns [`AssessmentError::InvalidInput`] if:
/// - no symptoms were reported,
/// - an age is present and negative.
pub fn validate_intake(intake: &IntakeRecord) -> EngineResult<()> {
    if let Some(age) = intake.age {
        if age < 0 {
            return Err(AssessmentError::InvalidInput(format!(
                "age cannot be negative (got {age})"
            )));
        }
    }

    if intake.symptoms.is_empty() {
        return Err(AssessmentError::InvalidInput(
            "select at least one symptom to continue".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_minimal_record() {
        let intake = IntakeRecord::new(["Fever"]).expect("valid symptom");
        assert!(validate_intake(&intake).is_ok());
    }

    #[test]
    fn accepts_zero_age() {
        let intake = IntakeRecord::new(["Fever"]).expect("valid symptom").with_age(0);
        assert!(validate_intake(&intake).is_ok());
    }

    #[test]
    fn rejects_empty_symptoms() {
        let intake = IntakeRecord::new(Vec::<String>::new()).expect("empty is constructible");
        let err = validate_intake(&intake).expect_err("empty symptoms");
        match err {
            AssessmentError::InvalidInput(msg) => assert!(msg.contains("symptom")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_age() {
        let intake = IntakeRecord::new(["Fever"]).expect("valid symptom").with_age(-1);
        let err = validate_intake(&intake).expect_err("negative age");
        match err {
            AssessmentError::InvalidInput(msg) => assert!(msg.contains("age")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn negative_age_reported_even_without_symptoms() {
        let intake = IntakeRecord::new(Vec::<String>::new())
            .expect("empty is constructible")
            .with_age(-5);
        let err = validate_intake(&intake).expect_err("invalid");
        assert!(matches!(err, AssessmentError::InvalidInput(msg) if msg.contains("age")));
    }
}
