//! Assessment service: the engine bound to a loaded catalog and configuration.
//!
//! Front ends build one [`AssessmentService`] at startup and share it across requests.

use std::sync::Arc;

use crate::catalog::ConditionCatalog;
use crate::config::EngineConfig;
use crate::engine::{assess, AssessmentResult};
use crate::intake::IntakeRecord;
use crate::EngineResult;

/// Assessment operations bound to a loaded catalog and configuration.
///
/// Both are shared read-only, so the service is cheap to clone into request handlers.
#[derive(Clone, Debug)]
pub struct AssessmentService {
    catalog: Arc<ConditionCatalog>,
    cfg: Arc<EngineConfig>,
}

impl AssessmentService {
    pub fn new(catalog: Arc<ConditionCatalog>, cfg: Arc<EngineConfig>) -> Self {
        Self { catalog, cfg }
    }

    /// Service over the builtin catalog with default configuration.
    pub fn with_builtin_catalog() -> EngineResult<Self> {
        Ok(Self::new(
            Arc::new(ConditionCatalog::builtin()?),
            Arc::new(EngineConfig::default()),
        ))
    }

    /// Assess an intake record. See [`crate::engine::assess`].
    pub fn assess(&self, intake: &IntakeRecord) -> EngineResult<AssessmentResult> {
        assess(intake, self.catalog.conditions(), &self.cfg)
    }

    pub fn catalog(&self) -> &ConditionCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assesses_against_builtin_catalog() {
        let service = AssessmentService::with_builtin_catalog().expect("builtin");
        let intake = IntakeRecord::new(["Headache", "Nausea", "Dizziness"]).expect("intake");

        let result = service.assess(&intake).expect("assess");
        assert_eq!(
            result.top().expect("non-empty").condition.name.as_str(),
            "Migraine"
        );
        assert_eq!(result.recommendations.len(), 4);
    }

    #[test]
    fn clones_share_the_catalog() {
        let service = AssessmentService::with_builtin_catalog().expect("builtin");
        let clone = service.clone();
        assert!(std::ptr::eq(service.catalog(), clone.catalog()));
    }
}
