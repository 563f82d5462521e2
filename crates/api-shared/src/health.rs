use crate::HealthRes;

/// Simple health service that can be used by both the REST API and the runner binary.
///
/// The engine has no external dependencies, so being able to answer is the whole check.
#[derive(Clone, Copy, Debug)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "MedPredict is alive".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_ok() {
        let res = HealthService::check_health();
        assert!(res.ok);
        assert!(res.message.contains("alive"));
    }
}
