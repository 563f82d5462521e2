//! # API REST
//!
//! REST API implementation for MedPredict.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, simulated latency)
//!
//! Uses `api-shared` for request/response types and `medpredict-core` for the engine.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    AssessReq, AssessRes, CatalogRes, ErrorRes, HealthRes, HealthService, SymptomsRes,
};
use medpredict_core::{
    config::{max_results_from_env_value, min_match_score_from_env_value},
    constants::{CATALOG_PATH_ENV, MAX_RESULTS_ENV, MIN_MATCH_SCORE_ENV},
    load_catalog, AssessmentError, AssessmentService, EngineConfig,
};

/// Environment variable holding the artificial delay applied before each assessment.
pub const SIMULATED_LATENCY_ENV: &str = "MEDPREDICT_SIMULATED_LATENCY_MS";

/// Application state for the REST API server.
///
/// The assessment service holds the catalog and engine configuration behind `Arc`s, so cloning
/// the state per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub service: AssessmentService,
    pub simulated_latency: Duration,
}

impl AppState {
    pub fn new(service: AssessmentService) -> Self {
        Self {
            service,
            simulated_latency: Duration::ZERO,
        }
    }

    pub fn with_simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }

    /// Resolve state from environment variables.
    ///
    /// # Environment Variables
    /// - `MEDPREDICT_CATALOG_PATH`: catalog YAML override (default: builtin catalog)
    /// - `MEDPREDICT_MAX_RESULTS`: result limit (default: 3)
    /// - `MEDPREDICT_MIN_MATCH_SCORE`: minimum match score (default: 0.0)
    /// - `MEDPREDICT_SIMULATED_LATENCY_MS`: artificial delay in milliseconds (default: 0)
    ///
    /// # Errors
    /// Returns an error if the catalog cannot be loaded or any value fails to parse.
    pub fn from_env() -> anyhow::Result<Self> {
        let catalog_path = std::env::var(CATALOG_PATH_ENV).ok().map(PathBuf::from);
        let catalog = load_catalog(catalog_path.as_deref())?;

        let max_results = max_results_from_env_value(std::env::var(MAX_RESULTS_ENV).ok())?;
        let min_match_score =
            min_match_score_from_env_value(std::env::var(MIN_MATCH_SCORE_ENV).ok())?;
        let cfg = EngineConfig::default()
            .with_max_results(max_results)?
            .with_min_match_score(min_match_score);

        let latency =
            simulated_latency_from_env_value(std::env::var(SIMULATED_LATENCY_ENV).ok())?;

        tracing::info!(
            "catalog: {} conditions, max results: {}, min match score: {}, simulated latency: {:?}",
            catalog.len(),
            cfg.max_results(),
            cfg.min_match_score().value(),
            latency
        );

        let service = AssessmentService::new(Arc::new(catalog), Arc::new(cfg));
        Ok(Self::new(service).with_simulated_latency(latency))
    }
}

/// Parse the simulated latency from an optional millisecond value.
///
/// If `value` is `None` or empty/whitespace, no delay is applied.
pub fn simulated_latency_from_env_value(value: Option<String>) -> anyhow::Result<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        Some(v) => {
            let ms: u64 = v.parse().map_err(|_| {
                anyhow::anyhow!("{SIMULATED_LATENCY_ENV} is not a whole number: {v}")
            })?;
            Ok(Duration::from_millis(ms))
        }
        None => Ok(Duration::ZERO),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_symptoms, list_catalog, assess),
    components(schemas(
        HealthRes,
        SymptomsRes,
        CatalogRes,
        api_shared::ConditionRes,
        AssessReq,
        AssessRes,
        api_shared::RankedConditionRes,
        ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI and permissive CORS.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/symptoms", get(list_symptoms))
        .route("/catalog", get(list_catalog))
        .route("/assess", post(assess))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

type ApiError = (StatusCode, Json<ErrorRes>);

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/symptoms",
    responses(
        (status = 200, description = "Known symptom names", body = SymptomsRes)
    )
)]
/// List the symptom vocabulary in intake-form order.
async fn list_symptoms() -> Json<SymptomsRes> {
    Json(SymptomsRes::vocabulary())
}

#[utoipa::path(
    get,
    path = "/catalog",
    responses(
        (status = 200, description = "Conditions the engine ranks against", body = CatalogRes)
    )
)]
#[axum::debug_handler]
async fn list_catalog(State(state): State<AppState>) -> Json<CatalogRes> {
    Json(CatalogRes::from(state.service.catalog()))
}

#[utoipa::path(
    post,
    path = "/assess",
    request_body = AssessReq,
    responses(
        (status = 200, description = "Assessment result", body = AssessRes),
        (status = 400, description = "Invalid intake", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Assess a symptom intake
///
/// Applies the configured simulated latency, converts the request into an intake record and
/// runs the engine. Validation failures are returned as `400` with a message suitable for
/// showing to the user.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - the body is not a well-formed `AssessReq`,
/// - no symptoms were selected,
/// - a symptom, gender, duration or severity value is unknown,
/// - the age is negative,
/// - `max_results` is zero.
#[axum::debug_handler]
async fn assess(
    State(state): State<AppState>,
    body: Result<Json<AssessReq>, JsonRejection>,
) -> Result<Json<AssessRes>, ApiError> {
    let Json(req) = body.map_err(rejection_response)?;

    if !state.simulated_latency.is_zero() {
        tokio::time::sleep(state.simulated_latency).await;
    }

    let intake = req.to_intake().map_err(error_response)?;

    let result = match req.max_results {
        Some(max_results) => {
            let cfg = state
                .service
                .config()
                .clone()
                .with_max_results(max_results)
                .map_err(error_response)?;
            medpredict_core::assess(&intake, state.service.catalog().conditions(), &cfg)
        }
        None => state.service.assess(&intake),
    };

    match result {
        Ok(result) => Ok(Json(AssessRes::from_result(&result))),
        Err(e) => Err(error_response(e)),
    }
}

fn rejection_response(rejection: JsonRejection) -> ApiError {
    tracing::debug!("rejected assessment body: {}", rejection.body_text());
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorRes {
            error: rejection.body_text(),
        }),
    )
}

fn error_response(err: AssessmentError) -> ApiError {
    match err {
        AssessmentError::InvalidInput(msg) | AssessmentError::InvalidConfig(msg) => {
            tracing::debug!("rejected assessment request: {}", msg);
            (StatusCode::BAD_REQUEST, Json(ErrorRes { error: msg }))
        }
        other => {
            tracing::error!("Assessment error: {:?}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorRes {
                    error: "Internal error".into(),
                }),
            )
        }
    }
}
