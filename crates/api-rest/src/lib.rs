//! # API REST
//!
//! REST API implementation for Receita.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON parsing, CORS, error bodies, panic recovery)
//!
//! Uses `api-shared` for wire types and `receita-core` for everything else.

#![warn(rust_2018_idioms)]

pub mod error;

use std::sync::Arc;

use api_shared::{
    CpfReq, DoctorReq, ErrorRes, FormatCpfRes, GeneratePrescriptionReq, HealthRes,
    HealthService, MedicationReq, ValidateCpfRes,
};
use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use receita_core::config::{clinic_label_from_env_value, utc_offset_from_env_value};
use receita_core::{
    cpf, download, render, CoreConfig, DoctorRecord, MedicationEntry, PrescriptionPayload,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state shared across REST API handlers
///
/// Holds the start-up configuration; handlers never read the environment.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<CoreConfig>,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, generate_prescription, format_cpf, validate_cpf),
    components(schemas(
        HealthRes,
        ErrorRes,
        GeneratePrescriptionReq,
        MedicationReq,
        DoctorReq,
        CpfReq,
        FormatCpfRes,
        ValidateCpfRes,
    ))
)]
pub struct ApiDoc;

/// Resolve the core configuration from the process environment.
///
/// # Environment Variables
/// - `RECEITA_UTC_OFFSET`: clinic UTC offset for the printed date (default: "-03:00")
/// - `RECEITA_CLINIC_LABEL`: clinic heading used when the doctor has none
///   (default: "Consultório Médico")
///
/// # Errors
/// Returns an error if the offset cannot be parsed.
pub fn config_from_env() -> anyhow::Result<CoreConfig> {
    let utc_offset = utc_offset_from_env_value(std::env::var("RECEITA_UTC_OFFSET").ok())?;
    let clinic_label = clinic_label_from_env_value(std::env::var("RECEITA_CLINIC_LABEL").ok());
    Ok(CoreConfig::new(utc_offset, clinic_label)?)
}

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health))
        .route(
            "/generate-prescription-pdf",
            post(generate_prescription).options(preflight),
        )
        .route("/cpf/format", post(format_cpf).options(preflight))
        .route("/cpf/validate", post(validate_cpf).options(preflight))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state);

    with_middleware(routes)
}

/// Applies panic recovery and CORS to `routes`.
///
/// CORS is the outer layer so that error responses, including recovered panics, still carry
/// the CORS headers the browser needs to read them.
pub fn with_middleware(routes: Router) -> Router {
    routes
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}

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
    post,
    path = "/generate-prescription-pdf",
    request_body = GeneratePrescriptionReq,
    responses(
        (status = 200, description = "Printable prescription document", content_type = "text/html", body = String),
        (status = 400, description = "Malformed body or missing required fields", body = ErrorRes),
        (status = 500, description = "Rendering failed", body = ErrorRes)
    )
)]
/// Render a prescription as a printable HTML document
///
/// The response body is the document itself (`text/html; charset=utf-8`) with an inline
/// `Content-Disposition` carrying a suggested file name, so the client can open, print or save
/// it directly.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - the body is not valid JSON for the request shape,
/// - patient name, patient CPF or service location is blank, or
/// - no medication has a name.
///
/// Returns `500 Internal Server Error` if the document cannot be produced.
#[axum::debug_handler]
async fn generate_prescription(
    State(state): State<AppState>,
    body: Result<Json<GeneratePrescriptionReq>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = body?;

    tracing::info!(
        document_type = %req.document_type,
        medications = req.medications.len(),
        has_doctor = req.doctor.is_some(),
        "Generating prescription"
    );

    let payload = build_payload(req);
    let html = render::render_today(&payload, &state.cfg)?;
    let file_name = download::file_name(&payload.patient_name, state.cfg.today());

    tracing::info!(bytes = html.len(), "Prescription generated");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            download::content_disposition(&file_name),
        )
        .body(Body::from(html))
        .map_err(|e| ApiError::Internal(format!("failed to build response: {e}")))
}

#[utoipa::path(
    post,
    path = "/cpf/format",
    request_body = CpfReq,
    responses(
        (status = 200, description = "Progressively formatted CPF", body = FormatCpfRes),
        (status = 400, description = "Bad request", body = ErrorRes)
    )
)]
/// Format a partial or complete CPF as the user types
#[axum::debug_handler]
async fn format_cpf(
    body: Result<Json<CpfReq>, JsonRejection>,
) -> Result<Json<FormatCpfRes>, ApiError> {
    let Json(req) = body?;
    Ok(Json(FormatCpfRes {
        formatted: cpf::format(&req.cpf),
    }))
}

#[utoipa::path(
    post,
    path = "/cpf/validate",
    request_body = CpfReq,
    responses(
        (status = 200, description = "Checksum result and formatted CPF", body = ValidateCpfRes),
        (status = 400, description = "Bad request", body = ErrorRes)
    )
)]
/// Check a CPF's digits and check digits
#[axum::debug_handler]
async fn validate_cpf(
    body: Result<Json<CpfReq>, JsonRejection>,
) -> Result<Json<ValidateCpfRes>, ApiError> {
    let Json(req) = body?;
    Ok(Json(ValidateCpfRes {
        valid: cpf::is_valid(&req.cpf),
        formatted: cpf::format(&req.cpf),
    }))
}

/// Answers bare `OPTIONS` requests; real preflights are answered by the CORS layer.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

// Helper function
fn build_payload(req: GeneratePrescriptionReq) -> PrescriptionPayload {
    PrescriptionPayload {
        document_type: req.document_type,
        service_location: req.service_location,
        patient_name: req.patient_name,
        patient_cpf: req.patient_cpf,
        medications: req
            .medications
            .into_iter()
            .map(|m| MedicationEntry {
                name: m.name,
                dosage: m.dosage,
                quantity: m.quantity,
                administration: m.administration,
            })
            .collect(),
        doctor: req.doctor.map(|d| DoctorRecord {
            name: d.name,
            crm: d.crm,
            specialty: d.specialty,
            clinic_name: d.clinic_name,
            clinic_address: d.clinic_address,
            phone: d.phone,
            email: d.email,
        }),
    }
}
