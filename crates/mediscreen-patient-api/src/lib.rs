//! # Patient REST API
//!
//! HTTP adapter over [`PatientService`].
//!
//! Handles:
//! - routing with axum
//! - JSON and form-encoded request bodies
//! - translating service errors into status codes
//!
//! No business rules live here; every decision is made by the service.

#![warn(rust_2018_idioms)]

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use mediscreen_patient_core::{
    DynStore, Patient, PatientCandidate, PatientError, PatientId, PatientService,
};

/// Service shared by every handler.
pub type SharedService = Arc<PatientService<DynStore>>;

/// Application state for the REST API server.
#[derive(Clone)]
struct AppState {
    service: SharedService,
}

/// Build the router with every patient route mounted.
pub fn router(service: SharedService) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/health", get(health))
        .route("/api/patient/find/:id", get(find_patient_by_id))
        .route("/api/patient/finder/:family_name", get(find_patient_by_family_name))
        .route("/api/patient/list", get(list_patients))
        .route("/api/patient/validate", post(validate_patient))
        .route("/api/patient/update/:id", post(update_patient))
        .route("/api/patient/delete/:id", post(delete_patient))
        .route("/patient/add", post(add_patient))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// =========================================================================
// Error mapping
// =========================================================================

/// Service error on its way out as an HTTP response.
///
/// - `NotFound` → 404 with the error message
/// - `InvalidInput` → 400 with the validation reason
/// - anything else → 500, cause logged
#[derive(Debug)]
pub struct ApiError(PatientError);

impl From<PatientError> for ApiError {
    fn from(e: PatientError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PatientError::NotFound(_) => StatusCode::NOT_FOUND,
            PatientError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            other => {
                tracing::error!("Patient store error: {:?}", other);
                return (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response();
            }
        };
        (status, self.0.to_string()).into_response()
    }
}

// =========================================================================
// Handlers
// =========================================================================

#[derive(Debug, Serialize)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Mediscreen patient API is alive".into(),
    })
}

async fn find_patient_by_id(
    State(state): State<AppState>,
    Path(id): Path<PatientId>,
) -> Result<Json<Patient>, ApiError> {
    tracing::debug!("Find patient by id request received, id: {}", id);
    let patient = state.service.find_by_id(id)?;
    Ok(Json(patient))
}

async fn find_patient_by_family_name(
    State(state): State<AppState>,
    Path(family_name): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    tracing::debug!(
        "Find patient by family name request received, family name: {}",
        family_name
    );
    let patient = state.service.find_by_family_name(&family_name)?;
    Ok(Json(patient))
}

/// 204 when there are no patients, otherwise 200 with the list.
async fn list_patients(State(state): State<AppState>) -> Result<Response, ApiError> {
    let patients = state.service.list_all()?;
    if patients.is_empty() {
        tracing::debug!("Get all patients request processed, no patients found");
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    tracing::debug!(
        "Get all patients request processed, patients count: {}",
        patients.len()
    );
    Ok(Json(patients).into_response())
}

async fn validate_patient(
    State(state): State<AppState>,
    Json(candidate): Json<PatientCandidate>,
) -> Result<Json<Patient>, ApiError> {
    tracing::debug!("Validate patient request received, patient: {:?}", candidate);
    let patient = state.service.create(&candidate)?;
    Ok(Json(patient))
}

async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<PatientId>,
    Json(candidate): Json<PatientCandidate>,
) -> Result<Json<Patient>, ApiError> {
    tracing::debug!(
        "Update patient request received, id: {}, patient: {:?}",
        id,
        candidate
    );
    let patient = state.service.update(id, &candidate)?;
    Ok(Json(patient))
}

async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<PatientId>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(id)?;
    tracing::debug!("Deleted patient with id: {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Form fields accepted by `POST /patient/add`.
#[derive(Debug, Deserialize)]
pub struct AddPatientForm {
    pub family: String,
    pub given: String,
    pub dob: NaiveDate,
    pub sex: String,
    pub address: String,
    pub phone: String,
}

impl From<AddPatientForm> for PatientCandidate {
    fn from(form: AddPatientForm) -> Self {
        PatientCandidate::new(form.family, form.given)
            .with_birthdate(form.dob)
            .with_sex(form.sex)
            .with_address(form.address)
            .with_phone(form.phone)
    }
}

async fn add_patient(
    State(state): State<AppState>,
    Form(form): Form<AddPatientForm>,
) -> Result<(StatusCode, &'static str), ApiError> {
    tracing::debug!("Received request to add a patient: {:?}", form);
    let patient = state.service.create(&form.into())?;
    tracing::debug!("Successfully added patient: {:?}", patient);
    Ok((StatusCode::OK, "Patient added"))
}
