//! School CRUD handlers.
//!
//! Each handler validates its input, makes one store call, and maps the
//! outcome through [`ApiError`].

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use school_registry_core::{
    NewSchool, School, SchoolFields, SchoolId, SchoolPatch, ValidationError,
};

use crate::auth::AuthUser;
use crate::error::{ApiError, ErrorMessage, Operation, StatusMessage};
use crate::state::AppState;

/// Parse a path identifier. A malformed id is a validation failure.
fn parse_id(raw: &str, operation: Operation) -> Result<SchoolId, ApiError> {
    raw.parse()
        .map_err(|e| ApiError::validation(operation, ValidationError::from(e)))
}

/// Unwrap a JSON body. An unparseable body is a validation failure.
fn body(
    payload: Result<Json<SchoolFields>, JsonRejection>,
    operation: Operation,
) -> Result<SchoolFields, ApiError> {
    payload
        .map(|Json(fields)| fields)
        .map_err(|rejection| ApiError::validation(operation, rejection.body_text()))
}

/// Create a new school.
#[utoipa::path(
    post,
    path = "/api/schools",
    tag = "Schools",
    request_body = SchoolFields,
    responses(
        (status = 201, description = "School created successfully", body = School),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorMessage),
        (status = 500, description = "Error creating school", body = ErrorMessage)
    ),
    security(("bearerAuth" = []))
)]
pub async fn create_school(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<SchoolFields>, JsonRejection>,
) -> Result<(StatusCode, Json<School>), ApiError> {
    let new_school = NewSchool::try_from(body(payload, Operation::Create)?)
        .map_err(|e| ApiError::validation(Operation::Create, e))?;

    let school = state
        .store
        .insert_school(new_school)
        .map_err(|e| ApiError::from_store(Operation::Create, e))?;

    tracing::info!(
        school_id = %school.id,
        domain = %school.domain,
        subject = %auth.subject,
        "School created"
    );

    Ok((StatusCode::CREATED, Json(school)))
}

/// Retrieve all schools.
#[utoipa::path(
    get,
    path = "/api/schools",
    tag = "Schools",
    responses(
        (status = 200, description = "A list of schools", body = [School]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorMessage),
        (status = 500, description = "Error fetching schools", body = ErrorMessage)
    ),
    security(("bearerAuth" = []))
)]
pub async fn list_schools(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<School>>, ApiError> {
    let schools = state
        .store
        .list_schools()
        .map_err(|e| ApiError::from_store(Operation::List, e))?;

    Ok(Json(schools))
}

/// Retrieve a school by ID.
#[utoipa::path(
    get,
    path = "/api/schools/{id}",
    tag = "Schools",
    params(("id" = String, Path, description = "The ID of the school")),
    responses(
        (status = 200, description = "School found", body = School),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorMessage),
        (status = 404, description = "School not found", body = StatusMessage),
        (status = 500, description = "Error fetching school", body = ErrorMessage)
    ),
    security(("bearerAuth" = []))
)]
pub async fn get_school(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<School>, ApiError> {
    let id = parse_id(&id, Operation::Fetch)?;

    let school = state
        .store
        .get_school(&id)
        .map_err(|e| ApiError::from_store(Operation::Fetch, e))?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(school))
}

/// Update a school by ID.
///
/// Only supplied fields change. `updated_at` is left alone unless the body
/// carries it.
#[utoipa::path(
    put,
    path = "/api/schools/{id}",
    tag = "Schools",
    params(("id" = String, Path, description = "The ID of the school")),
    request_body = SchoolFields,
    responses(
        (status = 200, description = "School updated successfully", body = School),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorMessage),
        (status = 404, description = "School not found", body = StatusMessage),
        (status = 500, description = "Error updating school", body = ErrorMessage)
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_school(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<SchoolFields>, JsonRejection>,
) -> Result<Json<School>, ApiError> {
    let id = parse_id(&id, Operation::Update)?;
    let patch = SchoolPatch::try_from(body(payload, Operation::Update)?)
        .map_err(|e| ApiError::validation(Operation::Update, e))?;

    let school = state
        .store
        .update_school(&id, &patch)
        .map_err(|e| ApiError::from_store(Operation::Update, e))?;

    tracing::info!(school_id = %id, subject = %auth.subject, "School updated");

    Ok(Json(school))
}

/// Delete a school by ID.
#[utoipa::path(
    delete,
    path = "/api/schools/{id}",
    tag = "Schools",
    params(("id" = String, Path, description = "The ID of the school")),
    responses(
        (status = 200, description = "School deleted successfully", body = StatusMessage),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorMessage),
        (status = 404, description = "School not found", body = StatusMessage),
        (status = 500, description = "Error deleting school", body = ErrorMessage)
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_school(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<StatusMessage>, ApiError> {
    let id = parse_id(&id, Operation::Delete)?;

    let school = state
        .store
        .delete_school(&id)
        .map_err(|e| ApiError::from_store(Operation::Delete, e))?;

    tracing::info!(
        school_id = %id,
        domain = %school.domain,
        subject = %auth.subject,
        "School deleted"
    );

    Ok(Json(StatusMessage::new("School deleted successfully")))
}
