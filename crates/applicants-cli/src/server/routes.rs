//! Request handlers for the applicants REST API.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use tracing::{debug, info};

use applicants_core::{ApplicantDraft, ApplicantId, ApplicantPatch, ApplicantRecord};

use super::AppState;
use super::error::ApiError;

pub const UPDATED: &str = "Applicant was updated successfully";
pub const DELETED: &str = "Applicant deleted successfully!";

fn parse_id(raw: &str) -> Result<ApplicantId, ApiError> {
    raw.parse().map_err(ApiError::from)
}

pub async fn list_applicants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ApplicantRecord>>, ApiError> {
    let records = state.store.scan_all().await?;
    debug!(count = records.len(), "Listed applicants");
    Ok(Json(records))
}

/// Responds with the record, or `null` when the id is unknown.
pub async fn get_applicant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Option<ApplicantRecord>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.get(id).await?))
}

pub async fn create_applicant(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ApplicantDraft>, JsonRejection>,
) -> Result<Json<ApplicantRecord>, ApiError> {
    let Json(draft) = payload?;
    let record = state.store.insert(&draft).await?;
    info!(id = %record.id, "Created applicant");
    Ok(Json(record))
}

pub async fn update_applicant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<ApplicantPatch>, JsonRejection>,
) -> Result<Json<&'static str>, ApiError> {
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    state.store.update(id, &patch).await?;
    info!(%id, "Updated applicant");
    Ok(Json(UPDATED))
}

pub async fn delete_applicant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<&'static str>, ApiError> {
    let id = parse_id(&id)?;
    state.store.delete(id).await?;
    info!(%id, "Deleted applicant");
    Ok(Json(DELETED))
}
