// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON endpoints over the tour repository.
//!
//! - `GET /guide/tours` lists the guide's tours, trashed ones included.
//! - `GET /guide/tours/{id}/edit` returns the stored tour and the catalog it refers to.
//! - `POST /guide/tours` creates a tour from a [`SubmissionPayload`].
//! - `POST /guide/tours/{id}` updates a tour; the body `id` must match the path.
//! - `DELETE /guide/tours/{id}` disables and trashes a tour; `POST /guide/tours/{id}/restore`
//!   brings it back as published.
//! - `GET /schema/submission` serves the JSON schema of the payload.
//!
//! The signed-in guide arrives in the `x-guide-id` header.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::ServerConfig;
use crate::model::{Catalog, GuideId, TourId, TourRecord, ValidationErrors};
use crate::store::TourRepository;
use crate::sync::{RejectionKind, SubmissionPayload, SubmissionReceipt, SubmissionRejected};

pub const GUIDE_HEADER: &str = "x-guide-id";

#[derive(Debug, Clone)]
pub struct AppState {
    repository: Arc<Mutex<TourRepository>>,
    config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(repository: TourRepository, config: ServerConfig) -> Self {
        Self { repository: Arc::new(Mutex::new(repository)), config: Arc::new(config) }
    }

    pub fn repository(&self) -> &Arc<Mutex<TourRepository>> {
        &self.repository
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.body_limit();
    Router::new()
        .route("/guide/tours", get(list_tours).post(create_tour))
        .route("/guide/tours/{id}", post(update_tour).delete(delete_tour))
        .route("/guide/tours/{id}/edit", get(edit_tour))
        .route("/guide/tours/{id}/restore", post(restore_tour))
        .route("/schema/submission", get(submission_schema))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[derive(Debug, Clone, Serialize)]
pub struct EditView {
    pub tour: TourRecord,
    pub catalog: Catalog,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "ValidationErrors::is_empty")]
    errors: ValidationErrors,
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("missing or invalid x-guide-id header")]
    Unauthenticated,
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Rejected(#[from] SubmissionRejected),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Rejected(rejected) => match rejected.kind {
                RejectionKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
                RejectionKind::Forbidden => StatusCode::FORBIDDEN,
                RejectionKind::NotFound => StatusCode::NOT_FOUND,
            },
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        debug!(status = status.as_u16(), error = %self, "request rejected");
        let body = match self {
            Self::Rejected(rejected) if rejected.kind == RejectionKind::Validation => ErrorBody {
                message: "The given data was invalid.".to_owned(),
                errors: rejected.errors,
            },
            Self::Rejected(rejected) => {
                ErrorBody { message: rejected.message, errors: ValidationErrors::new() }
            }
            other => ErrorBody { message: other.to_string(), errors: ValidationErrors::new() },
        };
        (status, Json(body)).into_response()
    }
}

pub fn guide_from_headers(headers: &HeaderMap) -> Result<GuideId, HttpError> {
    headers
        .get(GUIDE_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(GuideId::new)
        .ok_or(HttpError::Unauthenticated)
}

pub async fn list_tours(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<TourRecord>>, HttpError> {
    let guide = guide_from_headers(&headers)?;
    Ok(Json(state.repository.lock().await.guide_tours(guide)))
}

pub async fn edit_tour(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Result<Json<EditView>, HttpError> {
    let guide = guide_from_headers(&headers)?;
    let repository = state.repository.lock().await;
    let tour = repository.edit_snapshot(guide, TourId::new(id))?;
    Ok(Json(EditView { tour, catalog: repository.catalog().clone() }))
}

pub async fn create_tour(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SubmissionPayload>,
) -> Result<(StatusCode, Json<SubmissionReceipt>), HttpError> {
    let guide = guide_from_headers(&headers)?;
    let receipt = state.repository.lock().await.create_tour(guide, &payload)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

pub async fn update_tour(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(payload): Json<SubmissionPayload>,
) -> Result<Json<SubmissionReceipt>, HttpError> {
    let guide = guide_from_headers(&headers)?;
    if payload.id != Some(id) {
        return Err(HttpError::BadRequest(format!("body id does not match tour {id}")));
    }
    let receipt = state.repository.lock().await.update_tour(guide, &payload)?;
    Ok(Json(receipt))
}

pub async fn delete_tour(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Result<StatusCode, HttpError> {
    let guide = guide_from_headers(&headers)?;
    state.repository.lock().await.soft_delete(guide, TourId::new(id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn restore_tour(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Result<StatusCode, HttpError> {
    let guide = guide_from_headers(&headers)?;
    state.repository.lock().await.restore(guide, TourId::new(id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn submission_schema() -> Json<schemars::Schema> {
    Json(schemars::schema_for!(SubmissionPayload))
}

#[cfg(test)]
mod tests;
