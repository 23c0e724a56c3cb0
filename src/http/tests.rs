// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use axum::body::{to_bytes, Body};
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tower::ServiceExt;

use super::{
    create_tour, edit_tour, guide_from_headers, router, submission_schema, update_tour, AppState,
    HttpError, GUIDE_HEADER,
};
use crate::config::{ServerConfig, UploadLimits};
use crate::editor::EditSession;
use crate::store::TourRepository;
use crate::sync::{build_submission, SubmissionPayload};

fn state() -> AppState {
    AppState::new(TourRepository::demo(UploadLimits::default()), ServerConfig::default())
}

fn guide(id: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(GUIDE_HEADER, HeaderValue::from_str(id).expect("header value"));
    headers
}

async fn edit_payload(state: &AppState) -> SubmissionPayload {
    let Json(view) = edit_tour(State(state.clone()), Path(1), guide("1")).await.expect("edit view");
    build_submission(&EditSession::from_record(&view.tour, &view.catalog))
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}

#[test]
fn guide_header_must_be_numeric() {
    assert_eq!(guide_from_headers(&guide(" 12 ")).expect("guide").get(), 12);
    assert!(matches!(guide_from_headers(&guide("abc")), Err(HttpError::Unauthenticated)));
    assert!(matches!(guide_from_headers(&HeaderMap::new()), Err(HttpError::Unauthenticated)));
}

#[test]
fn router_builds_with_state() {
    let _router = router(state());
}

#[tokio::test]
async fn edit_view_carries_tour_and_catalog() {
    let state = state();
    let Json(view) = edit_tour(State(state), Path(1), guide("1")).await.expect("edit view");
    assert_eq!(view.tour.id, 1);
    assert_eq!(view.tour.itineraries.len(), 3);
    assert_eq!(view.catalog.location_name(view.tour.details.tour_location_id), Some("Bali"));
}

#[tokio::test]
async fn edit_of_foreign_tour_is_forbidden() {
    let err = edit_tour(State(state()), Path(1), guide("2")).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);

    let err = edit_tour(State(state()), Path(9), guide("1")).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_guide_header_is_unauthorized() {
    let response = edit_tour(State(state()), Path(1), HeaderMap::new()).await.into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_requires_matching_body_id() {
    let state = state();
    let payload = edit_payload(&state).await;

    let err = update_tour(State(state), Path(2), guide("1"), Json(payload)).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_round_trips_edit_view() {
    let state = state();
    let mut payload = edit_payload(&state).await;
    payload.existing_image_ids.retain(|id| *id != 1);

    let Json(receipt) = update_tour(State(state.clone()), Path(1), guide("1"), Json(payload))
        .await
        .expect("update");
    assert_eq!(receipt.tour_id, 1);
    assert!(receipt.created_step_ids.is_empty());

    let repository = state.repository().lock().await;
    let tour = repository.tour(crate::model::TourId::new(1)).expect("stored");
    assert_eq!(tour.images.iter().map(|image| image.id).collect::<Vec<_>>(), vec![2]);
}

#[tokio::test]
async fn validation_failure_is_422_with_field_errors() {
    let state = state();
    let mut payload = edit_payload(&state).await;
    payload.id = None;
    payload.details.tour_duration = 1;
    payload.tour_itineraries[0].activity.clear();

    let response = create_tour(State(state), guide("1"), Json(payload)).await.into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["message"], "The given data was invalid.");
    assert!(body["errors"]["tour_duration"].is_array());
    assert!(body["errors"]["tour_itineraries.0.activity"].is_array());
}

#[tokio::test]
async fn create_answers_201_with_receipt() {
    let state = state();
    let mut payload = edit_payload(&state).await;
    payload.id = None;
    for entry in &mut payload.tour_itineraries {
        entry.id = None;
    }

    let response = create_tour(State(state), guide("5"), Json(payload)).await.into_response();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["tour_id"], 2);
    assert_eq!(body["created_step_ids"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn schema_describes_submission_fields() {
    let Json(schema) = submission_schema().await;
    let json = serde_json::to_value(&schema).expect("schema json");
    let properties = &json["properties"];
    let fields =
        ["tour_itineraries", "existing_image_ids", "tour_images", "tour_categories", "name"];
    for field in fields {
        assert!(properties.get(field).is_some(), "schema lacks {field}");
    }
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    guide: Option<&str>,
    body: Option<Vec<u8>>,
) -> Response {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(guide) = guide {
        request = request.header(GUIDE_HEADER, guide);
    }
    let body = match body {
        Some(bytes) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(bytes)
        }
        None => Body::empty(),
    };
    app.clone().oneshot(request.body(body).expect("request")).await.expect("infallible")
}

fn json_bytes(payload: &SubmissionPayload) -> Vec<u8> {
    serde_json::to_vec(payload).expect("payload json")
}

#[tokio::test]
async fn routes_serve_edit_create_update_and_schema() {
    let state = state();
    let app = router(state.clone());
    let payload = edit_payload(&state).await;

    let response = send(&app, Method::GET, "/guide/tours/1/edit", Some("1"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["tour"]["id"], 1);

    let response =
        send(&app, Method::POST, "/guide/tours/1", Some("1"), Some(json_bytes(&payload))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["tour_id"], 1);

    let create = SubmissionPayload {
        id: None,
        tour_itineraries: payload
            .tour_itineraries
            .iter()
            .cloned()
            .map(|entry| crate::sync::ItineraryEntry { id: None, ..entry })
            .collect(),
        ..payload
    };
    let response =
        send(&app, Method::POST, "/guide/tours", Some("1"), Some(json_bytes(&create))).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(&app, Method::GET, "/schema/submission", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["properties"]["tour_itineraries"].is_object());
}

#[tokio::test]
async fn router_answers_401_without_guide_header() {
    let app = router(state());
    for (method, uri) in [
        (Method::GET, "/guide/tours"),
        (Method::GET, "/guide/tours/1/edit"),
        (Method::DELETE, "/guide/tours/1"),
        (Method::POST, "/guide/tours/1/restore"),
    ] {
        let response = send(&app, method, uri, None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn lifecycle_routes_disable_list_and_restore() {
    let app = router(state());

    let response = send(&app, Method::DELETE, "/guide/tours/1", Some("2"), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&app, Method::DELETE, "/guide/tours/1", Some("1"), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let listed = body_json(send(&app, Method::GET, "/guide/tours", Some("1"), None).await).await;
    assert_eq!(listed[0]["tour_status"], "disabled");
    assert_eq!(listed[0]["deleted"], true);

    let response = send(&app, Method::GET, "/guide/tours/1/edit", Some("1"), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, Method::POST, "/guide/tours/1/restore", Some("1"), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let listed = body_json(send(&app, Method::GET, "/guide/tours", Some("1"), None).await).await;
    assert_eq!(listed[0]["tour_status"], "published");
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn malformed_bodies_are_rejected_before_the_repository() {
    let state = state();
    let app = router(state.clone());
    let mut body = serde_json::to_value(edit_payload(&state).await).expect("payload json");
    body["tour_images"] = serde_json::json!([{ "file_name": "a.jpg", "data": "not base64!" }]);

    let bytes = serde_json::to_vec(&body).expect("body");
    let response = send(&app, Method::POST, "/guide/tours/1", Some("1"), Some(bytes)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response =
        send(&app, Method::POST, "/guide/tours", Some("1"), Some(b"{\"name\":".to_vec())).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let repository = state.repository().lock().await;
    assert_eq!(repository.tours().count(), 1);
    assert_eq!(repository.tour(crate::model::TourId::new(1)).expect("stored").images.len(), 2);
}

#[tokio::test]
async fn bodies_over_the_limit_are_refused() {
    let config = ServerConfig {
        uploads: UploadLimits { create_kib: 1, update_kib: 1 },
        ..ServerConfig::default()
    };
    let state = AppState::new(TourRepository::demo(config.uploads), config);
    let app = router(state.clone());

    let mut payload = edit_payload(&state).await;
    payload.tour_images = vec![crate::sync::NewImageUpload {
        file_name: "big.jpg".to_owned(),
        data: vec![0xAB_u8; 32 * 1024].into(),
    }];
    let response =
        send(&app, Method::POST, "/guide/tours/1", Some("1"), Some(json_bytes(&payload))).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
