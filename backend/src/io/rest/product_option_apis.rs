//! # REST API for Product Options
//!
//! Endpoints nested under `/api/products/{id}/options`.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use tracing::info;

use crate::AppState;
use shared::{ProductOptionForCreationDto, ProductOptionForUpdateDto};

/// List the options of a product
pub async fn list_product_options(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    info!("GET /api/products/{}/options", id);

    let service = state.product_service();
    match service.list_options(&id).await {
        Ok(options) => (StatusCode::OK, Json(options)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get one option of a product
pub async fn get_product_option(
    State(state): State<AppState>,
    Path((id, option_id)): Path<(String, String)>,
) -> Response {
    info!("GET /api/products/{}/options/{}", id, option_id);

    let service = state.product_service();
    match service.get_option(&id, &option_id).await {
        Ok(option) => (StatusCode::OK, Json(option)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create an option under a product
pub async fn create_product_option(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<ProductOptionForCreationDto>>,
) -> Response {
    info!("POST /api/products/{}/options - request: {:?}", id, payload);

    let mut service = state.product_service();
    match service.create_option(&id, payload.map(|Json(p)| p)).await {
        Ok(option_id) => (
            StatusCode::NO_CONTENT,
            [(header::LOCATION, format!("/api/products/{}/options/{}", id.trim(), option_id))],
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update an option of a product
pub async fn update_product_option(
    State(state): State<AppState>,
    Path((id, option_id)): Path<(String, String)>,
    payload: Option<Json<ProductOptionForUpdateDto>>,
) -> Response {
    info!("PUT /api/products/{}/options/{} - request: {:?}", id, option_id, payload);

    let mut service = state.product_service();
    match service
        .update_option(&id, &option_id, payload.map(|Json(p)| p))
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete an option of a product
pub async fn delete_product_option(
    State(state): State<AppState>,
    Path((id, option_id)): Path<(String, String)>,
) -> Response {
    info!("DELETE /api/products/{}/options/{}", id, option_id);

    let mut service = state.product_service();
    match service.delete_option(&id, &option_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
