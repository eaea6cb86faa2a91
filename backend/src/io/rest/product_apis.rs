//! # REST API for Product Management
//!
//! Endpoints for listing, retrieving, creating, updating and deleting products.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use tracing::info;

use crate::AppState;
use shared::{ProductForCreationDto, ProductForUpdateDto};

/// Query parameters for the product list endpoint
#[derive(Deserialize, Debug)]
pub struct ProductListQuery {
    /// Case-insensitive name fragment; an empty value still filters
    pub name: Option<String>,
}

/// List products, optionally filtered by name
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Response {
    info!("GET /api/products - query: {:?}", query);

    let service = state.product_service();
    match service.list_products(query.name.as_deref()).await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a product by ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    info!("GET /api/products/{}", id);

    let service = state.product_service();
    match service.get_product(&id).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new product
///
/// A missing or unparsable body arrives as `None` and is rejected by the service.
pub async fn create_product(
    State(state): State<AppState>,
    payload: Option<Json<ProductForCreationDto>>,
) -> Response {
    info!("POST /api/products - request: {:?}", payload);

    let mut service = state.product_service();
    match service.create_product(payload.map(|Json(p)| p)).await {
        Ok(id) => (
            StatusCode::NO_CONTENT,
            [(header::LOCATION, format!("/api/products/{}", id))],
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<ProductForUpdateDto>>,
) -> Response {
    info!("PUT /api/products/{} - request: {:?}", id, payload);

    let mut service = state.product_service();
    match service.update_product(&id, payload.map(|Json(p)| p)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a product and its options
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    info!("DELETE /api/products/{}", id);

    let mut service = state.product_service();
    match service.delete_product(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::io::rest::test_support::{create_product, send, test_router};
    use axum::http::StatusCode;
    use rust_decimal::Decimal;
    use serde_json::Value;
    use shared::{ProductDto, ProductsDto};

    #[tokio::test]
    async fn test_create_then_get_returns_input_fields() {
        let router = test_router().await;
        let body = r#"{"name":"Widget","description":"d","price":10,"deliveryPrice":5}"#;

        let (status, headers, text) = send(&router, "POST", "/api/products", Some(body)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(text.is_empty());

        let location = headers.get("location").unwrap().to_str().unwrap().to_string();
        let (status, _, text) = send(&router, "GET", &location, None).await;
        assert_eq!(status, StatusCode::OK);

        let product: ProductDto = serde_json::from_str(&text).unwrap();
        assert_eq!(format!("/api/products/{}", product.id), location);
        assert_eq!(product.name, "Widget");
        assert_eq!(product.description.as_deref(), Some("d"));
        assert_eq!(product.price, Decimal::new(10, 0));
        assert_eq!(product.delivery_price, Decimal::new(5, 0));
    }

    #[tokio::test]
    async fn test_get_with_malformed_id_is_bad_request() {
        let router = test_router().await;

        let (status, _, text) = send(&router, "GET", "/api/products/not-a-guid", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text, "Invalid Id provided.");
    }

    #[tokio::test]
    async fn test_malformed_id_is_rejected_on_every_product_route() {
        let router = test_router().await;
        let body = r#"{"name":"Widget","price":1,"deliveryPrice":1}"#;

        for (method, body) in [("GET", None), ("PUT", Some(body)), ("DELETE", None)] {
            let (status, _, text) = send(&router, method, "/api/products/1234", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} should reject", method);
            assert_eq!(text, "Invalid Id provided.");
        }
    }

    #[tokio::test]
    async fn test_get_unknown_product_is_not_found() {
        let router = test_router().await;
        let uri = format!("/api/products/{}", uuid::Uuid::new_v4());

        let (status, _, text) = send(&router, "GET", &uri, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_create_without_body_is_bad_request() {
        let router = test_router().await;

        let (status, _, text) = send(&router, "POST", "/api/products", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(text.is_empty());

        let (status, _, _) = send(&router, "POST", "/api/products", Some("null")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_with_invalid_fields_returns_validation_errors() {
        let router = test_router().await;
        let body = format!(r#"{{"name":"{}","price":-1,"deliveryPrice":-2}}"#, "x".repeat(101));

        let (status, _, text) = send(&router, "POST", "/api/products", Some(&body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let errors: Value = serde_json::from_str(&text).unwrap();
        assert!(errors.get("name").is_some());
        assert!(errors.get("price").is_some());
        assert!(errors.get("deliveryPrice").is_some());
    }

    #[tokio::test]
    async fn test_list_orders_by_name_and_filters() {
        let router = test_router().await;
        create_product(&router, "Samsung Galaxy S7").await;
        create_product(&router, "Apple iPhone 6S").await;
        create_product(&router, "Apple iPhone 6S Plus").await;

        let (status, _, text) = send(&router, "GET", "/api/products", None).await;
        assert_eq!(status, StatusCode::OK);
        let all: ProductsDto = serde_json::from_str(&text).unwrap();
        let names: Vec<&str> = all.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Apple iPhone 6S", "Apple iPhone 6S Plus", "Samsung Galaxy S7"]);

        let (_, _, text) = send(&router, "GET", "/api/products?name=galaxy", None).await;
        let filtered: ProductsDto = serde_json::from_str(&text).unwrap();
        assert_eq!(filtered.items.len(), 1);
        assert_eq!(filtered.items[0].name, "Samsung Galaxy S7");

        let (_, _, text) = send(&router, "GET", "/api/products?name=", None).await;
        let empty_filter: ProductsDto = serde_json::from_str(&text).unwrap();
        assert_eq!(empty_filter.items.len(), 3);
    }

    #[tokio::test]
    async fn test_list_with_no_matches_is_ok_with_empty_items() {
        let router = test_router().await;

        let (status, _, text) = send(&router, "GET", "/api/products?name=zzz", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, r#"{"items":[]}"#);
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let router = test_router().await;
        let id = create_product(&router, "Widget").await;
        let uri = format!("/api/products/{}", id);

        let body = r#"{"name":"Widget 2","price":12.5,"deliveryPrice":0}"#;
        let (status, _, _) = send(&router, "PUT", &uri, Some(body)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, _, text) = send(&router, "GET", &uri, None).await;
        let product: ProductDto = serde_json::from_str(&text).unwrap();
        assert_eq!(product.id.to_string(), id);
        assert_eq!(product.name, "Widget 2");
        assert_eq!(product.description, None);
        assert_eq!(product.price, Decimal::new(125, 1));
    }

    #[tokio::test]
    async fn test_update_unknown_product_is_not_found() {
        let router = test_router().await;
        let uri = format!("/api/products/{}", uuid::Uuid::new_v4());
        let body = r#"{"name":"Widget","price":1,"deliveryPrice":1}"#;

        let (status, _, _) = send(&router, "PUT", &uri, Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = send(&router, "PUT", &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_removes_product_and_options() {
        let router = test_router().await;
        let id = create_product(&router, "Phone").await;
        let options_uri = format!("/api/products/{}/options", id);
        for name in ["Gold", "Black"] {
            let body = format!(r#"{{"name":"{}"}}"#, name);
            let (status, _, _) = send(&router, "POST", &options_uri, Some(&body)).await;
            assert_eq!(status, StatusCode::NO_CONTENT);
        }

        let uri = format!("/api/products/{}", id);
        let (status, _, _) = send(&router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _, _) = send(&router, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _, _) = send(&router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
