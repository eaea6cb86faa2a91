//! # REST API Interface Layer
//!
//! HTTP endpoints for the product catalog, nested under `/api`.
//!
//! | Status | Meaning |
//! |---|---|
//! | 200 | JSON body with a DTO or an `items` envelope |
//! | 204 | write committed, empty body |
//! | 400 | malformed id (text), missing body (empty) or validation errors (JSON) |
//! | 404 | entity missing; option routes name which one was missing |
//! | 500 | commit changed nothing (diagnostic text) or storage fault |

pub mod product_apis;
pub mod product_option_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use tracing::error;
use validator::ValidationErrors;

use crate::domain::ProductError;

pub use product_apis::*;
pub use product_option_apis::*;

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        match self {
            ProductError::InvalidId | ProductError::InvalidOptionId => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            ProductError::MissingPayload => StatusCode::BAD_REQUEST.into_response(),
            ProductError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(validation_body(&errors))).into_response()
            }
            ProductError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ProductError::ProductNotFound | ProductError::ProductOptionNotFound => {
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
            ProductError::CommitFailed(diagnostic) => {
                (StatusCode::INTERNAL_SERVER_ERROR, diagnostic).into_response()
            }
            ProductError::Storage(e) => {
                error!("Storage failure: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Validation errors keyed by wire field names
fn validation_body(errors: &ValidationErrors) -> Value {
    match serde_json::to_value(errors).unwrap_or_default() {
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(field, errors)| (camel_case(&field), errors))
                .collect(),
        ),
        other => other,
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Liveness probe
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
