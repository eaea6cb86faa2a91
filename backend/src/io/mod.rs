//! # IO Module
//!
//! Interface layer between HTTP clients and the domain logic.
//!
//! Translates requests into [`ProductService`](crate::domain::ProductService)
//! calls and domain outcomes into HTTP responses. No business rules live here.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: axum handlers for products and product options
//! - **Error Translation**: [`ProductError`](crate::domain::ProductError) to status codes
//! - **Request Logging**: one line per request with method and path

pub mod rest;

pub use rest::*;
