//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for the report endpoints
//! - **[`models`]**: Request/response data structures for API communication
//! - **[`validation`]**: Query parameter checks shared by the handlers
//!
//! # API Structure
//!
//! The surface is small and entirely read-only:
//!
//! - **Reports** (`/api/reports/*`): the five cafeteria reports, each a
//!   single GET backed by one reporting view
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`.
//! API documentation is served at `/docs` when the server is running.

pub mod handlers;
pub mod models;
pub mod validation;
