//! API response data models.
//!
//! These structures define the public JSON contract of the reporting API:
//!
//! - [`pagination`]: page/limit arithmetic shared by the paginated reports
//! - [`reports`]: per-report row types and response envelopes
//!
//! All models are annotated with `utoipa` so the OpenAPI document stays in
//! step with what the handlers actually serialize.

pub mod pagination;
pub mod reports;
