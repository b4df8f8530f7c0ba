//! HTTP request handlers for the report endpoints.
//!
//! One module, one resource. Every handler here follows the same pipeline:
//! deserialize the raw query string, validate it into a typed filter, run
//! the report query, serialize the result. Handlers never build SQL and
//! never branch on the underlying store error.
//!
//! - [`reports`]: the five read-only report endpoints under `/api/reports`

pub mod reports;
