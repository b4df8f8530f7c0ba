//! Shared helpers for endpoint and lifecycle tests.

pub mod utils;
