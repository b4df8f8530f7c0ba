//! Query parameter validation for the report endpoints.
//!
//! Each helper checks one kind of parameter and yields a [`ParamProblem`] on
//! failure, so an endpoint can collect every violated constraint and report
//! them all at once. Common rules:
//!
//! - an absent or empty parameter falls back to its default and is never an
//!   error
//! - a parameter that is present but malformed is rejected, not silently
//!   defaulted
//! - validation runs before any SQL is built; the statement builder trusts
//!   what comes out of here

use crate::api::models::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE};
use serde::Serialize;
use utoipa::ToSchema;

/// Categories accepted by the inventory risk filter.
pub const ALLOWED_CATEGORIES: &[i32] = &[1, 2, 3];

/// Longest accepted `search` value, in characters, counted before
/// sanitizing.
pub const MAX_SEARCH_LEN: usize = 100;

/// One violated constraint on one query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ParamProblem {
    /// The query parameter at fault
    pub param: &'static str,
    /// What was wrong with it
    pub message: String,
}

impl ParamProblem {
    fn new(param: &'static str, message: impl Into<String>) -> Self {
        Self {
            param,
            message: message.into(),
        }
    }
}

/// Normalize an optional raw parameter: absent and empty are the same.
fn present(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.is_empty())
}

/// Parse `page`. Absent means page 1; present means a full integer >= 1.
pub fn parse_page(raw: Option<&str>) -> Result<i64, ParamProblem> {
    let Some(s) = present(raw) else {
        return Ok(DEFAULT_PAGE);
    };
    match s.parse::<i64>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(ParamProblem::new("page", "debe ser un entero mayor o igual a 1")),
    }
}

/// Parse `limit`. Absent means 10; present means a full integer in
/// `[1, cap]`, where the cap varies by report.
pub fn parse_limit(raw: Option<&str>, cap: i64) -> Result<i64, ParamProblem> {
    let Some(s) = present(raw) else {
        return Ok(DEFAULT_LIMIT);
    };
    match s.parse::<i64>() {
        Ok(limit) if (1..=cap).contains(&limit) => Ok(limit),
        _ => Err(ParamProblem::new("limit", format!("debe ser un entero entre 1 y {}", cap))),
    }
}

/// Check a date parameter against the `YYYY-MM-DD` shape.
///
/// Deliberately shape-only: digits and dashes in the right places. Whether
/// the string names a real calendar day is left to the store, which casts
/// the bound text server-side; `2024-13-40` passes here and fails there.
pub fn parse_date(raw: Option<&str>, param: &'static str) -> Result<Option<String>, ParamProblem> {
    let Some(s) = present(raw) else {
        return Ok(None);
    };
    if is_date_shaped(s) {
        Ok(Some(s.to_string()))
    } else {
        Err(ParamProblem::new(param, "debe tener formato YYYY-MM-DD"))
    }
}

fn is_date_shaped(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'-'
        && b[8..10].iter().all(u8::is_ascii_digit)
}

/// Parse `category_id` against the allow-list.
///
/// Anything outside the list is a validation failure, never silently
/// ignored, including integers that parse fine.
pub fn parse_category_id(raw: Option<&str>) -> Result<Option<i32>, ParamProblem> {
    let Some(s) = present(raw) else {
        return Ok(None);
    };
    match s.parse::<i32>() {
        Ok(id) if ALLOWED_CATEGORIES.contains(&id) => Ok(Some(id)),
        _ => Err(ParamProblem::new("category_id", "debe ser uno de: 1, 2, 3")),
    }
}

/// Validate and sanitize `search`.
///
/// The raw value may be at most [`MAX_SEARCH_LEN`] characters. Every
/// character that is not alphanumeric, `_`, or whitespace is then stripped,
/// shrinking the pattern-matching surface; a value that strips down to
/// nothing means no search at all.
pub fn parse_search(raw: Option<&str>) -> Result<Option<String>, ParamProblem> {
    let Some(s) = present(raw) else {
        return Ok(None);
    };
    if s.chars().count() > MAX_SEARCH_LEN {
        return Err(ParamProblem::new(
            "search",
            format!("no debe superar los {} caracteres", MAX_SEARCH_LEN),
        ));
    }
    let sanitized: String = s
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    if sanitized.is_empty() { Ok(None) } else { Ok(Some(sanitized)) }
}
