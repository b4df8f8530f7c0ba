//! Statement builder for report queries.
//!
//! Every report reads from one fixed view. [`ViewQuery`] wraps
//! [`sqlx::QueryBuilder`] so handlers can append optional predicates without
//! tracking `$n` placeholder positions by hand: bind indices follow append
//! order automatically, which matters because optional filters change how
//! many binds precede LIMIT/OFFSET.
//!
//! Two rules hold for every statement built here:
//! - view names, column names, and ORDER BY clauses are `&'static str`
//!   constants, never derived from request input
//! - every request-supplied value goes through [`ViewQuery::and_where`] or
//!   [`ViewQuery::paginate`] as a bind parameter, even values that already
//!   passed validation
//!
//! Clauses are appended in a fixed order: base SELECT, WHERE predicates,
//! ORDER BY, LIMIT/OFFSET.

use crate::db::errors::Result;
use crate::types::ViewName;
use sqlx::postgres::PgRow;
use sqlx::query_builder::QueryBuilder;
use sqlx::{Encode, FromRow, PgPool, Postgres, Type};

/// Accumulates one SELECT against a report view.
///
/// Consumed on execution: a built statement cannot be amended or re-run.
pub struct ViewQuery<'args> {
    builder: QueryBuilder<'args, Postgres>,
}

impl<'args> ViewQuery<'args> {
    /// Start a `SELECT *` over a report view.
    ///
    /// The `WHERE 1=1` stem lets every later predicate join with `AND`
    /// regardless of whether it is the first one.
    pub fn select(view: ViewName) -> Self {
        let mut builder = QueryBuilder::new("SELECT * FROM ");
        builder.push(view);
        builder.push(" WHERE 1=1");
        Self { builder }
    }

    /// Start a `SELECT COUNT(*)` over a report view.
    pub fn count(view: ViewName) -> Self {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM ");
        builder.push(view);
        builder.push(" WHERE 1=1");
        Self { builder }
    }

    /// Append `AND <lhs> <bind>`.
    ///
    /// `lhs` is the column and comparison operator (e.g. `"category_id ="`);
    /// the value is always bound, never interpolated.
    pub fn and_where<T>(mut self, lhs: &'static str, value: T) -> Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres>,
    {
        self.builder.push(" AND ");
        self.builder.push(lhs);
        self.builder.push(" ");
        self.builder.push_bind(value);
        self
    }

    /// Append `AND <lhs> <bind>::date`.
    ///
    /// Date filters are bound as text and cast by the server. Validation
    /// only checks the `YYYY-MM-DD` shape, so a string like `2024-13-40`
    /// reaches the store and fails there, at execution.
    pub fn and_where_date(mut self, lhs: &'static str, value: String) -> Self {
        self.builder.push(" AND ");
        self.builder.push(lhs);
        self.builder.push(" ");
        self.builder.push_bind(value);
        self.builder.push("::date");
        self
    }

    /// Append the report's fixed `ORDER BY` clause.
    pub fn order_by(mut self, clause: &'static str) -> Self {
        self.builder.push(" ORDER BY ");
        self.builder.push(clause);
        self
    }

    /// Append `LIMIT <bind> OFFSET <bind>`.
    pub fn paginate(mut self, limit: i64, offset: i64) -> Self {
        self.builder.push(" LIMIT ");
        self.builder.push_bind(limit);
        self.builder.push(" OFFSET ");
        self.builder.push_bind(offset);
        self
    }

    /// The accumulated SQL text, with `$n` placeholders where values were
    /// bound.
    pub fn sql(&self) -> &str {
        self.builder.sql()
    }

    /// Execute and collect all rows as `T`.
    pub async fn fetch_all<T>(mut self, db: &PgPool) -> Result<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
    {
        let rows = self.builder.build_query_as::<T>().fetch_all(db).await?;
        Ok(rows)
    }

    /// Execute and fetch exactly one row as `T`.
    pub async fn fetch_one<T>(mut self, db: &PgPool) -> Result<T>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
    {
        let row = self.builder.build_query_as::<T>().fetch_one(db).await?;
        Ok(row)
    }
}
