//! Database layer for the report queries.
//!
//! All durable data lives in views owned by the database; this layer only
//! ever reads them.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ API handlers │  (validated request parameters)
//! └──────┬───────┘
//!        │
//!        ↓
//! ┌──────────────┐
//! │ db::handlers │  (one query function per report)
//! └──────┬───────┘
//!        │
//!        ↓
//! ┌──────────────┐
//! │ db::statement│  (ViewQuery: SQL text + bind parameters)
//! └──────┬───────┘
//!        │
//!        ↓
//! ┌──────────────┐
//! │  PostgreSQL  │  (vw_* report views)
//! └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: query functions for each report
//! - [`statement`]: the statement builder all queries go through
//! - [`pools`]: primary/replica connection pool handling
//! - [`errors`]: database-specific error types

pub mod errors;
pub mod handlers;
pub mod pools;
pub mod statement;
