//! Query functions for database access.
//!
//! Unlike a CRUD data layer there are no repositories or transactions here.
//! Every operation is one read-only SELECT against a report view, built with
//! [`crate::db::statement::ViewQuery`] and executed on the read pool.
//!
//! - [`reports`]: one query function per report, plus their filter types

pub mod reports;
