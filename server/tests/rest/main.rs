//! REST API integration tests.
//!
//! Each test drives the full router over an in-memory SQLite database
//! migrated with the workspace migrator.

mod helpers;

mod auth;
mod stories;
