//! # Expense Tracker
//!
//! A single-user expense tracker backed by plain text files. The library
//! exposes the backend (domain services, storage, presentation) so the
//! binary stays a thin shell and integration tests can drive the services
//! directly.

pub mod backend;
