//! Domain layer for the cohort LTV reporter.
//!
//! Holds the transaction and aggregate models, calendar-month arithmetic,
//! the shared error type and the CLI settings. Contains no I/O beyond what
//! `clap` needs to parse arguments.

pub mod error;
pub mod models;
pub mod month;
pub mod settings;

pub use error::{CohortError, Result};
