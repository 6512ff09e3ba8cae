//! Library crate for userboard.
//!
//! This crate exposes the building blocks of the TUI:
//! - Data access client for the UserBoard HTTP API (`api`)
//! - Application state, shell operations and the update loop (`app`)
//! - Command-line/environment settings (`config`)
//! - Error and result types (`error`)
//! - The creation form and its validation (`form`)
//! - File-backed logging setup (`logging`)
//! - Wire/data types (`model`)
//! - UI rendering and view descriptions (`ui`)
//!
//! It is used by the `userboard` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod model;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, FetchError, Result};
