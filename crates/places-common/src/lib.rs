//! Places Common Library
//!
//! Shared types and utilities for the places workspace.
//!
//! # Overview
//!
//! This crate provides functionality used across all places workspace members:
//!
//! - **Logging**: Centralized `tracing` subscriber setup
//! - **Types**: Header-keyed records and the canonical row key
//!
//! # Example
//!
//! ```no_run
//! use places_common::types::canonical_key;
//!
//! let row = csv::StringRecord::from(vec!["6369CW", "Kerkstraat"]);
//! assert_eq!(canonical_key(&row), "6369CW,Kerkstraat");
//! ```
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod logging;
pub mod types;

// Re-export commonly used types
pub use types::{canonical_key, Record};
