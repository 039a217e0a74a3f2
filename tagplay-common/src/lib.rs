//! # tagplay Common Library
//!
//! Shared code for the tagplay daemons including:
//! - Error types
//! - Configuration loading
//! - Debounce filter for repeated tag reads
//! - Tag-to-track mapping

pub mod config;
pub mod debounce;
pub mod error;
pub mod tracks;

pub use error::{Error, Result};
