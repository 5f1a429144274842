//! Core error types.
//!
//! This module provides:
//! - `error`: Structured error types for method construction and configuration
//!
//! # Re-exports
//!
//! - [`FdmError`] from `error`

pub mod error;

pub use error::FdmError;
