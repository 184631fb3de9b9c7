//! Middleware components
//!
//! This module contains the error reporting wrapper every entity handler is
//! mounted through.

pub mod error_reporting;

pub use error_reporting::{error_response, report_errors, ErrorResponse};
