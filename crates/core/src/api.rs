//! Framework-agnostic mapping of service results to HTTP status + JSON body.
//!
//! The router only forwards these; internal error details are logged here
//! and never reach the client.

use log::error;
use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::CoreError;

pub const TICKER_NOT_FOUND: &str = "Ticker not found";
pub const LOAD_COMPANIES_FAILED: &str = "Failed to load companies";
pub const RENT_FAILED: &str = "Failed to process rent data";

/// Status code and JSON body ready to be written by the HTTP layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(body) => Self { status: 200, body },
            Err(e) => {
                error!("Failed to serialize response: {e}");
                Self::error(500, "Internal server error")
            }
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
        }
    }

    /// Convert a service error: not-found keeps its own message and a 404,
    /// everything else becomes a 500 with `generic` as the only detail.
    pub fn from_error(err: &CoreError, not_found: &str, generic: &str) -> Self {
        if err.is_not_found() {
            return Self::error(404, not_found);
        }
        error!("{generic}: {err}");
        Self::error(500, generic)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Turn a service result into a response.
pub fn respond<T: Serialize>(
    result: Result<T, CoreError>,
    not_found: &str,
    generic: &str,
) -> ApiResponse {
    match result {
        Ok(payload) => ApiResponse::ok(&payload),
        Err(e) => ApiResponse::from_error(&e, not_found, generic),
    }
}
