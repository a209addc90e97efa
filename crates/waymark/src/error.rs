// File: src/error.rs
// Purpose: Engine error types

use std::collections::HashMap;
use thiserror::Error;
use waymark_params::ParamValue;

/// Errors raised by path resolution and URL generation
///
/// These are caller/config bugs and therefore fatal to the call.
/// Validating an externally supplied URL never raises: see
/// [`UrlValidation`](crate::url::UrlValidation), which returns errors as
/// data so a UI can display them.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NavError {
    /// The requested path does not resolve against the route tree, or
    /// parameter validation failed while generating a URL
    #[error("{message}")]
    NotFound {
        message: String,
        /// The full requested path
        path: Vec<String>,
        /// The raw parameters supplied to the call, when available
        params: Option<HashMap<String, ParamValue>>,
    },

    /// Segment input that could not have come from the path builder
    /// (empty or slash-containing segment names)
    #[error("{message}")]
    InvalidPath { message: String },
}

impl NavError {
    pub(crate) fn not_found(message: impl Into<String>, path: &[String]) -> Self {
        NavError::NotFound {
            message: message.into(),
            path: path.to_vec(),
            params: None,
        }
    }

    /// The path carried by a not-found error, if any
    pub fn path(&self) -> Option<&[String]> {
        match self {
            NavError::NotFound { path, .. } => Some(path),
            NavError::InvalidPath { .. } => None,
        }
    }
}
