// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Backend API client errors.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport layer error, including response body decoding.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status code.
    #[error("HTTP error: {status} - {body}")]
    Status {
        /// Response status code.
        status: u16,
        /// Response body, or the status reason when the body is unreadable.
        body: String,
    },

    /// The backend answered with a payload this client cannot interpret.
    #[error("Invalid server response: {0}")]
    InvalidResponse(String),

    /// The caller supplied data that cannot be sent to the backend.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A service operation failed; `source` holds the underlying cause.
    #[error("{context}")]
    Service {
        /// What the client was trying to do.
        context: &'static str,
        /// The underlying failure.
        #[source]
        source: Box<ApiError>,
    },
}

impl ApiError {
    pub(crate) fn context(context: &'static str) -> impl FnOnce(ApiError) -> ApiError {
        move |source| {
            tracing::error!(error = %source, "{context}");
            ApiError::Service {
                context,
                source: Box::new(source),
            }
        }
    }

    /// Returns the HTTP status code of the innermost failure, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Service { source, .. } => source.status(),
            _ => None,
        }
    }
}
