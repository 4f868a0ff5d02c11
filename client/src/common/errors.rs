use thiserror::Error;

/// HTTP status code the backend uses when a slot was taken concurrently.
pub const STATUS_CONFLICT: u16 = 409;

/// Errors produced by calls against the booking backend.
///
/// Every variant carries owned strings so the error can travel through the UI
/// message channel and be compared in tests.
///
/// # Error Categories
///
/// ## Request Execution Errors
/// - [`Transport`] - The request never produced a response (network, timeout)
/// - [`Status`] - The backend answered with a non-2xx status
/// - [`Decode`] - The response body did not match the expected shape
///
/// ## Caller-Initiated
/// - [`Cancelled`] - The caller cancelled the request; treat as a silent no-op
///
/// # Examples
///
/// ```no_run
/// use client::common::errors::ApiError;
///
/// fn describe(error: &ApiError) -> &'static str {
///     if error.is_cancelled() {
///         return "";
///     }
///     if error.is_conflict() {
///         return "slot taken";
///     }
///     "request failed"
/// }
/// ```
///
/// [`Transport`]: ApiError::Transport
/// [`Status`]: ApiError::Status
/// [`Decode`]: ApiError::Decode
/// [`Cancelled`]: ApiError::Cancelled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request failed before a response was received.
    ///
    /// # Fields
    /// - `url`: The URL that was being requested
    /// - `reason`: Transport-level description (connect error, timeout, ...)
    #[error("Request failed: {url} - {reason}")]
    Transport { url: String, reason: String },

    /// The backend answered with a non-success status code.
    ///
    /// `body` holds the raw response text, which some endpoints use as the
    /// user-facing message (authentication in particular).
    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    /// The response body could not be decoded into the expected type.
    #[error("Invalid response from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// The request was cancelled through its cancellation token.
    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// True when the backend rejected the request with `409 Conflict`.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if *status == STATUS_CONFLICT)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    /// Status code for [`ApiError::Status`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body when the backend sent a non-empty one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { body, .. } if !body.trim().is_empty() => Some(body.trim()),
            _ => None,
        }
    }
}

/// Result alias for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;

    fn status(code: u16, body: &str) -> ApiError {
        ApiError::Status {
            method: "POST".to_string(),
            url: "http://localhost:8080/agendamentos".to_string(),
            status: code,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_conflict_detection() {
        assert!(status(409, "").is_conflict());
        assert!(!status(500, "").is_conflict());
        assert!(!ApiError::Cancelled.is_conflict());
    }

    #[test]
    fn test_backend_message_ignores_blank_bodies() {
        assert_none!(status(401, "   ").backend_message());
        assert_eq!(
            status(401, " Credenciais inválidas\n").backend_message(),
            Some("Credenciais inválidas")
        );
        assert_none!(
            ApiError::Transport {
                url: "u".to_string(),
                reason: "r".to_string()
            }
            .backend_message()
        );
    }

    #[test]
    fn test_display_includes_status_and_url() {
        let rendered = status(500, "boom").to_string();
        assert!(rendered.contains("500"));
        assert!(rendered.contains("/agendamentos"));
        assert!(rendered.contains("boom"));
    }

    #[test]
    fn test_status_accessor() {
        assert_some_eq!(status(404, "").status(), 404);
        assert_none!(ApiError::Cancelled.status());
        assert!(ApiError::Cancelled.is_cancelled());
    }
}
