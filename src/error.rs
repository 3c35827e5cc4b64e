//! Error types for VDP API calls.
//!
//! Two families of failures exist and are kept distinct:
//!
//! - **Local configuration errors** ([`VdpError::InvalidVerb`],
//!   [`VdpError::InvalidAuthMethod`], [`VdpError::Config`]): raised before any
//!   network activity, never worth retrying.
//! - **Remote-classified errors** ([`VdpError::Api`]): the remote API answered
//!   with a non-200 status. The status code is mapped to an [`ApiErrorKind`]
//!   and the full [`ResponseEnvelope`] travels with the error so the caller
//!   can inspect the original request and the raw response.
//!
//! The library never retries on its own. The remote API signals duplicate
//! transactions via [`ApiErrorKind::DuplicateTransaction`], so blind retries
//! of mutating calls are unsafe; only the caller has the business context to
//! decide.

use std::fmt;

use thiserror::Error;

use crate::envelope::ResponseEnvelope;

/// Result type alias for VDP client operations.
pub type Result<T> = std::result::Result<T, VdpError>;

/// Classification of a non-200 response from the remote API.
///
/// The mapping from status code to kind is total: every code that is not
/// listed explicitly classifies as [`General`](Self::General).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// HTTP 202: the API accepted the request but timed out internally.
    Timeout,
    /// HTTP 303: the transaction was already submitted.
    DuplicateTransaction,
    /// HTTP 400: the request payload failed message validation.
    MessageValidation,
    /// HTTP 401: missing or invalid authentication.
    Unauthenticated,
    /// HTTP 403: authenticated but not permitted for this resource.
    AccessDenied,
    /// HTTP 404: no such endpoint or entity.
    NotFound,
    /// Any other non-200 status code.
    General,
}

impl ApiErrorKind {
    /// Maps an HTTP status code to its error kind.
    ///
    /// Only meaningful for non-200 codes; the dispatcher checks for success
    /// before classifying. Codes outside the explicit table map to
    /// [`General`](Self::General).
    #[must_use]
    pub fn from_status(code: u16) -> Self {
        match code {
            202 => Self::Timeout,
            303 => Self::DuplicateTransaction,
            400 => Self::MessageValidation,
            401 => Self::Unauthenticated,
            403 => Self::AccessDenied,
            404 => Self::NotFound,
            _ => Self::General,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Timeout => "timeout",
            Self::DuplicateTransaction => "duplicate transaction",
            Self::MessageValidation => "message validation failed",
            Self::Unauthenticated => "unauthenticated",
            Self::AccessDenied => "access denied",
            Self::NotFound => "not found",
            Self::General => "general error",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while dispatching a VDP API call.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum VdpError {
    /// The HTTP verb is not one of GET, POST or PUT.
    ///
    /// Raised while parsing a verb string, before any network activity.
    #[error("HTTP verb must be 'GET', 'POST' or 'PUT', got '{0}'")]
    InvalidVerb(String),

    /// The authentication method is not one of the recognized strategies.
    ///
    /// Raised while parsing an auth-method string, before any network
    /// activity. Recognized values are `ssl` and `token`.
    #[error("authentication method must be 'ssl' or 'token', got '{0}'")]
    InvalidAuthMethod(String),

    /// Invalid or incomplete configuration.
    ///
    /// Covers malformed config files, empty endpoint descriptor fields and
    /// missing strategy secrets (certificate paths, shared token secret).
    #[error("configuration error: {0}")]
    Config(String),

    /// Payload serialization failed.
    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The HTTP request could not be completed.
    ///
    /// Wraps [`reqwest::Error`]: connection failures, request timeouts, TLS
    /// errors. Distinct from [`Api`](Self::Api), where the remote API did
    /// answer but with a non-200 status.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote API answered with a non-200 status code.
    ///
    /// Carries the full request/response envelope; inspect
    /// [`ResponseEnvelope::response`] for the raw status, headers and
    /// decoded message.
    #[error("remote API returned HTTP {code}: {kind}", code = .envelope.response.code)]
    Api {
        /// Classified error kind for the response status code.
        kind: ApiErrorKind,
        /// Full request/response context of the failed call.
        envelope: Box<ResponseEnvelope>,
    },
}

impl VdpError {
    /// Returns the classified error kind for remote API errors.
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns the request/response envelope for remote API errors.
    pub fn envelope(&self) -> Option<&ResponseEnvelope> {
        match self {
            Self::Api { envelope, .. } => Some(envelope),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_status_mapping_is_bit_exact() {
        assert_eq!(ApiErrorKind::from_status(202), ApiErrorKind::Timeout);
        assert_eq!(ApiErrorKind::from_status(303), ApiErrorKind::DuplicateTransaction);
        assert_eq!(ApiErrorKind::from_status(400), ApiErrorKind::MessageValidation);
        assert_eq!(ApiErrorKind::from_status(401), ApiErrorKind::Unauthenticated);
        assert_eq!(ApiErrorKind::from_status(403), ApiErrorKind::AccessDenied);
        assert_eq!(ApiErrorKind::from_status(404), ApiErrorKind::NotFound);
    }

    #[test]
    fn unmapped_codes_classify_as_general() {
        for code in [201, 302, 402, 405, 409, 429, 500, 502, 503] {
            assert_eq!(ApiErrorKind::from_status(code), ApiErrorKind::General);
        }
    }

    #[test]
    fn invalid_verb_display() {
        let err = VdpError::InvalidVerb("PATCH".to_owned());
        assert_eq!(err.to_string(), "HTTP verb must be 'GET', 'POST' or 'PUT', got 'PATCH'");
    }

    #[test]
    fn invalid_auth_method_display() {
        let err = VdpError::InvalidAuthMethod("bogus".to_owned());
        assert!(err.to_string().contains("'bogus'"));
    }

    #[test]
    fn api_kind_accessor_on_local_errors() {
        let err = VdpError::Config("missing url".to_owned());
        assert!(err.api_kind().is_none());
        assert!(err.envelope().is_none());
    }
}
