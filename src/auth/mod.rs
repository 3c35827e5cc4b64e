//! Pluggable request authentication.
//!
//! The dispatcher consumes authentication through the [`AuthProvider`]
//! contract: given the endpoint metadata and the serialized payload, a
//! provider returns an [`AuthAugmentation`] partitioned by where it applies:
//! headers to merge into the request, request-level options (basic auth,
//! extra query parameters) and session-level options (TLS client identity).
//!
//! Two strategies exist:
//! - [`certificate::CertificateAuth`] (`auth_method = ssl`): mutual-TLS
//!   client certificate plus HTTP basic auth.
//! - [`token::XPayTokenAuth`] (`auth_method = token`): a signed
//!   `x-pay-token` header computed from the shared secret, the resource
//!   path, the query string and the payload, plus an `apikey` query
//!   parameter.

use std::{fmt, str::FromStr};

use crate::{
    config::Credentials,
    endpoint::EndpointDescriptor,
    error::{Result, VdpError},
};

pub mod certificate;
pub mod token;

pub use certificate::CertificateAuth;
pub use token::XPayTokenAuth;

/// Authentication strategy selector.
///
/// Parsing any string other than `ssl` or `token` fails with
/// [`VdpError::InvalidAuthMethod`] before any network activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Certificate-based transport authentication (`ssl`).
    Ssl,
    /// Signed-token header authentication (`token`).
    Token,
}

impl AuthMethod {
    /// Returns the configuration name of this strategy.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ssl => "ssl",
            Self::Token => "token",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMethod {
    type Err = VdpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ssl" => Ok(Self::Ssl),
            "token" => Ok(Self::Token),
            other => Err(VdpError::InvalidAuthMethod(other.to_owned())),
        }
    }
}

/// Input to an authentication provider: the endpoint being called and the
/// serialized payload as it will go on the wire.
#[derive(Debug)]
pub struct AuthContext<'a> {
    /// The endpoint being called.
    pub endpoint: &'a EndpointDescriptor,
    /// Query parameters of the request built so far.
    pub query: &'a [(String, String)],
    /// Serialized JSON body, if the verb carries one.
    pub body: Option<&'a str>,
}

/// Request-level authentication options.
#[derive(Debug, Default)]
pub struct RequestOptions {
    /// HTTP basic auth credentials.
    pub basic_auth: Option<(String, String)>,
    /// Extra query parameters to append (e.g. `apikey`).
    pub query: Vec<(String, String)>,
}

/// Session-level authentication options, applied when the transport session
/// is created.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// PEM bundle (certificate + private key) for the TLS client identity.
    pub identity_pem: Option<Vec<u8>>,
}

/// Additions an authentication strategy makes to an outgoing request,
/// partitioned by where they apply.
#[derive(Debug, Default)]
pub struct AuthAugmentation {
    /// Headers to merge into the request headers.
    pub headers: Vec<(String, String)>,
    /// Per-request options.
    pub request: RequestOptions,
    /// Per-session options.
    pub session: SessionOptions,
}

/// Contract between the dispatcher and an authentication strategy.
pub trait AuthProvider: Send + Sync {
    /// Computes the authentication additions for one outgoing request.
    ///
    /// # Errors
    ///
    /// Returns [`VdpError::Config`] when required strategy secrets are
    /// missing or unreadable. Never performs network activity.
    fn augment(&self, ctx: &AuthContext<'_>) -> Result<AuthAugmentation>;
}

/// Resolves the provider for the configured strategy.
pub(crate) fn provider_for(
    method: AuthMethod,
    credentials: &Credentials,
) -> Result<Box<dyn AuthProvider>> {
    match method {
        AuthMethod::Ssl => Ok(Box::new(CertificateAuth::from_credentials(credentials)?)),
        AuthMethod::Token => Ok(Box::new(XPayTokenAuth::from_credentials(credentials)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_method_parsing() {
        assert_eq!("ssl".parse::<AuthMethod>().unwrap(), AuthMethod::Ssl);
        assert_eq!("token".parse::<AuthMethod>().unwrap(), AuthMethod::Token);
        assert!(matches!(
            "bogus".parse::<AuthMethod>().unwrap_err(),
            VdpError::InvalidAuthMethod(m) if m == "bogus"
        ));
    }

    #[test]
    fn provider_resolution_requires_strategy_secrets() {
        let credentials = Credentials::default();
        assert!(provider_for(AuthMethod::Ssl, &credentials).is_err());
        assert!(provider_for(AuthMethod::Token, &credentials).is_err());
    }
}
