//! Signed-token header authentication (`auth_method = token`).
//!
//! Computes the `x-pay-token` header from the shared secret, a timestamp,
//! the resource path, the query string and the request body:
//!
//! ```text
//! x-pay-token = "xv2:" + ts + ":" + hex(hmac_sha256(secret, ts + resource_path + query_string + body))
//! ```
//!
//! The public `apikey` is appended as a query parameter and is part of the
//! signed query string. Query parameters are sorted by name before signing
//! so both sides derive the same string.

use std::time::SystemTime;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::{AuthAugmentation, AuthContext, AuthProvider, RequestOptions, SessionOptions};
use crate::{
    config::Credentials,
    error::{Result, VdpError},
    request::encode_query,
};

/// Header carrying the signed token.
pub const X_PAY_TOKEN_HEADER: &str = "x-pay-token";

/// x-pay-token strategy.
#[derive(Debug, Clone)]
pub struct XPayTokenAuth {
    api_key: String,
    shared_secret: String,
}

impl XPayTokenAuth {
    /// Builds the strategy from configured credentials.
    ///
    /// # Errors
    ///
    /// Returns [`VdpError::Config`] if `api_key` or `shared_secret` is not
    /// configured.
    pub fn from_credentials(credentials: &Credentials) -> Result<Self> {
        let api_key = credentials
            .api_key
            .clone()
            .ok_or_else(|| VdpError::Config("token auth requires credential 'api_key'".to_owned()))?;
        let shared_secret = credentials.shared_secret.clone().ok_or_else(|| {
            VdpError::Config("token auth requires credential 'shared_secret'".to_owned())
        })?;
        Ok(Self { api_key, shared_secret })
    }

    fn token(&self, timestamp: u64, resource_path: &str, query_string: &str, body: &str) -> String {
        // new_from_slice only fails on invalid key lengths; HMAC accepts any.
        let mut mac = Hmac::<Sha256>::new_from_slice(self.shared_secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(resource_path.as_bytes());
        mac.update(query_string.as_bytes());
        mac.update(body.as_bytes());
        format!("xv2:{timestamp}:{}", hex::encode(mac.finalize().into_bytes()))
    }
}

impl AuthProvider for XPayTokenAuth {
    fn augment(&self, ctx: &AuthContext<'_>) -> Result<AuthAugmentation> {
        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|e| VdpError::Config(format!("system time error: {e}")))?
            .as_secs();

        let mut signed_query: Vec<(String, String)> = ctx.query.to_vec();
        signed_query.push(("apikey".to_owned(), self.api_key.clone()));
        signed_query.sort();

        let token = self.token(
            timestamp,
            &ctx.endpoint.resource_path(),
            &encode_query(&signed_query),
            ctx.body.unwrap_or(""),
        );

        Ok(AuthAugmentation {
            headers: vec![(X_PAY_TOKEN_HEADER.to_owned(), token)],
            request: RequestOptions {
                basic_auth: None,
                query: vec![("apikey".to_owned(), self.api_key.clone())],
            },
            session: SessionOptions::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::EndpointDescriptor;

    fn auth() -> XPayTokenAuth {
        XPayTokenAuth {
            api_key: "public-key".to_owned(),
            shared_secret: "shhh".to_owned(),
        }
    }

    #[test]
    fn missing_secret_is_a_config_error() {
        let credentials =
            Credentials { api_key: Some("key".to_owned()), ..Credentials::default() };
        let err = XPayTokenAuth::from_credentials(&credentials).unwrap_err();
        assert!(err.to_string().contains("shared_secret"));
    }

    #[test]
    fn token_has_xv2_shape() {
        let token = auth().token(1_491_819_372, "visadirect/fundstransfer/v1/m", "apikey=k", "{}");
        let parts: Vec<&str> = token.split(':').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "xv2");
        assert_eq!(parts[1], "1491819372");
        assert_eq!(parts[2].len(), 64);
        assert!(parts[2].bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn token_is_deterministic_for_fixed_inputs() {
        let first = auth().token(1, "r/a/v1/m", "apikey=k", "body");
        let second = auth().token(1, "r/a/v1/m", "apikey=k", "body");
        assert_eq!(first, second);

        let different = auth().token(1, "r/a/v1/m", "apikey=k", "other");
        assert_ne!(first, different);
    }

    #[test]
    fn augment_adds_header_and_apikey_query() {
        let endpoint =
            EndpointDescriptor::new("https://api.visa.com", "visadirect", "fundstransfer", "v1", "m");
        let query = vec![("zip".to_owned(), "94025".to_owned())];
        let ctx = AuthContext { endpoint: &endpoint, query: &query, body: None };

        let augmentation = auth().augment(&ctx).unwrap();
        assert_eq!(augmentation.headers.len(), 1);
        assert_eq!(augmentation.headers[0].0, X_PAY_TOKEN_HEADER);
        assert!(augmentation.headers[0].1.starts_with("xv2:"));
        assert_eq!(
            augmentation.request.query,
            vec![("apikey".to_owned(), "public-key".to_owned())]
        );
        assert!(augmentation.session.identity_pem.is_none());
    }
}
