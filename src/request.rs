//! Outgoing request assembly.
//!
//! One [`OutgoingRequest`] is built fresh per call and discarded afterwards.
//! The builder attaches the fixed JSON headers and a randomly generated
//! 12-digit `X-Client-Transaction-ID`, and places the payload according to
//! the verb: query parameters for GET, a JSON body for POST/PUT.

use rand::Rng;

use crate::{
    endpoint::{EndpointDescriptor, HttpVerb},
    error::Result,
    payload::ApiPayload,
};

/// Header carrying the per-call client transaction identifier.
pub const TRANSACTION_ID_HEADER: &str = "X-Client-Transaction-ID";

/// An assembled request, ready for authentication augmentation and dispatch.
///
/// Built once per call; after construction it is only mutated to merge in
/// authentication additions (extra headers, extra query parameters, basic
/// auth credentials).
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    /// HTTP verb.
    pub verb: HttpVerb,
    /// Absolute endpoint URL, without query parameters.
    pub url: String,
    /// Request headers.
    pub headers: Vec<(String, String)>,
    /// Query parameters: the GET payload fields plus any authentication
    /// additions (e.g. `apikey`).
    pub query: Vec<(String, String)>,
    /// Serialized JSON body for POST/PUT; `None` for GET or when no payload
    /// was supplied.
    pub body: Option<String>,
    /// HTTP basic auth credentials, set by the certificate strategy.
    pub basic_auth: Option<(String, String)>,
}

impl OutgoingRequest {
    /// Returns the URL with the query string appended, as it goes on the
    /// wire. This is the URL recorded in the response envelope.
    #[must_use]
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, encode_query(&self.query))
        }
    }
}

/// Builds an [`OutgoingRequest`] from an endpoint descriptor, a verb and an
/// optional payload.
///
/// # Errors
///
/// Returns a serialization error if the payload cannot be encoded for the
/// chosen verb.
pub(crate) fn build<P: ApiPayload>(
    endpoint: &EndpointDescriptor,
    verb: HttpVerb,
    payload: Option<&P>,
) -> Result<OutgoingRequest> {
    let (query, body) = match verb {
        HttpVerb::Get => {
            let query = payload.map(ApiPayload::to_query).transpose()?.unwrap_or_default();
            (query, None)
        }
        HttpVerb::Post | HttpVerb::Put => {
            let body = payload.map(ApiPayload::to_body).transpose()?;
            (Vec::new(), body)
        }
    };

    Ok(OutgoingRequest {
        verb,
        url: endpoint.url(),
        headers: vec![
            ("Content-Type".to_owned(), "application/json".to_owned()),
            ("Accept".to_owned(), "application/json".to_owned()),
            (TRANSACTION_ID_HEADER.to_owned(), transaction_id()),
        ],
        query,
        body,
        basic_auth: None,
    })
}

/// Generates the random 12-digit decimal value for the
/// `X-Client-Transaction-ID` header.
///
/// Collision probability is ~1e-12 per call, acceptable for tracing but not
/// a uniqueness guarantee at scale; callers needing guaranteed uniqueness
/// must supply their own idempotency key in the payload.
pub(crate) fn transaction_id() -> String {
    let mut rng = rand::thread_rng();
    (0..12).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect()
}

/// URL-encodes query pairs into a query string.
pub(crate) fn encode_query(pairs: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;
    use crate::payload::ApiPayload;

    #[derive(Serialize)]
    struct Amount {
        amount: String,
        currency: Option<String>,
    }

    impl ApiPayload for Amount {}

    fn endpoint() -> EndpointDescriptor {
        EndpointDescriptor::new(
            "https://sandbox.api.visa.com",
            "visadirect",
            "fundstransfer",
            "v1",
            "pushfundstransactions",
        )
    }

    #[test]
    fn post_places_payload_in_body() {
        let payload = Amount { amount: "1.00".to_owned(), currency: None };
        let request = build(&endpoint(), HttpVerb::Post, Some(&payload)).unwrap();

        assert!(request.query.is_empty());
        assert_eq!(request.body.as_deref(), Some(r#"{"amount":"1.00"}"#));
        assert_eq!(
            request.url,
            "https://sandbox.api.visa.com/visadirect/fundstransfer/v1/pushfundstransactions"
        );
    }

    #[test]
    fn get_places_payload_in_query() {
        let payload = Amount { amount: "1.00".to_owned(), currency: None };
        let request = build(&endpoint(), HttpVerb::Get, Some(&payload)).unwrap();

        assert!(request.body.is_none());
        assert_eq!(request.query, vec![("amount".to_owned(), "1.00".to_owned())]);
        assert_eq!(
            request.full_url(),
            "https://sandbox.api.visa.com/visadirect/fundstransfer/v1/pushfundstransactions?amount=1.00"
        );
    }

    #[test]
    fn missing_payload_yields_no_query_and_no_body() {
        let request = build::<()>(&endpoint(), HttpVerb::Get, None).unwrap();
        assert!(request.query.is_empty());
        assert!(request.body.is_none());
        assert_eq!(request.full_url(), request.url);
    }

    #[test]
    fn fixed_headers_are_attached() {
        let request = build::<()>(&endpoint(), HttpVerb::Post, None).unwrap();
        let header = |name: &str| {
            request
                .headers
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(header("Content-Type"), Some("application/json"));
        assert_eq!(header("Accept"), Some("application/json"));
        assert!(header(TRANSACTION_ID_HEADER).is_some());
    }

    #[test]
    fn transaction_id_is_twelve_decimal_digits() {
        for _ in 0..1000 {
            let id = transaction_id();
            assert_eq!(id.len(), 12, "got '{id}'");
            assert!(id.bytes().all(|b| b.is_ascii_digit()), "got '{id}'");
        }
    }

    #[test]
    fn each_call_gets_a_fresh_transaction_id() {
        let first = build::<()>(&endpoint(), HttpVerb::Post, None).unwrap();
        let second = build::<()>(&endpoint(), HttpVerb::Post, None).unwrap();
        let id = |r: &OutgoingRequest| {
            r.headers
                .iter()
                .find(|(k, _)| k == TRANSACTION_ID_HEADER)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        // 1e-12 collision probability makes an equality here a test bug.
        assert_ne!(id(&first), id(&second));
    }

    #[test]
    fn query_encoding_escapes_reserved_characters() {
        let pairs = vec![("q".to_owned(), "a b&c".to_owned())];
        assert_eq!(encode_query(&pairs), "q=a+b%26c");
    }
}
