//! Request/response envelopes.
//!
//! Every call outcome, success or failure, is represented by a
//! [`ResponseEnvelope`] carrying the full request and response context.
//! Callers always receive an envelope, never a bare error without context.

use serde::Serialize;
use serde_json::Value;

use crate::{request::OutgoingRequest, transport::RawResponse};

/// Placeholder message used when the response carries no content-type
/// header at all and its shape cannot be recognized.
pub const UNRECOGNIZED_RESPONSE: &str = "unrecognized response from remote API";

/// Decoded response message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Message {
    /// The response body decoded as JSON.
    Json(Value),
    /// The raw response text (non-JSON content type, or a JSON content type
    /// whose body failed to parse), or the
    /// [`UNRECOGNIZED_RESPONSE`] placeholder.
    Text(String),
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Record of the request as it went on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct RequestRecord {
    /// Full URL including query parameters.
    pub url: String,
    /// HTTP verb name.
    pub method: String,
    /// Request headers.
    pub headers: Vec<(String, String)>,
    /// Serialized request body, if any.
    pub body: Option<String>,
}

/// Record of the response as received.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseRecord {
    /// HTTP status code.
    pub code: u16,
    /// Response headers.
    pub headers: Vec<(String, String)>,
    /// Decoded response message.
    pub message: Message,
}

/// The canonical result payload of every call.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    /// The request as dispatched.
    pub request: RequestRecord,
    /// The response as received.
    pub response: ResponseRecord,
}

impl ResponseEnvelope {
    /// Combines the dispatched request and the raw transport response into
    /// an envelope, decoding the response message by content type.
    pub(crate) fn from_parts(request: &OutgoingRequest, raw: RawResponse) -> Self {
        let message = decode_message(&raw.headers, raw.body);
        Self {
            request: RequestRecord {
                url: request.full_url(),
                method: request.verb.to_string(),
                headers: request.headers.clone(),
                body: request.body.clone(),
            },
            response: ResponseRecord { code: raw.code, headers: raw.headers, message },
        }
    }
}

/// Decodes the response body according to its content-type header.
///
/// A JSON content type decodes the body into a [`Message::Json`]; any other
/// content type keeps the raw text; a missing content-type header yields the
/// [`UNRECOGNIZED_RESPONSE`] placeholder. Never fails, so classification can
/// proceed regardless of body shape.
fn decode_message(headers: &[(String, String)], body: String) -> Message {
    let content_type = headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
        .map(|(_, value)| value.as_str());

    match content_type {
        Some(ct) if ct.starts_with("application/json") => match serde_json::from_str(&body) {
            Ok(value) => Message::Json(value),
            Err(_) => Message::Text(body),
        },
        Some(_) => Message::Text(body),
        None => Message::Text(UNRECOGNIZED_RESPONSE.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn headers(content_type: Option<&str>) -> Vec<(String, String)> {
        content_type
            .map(|ct| vec![("Content-Type".to_owned(), ct.to_owned())])
            .unwrap_or_default()
    }

    #[test]
    fn json_content_type_decodes_body() {
        let message = decode_message(
            &headers(Some("application/json;charset=UTF-8")),
            r#"{"transactionIdentifier": 234234322342343}"#.to_owned(),
        );
        assert_eq!(message, Message::Json(json!({"transactionIdentifier": 234234322342343u64})));
    }

    #[test]
    fn content_type_lookup_is_case_insensitive() {
        let headers = vec![("content-type".to_owned(), "application/json".to_owned())];
        assert_eq!(decode_message(&headers, "{}".to_owned()), Message::Json(json!({})));
    }

    #[test]
    fn non_json_content_type_keeps_raw_text() {
        let message = decode_message(&headers(Some("text/html")), "<html>error</html>".to_owned());
        assert_eq!(message, Message::Text("<html>error</html>".to_owned()));
    }

    #[test]
    fn malformed_json_body_falls_back_to_text() {
        let message = decode_message(&headers(Some("application/json")), "not json".to_owned());
        assert_eq!(message, Message::Text("not json".to_owned()));
    }

    #[test]
    fn missing_content_type_yields_placeholder() {
        let message = decode_message(&headers(None), "whatever".to_owned());
        assert_eq!(message, Message::Text(UNRECOGNIZED_RESPONSE.to_owned()));
    }
}
