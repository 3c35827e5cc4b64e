//! VDP Client: a client library for the Visa Developer Platform API family.
//!
//! The VDP exposes many product-specific endpoints (funds transfer,
//! watchlist screening, merchant search, ATM locator, ...) that all share
//! one request-construction and error-handling discipline; only the
//! endpoint path and payload shape differ per product. This crate
//! implements that shared discipline once, as a generic dispatch layer:
//!
//! - **URL assembly**: every endpoint is
//!   `base_url/resource/api/version/method[/path_suffix]`
//!   ([`EndpointDescriptor`]).
//! - **Payload placement**: GET payloads become query parameters, POST/PUT
//!   payloads become JSON bodies with unset fields omitted ([`ApiPayload`]).
//! - **Authentication**: pluggable strategies behind the
//!   [`auth::AuthProvider`] contract — mutual-TLS client certificate
//!   (`ssl`) or a signed `x-pay-token` header (`token`).
//! - **Classification**: every response becomes a [`ResponseEnvelope`];
//!   non-200 statuses raise a typed [`ApiErrorKind`] carrying the full
//!   envelope, with a fixed status mapping (202 timeout, 303 duplicate
//!   transaction, 400 message validation, 401 unauthenticated, 403 access
//!   denied, 404 not found, anything else general).
//! - **Observability**: every outcome is logged through `tracing` before
//!   control returns to the caller ([`init_logging`]).
//!
//! # Quick start
//!
//! ```no_run
//! use serde::Serialize;
//! use vdp_client::{ApiPayload, VdpConfig, products::visadirect};
//!
//! #[derive(Serialize)]
//! struct PushFunds {
//!     amount: String,
//!     #[serde(rename = "recipientPrimaryAccountNumber")]
//!     recipient_pan: String,
//! }
//! impl ApiPayload for PushFunds {}
//!
//! # async fn example() -> vdp_client::Result<()> {
//! let config = VdpConfig::from_file("vdp.toml")?;
//! vdp_client::init_logging(&config)?;
//!
//! let dispatcher = visadirect::push_funds(config)?;
//! let payload = PushFunds {
//!     amount: "1.00".to_owned(),
//!     recipient_pan: "4957030420210496".to_owned(),
//! };
//!
//! match dispatcher.send(Some(&payload)).await {
//!     Ok(envelope) => println!("ok: {}", envelope.response.message),
//!     Err(err) => {
//!         // Typed failures carry the full request/response context.
//!         if let Some(envelope) = err.envelope() {
//!             eprintln!("{}: HTTP {}", err, envelope.response.code);
//!         }
//!         return Err(err);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Retries
//!
//! The dispatcher submits each call exactly once. The remote API signals
//! duplicate transactions (HTTP 303), so blind retries of mutating calls
//! are unsafe; retry policy belongs to the caller, who has the business
//! context to decide whether a retry (after
//! [`ApiErrorKind::Timeout`]) or an escalation (after
//! [`ApiErrorKind::Unauthenticated`]) is appropriate.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod auth;
pub mod config;
pub mod dispatcher;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod logger;
pub mod payload;
pub mod products;
pub mod request;
pub mod transport;

pub use auth::AuthMethod;
pub use config::{Credentials, LogLevel, VdpConfig};
pub use dispatcher::Dispatcher;
pub use endpoint::{EndpointDescriptor, HttpVerb};
pub use envelope::{Message, ResponseEnvelope};
pub use error::{ApiErrorKind, Result, VdpError};
pub use logger::init_logging;
pub use payload::ApiPayload;
pub use request::OutgoingRequest;
pub use transport::{HttpTransport, RawResponse, Transport};
