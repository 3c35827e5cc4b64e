//! The core orchestrator for one outgoing call.
//!
//! A [`Dispatcher`] owns the lifecycle of a single call: build the request,
//! merge in the authentication augmentation, submit once over the
//! transport, and classify the response into a success envelope or a typed
//! error. Product-specific entry points (see [`crate::products`]) are plain
//! constructors fixing the endpoint descriptor; there is no per-product
//! dispatch logic.

use tracing::instrument;

use crate::{
    auth::{self, AuthContext, AuthMethod},
    config::VdpConfig,
    endpoint::{EndpointDescriptor, HttpVerb},
    envelope::ResponseEnvelope,
    error::{ApiErrorKind, Result, VdpError},
    logger,
    payload::ApiPayload,
    request,
    transport::{HttpTransport, Transport},
};

/// Dispatches calls to one VDP endpoint.
///
/// Calls proceed through four states: **Built** (request assembled from
/// configuration, descriptor and payload), **Authenticated** (provider
/// augmentations merged), **Sent** (submitted exactly once, no retries) and
/// **Classified** (success envelope returned, or a typed error raised
/// carrying the envelope).
///
/// ```no_run
/// use vdp_client::{AuthMethod, Dispatcher, EndpointDescriptor, HttpVerb, VdpConfig};
///
/// # async fn example() -> vdp_client::Result<()> {
/// let config = VdpConfig::new("https://sandbox.api.visa.com");
/// let endpoint = EndpointDescriptor::new(
///     &config.url,
///     "visadirect",
///     "fundstransfer",
///     "v1",
///     "pushfundstransactions",
/// );
/// let dispatcher = Dispatcher::new(config, endpoint, HttpVerb::Post, AuthMethod::Ssl)?;
///
/// #[derive(serde::Serialize)]
/// struct PushFunds {
///     amount: String,
/// }
/// impl vdp_client::ApiPayload for PushFunds {}
///
/// let envelope = dispatcher.send(Some(&PushFunds { amount: "1.00".to_owned() })).await?;
/// assert_eq!(envelope.response.code, 200);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Dispatcher<T: Transport = HttpTransport> {
    config: VdpConfig,
    endpoint: EndpointDescriptor,
    verb: HttpVerb,
    auth_method: AuthMethod,
    transport: T,
}

impl Dispatcher<HttpTransport> {
    /// Creates a dispatcher using the HTTPS transport with the configured
    /// per-call timeout.
    ///
    /// # Errors
    ///
    /// Returns [`VdpError::Config`] if the endpoint descriptor has empty
    /// required fields.
    pub fn new(
        config: VdpConfig,
        endpoint: EndpointDescriptor,
        verb: HttpVerb,
        auth_method: AuthMethod,
    ) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout());
        Self::with_transport(config, endpoint, verb, auth_method, transport)
    }

    /// Creates a dispatcher from string verb and auth-method values.
    ///
    /// Convenience for callers holding configuration as strings; fails with
    /// [`VdpError::InvalidVerb`] or [`VdpError::InvalidAuthMethod`] before
    /// any network activity.
    ///
    /// # Errors
    ///
    /// Returns [`VdpError::InvalidVerb`], [`VdpError::InvalidAuthMethod`]
    /// or [`VdpError::Config`].
    pub fn from_parts(
        config: VdpConfig,
        endpoint: EndpointDescriptor,
        verb: &str,
        auth_method: &str,
    ) -> Result<Self> {
        Self::new(config, endpoint, verb.parse()?, auth_method.parse()?)
    }
}

impl<T: Transport> Dispatcher<T> {
    /// Creates a dispatcher with a custom transport.
    ///
    /// Used by tests to substitute a mock transport; production callers use
    /// [`Dispatcher::new`].
    ///
    /// # Errors
    ///
    /// Returns [`VdpError::Config`] if the endpoint descriptor has empty
    /// required fields.
    pub fn with_transport(
        config: VdpConfig,
        endpoint: EndpointDescriptor,
        verb: HttpVerb,
        auth_method: AuthMethod,
        transport: T,
    ) -> Result<Self> {
        endpoint.validate()?;
        Ok(Self { config, endpoint, verb, auth_method, transport })
    }

    /// Returns the endpoint this dispatcher targets.
    #[must_use]
    pub fn endpoint(&self) -> &EndpointDescriptor {
        &self.endpoint
    }

    /// Submits one call with the given payload.
    ///
    /// The payload is placed per the verb: query parameters for GET, a JSON
    /// body for POST/PUT, with unset fields omitted. Every outcome is
    /// logged before this method returns.
    ///
    /// # Errors
    ///
    /// - [`VdpError::Config`] for missing strategy secrets, raised before
    ///   any network activity.
    /// - [`VdpError::Http`] when no response was obtained.
    /// - [`VdpError::Api`] when the remote API answered with a non-200
    ///   status, classified per the fixed mapping (202 timeout, 303
    ///   duplicate transaction, 400 message validation, 401
    ///   unauthenticated, 403 access denied, 404 not found, anything else
    ///   general) and carrying the full [`ResponseEnvelope`].
    #[instrument(skip(self, payload), fields(verb = %self.verb, endpoint = %self.endpoint.resource_path(), auth = %self.auth_method))]
    pub async fn send<P: ApiPayload>(&self, payload: Option<&P>) -> Result<ResponseEnvelope> {
        // Built
        let mut request = request::build(&self.endpoint, self.verb, payload)?;

        // Authenticated
        let provider = auth::provider_for(self.auth_method, &self.config.credentials)?;
        let augmentation = {
            let ctx = AuthContext {
                endpoint: &self.endpoint,
                query: &request.query,
                body: request.body.as_deref(),
            };
            provider.augment(&ctx)?
        };
        request.headers.extend(augmentation.headers);
        request.query.extend(augmentation.request.query);
        request.basic_auth = augmentation.request.basic_auth;

        // Sent
        let raw = self.transport.send(&request, &augmentation.session).await?;

        // Classified
        let envelope = ResponseEnvelope::from_parts(&request, raw);
        logger::log_envelope(&envelope);

        if envelope.response.code == 200 {
            Ok(envelope)
        } else {
            Err(VdpError::Api {
                kind: ApiErrorKind::from_status(envelope.response.code),
                envelope: Box::new(envelope),
            })
        }
    }

    /// Submits one call without a payload.
    ///
    /// Used for endpoints addressed purely by the URL, e.g. transaction
    /// status queries with a path suffix.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn send_empty(&self) -> Result<ResponseEnvelope> {
        self.send::<()>(None).await
    }
}
