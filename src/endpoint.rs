//! Endpoint descriptors and HTTP verbs.
//!
//! Every VDP endpoint follows the same path structure:
//! `https://domain/resource/api/version/method`, for example
//! `https://sandbox.api.visa.com/visadirect/fundstransfer/v1/pushfundstransactions`.
//! An optional path suffix carries identifiers that the API expects in the
//! path rather than the body (e.g. a transaction status identifier).

use std::{fmt, str::FromStr};

use crate::error::{Result, VdpError};

/// HTTP verb for a VDP call.
///
/// The remote API family only uses GET, POST and PUT. Parsing any other
/// verb string fails with [`VdpError::InvalidVerb`] before any network
/// activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    /// GET: payload fields become query parameters.
    Get,
    /// POST: payload becomes a JSON body.
    Post,
    /// PUT: payload becomes a JSON body.
    Put,
}

impl HttpVerb {
    /// Returns the canonical verb name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpVerb {
    type Err = VdpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            other => Err(VdpError::InvalidVerb(other.to_owned())),
        }
    }
}

/// Immutable description of one VDP endpoint.
///
/// Fully determines the target URL as
/// `base_url/resource/api/version/method[/path_suffix]`. All fields except
/// `path_suffix` are required and must be non-empty; [`validate`](Self::validate)
/// enforces this before any network activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Base API URL, e.g. `https://sandbox.api.visa.com`.
    pub base_url: String,
    /// VDP resource name, e.g. `visadirect`.
    pub resource: String,
    /// VDP API name within the resource, e.g. `fundstransfer`.
    pub api: String,
    /// API version, e.g. `v1`.
    pub version: String,
    /// Endpoint method name, e.g. `pushfundstransactions`.
    pub method: String,
    /// Optional path suffix for identifiers embedded in the path.
    pub path_suffix: Option<String>,
}

impl EndpointDescriptor {
    /// Creates a descriptor without a path suffix.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        resource: impl Into<String>,
        api: impl Into<String>,
        version: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            resource: resource.into(),
            api: api.into(),
            version: version.into(),
            method: method.into(),
            path_suffix: None,
        }
    }

    /// Appends a path suffix, used when an identifier must be embedded in
    /// the path rather than the body.
    #[must_use]
    pub fn with_path_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.path_suffix = Some(suffix.into());
        self
    }

    /// Assembles the absolute endpoint URL.
    ///
    /// Literal concatenation with `/` separators; no extra separators, no
    /// missing segments.
    #[must_use]
    pub fn url(&self) -> String {
        let mut url = format!(
            "{}/{}/{}/{}/{}",
            self.base_url, self.resource, self.api, self.version, self.method
        );
        if let Some(suffix) = &self.path_suffix {
            url.push('/');
            url.push_str(suffix);
        }
        url
    }

    /// Returns the path portion of the URL, without the base URL.
    ///
    /// This is the `resource_path` input to x-pay-token computation.
    #[must_use]
    pub fn resource_path(&self) -> String {
        let mut path =
            format!("{}/{}/{}/{}", self.resource, self.api, self.version, self.method);
        if let Some(suffix) = &self.path_suffix {
            path.push('/');
            path.push_str(suffix);
        }
        path
    }

    /// Checks that all required fields are non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`VdpError::Config`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("base_url", &self.base_url),
            ("resource", &self.resource),
            ("api", &self.api),
            ("version", &self.version),
            ("method", &self.method),
        ];
        for (name, value) in fields {
            if value.is_empty() {
                return Err(VdpError::Config(format!("endpoint field '{name}' must not be empty")));
            }
        }
        Ok(())
    }
}
