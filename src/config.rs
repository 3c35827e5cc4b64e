//! Process-wide client configuration.
//!
//! Configuration is loaded once at process start (from a TOML file or the
//! path named by the `VDP_CONFIG` environment variable) and is read-only
//! afterwards. Authentication secrets live in the `[credentials]` table; all
//! of them are optional at load time and the strategy that needs a missing
//! secret fails when it is selected.
//!
//! ```toml
//! url = "https://sandbox.api.visa.com"
//! loglevel = "ERROR"
//! logfile = "vdp-client.log"
//! timeout_secs = 30
//!
//! [credentials]
//! username = "app-user-id"
//! password = "app-password"
//! cert_path = "/etc/vdp/cert.pem"
//! key_path = "/etc/vdp/key.pem"
//! api_key = "public-api-key"
//! shared_secret = "token-shared-secret"
//! ```

use std::{fs, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::error::{Result, VdpError};

/// Environment variable naming the configuration file path for
/// [`VdpConfig::load`].
pub const CONFIG_PATH_ENV: &str = "VDP_CONFIG";

/// Logging verbosity.
///
/// `ERROR` logs failed calls only. `INFO` adds one request and one response
/// line per call (method, URL, status code). `DEBUG` additionally records
/// headers and bodies; it is sensitive and must be opted into explicitly.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Per-call request/response lines.
    Info,
    /// Failed calls only (default).
    #[default]
    Error,
    /// Full headers and bodies. Sensitive, opt-in only.
    Debug,
}

/// Authentication-strategy secrets.
///
/// `username`/`password`/`cert_path`/`key_path` belong to the certificate
/// strategy, `api_key`/`shared_secret` to the x-pay-token strategy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    /// Basic-auth user id for certificate authentication.
    pub username: Option<String>,
    /// Basic-auth password for certificate authentication.
    pub password: Option<String>,
    /// Path to the PEM-encoded client certificate.
    pub cert_path: Option<String>,
    /// Path to the PEM-encoded client private key.
    pub key_path: Option<String>,
    /// Public API key for token authentication (sent as a query parameter).
    pub api_key: Option<String>,
    /// Shared secret for computing the `x-pay-token` header.
    pub shared_secret: Option<String>,
}

/// Process-wide client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct VdpConfig {
    /// Base API URL, e.g. `https://sandbox.api.visa.com`. Must be HTTPS.
    pub url: String,

    /// Logging verbosity. Defaults to [`LogLevel::Error`].
    #[serde(default)]
    pub loglevel: LogLevel,

    /// Path of the append-only log file.
    #[serde(default = "default_logfile")]
    pub logfile: String,

    /// Per-call request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Authentication-strategy secrets.
    #[serde(default)]
    pub credentials: Credentials,
}

impl VdpConfig {
    /// Creates a configuration with the given base URL and all defaults.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            loglevel: LogLevel::default(),
            logfile: default_logfile(),
            timeout_secs: default_timeout_secs(),
            credentials: Credentials::default(),
        }
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`VdpError::Config`] if the TOML is malformed or validation
    /// fails.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|e| VdpError::Config(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`VdpError::Config`] if the file cannot be read or its
    /// contents are invalid.
    pub fn from_file(path: &str) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| VdpError::Config(format!("cannot read config file '{path}': {e}")))?;
        Self::from_toml(&raw)
    }

    /// Loads configuration from the file named by the `VDP_CONFIG`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`VdpError::Config`] if the variable is unset or the file is
    /// invalid.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map_err(|_| VdpError::Config(format!("{CONFIG_PATH_ENV} is not set")))?;
        Self::from_file(&path)
    }

    /// Validates the configuration.
    ///
    /// The base URL must parse, use HTTPS and the timeout must be within
    /// 1-300 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`VdpError::Config`] describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.url)
            .map_err(|e| VdpError::Config(format!("invalid base url '{}': {e}", self.url)))?;
        if url.scheme() != "https" {
            return Err(VdpError::Config(format!(
                "base url must use HTTPS, got scheme '{}'",
                url.scheme()
            )));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(VdpError::Config("timeout_secs must be between 1 and 300".to_owned()));
        }
        Ok(())
    }

    /// Returns the per-call request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_logfile() -> String {
    "vdp-client.log".to_owned()
}

fn default_timeout_secs() -> u64 {
    30
}
