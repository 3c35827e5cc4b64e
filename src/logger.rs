//! Event logging for completed calls.
//!
//! Every call outcome, success or failure, is handed to [`log_envelope`]
//! before control returns to the caller, so every outcome is observable
//! even if the caller does not log it.
//!
//! [`init_logging`] installs a `tracing` subscriber writing to the
//! configured append-only log file. The default `ERROR` level records only
//! failed calls; `INFO` adds one request and one response line per call;
//! `DEBUG` additionally records headers and bodies and is opt-in because it
//! logs sensitive material.

use std::{fs::OpenOptions, sync::Mutex};

use tracing::{Level, debug, error, info};
use uuid::Uuid;

use crate::{
    config::{LogLevel, VdpConfig},
    envelope::ResponseEnvelope,
    error::{Result, VdpError},
};

/// Installs a file-writing `tracing` subscriber per the configuration.
///
/// Opens `logfile` in append mode and filters at `loglevel`. Call once at
/// process start; applications that install their own subscriber can skip
/// this and still receive the events emitted by [`log_envelope`].
///
/// # Errors
///
/// Returns [`VdpError::Config`] if the log file cannot be opened or a
/// global subscriber is already installed.
pub fn init_logging(config: &VdpConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.logfile)
        .map_err(|e| VdpError::Config(format!("cannot open logfile '{}': {e}", config.logfile)))?;

    let level = match config.loglevel {
        LogLevel::Error => Level::ERROR,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| VdpError::Config(format!("cannot install logger: {e}")))
}

/// Records one completed call.
///
/// Successful calls log at INFO, failed calls at ERROR, each with a fresh
/// correlation id tying the request and response lines together. Headers
/// and bodies go to DEBUG only.
pub(crate) fn log_envelope(envelope: &ResponseEnvelope) {
    let call_id = Uuid::new_v4();

    if envelope.response.code == 200 {
        info!(%call_id, "request: {} {}", envelope.request.method, envelope.request.url);
        info!(%call_id, "response: HTTP {}", envelope.response.code);
    } else {
        error!(%call_id, "request: {} {}", envelope.request.method, envelope.request.url);
        error!(%call_id, "response: HTTP {}", envelope.response.code);
    }

    debug!(%call_id, "request headers: {:?}", envelope.request.headers);
    debug!(%call_id, "request body: {}", envelope.request.body.as_deref().unwrap_or(""));
    debug!(%call_id, "response headers: {:?}", envelope.response.headers);
    debug!(%call_id, "response message: {}", envelope.response.message);
}
