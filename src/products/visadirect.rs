//! Visa Direct funds transfer endpoints.

use crate::{
    auth::AuthMethod,
    config::VdpConfig,
    dispatcher::Dispatcher,
    endpoint::{EndpointDescriptor, HttpVerb},
    error::Result,
};

const RESOURCE: &str = "visadirect";
const API: &str = "fundstransfer";
const VERSION: &str = "v1";

fn endpoint(config: &VdpConfig, method: &str) -> EndpointDescriptor {
    EndpointDescriptor::new(&config.url, RESOURCE, API, VERSION, method)
}

/// Dispatcher for `POST pushfundstransactions` (send funds to a card).
///
/// # Errors
///
/// Returns a configuration error if the config base URL is empty.
pub fn push_funds(config: VdpConfig) -> Result<Dispatcher> {
    let endpoint = endpoint(&config, "pushfundstransactions");
    Dispatcher::new(config, endpoint, HttpVerb::Post, AuthMethod::Ssl)
}

/// Dispatcher for `GET pushfundstransactions/{status_id}` (query the status
/// of a previously submitted push that answered with a timeout).
///
/// # Errors
///
/// Returns a configuration error if the config base URL is empty.
pub fn push_funds_status(config: VdpConfig, status_id: &str) -> Result<Dispatcher> {
    let endpoint = endpoint(&config, "pushfundstransactions").with_path_suffix(status_id);
    Dispatcher::new(config, endpoint, HttpVerb::Get, AuthMethod::Ssl)
}

/// Dispatcher for `POST pullfundstransactions` (pull funds from a card).
///
/// # Errors
///
/// Returns a configuration error if the config base URL is empty.
pub fn pull_funds(config: VdpConfig) -> Result<Dispatcher> {
    let endpoint = endpoint(&config, "pullfundstransactions");
    Dispatcher::new(config, endpoint, HttpVerb::Post, AuthMethod::Ssl)
}

/// Dispatcher for `POST reversefundstransactions` (reverse an earlier pull).
///
/// # Errors
///
/// Returns a configuration error if the config base URL is empty.
pub fn reverse_funds(config: VdpConfig) -> Result<Dispatcher> {
    let endpoint = endpoint(&config, "reversefundstransactions");
    Dispatcher::new(config, endpoint, HttpVerb::Post, AuthMethod::Ssl)
}
