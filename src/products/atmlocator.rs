//! Global ATM Locator endpoints.

use crate::{
    auth::AuthMethod,
    config::VdpConfig,
    dispatcher::Dispatcher,
    endpoint::{EndpointDescriptor, HttpVerb},
    error::Result,
};

const RESOURCE: &str = "globalatmlocator";
const API: &str = "localatms";
const VERSION: &str = "v1";

/// Dispatcher for `POST localatms/geocodesinquiry` (resolve a place name to
/// geocodes for ATM lookup).
///
/// # Errors
///
/// Returns a configuration error if the config base URL is empty.
pub fn geocodes_inquiry(config: VdpConfig) -> Result<Dispatcher> {
    let endpoint = EndpointDescriptor::new(&config.url, RESOURCE, API, VERSION, "geocodesinquiry");
    Dispatcher::new(config, endpoint, HttpVerb::Post, AuthMethod::Ssl)
}

/// Dispatcher for `POST localatms/atmsinquiry` (find ATMs near a location).
///
/// # Errors
///
/// Returns a configuration error if the config base URL is empty.
pub fn atms_inquiry(config: VdpConfig) -> Result<Dispatcher> {
    let endpoint = EndpointDescriptor::new(&config.url, RESOURCE, API, VERSION, "atmsinquiry");
    Dispatcher::new(config, endpoint, HttpVerb::Post, AuthMethod::Ssl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geocodes_inquiry_targets_the_documented_url() {
        let dispatcher = geocodes_inquiry(VdpConfig::new("https://sandbox.api.visa.com")).unwrap();
        assert_eq!(
            dispatcher.endpoint().url(),
            "https://sandbox.api.visa.com/globalatmlocator/localatms/v1/geocodesinquiry"
        );
    }
}
