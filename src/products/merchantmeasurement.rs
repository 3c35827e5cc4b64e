//! Merchant Measurement (merchant benchmark) endpoints.

use crate::{
    auth::AuthMethod,
    config::VdpConfig,
    dispatcher::Dispatcher,
    endpoint::{EndpointDescriptor, HttpVerb},
    error::Result,
};

const RESOURCE: &str = "merchantmeasurement";
const API: &str = "merchantbenchmark";
const VERSION: &str = "v1";

/// Dispatcher for `POST merchantbenchmark/search` (benchmark metrics for a
/// merchant segment).
///
/// # Errors
///
/// Returns a configuration error if the config base URL is empty.
pub fn merchant_benchmark(config: VdpConfig) -> Result<Dispatcher> {
    let endpoint = EndpointDescriptor::new(&config.url, RESOURCE, API, VERSION, "search");
    Dispatcher::new(config, endpoint, HttpVerb::Post, AuthMethod::Ssl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merchant_benchmark_targets_the_documented_url() {
        let dispatcher = merchant_benchmark(VdpConfig::new("https://sandbox.api.visa.com")).unwrap();
        assert_eq!(
            dispatcher.endpoint().url(),
            "https://sandbox.api.visa.com/merchantmeasurement/merchantbenchmark/v1/search"
        );
    }
}
