// SPDX-License-Identifier: MIT OR Apache-2.0

use heapless::String;
use tagreport::request::{parse_https_url, Endpoint};
use tagreport::BuildError;

use crate::settings;

/// Everything the reporter needs to turn a tag read into one request.
/// Built once at boot and shared as `&'static`; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ReporterConfig {
    /// WiFi SSID
    pub wifi_ssid: String<32>,
    /// WPA2 passphrase. None is an open network.
    pub wifi_pw: Option<String<63>>,

    /// Absolute https endpoint of the attendance logger.
    pub report_url: &'static str,
    /// Query parameter carrying the UID (`cardUID`, `studentID` on some
    /// deployments).
    pub uid_param: &'static str,

    /// Minimum interval between accepted sends. Zero disables debouncing.
    pub debounce_window_ms: u64,
    /// Hard bound on one whole HTTPS exchange, redirects included.
    pub request_timeout_ms: u64,

    /// The endpoint is reached without validating its certificate chain
    /// (this build carries no root store). Off by default; sends refuse to
    /// run until it is switched on deliberately.
    pub accept_invalid_certs: bool,
}

impl ReporterConfig {
    /// Secure-default configuration, WiFi and endpoint from build-time env.
    ///
    /// Fails only when an env override does not fit its bounded string.
    pub fn new() -> Result<Self, BuildError> {
        let wifi_ssid: String<32> = option_env!("WIFI_SSID")
            .unwrap_or(settings::DEFAULT_SSID)
            .try_into()
            .map_err(|_| BuildError::Overflow)?;
        let wifi_pw: Option<String<63>> = option_env!("WIFI_PW")
            .map(|s| s.try_into().map_err(|_| BuildError::Overflow))
            .transpose()?;
        let report_url = option_env!("REPORT_URL").unwrap_or(settings::DEFAULT_REPORT_URL);
        // reject a bad endpoint at boot, not on the first tap
        parse_https_url(report_url)?;

        Ok(ReporterConfig {
            wifi_ssid,
            wifi_pw,
            report_url,
            uid_param: option_env!("REPORT_UID_PARAM").unwrap_or(settings::DEFAULT_UID_PARAM),
            debounce_window_ms: settings::DEBOUNCE_WINDOW_MS,
            request_timeout_ms: settings::REQUEST_TIMEOUT_MS,
            accept_invalid_certs: false,
        })
    }

    /// The shipped configuration. Mirrors the original deployment, where the
    /// endpoint only answers over an unvalidated TLS session; the client
    /// logs a warning every time that path is exercised.
    pub fn from_env() -> Result<Self, BuildError> {
        let mut config = Self::new()?;
        config.accept_invalid_certs = true;
        Ok(config)
    }

    pub fn endpoint(&self) -> Endpoint<'static> {
        // checked in new()
        parse_https_url(self.report_url).unwrap_or(Endpoint {
            host: "",
            port: 443,
            path: "/",
        })
    }
}
