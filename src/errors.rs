// SPDX-License-Identifier: MIT OR Apache-2.0

//! Send-path errors. Display strings double as the second LCD line, so
//! they stay under 16 characters.

use snafu::Snafu;
use tagreport::BuildError;

#[derive(Debug, Snafu, Clone, Copy, PartialEq, Eq)]
pub enum ReportError {
    #[snafu(display("DNS lookup fail"))]
    Dns,
    #[snafu(display("DNS timeout"))]
    DnsTimeout,
    #[snafu(display("connect fail"))]
    Connect,
    #[snafu(display("connect timeout"))]
    ConnectTimeout,
    #[snafu(display("TLS handshake"))]
    Tls,
    #[snafu(display("send fail"))]
    RequestWrite,
    #[snafu(display("recv fail"))]
    ResponseRead,
    #[snafu(display("bad response"))]
    BadResponse,
    #[snafu(display("timeout"))]
    Timeout,
    #[snafu(display("redirect loop"))]
    TooManyRedirects,
    #[snafu(display("bad url"))]
    BadUrl,
    #[snafu(display("url too long"))]
    RequestTooLong,
    /// Certificate validation was requested but this build has no trust
    /// store; see `ReporterConfig::accept_invalid_certs`.
    #[snafu(display("no trust store"))]
    CertCheckUnsupported,
}

impl From<BuildError> for ReportError {
    fn from(e: BuildError) -> Self {
        match e {
            BuildError::Overflow => ReportError::RequestTooLong,
            BuildError::BadUrl => ReportError::BadUrl,
        }
    }
}
