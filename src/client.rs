// SPDX-License-Identifier: MIT OR Apache-2.0

//! One HTTPS GET per accepted tag event.
//!
//! DNS resolve, TCP connect, TLS 1.3 handshake, hand-written HTTP/1.1
//! exchange. The endpoint answers through a redirect (Apps Script style),
//! so absolute-https `Location` hops are followed up to a small limit.
//! There is no trust store on this device; the TLS session is only opened
//! when the configuration explicitly accepts unvalidated certificates.

use alloc::vec::Vec;

use embassy_net::dns::DnsQueryType;
use embassy_net::tcp::TcpSocket;
use embassy_net::{IpEndpoint, Stack};
use embassy_time::{with_timeout, Duration};
use embedded_io_async::{Read, Write};
use embedded_tls::{
    Aes128GcmSha256, CryptoProvider, NoVerify, TlsConfig, TlsConnection, TlsContext, TlsVerifier,
};
use esp_hal::rng::Rng;
use heapless::String;
use log::{debug, info, warn};

use tagreport::http::{
    build_get, decode_chunked, header_value, is_redirect, parse_status_line, split_head_body,
};
use tagreport::request::{build_query, parse_https_url};

use crate::config::ReporterConfig;
use crate::errors::ReportError;
use crate::settings;

const TLS_READ_BUF: usize = 16_640;
const TLS_WRITE_BUF: usize = 4096;

/// A parsed reply: the status code and as much of the body as is worth
/// keeping for a two-line display plus the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String<256>,
}

/// Sends one report for `uid` and returns the final (post-redirect)
/// response. Best effort: no retries, the caller owns the timeout budget.
pub async fn send_report(
    stack: Stack<'static>,
    rng: Rng,
    config: &ReporterConfig,
    uid: &str,
) -> Result<Response, ReportError> {
    if !config.accept_invalid_certs {
        return Err(ReportError::CertCheckUnsupported);
    }
    warn!("TLS certificate validation disabled; the endpoint is not authenticated");

    let endpoint = config.endpoint();
    let mut host: String<128> =
        String::try_from(endpoint.host).map_err(|_| ReportError::RequestTooLong)?;
    let mut port = endpoint.port;
    let mut path: String<256> = build_query(endpoint.path, config.uid_param, uid)?;

    info!("sending report: https://{}{}", host, path);

    for _hop in 0..=settings::MAX_REDIRECT_HOPS {
        let raw = exchange(stack, rng, host.as_str(), port, path.as_str()).await?;

        let (head, body) = split_head_body(&raw).ok_or(ReportError::BadResponse)?;
        let status = parse_status_line(head).ok_or(ReportError::BadResponse)?;

        if is_redirect(status) {
            let location = header_value(head, "Location").ok_or(ReportError::BadResponse)?;
            debug!("redirected ({}) to {}", status, location);
            let target = parse_https_url(location)?;
            let next_host =
                String::try_from(target.host).map_err(|_| ReportError::RequestTooLong)?;
            let next_path =
                String::try_from(target.path).map_err(|_| ReportError::RequestTooLong)?;
            host = next_host;
            port = target.port;
            path = next_path;
            continue;
        }

        let plain;
        let body = match header_value(head, "Transfer-Encoding") {
            Some(te) if te.eq_ignore_ascii_case("chunked") => {
                plain = decode_chunked::<{ settings::RESPONSE_LIMIT }>(body)
                    .ok_or(ReportError::BadResponse)?;
                plain.as_slice()
            }
            _ => body,
        };

        return Ok(Response { status, body: body_text(body) });
    }

    Err(ReportError::TooManyRedirects)
}

/// Keeps the valid-UTF-8 prefix of the body, bounded by the response
/// buffer. Display truncation to 16 cells happens later; this bound only
/// caps what gets logged.
fn body_text(body: &[u8]) -> String<256> {
    let text = match core::str::from_utf8(body) {
        Ok(s) => s,
        Err(e) => core::str::from_utf8(&body[..e.valid_up_to()]).unwrap_or(""),
    };
    let mut out: String<256> = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// One raw HTTPS exchange with a single peer, no redirect handling.
async fn exchange(
    stack: Stack<'static>,
    rng: Rng,
    host: &str,
    port: u16,
    path_and_query: &str,
) -> Result<Vec<u8>, ReportError> {
    let addrs = with_timeout(
        Duration::from_millis(settings::DNS_TIMEOUT_MS),
        stack.dns_query(host, DnsQueryType::A),
    )
    .await
    .map_err(|_| ReportError::DnsTimeout)?
    .map_err(|_| ReportError::Dns)?;
    let addr = addrs.first().copied().ok_or(ReportError::Dns)?;
    let endpoint = IpEndpoint::new(addr, port);

    let mut rx_buffer = alloc::vec![0u8; 4096];
    let mut tx_buffer = alloc::vec![0u8; 1024];
    let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
    match with_timeout(
        Duration::from_millis(settings::CONNECT_TIMEOUT_MS),
        socket.connect(endpoint),
    )
    .await
    {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            warn!("connect error: {:?}", e);
            return Err(ReportError::Connect);
        }
        Err(_) => return Err(ReportError::ConnectTimeout),
    }

    let tls_config = TlsConfig::new().with_server_name(host);
    let mut read_buf = alloc::vec![0u8; TLS_READ_BUF];
    let mut write_buf = alloc::vec![0u8; TLS_WRITE_BUF];
    let mut tls =
        TlsConnection::<_, Aes128GcmSha256>::new(socket, &mut read_buf, &mut write_buf);
    let provider = InsecureProvider::new(EspRng(rng));
    tls.open(TlsContext::new(&tls_config, provider))
        .await
        .map_err(|e| {
            warn!("TLS handshake failed: {:?}", e);
            ReportError::Tls
        })?;

    let request = build_get(host, port, path_and_query)?;
    tls.write_all(request.as_bytes())
        .await
        .map_err(|_| ReportError::RequestWrite)?;
    tls.flush().await.map_err(|_| ReportError::RequestWrite)?;

    let mut raw: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 512];
    loop {
        match tls.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                raw.extend_from_slice(&chunk[..n]);
                if raw.len() >= settings::RESPONSE_LIMIT {
                    break;
                }
            }
            Err(e) => {
                // peers routinely drop without close_notify once the body
                // is out; only an empty capture is an error
                if raw.is_empty() {
                    warn!("read error: {:?}", e);
                    return Err(ReportError::ResponseRead);
                }
                break;
            }
        }
    }
    let _ = tls.close().await;

    Ok(raw)
}

struct EspRng(Rng);

impl rand_core::RngCore for EspRng {
    fn next_u32(&mut self) -> u32 {
        self.0.random()
    }

    fn next_u64(&mut self) -> u64 {
        ((self.0.random() as u64) << 32) | self.0.random() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let word = self.0.random().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl rand_core::CryptoRng for EspRng {}

/// Crypto provider that skips certificate verification. Kept private so
/// the only way in is `ReporterConfig::accept_invalid_certs`.
struct InsecureProvider<RNG> {
    rng: RNG,
    verifier: NoVerify,
}

impl<RNG> InsecureProvider<RNG> {
    fn new(rng: RNG) -> Self {
        Self { rng, verifier: NoVerify }
    }
}

impl<RNG> CryptoProvider for InsecureProvider<RNG>
where
    RNG: rand_core::CryptoRngCore,
{
    type CipherSuite = Aes128GcmSha256;
    type Signature = &'static [u8];

    fn rng(&mut self) -> impl rand_core::CryptoRngCore {
        &mut self.rng
    }

    fn verifier(
        &mut self,
    ) -> Result<&mut impl TlsVerifier<Self::CipherSuite>, embedded_tls::TlsError> {
        Ok(&mut self.verifier)
    }
}
