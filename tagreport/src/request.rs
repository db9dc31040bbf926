//! Outbound request construction: endpoint parsing and query building.

use heapless::String;

use crate::urlencode::percent_encode;
use crate::BuildError;

/// A parsed `https` endpoint. Borrows from the URL it was parsed out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint<'a> {
    pub host: &'a str,
    pub port: u16,
    pub path: &'a str,
}

/// Splits an absolute `https://` URL into host, port and path. Used for the
/// configured endpoint and for redirect `Location` targets; anything that is
/// not absolute https is rejected.
pub fn parse_https_url(url: &str) -> Result<Endpoint<'_>, BuildError> {
    let rest = url.strip_prefix("https://").ok_or(BuildError::BadUrl)?;
    let (authority, path) = match rest.find('/') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, "/"),
    };
    let (host, port) = match authority.rsplit_once(':') {
        Some((h, p)) => (h, p.parse::<u16>().map_err(|_| BuildError::BadUrl)?),
        None => (authority, 443),
    };
    if host.is_empty() {
        return Err(BuildError::BadUrl);
    }
    Ok(Endpoint { host, port, path })
}

/// Builds `{path}?{param}={percent-encoded-uid}`.
pub fn build_query(path: &str, param: &str, uid: &str) -> Result<String<256>, BuildError> {
    let encoded = percent_encode::<96>(uid)?;
    let mut s: String<256> = String::new();
    for part in [path, "?", param, "=", encoded.as_str()] {
        s.push_str(part).map_err(|_| BuildError::Overflow)?;
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_endpoint() {
        let ep = parse_https_url("https://script.example.com/macros/s/KEY/exec").unwrap();
        assert_eq!(ep.host, "script.example.com");
        assert_eq!(ep.port, 443);
        assert_eq!(ep.path, "/macros/s/KEY/exec");
    }

    #[test]
    fn parses_explicit_port_and_bare_host() {
        let ep = parse_https_url("https://example.com:8443").unwrap();
        assert_eq!(ep.host, "example.com");
        assert_eq!(ep.port, 8443);
        assert_eq!(ep.path, "/");
    }

    #[test]
    fn rejects_non_https() {
        assert_eq!(parse_https_url("http://example.com/"), Err(BuildError::BadUrl));
        assert_eq!(parse_https_url("/relative/path"), Err(BuildError::BadUrl));
        assert_eq!(parse_https_url("https://:443/x"), Err(BuildError::BadUrl));
    }

    #[test]
    fn query_holds_encoded_uid() {
        let q = build_query("/exec", "cardUID", "04-A3 FF").unwrap();
        assert_eq!(q.as_str(), "/exec?cardUID=04-A3%20FF");
    }
}
