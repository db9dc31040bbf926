// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hand-built HTTP/1.1 request text and minimal response parsing.
//!
//! The response side only needs three things: the status code, the body,
//! and the `Location` header when the endpoint answers through a redirect.

use core::fmt::Write;

use heapless::String;

use crate::BuildError;

/// Builds the full GET request text for `path_and_query` on `host`. The
/// `Host` header carries the port whenever it is not the https default.
pub fn build_get(host: &str, port: u16, path_and_query: &str) -> Result<String<512>, BuildError> {
    let mut req: String<512> = String::new();
    for part in ["GET ", path_and_query, " HTTP/1.1\r\nHost: ", host] {
        req.push_str(part).map_err(|_| BuildError::Overflow)?;
    }
    if port != 443 {
        let mut p: String<8> = String::new();
        write!(p, ":{port}").map_err(|_| BuildError::Overflow)?;
        req.push_str(p.as_str()).map_err(|_| BuildError::Overflow)?;
    }
    req.push_str("\r\nUser-Agent: tap-stamp/0.1\r\nAccept: text/plain\r\nConnection: close\r\n\r\n")
        .map_err(|_| BuildError::Overflow)?;
    Ok(req)
}

/// Extracts the status code from a `HTTP/1.x NNN ...` status line.
pub fn parse_status_line(buf: &[u8]) -> Option<u16> {
    if buf.len() < 12 || !buf.starts_with(b"HTTP/1.") {
        return None;
    }
    let space = buf.iter().position(|&b| b == b' ')?;
    let digits = buf.get(space + 1..space + 4)?;
    if !digits.iter().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.iter().fold(0u16, |acc, &d| acc * 10 + (d - b'0') as u16))
}

/// Splits a raw response at the first blank line into (head, body).
pub fn split_head_body(raw: &[u8]) -> Option<(&[u8], &[u8])> {
    let pos = raw.windows(4).position(|w| w == b"\r\n\r\n")?;
    Some((&raw[..pos], &raw[pos + 4..]))
}

/// Case-insensitive header lookup over the response head.
pub fn header_value<'a>(head: &'a [u8], name: &str) -> Option<&'a str> {
    for line in head.split(|&b| b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let colon = match line.iter().position(|&b| b == b':') {
            Some(i) => i,
            None => continue,
        };
        if line[..colon].eq_ignore_ascii_case(name.as_bytes()) {
            let value = &line[colon + 1..];
            return core::str::from_utf8(value).ok().map(str::trim);
        }
    }
    None
}

/// The redirect statuses the original client followed
/// (`HTTPC_STRICT_FOLLOW_REDIRECTS`).
pub fn is_redirect(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

/// Decodes a `Transfer-Encoding: chunked` body. `None` on malformed
/// framing or when the decoded body exceeds `N`; trailers after the
/// terminating chunk are ignored.
pub fn decode_chunked<const N: usize>(body: &[u8]) -> Option<heapless::Vec<u8, N>> {
    let mut out: heapless::Vec<u8, N> = heapless::Vec::new();
    let mut rest = body;
    loop {
        let line_end = rest.windows(2).position(|w| w == b"\r\n")?;
        let size_field = core::str::from_utf8(&rest[..line_end]).ok()?;
        // chunk extensions after ';' carry nothing we need
        let size_field = size_field.split(';').next()?.trim();
        let size = usize::from_str_radix(size_field, 16).ok()?;
        rest = &rest[line_end + 2..];
        if size == 0 {
            return Some(out);
        }
        if rest.len() < size + 2 || &rest[size..size + 2] != b"\r\n" {
            return None;
        }
        out.extend_from_slice(&rest[..size]).ok()?;
        rest = &rest[size + 2..];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &[u8] = b"HTTP/1.1 302 Found\r\n\
Content-Type: text/html\r\n\
Location: https://usercontent.example.com/echo\r\n\
\r\n\
moved";

    #[test]
    fn request_text_is_well_formed() {
        let req = build_get("script.example.com", 443, "/exec?cardUID=04-A3").unwrap();
        assert!(req.starts_with("GET /exec?cardUID=04-A3 HTTP/1.1\r\n"));
        assert!(req.contains("Host: script.example.com\r\n"));
        assert!(req.contains("Connection: close\r\n"));
        assert!(req.ends_with("\r\n\r\n"));
    }

    #[test]
    fn host_header_carries_non_default_ports() {
        let req = build_get("example.com", 8443, "/x").unwrap();
        assert!(req.contains("Host: example.com:8443\r\n"));
        // the default https port stays implicit
        let req = build_get("example.com", 443, "/x").unwrap();
        assert!(req.contains("Host: example.com\r\n"));
    }

    #[test]
    fn parses_status_codes() {
        assert_eq!(parse_status_line(b"HTTP/1.1 200 OK\r\n"), Some(200));
        assert_eq!(parse_status_line(b"HTTP/1.0 404 Not Found\r\n"), Some(404));
        assert_eq!(parse_status_line(RESPONSE), Some(302));
    }

    #[test]
    fn rejects_garbage_status_lines() {
        assert_eq!(parse_status_line(b""), None);
        assert_eq!(parse_status_line(b"HTP/1.1 200 OK\r\n"), None);
        assert_eq!(parse_status_line(b"HTTP/1.1 2x0 OK\r\n"), None);
    }

    #[test]
    fn splits_head_and_body() {
        let (head, body) = split_head_body(RESPONSE).unwrap();
        assert!(head.starts_with(b"HTTP/1.1 302"));
        assert_eq!(body, b"moved");
        assert_eq!(split_head_body(b"HTTP/1.1 200 OK\r\nX: y\r\n"), None);
    }

    #[test]
    fn finds_headers_case_insensitively() {
        let (head, _) = split_head_body(RESPONSE).unwrap();
        assert_eq!(
            header_value(head, "location"),
            Some("https://usercontent.example.com/echo")
        );
        assert_eq!(header_value(head, "content-type"), Some("text/html"));
        assert_eq!(header_value(head, "x-missing"), None);
    }

    #[test]
    fn decodes_chunked_bodies() {
        let body = b"7\r\nPresent\r\n9\r\n|John Doe\r\n0\r\n\r\n";
        let decoded = decode_chunked::<64>(body).unwrap();
        assert_eq!(decoded.as_slice(), b"Present|John Doe");
    }

    #[test]
    fn chunked_extensions_and_trailers_are_ignored() {
        let body = b"3;ext=1\r\nabc\r\n0\r\nX-Trailer: y\r\n\r\n";
        let decoded = decode_chunked::<16>(body).unwrap();
        assert_eq!(decoded.as_slice(), b"abc");
    }

    #[test]
    fn malformed_chunked_bodies_are_rejected() {
        assert!(decode_chunked::<16>(b"zz\r\nabc\r\n0\r\n\r\n").is_none());
        assert!(decode_chunked::<16>(b"5\r\nabc\r\n").is_none());
        // decoded body larger than the buffer
        assert!(decode_chunked::<2>(b"3\r\nabc\r\n0\r\n\r\n").is_none());
    }

    #[test]
    fn classifies_redirects() {
        for s in [301, 302, 303, 307, 308] {
            assert!(is_redirect(s));
        }
        for s in [200, 204, 400, 500] {
            assert!(!is_redirect(s));
        }
    }
}
