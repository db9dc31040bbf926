//! RFC 3986 percent-encoding for query parameter values.

use heapless::String;

use crate::BuildError;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Percent-encodes `input` for use as a query parameter value. The RFC 3986
/// unreserved set `[A-Za-z0-9\-_.~]` passes through untouched; every other
/// byte (UTF-8 bytes individually) becomes `%` plus two uppercase hex
/// digits.
pub fn percent_encode<const N: usize>(input: &str) -> Result<String<N>, BuildError> {
    let mut out: String<N> = String::new();
    for &b in input.as_bytes() {
        if is_unreserved(b) {
            out.push(b as char).map_err(|_| BuildError::Overflow)?;
        } else {
            out.push('%').map_err(|_| BuildError::Overflow)?;
            out.push(HEX_UPPER[(b >> 4) as usize] as char)
                .map_err(|_| BuildError::Overflow)?;
            out.push(HEX_UPPER[(b & 0x0f) as usize] as char)
                .map_err(|_| BuildError::Overflow)?;
        }
    }
    Ok(out)
}

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreserved_input_is_unchanged() {
        let input = "04-A3-FF-12_x.~Z9";
        let encoded = percent_encode::<64>(input).unwrap();
        assert_eq!(encoded.as_str(), input);
        // idempotent: a second pass is still a no-op
        let again = percent_encode::<64>(encoded.as_str()).unwrap();
        assert_eq!(again.as_str(), input);
    }

    #[test]
    fn dash_is_unreserved_and_space_is_escaped() {
        assert_eq!(percent_encode::<8>("-").unwrap().as_str(), "-");
        assert_eq!(percent_encode::<8>(" ").unwrap().as_str(), "%20");
    }

    #[test]
    fn reserved_bytes_use_uppercase_hex() {
        assert_eq!(
            percent_encode::<32>("a/b?c=d").unwrap().as_str(),
            "a%2Fb%3Fc%3Dd"
        );
    }

    #[test]
    fn multibyte_chars_encode_each_byte() {
        // U+00E9 is 0xC3 0xA9 in UTF-8
        assert_eq!(percent_encode::<16>("é").unwrap().as_str(), "%C3%A9");
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(percent_encode::<2>(" "), Err(BuildError::Overflow));
    }
}
