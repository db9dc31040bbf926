//! Tag UID rendering.

use heapless::String;

use crate::BuildError;

/// Longest UID the anti-collision loop can hand us (triple-size UID).
pub const MAX_UID_LEN: usize = 10;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Renders a UID as zero-padded uppercase hex pairs joined by `separator`,
/// e.g. `04-A3-FF-12`. Deterministic and locale independent.
pub fn format_uid(bytes: &[u8], separator: char) -> Result<String<32>, BuildError> {
    let mut s: String<32> = String::new();
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            s.push(separator).map_err(|_| BuildError::Overflow)?;
        }
        push_hex_byte(&mut s, *b)?;
    }
    Ok(s)
}

fn push_hex_byte(dst: &mut String<32>, b: u8) -> Result<(), BuildError> {
    dst.push(HEX_UPPER[(b >> 4) as usize] as char)
        .map_err(|_| BuildError::Overflow)?;
    dst.push(HEX_UPPER[(b & 0x0f) as usize] as char)
        .map_err(|_| BuildError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(s: &str, separator: char) -> Vec<u8> {
        s.split(separator)
            .map(|pair| u8::from_str_radix(&pair.to_lowercase(), 16).unwrap())
            .collect()
    }

    #[test]
    fn formats_known_uid() {
        let uid = [0x04, 0xA3, 0xFF, 0x12];
        assert_eq!(format_uid(&uid, '-').unwrap().as_str(), "04-A3-FF-12");
    }

    #[test]
    fn length_and_round_trip_for_all_uid_sizes() {
        for len in 4..=MAX_UID_LEN {
            let bytes: Vec<u8> = (0..len).map(|i| (i as u8).wrapping_mul(37) ^ 0x5A).collect();
            let s = format_uid(&bytes, '-').unwrap();
            assert_eq!(s.len(), 2 * len + (len - 1));
            assert!(s.chars().all(|c| c == '-' || c.is_ascii_hexdigit()));
            assert!(!s.chars().any(|c| c.is_ascii_lowercase()));
            assert_eq!(decode(s.as_str(), '-'), bytes);
        }
    }

    #[test]
    fn zero_pads_small_bytes() {
        assert_eq!(format_uid(&[0x00, 0x0F], ' ').unwrap().as_str(), "00 0F");
    }

    #[test]
    fn space_separator_variant() {
        let s = format_uid(&[0xDE, 0xAD, 0xBE, 0xEF], ' ').unwrap();
        assert_eq!(s.as_str(), "DE AD BE EF");
    }

    #[test]
    fn oversized_input_is_rejected() {
        let bytes = [0u8; 12];
        assert_eq!(format_uid(&bytes, '-'), Err(BuildError::Overflow));
    }
}
