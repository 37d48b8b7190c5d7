use crate::error::{RivesError, RivesResult};

/// `0x` followed by any number of hex digits.
pub fn is_hex(s: &str) -> bool {
    match s.strip_prefix("0x") {
        Some(digits) => digits.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

pub fn decode_hex(s: &str) -> RivesResult<Vec<u8>> {
    if !is_hex(s) {
        return Err(RivesError::InvalidHex(format!("not a 0x-prefixed hex string: {}", truncate(s))));
    }
    hex::decode(&s[2..]).map_err(|e| RivesError::InvalidHex(e.to_string()))
}

pub fn encode_hex(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parses a `0x` hex quantity or a decimal string.
pub fn parse_quantity(s: &str) -> RivesResult<u64> {
    let s = s.trim();
    if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if digits.is_empty() {
            return Ok(0);
        }
        u64::from_str_radix(digits, 16)
            .map_err(|e| RivesError::InvalidHex(format!("{}: {}", s, e)))
    } else {
        s.parse::<u64>()
            .map_err(|e| RivesError::InvalidHex(format!("{}: {}", s, e)))
    }
}

fn truncate(s: &str) -> &str {
    match s.char_indices().nth(24) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_hex() {
        assert!(is_hex("0x"));
        assert!(is_hex("0xdeadBEEF"));
        assert!(is_hex("0x123"));
        assert!(!is_hex("deadbeef"));
        assert!(!is_hex("0xzz"));
        assert!(!is_hex(""));
    }

    #[test]
    fn test_decode_hex_rejects_odd_length() {
        assert!(decode_hex("0x123").is_err());
        assert_eq!(decode_hex("0x0102").unwrap(), vec![1, 2]);
        assert_eq!(decode_hex("0x").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x343A").unwrap(), 13370);
        assert_eq!(parse_quantity("13370").unwrap(), 13370);
        assert_eq!(parse_quantity("0x").unwrap(), 0);
        assert!(parse_quantity("0xgg").is_err());
        assert!(parse_quantity("-1").is_err());
    }
}
