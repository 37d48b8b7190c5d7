use crate::error::{RivesError, RivesResult};
use crate::encoding::parse_quantity;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Canonical chain id.
///
/// Wallets report chain ids as hex strings and configuration files tend to
/// use either form; everything is parsed into this type once at the edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainId(pub u64);

impl ChainId {
    pub fn parse(s: &str) -> RivesResult<Self> {
        parse_quantity(s)
            .map(Self)
            .map_err(|_| RivesError::Chain(format!("Invalid chain ID: {}", s)))
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{:x}", self.0)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChainId {
    type Err = RivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Serialize for ChainId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(u64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(Self(n)),
            Repr::Text(s) => Self::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_and_decimal_agree() {
        assert_eq!(ChainId::parse("0x343A").unwrap(), ChainId(13370));
        assert_eq!(ChainId::parse("0x7a69").unwrap(), ChainId(31337));
        assert_eq!(ChainId::parse("31337").unwrap(), ChainId(31337));
        assert!(ChainId::parse("cannon").is_err());
    }

    #[test]
    fn test_serde_accepts_both_forms() {
        let from_text: ChainId = serde_json::from_str("\"0x343A\"").unwrap();
        let from_number: ChainId = serde_json::from_str("13370").unwrap();
        assert_eq!(from_text, from_number);
        assert_eq!(serde_json::to_string(&from_text).unwrap(), "\"0x343a\"");
    }
}
