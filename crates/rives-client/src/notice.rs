//! Verification notices emitted by the rollup after checking a gameplay.
//!
//! The payload is the ABI encoding of `(address user, uint256 timestamp,
//! int256 score, uint256 input_index)`, exactly four 32-byte words.

use crate::node::{OutputType, RawOutput};
use ethers::abi::{self, ParamType, Token};
use ethers::types::{Address, I256, U256};
use rives_types::encoding::{decode_hex, is_hex};
use rives_types::{EthAddress, RivesError, RivesResult, VERIFICATION_NOTICE_SIZE};
use tracing::debug;

const NOTICE_PARAMS: [ParamType; 4] = [
    ParamType::Address,
    ParamType::Uint(256),
    ParamType::Int(256),
    ParamType::Uint(256),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationNotice {
    /// Always set by the decoder, the zero address included.
    pub user: Option<EthAddress>,
    pub timestamp: U256,
    pub score: I256,
    pub input_index: U256,
}

impl VerificationNotice {
    /// Decodes an output, returning `None` for anything that is not a
    /// well-formed verification notice.
    pub fn try_decode(output: &RawOutput) -> Option<Self> {
        if output.output_type() != OutputType::Notice {
            return None;
        }
        let payload = output.payload()?;
        if !is_hex(payload) {
            return None;
        }
        match Self::decode_payload(payload) {
            Ok(notice) => Some(notice),
            Err(e) => {
                debug!(
                    "Skipping notice {} of input {}: {}",
                    output.index, output.input_index, e
                );
                None
            }
        }
    }

    pub fn decode_payload(payload: &str) -> RivesResult<Self> {
        let bytes = decode_hex(payload)?;
        Self::decode_bytes(&bytes)
    }

    pub fn decode_bytes(bytes: &[u8]) -> RivesResult<Self> {
        if bytes.len() != VERIFICATION_NOTICE_SIZE {
            return Err(RivesError::Decode(format!(
                "notice payload must be {} bytes, got {}",
                VERIFICATION_NOTICE_SIZE,
                bytes.len()
            )));
        }

        let tokens = abi::decode(&NOTICE_PARAMS, bytes)
            .map_err(|e| RivesError::Decode(format!("ABI decode failed: {}", e)))?;

        match tokens.as_slice() {
            [Token::Address(user), Token::Uint(timestamp), Token::Int(score), Token::Uint(input_index)] => {
                Ok(Self {
                    user: Some(EthAddress(user.0)),
                    timestamp: *timestamp,
                    score: I256::from_raw(*score),
                    input_index: *input_index,
                })
            }
            _ => Err(RivesError::Decode("unexpected notice layout".into())),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let user = self.user.unwrap_or_else(EthAddress::zero);
        abi::encode(&[
            Token::Address(Address::from_slice(&user.0)),
            Token::Uint(self.timestamp),
            Token::Int(self.score.into_raw()),
            Token::Uint(self.input_index),
        ])
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "user": self.user.map(|u| u.to_checksum()),
            "timestamp": quantity_json(self.timestamp),
            "score": self.score.to_string(),
            "input_index": quantity_json(self.input_index),
        })
    }
}

/// Plain JSON number when it fits in `u64`, decimal string otherwise.
fn quantity_json(value: U256) -> serde_json::Value {
    if value.bits() <= 64 {
        serde_json::json!(value.as_u64())
    } else {
        serde_json::json!(value.to_string())
    }
}

/// Decodes every verification notice in `outputs`, preserving order.
pub fn decode_notices(outputs: &[RawOutput]) -> Vec<VerificationNotice> {
    outputs.iter().filter_map(VerificationNotice::try_decode).collect()
}
