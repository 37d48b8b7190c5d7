use crate::constants::{BYTES32_SIZE, MAX_GAMEPLAY_PAYLOAD_SIZE, MIN_GAMEPLAY_LOG_SIZE};
use crate::error::{RivesError, RivesResult};
use crate::encoding::encode_hex;
use std::fmt;

/// Hash of the emulator outcard, as reported at the end of a gameplay.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Outhash(pub [u8; BYTES32_SIZE]);

impl Outhash {
    pub fn from_hex(s: &str) -> RivesResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.len() != BYTES32_SIZE * 2 {
            return Err(RivesError::InvalidPayload(format!(
                "outhash must be {} hex digits, got {}",
                BYTES32_SIZE * 2,
                s.len()
            )));
        }
        let bytes = hex::decode(s).map_err(|e| RivesError::InvalidHex(e.to_string()))?;
        let mut arr = [0u8; BYTES32_SIZE];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Outhash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Outhash({})", self.to_hex())
    }
}

/// Input payload of a gameplay submission: the outhash followed by the raw tape.
#[derive(Clone, PartialEq, Eq)]
pub struct GameplayPayload {
    pub outhash: Outhash,
    pub tape: Vec<u8>,
}

impl GameplayPayload {
    /// Builds a payload, rejecting anything the verifier would refuse on size.
    pub fn new(outhash: Outhash, tape: Vec<u8>) -> RivesResult<Self> {
        if tape.len() < MIN_GAMEPLAY_LOG_SIZE {
            return Err(RivesError::InvalidPayload(format!(
                "tape too small: {} bytes (minimum {})",
                tape.len(),
                MIN_GAMEPLAY_LOG_SIZE
            )));
        }
        if BYTES32_SIZE + tape.len() > MAX_GAMEPLAY_PAYLOAD_SIZE {
            return Err(RivesError::InvalidPayload(format!(
                "payload too large: {} bytes (maximum {})",
                BYTES32_SIZE + tape.len(),
                MAX_GAMEPLAY_PAYLOAD_SIZE
            )));
        }
        Ok(Self { outhash, tape })
    }

    pub fn from_parts(outhash_hex: &str, tape: Vec<u8>) -> RivesResult<Self> {
        Self::new(Outhash::from_hex(outhash_hex)?, tape)
    }

    /// Splits a submitted input back into outhash and tape.
    pub fn from_bytes(bytes: &[u8]) -> RivesResult<Self> {
        if bytes.len() < BYTES32_SIZE {
            return Err(RivesError::InvalidPayload(format!(
                "input shorter than an outhash: {} bytes",
                bytes.len()
            )));
        }
        let mut outhash = [0u8; BYTES32_SIZE];
        outhash.copy_from_slice(&bytes[..BYTES32_SIZE]);
        Ok(Self {
            outhash: Outhash(outhash),
            tape: bytes[BYTES32_SIZE..].to_vec(),
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(BYTES32_SIZE + self.tape.len());
        bytes.extend_from_slice(&self.outhash.0);
        bytes.extend_from_slice(&self.tape);
        bytes
    }

    /// `0x<outhash><tape>`
    pub fn to_hex(&self) -> String {
        encode_hex(self.to_bytes())
    }

    pub fn size(&self) -> usize {
        BYTES32_SIZE + self.tape.len()
    }
}

impl fmt::Debug for GameplayPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameplayPayload")
            .field("outhash", &self.outhash)
            .field("tape_len", &self.tape.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::is_hex;

    const NOP_GAMEPLAY_LOG: [u8; 16] = [1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x0f, 0, 0, 0];

    #[test]
    fn test_payload_layout() {
        let outhash = "e0855939b7b746e5c554e921d5cb335fa12b35323876c69d0e03e685a07bb862";
        let payload = GameplayPayload::from_parts(outhash, NOP_GAMEPLAY_LOG.to_vec()).unwrap();
        let hex = payload.to_hex();

        assert!(is_hex(&hex));
        assert_eq!(&hex[2..66], outhash);
        assert_eq!(&hex[66..], hex::encode(NOP_GAMEPLAY_LOG));
        assert_eq!(payload.size(), 48);
    }

    #[test]
    fn test_outhash_accepts_prefix() {
        let raw = "ac1c180cce3e15f04a2a92ebaeae174d56957717e42ab2e8296bab6d78de533a";
        let a = Outhash::from_hex(raw).unwrap();
        let b = Outhash::from_hex(&format!("0x{}", raw)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_bad_outhash() {
        assert!(Outhash::from_hex("1234").is_err());
        assert!(Outhash::from_hex(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn test_size_bounds() {
        let outhash = Outhash([0u8; 32]);
        assert!(GameplayPayload::new(outhash, vec![0u8; 15]).is_err());
        assert!(GameplayPayload::new(outhash, vec![0u8; 16]).is_ok());
        assert!(GameplayPayload::new(outhash, vec![0u8; MAX_GAMEPLAY_PAYLOAD_SIZE - 32]).is_ok());
        assert!(GameplayPayload::new(outhash, vec![0u8; MAX_GAMEPLAY_PAYLOAD_SIZE - 31]).is_err());
    }

    #[test]
    fn test_from_bytes_splits_outhash() {
        let payload = GameplayPayload::new(Outhash([7u8; 32]), NOP_GAMEPLAY_LOG.to_vec()).unwrap();
        let parsed = GameplayPayload::from_bytes(&payload.to_bytes()).unwrap();
        assert_eq!(parsed.tape, NOP_GAMEPLAY_LOG.to_vec());
        assert_eq!(parsed.outhash, Outhash([7u8; 32]));
        assert!(GameplayPayload::from_bytes(&[0u8; 31]).is_err());
    }
}
