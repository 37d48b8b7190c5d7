use thiserror::Error;

#[derive(Error, Debug)]
pub enum RivesError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Chain error: {0}")]
    Chain(String),

    #[error("Contract error: {0}")]
    Contract(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Emulator error: {0}")]
    Emulator(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl RivesError {
    /// Message without the category prefix, as shown to users.
    pub fn detail(&self) -> &str {
        match self {
            RivesError::InvalidAddress(m)
            | RivesError::InvalidHex(m)
            | RivesError::InvalidPayload(m)
            | RivesError::Network(m)
            | RivesError::Rpc(m)
            | RivesError::Decode(m)
            | RivesError::Wallet(m)
            | RivesError::Chain(m)
            | RivesError::Contract(m)
            | RivesError::Config(m)
            | RivesError::Emulator(m)
            | RivesError::Serialization(m)
            | RivesError::Io(m) => m,
        }
    }
}

pub type RivesResult<T> = Result<T, RivesError>;

/// Truncates a message at its first sentence boundary.
///
/// Wallet and contract errors are often several sentences long; the
/// front-ends only show the first one.
pub fn short_message(message: &str) -> &str {
    match message.find('.') {
        Some(idx) => &message[..idx],
        None => message,
    }
}
