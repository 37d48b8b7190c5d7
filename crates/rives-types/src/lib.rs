#![forbid(unsafe_code)]
#![warn(clippy::all)]

mod address;
mod chain;
pub mod constants;
mod error;
mod gameplay;
pub mod encoding;
mod report;

pub use address::EthAddress;
pub use chain::ChainId;
pub use constants::*;
pub use error::{short_message, RivesError, RivesResult};
pub use gameplay::{GameplayPayload, Outhash};
pub use report::{ErrorReport, HandleStatus};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_message() {
        assert_eq!(
            short_message("User rejected the request. Details: denied"),
            "User rejected the request"
        );
        assert_eq!(short_message("no sentence boundary"), "no sentence boundary");
        assert_eq!(short_message(""), "");
    }

    #[test]
    fn test_error_detail_drops_prefix() {
        let err = RivesError::Wallet("Wallet on wrong chain".into());
        assert_eq!(err.to_string(), "Wallet error: Wallet on wrong chain");
        assert_eq!(err.detail(), "Wallet on wrong chain");
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(ChainId::parse(DEFAULT_CHAIN_ID).unwrap().value(), 13370);
        assert!(EthAddress::from_hex(DEFAULT_APPLICATION_ADDRESS).is_ok());
        assert!(EthAddress::from_hex(INPUT_BOX_ADDRESS).is_ok());
        assert_eq!(VERIFICATION_NOTICE_SIZE, 128);
    }
}
