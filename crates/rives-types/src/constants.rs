pub const ETH_ADDRESS_SIZE: usize = 20;

pub const BYTES32_SIZE: usize = 32;

pub const ABI_WORD_SIZE: usize = 32;

/// Words in an encoded verification notice: user, timestamp, score, input index.
pub const VERIFICATION_NOTICE_WORDS: usize = 4;

pub const VERIFICATION_NOTICE_SIZE: usize = VERIFICATION_NOTICE_WORDS * ABI_WORD_SIZE;

pub const MIN_GAMEPLAY_LOG_SIZE: usize = 16;

/// Upper bound on a whole gameplay input, outhash included.
pub const MAX_GAMEPLAY_PAYLOAD_SIZE: usize = 1_048_576;

pub const LEADERBOARD_COLUMNS: usize = 5;

pub const DEFAULT_EMULATOR_URL: &str = "https://emulator.rives.io";

pub const DEFAULT_CARTRIDGE_URL: &str =
    "https://raw.githubusercontent.com/lynoferraz/rives-barebones-doom/main/cartridges/freedoom.sqfs";

/// Cannon devnet.
pub const DEFAULT_CHAIN_ID: &str = "0x343A";

pub const DEFAULT_APPLICATION_ADDRESS: &str = "0x16b3e89fb69306ddbe4a0c1247b61d414e767ecd";

pub const DEFAULT_NODE_URL: &str = "http://localhost:8080";

pub const INPUT_BOX_ADDRESS: &str = "0xc70074BDD26d8cF983Ca6A5b89b8db52D5850051";

pub const MAX_ERROR_MESSAGE_LENGTH: usize = 256;
