#![forbid(unsafe_code)]
#![warn(clippy::all)]

//! Client library for the RIVES leaderboard.
//!
//! Reads verification notices from a rollup node, ranks them into a
//! leaderboard, and submits gameplay tapes to the InputBox contract.

pub mod chains;
pub mod config;
pub mod contracts;
pub mod emulator;
pub mod http_client;
pub mod leaderboard;
pub mod logging;
pub mod node;
pub mod notice;
pub mod replay;
pub mod report;
pub mod wallet;

#[cfg(test)]
mod test_support;

pub use chains::{chain_for, supported_chains, ChainInfo};
pub use config::{LogLevel, LoggingConfig, RivesConfig};
pub use contracts::{GameplaySubmitter, SubmissionReceipt, SubmitterConfig};
pub use emulator::{emulator_url, EmulatorEvent, EmulatorParams, UploadTape};
pub use leaderboard::{
    build_leaderboard, render_leaderboard, sort_notices, LeaderboardTable, LeaderboardView,
    RenderState, TableRow,
};
pub use node::{fetch_outputs, NodeClient, OutputFilter, OutputSource, OutputType, RawOutput};
pub use notice::VerificationNotice;
pub use replay::{prepare_replay, ReplayRequest, ReplaySession, ReplayTarget};
pub use report::{input_status, InputStatus};
pub use wallet::{LocalWalletBackend, SessionStatus, WalletBackend, WalletEvent, WalletSession};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
