mod commands;
mod config_cmd;
mod info;
mod leaderboard;
mod replay;
mod status;
mod submit;
mod utils;
mod wallet;

pub use commands::{Cli, Commands};
pub use config_cmd::handle_config;
pub use info::{show_chains, show_emulator_url};
pub use leaderboard::show_leaderboard;
pub use replay::handle_replay;
pub use status::show_status;
pub use submit::handle_submit;
pub use utils::{config_path, load_config, setup_logging};
pub use wallet::show_wallet;
