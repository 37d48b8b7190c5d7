use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "rives")]
#[command(version = BUILD_VERSION)]
#[command(author = "RIVES <contact@rives.io>")]
#[command(about = "RIVES - Verifiable retro gaming leaderboard client")]
#[command(long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(short, long, global = true, value_name = "FILE", help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,

    #[arg(short, long, global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[arg(long, global = true, value_name = "FILE", help = "Write logs to file")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text", help = "Output format")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show the leaderboard")]
    #[command(long_about = "Fetch verification notices from the rollup node and print them ranked by score (highest first), ties broken by earliest timestamp.")]
    Leaderboard {
        #[arg(long, help = "Print the replay link of each row")]
        links: bool,
    },

    #[command(about = "Submit a gameplay to the InputBox")]
    #[command(long_about = "Submit a gameplay tape as an input to the rollup application.\n\nThe wallet key is read from RIVES_WALLET_KEY. The payload is either given as --outhash/--tape or read from an emulator finish message (JSON).")]
    Submit {
        #[arg(long, value_name = "HEX", requires = "tape", conflicts_with = "message", help = "Outhash reported by the emulator (64 hex digits)")]
        outhash: Option<String>,
        #[arg(long, value_name = "FILE", help = "Tape file recorded by the emulator")]
        tape: Option<PathBuf>,
        #[arg(long, value_name = "FILE", help = "Emulator finish message (JSON)")]
        message: Option<PathBuf>,
    },

    #[command(about = "Load a submitted tape for replay")]
    Replay {
        #[arg(value_name = "LINK", help = "Replay link or query (user=0x..&input_index=N)")]
        link: Option<String>,
        #[arg(long, help = "Input index to replay")]
        input_index: Option<u64>,
        #[arg(long, help = "Player address (emulator entropy)")]
        user: Option<String>,
        #[arg(long, value_name = "FILE", help = "Write the raw tape to a file")]
        output: Option<PathBuf>,
    },

    #[command(about = "Show the verification outcome of an input")]
    Status {
        #[arg(help = "Input index")]
        input_index: u64,
    },

    #[command(about = "Print the emulator URL")]
    EmulatorUrl {
        #[arg(long, help = "Tape URL to preload")]
        tape_url: Option<String>,
        #[arg(long, help = "Start in simple mode")]
        simple: bool,
        #[arg(long, help = "Start playing immediately")]
        autoplay: bool,
        #[arg(long, help = "Entropy (usually the player address)")]
        entropy: Option<String>,
    },

    #[command(about = "Connect the configured wallet and show its status")]
    Wallet,

    #[command(about = "Manage configuration")]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    #[command(about = "List supported chains")]
    Chains,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    #[command(about = "Show the effective configuration")]
    Show,
    #[command(about = "Write a default configuration file")]
    Init {
        #[arg(short, long, help = "Overwrite existing configuration")]
        force: bool,
    },
    #[command(about = "Validate configuration")]
    Validate,
}
