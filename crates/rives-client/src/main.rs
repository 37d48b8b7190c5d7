mod cli;

use clap::Parser;
use cli::{
    config_path, handle_config, handle_replay, handle_submit, load_config, setup_logging,
    show_chains, show_emulator_url, show_leaderboard, show_status, show_wallet, Cli, Commands,
};
use rives_client::EmulatorParams;
use rives_types::RivesResult;

#[tokio::main]
async fn main() -> RivesResult<()> {
    let cli = Cli::parse();
    let config_path = config_path(&cli);

    if let Commands::Config { action } = cli.command {
        return handle_config(&config_path, action);
    }

    let config = load_config(&config_path)?;
    setup_logging(&cli, &config)?;

    match cli.command {
        Commands::Leaderboard { links } => {
            show_leaderboard(&config, links, &cli.format).await?;
        }
        Commands::Submit { outhash, tape, message } => {
            handle_submit(&config, outhash, tape, message, &cli.format).await?;
        }
        Commands::Replay { link, input_index, user, output } => {
            handle_replay(&config, link, input_index, user, output, &cli.format).await?;
        }
        Commands::Status { input_index } => {
            show_status(&config, input_index, &cli.format).await?;
        }
        Commands::EmulatorUrl { tape_url, simple, autoplay, entropy } => {
            let params = EmulatorParams {
                tape_url,
                simple: simple.then_some(true),
                autoplay: autoplay.then_some(true),
                entropy,
                extra: None,
            };
            show_emulator_url(&config, params, &cli.format)?;
        }
        Commands::Wallet => {
            show_wallet(&config, &cli.format).await?;
        }
        Commands::Chains => {
            show_chains(&config, &cli.format)?;
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}
