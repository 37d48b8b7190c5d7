use super::commands::{Cli, OutputFormat};
use rives_client::logging::{init_logging, LogOptions};
use rives_client::RivesConfig;
use rives_types::RivesResult;
use std::path::{Path, PathBuf};

pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(RivesConfig::default_path)
}

pub fn load_config(path: &Path) -> RivesResult<RivesConfig> {
    RivesConfig::load(path)
}

pub fn setup_logging(cli: &Cli, config: &RivesConfig) -> RivesResult<()> {
    let options = LogOptions::from_config(&config.logging, cli.verbose, cli.quiet, cli.log_file.clone());
    init_logging(&options)
}

pub fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

pub fn ok(message: &str) {
    println!("\x1b[38;5;46m[+]\x1b[0m {}", message);
}

pub fn fail(message: &str) {
    println!("\x1b[38;5;196m[-]\x1b[0m {}", message);
}

pub fn is_json(format: &OutputFormat) -> bool {
    matches!(format, OutputFormat::Json)
}
