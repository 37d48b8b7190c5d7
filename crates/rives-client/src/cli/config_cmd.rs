use super::commands::ConfigAction;
use super::utils::{fail, ok};
use rives_client::RivesConfig;
use rives_types::{RivesError, RivesResult};
use std::path::Path;

pub fn handle_config(config_path: &Path, action: Option<ConfigAction>) -> RivesResult<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            let config = RivesConfig::load(config_path)?;
            let content = toml::to_string_pretty(&config)
                .map_err(|e| RivesError::Config(format!("Failed to serialize config: {}", e)))?;
            if !config_path.exists() {
                println!("\x1b[38;5;245m# No configuration file at {:?}, showing defaults\x1b[0m", config_path);
            }
            println!("{}", content);
        }
        Some(ConfigAction::Init { force }) => {
            if config_path.exists() && !force {
                fail(&format!("Configuration already exists at {:?} (use --force)", config_path));
                return Ok(());
            }
            RivesConfig::default().save(config_path)?;
            ok(&format!("Configuration written to {:?}", config_path));
        }
        Some(ConfigAction::Validate) => match RivesConfig::load(config_path) {
            Ok(_) => ok("Configuration is valid"),
            Err(e) => fail(&format!("Configuration error: {}", e)),
        },
    }
    Ok(())
}
