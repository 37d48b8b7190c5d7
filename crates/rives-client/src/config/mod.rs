mod client;
mod logging;

pub use client::{RivesConfig, WALLET_KEY_ENV};
pub use logging::{LogLevel, LoggingConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use rives_types::ChainId;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_validation() {
        let config = RivesConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chain_id, ChainId(13370));
        assert_eq!(config.chain().unwrap().name, "Cannon");
    }

    #[test]
    fn test_empty_addresses_are_allowed() {
        let mut config = RivesConfig::default();
        config.node_url.clear();
        config.application_address.clear();
        assert!(config.validate().is_ok());
        assert!(config.application().is_err());
    }

    #[test]
    fn test_invalid_values() {
        let mut config = RivesConfig::default();
        config.application_address = "0x1234".into();
        assert!(config.validate().is_err());

        let mut config = RivesConfig::default();
        config.node_url = "not a url".into();
        assert!(config.validate().is_err());

        let mut config = RivesConfig::default();
        config.chain_id = ChainId(5);
        assert!(config.validate().is_err());

        let mut config = RivesConfig::default();
        config.refresh_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("RIVES_NODE_URL", "http://node:9000"),
            ("RIVES_CHAIN_ID", "31337"),
            ("RIVES_LOG_LEVEL", "debug"),
            ("RIVES_EMULATOR_URL", "http://emu"),
        ]
        .into_iter()
        .collect();

        let mut config = RivesConfig::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.node_url, "http://node:9000");
        assert_eq!(config.chain_id, ChainId(31337));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.emulator_url, "http://emu");
    }

    #[test]
    fn test_dash_log_path() {
        let dir = std::path::Path::new("/home/player/.rives");
        let mut logging = LoggingConfig::default();
        assert_eq!(logging.dash_log_path(dir), dir.join("dash.log"));

        logging.dash_file = Some("/var/log/rives-dash.log".into());
        assert_eq!(logging.dash_log_path(dir), std::path::PathBuf::from("/var/log/rives-dash.log"));
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let mut config = RivesConfig::default();
        config.apply_overrides(|k| match k {
            "RIVES_CHAIN_ID" => Some("0xnope".into()),
            "RIVES_LOG_LEVEL" => Some("loud".into()),
            _ => None,
        });
        assert_eq!(config.chain_id, ChainId(13370));
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_config_serialization() {
        let config = RivesConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
        assert!(toml_str.contains("chain_id = \"0x343a\""));
        let parsed: RivesConfig = toml::from_str(&toml_str).expect("Failed to parse");
        assert_eq!(parsed.chain_id, config.chain_id);
        assert_eq!(parsed.application_address, config.application_address);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: RivesConfig = toml::from_str("chain_id = 31337\n").unwrap();
        assert_eq!(parsed.chain_id, ChainId(31337));
        assert_eq!(parsed.refresh_interval_secs, 10);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("rives-config-{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut config = RivesConfig::default();
        config.refresh_interval_secs = 42;
        config.save(&path).unwrap();

        let loaded = RivesConfig::load(&path).unwrap();
        assert_eq!(loaded.refresh_interval_secs, 42);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
