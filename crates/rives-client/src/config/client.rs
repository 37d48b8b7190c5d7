use super::logging::LoggingConfig;
use crate::chains::{chain_for, supported_chains, ChainInfo};
use rives_types::{
    ChainId, EthAddress, RivesError, RivesResult, DEFAULT_APPLICATION_ADDRESS,
    DEFAULT_CARTRIDGE_URL, DEFAULT_CHAIN_ID, DEFAULT_EMULATOR_URL, DEFAULT_NODE_URL,
    INPUT_BOX_ADDRESS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

pub const WALLET_KEY_ENV: &str = "RIVES_WALLET_KEY";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RivesConfig {
    pub node_url: String,
    pub application_address: String,
    pub chain_id: ChainId,
    pub input_box_address: String,
    pub emulator_url: String,
    pub cartridge_url: String,
    pub refresh_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub logging: LoggingConfig,
}

impl Default for RivesConfig {
    fn default() -> Self {
        Self {
            node_url: DEFAULT_NODE_URL.to_string(),
            application_address: DEFAULT_APPLICATION_ADDRESS.to_string(),
            chain_id: ChainId::parse(DEFAULT_CHAIN_ID).unwrap_or(crate::chains::CANNON),
            input_box_address: INPUT_BOX_ADDRESS.to_string(),
            emulator_url: DEFAULT_EMULATOR_URL.to_string(),
            cartridge_url: DEFAULT_CARTRIDGE_URL.to_string(),
            refresh_interval_secs: 10,
            request_timeout_secs: 30,
            logging: LoggingConfig::default(),
        }
    }
}

impl RivesConfig {
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rives")
    }

    pub fn default_path() -> PathBuf {
        Self::default_dir().join("config.toml")
    }

    pub fn load(path: impl AsRef<Path>) -> RivesResult<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| RivesError::Config(format!("Failed to read config: {}", e)))?;

            toml::from_str(&contents)
                .map_err(|e| RivesError::Config(format!("Failed to parse config: {}", e)))?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> RivesResult<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| RivesError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| RivesError::Config(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path.as_ref(), contents)
            .map_err(|e| RivesError::Config(format!("Failed to write config: {}", e)))?;

        info!("Configuration saved to {:?}", path.as_ref());
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub(crate) fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("RIVES_NODE_URL") {
            self.node_url = url;
        }

        if let Some(address) = lookup("RIVES_APPLICATION_ADDRESS") {
            self.application_address = address;
        }

        if let Some(chain) = lookup("RIVES_CHAIN_ID") {
            match ChainId::parse(&chain) {
                Ok(id) => self.chain_id = id,
                Err(_) => warn!("Ignoring invalid RIVES_CHAIN_ID: {}", chain),
            }
        }

        if let Some(url) = lookup("RIVES_EMULATOR_URL") {
            self.emulator_url = url;
        }

        if let Some(url) = lookup("RIVES_CARTRIDGE_URL") {
            self.cartridge_url = url;
        }

        if let Some(address) = lookup("RIVES_INPUT_BOX_ADDRESS") {
            self.input_box_address = address;
        }

        if let Some(level) = lookup("RIVES_LOG_LEVEL") {
            match level.parse() {
                Ok(level) => self.logging.level = level,
                Err(e) => warn!("Ignoring RIVES_LOG_LEVEL: {}", e),
            }
        }
    }

    /// An empty node URL or application address is allowed here; the
    /// leaderboard reports it as a load error instead.
    pub fn validate(&self) -> RivesResult<()> {
        let node_url = self.node_url.trim();
        if !node_url.is_empty() {
            url::Url::parse(node_url)
                .map_err(|e| RivesError::Config(format!("Invalid node URL {}: {}", node_url, e)))?;
        }

        if !self.application_address.trim().is_empty() {
            EthAddress::from_hex(&self.application_address).map_err(|e| {
                RivesError::Config(format!("Invalid application address: {}", e.detail()))
            })?;
        }

        EthAddress::from_hex(&self.input_box_address).map_err(|e| {
            RivesError::Config(format!("Invalid InputBox address: {}", e.detail()))
        })?;

        chain_for(self.chain_id, &self.node_url).map_err(|e| RivesError::Config(e.detail().to_string()))?;

        if self.refresh_interval_secs == 0 {
            return Err(RivesError::Config("Refresh interval cannot be 0".into()));
        }

        if self.request_timeout_secs == 0 {
            return Err(RivesError::Config("Request timeout cannot be 0".into()));
        }

        Ok(())
    }

    pub fn application(&self) -> RivesResult<EthAddress> {
        if self.application_address.trim().is_empty() {
            return Err(RivesError::Config("Application address not configured".into()));
        }
        EthAddress::from_hex(&self.application_address)
    }

    pub fn input_box(&self) -> RivesResult<EthAddress> {
        EthAddress::from_hex(&self.input_box_address)
    }

    pub fn chain(&self) -> RivesResult<ChainInfo> {
        chain_for(self.chain_id, &self.node_url)
    }

    pub fn chains(&self) -> Vec<ChainInfo> {
        supported_chains(&self.node_url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn wallet_key() -> Option<String> {
        std::env::var(WALLET_KEY_ENV).ok().filter(|k| !k.trim().is_empty())
    }
}
