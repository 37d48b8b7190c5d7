use crate::config::RivesConfig;
use rives_types::{ChainId, EthAddress, RivesResult, INPUT_BOX_ADDRESS};

#[derive(Clone, Debug)]
pub struct SubmitterConfig {
    pub rpc_url: String,
    pub chain_id: ChainId,
    pub input_box: EthAddress,
    pub application: EthAddress,
}

impl SubmitterConfig {
    /// Wallet RPC of the configured chain, InputBox and application addresses.
    pub fn from_config(config: &RivesConfig) -> RivesResult<Self> {
        Ok(Self {
            rpc_url: config.chain()?.rpc_url,
            chain_id: config.chain_id,
            input_box: config.input_box()?,
            application: config.application()?,
        })
    }
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            chain_id: crate::chains::ANVIL,
            input_box: EthAddress::from_hex(INPUT_BOX_ADDRESS).unwrap_or_else(|_| EthAddress::zero()),
            application: EthAddress::zero(),
        }
    }
}
