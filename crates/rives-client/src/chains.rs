use rives_types::{ChainId, RivesError, RivesResult};
use serde::Serialize;

pub const ANVIL: ChainId = ChainId(31_337);
pub const CANNON: ChainId = ChainId(13_370);
pub const SEPOLIA: ChainId = ChainId(11_155_111);
pub const BASE_SEPOLIA: ChainId = ChainId(84_532);
pub const MAINNET: ChainId = ChainId(1);
pub const BASE: ChainId = ChainId(8_453);

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChainInfo {
    pub id: ChainId,
    pub name: String,
    pub rpc_url: String,
}

/// Chains the client can connect a wallet to. The Cannon devnet is served
/// by the rollup node itself, so its RPC URL depends on the node URL.
pub fn supported_chains(node_url: &str) -> Vec<ChainInfo> {
    let node_url = node_url.trim_end_matches('/');
    let chain = |id: ChainId, name: &str, rpc_url: String| ChainInfo {
        id,
        name: name.to_string(),
        rpc_url,
    };

    vec![
        chain(ANVIL, "Anvil", "http://127.0.0.1:8545".into()),
        chain(CANNON, "Cannon", format!("{}/anvil", node_url)),
        chain(SEPOLIA, "Sepolia", "https://rpc.sepolia.org".into()),
        chain(BASE_SEPOLIA, "Base Sepolia", "https://sepolia.base.org".into()),
        chain(MAINNET, "Ethereum", "https://eth.merkle.io".into()),
        chain(BASE, "Base", "https://mainnet.base.org".into()),
    ]
}

pub fn chain_for(id: ChainId, node_url: &str) -> RivesResult<ChainInfo> {
    supported_chains(node_url)
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| RivesError::Chain(format!("Unsupported chain ID: {}", id.to_hex())))
}
