use super::bindings::{InputAddedFilter, InputBox};
use super::config::SubmitterConfig;
use ethers::{
    contract::parse_log,
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{Address, Bytes, H256, U256},
};
use rives_types::encoding::{decode_hex, is_hex};
use rives_types::{short_message, ChainId, EthAddress, GameplayPayload, RivesError, RivesResult};
use std::sync::Arc;
use tracing::{info, warn};

pub const SUBMITTED_MESSAGE: &str = "Gameplay submitted";
pub const INVALID_PAYLOAD_MESSAGE: &str = "Error: Invalid payload format";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub tx_hash: H256,
    pub block_number: Option<u64>,
    /// Index assigned by the InputBox, when the receipt carries the event.
    pub input_index: Option<u64>,
}

/// Parses a `0x<outhash><tape>` payload, enforcing the verifier's size bounds.
pub fn parse_payload_hex(payload: &str) -> RivesResult<GameplayPayload> {
    if !is_hex(payload) {
        return Err(RivesError::InvalidPayload("payload is not 0x-prefixed hex".into()));
    }
    let bytes = decode_hex(payload).map_err(|e| RivesError::InvalidPayload(e.detail().to_string()))?;
    let parsed = GameplayPayload::from_bytes(&bytes)?;
    GameplayPayload::new(parsed.outhash, parsed.tape)
}

/// User-facing outcome of a submission.
pub fn submission_message(result: &RivesResult<SubmissionReceipt>) -> String {
    match result {
        Ok(_) => SUBMITTED_MESSAGE.to_string(),
        Err(RivesError::InvalidPayload(_)) => INVALID_PAYLOAD_MESSAGE.to_string(),
        Err(e) => short_message(e.detail()).to_string(),
    }
}

/// Sends gameplay payloads to the InputBox on behalf of a local wallet.
pub struct GameplaySubmitter {
    provider_url: String,
    provider: Option<Arc<Provider<Http>>>,
    signer: Option<Arc<SignerMiddleware<Provider<Http>, LocalWallet>>>,
    input_box: Address,
    application: Address,
    chain_id: ChainId,
}

impl GameplaySubmitter {
    pub fn new(config: SubmitterConfig) -> Self {
        Self {
            provider_url: config.rpc_url,
            provider: None,
            signer: None,
            input_box: Address::from_slice(&config.input_box.0),
            application: Address::from_slice(&config.application.0),
            chain_id: config.chain_id,
        }
    }

    pub async fn connect(&mut self) -> RivesResult<()> {
        info!("Connecting to RPC: {}", self.provider_url);

        let provider = Provider::<Http>::try_from(self.provider_url.as_str())
            .map_err(|e| RivesError::Network(format!("Failed to create provider: {}", e)))?;

        let chain_id = provider
            .get_chainid()
            .await
            .map_err(|e| RivesError::Network(format!("Failed to get chain ID: {}", e)))?;

        if chain_id.as_u64() != self.chain_id.value() {
            return Err(wrong_chain(self.chain_id, chain_id.as_u64()));
        }

        self.provider = Some(Arc::new(provider));
        info!("Connected to chain {}", self.chain_id);
        Ok(())
    }

    pub async fn set_wallet(&mut self, private_key: &str) -> RivesResult<EthAddress> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| RivesError::Network("Not connected".into()))?
            .clone();

        let wallet: LocalWallet = private_key
            .trim()
            .parse()
            .map_err(|e| RivesError::Wallet(format!("Invalid private key: {}", e)))?;

        let wallet = wallet.with_chain_id(self.chain_id.value());
        let address = wallet.address();

        let client = SignerMiddleware::new((*provider).clone(), wallet);
        self.signer = Some(Arc::new(client));

        info!("Wallet set: {:?}", address);
        Ok(EthAddress(address.0))
    }

    pub fn is_connected(&self) -> bool {
        self.provider.is_some()
    }

    pub fn address(&self) -> Option<EthAddress> {
        self.signer.as_ref().map(|s| EthAddress(s.address().0))
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Simulates `addInput`, sends it with zero value and waits for the receipt.
    pub async fn submit(&self, payload: &GameplayPayload) -> RivesResult<SubmissionReceipt> {
        let signer = self
            .signer
            .as_ref()
            .ok_or_else(|| RivesError::Wallet("No wallet connected".into()))?;

        let wallet_chain = signer
            .get_chainid()
            .await
            .map_err(|e| RivesError::Network(format!("Failed to get chain ID: {}", e)))?;
        if wallet_chain.as_u64() != self.chain_id.value() {
            return Err(wrong_chain(self.chain_id, wallet_chain.as_u64()));
        }

        info!("Submitting gameplay ({} bytes)", payload.size());

        let input_box = InputBox::new(self.input_box, signer.clone());
        let call = input_box
            .add_input(self.application, Bytes::from(payload.to_bytes()))
            .value(U256::zero());

        call.call()
            .await
            .map_err(|e| RivesError::Contract(format!("Simulation failed: {}", e)))?;

        let pending = call
            .send()
            .await
            .map_err(|e| RivesError::Contract(format!("Failed to send transaction: {}", e)))?;
        let tx_hash = pending.tx_hash();
        info!("Gameplay transaction sent: {:?}", tx_hash);

        let receipt = pending
            .await
            .map_err(|e| RivesError::Contract(format!("Failed to get receipt: {}", e)))?
            .ok_or_else(|| RivesError::Contract("Transaction dropped from mempool".into()))?;

        if receipt.status.map(|s| s.as_u64()) == Some(0) {
            return Err(RivesError::Contract(format!("Transaction {:?} reverted", tx_hash)));
        }

        let input_index = receipt
            .logs
            .iter()
            .filter(|log| log.address == self.input_box)
            .find_map(|log| parse_log::<InputAddedFilter>(log.clone()).ok())
            .and_then(|event| {
                if event.index.bits() > 64 {
                    warn!("Input index out of range: {}", event.index);
                    None
                } else {
                    Some(event.index.as_u64())
                }
            });

        info!("Gameplay accepted as input {:?}", input_index);
        Ok(SubmissionReceipt {
            tx_hash,
            block_number: receipt.block_number.map(|b| b.as_u64()),
            input_index,
        })
    }

    /// Validates a hex payload and submits it.
    pub async fn submit_hex(&self, payload: &str) -> RivesResult<SubmissionReceipt> {
        let payload = parse_payload_hex(payload)?;
        self.submit(&payload).await
    }
}

fn wrong_chain(expected: ChainId, actual: u64) -> RivesError {
    RivesError::Wallet(format!(
        "Wallet on wrong chain. Expected {}, got {}",
        expected,
        actual
    ))
}
