//! Wallet session state, changed only through [`WalletSession::reconcile`].

use crate::chains::{chain_for, ChainInfo};
use crate::emulator::EmulatorParams;
use async_trait::async_trait;
use ethers::{
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
};
use rives_types::{short_message, ChainId, EthAddress, RivesError, RivesResult};
use tracing::{info, warn};

/// Something that can report the wallet's current chain and accounts.
#[async_trait]
pub trait WalletBackend: Send + Sync {
    async fn chain_id(&self) -> RivesResult<ChainId>;
    async fn accounts(&self) -> RivesResult<Vec<EthAddress>>;
}

/// Local private-key wallet on top of an HTTP provider.
pub struct LocalWalletBackend {
    provider: Provider<Http>,
    wallet: Option<LocalWallet>,
}

impl LocalWalletBackend {
    pub fn new(rpc_url: &str, private_key: Option<&str>) -> RivesResult<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| RivesError::Network(format!("Failed to create provider: {}", e)))?;

        let wallet = match private_key {
            Some(key) => Some(
                key.trim()
                    .parse::<LocalWallet>()
                    .map_err(|e| RivesError::Wallet(format!("Invalid private key: {}", e)))?,
            ),
            None => None,
        };

        Ok(Self { provider, wallet })
    }
}

#[async_trait]
impl WalletBackend for LocalWalletBackend {
    async fn chain_id(&self) -> RivesResult<ChainId> {
        let id = self
            .provider
            .get_chainid()
            .await
            .map_err(|e| RivesError::Network(format!("Failed to get chain ID: {}", e)))?;
        Ok(ChainId(id.as_u64()))
    }

    async fn accounts(&self) -> RivesResult<Vec<EthAddress>> {
        match &self.wallet {
            Some(wallet) => Ok(vec![EthAddress(wallet.address().0)]),
            None => Err(RivesError::Wallet(
                "No wallet found. Set RIVES_WALLET_KEY to connect".into(),
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletEvent {
    Connect,
    ChainChanged(ChainId),
    AccountsChanged(Vec<EthAddress>),
    Disconnect,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Disconnected,
    Connected { address: EthAddress, chain: ChainInfo },
    Failed,
}

pub struct WalletSession {
    expected_chain: ChainId,
    node_url: String,
    status: SessionStatus,
    message: String,
    generation: u64,
}

impl WalletSession {
    pub fn new(expected_chain: ChainId, node_url: impl Into<String>) -> Self {
        Self {
            expected_chain,
            node_url: node_url.into(),
            status: SessionStatus::Disconnected,
            message: String::new(),
            generation: 0,
        }
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Incremented on every reconciliation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn address(&self) -> Option<EthAddress> {
        match &self.status {
            SessionStatus::Connected { address, .. } => Some(*address),
            _ => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.address().is_some()
    }

    /// Simple mode; once connected the lower-cased address is the entropy.
    pub fn emulator_params(&self) -> EmulatorParams {
        match self.address() {
            Some(address) => EmulatorParams::simple().with_entropy(address.to_hex()),
            None => EmulatorParams::simple(),
        }
    }

    /// Applies a wallet event and returns the resulting status.
    pub async fn reconcile<B: WalletBackend + ?Sized>(
        &mut self,
        backend: &B,
        event: WalletEvent,
    ) -> &SessionStatus {
        self.generation += 1;

        let outcome = match event {
            WalletEvent::Disconnect => {
                self.status = SessionStatus::Disconnected;
                self.message = "Wallet disconnected".to_string();
                info!("Wallet disconnected");
                return &self.status;
            }
            WalletEvent::Connect => self.connect(backend, None, None).await,
            WalletEvent::ChainChanged(chain) => self.connect(backend, Some(chain), None).await,
            WalletEvent::AccountsChanged(accounts) => {
                if accounts.is_empty() {
                    self.status = SessionStatus::Disconnected;
                    self.message = "No accounts available".to_string();
                    return &self.status;
                }
                self.connect(backend, None, Some(accounts)).await
            }
        };

        match outcome {
            Ok((address, chain)) => {
                self.message = format!("Connected with {} on {}", address.short(), chain.name);
                info!("{}", self.message);
                self.status = SessionStatus::Connected { address, chain };
            }
            Err(e) => {
                warn!("Wallet connection failed: {}", e);
                self.message = format!("{} (Demo Version)", short_message(e.detail()));
                self.status = SessionStatus::Failed;
            }
        }
        &self.status
    }

    async fn connect<B: WalletBackend + ?Sized>(
        &self,
        backend: &B,
        chain: Option<ChainId>,
        accounts: Option<Vec<EthAddress>>,
    ) -> RivesResult<(EthAddress, ChainInfo)> {
        let chain = match chain {
            Some(chain) => chain,
            None => backend.chain_id().await?,
        };
        if chain != self.expected_chain {
            return Err(RivesError::Wallet(format!(
                "Wallet on wrong chain. Expected {}, got {}",
                self.expected_chain.to_hex(),
                chain.to_hex()
            )));
        }
        let info = chain_for(chain, &self.node_url)?;

        let accounts = match accounts {
            Some(accounts) => accounts,
            None => backend.accounts().await?,
        };
        let address = accounts
            .first()
            .copied()
            .ok_or_else(|| RivesError::Wallet("No accounts available".into()))?;

        Ok((address, info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulator::emulator_url;

    struct StubWallet {
        chain: RivesResult<ChainId>,
        accounts: Vec<EthAddress>,
    }

    #[async_trait]
    impl WalletBackend for StubWallet {
        async fn chain_id(&self) -> RivesResult<ChainId> {
            match &self.chain {
                Ok(id) => Ok(*id),
                Err(e) => Err(RivesError::Network(e.detail().to_string())),
            }
        }

        async fn accounts(&self) -> RivesResult<Vec<EthAddress>> {
            if self.accounts.is_empty() {
                return Err(RivesError::Wallet("User rejected the request. Details: denied".into()));
            }
            Ok(self.accounts.clone())
        }
    }

    fn account() -> EthAddress {
        EthAddress::from_hex("0x70997970C51812dc3A010C7d01b50e0d17dc79C8").unwrap()
    }

    fn cannon() -> ChainId {
        ChainId::parse("0x343A").unwrap()
    }

    fn session() -> WalletSession {
        WalletSession::new(cannon(), "http://localhost:8080")
    }

    #[tokio::test]
    async fn test_connect() {
        let backend = StubWallet { chain: Ok(cannon()), accounts: vec![account()] };
        let mut session = session();
        assert_eq!(session.emulator_params(), EmulatorParams::simple());

        session.reconcile(&backend, WalletEvent::Connect).await;
        assert_eq!(session.address(), Some(account()));
        assert_eq!(session.message(), "Connected with 0x7099...79C8 on Cannon");
        assert_eq!(
            session.emulator_params().entropy.as_deref(),
            Some("0x70997970c51812dc3a010c7d01b50e0d17dc79c8")
        );
        assert_eq!(
            emulator_url("https://emulator.rives.io", "cart", &session.emulator_params()).unwrap(),
            "https://emulator.rives.io/#light=100&cartridge=cart&simple=true\
             &entropy=0x70997970c51812dc3a010c7d01b50e0d17dc79c8"
        );
        assert_eq!(session.generation(), 1);
    }

    #[tokio::test]
    async fn test_wrong_chain() {
        let backend = StubWallet { chain: Ok(ChainId(1)), accounts: vec![account()] };
        let mut session = session();

        let status = session.reconcile(&backend, WalletEvent::Connect).await.clone();
        assert_eq!(status, SessionStatus::Failed);
        assert_eq!(session.message(), "Wallet on wrong chain (Demo Version)");
        assert_eq!(session.emulator_params(), EmulatorParams::simple());
    }

    #[tokio::test]
    async fn test_rejected_request_is_truncated() {
        let backend = StubWallet { chain: Ok(cannon()), accounts: vec![] };
        let mut session = session();
        session.reconcile(&backend, WalletEvent::Connect).await;
        assert_eq!(session.message(), "User rejected the request (Demo Version)");
        assert!(!session.is_connected());
    }

    #[tokio::test]
    async fn test_chain_changed_uses_event_chain() {
        let backend = StubWallet { chain: Ok(cannon()), accounts: vec![account()] };
        let mut session = session();
        session.reconcile(&backend, WalletEvent::Connect).await;
        assert!(session.is_connected());

        session.reconcile(&backend, WalletEvent::ChainChanged(ChainId(31337))).await;
        assert_eq!(session.status(), &SessionStatus::Failed);

        session.reconcile(&backend, WalletEvent::ChainChanged(cannon())).await;
        assert!(session.is_connected());
    }

    #[tokio::test]
    async fn test_accounts_changed_and_disconnect() {
        let backend = StubWallet { chain: Ok(cannon()), accounts: vec![account()] };
        let other = EthAddress([0x22; 20]);
        let mut session = session();

        session.reconcile(&backend, WalletEvent::AccountsChanged(vec![other])).await;
        assert_eq!(session.address(), Some(other));

        session.reconcile(&backend, WalletEvent::AccountsChanged(vec![])).await;
        assert_eq!(session.status(), &SessionStatus::Disconnected);

        session.reconcile(&backend, WalletEvent::Connect).await;
        session.reconcile(&backend, WalletEvent::Disconnect).await;
        assert_eq!(session.status(), &SessionStatus::Disconnected);
        assert_eq!(session.message(), "Wallet disconnected");
        assert_eq!(session.generation(), 4);
    }

    #[test]
    fn test_local_backend_rejects_bad_key() {
        assert!(matches!(
            LocalWalletBackend::new("http://127.0.0.1:8545", Some("nope")),
            Err(RivesError::Wallet(_))
        ));
        assert!(LocalWalletBackend::new("http://127.0.0.1:8545", None).is_ok());
    }

    #[tokio::test]
    async fn test_local_backend_accounts() {
        let key = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        let backend = LocalWalletBackend::new("http://127.0.0.1:8545", Some(key)).unwrap();
        let accounts = backend.accounts().await.unwrap();
        assert_eq!(
            accounts,
            vec![EthAddress::from_hex("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap()]
        );

        let keyless = LocalWalletBackend::new("http://127.0.0.1:8545", None).unwrap();
        assert!(keyless.accounts().await.is_err());
    }
}
