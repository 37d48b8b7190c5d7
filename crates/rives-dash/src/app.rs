//! Application state for the RIVES Dashboard

use crate::theme::Theme;
use chrono::{DateTime, Utc};
use rives_client::leaderboard::{LeaderboardTable, LeaderboardView, RenderState};
use rives_client::{
    prepare_replay, LocalWalletBackend, NodeClient, OutputSource, ReplayRequest, ReplayTarget, RivesConfig,
    SessionStatus, WalletEvent, WalletSession,
};
use rives_types::{EthAddress, RivesResult};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

pub const TAB_COUNT: u8 = 3;
pub const TAB_TITLES: [&str; TAB_COUNT as usize] = ["Leaderboard", "Replay", "Wallet"];

/// What the replay tab shows.
#[derive(Clone, Debug, Default)]
pub enum ReplayPanel {
    #[default]
    Empty,
    Loading(ReplayTarget),
    Ready {
        target: ReplayTarget,
        tape_size: usize,
        emulator_url: String,
        upload: String,
    },
    Failed(String),
}

#[derive(Clone, Debug, Default)]
pub struct WalletPanel {
    pub connected: bool,
    pub address: Option<EthAddress>,
    pub chain: Option<String>,
    pub message: String,
    pub entropy: Option<String>,
    pub emulator_url: String,
}

/// Snapshot read by the UI on every frame.
pub struct AppData {
    pub table: LeaderboardTable,
    pub state: RenderState,
    pub last_refresh: Option<DateTime<Utc>>,
    pub replay: ReplayPanel,
    pub wallet: WalletPanel,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            table: LeaderboardTable::empty(),
            state: RenderState::Idle,
            last_refresh: None,
            replay: ReplayPanel::Empty,
            wallet: WalletPanel::default(),
        }
    }
}

pub struct App {
    pub tab: u8,
    pub theme: Theme,
    pub config: Arc<RivesConfig>,
    pub data: Arc<RwLock<AppData>>,
    pub view: Arc<LeaderboardView>,
    pub selected: usize,
    pub show_help: bool,
    pub frame: u64,
    source: Arc<NodeClient>,
    session: Arc<Mutex<WalletSession>>,
    backend: Option<Arc<LocalWalletBackend>>,
}

impl App {
    pub fn new(config: RivesConfig, theme: Theme) -> RivesResult<Self> {
        let source = NodeClient::new(&config.node_url, config.request_timeout())?;
        let session = WalletSession::new(config.chain_id, config.node_url.clone());

        let mut wallet = WalletPanel {
            emulator_url: emulator_link(&config, &session),
            ..Default::default()
        };

        let backend = match config.chain().and_then(|chain| {
            LocalWalletBackend::new(&chain.rpc_url, RivesConfig::wallet_key().as_deref())
        }) {
            Ok(backend) => Some(Arc::new(backend)),
            Err(e) => {
                warn!("Wallet unavailable: {}", e);
                wallet.message = format!("{} (Demo Version)", rives_types::short_message(e.detail()));
                None
            }
        };

        let data = AppData {
            wallet,
            ..Default::default()
        };

        Ok(Self {
            tab: 0,
            theme,
            config: Arc::new(config),
            data: Arc::new(RwLock::new(data)),
            view: Arc::new(LeaderboardView::new()),
            selected: 0,
            show_help: false,
            frame: 0,
            source: Arc::new(source),
            session: Arc::new(Mutex::new(session)),
            backend,
        })
    }

    pub fn source(&self) -> Arc<NodeClient> {
        self.source.clone()
    }

    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    pub fn next_tab(&mut self) {
        self.tab = (self.tab + 1) % TAB_COUNT;
    }

    pub fn previous_tab(&mut self) {
        self.tab = (self.tab + TAB_COUNT - 1) % TAB_COUNT;
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        let rows = self.row_count();
        if rows > 0 && self.selected + 1 < rows {
            self.selected += 1;
        }
    }

    fn row_count(&self) -> usize {
        self.data
            .try_read()
            .map(|d| d.table.entries().count())
            .unwrap_or(0)
    }

    /// Replay target of the selected row, if it has one.
    pub fn selected_target(&self) -> Option<ReplayTarget> {
        let data = self.data.try_read().ok()?;
        let target = data.table.entries().nth(self.selected).and_then(|row| row.nav);
        target
    }

    /// Starts a leaderboard render in the background.
    pub fn refresh(&self) {
        let view = self.view.clone();
        let source = self.source.clone();
        let data = self.data.clone();
        let application = self.config.application_address.clone();

        tokio::spawn(async move {
            refresh_leaderboard(&view, source.as_ref(), &application, &data).await;
        });
    }

    /// Re-runs wallet reconciliation in the background.
    pub fn connect_wallet(&self) {
        let Some(backend) = self.backend.clone() else {
            return;
        };
        let session = self.session.clone();
        let data = self.data.clone();
        let config = self.config.clone();

        tokio::spawn(async move {
            let mut session = session.lock().await;
            session.reconcile(backend.as_ref(), WalletEvent::Connect).await;
            let panel = wallet_panel(&config, &session);
            data.write().await.wallet = panel;
        });
    }

    /// Switches to the replay tab and loads the selected row's tape.
    pub fn open_replay(&mut self) {
        let Some(target) = self.selected_target() else {
            return;
        };
        self.tab = 1;

        let source = self.source.clone();
        let data = self.data.clone();
        let config = self.config.clone();

        tokio::spawn(async move {
            data.write().await.replay = ReplayPanel::Loading(target);
            let panel = load_replay(&config, source.as_ref(), target).await;
            data.write().await.replay = panel;
        });
    }
}

pub async fn refresh_leaderboard<S: OutputSource + ?Sized>(
    view: &LeaderboardView,
    source: &S,
    application: &str,
    data: &RwLock<AppData>,
) {
    let displayed = view.refresh(source, application).await;
    let table = view.table().await;

    let mut data = data.write().await;
    data.state = view.state();
    if displayed {
        data.table = table;
        data.last_refresh = Some(Utc::now());
    }
}

async fn load_replay(config: &RivesConfig, source: &NodeClient, target: ReplayTarget) -> ReplayPanel {
    let result = async {
        let application = config.application()?;
        let session = prepare_replay(
            source,
            &application,
            ReplayRequest::try_from(target)?,
            &config.emulator_url,
            &config.cartridge_url,
        )
        .await?;
        let upload = session.upload_message().to_json()?;
        Ok::<_, rives_types::RivesError>((session, upload))
    }
    .await;

    match result {
        Ok((session, upload)) => {
            info!("Replay ready for input {}", target.input_index);
            ReplayPanel::Ready {
                target,
                tape_size: session.tape.len(),
                emulator_url: session.emulator_url,
                upload,
            }
        }
        Err(e) => {
            warn!("Replay failed: {}", e);
            ReplayPanel::Failed(rives_types::short_message(e.detail()).to_string())
        }
    }
}

fn emulator_link(config: &RivesConfig, session: &WalletSession) -> String {
    rives_client::emulator_url(&config.emulator_url, &config.cartridge_url, &session.emulator_params())
        .unwrap_or_else(|e| e.detail().to_string())
}

fn wallet_panel(config: &RivesConfig, session: &WalletSession) -> WalletPanel {
    let chain = match session.status() {
        SessionStatus::Connected { chain, .. } => Some(chain.name.clone()),
        _ => None,
    };
    WalletPanel {
        connected: session.is_connected(),
        address: session.address(),
        chain,
        message: session.message().to_string(),
        entropy: session.emulator_params().entropy,
        emulator_url: emulator_link(config, session),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ethers::types::{I256, U256};
    use rives_client::node::{InputRecord, OutputFilter, Page, RawOutput, ReportFilter, ReportRecord};
    use rives_client::VerificationNotice;
    use rives_types::RivesError;
    use std::time::Duration;

    /// Node that answers with no outputs after a delay.
    struct SlowSource(Duration);

    #[async_trait]
    impl OutputSource for SlowSource {
        fn node_url(&self) -> &str {
            "http://slow"
        }

        async fn list_outputs(
            &self,
            _application: &EthAddress,
            _filter: &OutputFilter,
        ) -> RivesResult<Page<RawOutput>> {
            tokio::time::sleep(self.0).await;
            Ok(Page { data: Vec::new(), pagination: None })
        }

        async fn get_input(&self, _application: &EthAddress, input_index: u64) -> RivesResult<InputRecord> {
            Err(RivesError::Rpc(format!("input {} not found", input_index)))
        }

        async fn list_reports(
            &self,
            _application: &EthAddress,
            _filter: &ReportFilter,
        ) -> RivesResult<Page<ReportRecord>> {
            Ok(Page { data: Vec::new(), pagination: None })
        }
    }

    fn notices() -> Vec<VerificationNotice> {
        vec![
            VerificationNotice {
                user: Some(EthAddress([7u8; 20])),
                timestamp: U256::from(1u64),
                score: I256::from(9),
                input_index: U256::zero(),
            },
            VerificationNotice {
                user: None,
                timestamp: U256::from(2u64),
                score: I256::from(5),
                input_index: U256::one(),
            },
        ]
    }

    fn app() -> App {
        App::new(RivesConfig::default(), Theme::default()).unwrap()
    }

    #[test]
    fn test_tab_cycle() {
        let mut app = app();
        app.previous_tab();
        assert_eq!(app.tab, 2);
        app.next_tab();
        app.next_tab();
        assert_eq!(app.tab, 1);
    }

    #[tokio::test]
    async fn test_selection_follows_table() {
        let mut app = app();
        app.select_next();
        assert_eq!(app.selected, 0);
        assert!(app.selected_target().is_none());

        app.data.write().await.table = LeaderboardTable::from_notices(&notices());
        assert_eq!(
            app.selected_target(),
            Some(ReplayTarget { user: EthAddress([7u8; 20]), input_index: U256::zero() })
        );

        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 1);
        assert!(app.selected_target().is_none());

        app.select_previous();
        app.select_previous();
        assert_eq!(app.selected, 0);
    }

    #[tokio::test]
    async fn test_open_replay_without_target_stays() {
        let mut app = app();
        app.open_replay();
        assert_eq!(app.tab, 0);
    }

    #[tokio::test]
    async fn test_refresh_reports_settled_state() {
        let view = LeaderboardView::new();
        let data = RwLock::new(AppData::default());
        let source = NodeClient::new("", Duration::from_secs(1)).unwrap();

        refresh_leaderboard(&view, &source, rives_types::DEFAULT_APPLICATION_ADDRESS, &data).await;

        let data = data.read().await;
        assert_eq!(data.state, RenderState::ErrorDisplayed);
        assert!(data.table.is_error());
        assert!(data.last_refresh.is_some());
    }

    #[tokio::test]
    async fn test_discarded_refresh_keeps_newer_state() {
        let view = Arc::new(LeaderboardView::new());
        let data = Arc::new(RwLock::new(AppData::default()));

        let slow = {
            let view = view.clone();
            let data = data.clone();
            tokio::spawn(async move {
                let source = SlowSource(Duration::from_millis(200));
                refresh_leaderboard(&view, &source, rives_types::DEFAULT_APPLICATION_ADDRESS, &data).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        let fast = NodeClient::new("", Duration::from_secs(1)).unwrap();
        refresh_leaderboard(&view, &fast, rives_types::DEFAULT_APPLICATION_ADDRESS, &data).await;
        slow.await.unwrap();

        let data = data.read().await;
        assert_eq!(data.state, RenderState::ErrorDisplayed);
        assert!(data.table.is_error());
    }
}
