use super::{render_with_progress, LeaderboardTable, RenderState};
use crate::node::OutputSource;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderTicket(u64);

impl RenderTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

struct Applied {
    ticket: u64,
    table: LeaderboardTable,
}

/// Shared leaderboard display.
///
/// Renders may overlap; each one takes a ticket up front and its result is
/// applied only if no newer render has been applied already.
pub struct LeaderboardView {
    issued: AtomicU64,
    state: AtomicU8,
    current: RwLock<Applied>,
}

impl LeaderboardView {
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            state: AtomicU8::new(encode_state(RenderState::Idle)),
            current: RwLock::new(Applied {
                ticket: 0,
                table: LeaderboardTable::empty(),
            }),
        }
    }

    pub fn begin(&self) -> RenderTicket {
        RenderTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Installs `table` unless a newer render already landed.
    pub async fn apply(&self, ticket: RenderTicket, table: LeaderboardTable) -> bool {
        let mut current = self.current.write().await;
        if ticket.0 <= current.ticket {
            debug!(
                "Discarding stale render {} (showing {})",
                ticket.0, current.ticket
            );
            return false;
        }
        current.ticket = ticket.0;
        current.table = table;
        true
    }

    /// Runs one render and applies it. Returns whether it was displayed.
    pub async fn refresh<S: OutputSource + ?Sized>(&self, source: &S, application: &str) -> bool {
        let ticket = self.begin();
        let table = render_with_progress(source, application, |state| self.observe(ticket, state)).await;
        self.apply(ticket, table).await
    }

    pub async fn table(&self) -> LeaderboardTable {
        self.current.read().await.table.clone()
    }

    pub async fn applied_ticket(&self) -> u64 {
        self.current.read().await.ticket
    }

    pub fn state(&self) -> RenderState {
        decode_state(self.state.load(Ordering::SeqCst))
    }

    fn observe(&self, ticket: RenderTicket, state: RenderState) {
        // Only the newest render drives the visible state.
        if self.issued.load(Ordering::SeqCst) == ticket.0 {
            self.state.store(encode_state(state), Ordering::SeqCst);
        }
    }
}

impl Default for LeaderboardView {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_state(state: RenderState) -> u8 {
    match state {
        RenderState::Idle => 0,
        RenderState::Fetching => 1,
        RenderState::Decoding => 2,
        RenderState::Sorting => 3,
        RenderState::Rendered => 4,
        RenderState::ErrorDisplayed => 5,
    }
}

fn decode_state(value: u8) -> RenderState {
    match value {
        1 => RenderState::Fetching,
        2 => RenderState::Decoding,
        3 => RenderState::Sorting,
        4 => RenderState::Rendered,
        5 => RenderState::ErrorDisplayed,
        _ => RenderState::Idle,
    }
}
