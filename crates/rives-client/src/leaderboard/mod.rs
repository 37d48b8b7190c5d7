//! Leaderboard pipeline: fetch outputs, decode notices, sort, render.

mod table;
mod view;

pub use table::{
    format_timestamp, LeaderboardRow, LeaderboardTable, TableRow, COLUMN_TITLES, EMPTY_MESSAGE,
    ERROR_MESSAGE,
};
pub use view::{LeaderboardView, RenderTicket};

use crate::node::{fetch_outputs, OutputFilter, OutputSource};
use crate::notice::VerificationNotice;
use rives_types::{EthAddress, RivesError, RivesResult};
use std::cmp::Ordering;
use tracing::{error, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderState {
    Idle,
    Fetching,
    Decoding,
    Sorting,
    Rendered,
    ErrorDisplayed,
}

impl std::fmt::Display for RenderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RenderState::Idle => "idle",
            RenderState::Fetching => "fetching",
            RenderState::Decoding => "decoding",
            RenderState::Sorting => "sorting",
            RenderState::Rendered => "rendered",
            RenderState::ErrorDisplayed => "error",
        };
        write!(f, "{}", label)
    }
}

/// Score descending, then timestamp ascending.
pub fn leaderboard_order(a: &VerificationNotice, b: &VerificationNotice) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.timestamp.cmp(&b.timestamp))
}

/// Stable sort into leaderboard order.
pub fn sort_notices(notices: &mut [VerificationNotice]) {
    notices.sort_by(leaderboard_order);
}

/// Fetches, decodes and sorts the application's verification notices.
pub async fn build_leaderboard<S: OutputSource + ?Sized>(
    source: &S,
    application: &EthAddress,
) -> RivesResult<Vec<VerificationNotice>> {
    build_with_progress(source, application, &mut |_| {}).await
}

async fn build_with_progress<S, F>(
    source: &S,
    application: &EthAddress,
    progress: &mut F,
) -> RivesResult<Vec<VerificationNotice>>
where
    S: OutputSource + ?Sized,
    F: FnMut(RenderState) + Send,
{
    progress(RenderState::Fetching);
    let outputs = fetch_outputs(source, application, Some(OutputFilter::notices())).await?;

    progress(RenderState::Decoding);
    let mut notices = Vec::with_capacity(outputs.len());
    for output in &outputs {
        match VerificationNotice::try_decode(output) {
            Some(notice) => notices.push(notice),
            None => warn!(
                "Skipping output {} of input {}: not a verification notice",
                output.index, output.input_index
            ),
        }
    }

    progress(RenderState::Sorting);
    sort_notices(&mut notices);
    Ok(notices)
}

/// Renders the leaderboard. Never fails: errors become a placeholder row.
pub async fn render_leaderboard<S: OutputSource + ?Sized>(
    source: &S,
    application: &str,
) -> LeaderboardTable {
    render_with_progress(source, application, |_| {}).await
}

/// Like [`render_leaderboard`], reporting each pipeline stage to `progress`.
pub async fn render_with_progress<S, F>(
    source: &S,
    application: &str,
    mut progress: F,
) -> LeaderboardTable
where
    S: OutputSource + ?Sized,
    F: FnMut(RenderState) + Send,
{
    let result = async {
        let application = application.trim();
        if application.is_empty() || source.node_url().is_empty() {
            return Err(RivesError::Config(
                "Missing application address or node URL configuration".into(),
            ));
        }
        let application = EthAddress::from_hex(application)?;
        build_with_progress(source, &application, &mut progress).await
    }
    .await;

    match result {
        Ok(notices) => {
            info!("Rendered leaderboard with {} entries", notices.len());
            progress(RenderState::Rendered);
            LeaderboardTable::from_notices(&notices)
        }
        Err(e) => {
            error!("Error rendering leaderboard: {}", e);
            progress(RenderState::ErrorDisplayed);
            LeaderboardTable::error()
        }
    }
}
