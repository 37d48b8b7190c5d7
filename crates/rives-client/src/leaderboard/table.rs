use crate::notice::VerificationNotice;
use crate::replay::ReplayTarget;
use chrono::DateTime;
use ethers::types::U256;
use rives_types::LEADERBOARD_COLUMNS;

pub const COLUMN_TITLES: [&str; LEADERBOARD_COLUMNS] = ["Rank", "User", "Timestamp", "Score", "Input"];

pub const EMPTY_MESSAGE: &str = "No leaderboard data available";
pub const ERROR_MESSAGE: &str = "Error loading leaderboard data";

const UNKNOWN_USER: &str = "Unknown";
const TIMESTAMP_FORMAT: &str = "%b/%d/%Y, %H:%M:%S UTC";

/// `Mon/DD/YYYY, HH:MM:SS UTC`, or "Invalid Date" outside chrono's range.
pub fn format_timestamp(timestamp: impl Into<U256>) -> String {
    let timestamp = timestamp.into();
    if timestamp.bits() > 63 {
        return "Invalid Date".to_string();
    }
    i64::try_from(timestamp.as_u64())
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "Invalid Date".to_string())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub cells: [String; LEADERBOARD_COLUMNS],
    pub nav: Option<ReplayTarget>,
}

impl LeaderboardRow {
    pub fn new(rank: usize, notice: &VerificationNotice) -> Self {
        let user = notice
            .user
            .map(|u| u.to_checksum())
            .unwrap_or_else(|| UNKNOWN_USER.to_string());

        Self {
            cells: [
                rank.to_string(),
                user,
                format_timestamp(notice.timestamp),
                notice.score.to_string(),
                notice.input_index.to_string(),
            ],
            nav: notice.user.map(|user| ReplayTarget {
                user,
                input_index: notice.input_index,
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableRow {
    Entry(LeaderboardRow),
    Placeholder { message: String, colspan: usize },
}

impl TableRow {
    pub fn placeholder(message: &str) -> Self {
        TableRow::Placeholder {
            message: message.to_string(),
            colspan: LEADERBOARD_COLUMNS,
        }
    }

    pub fn nav(&self) -> Option<&ReplayTarget> {
        match self {
            TableRow::Entry(row) => row.nav.as_ref(),
            TableRow::Placeholder { .. } => None,
        }
    }
}

/// Body of the leaderboard table. Each render builds a fresh one, so a
/// table never mixes rows from different renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardTable {
    rows: Vec<TableRow>,
}

impl LeaderboardTable {
    /// Rows from notices already in leaderboard order.
    pub fn from_notices(notices: &[VerificationNotice]) -> Self {
        if notices.is_empty() {
            return Self::empty();
        }
        Self {
            rows: notices
                .iter()
                .enumerate()
                .map(|(i, n)| TableRow::Entry(LeaderboardRow::new(i + 1, n)))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            rows: vec![TableRow::placeholder(EMPTY_MESSAGE)],
        }
    }

    pub fn error() -> Self {
        Self {
            rows: vec![TableRow::placeholder(ERROR_MESSAGE)],
        }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &LeaderboardRow> {
        self.rows.iter().filter_map(|r| match r {
            TableRow::Entry(row) => Some(row),
            TableRow::Placeholder { .. } => None,
        })
    }

    pub fn placeholder(&self) -> Option<&str> {
        match self.rows.as_slice() {
            [TableRow::Placeholder { message, .. }] => Some(message),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.placeholder() == Some(ERROR_MESSAGE)
    }

    /// Plain-text rendering with aligned columns.
    pub fn to_text(&self) -> String {
        let mut widths = COLUMN_TITLES.map(str::len);
        for row in self.entries() {
            for (width, cell) in widths.iter_mut().zip(row.cells.iter()) {
                *width = (*width).max(cell.len());
            }
        }

        let mut out = String::new();
        let header: Vec<String> = COLUMN_TITLES
            .iter()
            .zip(widths.iter())
            .map(|(title, w)| format!("{:<w$}", title, w = *w))
            .collect();
        out.push_str(header.join("  ").trim_end());
        out.push('\n');

        for row in &self.rows {
            match row {
                TableRow::Entry(entry) => {
                    let cells: Vec<String> = entry
                        .cells
                        .iter()
                        .zip(widths.iter())
                        .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
                        .collect();
                    out.push_str(cells.join("  ").trim_end());
                }
                TableRow::Placeholder { message, .. } => out.push_str(message),
            }
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = self
            .rows
            .iter()
            .map(|row| match row {
                TableRow::Entry(entry) => serde_json::json!({
                    "rank": entry.cells[0],
                    "user": entry.cells[1],
                    "timestamp": entry.cells[2],
                    "score": entry.cells[3],
                    "input_index": entry.cells[4],
                    "replay": entry.nav.map(|n| n.href()),
                }),
                TableRow::Placeholder { message, colspan } => serde_json::json!({
                    "placeholder": message,
                    "colspan": colspan,
                }),
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}
