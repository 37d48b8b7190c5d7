//! Outcome of a submitted gameplay: its verification notice, or the
//! verifier's error reports when no notice was emitted.

use crate::node::{fetch_outputs, fetch_reports, OutputFilter, OutputSource, ReportRecord};
use crate::notice::{decode_notices, VerificationNotice};
use rives_types::encoding::decode_hex;
use rives_types::{ErrorReport, EthAddress, RivesResult};
use tracing::{debug, info};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputStatus {
    pub input_index: u64,
    pub notices: Vec<VerificationNotice>,
    pub errors: Vec<ErrorReport>,
    /// Reports that are not verifier error envelopes, as raw hex.
    pub other_reports: Vec<String>,
}

impl InputStatus {
    pub fn is_verified(&self) -> bool {
        !self.notices.is_empty()
    }

    pub fn summary(&self) -> String {
        if let Some(notice) = self.notices.first() {
            return format!(
                "Input {} verified: score {} at {}",
                self.input_index,
                notice.score,
                crate::leaderboard::format_timestamp(notice.timestamp)
            );
        }
        match self.errors.first() {
            Some(report) => format!("Input {} rejected: {}", self.input_index, report),
            None => format!("Input {} has no notice or error report yet", self.input_index),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "input_index": self.input_index,
            "verified": self.is_verified(),
            "notices": self.notices.iter().map(|n| n.to_json()).collect::<Vec<_>>(),
            "errors": self.errors,
            "other_reports": self.other_reports,
        })
    }
}

pub fn decode_report(report: &ReportRecord) -> Option<ErrorReport> {
    let bytes = decode_hex(&report.raw_data).ok()?;
    match ErrorReport::from_payload(&bytes) {
        Ok(error) => Some(error),
        Err(e) => {
            debug!("Report {} of input {} is not an error report: {}", report.index, report.input_index, e);
            None
        }
    }
}

pub async fn input_status<S: OutputSource + ?Sized>(
    source: &S,
    application: &EthAddress,
    input_index: u64,
) -> RivesResult<InputStatus> {
    let outputs = fetch_outputs(
        source,
        application,
        Some(OutputFilter::notices().for_input(input_index)),
    )
    .await?;
    let reports = fetch_reports(source, application, input_index).await?;

    let mut status = InputStatus {
        input_index,
        notices: decode_notices(&outputs),
        ..Default::default()
    };
    for report in &reports {
        match decode_report(report) {
            Some(error) => status.errors.push(error),
            None => status.other_reports.push(report.raw_data.clone()),
        }
    }

    info!(
        "Input {}: {} notices, {} error reports",
        input_index,
        status.notices.len(),
        status.errors.len()
    );
    Ok(status)
}
