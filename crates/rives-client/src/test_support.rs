//! In-memory node used by unit tests.

use crate::node::{
    InputRecord, OutputFilter, OutputSource, Page, Pagination, RawOutput, ReportFilter,
    ReportRecord,
};
use async_trait::async_trait;
use rives_types::encoding::encode_hex;
use rives_types::{EthAddress, RivesError, RivesResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct StubSource {
    pub node_url: String,
    pub outputs: Vec<RawOutput>,
    pub inputs: HashMap<u64, Vec<u8>>,
    pub reports: Vec<ReportRecord>,
    pub fail: bool,
    pub delay: Option<Duration>,
    pub calls: AtomicUsize,
}

impl StubSource {
    pub fn with_outputs(outputs: Vec<RawOutput>) -> Self {
        Self {
            node_url: "http://stub".into(),
            outputs,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            node_url: "http://stub".into(),
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OutputSource for StubSource {
    fn node_url(&self) -> &str {
        &self.node_url
    }

    async fn list_outputs(
        &self,
        _application: &EthAddress,
        filter: &OutputFilter,
    ) -> RivesResult<Page<RawOutput>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(RivesError::Network("connection refused".into()));
        }

        let matching: Vec<RawOutput> = self
            .outputs
            .iter()
            .filter(|o| filter.input_index.map_or(true, |i| o.input_index == i))
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let offset = filter.offset.unwrap_or(0);
        let limit = filter.limit.unwrap_or(total);
        let data = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        Ok(Page {
            data,
            pagination: Some(Pagination {
                total_count: total,
                limit,
                offset,
            }),
        })
    }

    async fn get_input(
        &self,
        _application: &EthAddress,
        input_index: u64,
    ) -> RivesResult<InputRecord> {
        let payload = self
            .inputs
            .get(&input_index)
            .ok_or_else(|| RivesError::Rpc(format!("input {} not found", input_index)))?;
        Ok(InputRecord {
            index: input_index,
            status: "ACCEPTED".into(),
            decoded_data: Some(serde_json::json!({ "payload": encode_hex(payload) })),
            ..Default::default()
        })
    }

    async fn list_reports(
        &self,
        _application: &EthAddress,
        filter: &ReportFilter,
    ) -> RivesResult<Page<ReportRecord>> {
        let data: Vec<ReportRecord> = self
            .reports
            .iter()
            .filter(|r| filter.input_index.map_or(true, |i| r.input_index == i))
            .cloned()
            .collect();
        Ok(Page {
            pagination: Some(Pagination {
                total_count: data.len() as u64,
                limit: data.len() as u64,
                offset: 0,
            }),
            data,
        })
    }
}
