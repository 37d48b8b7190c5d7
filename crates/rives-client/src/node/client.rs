use super::types::{
    InputRecord, OutputFilter, Page, RawOutput, ReportFilter, ReportRecord, Single,
    DEFAULT_PAGE_SIZE,
};
use crate::http_client::RpcClient;
use async_trait::async_trait;
use rives_types::encoding::decode_hex;
use rives_types::{EthAddress, RivesError, RivesResult};
use std::time::Duration;
use tracing::{debug, info};

/// Read access to a rollup node's outputs, inputs and reports.
#[async_trait]
pub trait OutputSource: Send + Sync {
    /// Base URL of the node. Empty when no node is configured.
    fn node_url(&self) -> &str;

    fn page_size(&self) -> u64 {
        DEFAULT_PAGE_SIZE
    }

    async fn list_outputs(
        &self,
        application: &EthAddress,
        filter: &OutputFilter,
    ) -> RivesResult<Page<RawOutput>>;

    async fn get_input(&self, application: &EthAddress, input_index: u64)
        -> RivesResult<InputRecord>;

    async fn list_reports(
        &self,
        application: &EthAddress,
        filter: &ReportFilter,
    ) -> RivesResult<Page<ReportRecord>>;
}

/// JSON-RPC client for a node's `/rpc` endpoint.
pub struct NodeClient {
    node_url: String,
    rpc: Option<RpcClient>,
    page_size: u64,
}

impl NodeClient {
    pub fn new(node_url: &str, timeout: Duration) -> RivesResult<Self> {
        let node_url = node_url.trim().trim_end_matches('/').to_string();
        let rpc = if node_url.is_empty() {
            None
        } else {
            Some(RpcClient::new(format!("{}/rpc", node_url), timeout)?)
        };
        Ok(Self {
            node_url,
            rpc,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn rpc(&self) -> RivesResult<&RpcClient> {
        self.rpc
            .as_ref()
            .ok_or_else(|| RivesError::Config("Node URL not configured".into()))
    }
}

#[async_trait]
impl OutputSource for NodeClient {
    fn node_url(&self) -> &str {
        &self.node_url
    }

    fn page_size(&self) -> u64 {
        self.page_size
    }

    async fn list_outputs(
        &self,
        application: &EthAddress,
        filter: &OutputFilter,
    ) -> RivesResult<Page<RawOutput>> {
        self.rpc()?
            .call("cartesi_listOutputs", filter.to_params(application))
            .await
    }

    async fn get_input(
        &self,
        application: &EthAddress,
        input_index: u64,
    ) -> RivesResult<InputRecord> {
        let params = serde_json::json!({
            "application": application.to_hex(),
            "input_index": format!("0x{:x}", input_index),
        });
        let single: Single<InputRecord> = self.rpc()?.call("cartesi_getInput", params).await?;
        Ok(single.data)
    }

    async fn list_reports(
        &self,
        application: &EthAddress,
        filter: &ReportFilter,
    ) -> RivesResult<Page<ReportRecord>> {
        self.rpc()?
            .call("cartesi_listReports", filter.to_params(application))
            .await
    }
}

/// Fetches the application's outputs.
///
/// An unconfigured node yields no outputs. With an explicit `limit` a single
/// page is returned; otherwise pages are followed until the node runs out.
pub async fn fetch_outputs<S: OutputSource + ?Sized>(
    source: &S,
    application: &EthAddress,
    filter: Option<OutputFilter>,
) -> RivesResult<Vec<RawOutput>> {
    if source.node_url().is_empty() {
        debug!("No node configured, skipping output fetch");
        return Ok(Vec::new());
    }

    let mut filter = filter.unwrap_or_default();
    if filter.limit.is_some() {
        return Ok(source.list_outputs(application, &filter).await?.data);
    }

    let page_size = source.page_size();
    let mut offset = filter.offset.unwrap_or(0);
    let mut outputs = Vec::new();

    loop {
        filter.limit = Some(page_size);
        filter.offset = Some(offset);

        let page = source.list_outputs(application, &filter).await?;
        let fetched = page.data.len() as u64;
        outputs.extend(page.data);
        offset += fetched;

        let exhausted = match page.pagination {
            Some(p) => offset >= p.total_count,
            None => fetched < page_size,
        };
        if fetched == 0 || exhausted {
            break;
        }
    }

    info!("Fetched {} outputs from {}", outputs.len(), source.node_url());
    Ok(outputs)
}

/// Application payload bytes of one input; empty when no node is configured.
pub async fn fetch_input_payload<S: OutputSource + ?Sized>(
    source: &S,
    application: &EthAddress,
    input_index: u64,
) -> RivesResult<Vec<u8>> {
    if source.node_url().is_empty() {
        return Ok(Vec::new());
    }

    let input = source.get_input(application, input_index).await?;
    let payload = input.payload().ok_or_else(|| {
        RivesError::Rpc(format!("Input {} has no decoded payload", input_index))
    })?;
    decode_hex(payload)
}

/// Fetches every report attached to one input.
pub async fn fetch_reports<S: OutputSource + ?Sized>(
    source: &S,
    application: &EthAddress,
    input_index: u64,
) -> RivesResult<Vec<ReportRecord>> {
    if source.node_url().is_empty() {
        return Ok(Vec::new());
    }

    let page_size = source.page_size();
    let mut reports = Vec::new();
    let mut filter = ReportFilter {
        input_index: Some(input_index),
        ..Default::default()
    };

    loop {
        filter.limit = Some(page_size);
        filter.offset = Some(reports.len() as u64);

        let page = source.list_reports(application, &filter).await?;
        let fetched = page.data.len() as u64;
        reports.extend(page.data);

        let exhausted = match page.pagination {
            Some(p) => reports.len() as u64 >= p.total_count,
            None => fetched < page_size,
        };
        if fetched == 0 || exhausted {
            break;
        }
    }

    Ok(reports)
}
