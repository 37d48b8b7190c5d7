mod client;
mod types;

pub use client::{fetch_input_payload, fetch_outputs, fetch_reports, NodeClient, OutputSource};
pub use types::{
    InputRecord, OutputFilter, OutputType, Page, Pagination, RawOutput, ReportFilter,
    ReportRecord, DEFAULT_PAGE_SIZE, DELEGATE_CALL_VOUCHER_SELECTOR, NOTICE_SELECTOR,
    VOUCHER_SELECTOR,
};

#[cfg(test)]
mod tests;
