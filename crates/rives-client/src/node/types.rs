use rives_types::encoding::{encode_hex, parse_quantity};
use rives_types::EthAddress;
use serde::{Deserialize, Serialize};

pub const NOTICE_SELECTOR: &str = "0xc258d6e5";
pub const VOUCHER_SELECTOR: &str = "0x237a816f";
pub const DELEGATE_CALL_VOUCHER_SELECTOR: &str = "0x10321e8b";

pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Kind of an output, normalized from the node's discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputType {
    Notice,
    Voucher,
    DelegateCallVoucher,
    Unknown,
}

impl OutputType {
    /// The node reports either a name or the ABI selector of the output.
    pub fn from_discriminator(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "notice" | NOTICE_SELECTOR => OutputType::Notice,
            "voucher" | VOUCHER_SELECTOR => OutputType::Voucher,
            "delegatecallvoucher" | "delegate_call_voucher" | DELEGATE_CALL_VOUCHER_SELECTOR => {
                OutputType::DelegateCallVoucher
            }
            _ => OutputType::Unknown,
        }
    }

    pub fn selector(&self) -> Option<&'static str> {
        match self {
            OutputType::Notice => Some(NOTICE_SELECTOR),
            OutputType::Voucher => Some(VOUCHER_SELECTOR),
            OutputType::DelegateCallVoucher => Some(DELEGATE_CALL_VOUCHER_SELECTOR),
            OutputType::Unknown => None,
        }
    }
}

impl std::fmt::Display for OutputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputType::Notice => "notice",
            OutputType::Voucher => "voucher",
            OutputType::DelegateCallVoucher => "delegate_call_voucher",
            OutputType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Hex or decimal quantity, in string or number form.
pub(crate) mod quantity {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{:x}", value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => super::parse_quantity(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// One output as returned by `cartesi_listOutputs`.
///
/// `decoded_data` is kept as raw JSON: the decoder tolerates any shape and
/// simply skips outputs it cannot read.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawOutput {
    #[serde(default, with = "quantity")]
    pub epoch_index: u64,
    #[serde(default, with = "quantity")]
    pub input_index: u64,
    #[serde(default, with = "quantity")]
    pub index: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoded_data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_transaction_hash: Option<String>,
}

impl RawOutput {
    pub fn notice(input_index: u64, index: u64, payload: impl AsRef<[u8]>) -> Self {
        Self {
            input_index,
            index,
            decoded_data: Some(serde_json::json!({
                "type": NOTICE_SELECTOR,
                "payload": encode_hex(payload),
            })),
            ..Default::default()
        }
    }

    pub fn output_type(&self) -> OutputType {
        self.decoded_data
            .as_ref()
            .and_then(|d| d.get("type"))
            .and_then(|t| t.as_str())
            .map(OutputType::from_discriminator)
            .unwrap_or(OutputType::Unknown)
    }

    pub fn payload(&self) -> Option<&str> {
        self.decoded_data
            .as_ref()
            .and_then(|d| d.get("payload"))
            .and_then(|p| p.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct Single<T> {
    pub data: T,
}

/// Query forwarded to `cartesi_listOutputs`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputFilter {
    pub epoch_index: Option<u64>,
    pub input_index: Option<u64>,
    pub output_type: Option<OutputType>,
    pub voucher_address: Option<EthAddress>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl OutputFilter {
    pub fn notices() -> Self {
        Self {
            output_type: Some(OutputType::Notice),
            ..Default::default()
        }
    }

    pub fn for_input(mut self, input_index: u64) -> Self {
        self.input_index = Some(input_index);
        self
    }

    pub(crate) fn to_params(&self, application: &EthAddress) -> serde_json::Value {
        let mut params = serde_json::Map::new();
        params.insert("application".into(), application.to_hex().into());
        if let Some(epoch) = self.epoch_index {
            params.insert("epoch_index".into(), format!("0x{:x}", epoch).into());
        }
        if let Some(input) = self.input_index {
            params.insert("input_index".into(), format!("0x{:x}", input).into());
        }
        if let Some(selector) = self.output_type.and_then(|t| t.selector()) {
            params.insert("output_type".into(), selector.into());
        }
        if let Some(voucher) = &self.voucher_address {
            params.insert("voucher_address".into(), voucher.to_hex().into());
        }
        if let Some(limit) = self.limit {
            params.insert("limit".into(), limit.into());
        }
        if let Some(offset) = self.offset {
            params.insert("offset".into(), offset.into());
        }
        serde_json::Value::Object(params)
    }
}

/// An advance input as returned by `cartesi_getInput`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InputRecord {
    #[serde(default, with = "quantity")]
    pub epoch_index: u64,
    #[serde(default, with = "quantity")]
    pub index: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoded_data: Option<serde_json::Value>,
}

impl InputRecord {
    /// Application payload of the input, unwrapped from the EvmAdvance envelope.
    pub fn payload(&self) -> Option<&str> {
        self.decoded_data
            .as_ref()
            .and_then(|d| d.get("payload"))
            .and_then(|p| p.as_str())
    }

    pub fn sender(&self) -> Option<EthAddress> {
        self.decoded_data
            .as_ref()
            .and_then(|d| d.get("msg_sender"))
            .and_then(|s| s.as_str())
            .and_then(|s| EthAddress::from_hex(s).ok())
    }

    pub fn is_accepted(&self) -> bool {
        self.status.eq_ignore_ascii_case("ACCEPTED")
    }
}

/// A report as returned by `cartesi_listReports`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReportRecord {
    #[serde(default, with = "quantity")]
    pub epoch_index: u64,
    #[serde(default, with = "quantity")]
    pub input_index: u64,
    #[serde(default, with = "quantity")]
    pub index: u64,
    #[serde(default)]
    pub raw_data: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub epoch_index: Option<u64>,
    pub input_index: Option<u64>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ReportFilter {
    pub(crate) fn to_params(&self, application: &EthAddress) -> serde_json::Value {
        let mut params = serde_json::Map::new();
        params.insert("application".into(), application.to_hex().into());
        if let Some(epoch) = self.epoch_index {
            params.insert("epoch_index".into(), format!("0x{:x}", epoch).into());
        }
        if let Some(input) = self.input_index {
            params.insert("input_index".into(), format!("0x{:x}", input).into());
        }
        if let Some(limit) = self.limit {
            params.insert("limit".into(), limit.into());
        }
        if let Some(offset) = self.offset {
            params.insert("offset".into(), offset.into());
        }
        serde_json::Value::Object(params)
    }
}
