//! Emulator glue: the embed URL and the cross-document message protocol.

use rives_types::encoding::encode_hex;
use rives_types::{GameplayPayload, RivesError, RivesResult};
use serde::{Serialize, Serializer};
use serde_json::Value;

const LIGHT_LEVEL: u32 = 100;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmulatorParams {
    pub tape_url: Option<String>,
    pub simple: Option<bool>,
    pub autoplay: Option<bool>,
    pub entropy: Option<String>,
    /// Raw fragment appended verbatim.
    pub extra: Option<String>,
}

impl EmulatorParams {
    /// Simple mode, no entropy. The emulator always runs in simple mode;
    /// a connected wallet only adds entropy.
    pub fn simple() -> Self {
        Self {
            simple: Some(true),
            ..Default::default()
        }
    }

    pub fn with_entropy(mut self, entropy: impl Into<String>) -> Self {
        self.entropy = Some(entropy.into());
        self
    }
}

/// `<emulator>/#light=100&cartridge=<url>[&tape=..][&simple=..][&autoplay=..][&entropy=..][&extra]`
pub fn emulator_url(
    emulator_url: &str,
    cartridge_url: &str,
    params: &EmulatorParams,
) -> RivesResult<String> {
    let base = emulator_url.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(RivesError::Emulator("Emulator URL not configured".into()));
    }

    let mut url = format!("{}/#light={}&cartridge={}", base, LIGHT_LEVEL, cartridge_url.trim());
    if let Some(tape) = &params.tape_url {
        url.push_str(&format!("&tape={}", tape));
    }
    if let Some(simple) = params.simple {
        url.push_str(&format!("&simple={}", simple));
    }
    if let Some(autoplay) = params.autoplay {
        url.push_str(&format!("&autoplay={}", autoplay));
    }
    if let Some(entropy) = &params.entropy {
        url.push_str(&format!("&entropy={}", encode_component(entropy)));
    }
    if let Some(extra) = &params.extra {
        url.push('&');
        url.push_str(extra);
    }
    Ok(url)
}

fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Messages posted by the emulator page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmulatorEvent {
    Finished { outhash: String, tape: Vec<u8> },
    Uploaded,
}

impl EmulatorEvent {
    pub fn parse(message: &str) -> RivesResult<Option<Self>> {
        let value: Value = serde_json::from_str(message)
            .map_err(|e| RivesError::Serialization(format!("Invalid emulator message: {}", e)))?;
        Ok(Self::from_value(&value))
    }

    /// Unrelated messages yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        if is_set(value, "rivemuOnFinish") {
            let outhash = value.get("outhash").and_then(Value::as_str).unwrap_or_default();
            let tape = value.get("tape").and_then(tape_bytes).unwrap_or_default();
            return Some(EmulatorEvent::Finished {
                outhash: outhash.to_string(),
                tape,
            });
        }
        if is_set(value, "rivemuUploaded") {
            return Some(EmulatorEvent::Uploaded);
        }
        None
    }

    /// Gameplay payload for a finished run.
    pub fn payload(&self) -> RivesResult<GameplayPayload> {
        match self {
            EmulatorEvent::Finished { outhash, tape } => {
                GameplayPayload::from_parts(outhash, tape.clone())
            }
            EmulatorEvent::Uploaded => Err(RivesError::InvalidPayload(
                "upload acknowledgement carries no gameplay".into(),
            )),
        }
    }
}

fn is_set(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Tapes arrive as hex strings, byte arrays, or index-keyed objects
/// (a serialized typed array).
fn tape_bytes(value: &Value) -> Option<Vec<u8>> {
    match value {
        Value::String(s) => hex::decode(s.strip_prefix("0x").unwrap_or(s)).ok(),
        Value::Array(items) => items
            .iter()
            .map(|v| v.as_u64().and_then(|b| u8::try_from(b).ok()))
            .collect(),
        Value::Object(map) => {
            let mut entries = map
                .iter()
                .map(|(k, v)| {
                    let index = k.parse::<usize>().ok()?;
                    let byte = v.as_u64().and_then(|b| u8::try_from(b).ok())?;
                    Some((index, byte))
                })
                .collect::<Option<Vec<_>>>()?;
            entries.sort_by_key(|(index, _)| *index);
            Some(entries.into_iter().map(|(_, byte)| byte).collect())
        }
        _ => None,
    }
}

fn serialize_tape<S: Serializer>(tape: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&encode_hex(tape))
}

/// Message posted to the emulator to load a tape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTape {
    pub rivemu_upload: bool,
    #[serde(serialize_with = "serialize_tape")]
    pub tape: Vec<u8>,
    pub auto_play: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entropy: Option<String>,
}

impl UploadTape {
    pub fn new(tape: Vec<u8>, entropy: Option<String>) -> Self {
        Self {
            rivemu_upload: true,
            tape,
            auto_play: true,
            entropy,
        }
    }

    pub fn to_json(&self) -> RivesResult<String> {
        serde_json::to_string(self).map_err(|e| RivesError::Serialization(e.to_string()))
    }
}
