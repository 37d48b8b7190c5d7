use crate::error::{RivesError, RivesResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status codes the verifier attaches to its error reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HandleStatus {
    Success,
    InvalidRequest,
    InputError,
    NoticeError,
    FileError,
    ForkError,
    VerificationError,
    OuthashError,
    OutcardError,
    RuntimeException,
    UnknownException,
}

impl HandleStatus {
    pub fn code(&self) -> u8 {
        match self {
            HandleStatus::Success => 0,
            HandleStatus::InvalidRequest => 1,
            HandleStatus::InputError => 2,
            HandleStatus::NoticeError => 3,
            HandleStatus::FileError => 4,
            HandleStatus::ForkError => 5,
            HandleStatus::VerificationError => 6,
            HandleStatus::OuthashError => 7,
            HandleStatus::OutcardError => 8,
            HandleStatus::RuntimeException => 9,
            HandleStatus::UnknownException => 10,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => HandleStatus::Success,
            1 => HandleStatus::InvalidRequest,
            2 => HandleStatus::InputError,
            3 => HandleStatus::NoticeError,
            4 => HandleStatus::FileError,
            5 => HandleStatus::ForkError,
            6 => HandleStatus::VerificationError,
            7 => HandleStatus::OuthashError,
            8 => HandleStatus::OutcardError,
            9 => HandleStatus::RuntimeException,
            10 => HandleStatus::UnknownException,
            _ => return None,
        })
    }

    pub fn description(&self) -> &'static str {
        match self {
            HandleStatus::Success => "success",
            HandleStatus::InvalidRequest => "invalid request",
            HandleStatus::InputError => "invalid input",
            HandleStatus::NoticeError => "notice emission failed",
            HandleStatus::FileError => "verifier file error",
            HandleStatus::ForkError => "verifier could not start",
            HandleStatus::VerificationError => "gameplay verification failed",
            HandleStatus::OuthashError => "outhash mismatch",
            HandleStatus::OutcardError => "score missing from outcard",
            HandleStatus::RuntimeException => "runtime exception",
            HandleStatus::UnknownException => "unknown exception",
        }
    }
}

impl TryFrom<u8> for HandleStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown status code {}", code))
    }
}

impl From<HandleStatus> for u8 {
    fn from(status: HandleStatus) -> u8 {
        status.code()
    }
}

impl fmt::Display for HandleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.code())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: HandleStatus,
    pub message: String,
}

#[derive(Deserialize, Serialize)]
struct ErrorReportEnvelope {
    error: ErrorReport,
}

impl ErrorReport {
    /// Parses a report payload of the form `{"error":{"code":N,"message":"..."}}`.
    pub fn from_payload(bytes: &[u8]) -> RivesResult<Self> {
        let envelope: ErrorReportEnvelope = serde_json::from_slice(bytes)
            .map_err(|e| RivesError::Decode(format!("Invalid error report: {}", e)))?;
        Ok(envelope.error)
    }

    pub fn to_payload(&self) -> RivesResult<Vec<u8>> {
        serde_json::to_vec(&ErrorReportEnvelope { error: self.clone() })
            .map_err(|e| RivesError::Serialization(e.to_string()))
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verifier_report() {
        let payload = br#"{"error":{"code":2,"message":"payload size too small"}}"#;
        let report = ErrorReport::from_payload(payload).unwrap();
        assert_eq!(report.code, HandleStatus::InputError);
        assert_eq!(report.message, "payload size too small");
    }

    #[test]
    fn test_unknown_code_rejected() {
        let payload = br#"{"error":{"code":42,"message":"?"}}"#;
        assert!(ErrorReport::from_payload(payload).is_err());
        assert!(ErrorReport::from_payload(b"not json").is_err());
    }

    #[test]
    fn test_codes_are_stable() {
        for code in 0..=10u8 {
            let status = HandleStatus::from_code(code).unwrap();
            assert_eq!(status.code(), code);
        }
        assert_eq!(HandleStatus::OuthashError.code(), 7);
        assert!(HandleStatus::from_code(11).is_none());
    }
}
