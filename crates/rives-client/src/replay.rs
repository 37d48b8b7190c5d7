use crate::emulator::{emulator_url, EmulatorParams, UploadTape};
use crate::node::{fetch_input_payload, OutputSource};
use ethers::types::U256;
use rives_types::{EthAddress, GameplayPayload, RivesError, RivesResult};
use tracing::info;

pub const REPLAY_PATH: &str = "/src/replay";

/// Row-level navigation target of the leaderboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReplayTarget {
    pub user: EthAddress,
    /// As decoded from the notice; only indices that fit in `u64` exist on the node.
    pub input_index: U256,
}

impl ReplayTarget {
    /// `/src/replay?user=<user>&input_index=<n>`
    pub fn href(&self) -> String {
        format!(
            "{}?user={}&input_index={}",
            REPLAY_PATH,
            self.user.to_checksum(),
            self.input_index
        )
    }
}

/// What the replay view was asked to show. The user is optional: it only
/// seeds the emulator entropy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayRequest {
    pub user: Option<EthAddress>,
    pub input_index: u64,
}

impl ReplayRequest {
    /// Parses the query part of a replay link (with or without the path).
    pub fn from_query(link: &str) -> RivesResult<Self> {
        let query = link.split_once('?').map(|(_, q)| q).unwrap_or(link);

        let mut user = None;
        let mut input_index = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "user" => user = EthAddress::from_hex(&value).ok(),
                "input_index" => {
                    input_index = Some(value.parse::<u64>().map_err(|_| {
                        RivesError::InvalidPayload(format!("Invalid input_index: {}", value))
                    })?)
                }
                _ => {}
            }
        }

        let input_index = input_index
            .ok_or_else(|| RivesError::InvalidPayload("No input_index provided".into()))?;
        Ok(Self { user, input_index })
    }

    pub fn entropy(&self) -> Option<String> {
        self.user.map(|u| u.to_hex())
    }
}

impl TryFrom<ReplayTarget> for ReplayRequest {
    type Error = RivesError;

    fn try_from(target: ReplayTarget) -> RivesResult<Self> {
        if target.input_index.bits() > 64 {
            return Err(RivesError::InvalidPayload(format!(
                "Invalid input_index: {}",
                target.input_index
            )));
        }
        Ok(Self {
            user: Some(target.user),
            input_index: target.input_index.as_u64(),
        })
    }
}

/// A tape ready to be loaded into the emulator.
#[derive(Clone, Debug)]
pub struct ReplaySession {
    pub request: ReplayRequest,
    pub tape: Vec<u8>,
    pub emulator_url: String,
}

impl ReplaySession {
    pub fn upload_message(&self) -> UploadTape {
        UploadTape::new(self.tape.clone(), self.request.entropy())
    }
}

/// Fetches the submitted input and strips the outhash to recover the tape.
pub async fn prepare_replay<S: OutputSource + ?Sized>(
    source: &S,
    application: &EthAddress,
    request: ReplayRequest,
    emulator: &str,
    cartridge: &str,
) -> RivesResult<ReplaySession> {
    info!("Loading replay for input {}", request.input_index);

    let bytes = fetch_input_payload(source, application, request.input_index).await?;
    if bytes.is_empty() {
        return Err(RivesError::Config("Node URL not configured".into()));
    }
    let payload = GameplayPayload::from_bytes(&bytes)?;

    let emulator_url = emulator_url(emulator, cartridge, &EmulatorParams::simple())?;

    Ok(ReplaySession {
        request,
        tape: payload.tape,
        emulator_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubSource;

    fn user() -> EthAddress {
        EthAddress::from_hex("0x70997970C51812dc3A010C7d01b50e0d17dc79C8").unwrap()
    }

    #[test]
    fn test_href_roundtrips_through_query() {
        let target = ReplayTarget { user: user(), input_index: U256::from(12) };
        let href = target.href();
        assert_eq!(
            href,
            "/src/replay?user=0x70997970C51812dc3A010C7d01b50e0d17dc79C8&input_index=12"
        );

        let request = ReplayRequest::from_query(&href).unwrap();
        assert_eq!(request, ReplayRequest::try_from(target).unwrap());
        assert_eq!(
            request.entropy().as_deref(),
            Some("0x70997970c51812dc3a010c7d01b50e0d17dc79c8")
        );
    }

    #[test]
    fn test_target_beyond_u64_cannot_be_requested() {
        let target = ReplayTarget { user: user(), input_index: U256::from(u64::MAX) + 1 };
        assert!(target.href().ends_with("&input_index=18446744073709551616"));
        assert!(ReplayRequest::try_from(target).is_err());
    }

    #[test]
    fn test_query_without_user() {
        let request = ReplayRequest::from_query("input_index=3").unwrap();
        assert_eq!(request.user, None);
        assert_eq!(request.entropy(), None);
    }

    #[test]
    fn test_query_requires_input_index() {
        assert!(ReplayRequest::from_query("?user=0x00").is_err());
        assert!(ReplayRequest::from_query("?input_index=abc").is_err());
    }

    #[tokio::test]
    async fn test_prepare_replay_strips_outhash() {
        let tape = vec![1u8, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x0f, 0, 0, 0];
        let payload = GameplayPayload::new(rives_types::Outhash([5u8; 32]), tape.clone()).unwrap();

        let mut source = StubSource::with_outputs(Vec::new());
        source.inputs.insert(8, payload.to_bytes());

        let app = EthAddress::from_hex(rives_types::DEFAULT_APPLICATION_ADDRESS).unwrap();
        let request = ReplayRequest::try_from(ReplayTarget { user: user(), input_index: U256::from(8) }).unwrap();
        let session = prepare_replay(&source, &app, request, "https://emulator.rives.io", "cart")
            .await
            .unwrap();

        assert_eq!(session.tape, tape);
        assert_eq!(
            session.emulator_url,
            "https://emulator.rives.io/#light=100&cartridge=cart&simple=true"
        );

        let upload = session.upload_message();
        assert!(upload.rivemu_upload);
        assert!(upload.auto_play);
        assert_eq!(upload.tape, tape);
        assert_eq!(
            upload.entropy.as_deref(),
            Some("0x70997970c51812dc3a010c7d01b50e0d17dc79c8")
        );
    }

    #[tokio::test]
    async fn test_prepare_replay_missing_input() {
        let source = StubSource::with_outputs(Vec::new());
        let app = EthAddress::zero();
        let request = ReplayRequest { user: None, input_index: 1 };
        assert!(prepare_replay(&source, &app, request, "https://e", "c").await.is_err());
    }
}
