use super::commands::OutputFormat;
use super::utils::{fail, is_json, ok, print_json};
use rives_client::contracts::{submission_message, GameplaySubmitter, SubmissionReceipt, SubmitterConfig};
use rives_client::{EmulatorEvent, RivesConfig};
use rives_types::{GameplayPayload, RivesError, RivesResult};
use std::path::PathBuf;

fn read_payload(
    outhash: Option<String>,
    tape: Option<PathBuf>,
    message: Option<PathBuf>,
) -> RivesResult<GameplayPayload> {
    if let Some(path) = message {
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| RivesError::Io(format!("Failed to read {:?}: {}", path, e)))?;
        return match EmulatorEvent::parse(&contents)? {
            Some(event @ EmulatorEvent::Finished { .. }) => event.payload(),
            _ => Err(RivesError::InvalidPayload("not an emulator finish message".into())),
        };
    }

    match (outhash, tape) {
        (Some(outhash), Some(path)) => {
            let tape = std::fs::read(&path)
                .map_err(|e| RivesError::Io(format!("Failed to read {:?}: {}", path, e)))?;
            GameplayPayload::from_parts(&outhash, tape)
        }
        _ => Err(RivesError::InvalidPayload(
            "provide --outhash with --tape, or --message".into(),
        )),
    }
}

async fn submit(config: &RivesConfig, payload: &GameplayPayload) -> RivesResult<SubmissionReceipt> {
    let key = RivesConfig::wallet_key()
        .ok_or_else(|| RivesError::Wallet("No wallet found. Set RIVES_WALLET_KEY to submit".into()))?;

    let mut submitter = GameplaySubmitter::new(SubmitterConfig::from_config(config)?);
    submitter.connect().await?;
    submitter.set_wallet(&key).await?;
    submitter.submit(payload).await
}

pub async fn handle_submit(
    config: &RivesConfig,
    outhash: Option<String>,
    tape: Option<PathBuf>,
    message: Option<PathBuf>,
    format: &OutputFormat,
) -> RivesResult<()> {
    let result = match read_payload(outhash, tape, message) {
        Ok(payload) => submit(config, &payload).await,
        Err(e) => Err(e),
    };
    let text = submission_message(&result);

    if is_json(format) {
        print_json(&serde_json::json!({
            "submitted": result.is_ok(),
            "message": text,
            "tx_hash": result.as_ref().ok().map(|r| format!("{:?}", r.tx_hash)),
            "input_index": result.as_ref().ok().and_then(|r| r.input_index),
        }));
        return Ok(());
    }

    match &result {
        Ok(receipt) => {
            ok(&text);
            println!("  Transaction: {:?}", receipt.tx_hash);
            if let Some(index) = receipt.input_index {
                println!("  Input index: {}", index);
                println!("  Check it with: rives status {}", index);
            }
        }
        Err(_) => fail(&text),
    }
    Ok(())
}
