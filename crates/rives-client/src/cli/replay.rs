use super::commands::OutputFormat;
use super::utils::{is_json, ok, print_json};
use rives_client::{prepare_replay, NodeClient, ReplayRequest, RivesConfig};
use rives_types::{EthAddress, RivesError, RivesResult};
use std::path::PathBuf;

pub async fn handle_replay(
    config: &RivesConfig,
    link: Option<String>,
    input_index: Option<u64>,
    user: Option<String>,
    output: Option<PathBuf>,
    format: &OutputFormat,
) -> RivesResult<()> {
    let request = match (link, input_index) {
        (Some(link), _) => ReplayRequest::from_query(&link)?,
        (None, Some(input_index)) => ReplayRequest {
            user: user.as_deref().map(EthAddress::from_hex).transpose()?,
            input_index,
        },
        (None, None) => {
            return Err(RivesError::InvalidPayload("No input_index provided".into()));
        }
    };

    let source = NodeClient::new(&config.node_url, config.request_timeout())?;
    let session = prepare_replay(
        &source,
        &config.application()?,
        request,
        &config.emulator_url,
        &config.cartridge_url,
    )
    .await?;

    if let Some(path) = &output {
        std::fs::write(path, &session.tape)
            .map_err(|e| RivesError::Io(format!("Failed to write tape: {}", e)))?;
    }

    let upload = session.upload_message();
    if is_json(format) {
        print_json(&serde_json::json!({
            "input_index": session.request.input_index,
            "emulator_url": session.emulator_url,
            "tape_size": session.tape.len(),
            "upload": upload,
        }));
        return Ok(());
    }

    ok(&format!(
        "Loaded tape of input {} ({} bytes)",
        session.request.input_index,
        session.tape.len()
    ));
    println!("  Emulator: {}", session.emulator_url);
    println!("  Post to the emulator frame:");
    println!("  {}", upload.to_json()?);
    if let Some(path) = output {
        println!("  Tape written to {:?}", path);
    }
    Ok(())
}
