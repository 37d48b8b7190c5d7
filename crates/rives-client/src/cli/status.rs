use super::commands::OutputFormat;
use super::utils::{fail, is_json, ok, print_json};
use rives_client::{input_status, NodeClient, RivesConfig};
use rives_types::RivesResult;

pub async fn show_status(config: &RivesConfig, input_index: u64, format: &OutputFormat) -> RivesResult<()> {
    let source = NodeClient::new(&config.node_url, config.request_timeout())?;
    let status = input_status(&source, &config.application()?, input_index).await?;

    if is_json(format) {
        print_json(&status.to_json());
        return Ok(());
    }

    if status.is_verified() {
        ok(&status.summary());
        for notice in &status.notices {
            if let Some(user) = notice.user {
                println!("  Player: {}", user);
            }
        }
    } else {
        fail(&status.summary());
        for report in &status.other_reports {
            println!("  Report: {}", report);
        }
    }
    Ok(())
}
