use super::commands::OutputFormat;
use super::utils::{fail, is_json, ok, print_json};
use rives_client::{LocalWalletBackend, RivesConfig, WalletEvent, WalletSession};
use rives_types::RivesResult;

pub async fn show_wallet(config: &RivesConfig, format: &OutputFormat) -> RivesResult<()> {
    let chain = config.chain()?;
    let key = RivesConfig::wallet_key();
    let backend = LocalWalletBackend::new(&chain.rpc_url, key.as_deref())?;

    let mut session = WalletSession::new(config.chain_id, config.node_url.clone());
    session.reconcile(&backend, WalletEvent::Connect).await;

    let params = session.emulator_params();
    if is_json(format) {
        print_json(&serde_json::json!({
            "connected": session.is_connected(),
            "address": session.address().map(|a| a.to_checksum()),
            "chain": chain,
            "message": session.message(),
            "entropy": params.entropy,
        }));
        return Ok(());
    }

    if session.is_connected() {
        ok(session.message());
    } else {
        fail(session.message());
    }
    match &params.entropy {
        Some(entropy) => println!("  Emulator entropy: {}", entropy),
        None => println!("  Emulator runs in simple mode"),
    }
    Ok(())
}
