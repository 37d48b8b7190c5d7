use super::commands::OutputFormat;
use super::utils::{is_json, print_json};
use rives_client::{emulator_url, EmulatorParams, RivesConfig};
use rives_types::RivesResult;

pub fn show_chains(config: &RivesConfig, format: &OutputFormat) -> RivesResult<()> {
    let chains = config.chains();

    if is_json(format) {
        print_json(&serde_json::json!(chains));
        return Ok(());
    }

    println!("{:<10} {:<14} {}", "ID", "NAME", "RPC");
    for chain in chains {
        let marker = if chain.id == config.chain_id { "*" } else { " " };
        println!("{}{:<9} {:<14} {}", marker, chain.id.to_hex(), chain.name, chain.rpc_url);
    }
    Ok(())
}

pub fn show_emulator_url(
    config: &RivesConfig,
    params: EmulatorParams,
    format: &OutputFormat,
) -> RivesResult<()> {
    let url = emulator_url(&config.emulator_url, &config.cartridge_url, &params)?;

    if is_json(format) {
        print_json(&serde_json::json!({ "url": url }));
    } else {
        println!("{}", url);
    }
    Ok(())
}
