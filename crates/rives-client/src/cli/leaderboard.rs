use super::commands::OutputFormat;
use super::utils::{is_json, print_json};
use rives_client::leaderboard::{render_leaderboard, TableRow};
use rives_client::{NodeClient, RivesConfig};
use rives_types::RivesResult;

pub async fn show_leaderboard(config: &RivesConfig, links: bool, format: &OutputFormat) -> RivesResult<()> {
    let source = NodeClient::new(&config.node_url, config.request_timeout())?;
    let table = render_leaderboard(&source, &config.application_address).await;

    if is_json(format) {
        print_json(&table.to_json());
        return Ok(());
    }

    print!("{}", table.to_text());
    if links {
        println!();
        for row in table.rows() {
            if let TableRow::Entry(entry) = row {
                if let Some(nav) = &entry.nav {
                    println!("#{:<4} {}", entry.cells[0], nav.href());
                }
            }
        }
    }
    Ok(())
}
