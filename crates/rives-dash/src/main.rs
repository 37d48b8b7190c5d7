//! RIVES Dashboard
//! Usage: rives-dash [OPTIONS]
//!
//! Options:
//!   --theme <THEME>     Dashboard theme (arcade, dark, light) [default: arcade]
//!   --config <PATH>     Configuration file [default: ~/.rives/config.toml]
//!   --log-file <PATH>   Log file [default: logging.dash_file or ~/.rives/dash.log]

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rives_client::logging::{init_logging, LogOptions};
use rives_client::RivesConfig;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::info;

mod app;
mod theme;
mod ui;

use app::App;
use theme::Theme;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "rives-dash")]
#[command(about = "RIVES Dashboard - leaderboard, replays and wallet in the terminal")]
#[command(version = VERSION)]
struct Cli {
    /// Dashboard theme (arcade, dark, light)
    #[arg(long, default_value = "arcade")]
    theme: String,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file (the terminal is taken by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Disable mouse capture
    #[arg(long)]
    no_mouse: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(RivesConfig::default_path);
    let config = RivesConfig::load(&config_path)?;

    let log_file = match cli.log_file.clone() {
        Some(path) => path,
        None => {
            let path = config.logging.dash_log_path(&RivesConfig::default_dir());
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            path
        }
    };
    init_logging(&LogOptions::from_config(&config.logging, 0, false, Some(log_file)))?;
    info!("rives-dash {} starting against {}", VERSION, config.node_url);

    let theme = Theme::from_name(&cli.theme);
    let mut app = App::new(config, theme)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if !cli.no_mouse {
        execute!(stdout, EnableMouseCapture)?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    if !cli.no_mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    // Periodic leaderboard refresh; stale renders are dropped by the view.
    let view = app.view.clone();
    let data = app.data.clone();
    let source = app.source();
    let application = app.config.application_address.clone();
    let period = app.config.refresh_interval();
    let refresher = tokio::spawn(async move {
        let mut interval = interval(period);
        loop {
            interval.tick().await;
            app::refresh_leaderboard(&view, source.as_ref(), &application, &data).await;
        }
    });

    app.connect_wallet();

    let result = loop {
        terminal.draw(|f| ui::render_ui(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break Ok(()),
                        KeyCode::Char('1') => app.tab = 0,
                        KeyCode::Char('2') => app.tab = 1,
                        KeyCode::Char('3') => app.tab = 2,
                        KeyCode::Tab => app.next_tab(),
                        KeyCode::BackTab => app.previous_tab(),
                        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
                        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                        KeyCode::Enter => app.open_replay(),
                        KeyCode::Char('r') => app.refresh(),
                        KeyCode::Char('c') => app.connect_wallet(),
                        KeyCode::Char('?') => app.show_help = !app.show_help,
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    };

    refresher.abort();
    result
}
