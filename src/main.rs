mod cli;
use cli::{CliMode, USAGE, parse_cli_args, run_agenda_mode};
mod tui;
use tui::run_tui;

use calendar_brief::config::{APP_DIR, BASE_URL_ENV, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let options = match parse_cli_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let config = match Config::load_or_create() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Falling back to default configuration: {}", e);
            Config::default()
        }
    };
    let config = config.with_base_url_overrides(std::env::var(BASE_URL_ENV).ok(), options.base_url);

    match options.mode {
        CliMode::Agenda(date) => run_agenda_mode(&config, date).await,
        CliMode::Tui => run_tui(config).await,
    }
}

fn setup_logging() {
    let log_dir = dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "calendar-brief.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("calendar-brief started");
}
