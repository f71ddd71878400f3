// countryscope - browse the world's countries in your terminal
//
// A small client over the REST Countries API: fetch the full country
// list, sort it by region, name, or capital, and show a detail overlay
// for the selected record.
//
// Architecture:
// - Fetcher (reqwest): one GET for the whole list, parsed with serde
// - Sorter: in-place reorder by the selected key
// - TUI (ratatui): table rebuilt every frame, overlay for details
// - Loader tasks and the event loop talk over an mpsc channel

mod cli;
mod config;
mod countries;
mod demo;
mod logging;
mod sort;
mod tui;

use anyhow::Result;
use config::Config;
use logging::{LogBuffer, TuiLogLayer};
use sort::sort_countries;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --edit, --path)
    // If a command was handled, exit early
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();

    // Log buffer for TUI mode: captured entries feed the status line and
    // the logs view instead of garbling the alternate screen
    let log_buffer = LogBuffer::new();

    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("countryscope={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // Optional rolling file logging (non-blocking writer; the guard must
    // stay alive for the duration of the program so logs flush)
    let (file_writer, _file_guard) = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(
                    &config.logging.file_dir,
                    &config.logging.file_prefix,
                );
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                (Some(non_blocking), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    if config.enable_tui {
        // JSON format in the file for structured log parsing
        let file_layer = file_writer.map(|writer| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
        });
        tracing_subscriber::registry()
            .with(filter)
            .with(TuiLogLayer::new(log_buffer.clone()))
            .with(file_layer)
            .init();

        tracing::info!("countryscope v{} starting", config::VERSION);
        tui::run_tui(config, log_buffer).await?;
    } else {
        let file_layer = file_writer.map(|writer| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
        });
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .with(file_layer)
            .init();

        run_headless(&config).await;
    }

    Ok(())
}

/// Headless mode: run the pipeline once and print the table to stdout
///
/// A fetch failure is logged and leaves the table empty (header only) -
/// the same policy the TUI applies, minus the screen.
async fn run_headless(config: &Config) {
    tracing::info!("TUI disabled, printing the table once");

    let mut list = if config.demo_mode {
        demo::sample_countries()
    } else {
        let client = reqwest::Client::new();
        match countries::fetch_countries(&client, &config.api_url).await {
            Ok(list) => list,
            Err(e) => {
                tracing::error!("failed to load countries: {:#}", e);
                Vec::new()
            }
        }
    };

    sort_countries(&mut list, Some(config.sort));
    print!("{}", countries::plain_table(&list));
}
