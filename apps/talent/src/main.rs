//! # Talent Compass
//!
//! The command-line front end for the talent-core 9-box engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                apps/talent (THE BINARY)              │
//! │                                                      │
//! │  ┌─────────────┐   ┌─────────────┐   ┌───────────┐   │
//! │  │    CLI      │   │   Config    │   │  Reports  │   │
//! │  │   (clap)    │   │   (toml)    │   │  (text)   │   │
//! │  └──────┬──────┘   └──────┬──────┘   └─────┬─────┘   │
//! │         └─────────────────┼────────────────┘         │
//! │                           ▼                          │
//! │                   ┌───────────────┐                  │
//! │                   │  talent-core  │                  │
//! │                   │  (THE LOGIC)  │                  │
//! │                   └───────────────┘                  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! talent -S snapshot.json dashboard
//! talent -S snapshot.json --as manager1 retention
//! talent -S snapshot.json --as hr1 export-csv --date 2025-06-30
//! talent classify 3 2
//! ```

use clap::Parser;
use talent::cli;
use talent::config::LogFormat;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Resolve settings before logging so the log format can come from config
    let settings = match cli.settings() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing: TALENT_LOG_FORMAT=json enables machine-parseable output.
    let default_filter = if cli.verbose { "talent=debug" } else { "talent=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match settings.log_format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if let Some(path) = &settings.config_file {
        tracing::debug!("Loaded config from {}", path.display());
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli, &settings) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  ┌───┬───┬───┐
  │   │   │ ★ │   Talent Compass v{}
  ├───┼───┼───┤
  │   │ ● │   │   9-Box Succession Planning
  ├───┼───┼───┤
  │ ▼ │   │   │   Classify • Aggregate • Recommend
  └───┴───┴───┘
"#,
        env!("CARGO_PKG_VERSION")
    );
}
