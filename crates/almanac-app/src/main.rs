mod commands;

use almanac_cal::ExpansionLimits;
use almanac_core::config::load_config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "almanac")]
#[command(about = "Expand repeating calendar events and convert times between zones")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a JSON array of events into concrete occurrences
    Expand {
        /// Events file, or "-" for stdin
        events: PathBuf,

        /// First day of the view window (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Last day of the view window (YYYY-MM-DD)
        #[arg(long)]
        to: String,

        /// Display zone; defaults to the configured one
        #[arg(long)]
        tz: Option<String>,
    },
    /// Convert a YYYYMMDDTHHmmss wall-clock time into the display zone
    Convert {
        date: String,

        /// Display zone; defaults to the configured one
        #[arg(long)]
        tz: Option<String>,

        /// Zone the input is wall-clock time in; defaults to the display zone
        #[arg(long)]
        event_tz: Option<String>,
    },
    /// Classify a repeat rule and print its canonical form
    Rule { text: String },
    /// List the selectable zones
    Zones,
    /// Print the current wall-clock time in a zone
    Now {
        #[arg(long)]
        tz: Option<String>,
    },
}

fn main() -> Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config()?;

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let display_zone = |tz: Option<String>| tz.unwrap_or_else(|| config.display.timezone.clone());

    match cli.command {
        Commands::Expand {
            events,
            from,
            to,
            tz,
        } => {
            let limits = ExpansionLimits::from(&config.expansion);
            commands::expand::run(&events, &from, &to, &display_zone(tz), &limits)
        }
        Commands::Convert { date, tz, event_tz } => {
            commands::convert::run(&date, &display_zone(tz), event_tz.as_deref())
        }
        Commands::Rule { text } => commands::rule::run(&text),
        Commands::Zones => {
            commands::zones::list();
            Ok(())
        }
        Commands::Now { tz } => {
            commands::zones::now(&display_zone(tz));
            Ok(())
        }
    }
}
