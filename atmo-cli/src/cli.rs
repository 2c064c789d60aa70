use anyhow::Context;
use atmo_core::{
    Config, TemperatureUnit, WeatherProvider,
    config::{MAX_TIMEOUT_SECS, MIN_REFRESH_SECS, MIN_TIMEOUT_SECS},
    provider_from_config,
};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Select, Text};
use std::{
    io::{BufRead, Write},
    time::Duration,
};
use tokio::{
    sync::mpsc::{self, error::TrySendError},
    time::MissedTickBehavior,
};
use tracing::{debug, info, warn};

use crate::{render, state::ViewState};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "atmo", version, about = "Current weather for Berlin")]
pub struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch current conditions once and print them.
    Show {
        /// Print the raw snapshot as JSON.
        #[arg(long)]
        json: bool,

        /// Temperature unit, `c` or `f`; defaults to the configured unit.
        #[arg(long)]
        unit: Option<TemperatureUnit>,
    },

    /// Keep the conditions on screen, refreshing on a timer. Press Enter to refresh now.
    Watch {
        /// Refresh period in seconds; defaults to the configured interval.
        #[arg(long)]
        interval: Option<u64>,

        /// Temperature unit, `c` or `f`; defaults to the configured unit.
        #[arg(long)]
        unit: Option<TemperatureUnit>,
    },

    /// List the weather codes and their descriptions.
    Codes,

    /// Interactively edit the configuration file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { json, unit } => {
                let config = Config::load()?;
                let unit = unit.unwrap_or(config.temperature_unit);
                let provider = provider_from_config(&config)?;
                show(provider.as_ref(), json, unit).await
            }
            Command::Watch { interval, unit } => {
                let config = Config::load()?;
                let period = match interval {
                    Some(secs) => Duration::from_secs(secs.max(MIN_REFRESH_SECS)),
                    None => config.refresh_interval(),
                };
                let unit = unit.unwrap_or(config.temperature_unit);
                let provider = provider_from_config(&config)?;

                info!(period_secs = period.as_secs(), "Watching current conditions");
                watch_loop(
                    provider.as_ref(),
                    period,
                    unit,
                    spawn_refresh_reader(),
                    tokio::signal::ctrl_c(),
                    &mut std::io::stdout(),
                )
                .await?;
                Ok(())
            }
            Command::Codes => {
                print!("{}", render::render_code_table());
                Ok(())
            }
            Command::Configure => configure(),
        }
    }
}

async fn show(
    provider: &dyn WeatherProvider,
    json: bool,
    unit: TemperatureUnit,
) -> anyhow::Result<()> {
    let snapshot = provider.fetch_snapshot().await?;

    if json {
        let out = serde_json::to_string_pretty(&snapshot)
            .context("Failed to serialize weather snapshot")?;
        println!("{out}");
    } else {
        print!("{}", render::render_snapshot(&snapshot, unit));
    }

    Ok(())
}

/// Forward each line typed on stdin as a manual refresh request.
///
/// Runs on a plain thread so a pending read never holds the runtime open at exit.
fn spawn_refresh_reader() -> mpsc::Receiver<()> {
    let (tx, rx) = mpsc::channel(1);

    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            if line.is_err() {
                break;
            }
            // A refresh already queued covers this press too.
            if let Err(TrySendError::Closed(())) = tx.try_send(()) {
                break;
            }
        }
    });

    rx
}

/// Fetch on every tick and on every manual refresh request until `shutdown` resolves.
///
/// `shutdown` is polled while a fetch is in flight, so an interrupt is never lost.
async fn watch_loop<S, W>(
    provider: &dyn WeatherProvider,
    period: Duration,
    unit: TemperatureUnit,
    mut refresh: mpsc::Receiver<()>,
    shutdown: S,
    out: &mut W,
) -> anyhow::Result<ViewState>
where
    S: Future,
    W: Write,
{
    tokio::pin!(shutdown);

    let mut state = ViewState::default();
    write!(out, "{}", render::render_state(&state, unit))?;
    out.flush()?;

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut refresh_open = true;

    loop {
        // Shutdown first, then the timer, so the first pass always fetches on the immediate tick.
        let manual = tokio::select! {
            biased;
            _ = &mut shutdown => {
                debug!("Interrupted, leaving watch");
                return Ok(state);
            }
            _ = ticker.tick() => false,
            request = refresh.recv(), if refresh_open => match request {
                Some(()) => true,
                None => {
                    debug!("Refresh input closed, timer only");
                    refresh_open = false;
                    continue;
                }
            },
        };

        let outcome = tokio::select! {
            outcome = provider.fetch_snapshot() => outcome,
            _ = &mut shutdown => {
                debug!("Interrupted during fetch, leaving watch");
                return Ok(state);
            }
        };

        if manual {
            ticker.reset();
        }
        if let Err(err) = &outcome {
            warn!(error = %err, "Refresh failed, keeping previous conditions");
        }

        state = state.apply(outcome);
        writeln!(out)?;
        writeln!(out, "Refreshed at {}", Local::now().format("%H:%M:%S"))?;
        write!(out, "{}", render::render_state(&state, unit))?;
        out.flush()?;
    }
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load()?;

    config.base_url = Text::new("Weather API base URL:")
        .with_default(&config.base_url)
        .prompt()
        .context("Failed to read base URL")?;

    config.timeout_secs = CustomType::<u64>::new("Request timeout in seconds:")
        .with_default(config.timeout_secs)
        .with_help_message(&format!("Clamped to {MIN_TIMEOUT_SECS}-{MAX_TIMEOUT_SECS}"))
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read timeout")?;

    config.refresh_interval_secs = CustomType::<u64>::new("Auto refresh interval in seconds:")
        .with_default(config.refresh_interval_secs)
        .with_help_message(&format!("At least {MIN_REFRESH_SECS}"))
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read refresh interval")?;

    let units = TemperatureUnit::all();
    let current = units.iter().position(|u| *u == config.temperature_unit).unwrap_or(0);
    config.temperature_unit = Select::new("Temperature unit:", units.to_vec())
        .with_starting_cursor(current)
        .prompt()
        .context("Failed to read temperature unit")?;

    config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
