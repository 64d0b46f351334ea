//! Cadence CLI
//!
//! Command-line interface for computing and previewing review intervals.

use std::io;

use anyhow::Context;
use cadence_core::{IntervalBounds, IntervalFactorScheduler, IntervalSchedule, SchedulerConfig};
use chrono::{DateTime, Duration, Utc};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

/// Cadence - factor-based interval scheduling
#[derive(Parser)]
#[command(name = "cadence")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compute spaced-repetition review intervals from a recall factor")]
#[command(long_about = "Cadence scales an item's previous review interval by a recall factor.\n\nFactors below 1.0 shrink the interval, 1.0 holds it, and above 1.0 grow it by a\njittered bonus that depends on how much of the previous interval had elapsed.\n\nDefaults come from CADENCE_MINIMUM_INTERVAL_SECS, CADENCE_VARIANCE_FACTOR and CADENCE_SEED.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the next schedule for an answer
    Next {
        #[command(flatten)]
        answer: AnswerArgs,

        /// Fixed seed for reproducible jitter
        #[arg(long)]
        seed: Option<u64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the lowest, middle and highest interval the jitter can produce
    Preview {
        #[command(flatten)]
        answer: AnswerArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as JSON
    Config,
}

#[derive(Args)]
struct AnswerArgs {
    /// Previous interval in seconds
    #[arg(long)]
    interval: i64,

    /// Recall factor (<1 shrink, 1 hold, >1 grow)
    #[arg(long, allow_negative_numbers = true)]
    factor: f64,

    /// When the item was last answered, RFC 3339 (default: answered - interval)
    #[arg(long, value_parser = parse_timestamp)]
    last_answered: Option<DateTime<Utc>>,

    /// When the item was answered, RFC 3339 (default: now)
    #[arg(long, value_parser = parse_timestamp)]
    answered: Option<DateTime<Utc>>,

    /// Minimum interval in seconds (overrides CADENCE_MINIMUM_INTERVAL_SECS)
    #[arg(long)]
    minimum: Option<i64>,

    /// Variance factor (overrides CADENCE_VARIANCE_FACTOR)
    #[arg(long)]
    variance: Option<f64>,
}

impl AnswerArgs {
    fn config(&self, seed: Option<u64>) -> anyhow::Result<SchedulerConfig> {
        let mut config =
            SchedulerConfig::from_env().context("Failed to read CADENCE_* environment")?;
        if let Some(minimum) = self.minimum {
            config.minimum_interval_secs = minimum;
        }
        if let Some(variance) = self.variance {
            config.variance_factor = variance;
        }
        if seed.is_some() {
            config.seed = seed;
        }
        config.validate()?;
        Ok(config)
    }

    /// The schedule being advanced and the answer time
    fn schedule(&self) -> anyhow::Result<(IntervalSchedule, DateTime<Utc>)> {
        let interval = Duration::try_seconds(self.interval)
            .with_context(|| format!("Interval out of range: {}s", self.interval))?;
        let answered = self.answered.unwrap_or_else(Utc::now);
        let last_answered = match self.last_answered {
            Some(t) => t,
            None => answered
                .checked_sub_signed(interval)
                .context("Interval reaches before the earliest representable time")?,
        };
        Ok((IntervalSchedule::new(last_answered, interval), answered))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewOutput {
    low_secs: i64,
    mid_secs: i64,
    high_secs: i64,
}

impl From<IntervalBounds> for PreviewOutput {
    fn from(bounds: IntervalBounds) -> Self {
        Self {
            low_secs: bounds.low.num_seconds(),
            mid_secs: bounds.mid.num_seconds(),
            high_secs: bounds.high.num_seconds(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Next { answer, seed, json } => run_next(answer, seed, json),
        Commands::Preview { answer, json } => run_preview(answer, json),
        Commands::Config => run_config(),
    }
}

fn run_next(answer: AnswerArgs, seed: Option<u64>, json: bool) -> anyhow::Result<()> {
    let config = answer.config(seed)?;
    let scheduler = IntervalFactorScheduler::from_config(&config)?;
    let (schedule, answered) = answer.schedule()?;
    debug!(?schedule, %answered, factor = answer.factor, "Advancing schedule");

    let (next, calc) = scheduler.advance_detailed(&schedule, answered, answer.factor);

    if json {
        println!("{}", serde_json::to_string_pretty(&next)?);
        return Ok(());
    }

    println!("{}", "=== Next Schedule ===".cyan().bold());
    println!();
    println!(
        "{}: {}",
        "Previous Interval".white().bold(),
        format_duration(schedule.interval())
    );
    println!(
        "{}: {}",
        "Next Interval".white().bold(),
        format_duration(next.interval()).green()
    );
    println!(
        "{}: {}",
        "Last Answered".white().bold(),
        next.last_answered().format("%Y-%m-%d %H:%M:%S")
    );
    println!("{}: {}", "Due".white().bold(), next.due().format("%Y-%m-%d %H:%M:%S"));

    if calc.floored {
        println!("{}", "(raised to the minimum interval)".dimmed());
    }

    Ok(())
}

fn run_preview(answer: AnswerArgs, json: bool) -> anyhow::Result<()> {
    let config = answer.config(None)?;
    let scheduler = IntervalFactorScheduler::from_config(&config)?;
    let (schedule, answered) = answer.schedule()?;

    let bounds = scheduler.interval_bounds(&schedule, answered, answer.factor);

    if json {
        println!("{}", serde_json::to_string_pretty(&PreviewOutput::from(bounds))?);
        return Ok(());
    }

    println!("{}", "=== Interval Preview ===".cyan().bold());
    println!();
    println!("{}: {}", "Factor".white().bold(), answer.factor);
    println!("{}: {}", "Variance Factor".white().bold(), scheduler.variance_factor());
    println!("{}: {}", "Low".white().bold(), format_duration(bounds.low).yellow());
    println!("{}: {}", "Mid".white().bold(), format_duration(bounds.mid));
    println!("{}: {}", "High".white().bold(), format_duration(bounds.high).green());

    Ok(())
}

fn run_config() -> anyhow::Result<()> {
    let config = SchedulerConfig::from_env().context("Failed to read CADENCE_* environment")?;
    config.validate()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {}", e))
}

/// Render a duration as `1d 2h 3m 4s`, dropping zero units
fn format_duration(duration: Duration) -> String {
    let sign = if duration < Duration::zero() { "-" } else { "" };
    let total = duration.num_seconds().unsigned_abs();

    let (days, rem) = (total / 86_400, total % 86_400);
    let (hours, rem) = (rem / 3600, rem % 3600);
    let (minutes, seconds) = (rem / 60, rem % 60);

    let parts: Vec<String> = [(days, "d"), (hours, "h"), (minutes, "m"), (seconds, "s")]
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| format!("{}{}", n, unit))
        .collect();

    if parts.is_empty() {
        "0s".to_string()
    } else {
        format!("{}{}", sign, parts.join(" "))
    }
}
