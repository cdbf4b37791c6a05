//! `slots` CLI — suggest meeting times from a Calendly account's availability.
//!
//! ## Usage
//!
//! ```sh
//! # Three sets of five 30-minute slots over the next 30 days (Mountain time)
//! CALENDLY_API_KEY=... slots
//!
//! # 60-minute slots after 5pm Pacific, weekdays only, two recipients
//! slots --duration 60 --timezone PST --after-hour 17 --exclude-weekends --events 2
//!
//! # Reproducible pick of slots
//! slots --seed 42
//! ```
//!
//! The API key may also live in a `.env` file in the working directory.
//! Set `RUST_LOG=debug` to see each pipeline stage on stderr.

mod calendly;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use slot_engine::{parse_timezone, propose, ProposalRequest};
use tracing_subscriber::EnvFilter;

use crate::calendly::CalendlyClient;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Generate time options based off of a Calendly account"
)]
struct Cli {
    /// Number of minutes to schedule
    #[arg(long, default_value_t = 30)]
    duration: u32,

    /// Number of days in advance to pick from
    #[arg(long, default_value_t = 30)]
    days: u32,

    /// Timezone to pick times in (IANA name, or PST / CST / MST / EST)
    #[arg(long, default_value = "America/Denver")]
    timezone: String,

    /// Only pick slots after this hour (24hr format)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=23))]
    after_hour: Option<u32>,

    /// Skip slots on Saturdays and Sundays
    #[arg(long)]
    exclude_weekends: bool,

    /// Number of slots per event
    #[arg(long, default_value_t = 5)]
    total: usize,

    /// Number of events to schedule
    #[arg(long, default_value_t = 3)]
    events: usize,

    /// Number of slots per day
    #[arg(long, default_value_t = 3)]
    slots_per_day: usize,

    /// Seed for the slot shuffle (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Calendly API key
    #[arg(long, env = "CALENDLY_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let timezone = parse_timezone(&cli.timezone)?;
    let api_key = cli
        .api_key
        .filter(|key| !key.trim().is_empty())
        .context("No API key: pass --api-key or set CALENDLY_API_KEY")?;

    let request = ProposalRequest {
        duration_minutes: cli.duration,
        days: cli.days,
        timezone,
        after_hour: cli.after_hour,
        exclude_weekends: cli.exclude_weekends,
        total: cli.total,
        events: cli.events,
        slots_per_day: cli.slots_per_day,
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let client = CalendlyClient::new(api_key);
    let report = propose(&client, &request, &mut rng).context("Failed to generate proposals")?;
    print!("{}", report);

    Ok(())
}
