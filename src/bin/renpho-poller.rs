// ABOUTME: Demo host loop polling the Renpho cloud on a fixed interval
// ABOUTME: Logs the fourteen readings each cycle; errors degrade, never crash
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Renpho poller
//!
//! Minimal host around [`RenphoClient`]: load configuration, then fetch the
//! latest measurement once per refresh interval until interrupted. Every
//! failure mode is reported and the loop keeps going; a bad cycle only means
//! the readings stay unknown until the next one.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use renpho_health::{
    logging, BodyMetric, ClientConfig, Error, InMemoryTokenStore, MeasurementReading, RenphoClient,
};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "renpho-poller")]
#[command(about = "Poll the Renpho Health cloud for the latest body-composition reading")]
struct Args {
    /// Account email (overrides RENPHO_EMAIL)
    #[arg(long)]
    email: Option<String>,

    /// Account password (overrides RENPHO_PASSWORD)
    #[arg(long)]
    password: Option<String>,

    /// Refresh interval in seconds (overrides RENPHO_REFRESH_INTERVAL_SECS)
    #[arg(long)]
    interval: Option<u64>,

    /// Fetch once and exit instead of polling
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_from_env()?;

    let args = Args::parse();

    let mut config = match (args.email, args.password) {
        (Some(email), Some(password)) => ClientConfig::new(email, password),
        _ => ClientConfig::from_env()?,
    };
    if let Some(secs) = args.interval {
        config.refresh_interval = std::time::Duration::from_secs(secs);
    }
    config.validate()?;

    let client = RenphoClient::new(config, Arc::new(InMemoryTokenStore::new()));
    info!(
        interval_secs = client.refresh_interval().as_secs(),
        "starting Renpho poller"
    );

    let mut ticker = tokio::time::interval(client.refresh_interval());
    loop {
        tokio::select! {
            _ = ticker.tick() => refresh(&client).await,
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
        }
        if args.once {
            break;
        }
    }

    Ok(())
}

async fn refresh(client: &RenphoClient) {
    match client.latest_measurement().await {
        Ok(reading) => report(&reading),
        Err(Error::DataUnavailable) => info!("no measurement recorded yet"),
        Err(Error::Authentication { message }) => {
            error!(message, "authentication failed; check email and password");
        }
        Err(err) => warn!(error = %err, "refresh failed, will retry next cycle"),
    }
}

fn report(reading: &MeasurementReading) {
    if let Some(at) = reading.recorded_at {
        info!(recorded_at = %at, scale = reading.scale_name.as_deref().unwrap_or("unknown"), "latest measurement");
    }
    for metric in BodyMetric::ALL {
        match reading.value(metric) {
            Some(value) => match metric.unit() {
                Some(unit) => info!("{:>24}: {value} {unit}", metric.key()),
                None => info!("{:>24}: {value}", metric.key()),
            },
            None => info!("{:>24}: unknown", metric.key()),
        }
    }
}
