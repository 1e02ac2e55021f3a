#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the ipaws-map toolchain.
//!
//! Fetches archived IPAWS alerts for a date window and prints
//! summaries, markers, or one alert's boundary geometry without
//! running the server.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ipaws_map_geometry::{ViewportBounds, derive_markers, extract_boundaries};
use ipaws_map_server_models::{ApiBoundaries, ApiMarker};
use ipaws_map_source::{FetchOptions, ipaws};

#[derive(Parser)]
#[command(name = "ipaws-map", about = "Inspect archived IPAWS alerts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a date window and print a per-alert summary.
    Fetch {
        #[command(flatten)]
        window: Window,
    },
    /// Print the map-pin marker list for a date window as JSON.
    Markers {
        #[command(flatten)]
        window: Window,
    },
    /// Print one alert's boundary geometry as JSON.
    Boundaries {
        #[command(flatten)]
        window: Window,
        /// CAP identifier of the alert.
        #[arg(long)]
        id: String,
    },
    /// Resolve a US postal code to a latitude/longitude.
    Geocode {
        /// Postal code to resolve.
        postal_code: String,
    },
}

/// Shared date-window arguments.
#[derive(clap::Args)]
struct Window {
    /// Start date (inclusive, YYYY-MM-DD).
    #[arg(long)]
    from: NaiveDate,
    /// End date (inclusive, YYYY-MM-DD).
    #[arg(long)]
    to: NaiveDate,
    /// Optional viewport as 'west,south,east,north'.
    #[arg(long)]
    bbox: Option<ViewportBounds>,
    /// Maximum number of records to request.
    #[arg(long)]
    limit: Option<u64>,
}

impl Window {
    fn fetch_options(&self) -> FetchOptions {
        let mut options = FetchOptions::new(self.from, self.to);
        if let Some(bounds) = self.bbox {
            options = options.with_bounds(bounds);
        }
        if let Some(limit) = self.limit {
            options.limit = limit;
        }
        options
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();
    let client = ipaws_map_source::build_http_client()?;

    match cli.command {
        Command::Fetch { window } => {
            let alerts = ipaws::fetch_alerts(&client, &window.fetch_options()).await?;
            println!("{} alerts", alerts.len());
            for alert in &alerts {
                let set = extract_boundaries(Some(alert));
                println!(
                    "  {} sent={} rings={} discs={}",
                    alert.identifier,
                    alert.sent,
                    set.rings.len(),
                    set.discs.len()
                );
            }
        }
        Command::Markers { window } => {
            let alerts = ipaws::fetch_alerts(&client, &window.fetch_options()).await?;
            let pins: Vec<ApiMarker> = derive_markers(&alerts)
                .iter()
                .map(ApiMarker::from)
                .collect();
            println!("{}", serde_json::to_string_pretty(&pins)?);
        }
        Command::Boundaries { window, id } => {
            let alerts = ipaws::fetch_alerts(&client, &window.fetch_options()).await?;
            let selected = alerts.iter().find(|a| a.identifier == id);
            if selected.is_none() {
                log::warn!("alert {id} not found in window");
            }
            let set = ApiBoundaries::from(extract_boundaries(selected));
            println!("{}", serde_json::to_string_pretty(&set)?);
        }
        Command::Geocode { postal_code } => {
            let point = ipaws_map_geocoder::nominatim::geocode_postal_code(
                &client,
                ipaws_map_geocoder::nominatim::DEFAULT_BASE_URL,
                &postal_code,
            )
            .await?;
            match point {
                Some(point) => println!("{} {}", point.latitude, point.longitude),
                None => println!("no match"),
            }
        }
    }

    Ok(())
}
