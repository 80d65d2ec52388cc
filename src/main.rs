//! CLI entry point for the surf forecast tool.
//!
//! Provides subcommands for registering beaches, rating the forecast of every
//! registered beach via StormGlass, and rating a single hand-written forecast
//! point.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;
use surf_forecast::config::{self, Config};
use surf_forecast::fetch::{BasicClient, auth::ApiKey};
use surf_forecast::infra::stormglass::StormGlass;
use surf_forecast::models::beach::{add_beach, beaches_for_user, load_beaches};
use surf_forecast::output::{append_records, write_json};
use surf_forecast::services::rating::{
    position_from_angle, rating_for_swell_period, rating_for_swell_size,
};
use surf_forecast::{Beach, Forecast, ForecastPoint, GeoPosition, RatingService};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "surf_forecast")]
#[command(about = "Rates marine forecasts for registered beaches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the beach registry
    Beaches {
        /// JSON file holding the beach registry
        #[arg(short, long, default_value = "beaches.json")]
        file: String,

        #[command(subcommand)]
        command: BeachCommands,
    },
    /// Fetch, rate and group the forecast of every beach by time
    Forecast {
        /// JSON file holding the beach registry
        #[arg(short, long, default_value = "beaches.json")]
        beaches: String,

        /// Only rate the beaches owned by this user
        #[arg(short, long)]
        user: Option<String>,

        /// Optional: CSV file to append every rated point to
        #[arg(long)]
        csv: Option<String>,
    },
    /// Rate a single forecast point for a beach orientation
    Rate {
        /// Direction the beach faces (N, E, S or W)
        #[arg(short, long)]
        position: GeoPosition,

        /// Swell direction in degrees
        #[arg(long)]
        swell_direction: f64,

        /// Swell height in meters
        #[arg(long)]
        swell_height: f64,

        /// Swell period in seconds
        #[arg(long)]
        swell_period: f64,

        /// Wind direction in degrees
        #[arg(long)]
        wind_direction: f64,
    },
}

#[derive(Subcommand)]
enum BeachCommands {
    /// Validate a beach and append it to the registry
    Add {
        /// Beach name
        #[arg(long)]
        name: String,

        /// Latitude in degrees, within [-90, 90]
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees, within [-180, 180]
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Direction the beach faces (N, E, S or W)
        #[arg(short, long)]
        position: GeoPosition,

        /// Owning user
        #[arg(short, long)]
        user: Option<String>,
    },
    /// List the registered beaches
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = config::log_file_path();
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("surf_forecast.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Beaches { file, command } => match command {
            BeachCommands::Add {
                name,
                lat,
                lng,
                position,
                user,
            } => {
                let beach = Beach {
                    name,
                    lat,
                    lng,
                    position,
                    user,
                };
                let total = add_beach(&file, beach)?;
                info!(file, total, "Beach registered");
            }
            BeachCommands::List => {
                let beaches = load_beaches(&file)?;
                println!("{}", serde_json::to_string_pretty(&beaches)?);
            }
        },
        Commands::Forecast {
            beaches,
            user,
            csv,
        } => {
            let config = Config::from_env()?;
            forecast(&config, &beaches, user.as_deref(), csv.as_deref()).await?;
        }
        Commands::Rate {
            position,
            swell_direction,
            swell_height,
            swell_period,
            wind_direction,
        } => {
            rate(
                position,
                swell_direction,
                swell_height,
                swell_period,
                wind_direction,
            );
        }
    }

    Ok(())
}

/// Rates the forecast of the registered beaches and prints it as JSON.
#[tracing::instrument(skip(config))]
async fn forecast(
    config: &Config,
    beaches_path: &str,
    user: Option<&str>,
    csv: Option<&str>,
) -> Result<()> {
    let mut beaches = load_beaches(beaches_path)?;
    if let Some(user) = user {
        beaches = beaches_for_user(beaches, user);
    }
    info!(beaches = beaches.len(), "Beaches loaded");

    let sg = &config.stormglass;
    let transport = BasicClient::with_timeout(Duration::from_secs(sg.timeout_secs))?;
    let client = ApiKey::authorization(transport, &sg.api_token)
        .context("STORMGLASS_API_TOKEN is not a valid header value")?;
    let service = Forecast::new(StormGlass::new(client, sg));

    let by_time = service.process_forecast_for_beaches(&beaches).await?;
    info!(groups = by_time.len(), "Forecast ready");

    if let Some(path) = csv {
        let rows = append_records(path, &by_time)?;
        info!(path, rows, "Forecast appended to CSV");
    }

    write_json(std::io::stdout().lock(), &by_time)?;
    Ok(())
}

/// Prints the rating of one point together with its sub-scores.
fn rate(
    position: GeoPosition,
    swell_direction: f64,
    swell_height: f64,
    swell_period: f64,
    wind_direction: f64,
) {
    let point = ForecastPoint {
        time: String::new(),
        swell_direction,
        swell_height,
        swell_period,
        wave_direction: swell_direction,
        wave_height: swell_height,
        wind_direction,
        wind_speed: 0.0,
    };
    let service = RatingService::new(position);

    let swell = position_from_angle(swell_direction);
    let wind = position_from_angle(wind_direction);

    println!("rating:        {}", service.rate_point(&point));
    println!(
        "wind/wave:     {} (swell {swell}, wind {wind}, beach {position})",
        service.rating_for_wind_and_wave_positions(swell, wind)
    );
    println!("swell height:  {}", rating_for_swell_size(swell_height));
    println!("swell period:  {}", rating_for_swell_period(swell_period));
}
