use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use krushi::render::{crops, market, water, weather};
use krushi::{AdvisoryApiClient, Dashboard, KrushiConfig, forms, geolocation, logging};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(author, version, about = "Agricultural advisory dashboard")]
struct Args {
    /// Configuration file (default: <config dir>/krushi/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Advisory backend base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Device latitude used when the backend cannot detect the location
    #[arg(long, global = true, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Device longitude used when the backend cannot detect the location
    #[arg(long, global = true, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Skip location detection before running the command
    #[arg(long, global = true)]
    no_detect: bool,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve the current location
    DetectLocation,

    /// Crop recommendations for a farm
    Recommend {
        /// Location, defaults to the detected one
        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        soil_type: String,

        /// Water availability (low, medium, high)
        #[arg(long)]
        water_availability: String,

        /// Farm size, numeric prefix is used
        #[arg(long)]
        farm_size: Option<String>,
    },

    /// Current weather and forecast
    Weather {
        /// Location, defaults to the detected one
        #[arg(long)]
        location: Option<String>,
    },

    /// Market prices and predictions for a crop
    Market {
        #[arg(long)]
        crop: String,
    },

    /// Irrigation schedule and conservation tips
    Water {
        #[arg(long)]
        crop: String,

        #[arg(long)]
        soil: String,

        /// Location, defaults to the detected one
        #[arg(long)]
        location: Option<String>,
    },
}

fn load_config(args: &Args) -> anyhow::Result<KrushiConfig> {
    let mut config = KrushiConfig::load_from_path(args.config.clone())?;

    if let Some(base_url) = &args.base_url {
        config.backend.base_url.clone_from(base_url);
    }
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        config.geolocation.latitude = Some(lat);
        config.geolocation.longitude = Some(lon);
    }
    if args.verbose {
        config.logging.level = "debug".to_string();
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let config = load_config(&args)?;
    logging::init(&config.logging)?;

    let backend =
        AdvisoryApiClient::new(&config.backend).context("Failed to create backend client")?;
    let dashboard = Dashboard::new(
        backend,
        geolocation::from_config(&config.geolocation),
        &config,
    );

    if args.no_detect {
        debug!("Location detection skipped");
    } else if !matches!(args.command, Command::DetectLocation) {
        dashboard.on_load().await;
    }

    let (outcome, containers) = match args.command {
        Command::DetectLocation => {
            let resolved = dashboard.on_load().await;
            print_notifications(&dashboard);
            println!("{}", resolved.location);
            if let Some(details) = &resolved.details {
                println!("{}", serde_json::to_string_pretty(details)?);
            }
            return Ok(ExitCode::SUCCESS);
        }
        Command::Recommend {
            location,
            soil_type,
            water_availability,
            farm_size,
        } => {
            set_if_some(&dashboard, forms::LOCATION, location);
            dashboard.set_field(forms::SOIL_TYPE, soil_type);
            dashboard.set_field(forms::WATER_AVAILABILITY, water_availability);
            set_if_some(&dashboard, forms::FARM_SIZE, farm_size);
            (
                dashboard.get_crop_recommendations().await,
                vec![crops::CROP_CARDS],
            )
        }
        Command::Weather { location } => {
            set_if_some(&dashboard, forms::WEATHER_LOCATION, location);
            (
                dashboard.get_weather().await,
                vec![weather::CURRENT_WEATHER, weather::FORECAST],
            )
        }
        Command::Market { crop } => {
            dashboard.set_field(forms::MARKET_CROP, crop);
            (
                dashboard.get_market_data().await,
                vec![market::PRICE_DATA, market::PREDICTION_DATA],
            )
        }
        Command::Water {
            crop,
            soil,
            location,
        } => {
            dashboard.set_field(forms::WATER_CROP, crop);
            dashboard.set_field(forms::WATER_SOIL, soil);
            set_if_some(&dashboard, forms::WATER_LOCATION, location);
            (
                dashboard.get_water_advice().await,
                vec![water::IRRIGATION_DATA, water::CONSERVATION_TIPS],
            )
        }
    };

    print_notifications(&dashboard);

    if outcome.is_err() {
        return Ok(ExitCode::FAILURE);
    }

    for container in containers {
        if let Some(html) = dashboard.panel_html(container) {
            println!("{html}");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn set_if_some<B, G>(dashboard: &Dashboard<B, G>, id: &str, value: Option<String>)
where
    B: krushi::AdvisoryBackend,
    G: krushi::GeolocationProvider,
{
    if let Some(value) = value {
        dashboard.set_field(id, value);
    }
}

/// Oldest first, the way they appeared
fn print_notifications<B, G>(dashboard: &Dashboard<B, G>)
where
    B: krushi::AdvisoryBackend,
    G: krushi::GeolocationProvider,
{
    for notification in dashboard.notifications().iter().rev() {
        eprintln!("[{}] {}", notification.severity, notification.message);
    }
}
