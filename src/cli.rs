use crate::{config::Config, gateways};
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use geocodr_boundary as boundary;
use geocodr_core::{
    entities::{AddressInput, GeocodeOutcome, GeocodeResult},
    util::address::normalize_address,
};
use std::{path::PathBuf, process::ExitCode};

#[derive(Parser)]
#[command(name = "geocodr", version)]
#[command(about = "Resolve postal addresses with the Google Maps geocoding API", long_about = None)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the coordinates and components of an address
    Geocode {
        /// Address components, e.g. "12 Main St" "Springfield"
        #[arg(required = true, value_name = "PART")]
        address: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the address as it would be sent to the provider
    Normalize {
        #[arg(required = true, value_name = "PART")]
        address: Vec<String>,
    },
    /// Check if the daily quota of the provider is exhausted
    Limit,
}

pub fn run() -> Result<ExitCode> {
    let Args { config, command } = Args::parse();
    match command {
        Command::Normalize { address } => {
            println!("{}", normalize_address(&AddressInput::from(address)));
            Ok(ExitCode::SUCCESS)
        }
        Command::Geocode { address, json } => {
            let gw = load_gateway(config)?;
            let result = gw.geocode(&AddressInput::from(address));
            let success = result.is_success();
            if json {
                let result = boundary::GeocodeResult::from(result);
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", summary(&result));
            }
            Ok(if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Limit => {
            let gw = load_gateway(config)?;
            if gw.is_over_limit() {
                println!("The daily limit has been exceeded");
                Ok(ExitCode::FAILURE)
            } else {
                println!("Not over the daily limit");
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn load_gateway(config: Option<PathBuf>) -> Result<gateways::GeoCodingGw> {
    let cfg = Config::try_load_from_file_or_default(config)?;
    gateways::geocoding_gateway(&cfg)?.ok_or_else(|| anyhow!("Geocoding is disabled"))
}

fn summary(result: &GeocodeResult) -> String {
    let cacheable = if result.cacheable { "yes" } else { "no" };
    match &result.outcome {
        GeocodeOutcome::Success(addr) => {
            let fields = [
                ("Latitude", addr.latitude.to_string()),
                ("Longitude", addr.longitude.to_string()),
                ("Street number", addr.street_number.clone()),
                (
                    "Street",
                    with_short(&addr.street_name, &addr.street_name_short),
                ),
                ("Suburb", addr.suburb.clone()),
                ("Council", with_short(&addr.council, &addr.council_short)),
                ("State", with_short(&addr.state, &addr.state_short)),
                ("Country", with_short(&addr.country, &addr.country_short)),
                ("Post code", addr.post_code.clone()),
                ("Cacheable", cacheable.to_owned()),
            ];
            fields
                .into_iter()
                .map(|(name, value)| format!("{:<14} {value}\n", format!("{name}:")))
                .collect()
        }
        GeocodeOutcome::Failure(failure) => format!(
            "Error {}: {}\nCacheable: {cacheable}\n",
            failure.code, failure.message
        ),
    }
}

fn with_short(long: &str, short: &str) -> String {
    if short.is_empty() || short == long {
        long.to_owned()
    } else {
        format!("{long} ({short})")
    }
}
