//! Storefront CLI
//!
//! Command-line interface for the storefront locale API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use storefront_client::StorefrontClient;
use storefront_types::{CountryCode, RefreshStatus};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about = "Storefront locale API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the storefront API
    #[arg(
        long,
        env = "STOREFRONT_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// List supported currencies with their rates
    Currencies,
    /// Convert an amount between currencies
    Convert {
        amount: f64,
        #[arg(long, default_value = "EUR")]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Format an amount in a currency
    Format {
        amount: f64,
        #[arg(long)]
        currency: String,
    },
    /// Show the currency used in a country
    CountryCurrency {
        /// ISO 3166-1 alpha-2 code (CI, SN, NG, ...)
        #[arg(value_parser = CountryCode::parse)]
        country: CountryCode,
    },
    /// Detect the country at a position
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// Show the currently detected country and currency
    Location,
    /// Refresh exchange rates from the provider
    RefreshRates,
    /// Clean, validate and format a phone number
    Phone {
        number: String,
    },
    /// Show the calling code of a country
    CallingCode {
        #[arg(value_parser = CountryCode::parse)]
        country: CountryCode,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = StorefrontClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Currencies => {
            let currencies = client.currencies().await?;
            println!("{}", serde_json::to_string_pretty(&currencies)?);
        }

        Commands::Convert { amount, from, to } => {
            let result = client.convert(amount, &from, &to).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Format { amount, currency } => {
            let result = client.format(amount, &currency).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::CountryCurrency { country } => {
            let result = client.country_currency(country.as_str()).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Locate { lat, lng } => {
            let result = client.locate(lat, lng).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Location => {
            let state = client.location().await?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }

        Commands::RefreshRates => {
            let result = client.refresh_rates().await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if result.status == RefreshStatus::Failed {
                std::process::exit(1);
            }
        }

        Commands::Phone { number } => {
            let result = client.phone(&number).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::CallingCode { country } => {
            let entry = client.calling_code(country.as_str()).await?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
    }

    Ok(())
}
