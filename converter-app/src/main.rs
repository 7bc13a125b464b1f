//! # Converter Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment (and `.env`)
//! - Initialize logging
//! - Build the HTTP rate provider client
//! - Run the interactive shell or a one-shot command

mod config;

use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use converter_client::RateApiClient;
use converter_hex::{
    ConverterSession,
    inbound::{
        Shell,
        render::{render_currencies, render_result},
    },
};
use converter_types::{ConversionInput, CurrencyCode};

#[derive(Parser)]
#[command(name = "converter")]
#[command(author, version, about = "Currency converter backed by live exchange rates", long_about = None)]
struct Cli {
    /// Base URL of the rate provider (overrides CONVERTER_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides CONVERTER_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive converter (the default)
    Shell {
        /// Initial source currency
        #[arg(long)]
        from: Option<String>,
        /// Initial target currency
        #[arg(long)]
        to: Option<String>,
        /// Initial amount
        #[arg(long)]
        amount: Option<String>,
    },
    /// Convert once and exit
    Convert {
        amount: String,
        from: String,
        to: String,
        /// Print the full view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the latest rate table for a base currency
    Rates {
        base: String,
        /// Print the rate table as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(json: bool) {
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = config::Config::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }

    init_tracing(config.json_logs);

    let client = RateApiClient::new(&config.api_url).with_timeout(config.timeout)?;
    tracing::info!("Using rate provider {}", client.base_url());

    let command = cli.command.unwrap_or(Commands::Shell {
        from: None,
        to: None,
        amount: None,
    });

    match command {
        Commands::Shell { from, to, amount } => {
            if let Some(from) = from {
                config.default_from = CurrencyCode::parse(&from)?;
            }
            if let Some(to) = to {
                config.default_to = CurrencyCode::parse(&to)?;
            }
            if let Some(amount) = amount {
                config.default_amount = amount;
            }

            let session = ConverterSession::new(client, config.initial_input()?);
            println!("Type `help` for commands.");
            Shell::new(session)
                .run(
                    tokio::io::BufReader::new(tokio::io::stdin()),
                    tokio::io::stdout(),
                )
                .await?;
        }

        Commands::Convert {
            amount,
            from,
            to,
            json,
        } => {
            let input = ConversionInput::new(
                &amount,
                CurrencyCode::parse(&from)?,
                CurrencyCode::parse(&to)?,
            )?;
            let session = ConverterSession::new(client, input);
            session.start();
            let view = session.settled().await;

            if let Some(error) = view.fetch_state.error() {
                bail!("{} ({})", error.message, error.diagnostic);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                match render_result(&view) {
                    Some(text) => print!("{}", text),
                    None => bail!(
                        "No rate from {} to {} for amount {:?}",
                        view.from,
                        view.to,
                        view.amount
                    ),
                }
            }
        }

        Commands::Rates { base, json } => {
            let base = CurrencyCode::parse(&base)?;
            let input = ConversionInput::new("1", base.clone(), base)?;
            let session = ConverterSession::new(client, input);
            session.start();
            let view = session.settled().await;

            if let Some(error) = view.fetch_state.error() {
                bail!("{} ({})", error.message, error.diagnostic);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&view.fetch_state)?);
            } else {
                print!("{}", render_currencies(&view));
            }
        }
    }

    Ok(())
}
