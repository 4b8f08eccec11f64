use std::sync::Arc;

use allot_api::{AppState, config::AllotConfig, create_app};
use allot_types::ContractCounters;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "allot", version, about = "Oversubscription allocation calculator")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true, env = "ALLOT_LOG_JSON")]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Fetch and print the contract counters
    Counters,
    /// Calculate the allocation for an amount
    Calculate {
        /// Amount to contribute, e.g. 10 or 2.5
        amount: String,
        /// Total allocation counter; fetched from the chain when omitted
        #[arg(long, requires_all = ["balance", "reserved"])]
        allocation: Option<String>,
        /// Total balance counter
        #[arg(long, requires_all = ["allocation", "reserved"])]
        balance: Option<String>,
        /// Total reserved-used counter
        #[arg(long, requires_all = ["allocation", "balance"])]
        reserved: Option<String>,
    },
    /// Render a fixed-point integer for display
    Format {
        raw: String,
        /// Drop the fractional part
        #[arg(long)]
        whole: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = AllotConfig::load()?.apply_profile()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Counters => {
            let state = AppState::from_config(config)?;
            let counters = state.counters.fetch_counters().await?;
            println!("{}", serde_json::to_string_pretty(&state.contract_data(counters))?);
            Ok(())
        }
        Command::Calculate { amount, allocation, balance, reserved } => {
            let state = AppState::from_config(config)?;
            let counters = match (allocation, balance, reserved) {
                (Some(allocation), Some(balance), Some(reserved)) => {
                    ContractCounters::new(allocation, balance, reserved)
                }
                _ => state.counters.fetch_counters().await?,
            };
            let response = state.calculate(&amount, counters);
            println!("result:  {}", response.result);
            println!("display: {}", response.display);
            println!("tokens:  ≈ {} {}", response.token_display, response.token_symbol);
            Ok(())
        }
        Command::Format { raw, whole } => {
            let state = AppState::from_config(config.with_whole_units(whole))?;
            println!("{}", state.render(&raw));
            Ok(())
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("allot=info,allot_api=info,allot_calculator=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn serve(config: AllotConfig) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let state = Arc::new(AppState::from_config(config)?);

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, version = env!("CARGO_PKG_VERSION"), "Allocation server started");
    axum::serve(listener, app).await?;

    Ok(())
}
