//! Command line interface for the Balanced AMM engine.
use anyhow::{Result, bail};
use balanced_amm_routing::prelude::{
    BestTradeOptions, CurrencyAmount, Percent, best_trade_exact_in, best_trade_exact_out,
};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod report;
mod snapshot;

use snapshot::Market;

#[derive(Parser)]
#[command(name = "balanced-amm")]
#[command(about = "Quote swaps over a snapshot of Balanced AMM pairs", long_about = None)]
struct Cli {
    /// Pair snapshot file (JSON)
    #[arg(long, global = true, env = "BALANCED_PAIRS_FILE", default_value = "pairs.json")]
    pairs: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List pairs with reserves and mid prices
    Pairs,
    /// Find the best trades between two currencies
    Quote {
        /// Currency sold (address or symbol)
        #[arg(long)]
        from: String,

        /// Currency bought (address or symbol)
        #[arg(long)]
        to: String,

        /// Amount, in whole units of the input (or output with --exact-out)
        #[arg(long)]
        amount: Decimal,

        /// Treat the amount as the exact output wanted
        #[arg(long, default_value_t = false)]
        exact_out: bool,

        /// Maximum pairs per route
        #[arg(long, default_value_t = 3)]
        max_hops: usize,

        /// Number of trades to show
        #[arg(long, default_value_t = 3)]
        max_results: usize,

        /// Slippage tolerance in basis points
        #[arg(long, default_value_t = 50)]
        slippage_bps: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let market = Market::load(&cli.pairs)?;

    match &cli.command {
        Commands::Pairs => {
            report::pairs_table(&market.pairs).printstd();
        }
        Commands::Quote {
            from,
            to,
            amount,
            exact_out,
            max_hops,
            max_results,
            slippage_bps,
        } => {
            let currency_in = market.resolve(from)?;
            let currency_out = market.resolve(to)?;
            if currency_in.wrapped() == currency_out.wrapped() {
                bail!("cannot trade {currency_in} for itself");
            }
            let options = BestTradeOptions::default()
                .with_max_hops(*max_hops)
                .with_max_num_results(*max_results);

            info!(
                from = %currency_in,
                to = %currency_out,
                amount = %amount,
                exact_out,
                "Searching best trades"
            );
            let trades = if *exact_out {
                let amount_out = CurrencyAmount::from_decimal(currency_out, *amount)?;
                best_trade_exact_out(&market.pairs, &currency_in, &amount_out, options)?
            } else {
                let amount_in = CurrencyAmount::from_decimal(currency_in, *amount)?;
                best_trade_exact_in(&market.pairs, &amount_in, &currency_out, options)?
            };

            if trades.is_empty() {
                warn!("No route found");
                println!("No route found between {from} and {to}.");
                return Ok(());
            }
            let slippage = Percent::from_bps(*slippage_bps);
            report::trades_table(&trades, &slippage)?.printstd();
        }
    }

    Ok(())
}
