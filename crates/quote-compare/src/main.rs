//! Command-line front end: quote one pair against both quoters and print the
//! resulting notification.
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use quote_compare::rpc::JsonRpcCaller;
use quote_compare::{token, Direction, QuoteEngine, QuoteRequest, QuoterConfig, TokenList};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the JSON config (rpcUrl, quoterAddress, lensAddress, ...).
    #[clap(long)]
    config: PathBuf,

    /// Path to a token list JSON document.
    #[clap(long)]
    tokens: PathBuf,

    /// Source token symbol.
    #[clap(long)]
    from: String,

    /// Destination token symbol.
    #[clap(long)]
    to: String,

    /// Amount in source tokens (sell) or destination tokens (buy).
    #[clap(long)]
    amount: String,

    /// Quote an exact-output buy instead of an exact-input sell.
    #[clap(long)]
    buy: bool,

    /// Override the RPC endpoint from the config.
    #[clap(long)]
    rpc_url: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();

    let mut config = match QuoterConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("failed to load config {}: {e}", args.config.display());
            return ExitCode::FAILURE;
        }
    };
    if let Some(url) = args.rpc_url {
        config.rpc_url = url;
    }

    let list = match TokenList::from_file(&args.tokens) {
        Ok(list) => list,
        Err(e) => {
            error!("failed to load token list {}: {e}", args.tokens.display());
            return ExitCode::FAILURE;
        }
    };

    let source = token::find_by_symbol(&list, config.chain_id, &args.from);
    let dest = token::find_by_symbol(&list, config.chain_id, &args.to);

    let request = QuoteRequest {
        direction: Direction::from_buy_flag(args.buy),
        source,
        dest,
        amount: args.amount,
    };

    let engine = QuoteEngine::from_config(JsonRpcCaller::new(config.rpc_url.clone()), &config);
    let outcome = engine.get_quote(&request).await;

    if let Some(notification) = engine.notifier().current() {
        println!("[{:?}] {}", notification.kind, notification.text);
    }

    match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("quote failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
