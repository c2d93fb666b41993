//! Command Line Interface for the tickscope liquidity explorer.
mod presenter;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use presenter::{OutputFormat, PresentOptions};
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tickscope_data::repositories::PoolRepository;
use tickscope_data::{
    DEFAULT_SUBGRAPH_URL, LiquidityPipeline, PagingConfig, PipelineOutcome, RetryPolicy,
    SubgraphClient, SubgraphConfig,
};
use tickscope_domain::math::price_tick::{price_to_tick_ceil, price_to_tick_floor};
use tickscope_domain::value_objects::{FeeTier, FeeTierSet, LiquidityRequest, TokenPair};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tickscope")]
#[command(about = "Liquidity per tick for token pair pools indexed by a subgraph", long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct ConnectionArgs {
    /// Records requested per page (1..=1000)
    #[arg(long, global = true, default_value_t = 1000)]
    page_size: u32,

    /// Upper bound on pages fetched per collection
    #[arg(long, global = true, default_value_t = PagingConfig::DEFAULT_MAX_PAGES)]
    max_pages: u32,

    /// Attempts per query before giving up
    #[arg(long, global = true, default_value_t = RetryPolicy::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Delay between failed attempts, in milliseconds
    #[arg(long, global = true, default_value_t = 2000)]
    retry_delay_ms: u64,

    /// HTTP request timeout, in seconds
    #[arg(long, global = true, default_value_t = 10)]
    timeout_secs: u64,

    /// Cache the pool catalog in this file
    #[arg(long, global = true)]
    cache_file: Option<PathBuf>,

    /// Seconds a cached pool catalog stays fresh
    #[arg(long, global = true, default_value_t = 3600)]
    cache_ttl_secs: u64,
}

#[derive(Args, Debug)]
struct PairArgs {
    /// First token symbol (e.g., WETH)
    #[arg(short = 'a', long, default_value = "WETH")]
    token_a: String,

    /// Second token symbol (e.g., USDT)
    #[arg(short = 'b', long, default_value = "USDT")]
    token_b: String,

    /// Fee tier in hundredths of a bip (100, 500, 3000, 10000); repeatable
    #[arg(short, long = "fee-tier", conflicts_with = "all_tiers")]
    fee_tiers: Vec<u32>,

    /// Include every supported fee tier
    #[arg(long)]
    all_tiers: bool,
}

impl PairArgs {
    fn request(&self) -> Result<LiquidityRequest> {
        let pair = TokenPair::new(&self.token_a, &self.token_b)?;
        let fee_tiers = if self.all_tiers {
            FeeTierSet::all()
        } else if self.fee_tiers.is_empty() {
            FeeTierSet::single(FeeTier::MEDIUM)
        } else {
            FeeTierSet::new(self.fee_tiers.iter().copied())?
        };
        Ok(LiquidityRequest { pair, fee_tiers })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate liquidity per tick across matching pools
    Ticks {
        #[command(flatten)]
        pair: PairArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Maximum number of table rows
        #[arg(long)]
        limit: Option<usize>,

        /// Hide ticks priced below this value
        #[arg(long)]
        min_price: Option<f64>,

        /// Hide ticks priced above this value
        #[arg(long)]
        max_price: Option<f64>,
    },
    /// List the pools matching a token pair and fee tiers
    Pools {
        #[command(flatten)]
        pair: PairArgs,
    },
}

/// Inclusive tick bounds of the ticks priced within `[min_price, max_price]`.
///
/// A window that falls between two ticks yields an empty range.
fn tick_window(min_price: Option<f64>, max_price: Option<f64>) -> Result<Option<(i32, i32)>> {
    if matches!((min_price, max_price), (Some(min), Some(max)) if min > max) {
        bail!("--min-price must not exceed --max-price");
    }
    if min_price.is_none() && max_price.is_none() {
        return Ok(None);
    }
    let lower = match min_price {
        Some(price) => price_to_tick_ceil(price).map_err(|e| anyhow!("--min-price: {e}"))?,
        None => i32::MIN,
    };
    let upper = match max_price {
        Some(price) => price_to_tick_floor(price).map_err(|e| anyhow!("--max-price: {e}"))?,
        None => i32::MAX,
    };
    Ok(Some((lower, upper)))
}

fn build_pipeline(args: &ConnectionArgs) -> Result<LiquidityPipeline> {
    let api_key = env::var("SUBGRAPH_API_KEY")
        .context("SUBGRAPH_API_KEY must be set in .env or environment")?;
    let endpoint = env::var("SUBGRAPH_URL").unwrap_or_else(|_| DEFAULT_SUBGRAPH_URL.to_string());

    let config = SubgraphConfig::new(endpoint.as_str(), api_key)?
        .with_timeout(Duration::from_secs(args.timeout_secs));
    let retry = RetryPolicy::fixed(args.max_attempts, Duration::from_millis(args.retry_delay_ms));
    let client = SubgraphClient::from_config(&config, retry)?;
    let paging = PagingConfig::new(args.page_size, args.max_pages);

    let mut pipeline = LiquidityPipeline::new(client, paging);
    if let Some(path) = &args.cache_file {
        let ttl = Duration::from_secs(args.cache_ttl_secs);
        pipeline = pipeline.with_pool_cache(PoolRepository::new(path, endpoint, ttl));
    }
    Ok(pipeline)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut out = io::stdout().lock();

    match &cli.command {
        Commands::Ticks {
            pair,
            format,
            limit,
            min_price,
            max_price,
        } => {
            let request = pair.request()?;
            let options = PresentOptions {
                limit: *limit,
                tick_window: tick_window(*min_price, *max_price)?,
            };
            let pipeline = build_pipeline(&cli.connection)?;
            info!(pair = %request.pair, tiers = ?request.fee_tiers, "fetching liquidity");

            match pipeline.run(&request).await? {
                PipelineOutcome::NoMatchingPools => writeln!(out, "No matching pools found.")?,
                PipelineOutcome::Aggregated(report) => {
                    presenter::write_report(&mut out, &report, *format, &options)?
                }
            }
        }
        Commands::Pools { pair } => {
            let request = pair.request()?;
            let pipeline = build_pipeline(&cli.connection)?;
            let pools = pipeline.locate_pools(&request).await?;
            presenter::write_pools(&mut out, &pools)?;
        }
    }

    out.flush()?;
    Ok(())
}
