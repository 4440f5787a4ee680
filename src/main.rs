//! Binary entry point: crawl the publications site once and emit RSS.
//!
//! The library does the work; this driver wires a [`pubfeed::HttpFetcher`]
//! through [`pubfeed::Crawler`] and [`pubfeed::FeedCache`], serializes the
//! resulting document, and writes it to stdout or a file.

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

use pubfeed::{feed, Crawler, FeedCache, FeedIdentity, HttpFetcher};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("pubfeed starting up");

    let args = Cli::parse();
    debug!(?args.output, args.ttl_secs, args.no_cache, "Parsed CLI arguments");

    let fetcher = HttpFetcher::new()?;
    let cache = FeedCache::with_ttl(
        Crawler::new(fetcher),
        FeedIdentity::default(),
        Duration::from_secs(args.ttl_secs),
    );

    let document = cache.get(!args.no_cache).await?;
    let xml = feed::to_rss_xml(&document)?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, &xml).await?;
            info!(path = %path, bytes = xml.len(), "Wrote feed");
        }
        None => {
            println!("{xml}");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        items = document.items.len(),
        "Execution complete"
    );

    Ok(())
}
