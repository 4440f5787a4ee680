//! Command-line interface definitions for pubfeed.
//!
//! The binary runs one feed build and writes the RSS XML; a web layer
//! embedding the library would hold a long-lived `FeedCache` instead.

use clap::Parser;

/// Command-line arguments for the pubfeed binary.
///
/// # Examples
///
/// ```sh
/// # Print the feed to stdout
/// pubfeed
///
/// # Write to a file, bypassing the cache
/// pubfeed -o feed.xml --no-cache
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Write the RSS XML to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Feed cache TTL in seconds
    #[arg(long, env = "PUBFEED_TTL_SECS", default_value_t = 3600)]
    pub ttl_secs: u64,

    /// Bypass the feed cache and force a fresh crawl
    #[arg(long)]
    pub no_cache: bool,
}
