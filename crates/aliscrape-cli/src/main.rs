mod scrape;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::scrape::{ScrapeContext, ScrapeOptions};

#[derive(Debug, Parser)]
#[command(name = "aliscrape")]
#[command(about = "Scrape marketplace items into JSON, CSV and Shopify import files")]
struct Cli {
    /// Directory the export files are written to
    #[arg(long, global = true, default_value = "exports")]
    out_dir: PathBuf,

    /// Use the marketplace photo links as-is instead of uploading them
    #[arg(long, global = true)]
    skip_upload: bool,

    /// Also upload review photos into each item's review folder
    #[arg(long, global = true)]
    reviews_photos: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape one item by link or id
    Single {
        /// Item page link, e.g. `https://www.aliexpress.com/item/1005006123456.html`
        link: String,
    },
    /// Search and scrape the best-selling results
    Query {
        /// Search text or a marketplace search URL
        query: String,

        /// Number of results to scrape
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..=60))]
        limit: u16,
    },
    /// Scrape a comma-separated list of item links
    Multiple {
        /// Links separated by commas
        links: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = aliscrape_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let options = ScrapeOptions {
        out_dir: cli.out_dir,
        upload: !cli.skip_upload,
        review_photos: cli.reviews_photos,
    };
    let ctx = ScrapeContext::from_config(&config, options)?;

    let paths = match cli.command {
        Commands::Single { link } => scrape::run_single(&ctx, &link).await?,
        Commands::Query { query, limit } => {
            scrape::run_query(&ctx, &query, usize::from(limit)).await?
        }
        Commands::Multiple { links } => scrape::run_multiple(&ctx, &links).await?,
    };

    println!("{}", paths.json.display());
    println!("{}", paths.records_csv.display());
    println!("{}", paths.shopify_csv.display());
    Ok(())
}

#[cfg(test)]
mod tests;
