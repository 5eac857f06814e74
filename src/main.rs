use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use tracing::{error, info};

use rakuten_product_scraper::archiver::{error_json, write_json};
use rakuten_product_scraper::{ProductRecord, ScraperConfig, fetch_html, parse_product};

const MISSING_URL: &str = "商品URLが必要です";

#[derive(Parser)]
#[command(
    name = "rakuten_product_scraper",
    version,
    about = "Scrape a Rakuten product page into JSON"
)]
struct Cli {
    /// Product page URL
    url: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            error!(kind = ?e.kind(), "invalid invocation");
            return fail(MISSING_URL);
        }
    };

    let record = match scrape(&cli.url) {
        Ok(record) => record,
        Err(e) => {
            let message = format!("{e:#}");
            error!(error = %message, "scrape failed");
            return fail(&message);
        }
    };

    match write_json(&mut io::stdout().lock(), &record) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "failed to write output");
            ExitCode::FAILURE
        }
    }
}

fn scrape(url: &str) -> Result<ProductRecord> {
    info!(url, "scrape started");
    let config = ScraperConfig::default();
    let html = fetch_html(url, &config).with_context(|| format!("failed to fetch {url}"))?;
    let record = parse_product(url, &html).context("failed to extract product data")?;
    info!(title = %record.title, "scrape finished");
    Ok(record)
}

fn fail(message: &str) -> ExitCode {
    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout
        .write_all(error_json(message).as_bytes())
        .and_then(|()| stdout.flush())
    {
        error!(error = %e, "failed to write error output");
    }
    ExitCode::FAILURE
}
