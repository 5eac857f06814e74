pub mod archiver;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod parser;

pub use config::ScraperConfig;
pub use error::ScrapeError;
pub use fetcher::fetch_html;
pub use models::{KeywordSummary, PriceInfo, ProductRecord, Review, ReviewInfo, ShopInfo};
pub use parser::{extract, parse_product};
