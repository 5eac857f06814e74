use std::time::Duration;

/// Desktop browser strings the fetcher picks from for each client.
const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.0.0",
];

/// Settings for fetching a product page.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Pool of `User-Agent` values; one is chosen at random per client.
    pub user_agents: Vec<String>,
    pub accept: String,
    pub accept_language: String,
    /// Redirect hops followed before the request fails.
    pub max_redirects: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agents: DEFAULT_USER_AGENTS.iter().map(|ua| (*ua).to_string()).collect(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "ja,en-US;q=0.7,en;q=0.3".to_string(),
            max_redirects: 10,
        }
    }
}
