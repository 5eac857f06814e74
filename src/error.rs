use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid product URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts how often `needle` appears in the alternate (`{:#}`) chain.
    fn chain_mentions(err: ScrapeError, needle: &str) -> usize {
        let chain = format!("{:#}", anyhow::Error::from(err).context("failed to fetch"));
        chain.matches(needle).count()
    }

    #[test]
    fn http_error_message_appears_once_in_chain() {
        let source = reqwest::blocking::Client::new()
            .get("not a url")
            .send()
            .unwrap_err();
        let inner = source.to_string();
        assert_eq!(chain_mentions(ScrapeError::from(source), &inner), 1);
    }

    #[test]
    fn json_error_message_appears_once_in_chain() {
        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let inner = source.to_string();
        assert_eq!(chain_mentions(ScrapeError::from(source), &inner), 1);
    }

    #[test]
    fn io_error_message_appears_once_in_chain() {
        let source = std::io::Error::other("disk full");
        assert_eq!(chain_mentions(ScrapeError::from(source), "disk full"), 1);
    }
}
