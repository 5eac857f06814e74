use std::sync::LazyLock;

use encoding_rs::{Encoding, SHIFT_JIS, UTF_8};
use rand::seq::IndexedRandom;
use regex::Regex;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, UPGRADE_INSECURE_REQUESTS};
use reqwest::{Url, redirect};
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::ScrapeError;

const FALLBACK_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// How far into the body a `<meta charset>` declaration is looked for.
const META_SNIFF_BYTES: usize = 1024;

static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([A-Za-z0-9_\-]+)"#)
        .expect("meta charset pattern is valid")
});

/// Fetches a product page and decodes it to text.
///
/// One attempt only. Non-2xx responses are returned as
/// [`ScrapeError::UnexpectedStatus`].
pub fn fetch_html(url: &str, config: &ScraperConfig) -> Result<String, ScrapeError> {
    let target = validate_url(url)?;
    let client = build_client(config)?;

    info!(url, "fetching product page");
    let response = client
        .get(target)
        .header(ACCEPT, &config.accept)
        .header(ACCEPT_LANGUAGE, &config.accept_language)
        .header(UPGRADE_INSECURE_REQUESTS, "1")
        .send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let charset = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(charset_from_content_type);
    let body = response.bytes()?;
    debug!(bytes = body.len(), charset = ?charset, "received product page");

    Ok(decode_body(&body, charset.as_deref()))
}

/// Parses `url` and rejects anything that is not absolute http(s).
pub fn validate_url(url: &str) -> Result<Url, ScrapeError> {
    let parsed = Url::parse(url).map_err(|e| ScrapeError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ScrapeError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme \"{other}\""),
        }),
    }
}

fn build_client(config: &ScraperConfig) -> Result<reqwest::blocking::Client, ScrapeError> {
    let max_redirects = config.max_redirects;
    let redirect_policy = redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() >= max_redirects {
            attempt.error(format!("too many redirects (>{max_redirects})"))
        } else {
            attempt.follow()
        }
    });

    let user_agent = config
        .user_agents
        .choose(&mut rand::rng())
        .map_or(FALLBACK_USER_AGENT, String::as_str);

    let client = reqwest::blocking::Client::builder()
        .redirect(redirect_policy)
        .timeout(config.timeout)
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Pulls the `charset` parameter out of a `Content-Type` value.
fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Decodes a response body.
///
/// A header charset is trusted unless it is absent or `ISO-8859-1`, which
/// servers send when they do not actually know. Otherwise the body is sniffed.
fn decode_body(body: &[u8], header_charset: Option<&str>) -> String {
    let declared = header_charset
        .filter(|label| !label.eq_ignore_ascii_case("iso-8859-1"))
        .and_then(|label| Encoding::for_label(label.as_bytes()));
    let encoding = declared.unwrap_or_else(|| sniff_encoding(body));

    let (text, used, had_errors) = encoding.decode(body);
    if had_errors {
        warn!(encoding = used.name(), "body contained malformed sequences");
    }
    text.into_owned()
}

fn sniff_encoding(body: &[u8]) -> &'static Encoding {
    if std::str::from_utf8(body).is_ok() {
        return UTF_8;
    }
    let head = String::from_utf8_lossy(&body[..body.len().min(META_SNIFF_BYTES)]);
    if let Some(encoding) = META_CHARSET_RE
        .captures(&head)
        .and_then(|caps| Encoding::for_label(caps[1].as_bytes()))
    {
        return encoding;
    }
    warn!("no usable charset declared, falling back to Shift_JIS");
    SHIFT_JIS
}

#[cfg(test)]
mod tests {
    use encoding_rs::EUC_JP;

    use super::*;

    #[test]
    fn charset_parameter_is_extracted() {
        assert_eq!(
            charset_from_content_type("text/html; charset=Shift_JIS").as_deref(),
            Some("Shift_JIS")
        );
        assert_eq!(
            charset_from_content_type("text/html;charset=\"utf-8\"").as_deref(),
            Some("utf-8")
        );
        assert_eq!(charset_from_content_type("text/html"), None);
    }

    #[test]
    fn header_charset_is_used_when_present() {
        let (body, _, _) = EUC_JP.encode("<p>楽天市場</p>");
        assert_eq!(decode_body(&body, Some("euc-jp")), "<p>楽天市場</p>");
    }

    #[test]
    fn latin1_header_is_treated_as_unknown() {
        let body = "<p>楽天市場</p>".as_bytes();
        assert_eq!(decode_body(body, Some("ISO-8859-1")), "<p>楽天市場</p>");
    }

    #[test]
    fn meta_charset_is_honored_for_non_utf8_bodies() {
        let (body, _, _) = EUC_JP.encode("<meta charset=\"EUC-JP\"><p>楽天市場</p>");
        assert_eq!(
            decode_body(&body, None),
            "<meta charset=\"EUC-JP\"><p>楽天市場</p>"
        );
    }

    #[test]
    fn undeclared_non_utf8_body_falls_back_to_shift_jis() {
        let (body, _, _) = SHIFT_JIS.encode("<title>【楽天市場】商品</title>");
        assert_eq!(decode_body(&body, None), "<title>【楽天市場】商品</title>");
    }

    #[test]
    fn validate_url_rejects_non_http_schemes() {
        let err = validate_url("ftp://item.rakuten.co.jp/shop/item/").unwrap_err();
        assert!(
            matches!(err, ScrapeError::InvalidUrl { .. }),
            "expected InvalidUrl, got: {err:?}"
        );
        assert!(validate_url("not a url").is_err());
        assert!(validate_url("https://item.rakuten.co.jp/shop/item/").is_ok());
    }
}
