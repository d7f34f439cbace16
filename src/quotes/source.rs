// Remote quote list.
// Fetches the type.fit collection and normalizes each entry.

use std::future::Future;

use reqwest::{Client, header::CACHE_CONTROL};
use serde::Deserialize;

use crate::error::{Result, ShowcaseError};
use crate::github::REQUEST_TIMEOUT;

use super::Quote;

pub const QUOTES_URL: &str = "https://type.fit/api/quotes";

/// Anything that can produce the remote quote list.
pub trait QuoteSource {
    fn fetch_quotes(&mut self) -> impl Future<Output = Result<Vec<Quote>>> + Send;
}

/// Wire form; either field may be missing or null.
#[derive(Debug, Deserialize)]
struct RawQuote {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    author: Option<String>,
}

/// Parse a quote list body, trimming both fields.
pub fn parse_quotes(body: &[u8]) -> Result<Vec<Quote>> {
    let raw: Option<Vec<RawQuote>> = serde_json::from_slice(body)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|q| Quote {
            text: q.text.unwrap_or_default().trim().to_string(),
            author: q.author.unwrap_or_default().trim().to_string(),
        })
        .collect())
}

/// HTTP client for the quote endpoint.
pub struct QuoteClient {
    client: Client,
    url: String,
}

impl QuoteClient {
    pub fn new(url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ShowcaseError::Network)?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

impl QuoteSource for QuoteClient {
    async fn fetch_quotes(&mut self) -> Result<Vec<Quote>> {
        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShowcaseError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        parse_quotes(&body)
    }
}
