//! Live data sample for a generated URL.
//!
//! Uses the curl crate (libcurl) for a single blocking GET and renders the
//! first few records of the body. No retry or backoff: a failed fetch is
//! reported as is.

mod parse;

pub use parse::{parse_body, parse_csv, parse_json};

use anyhow::{Context, Result};
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// How a response body is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Csv,
    Json,
    /// Zipped shapefile; only the size is reported.
    Binary,
}

impl BodyKind {
    /// Picks the body kind from the URL's `format` parameter.
    ///
    /// Query API URLs carry no `format` and always answer with JSON.
    pub fn for_url(url: &str) -> BodyKind {
        let format = url::Url::parse(url).ok().and_then(|u| {
            u.query_pairs()
                .find(|(k, _)| k == "format")
                .map(|(_, v)| v.into_owned())
        });
        match format.as_deref() {
            Some("csv") => BodyKind::Csv,
            Some("shapefile") => BodyKind::Binary,
            _ => BodyKind::Json,
        }
    }
}

/// A column of the sample, with its database type when the API reports one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub type_name: Option<String>,
}

impl Column {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: None,
        }
    }
}

/// First records of a response body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    /// Records in the body, including those not kept in `rows`.
    pub total_rows: usize,
    pub body_bytes: usize,
}

/// Fetches `url` and keeps at most `limit` records.
pub fn fetch(url: &str, limit: usize, timeout: Duration) -> Result<Preview> {
    let body = get(url, timeout)?;
    let kind = BodyKind::for_url(url);
    tracing::debug!(?kind, bytes = body.len(), "preview body received");
    parse_body(kind, &body, limit)
}

/// Performs a GET request and returns the body.
///
/// Follows redirects. Runs in the current thread.
pub fn get(url: &str, timeout: Duration) -> Result<Vec<u8>> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.connect_timeout(CONNECT_TIMEOUT)?;
    easy.timeout(timeout)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform().context("GET request failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }

    Ok(body)
}
