//! URL codec: builds endpoint URLs from parameter sets and parses them back.
//!
//! Query strings use `application/x-www-form-urlencoded` encoding (space as
//! `+`), the same convention browsers apply to form submissions.

use url::form_urlencoded;
use url::Url;

use crate::params::{ExportParams, Mode, ParamSet, QueryParams};

pub const DEFAULT_EXPORT_BASE: &str = "https://datacommon.mapc.org/api/export";
pub const DEFAULT_QUERY_BASE: &str = "https://datacommon.mapc.org/api";

/// Path fragment that identifies an export URL.
const EXPORT_SEGMENT: &str = "/export";

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("invalid URL format: {input}")]
    MalformedUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

/// Base URLs of the two endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub export_base: String,
    pub query_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            export_base: DEFAULT_EXPORT_BASE.to_string(),
            query_base: DEFAULT_QUERY_BASE.to_string(),
        }
    }
}

impl Endpoints {
    /// `<export-base>?token=..&database=..&schema=..&table=..&format=..[&years=..]`.
    ///
    /// `years` goes last and is left out for spatial formats.
    pub fn export_url(&self, params: &ExportParams) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (name, value) in params.pairs() {
            if name != "years" {
                query.append_pair(name, value);
            }
        }
        if params.include_years() {
            query.append_pair("years", &params.years);
        }
        format!(
            "{}?{}",
            self.export_base.trim_end_matches('/'),
            query.finish()
        )
    }

    /// `<query-base>/?token=..&database=..&query=..`.
    pub fn query_url(&self, params: &QueryParams) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.pairs())
            .finish();
        format!("{}/?{}", self.query_base.trim_end_matches('/'), query)
    }

    pub fn encode(&self, mode: Mode, export: &ExportParams, query: &QueryParams) -> String {
        match mode {
            Mode::Export => self.export_url(export),
            Mode::Query => self.query_url(query),
        }
    }
}

/// Result of parsing a URL: the detected mode and its parameters in URL order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub mode: Mode,
    pub params: Vec<(String, String)>,
}

impl Decoded {
    /// Value of the last occurrence of `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Parses an absolute URL into its mode and parameters.
///
/// Mode is [`Mode::Export`] when the path contains `/export`, otherwise
/// [`Mode::Query`]. Nothing is merged here; callers apply [`ParamSet::merge`].
pub fn decode(input: &str) -> Result<Decoded, CodecError> {
    let url = Url::parse(input.trim()).map_err(|source| CodecError::MalformedUrl {
        input: input.to_string(),
        source,
    })?;

    let mode = if url.path().contains(EXPORT_SEGMENT) {
        Mode::Export
    } else {
        Mode::Query
    };

    // form_urlencoded decodes each value exactly once, `query` included, so
    // SQL holding a literal `%xx` survives a round trip.
    let params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    tracing::debug!(%mode, count = params.len(), "decoded url");
    Ok(Decoded { mode, params })
}
