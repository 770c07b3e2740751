//! In-memory form session: the active mode, both parameter sets and the
//! last generated URL. Nothing here is persisted.

use crate::codec::{self, CodecError, Endpoints};
use crate::params::{self, ExportParams, Mode, ParamSet, QueryParams};

/// Message shown to the user when a pasted URL cannot be parsed.
pub const INVALID_URL_MESSAGE: &str = "Invalid URL format";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("unknown parameter {name:?} for {mode} mode")]
    UnknownParam { name: String, mode: Mode },
    #[error("parameter {0:?} is read-only")]
    ReadOnlyParam(String),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

#[derive(Debug, Clone)]
pub struct Session {
    endpoints: Endpoints,
    mode: Mode,
    export: ExportParams,
    query: QueryParams,
    generated_url: Option<String>,
    error: Option<String>,
}

impl Session {
    pub fn new(endpoints: Endpoints, export: ExportParams, query: QueryParams) -> Self {
        Self {
            endpoints,
            mode: Mode::default(),
            export,
            query,
            generated_url: None,
            error: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            tracing::debug!(from = %self.mode, to = %mode, "switching mode");
            self.mode = mode;
        }
    }

    pub fn export(&self) -> &ExportParams {
        &self.export
    }

    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Last URL produced by [`Session::generate_url`]; cleared by any edit.
    pub fn generated_url(&self) -> Option<&str> {
        self.generated_url.as_deref()
    }

    /// User-visible message from the last failed [`Session::load_url`].
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Edits one field of the active parameter set.
    pub fn set_param(&mut self, name: &str, value: &str) -> Result<(), SessionError> {
        if name == "token" {
            return Err(SessionError::ReadOnlyParam(name.to_string()));
        }
        let mode = self.mode;
        let slot = match mode {
            Mode::Export => self.export.field_mut(name),
            Mode::Query => self.query.field_mut(name),
        };
        let slot = slot.ok_or_else(|| SessionError::UnknownParam {
            name: name.to_string(),
            mode,
        })?;
        *slot = value.to_string();
        self.generated_url = None;

        if mode == Mode::Export && (name == "database" || name == "format") {
            warn_unavailable_format(&self.export);
        }
        Ok(())
    }

    /// Encodes the active parameter set and remembers the result.
    pub fn generate_url(&mut self) -> &str {
        let url = self.endpoints.encode(self.mode, &self.export, &self.query);
        tracing::info!(mode = %self.mode, %url, "generated url");
        self.generated_url.insert(url).as_str()
    }

    /// Parses `url`, switches to its mode and merges its parameters into that
    /// mode's set. On failure only the error message changes.
    pub fn load_url(&mut self, url: &str) -> Result<Mode, SessionError> {
        let decoded = match codec::decode(url) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("rejected url: {}", e);
                self.error = Some(INVALID_URL_MESSAGE.to_string());
                return Err(e.into());
            }
        };

        let updated = match decoded.mode {
            Mode::Export => self.export.merge(&decoded.params),
            Mode::Query => self.query.merge(&decoded.params),
        };
        tracing::debug!(mode = %decoded.mode, updated, "merged url parameters");
        self.mode = decoded.mode;
        self.error = None;
        Ok(decoded.mode)
    }

    /// (name, value) pairs of the active parameter set.
    pub fn active_fields(&self) -> Vec<(&'static str, &str)> {
        match self.mode {
            Mode::Export => self.export.pairs(),
            Mode::Query => self.query.pairs(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(
            Endpoints::default(),
            ExportParams::default(),
            QueryParams::default(),
        )
    }
}

fn warn_unavailable_format(export: &ExportParams) {
    if !params::format_available(&export.database, &export.format) {
        tracing::warn!(
            database = %export.database,
            format = %export.format,
            "format is only offered for the {} database",
            params::SPATIAL_DATABASE
        );
    }
}
