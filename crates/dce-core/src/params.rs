//! Parameter sets for the two DataCommon endpoints.
//!
//! Each endpoint has a fixed shape with named fields. Field order in
//! [`ParamSet::pairs`] is the order used when building a query string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Public access token; read-only in the form, still sent with every request.
pub const TOKEN: &str = "datacommon";

/// Databases offered by the explorer.
pub const DATABASES: [&str; 3] = ["ds", "gisdata", "towndata"];

/// Schemas offered by the explorer.
pub const SCHEMAS: [&str; 2] = ["tabular", "mapc"];

/// Export formats offered by the explorer.
pub const FORMATS: [&str; 4] = ["csv", "json", "geojson", "shapefile"];

/// Database whose tables carry geometry (the only one offering spatial formats).
pub const SPATIAL_DATABASE: &str = "towndata";

/// Which endpoint a parameter set targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Export,
    Query,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Export => "export",
            Mode::Query => "query",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown mode {0:?} (expected \"export\" or \"query\")")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "export" => Ok(Mode::Export),
            "query" => Ok(Mode::Query),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// True unless `format` is a spatial format, which takes no `years` filter.
pub fn include_years(format: &str) -> bool {
    !is_spatial_format(format)
}

pub fn is_spatial_format(format: &str) -> bool {
    format == "geojson" || format == "shapefile"
}

/// Whether the explorer offers `format` for `database`.
///
/// Advisory only: the codec encodes any combination as given.
pub fn format_available(database: &str, format: &str) -> bool {
    !is_spatial_format(format) || database == SPATIAL_DATABASE
}

/// Common access to the named string fields of a parameter set.
pub trait ParamSet {
    /// Field names in encoding order.
    const FIELDS: &'static [&'static str];

    fn field(&self, name: &str) -> Option<&str>;

    fn field_mut(&mut self, name: &str) -> Option<&mut String>;

    /// (name, value) pairs in encoding order.
    fn pairs(&self) -> Vec<(&'static str, &str)> {
        Self::FIELDS
            .iter()
            .filter_map(|name| self.field(name).map(|v| (*name, v)))
            .collect()
    }

    /// Overwrites fields present in `decoded`; everything else keeps its value.
    /// Returns the number of fields that were updated.
    fn merge<K, V>(&mut self, decoded: &[(K, V)]) -> usize
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut updated = 0;
        for (name, value) in decoded {
            match self.field_mut(name.as_ref()) {
                Some(slot) => {
                    *slot = value.as_ref().to_string();
                    updated += 1;
                }
                None => tracing::debug!(param = name.as_ref(), "ignoring unknown parameter"),
            }
        }
        updated
    }
}

/// Export API parameters: `{token, database, schema, table, format, years}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportParams {
    #[serde(skip)]
    pub token: String,
    pub database: String,
    pub schema: String,
    pub table: String,
    pub format: String,
    /// Single year (`2024`), period (`2019-23`) or a comma-separated list of either.
    pub years: String,
}

impl Default for ExportParams {
    fn default() -> Self {
        Self {
            token: TOKEN.to_string(),
            database: "ds".to_string(),
            schema: "tabular".to_string(),
            table: "b25117_hu_tenure_by_fuel_acs_ct".to_string(),
            format: "csv".to_string(),
            years: "2019-23,2018-22,2017-21".to_string(),
        }
    }
}

impl ExportParams {
    pub fn include_years(&self) -> bool {
        include_years(&self.format)
    }
}

impl ParamSet for ExportParams {
    const FIELDS: &'static [&'static str] =
        &["token", "database", "schema", "table", "format", "years"];

    fn field(&self, name: &str) -> Option<&str> {
        let v = match name {
            "token" => &self.token,
            "database" => &self.database,
            "schema" => &self.schema,
            "table" => &self.table,
            "format" => &self.format,
            "years" => &self.years,
            _ => return None,
        };
        Some(v.as_str())
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "token" => Some(&mut self.token),
            "database" => Some(&mut self.database),
            "schema" => Some(&mut self.schema),
            "table" => Some(&mut self.table),
            "format" => Some(&mut self.format),
            "years" => Some(&mut self.years),
            _ => None,
        }
    }
}

/// Query API parameters: `{token, database, query}` where `query` is raw SQL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    #[serde(skip)]
    pub token: String,
    pub database: String,
    pub query: String,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            token: TOKEN.to_string(),
            database: "ds".to_string(),
            query: "SELECT years,pop,pop_u18,pop18_24,pop25_34,pop35_39,pop40_44,pop45_49,\
                    pop50_54,pop55_59,pop60_64,pop65_69,pop70_74,pop75_79,pop80_84,pop85o,\
                    race_eth FROM tabular.demo_race_by_age_gender_m \
                    WHERE municipal ilike 'tyngsborough' AND years = '2020'"
                .to_string(),
        }
    }
}

impl ParamSet for QueryParams {
    const FIELDS: &'static [&'static str] = &["token", "database", "query"];

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "token" => Some(self.token.as_str()),
            "database" => Some(self.database.as_str()),
            "query" => Some(self.query.as_str()),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "token" => Some(&mut self.token),
            "database" => Some(&mut self.database),
            "query" => Some(&mut self.query),
            _ => None,
        }
    }
}
