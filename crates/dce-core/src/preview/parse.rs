//! Turn response bodies into a [`Preview`].

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use super::{BodyKind, Column, Preview};

pub fn parse_body(kind: BodyKind, body: &[u8], limit: usize) -> Result<Preview> {
    match kind {
        BodyKind::Csv => Ok(parse_csv(&String::from_utf8_lossy(body), limit)),
        BodyKind::Json => parse_json(body, limit),
        BodyKind::Binary => Ok(Preview {
            body_bytes: body.len(),
            ..Preview::default()
        }),
    }
}

/// Header line plus the first `limit` records.
///
/// Fields are split on commas without quote handling; good enough for a glance.
pub fn parse_csv(text: &str, limit: usize) -> Preview {
    let mut lines = text
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty());

    let columns = match lines.next() {
        Some(header) => header.split(',').map(|h| Column::named(h.trim())).collect(),
        None => {
            return Preview {
                body_bytes: text.len(),
                ..Preview::default()
            }
        }
    };

    let mut rows = Vec::new();
    let mut total_rows = 0;
    for line in lines {
        total_rows += 1;
        if rows.len() < limit {
            rows.push(line.split(',').map(|v| v.trim().to_string()).collect());
        }
    }

    Preview {
        columns,
        rows,
        total_rows,
        body_bytes: text.len(),
    }
}

/// Accepts the Query API shape (`{rows, fields}`), a GeoJSON feature
/// collection, or a plain array of records.
pub fn parse_json(body: &[u8], limit: usize) -> Result<Preview> {
    let value: Value = serde_json::from_slice(body).context("response is not valid JSON")?;

    let (columns, records) = match &value {
        Value::Object(obj) if obj.get("rows").is_some_and(Value::is_array) => {
            let records = as_records(&obj["rows"]);
            let columns = match obj.get("fields").and_then(Value::as_array) {
                Some(fields) if !fields.is_empty() => fields.iter().map(field_column).collect(),
                _ => columns_from(&records),
            };
            (columns, records)
        }
        Value::Object(obj) if obj.get("features").is_some_and(Value::is_array) => {
            let records: Vec<&Map<String, Value>> = obj["features"]
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|f| f.get("properties").and_then(Value::as_object))
                .collect();
            (columns_from(&records), records)
        }
        Value::Array(_) => {
            let records = as_records(&value);
            (columns_from(&records), records)
        }
        _ => anyhow::bail!("unrecognized JSON response shape"),
    };

    let rows = records
        .iter()
        .take(limit)
        .map(|record| {
            columns
                .iter()
                .map(|c| record.get(&c.name).map(render).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(Preview {
        columns,
        rows,
        total_rows: records.len(),
        body_bytes: body.len(),
    })
}

fn as_records(value: &Value) -> Vec<&Map<String, Value>> {
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
        .collect()
}

/// Field metadata is either `{name, type}` or a bare name.
fn field_column(field: &Value) -> Column {
    match field {
        Value::Object(f) => Column {
            name: f.get("name").map(render).unwrap_or_default(),
            type_name: f.get("type").map(render),
        },
        other => Column::named(render(other)),
    }
}

/// Columns follow the first record's key order as sent by the server.
fn columns_from(records: &[&Map<String, Value>]) -> Vec<Column> {
    records
        .first()
        .map(|r| r.keys().map(Column::named).collect())
        .unwrap_or_default()
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
