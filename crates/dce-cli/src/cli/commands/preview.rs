//! `dce preview [url] [--limit N]` – fetch a live data sample.

use anyhow::Result;
use dce_core::config::DceConfig;
use dce_core::preview::{self, Preview};
use std::time::Duration;

/// Widest a column is allowed to render.
const MAX_CELL: usize = 24;

pub fn run_preview(cfg: &DceConfig, url: Option<&str>, limit: Option<usize>) -> Result<()> {
    let url = match url {
        Some(u) => u.to_string(),
        None => cfg.endpoints().export_url(&cfg.export.clone().unwrap_or_default()),
    };
    let limit = limit.unwrap_or(cfg.preview_rows);
    tracing::info!(%url, limit, "fetching preview");

    let sample = preview::fetch(&url, limit, Duration::from_secs(cfg.timeout_secs))?;
    print!("{}", render(&sample));
    Ok(())
}

fn render(p: &Preview) -> String {
    if p.columns.is_empty() {
        return format!("received {} bytes; no tabular preview\n", p.body_bytes);
    }

    let widths: Vec<usize> = p
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            p.rows
                .iter()
                .filter_map(|r| r.get(i))
                .map(|v| v.chars().count())
                .chain(std::iter::once(c.name.chars().count()))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<&str> = p.columns.iter().map(|c| c.name.as_str()).collect();
    push_row(&mut out, &header, &widths);
    if p.columns.iter().any(|c| c.type_name.is_some()) {
        let types: Vec<&str> = p
            .columns
            .iter()
            .map(|c| c.type_name.as_deref().unwrap_or(""))
            .collect();
        push_row(&mut out, &types, &widths);
    }
    for row in &p.rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        push_row(&mut out, &cells, &widths);
    }
    out.push_str(&format!("({} of {} rows)\n", p.rows.len(), p.total_rows));
    out
}

fn push_row(out: &mut String, cells: &[&str], widths: &[usize]) {
    let line: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let cell = truncate(cells.get(i).copied().unwrap_or(""), *w);
            format!("{:<width$}", cell, width = *w)
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
    t.push('~');
    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use dce_core::preview::Column;

    #[test]
    fn render_aligns_columns() {
        let p = Preview {
            columns: vec![Column::named("muni"), Column::named("tot_units")],
            rows: vec![
                vec!["Acton".to_string(), "151".to_string()],
                vec!["Abington".to_string(), "2".to_string()],
            ],
            total_rows: 351,
            body_bytes: 0,
        };
        assert_eq!(
            render(&p),
            "muni      tot_units\nActon     151\nAbington  2\n(2 of 351 rows)\n"
        );
    }

    #[test]
    fn render_includes_types_when_known() {
        let p = Preview {
            columns: vec![Column {
                name: "muni".to_string(),
                type_name: Some("text".to_string()),
            }],
            rows: vec![vec!["Boston".to_string()]],
            total_rows: 1,
            body_bytes: 0,
        };
        assert_eq!(render(&p), "muni\ntext\nBoston\n(1 of 1 rows)\n");
    }

    #[test]
    fn render_binary_body() {
        let p = Preview {
            body_bytes: 2048,
            ..Preview::default()
        };
        assert_eq!(render(&p), "received 2048 bytes; no tabular preview\n");
    }

    #[test]
    fn truncate_long_cells() {
        assert_eq!(truncate("abcdef", 4), "abc~");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
