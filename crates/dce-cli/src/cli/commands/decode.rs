//! `dce decode <url>` – show the form fields a URL carries.

use anyhow::Result;
use dce_core::config::DceConfig;
use dce_core::params::{include_years, Mode};
use dce_core::session::Session;
use std::io::{self, Write};

pub fn run_decode(cfg: &DceConfig, url: &str) -> Result<()> {
    let mut session = cfg.session();
    let mut stdout = io::stdout();
    decode_into(&mut session, url, &mut stdout)
}

/// Loads `url` into `session` and prints the active fields. Fields absent
/// from the URL show their configured defaults.
fn decode_into<W: Write>(session: &mut Session, url: &str, out: &mut W) -> Result<()> {
    let mode = session.load_url(url)?;
    writeln!(out, "mode = {mode}")?;
    for (name, value) in session.active_fields() {
        writeln!(out, "{name} = {value}")?;
    }
    let format = &session.export().format;
    if mode == Mode::Export && !include_years(format) {
        writeln!(out, "# years is not sent for format {format}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(url: &str) -> Result<String> {
        let mut session = Session::default();
        let mut out = Vec::new();
        decode_into(&mut session, url, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn prints_mode_and_fields_in_order() {
        let out = decode(
            "https://datacommon.mapc.org/api/export?token=datacommon&database=ds&schema=tabular&table=hous_building_permits_m&format=csv&years=2024",
        )
        .unwrap();
        assert_eq!(
            out,
            "mode = export\n\
             token = datacommon\n\
             database = ds\n\
             schema = tabular\n\
             table = hous_building_permits_m\n\
             format = csv\n\
             years = 2024\n"
        );
    }

    #[test]
    fn spatial_format_notes_missing_years() {
        let out = decode(
            "https://datacommon.mapc.org/api/export?database=towndata&schema=tabular&table=ma_municipalities&format=geojson",
        )
        .unwrap();
        assert!(out.contains("format = geojson\n"));
        assert!(out.ends_with("# years is not sent for format geojson\n"), "{out}");
    }

    #[test]
    fn query_url_has_no_years_note() {
        let out = decode("https://datacommon.mapc.org/api/?database=ds&query=SELECT+1").unwrap();
        assert!(out.starts_with("mode = query\n"));
        assert!(out.contains("query = SELECT 1\n"));
        assert!(!out.contains("# years"));
    }

    #[test]
    fn malformed_url_is_an_error() {
        assert!(decode("not a url").is_err());
    }
}
