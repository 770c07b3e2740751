//! Encode/decode behaviour across both endpoints, through the public API.

use dce_core::codec::{self, CodecError, Endpoints};
use dce_core::params::{ExportParams, Mode, ParamSet, QueryParams};

fn export(format: &str, years: &str) -> ExportParams {
    ExportParams {
        database: "towndata".to_string(),
        schema: "mapc".to_string(),
        table: "malden_neighborhoods_poly".to_string(),
        format: format.to_string(),
        years: years.to_string(),
        ..ExportParams::default()
    }
}

#[test]
fn export_round_trip_for_tabular_formats() {
    let ep = Endpoints::default();
    for format in ["csv", "json"] {
        let original = export(format, "2019-23,2018-22,2017-21");
        let decoded = codec::decode(&ep.export_url(&original)).unwrap();
        assert_eq!(decoded.mode, Mode::Export);

        let mut restored = ExportParams {
            years: "stale".to_string(),
            ..ExportParams::default()
        };
        restored.merge(&decoded.params);
        assert_eq!(restored, original);
    }
}

#[test]
fn export_round_trip_for_spatial_formats_keeps_prior_years() {
    let ep = Endpoints::default();
    for format in ["geojson", "shapefile"] {
        let original = export(format, "2024");
        let url = ep.export_url(&original);
        assert!(!url.contains("years"));

        let decoded = codec::decode(&url).unwrap();
        let mut restored = ExportParams {
            years: "2010".to_string(),
            ..ExportParams::default()
        };
        restored.merge(&decoded.params);
        assert_eq!(restored.years, "2010");
        assert_eq!(restored.format, format);
        assert_eq!(restored.table, original.table);
    }
}

#[test]
fn query_round_trip_with_awkward_sql() {
    let ep = Endpoints::default();
    let samples = [
        "SELECT muni, park_dem, util_rate FROM tabular.trans_perfect_fit_parking WHERE muni LIKE 'Boston'",
        "SELECT * FROM t WHERE a <> 'x&y=z' AND b LIKE '%50%25' OR c = \"q\"",
        "SELECT 1 + 2 AS three,\n\t'caf\u{e9}' AS name -- comment",
        "SELECT '%2A' AS literal_escape",
    ];
    for sql in samples {
        let original = QueryParams {
            database: "gisdata".to_string(),
            query: sql.to_string(),
            ..QueryParams::default()
        };
        let decoded = codec::decode(&ep.query_url(&original)).unwrap();
        assert_eq!(decoded.mode, Mode::Query);

        let mut restored = QueryParams::default();
        restored.merge(&decoded.params);
        assert_eq!(restored, original, "round trip of {sql:?}");
    }
}

#[test]
fn documented_query_example_decodes() {
    let url = "https://datacommon.mapc.org/api/?token=datacommon&database=ds&query=SELECT%20muni%2C%20park_dem%2C%20util_rate%20FROM%20tabular.trans_perfect_fit_parking%20WHERE%20muni%20LIKE%20%27Boston%27";
    let decoded = codec::decode(url).unwrap();
    assert_eq!(decoded.mode, Mode::Query);
    assert_eq!(
        decoded.get("query"),
        Some("SELECT muni, park_dem, util_rate FROM tabular.trans_perfect_fit_parking WHERE muni LIKE 'Boston'")
    );
}

#[test]
fn malformed_url_leaves_params_untouched() {
    let mut params = QueryParams::default();
    let before = params.clone();
    match codec::decode("not a url") {
        Err(CodecError::MalformedUrl { input, .. }) => assert_eq!(input, "not a url"),
        Ok(d) => {
            params.merge(&d.params);
            panic!("unexpected decode: {d:?}");
        }
    }
    assert_eq!(params, before);
}
