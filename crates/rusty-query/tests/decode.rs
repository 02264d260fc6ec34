// Integration tests for decoding string tables into records

use pretty_assertions::assert_eq;
use rstest::rstest;
use rusty_query::{
    lookup_fn, parse_query, parse_query_into, Kind, ParseErrorReason, QueryError, QueryString,
    Record,
};
use std::collections::HashMap;

#[derive(Debug, Default, Clone, PartialEq, Record)]
struct Tile {
    #[query("w")]
    width: i32,
    #[query("h")]
    height: i32,
    #[query("max_zoom")]
    max_zoom: Option<f64>,
}

#[derive(Debug, Default, PartialEq, Record)]
struct Everything {
    #[query("b")]
    flag: bool,
    #[query("i")]
    int: isize,
    #[query("i8")]
    int8: i8,
    #[query("i16")]
    int16: i16,
    #[query("i32")]
    int32: i32,
    #[query("i64")]
    int64: i64,
    #[query("u")]
    uint: usize,
    #[query("u8")]
    uint8: u8,
    #[query("u16")]
    uint16: u16,
    #[query("u32")]
    uint32: u32,
    #[query("u64")]
    uint64: u64,
    #[query("f32")]
    float32: f32,
    #[query("f64")]
    float64: f64,
    #[query("s")]
    text: String,
}

#[derive(Debug, Default, PartialEq, Record)]
struct Provider {
    #[query("provider")]
    name: String,
    #[query("-")]
    secret: String,
    untagged: String,
}

#[derive(Debug, Default, PartialEq, Record)]
struct Viewport {
    tile: Tile,
    #[query("bearing")]
    bearing: f32,
}

#[derive(Debug, Default, PartialEq, Record)]
struct MapRequest {
    #[query("map")]
    map: String,
    viewport: Viewport,
    provider: Provider,
}

#[derive(Debug, Default, PartialEq, Record)]
struct Scene {
    request: MapRequest,
    #[query("debug")]
    debug: bool,
}

#[derive(Debug, Default, PartialEq, Record)]
struct WithRecordPointer {
    #[query("w")]
    width: i32,
    #[query("tile")]
    tile: Option<Tile>,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn store(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_decode_tile_example() {
    init_tracing();
    let lookup = store(&[("w", "10"), ("h", "10"), ("max_zoom", "2.4")]);
    let mut tile = Tile::default();
    parse_query(&lookup, &mut tile).unwrap();
    assert_eq!(
        tile,
        Tile {
            width: 10,
            height: 10,
            max_zoom: Some(2.4)
        }
    );
}

#[test]
fn test_decode_every_primitive_kind() {
    let lookup = store(&[
        ("b", "TRUE"),
        ("i", "-1"),
        ("i8", "-128"),
        ("i16", "0x7fff"),
        ("i32", "0o17"),
        ("i64", "0b101"),
        ("u", "42"),
        ("u8", "255"),
        ("u16", "1_0"),
        ("u32", "0x1_0"),
        ("u64", "18446744073709551615"),
        ("f32", "1.5"),
        ("f64", "-2.25e2"),
        ("s", "osm"),
    ]);
    let mut all = Everything::default();
    parse_query(&lookup, &mut all).unwrap();
    assert_eq!(
        all,
        Everything {
            flag: true,
            int: -1,
            int8: -128,
            int16: 0x7fff,
            int32: 0o17,
            int64: 0b101,
            uint: 42,
            uint8: 255,
            uint16: 10,
            uint32: 0x10,
            uint64: u64::MAX,
            float32: 1.5,
            float64: -225.0,
            text: "osm".into(),
        }
    );
}

#[rstest]
#[case("1_000", 1000)]
#[case("0x_3_e8", 1000)]
#[case("0_1750", 1000)]
fn test_digit_separators_decode(#[case] raw: &str, #[case] expected: i32) {
    let mut tile = Tile::default();
    parse_query(&store(&[("w", raw), ("max_zoom", "1_0.5")]), &mut tile).unwrap();
    assert_eq!(tile.width, expected);
    assert_eq!(tile.max_zoom, Some(10.5));
}

#[rstest]
#[case("_1")]
#[case("1_")]
#[case("1__0")]
#[case("0x1__0")]
fn test_misplaced_separators_are_rejected(#[case] raw: &str) {
    let err = parse_query(&store(&[("w", raw)]), &mut Tile::default()).unwrap_err();
    assert_eq!(err.key(), Some("w"));
    assert_eq!(err.parse_error().unwrap().reason, ParseErrorReason::InvalidSyntax);
}

#[test]
fn test_empty_lookup_preserves_defaults() {
    let mut tile = Tile {
        width: 256,
        height: 512,
        max_zoom: Some(18.0),
    };
    let before = tile.clone();
    parse_query(&lookup_fn(|_| None), &mut tile).unwrap();
    assert_eq!(tile, before);

    parse_query(&lookup_fn(|_| Some(String::new())), &mut tile).unwrap();
    assert_eq!(tile, before);
}

#[test]
fn test_untagged_and_excluded_fields_are_never_read() {
    let lookup = store(&[
        ("provider", "google"),
        ("secret", "nope"),
        ("untagged", "nope"),
        ("-", "nope"),
    ]);
    let mut provider = Provider::default();
    parse_query(&lookup, &mut provider).unwrap();
    assert_eq!(provider.name, "google");
    assert_eq!(provider.secret, "");
    assert_eq!(provider.untagged, "");
}

#[test]
fn test_fail_fast_keeps_earlier_fields() {
    init_tracing();
    let lookup = store(&[("w", "10"), ("h", "tall"), ("max_zoom", "2.4")]);
    let mut tile = Tile::default();
    let err = parse_query(&lookup, &mut tile).unwrap_err();

    assert_eq!(err.key(), Some("h"));
    let parse = err.parse_error().unwrap();
    assert_eq!(parse.target, Kind::I32);
    assert_eq!(parse.reason, ParseErrorReason::InvalidSyntax);

    assert_eq!(tile.width, 10);
    assert_eq!(tile.height, 0);
    assert_eq!(tile.max_zoom, None);
}

#[rstest]
#[case("w", "2147483648", ParseErrorReason::OutOfRange)]
#[case("w", "1.5", ParseErrorReason::InvalidSyntax)]
#[case("max_zoom", "zoomed", ParseErrorReason::InvalidSyntax)]
fn test_set_value_errors(
    #[case] key: &str,
    #[case] raw: &str,
    #[case] reason: ParseErrorReason,
) {
    let lookup = store(&[(key, raw)]);
    let err = parse_query(&lookup, &mut Tile::default()).unwrap_err();
    assert!(matches!(err, QueryError::SetValue { .. }));
    assert_eq!(err.key(), Some(key));
    assert_eq!(err.parse_error().unwrap().reason, reason);
    assert!(err.to_string().contains(&format!("`{key}`")));
}

#[test]
fn test_empty_optional_target_is_non_pointer() {
    let lookup = store(&[("w", "10")]);
    let mut missing: Option<Tile> = None;
    let err = parse_query(&lookup, &mut missing).unwrap_err();
    assert!(err.is_non_pointer());
    assert_eq!(err.to_string(), "non-pointer passed");
}

#[test]
fn test_populated_optional_target_is_followed() {
    let lookup = store(&[("w", "10")]);
    let mut target = Some(Tile::default());
    parse_query(&lookup, &mut target).unwrap();
    assert_eq!(target.map(|tile| tile.width), Some(10));
}

#[test]
fn test_non_record_target_is_unsupported() {
    let lookup = store(&[("w", "10")]);

    let mut width = 5i32;
    let err = parse_query(&lookup, &mut width).unwrap_err();
    assert_eq!(err.unsupported_type().unwrap().kind(), Kind::I32);
    assert_eq!(width, 5);

    let mut names: Vec<String> = Vec::new();
    let err = parse_query(&lookup, &mut names).unwrap_err();
    assert_eq!(err.unsupported_type().unwrap().kind(), Kind::Sequence);

    let mut zoom = Some(1.0f64);
    let err = parse_query(&lookup, &mut zoom).unwrap_err();
    assert_eq!(err.unsupported_type().unwrap().kind(), Kind::F64);
}

#[test]
fn test_nested_records_share_the_flat_key_space() {
    init_tracing();
    let lookup = store(&[
        ("map", "world"),
        ("w", "256"),
        ("max_zoom", "20"),
        ("bearing", "90.5"),
        ("provider", "osm"),
        ("debug", "1"),
    ]);
    let mut scene = Scene::default();
    parse_query(&lookup, &mut scene).unwrap();

    assert!(scene.debug);
    assert_eq!(scene.request.map, "world");
    assert_eq!(scene.request.viewport.bearing, 90.5);
    assert_eq!(scene.request.viewport.tile.width, 256);
    assert_eq!(scene.request.viewport.tile.height, 0);
    assert_eq!(scene.request.viewport.tile.max_zoom, Some(20.0));
    assert_eq!(scene.request.provider.name, "osm");
}

#[test]
fn test_nested_failure_stops_outer_traversal() {
    let lookup = store(&[("map", "world"), ("h", "x"), ("provider", "osm")]);
    let mut request = MapRequest::default();
    let err = parse_query(&lookup, &mut request).unwrap_err();
    assert_eq!(err.key(), Some("h"));
    assert_eq!(request.map, "world");
    assert_eq!(request.provider.name, "");
}

#[test]
fn test_optional_fields_allocate_and_skip() {
    let mut tile = Tile::default();
    parse_query(&store(&[("max_zoom", "3")]), &mut tile).unwrap();
    assert_eq!(tile.max_zoom, Some(3.0));

    parse_query(&store(&[("max_zoom", "")]), &mut tile).unwrap();
    assert_eq!(tile.max_zoom, Some(3.0));

    let mut unset = Tile::default();
    parse_query(&store(&[]), &mut unset).unwrap();
    assert_eq!(unset.max_zoom, None);
}

#[test]
fn test_optional_record_field_is_not_descended() {
    let mut target = WithRecordPointer::default();
    parse_query(&store(&[("w", "10")]), &mut target).unwrap();
    assert_eq!(target.width, 10);
    assert_eq!(target.tile, None);

    let err = parse_query(&store(&[("tile", "x")]), &mut target).unwrap_err();
    assert_eq!(err.key(), Some("tile"));
    assert_eq!(err.unsupported_type().unwrap().kind(), Kind::Record);
}

#[test]
fn test_decode_from_query_string() {
    let query = QueryString::parse("?w=10&h=20&max_zoom=&w=30");
    let mut tile = Tile::default();
    parse_query_into(&query, &mut tile).unwrap();
    assert_eq!(
        tile,
        Tile {
            width: 10,
            height: 20,
            max_zoom: None
        }
    );
}

#[test]
fn test_decode_from_pair_list() {
    let pairs = vec![
        ("h".to_string(), "7".to_string()),
        ("h".to_string(), "8".to_string()),
    ];
    let mut tile = Tile::default();
    parse_query_into(&pairs, &mut tile).unwrap();
    assert_eq!(tile.height, 7);
}
