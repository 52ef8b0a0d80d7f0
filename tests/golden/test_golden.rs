use std::fs;
use std::path::PathBuf;

use radar_mcp_server::radar::{normalize_filters, Radar};
use radar_mcp_server::source::parse_entries;
use serde_json::{json, Value};

const SOURCE_URL: &str = "https://radar.test/radar-entries.json";

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden/fixtures")
        .join(name)
}

fn expected_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden/expected")
        .join(name)
}

fn read_expected(name: &str) -> Value {
    let text = fs::read_to_string(expected_path(name)).expect("expected file missing");
    serde_json::from_str(&text).expect("expected file is not JSON")
}

fn load_fixture_radar() -> Radar {
    let body = fs::read_to_string(fixture_path("radar-entries.json")).expect("fixture missing");
    Radar::new(SOURCE_URL, parse_entries(&body).unwrap())
}

/// Run a query and zero out `duration_ms`, the only non-deterministic field.
fn run(radar: &Radar, quadrant: Option<Value>, ring: Option<Value>) -> Value {
    let filters = normalize_filters(quadrant.as_ref(), ring.as_ref()).unwrap();
    let mut value = serde_json::to_value(radar.guidance(filters)).unwrap();
    value["duration_ms"] = json!(0);
    value
}

#[test]
fn golden_fixture_drops_non_object_elements() {
    let radar = load_fixture_radar();
    assert_eq!(radar.len(), 10, "3 non-object elements must be dropped from 13");
}

#[test]
fn golden_all_entries() {
    let radar = load_fixture_radar();
    let actual = run(&radar, None, None);
    assert_eq!(actual, read_expected("all_entries.json"), "unfiltered response does not match golden");
}

#[test]
fn golden_languages_primary_consider() {
    let radar = load_fixture_radar();

    // Same query in three argument shapes
    let shapes = vec![
        (json!([1]), json!("0,1")),
        (json!(1), json!("[0, 1]")),
        (json!("1"), json!(["1", 0, "1"])),
    ];

    let expected = read_expected("languages_primary_consider.json");
    for (quadrant, ring) in shapes {
        let actual = run(&radar, Some(quadrant.clone()), Some(ring.clone()));
        assert_eq!(
            actual, expected,
            "quadrant={quadrant} ring={ring} does not match golden"
        );
    }
}

#[test]
fn golden_out_of_range_ring_matches_nothing_extra() {
    // 99 is the sort key for a missing ring, never a match key
    let radar = load_fixture_radar();
    let actual = run(&radar, None, Some(json!([3, 99])));
    assert_eq!(actual, read_expected("avoid_with_out_of_range_ring.json"));
}
