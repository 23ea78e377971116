// Model serialization tests (JSON camelCase)

mod common;

use common::default_board;
use simdash::models::*;

#[test]
fn test_source_snapshot_serialization_camel_case() {
    let board = default_board();
    let bitcoin = board.source_snapshot("bitcoin").unwrap();
    let json = serde_json::to_string(&bitcoin).unwrap();
    assert!(json.contains("\"hashRate\""));
    assert!(json.contains("\"domain\":\"mining\""));
    assert!(json.contains("\"unit\":\"TH/s\""));
    let back: SourceSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, bitcoin);
}

#[test]
fn test_track_snapshot_exposes_parameter_values() {
    let board = default_board();
    let bass = board.source_snapshot("bass").unwrap();
    assert_eq!(bass.domain, Domain::Track);
    assert_eq!(bass.parameters["volume"], 70.0);
    assert_eq!(bass.parameters["pan"], -20.0);
    assert_eq!(bass.parameters["muted"], 0.0);
    assert_eq!(bass.counters.keys().collect::<Vec<_>>(), vec!["level", "peaks"]);
}

#[test]
fn test_dashboard_snapshot_serialization() {
    let snapshot = default_board().snapshot();
    let value = serde_json::to_value(&snapshot).unwrap();
    assert!(value["timestamp"].as_i64().unwrap() > 0);
    assert_eq!(value["sources"].as_array().unwrap().len(), 14);
    assert_eq!(value["mining"]["activeCount"], 0);
    assert_eq!(value["mining"]["performance"], "idle");
    assert_eq!(value["studio"]["activeCount"], 2);
    assert_eq!(value["studio"]["performance"], "optimal");
    assert_eq!(value["transport"]["masterVolume"], 75.0);
    assert_eq!(value["positionLabel"], "0:00");
    assert_eq!(value["timeline"]["showGrid"], true);
}

#[test]
fn test_placed_clip_flattens_clip_fields() {
    let view = default_board().timeline.view();
    let json = serde_json::to_value(&view.clips[2]).unwrap();
    assert_eq!(json["trackId"], "bass");
    assert_eq!(json["name"], "Bassline");
    assert_eq!(json["position"]["left"], 25.0);
    assert_eq!(json["position"]["width"], 175.0);
}

#[test]
fn test_domain_parses_route_names() {
    assert_eq!("mining".parse::<Domain>(), Ok(Domain::Mining));
    assert_eq!("effect".parse::<Domain>(), Ok(Domain::Effect));
    assert!("studio".parse::<Domain>().is_err());
    assert!(Domain::Track.is_studio());
    assert!(!Domain::Mining.is_studio());
    assert_eq!(Domain::ALL.map(Domain::as_str), ["mining", "track", "effect"]);
}
