//! End-to-end normalization of JSON:API responses.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tq_frame::{
    Cell, DataType, FrameError, QueryResults, compact_memory, coordinate_pairs, normalize,
};

fn fixture(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

#[test]
fn single_resource_without_includes() {
    let response = json!({"data": [{
        "id": "1", "type": "stop", "attributes": {"name": "A"}, "relationships": {}
    }]});
    let table = normalize(&response).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.column_names(), vec!["stop_id", "stop_name"]);
}

#[test]
fn single_object_data_is_one_row() {
    let response = json!({"data": {"id": "Red", "type": "route", "attributes": {"color": "DA291C"}}});
    let table = normalize(&response).unwrap();
    assert_eq!(table.column_names(), vec!["route_id", "route_color"]);
}

#[test]
fn empty_and_mixed_data_fail() {
    assert!(matches!(normalize(&json!({"data": []})), Err(FrameError::NoData)));
    assert!(matches!(normalize(&json!({"errors": []})), Err(FrameError::NoData)));

    let mixed = json!({"data": [
        {"id": "1", "type": "stop"},
        {"id": "Red", "type": "route"}
    ]});
    let Err(FrameError::MixedTypes { types }) = normalize(&mixed) else {
        panic!("expected MixedTypes");
    };
    assert_eq!(types, vec!["stop", "route"]);
}

#[test]
fn included_routes_are_left_joined() {
    let response = fixture(include_str!("fixtures/stops_with_routes.json"));
    let table = normalize(&response).unwrap();

    assert_eq!(
        table.column_names(),
        vec![
            "stop_id",
            "stop_name",
            "stop_latitude",
            "stop_longitude",
            "stop_wheelchair_boarding",
            "stop_location_type",
            "stop_parent_station",
            "route_id",
            "route_long_name",
            "route_color",
            "route_type",
            "route_line",
        ]
    );
    assert_eq!(table.len(), 3);

    let names: Vec<_> = table.rows().map(|r| r.get("route_long_name").unwrap().clone()).collect();
    assert_eq!(names, vec![text("Red Line"), text("Orange Line"), Cell::Null]);

    // Back Bay's commuter rail route was not included.
    let back_bay = table.row(2).unwrap();
    assert_eq!(back_bay.get("stop_name"), Some(&text("Back Bay")));
    assert_eq!(back_bay.get("route_id"), Some(&Cell::Null));
    assert_eq!(back_bay.get("route_color"), Some(&Cell::Null));
}

#[test]
fn route_pattern_trips_join_as_representative_trip() {
    let response = json!({
        "data": [{
            "id": "Red-1-0", "type": "route_pattern",
            "attributes": {"name": "Alewife - Ashmont", "typicality": 1},
            "relationships": {
                "representative_trip": {"data": {"id": "canonical-Red-C1-0", "type": "trip"}},
                "route": {"data": {"id": "Red", "type": "route"}}
            }
        }],
        "included": [{
            "id": "canonical-Red-C1-0", "type": "trip",
            "attributes": {"headsign": "Ashmont", "direction_id": 0}
        }]
    });
    let table = normalize(&response).unwrap();
    assert_eq!(
        table.column_names(),
        vec![
            "route_pattern_id",
            "route_pattern_name",
            "route_pattern_typicality",
            "route_pattern_route",
            "representative_trip_id",
            "representative_trip_headsign",
            "representative_trip_direction_id",
        ]
    );
    assert_eq!(
        table.row(0).unwrap().get("representative_trip_headsign"),
        Some(&text("Ashmont"))
    );
}

#[test]
fn line_routes_use_the_plural_key() {
    let response = json!({
        "data": [{
            "id": "line-Green", "type": "line",
            "attributes": {"long_name": "Green Line"},
            "relationships": {"routes": {"data": [
                {"id": "Green-B", "type": "route"},
                {"id": "Green-C", "type": "route"}
            ]}}
        }],
        "included": [
            {"id": "Green-C", "type": "route", "attributes": {"long_name": "Green Line C"}},
            {"id": "Green-B", "type": "route", "attributes": {"long_name": "Green Line B"}}
        ]
    });
    let table = normalize(&response).unwrap();
    assert!(table.column("line_routes").is_none());
    assert_eq!(
        table.row(0).unwrap().get("route_long_name"),
        Some(&text("Green Line B"))
    );
}

#[test]
fn compaction_keeps_every_value() {
    let data: Vec<Value> = (0..25)
        .map(|i| {
            json!({
                "id": format!("v{i}"),
                "type": "vehicle",
                "attributes": {
                    "current_status": if i % 2 == 0 { "IN_TRANSIT_TO" } else { "STOPPED_AT" },
                    "bearing": i * 15,
                    "updated_at": "2024-03-01T12:00:00-05:00"
                }
            })
        })
        .collect();
    let mut table = normalize(&json!({"data": data})).unwrap();
    let original = table.clone();

    assert_eq!(compact_memory(&mut table), 2);
    let dtypes: Vec<_> = table.column_dtypes().into_iter().map(|(n, d)| (n.to_string(), d)).collect();
    assert_eq!(
        dtypes,
        vec![
            ("vehicle_id".to_string(), DataType::Object),
            ("vehicle_current_status".to_string(), DataType::Category),
            ("vehicle_bearing".to_string(), DataType::Int64),
            ("vehicle_updated_at".to_string(), DataType::Category),
        ]
    );
    for (compacted, plain) in table.columns().iter().zip(original.columns()) {
        assert_eq!(compacted.decoded(), plain.decoded(), "column {}", plain.name);
    }
    assert_eq!(original.column("vehicle_updated_at").unwrap().dtype(), DataType::DatetimeUtc);
}

#[test]
fn results_expose_coordinates() {
    let body = include_str!("fixtures/stops_with_routes.json");
    let results = QueryResults::from_response(200, "OK", body, true);
    let table = results.table.as_ref().unwrap();

    let pairs = coordinate_pairs(table);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].id.as_deref(), Some("stop_id"));
    assert_eq!(pairs[0].points(table).len(), 3);

    let csv = {
        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    };
    assert!(csv.starts_with("stop_id,stop_name,"));
    assert_eq!(csv.lines().count(), 4);
}
