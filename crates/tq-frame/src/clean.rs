//! Flattening of JSON:API resource objects into columns.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::cell::Cell;
use crate::error::FrameError;
use crate::table::Table;

/// Top-level members that are API metadata, not data.
const DROPPED: &[&str] = &["links", "type"];
/// Members expanded into their own columns.
const EXPANDED: &[&str] = &["attributes", "relationships", "properties"];
/// Column-name suffixes parsed as timestamps.
const TIMESTAMP_SUFFIXES: &[&str] = &["created_at", "updated_at"];

/// Flatten one homogeneous group of resources into a table.
///
/// Column order: remaining top-level members, then attributes, then one id
/// column per relationship, then properties. Each section lists names in
/// first-appearance order across the group.
pub fn clean_resources(resources: &[&Value]) -> Table {
    let objects: Vec<&Map<String, Value>> = resources.iter().filter_map(|r| r.as_object()).collect();
    let mut table = Table::with_rows(objects.len());

    let base = union_keys(objects.iter().map(|o| Some(*o)))
        .into_iter()
        .filter(|k| !DROPPED.contains(&k.as_str()) && !EXPANDED.contains(&k.as_str()));
    for name in base {
        let cells = objects
            .iter()
            .map(|o| o.get(&name).map_or(Cell::Null, Cell::from_json))
            .collect();
        add_column(&mut table, name, cells);
    }

    let attributes: Vec<Option<&Map<String, Value>>> = objects
        .iter()
        .map(|o| o.get("attributes").and_then(Value::as_object))
        .collect();
    for name in union_keys(attributes.iter().copied()) {
        let cells = attributes
            .iter()
            .map(|a| a.and_then(|a| a.get(&name)).map_or(Cell::Null, Cell::from_json))
            .collect();
        add_column(&mut table, name, cells);
    }

    let relationships: Vec<Option<&Map<String, Value>>> = objects
        .iter()
        .map(|o| o.get("relationships").and_then(Value::as_object))
        .collect();
    for name in union_keys(relationships.iter().copied()) {
        let cells = relationships
            .iter()
            .map(|r| {
                let id = r
                    .and_then(|r| r.get(&name))
                    .map_or(Ok(None), |rel| relationship_id(&name, rel))
                    .unwrap_or_else(|error| {
                        tracing::debug!(%error, "relationship id set to null");
                        None
                    });
                id.map_or(Cell::Null, Cell::Text)
            })
            .collect();
        add_column(&mut table, name, cells);
    }

    let properties: Vec<Option<Map<String, Value>>> =
        objects.iter().map(|o| properties_map(o)).collect();
    for name in union_keys(properties.iter().map(Option::as_ref)) {
        let cells = properties
            .iter()
            .map(|p| {
                p.as_ref()
                    .and_then(|p| p.get(&name))
                    .map_or(Cell::Null, Cell::from_json)
            })
            .collect();
        add_column(&mut table, name, cells);
    }

    parse_timestamp_columns(&mut table);
    table
}

/// Add a column, or overwrite non-null cells of an existing one with the
/// same name (a later section wins).
fn add_column(table: &mut Table, name: String, cells: Vec<Cell>) {
    let Some(index) = table.column_index(&name) else {
        table.push_column(name, cells);
        return;
    };
    let existing = &mut table.columns_mut()[index];
    if let crate::column::ColumnData::Plain(old) = &mut existing.data {
        for (slot, cell) in old.iter_mut().zip(cells) {
            if !cell.is_null() {
                *slot = cell;
            }
        }
    }
}

fn union_keys<'a>(maps: impl Iterator<Item = Option<&'a Map<String, Value>>>) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for map in maps.flatten() {
        for key in map.keys() {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
    }
    keys
}

/// Id of the related resource.
///
/// `data` null or absent gives `None`; a to-many list gives its first
/// element's id (empty list: `None`).
///
/// # Errors
///
/// Returns [`FrameError::MalformedRelationship`] for any other shape.
pub fn relationship_id(name: &str, relationship: &Value) -> Result<Option<String>, FrameError> {
    let malformed = |reason: &str| FrameError::MalformedRelationship {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let Some(relationship) = relationship.as_object() else {
        return Err(malformed("not an object"));
    };
    match relationship.get("data") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items.first().map_or(Ok(None), |first| {
            identifier_id(first).map(Some).ok_or_else(|| malformed("list item has no string id"))
        }),
        Some(object @ Value::Object(_)) => identifier_id(object)
            .map(Some)
            .ok_or_else(|| malformed("data has no string id")),
        Some(_) => Err(malformed("data is neither an object, a list nor null")),
    }
}

fn identifier_id(identifier: &Value) -> Option<String> {
    identifier.get("id").and_then(Value::as_str).map(str::to_string)
}

/// `[{name, value}, ...]` as a map; `None` when absent or not a list.
fn properties_map(object: &Map<String, Value>) -> Option<Map<String, Value>> {
    let list = object.get("properties")?.as_array()?;
    Some(
        list.iter()
            .filter_map(|prop| {
                let name = prop.get("name")?.as_str()?;
                Some((name.to_string(), prop.get("value").cloned().unwrap_or(Value::Null)))
            })
            .collect(),
    )
}

/// Parse text cells of `*created_at` / `*updated_at` columns as RFC 3339.
/// Unparsable text is left as is.
fn parse_timestamp_columns(table: &mut Table) {
    for column in table.columns_mut() {
        if !TIMESTAMP_SUFFIXES.iter().any(|s| column.name.ends_with(s)) {
            continue;
        }
        if let crate::column::ColumnData::Plain(cells) = &mut column.data {
            for cell in cells.iter_mut() {
                if let Cell::Text(text) = cell
                    && let Ok(parsed) = DateTime::parse_from_rfc3339(text)
                {
                    *cell = Cell::Timestamp(parsed.with_timezone(&Utc));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn sections_flatten_in_order() {
        let stop = json!({
            "id": "place-pktrm",
            "type": "stop",
            "links": {"self": "/stops/place-pktrm"},
            "attributes": {"name": "Park Street", "wheelchair_boarding": 1},
            "relationships": {
                "parent_station": {"data": null},
                "zone": {"data": {"id": "RapidTransit", "type": "zone"}}
            }
        });
        let table = clean_resources(&[&stop]);
        assert_eq!(
            table.column_names(),
            vec!["id", "name", "wheelchair_boarding", "parent_station", "zone"]
        );
        let row = table.row(0).unwrap();
        assert_eq!(row.get("parent_station"), Some(&Cell::Null));
        assert_eq!(row.get("zone"), Some(&Cell::Text("RapidTransit".into())));
    }

    #[test]
    fn keys_missing_from_some_rows_become_null() {
        let a = json!({"id": "1", "type": "stop", "attributes": {"name": "A"}});
        let b = json!({"id": "2", "type": "stop", "attributes": {"platform_code": "2"}});
        let table = clean_resources(&[&a, &b]);
        assert_eq!(table.column_names(), vec!["id", "name", "platform_code"]);
        assert_eq!(table.row(1).unwrap().get("name"), Some(&Cell::Null));
    }

    #[test]
    fn properties_expand_into_columns() {
        let facility = json!({
            "id": "pk-1",
            "type": "facility",
            "attributes": {"long_name": "Lot"},
            "properties": [
                {"name": "capacity", "value": 120},
                {"name": "enclosed", "value": true}
            ]
        });
        let table = clean_resources(&[&facility]);
        assert_eq!(table.column_names(), vec!["id", "long_name", "capacity", "enclosed"]);
        assert_eq!(table.row(0).unwrap().get("capacity"), Some(&Cell::Int(120)));
    }

    #[test]
    fn relationship_shapes() {
        assert_eq!(relationship_id("r", &json!({"data": {"id": "Red", "type": "route"}})).unwrap(), Some("Red".into()));
        assert_eq!(relationship_id("r", &json!({"data": null})).unwrap(), None);
        assert_eq!(relationship_id("r", &json!({"links": {}})).unwrap(), None);
        assert_eq!(
            relationship_id("r", &json!({"data": [{"id": "a", "type": "stop"}, {"id": "b", "type": "stop"}]})).unwrap(),
            Some("a".into())
        );
        assert_eq!(relationship_id("r", &json!({"data": []})).unwrap(), None);
        assert!(relationship_id("r", &json!({"data": 5})).is_err());
        assert!(relationship_id("r", &json!({"data": {"type": "route"}})).is_err());
        assert!(relationship_id("r", &json!("Red")).is_err());
    }

    #[test]
    fn malformed_relationship_becomes_null() {
        let stop = json!({"id": "1", "type": "stop", "relationships": {"route": {"data": 42}}});
        let table = clean_resources(&[&stop]);
        assert_eq!(table.row(0).unwrap().get("route"), Some(&Cell::Null));
    }

    #[test]
    fn timestamp_columns_are_parsed() {
        let alert = json!({
            "id": "1",
            "type": "alert",
            "attributes": {
                "created_at": "2024-03-01T08:15:00-05:00",
                "updated_at": "not a date",
                "active_period": "2024-03-01T08:15:00-05:00"
            }
        });
        let table = clean_resources(&[&alert]);
        let row = table.row(0).unwrap();
        let Some(Cell::Timestamp(created)) = row.get("created_at") else {
            panic!("created_at should be a timestamp");
        };
        assert_eq!(created.to_rfc3339(), "2024-03-01T13:15:00+00:00");
        assert_eq!(row.get("updated_at"), Some(&Cell::Text("not a date".into())));
        assert!(matches!(row.get("active_period"), Some(Cell::Text(_))));
    }
}
