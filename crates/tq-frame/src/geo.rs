//! Latitude/longitude column discovery for map plots.

use serde::Serialize;

use crate::table::Table;

const LATITUDE: &str = "latitude";
const LONGITUDE: &str = "longitude";

/// A `<prefix>latitude` / `<prefix>longitude` column pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoordinatePair {
    pub prefix: String,
    pub latitude: String,
    pub longitude: String,
    /// `<prefix>id`, when the table has it.
    pub id: Option<String>,
}

impl CoordinatePair {
    /// Title-cased resource name for plot titles, e.g. `parent_station_` ->
    /// `Parent Station`. Falls back to `fallback` for an empty prefix.
    #[must_use]
    pub fn resource_label(&self, fallback: &str) -> String {
        let trimmed = self.prefix.trim_end_matches('_');
        if trimmed.is_empty() {
            return fallback.to_string();
        }
        trimmed
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `(latitude, longitude)` per row; rows with a non-numeric side are skipped.
    #[must_use]
    pub fn points(&self, table: &Table) -> Vec<(f64, f64)> {
        let (Some(lat), Some(lon)) = (table.column(&self.latitude), table.column(&self.longitude))
        else {
            return Vec::new();
        };
        lat.cells()
            .zip(lon.cells())
            .filter_map(|(a, b)| Some((a.as_f64()?, b.as_f64()?)))
            .collect()
    }
}

/// Every latitude column with a sibling longitude column, in column order.
#[must_use]
pub fn coordinate_pairs(table: &Table) -> Vec<CoordinatePair> {
    let names = table.column_names();
    names
        .iter()
        .filter_map(|name| {
            let prefix = name.strip_suffix(LATITUDE)?;
            let longitude = format!("{prefix}{LONGITUDE}");
            if !names.contains(&longitude.as_str()) {
                return None;
            }
            let id = format!("{prefix}id");
            Some(CoordinatePair {
                prefix: prefix.to_string(),
                latitude: (*name).to_string(),
                id: names.contains(&id.as_str()).then_some(id),
                longitude,
            })
        })
        .collect()
}
