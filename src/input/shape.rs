use log::debug;
use serde_json::Value;

use crate::error::{ConversionError, Result};

/// Key whose presence on any top-level element switches the whole batch to
/// nested interpretation.
pub const AREA_LIST_KEY: &str = "area_list";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `[{ name, polygon }, ...]`
    Flat,
    /// `[{ area_list: [{ name, polygon }, ...] }, ...]`
    Nested,
}

/// A structurally valid station, independent of the shape it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct StationEntry<'a> {
    /// Human readable position, e.g. `data[3]` or `area[1].area_list[0]`.
    pub path: String,
    /// Flat position, or running count across all groups for nested input.
    pub index: usize,
    pub name: String,
    pub polygon: &'a Value,
}

pub fn detect_shape(input: &Value) -> Result<Shape> {
    as_items(input).map(shape_of)
}

/// Detects the shape and runs the structural gate over every station.
///
/// Either every reachable station has a `name` and a `polygon`, or the first
/// offending one is reported and nothing is returned.
pub fn collect_entries(input: &Value) -> Result<Vec<StationEntry<'_>>> {
    let items = as_items(input)?;
    let shape = shape_of(items);
    debug!("Detected {:?} input with {} top-level items", shape, items.len());

    let mut entries = Vec::with_capacity(items.len());
    match shape {
        Shape::Flat => {
            for (i, item) in items.iter().enumerate() {
                entries.push(entry(item, format!("data[{}]", i), i)?);
            }
        }
        Shape::Nested => {
            let mut running = 0;
            for (g, group) in items.iter().enumerate() {
                let Some(stations) = group.get(AREA_LIST_KEY).and_then(Value::as_array) else {
                    debug!("Skipping area[{}]: no {} array", g, AREA_LIST_KEY);
                    continue;
                };
                for (j, item) in stations.iter().enumerate() {
                    let path = format!("area[{}].{}[{}]", g, AREA_LIST_KEY, j);
                    entries.push(entry(item, path, running)?);
                    running += 1;
                }
            }
        }
    }

    Ok(entries)
}

fn as_items(input: &Value) -> Result<&[Value]> {
    input
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ConversionError::InvalidInput("expected an array".to_string()))
}

fn shape_of(items: &[Value]) -> Shape {
    if items.iter().any(|item| item.get(AREA_LIST_KEY).is_some()) {
        Shape::Nested
    } else {
        Shape::Flat
    }
}

fn entry(item: &Value, path: String, index: usize) -> Result<StationEntry<'_>> {
    let Some(name) = required(item, "name") else {
        return Err(ConversionError::MissingField { field: "name", path });
    };
    let Some(polygon) = required(item, "polygon") else {
        return Err(ConversionError::MissingField { field: "polygon", path });
    };

    let name = match name {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    Ok(StationEntry {
        path,
        index,
        name,
        polygon,
    })
}

fn required<'a>(item: &'a Value, field: &str) -> Option<&'a Value> {
    item.get(field).filter(|value| is_truthy(value))
}

// Missing, null, false, 0 and "" all count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
