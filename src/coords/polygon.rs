use std::borrow::Cow;

use geo_types::Coord;
use serde_json::Value;

use crate::coords::normalize::{extract_pair, validate_coordinate, WarningContext};
use crate::input::StationEntry;
use crate::model::{CoordinateWarning, WarningIssue};

/// Result of resolving one station's polygon payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PolygonOutcome {
    /// Normalized `(lng, lat)` points in input order, not yet closed.
    Ring(Vec<Coord<f64>>),
    Skipped(SkipReason),
}

/// Why a station produced no geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Text payload that is not JSON.
    InvalidJson(String),
    /// Neither a point list nor text decoding to one.
    InvalidPolygon,
    EmptyPolygon,
    /// A point carrying none of the recognised field pairs.
    MissingCoordinateFields { coordinate_index: usize },
}

impl SkipReason {
    fn issue(&self) -> WarningIssue {
        match self {
            SkipReason::InvalidJson(_) => WarningIssue::InvalidJson,
            SkipReason::InvalidPolygon => WarningIssue::InvalidPolygon,
            SkipReason::EmptyPolygon => WarningIssue::EmptyPolygon,
            SkipReason::MissingCoordinateFields { .. } => WarningIssue::MissingCoordinateFields,
        }
    }

    fn message(&self, name: &str) -> String {
        match self {
            SkipReason::InvalidJson(detail) => {
                format!("Could not parse polygon JSON for \"{}\": {}", name, detail)
            }
            SkipReason::InvalidPolygon => format!(
                "Polygon for \"{}\" must be an array of points or a JSON-encoded array of points",
                name
            ),
            SkipReason::EmptyPolygon => format!("Polygon for \"{}\" has no points", name),
            SkipReason::MissingCoordinateFields { coordinate_index } => format!(
                "Point {} of \"{}\" has no recognised coordinate fields (lat/long, lat/lng, latitude/longitude or lat/lon); feature skipped",
                coordinate_index, name
            ),
        }
    }
}

/// Turns a station's `polygon` into normalized coordinates.
///
/// Coordinate problems are recorded in `warnings` and never drop the station.
/// A station is skipped, with one warning, only when its payload cannot be
/// read as a non-empty point list. Warnings for points of a skipped station
/// are discarded along with its points.
pub fn resolve_polygon(entry: &StationEntry<'_>, warnings: &mut Vec<CoordinateWarning>) -> PolygonOutcome {
    let points = match point_list(entry.polygon) {
        Ok(points) => points,
        Err(reason) => return skip(entry, reason, warnings),
    };
    if points.is_empty() {
        return skip(entry, SkipReason::EmptyPolygon, warnings);
    }

    let mut ring = Vec::with_capacity(points.len() + 1);
    let mut point_warnings = Vec::new();
    for (i, point) in points.iter().enumerate() {
        let Some(pair) = extract_pair(point) else {
            return skip(entry, SkipReason::MissingCoordinateFields { coordinate_index: i }, warnings);
        };
        let ctx = WarningContext::feature(entry.index, &entry.name, i);
        let (coord, warning) = validate_coordinate(pair, &ctx);
        point_warnings.extend(warning);
        ring.push(coord);
    }

    warnings.append(&mut point_warnings);
    PolygonOutcome::Ring(ring)
}

fn point_list(polygon: &Value) -> Result<Cow<'_, [Value]>, SkipReason> {
    match polygon {
        Value::Array(points) => Ok(Cow::Borrowed(points.as_slice())),
        Value::String(text) => match serde_json::from_str(text) {
            Ok(Value::Array(points)) => Ok(Cow::Owned(points)),
            Ok(_) => Err(SkipReason::InvalidPolygon),
            Err(e) => Err(SkipReason::InvalidJson(e.to_string())),
        },
        _ => Err(SkipReason::InvalidPolygon),
    }
}

fn skip(entry: &StationEntry<'_>, reason: SkipReason, warnings: &mut Vec<CoordinateWarning>) -> PolygonOutcome {
    let ctx = match reason {
        SkipReason::MissingCoordinateFields { coordinate_index } => {
            WarningContext::feature(entry.index, &entry.name, coordinate_index)
        }
        _ => WarningContext::whole_feature(entry.index, &entry.name),
    };
    let warning = ctx.warning(reason.issue(), Coord { x: 0.0, y: 0.0 }, reason.message(&entry.name));
    warnings.push(warning);
    PolygonOutcome::Skipped(reason)
}
