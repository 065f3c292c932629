//! Wire types shared by the library API, the wasm bindings and the CLI.

use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConversionError, Result};

/// Suggested file name for the converted output.
pub const DOWNLOAD_FILENAME: &str = "stations.geojson";

/// Name given to markers supplied without one.
pub const DEFAULT_MARKER_NAME: &str = "Custom Marker";

/// Per-invocation settings. Nothing here outlives a single conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertOptions {
    #[serde(default)]
    pub include_markers: bool,
    #[serde(default)]
    pub markers: Vec<Marker>,
}

/// A raw conversion request as sent by a caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConvertRequest {
    /// Either a flat list of stations or a list of areas carrying `area_list`.
    #[serde(default)]
    pub data: Value,
    #[serde(flatten)]
    pub options: ConvertOptions,
}

/// A user supplied point of interest, emitted as a `Point` feature.
///
/// Coordinates are kept as raw JSON so that bad values can be reported
/// through the same validation path as polygon points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(default)]
    pub lat: Value,
    #[serde(default)]
    pub lng: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Marker {
    pub fn new(lat: f64, lng: f64, name: impl Into<String>) -> Self {
        Self {
            lat: Value::from(lat),
            lng: Value::from(lng),
            name: Some(name.into()),
        }
    }

    pub fn display_name(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_MARKER_NAME,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningIssue {
    InvalidLatitude,
    InvalidLongitude,
    BothInvalid,
    InvalidJson,
    InvalidPolygon,
    EmptyPolygon,
    MissingCoordinateFields,
}

/// Non-fatal diagnostic attached to a successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinateWarning {
    /// Position of the feature in its flattened input, or -1 for markers.
    pub feature_index: i64,
    pub feature_name: String,
    /// Position of the point within the feature, or -1 for whole-feature issues.
    pub coordinate_index: i64,
    /// Best-effort `[lng, lat]`, with 0 standing in for non-numeric values.
    pub coordinate: [f64; 2],
    pub issue: WarningIssue,
    pub message: String,
}

/// Successful result of the warnings-aware conversion.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub geojson: FeatureCollection,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CoordinateWarning>,
}

impl Conversion {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.map_err(|e| {
            log::error!("Failed to serialize conversion: {}", e);
            ConversionError::Internal(e.to_string())
        })
    }
}

/// Body returned to callers when a conversion fails as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ConversionError> for ErrorResponse {
    fn from(err: &ConversionError) -> Self {
        // Internal faults display a generic message; details stay in the log.
        Self {
            error: err.to_string(),
        }
    }
}
