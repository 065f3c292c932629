use geo_types::{Coord, Point};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use log::debug;
use serde_json::Value as JsonValue;

use crate::coords::{close_ring, resolve_polygon, validate_coordinate, PolygonOutcome, RawPair, WarningContext};
use crate::error::Result;
use crate::input::collect_entries;
use crate::model::{Conversion, ConvertOptions, ConvertRequest, CoordinateWarning, Marker};

/// Turns station/area JSON into a GeoJSON `FeatureCollection`.
///
/// A converter holds configuration only; every call to [`Converter::convert`]
/// starts from scratch, so one instance can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    // Configuration
    pub include_markers: bool,
    markers: Vec<Marker>,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConvertOptions) -> Self {
        Self {
            include_markers: options.include_markers,
            markers: options.markers,
        }
    }

    /// Adds a marker. Markers are only emitted when `include_markers` is set.
    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Converts and returns the bare collection, dropping any warnings.
    pub fn convert(&self, data: &JsonValue) -> Result<FeatureCollection> {
        self.convert_with_warnings(data).map(|conversion| conversion.geojson)
    }

    /// Converts and returns the collection together with every warning
    /// raised along the way.
    ///
    /// Fails only on input that is not an array or on a station missing
    /// `name` or `polygon`; in both cases nothing is converted.
    pub fn convert_with_warnings(&self, data: &JsonValue) -> Result<Conversion> {
        let entries = collect_entries(data)?;
        debug!("Converting {} stations", entries.len());

        let mut warnings = Vec::new();
        let mut features = Vec::with_capacity(entries.len());

        for entry in &entries {
            match resolve_polygon(entry, &mut warnings) {
                PolygonOutcome::Ring(mut ring) => {
                    close_ring(&mut ring);
                    features.push(polygon_feature(&entry.name, &ring));
                }
                PolygonOutcome::Skipped(reason) => {
                    debug!("Skipped {} (\"{}\"): {:?}", entry.path, entry.name, reason);
                }
            }
        }

        if self.include_markers {
            for (i, marker) in self.markers.iter().enumerate() {
                features.push(marker_feature(i, marker, &mut warnings));
            }
        }

        debug!("Emitted {} features with {} warnings", features.len(), warnings.len());

        Ok(Conversion {
            geojson: FeatureCollection {
                bbox: None,
                features,
                foreign_members: None,
            },
            warnings,
        })
    }
}

/// Runs a full request: data plus marker options.
pub fn convert_request(request: &ConvertRequest) -> Result<Conversion> {
    Converter::with_options(request.options.clone()).convert_with_warnings(&request.data)
}

/// Parses a raw request body (`{ data, includeMarkers?, markers? }`) and
/// converts it.
pub fn convert_str(body: &str) -> Result<Conversion> {
    let request: ConvertRequest = serde_json::from_str(body)?;
    convert_request(&request)
}

fn polygon_feature(name: &str, ring: &[Coord<f64>]) -> Feature {
    let exterior = ring.iter().map(|c| vec![c.x, c.y]).collect();
    named_feature(name, Value::Polygon(vec![exterior]))
}

// Markers are always emitted, valid or not.
fn marker_feature(position: usize, marker: &Marker, warnings: &mut Vec<CoordinateWarning>) -> Feature {
    let name = marker.display_name();
    let pair = RawPair {
        lat: &marker.lat,
        lng: &marker.lng,
    };
    let (coord, warning) = validate_coordinate(pair, &WarningContext::marker(position, name));
    warnings.extend(warning);
    named_feature(name, Value::from(&Point::from(coord)))
}

fn named_feature(name: &str, value: Value) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), JsonValue::from(name));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
