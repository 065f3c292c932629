use geo_types::Coord;
use log::warn;
use serde_json::Value;

use crate::model::{CoordinateWarning, WarningIssue};

/// Recognised `(latitude, longitude)` field names, in priority order.
/// The first pair fully present on a point wins.
pub const FIELD_PAIRS: [(&str, &str); 4] = [
    ("lat", "long"),
    ("lat", "lng"),
    ("latitude", "longitude"),
    ("lat", "lon"),
];

const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;

/// The raw values of the first matching field pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPair<'a> {
    pub lat: &'a Value,
    pub lng: &'a Value,
}

pub fn extract_pair(point: &Value) -> Option<RawPair<'_>> {
    let fields = point.as_object()?;
    FIELD_PAIRS.iter().find_map(|(lat_key, lng_key)| {
        Some(RawPair {
            lat: fields.get(*lat_key)?,
            lng: fields.get(*lng_key)?,
        })
    })
}

/// Numbers and numeric text coerce; everything else, and any non-finite
/// result, does not.
pub fn coerce(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let text = s.trim();
            if text.is_empty() {
                None
            } else {
                text.parse::<f64>().ok()
            }
        }
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Where a coordinate came from, for warning attribution.
#[derive(Debug, Clone, Copy)]
pub struct WarningContext<'a> {
    pub feature_index: i64,
    pub feature_name: &'a str,
    pub coordinate_index: i64,
    marker: bool,
}

impl<'a> WarningContext<'a> {
    pub fn feature(feature_index: usize, feature_name: &'a str, coordinate_index: usize) -> Self {
        Self {
            feature_index: feature_index as i64,
            feature_name,
            coordinate_index: coordinate_index as i64,
            marker: false,
        }
    }

    /// Markers are not positional features and always use index -1.
    pub fn marker(position: usize, name: &'a str) -> Self {
        Self {
            feature_index: -1,
            feature_name: name,
            coordinate_index: position as i64,
            marker: true,
        }
    }

    /// A problem with the feature as a whole rather than one of its points.
    pub fn whole_feature(feature_index: usize, feature_name: &'a str) -> Self {
        Self {
            feature_index: feature_index as i64,
            feature_name,
            coordinate_index: -1,
            marker: false,
        }
    }

    pub fn warning(&self, issue: WarningIssue, coordinate: Coord<f64>, message: String) -> CoordinateWarning {
        warn!("{}", message);
        CoordinateWarning {
            feature_index: self.feature_index,
            feature_name: self.feature_name.to_string(),
            coordinate_index: self.coordinate_index,
            coordinate: [coordinate.x, coordinate.y],
            issue,
            message,
        }
    }

    fn location(&self) -> String {
        if self.marker {
            format!("marker \"{}\"", self.feature_name)
        } else {
            format!("coordinate {} of \"{}\"", self.coordinate_index, self.feature_name)
        }
    }
}

/// Maps a raw pair to `(lng, lat)` and checks it.
///
/// Never fails. Components that do not coerce become 0; components that
/// coerce but fall outside the valid range are passed through unchanged.
/// Classification precedence is both > latitude > longitude, applied first
/// to coercion and then, only if both coerce, to the range check.
pub fn validate_coordinate(
    pair: RawPair<'_>,
    ctx: &WarningContext<'_>,
) -> (Coord<f64>, Option<CoordinateWarning>) {
    let lat = coerce(pair.lat);
    let lng = coerce(pair.lng);
    let coord = Coord {
        x: lng.unwrap_or(0.0),
        y: lat.unwrap_or(0.0),
    };

    let issue = match (lat, lng) {
        (None, None) => WarningIssue::BothInvalid,
        (None, Some(_)) => WarningIssue::InvalidLatitude,
        (Some(_), None) => WarningIssue::InvalidLongitude,
        (Some(lat), Some(lng)) => match (in_range(lat, MAX_LATITUDE), in_range(lng, MAX_LONGITUDE)) {
            (true, true) => return (coord, None),
            (false, false) => WarningIssue::BothInvalid,
            (false, true) => WarningIssue::InvalidLatitude,
            (true, false) => WarningIssue::InvalidLongitude,
        },
    };

    let message = match issue {
        WarningIssue::BothInvalid => format!(
            "Invalid latitude {} and longitude {} at {}: latitude must be a number between -90 and 90, longitude between -180 and 180",
            describe(pair.lat),
            describe(pair.lng),
            ctx.location()
        ),
        WarningIssue::InvalidLatitude => format!(
            "Invalid latitude {} at {}: must be a number between -90 and 90",
            describe(pair.lat),
            ctx.location()
        ),
        _ => format!(
            "Invalid longitude {} at {}: must be a number between -180 and 180",
            describe(pair.lng),
            ctx.location()
        ),
    };

    (coord, Some(ctx.warning(issue, coord, message)))
}

fn in_range(value: f64, max: f64) -> bool {
    (-max..=max).contains(&value)
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    }
}
