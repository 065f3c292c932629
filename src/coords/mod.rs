pub mod normalize;
pub mod polygon;
pub mod ring;


pub use normalize::{coerce, extract_pair, validate_coordinate, RawPair, WarningContext, FIELD_PAIRS};
pub use polygon::{resolve_polygon, PolygonOutcome, SkipReason};
pub use ring::{close_ring, is_closed};
