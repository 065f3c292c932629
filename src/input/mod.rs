pub mod shape;


pub use shape::{collect_entries, detect_shape, Shape, StationEntry, AREA_LIST_KEY};
