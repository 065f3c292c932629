pub mod converter;
pub mod coords;
pub mod error;
pub mod input;
pub mod model;
pub mod wasm;

#[cfg(test)]
mod converter_tests;

pub use converter::{convert_request, convert_str, Converter};
pub use error::{ConversionError, Result};
pub use input::Shape;
pub use model::{
    Conversion, ConvertOptions, ConvertRequest, CoordinateWarning, ErrorResponse, Marker, WarningIssue,
    DOWNLOAD_FILENAME,
};
