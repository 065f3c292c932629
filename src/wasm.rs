use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::converter::{convert_request, convert_str};
use crate::error::ConversionError;
use crate::model::{ConvertRequest, ErrorResponse};

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Converts a JSON request body and returns the JSON response body.
///
/// On failure the error value is the `{ "error": ... }` body as a string.
#[wasm_bindgen]
pub fn convert(request_json: &str) -> Result<String, JsValue> {
    convert_str(request_json)
        .and_then(|conversion| conversion.to_json(false))
        .map_err(|e| error_value(&e))
}

/// Same as [`convert`] but takes and returns plain JS objects.
#[wasm_bindgen(js_name = convertRequest)]
pub fn convert_request_value(request: JsValue) -> Result<JsValue, JsValue> {
    let request: ConvertRequest = serde_wasm_bindgen::from_value(request)
        .map_err(|e| error_value(&ConversionError::InvalidInput(e.to_string())))?;

    let conversion = convert_request(&request).map_err(|e| error_value(&e))?;

    // Plain objects rather than JS Maps for the GeoJSON properties.
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    conversion.serialize(&serializer).map_err(|e| {
        log::error!("Failed to serialize conversion: {}", e);
        error_value(&ConversionError::Internal(e.to_string()))
    })
}

fn error_value(err: &ConversionError) -> JsValue {
    let body = ErrorResponse::from(err);
    match serde_json::to_string(&body) {
        Ok(json) => JsValue::from_str(&json),
        Err(_) => JsValue::from_str(&body.error),
    }
}
