pub mod converter;
pub mod error;
pub mod gpx_types;
pub mod html;
pub mod interpolate;
pub mod options;
pub mod parser;
pub mod xml;

use wasm_bindgen::prelude::*;

use crate::options::RenderOptions;

/// Convert a GPX string to its `{lat, lon, hike}` rows, returned as a JS array.
#[wasm_bindgen(js_name = gpxToRows)]
pub fn gpx_to_rows(gpx_string: &str, options: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let rows = converter::rows_from_str(gpx_string, "input", &opts)?;
    serde_wasm_bindgen::to_value(rows.rows()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert a GPX string to one GeoJSON feature per track, returned as a JS object.
#[wasm_bindgen(js_name = gpxToGeoJson)]
pub fn gpx_to_geojson(gpx_string: &str, options: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let rows = converter::rows_from_str(gpx_string, "input", &opts)?;
    let fc = converter::to_feature_collection(&rows);
    serde_wasm_bindgen::to_value(&fc).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert a GPX string to one GeoJSON feature per track, returned as a JSON string.
#[wasm_bindgen(js_name = gpxToGeoJsonString)]
pub fn gpx_to_geojson_string(gpx_string: &str, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let rows = converter::rows_from_str(gpx_string, "input", &opts)?;
    let fc = converter::to_feature_collection(&rows);
    serde_json::to_string(&fc).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_options(options: JsValue) -> Result<RenderOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(RenderOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
