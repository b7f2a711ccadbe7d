use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn resolve_attributes(json: &str) -> Result<String, JsValue> {
    crate::resolve_json(json).map_err(|e| JsValue::from_str(&e.to_string()))
}
