use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object { Object::new() }
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn arr_str(items: &[String]) -> Array {
    items.iter().map(|s| JsValue::from_str(s)).collect()
}
pub fn arr_f64(items: &[f64]) -> Array {
    items.iter().map(|v| JsValue::from_f64(*v)).collect()
}
/// `typeof v`, for error messages.
pub fn type_of(v: &JsValue) -> String {
    v.js_typeof().as_string().unwrap_or_else(|| "unknown".to_string())
}
