use crate::interop::{new_obj, set_kv};
use imagemap::ImageMapError;
use wasm_bindgen::prelude::*;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

/// Envelope for a core error, carrying its structured fields as `data`.
pub fn from_core(e: &ImageMapError) -> JsValue {
    let d = new_obj();
    let data = match e {
        ImageMapError::TypeMismatch { found } | ImageMapError::UnsupportedTargetType { found } => {
            set_kv(&d, "found", &JsValue::from_str(found));
            Some(d.into())
        }
        ImageMapError::InvalidCoordinate { region, index, token } => {
            set_kv(&d, "region", &JsValue::from_f64(*region as f64));
            set_kv(&d, "index", &JsValue::from_f64(*index as f64));
            set_kv(&d, "token", &JsValue::from_str(token));
            Some(d.into())
        }
        ImageMapError::TooManyCoordinates { region, count, max } => {
            set_kv(&d, "region", &JsValue::from_f64(*region as f64));
            set_kv(&d, "count", &JsValue::from_f64(*count as f64));
            set_kv(&d, "max", &JsValue::from_f64(*max as f64));
            Some(d.into())
        }
        ImageMapError::InvalidSelector { selector, reason } => {
            set_kv(&d, "selector", &JsValue::from_str(selector));
            set_kv(&d, "reason", &JsValue::from_str(reason));
            Some(d.into())
        }
        ImageMapError::UnknownMap(key) => {
            set_kv(&d, "key", &JsValue::from_f64(*key as f64));
            Some(d.into())
        }
        _ => None,
    };
    err(e.code(), e.to_string(), data)
}

/// Thrown form: a `TypeError` for wrong targets, a plain `Error` otherwise.
pub fn to_throw(e: &ImageMapError) -> JsValue {
    if e.is_type_error() {
        js_sys::TypeError::new(&e.to_string()).into()
    } else {
        let ex = js_sys::Error::new(&e.to_string());
        set_kv(&ex, "code", &JsValue::from_str(e.code()));
        ex.into()
    }
}
