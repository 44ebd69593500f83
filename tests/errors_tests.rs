#![cfg(target_arch = "wasm32")]

use imagemap_wasm::ImageMaps;
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn is_err(v: &JsValue, code: &str) -> bool {
    if let Ok(ok) =
        Reflect::get(v, &JsValue::from_str("ok")).and_then(|x| x.as_bool().ok_or(JsValue::NULL))
    {
        if ok {
            return false;
        }
        if let Ok(err) = Reflect::get(v, &JsValue::from_str("error")) {
            if let Ok(c) = Reflect::get(&err, &JsValue::from_str("code")) {
                return c.as_string().map_or(false, |s| s == code);
            }
        }
    }
    false
}

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn unsupported_target_types_throw_type_error() {
    let maps = ImageMaps::new(JsValue::UNDEFINED).unwrap();
    let e = maps.attach_all(JsValue::from_f64(3.0)).unwrap_err();
    assert!(e.is_instance_of::<js_sys::TypeError>());
    let msg = e.unchecked_into::<js_sys::Error>().message().as_string().unwrap();
    assert_eq!(msg, "unexpected data type (number)");
    assert!(is_err(&maps.attach_all_res(JsValue::from_bool(true)), "unsupported_target_type"));
}

#[wasm_bindgen_test]
fn non_elements_and_wrong_tags_are_rejected() {
    let maps = ImageMaps::new(JsValue::UNDEFINED).unwrap();
    let plain = js_sys::Object::new();
    assert!(is_err(&maps.attach_all_res(plain.into()), "invalid_target"));

    let div = document().create_element("div").unwrap();
    let r = maps.attach_all_res(div.clone().into());
    assert!(is_err(&r, "type_mismatch"));
    let data = Reflect::get(&Reflect::get(&r, &JsValue::from_str("error")).unwrap(), &JsValue::from_str("data")).unwrap();
    let found = Reflect::get(&data, &JsValue::from_str("found")).unwrap().as_string().unwrap();
    assert_eq!(found, "DIV");
    assert!(maps.attach(div.into()).unwrap_err().is_instance_of::<js_sys::TypeError>());
}

#[wasm_bindgen_test]
fn empty_selector_match_is_not_an_error() {
    let maps = ImageMaps::new(JsValue::UNDEFINED).unwrap();
    let out = maps.attach_all(JsValue::from_str("no-such-selector")).unwrap();
    assert_eq!(out.length(), 0);
    let out = maps.attach_all(JsValue::NULL).unwrap();
    assert_eq!(out.length(), 0);
}

#[wasm_bindgen_test]
fn unknown_keys_and_bad_config() {
    let maps = ImageMaps::new(JsValue::UNDEFINED).unwrap();
    assert!(is_err(&maps.recompute_res(424242.0), "unknown_map"));
    assert_eq!(maps.state(424242.0), "unattached");
    assert!(maps.reference_coords(424242.0).is_null());

    let cfg = js_sys::Object::new();
    Reflect::set(&cfg, &JsValue::from_str("debounceMs"), &JsValue::from_f64(1e7)).unwrap();
    assert!(ImageMaps::new(cfg.into()).is_err());
}

#[wasm_bindgen_test]
fn malformed_coords_fail_fast() {
    let doc = document();
    let map = doc.create_element("map").unwrap();
    map.set_attribute("name", "broken").unwrap();
    let area = doc.create_element("area").unwrap();
    area.set_attribute("coords", "1,x,3,4").unwrap();
    map.append_child(&area).unwrap();
    doc.body().unwrap().append_child(&map).unwrap();

    let maps = ImageMaps::new(JsValue::UNDEFINED).unwrap();
    let r = maps.attach_all_res(map.clone().into());
    assert!(is_err(&r, "invalid_coordinate"));
    assert_eq!(maps.listener_count(), 0);
    map.remove();
}

#[wasm_bindgen_test]
fn bad_selector_is_reported() {
    let maps = ImageMaps::new(JsValue::UNDEFINED).unwrap();
    let r = maps.attach_all_res(JsValue::from_str("[["));
    assert!(is_err(&r, "invalid_selector"));
    let data = Reflect::get(&Reflect::get(&r, &JsValue::from_str("error")).unwrap(), &JsValue::from_str("data")).unwrap();
    let sel = Reflect::get(&data, &JsValue::from_str("selector")).unwrap().as_string().unwrap();
    assert_eq!(sel, "[[");

    let e = maps.attach_all(JsValue::from_str("[[")).unwrap_err();
    assert!(!e.is_instance_of::<js_sys::TypeError>());
    let code = Reflect::get(&e, &JsValue::from_str("code")).unwrap().as_string().unwrap();
    assert_eq!(code, "invalid_selector");
}
