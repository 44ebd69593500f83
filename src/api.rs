use crate::error;
use crate::interop::{arr_f64, arr_str, type_of};
use crate::{ImageMaps, Shared};
use imagemap::{ImageMapError, LabelResponse, MapKey, ResizeConfig, Signal, Target};
use js_sys::Array;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Route engine logs to the browser console. `level`: trace|debug|info|warn|error.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) -> bool {
    crate::logging::init(level.as_deref())
}

thread_local! {
    static PAGE: RefCell<Option<Rc<RefCell<Shared>>>> = const { RefCell::new(None) };
}

/// Make every map matched by `target` responsive on the page-wide instance.
/// `target` is undefined (all `<map>`s), a selector string, or a `<map>` element.
#[wasm_bindgen(js_name = imageMapResize)]
pub fn image_map_resize(target: JsValue) -> Result<Array, JsValue> {
    let inner = PAGE.with(|p| -> Result<Rc<RefCell<Shared>>, JsValue> {
        let mut slot = p.borrow_mut();
        if let Some(inner) = slot.as_ref() {
            return Ok(inner.clone());
        }
        let maps = ImageMaps::rs_new(ResizeConfig::default())?;
        *slot = Some(maps.inner.clone());
        Ok(maps.inner)
    })?;
    ImageMaps { inner }.attach_all(target)
}

fn classify(target: &JsValue) -> Result<Option<Target<JsValue>>, ImageMapError> {
    if target.is_undefined() {
        Ok(Some(Target::None))
    } else if let Some(sel) = target.as_string() {
        Ok(Some(if sel.is_empty() { Target::None } else { Target::Selector(sel) }))
    } else if target.is_null() {
        Ok(None) // typeof null is "object": accepted, nothing to attach
    } else if target.is_object() {
        Ok(Some(Target::Direct(target.clone())))
    } else {
        Err(ImageMapError::UnsupportedTargetType { found: type_of(target) })
    }
}

fn parse_config(config: JsValue) -> Result<ResizeConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(ResizeConfig::default());
    }
    let cfg: ResizeConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| error::to_throw(&ImageMapError::InvalidConfig(e.to_string())))?;
    cfg.validate().map_err(|e| error::to_throw(&e))?;
    Ok(cfg)
}

fn parse_labels(labels: JsValue) -> Result<LabelResponse, ImageMapError> {
    if let Some(text) = labels.as_string() {
        return LabelResponse::parse(&text);
    }
    let v: serde_json::Value = serde_wasm_bindgen::from_value(labels)
        .map_err(|e| ImageMapError::InvalidConfig(format!("labels: {}", e)))?;
    LabelResponse::from_json_value(v)
}

impl ImageMaps {
    fn attach_keys(&self, target: JsValue) -> Result<Vec<MapKey>, ImageMapError> {
        let Some(target) = classify(&target)? else { return Ok(Vec::new()) };
        let mut s = self.inner.borrow_mut();
        let Shared { registry, host } = &mut *s;
        registry.attach_all(host, target)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapInfo {
    key: MapKey,
    name: String,
    state: &'static str,
    regions: usize,
    passes: u64,
    reference_coords: Vec<String>,
    subscribed: Vec<Signal>,
}

#[wasm_bindgen]
impl ImageMaps {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ImageMaps, JsValue> {
        ImageMaps::rs_new(parse_config(config)?)
    }

    pub fn configure(&self, config: JsValue) -> Result<(), JsValue> {
        let cfg = parse_config(config)?;
        self.inner.borrow_mut().registry.set_config(cfg).map_err(|e| error::to_throw(&e))
    }

    /// Attach one `<map>` element; returns its key.
    pub fn attach(&self, map: JsValue) -> Result<f64, JsValue> {
        let mut s = self.inner.borrow_mut();
        let Shared { registry, host } = &mut *s;
        registry.attach(host, map).map(|k| k as f64).map_err(|e| error::to_throw(&e))
    }

    /// Attach every map `target` resolves to; returns the `<map>` elements attached.
    pub fn attach_all(&self, target: JsValue) -> Result<Array, JsValue> {
        let keys = self.attach_keys(target).map_err(|e| error::to_throw(&e))?;
        let s = self.inner.borrow();
        Ok(keys.iter().filter_map(|k| s.registry.get(*k)).map(|m| m.node().clone()).collect())
    }

    pub fn attach_all_res(&self, target: JsValue) -> JsValue {
        match self.attach_keys(target) {
            Ok(keys) => error::ok(arr_f64(&keys.iter().map(|k| *k as f64).collect::<Vec<_>>()).into()),
            Err(e) => error::from_core(&e),
        }
    }

    pub fn recompute(&self, key: f64) -> Result<bool, JsValue> {
        let mut s = self.inner.borrow_mut();
        let Shared { registry, host } = &mut *s;
        registry.recompute(host, key as MapKey).map_err(|e| error::to_throw(&e))
    }

    pub fn recompute_res(&self, key: f64) -> JsValue {
        let mut s = self.inner.borrow_mut();
        let Shared { registry, host } = &mut *s;
        match registry.recompute(host, key as MapKey) {
            Ok(ran) => error::ok(JsValue::from_bool(ran)),
            Err(e) => error::from_core(&e),
        }
    }

    pub fn schedule_recompute(&self, key: f64) -> Result<(), JsValue> {
        let mut s = self.inner.borrow_mut();
        let Shared { registry, host } = &mut *s;
        registry.schedule_recompute(host, key as MapKey).map_err(|e| error::to_throw(&e))
    }

    pub fn detach(&self, key: f64) -> Result<(), JsValue> {
        let mut s = self.inner.borrow_mut();
        let Shared { registry, host } = &mut *s;
        registry.detach(host, key as MapKey).map_err(|e| error::to_throw(&e))
    }

    pub fn state(&self, key: f64) -> String {
        self.inner.borrow().registry.state(key as MapKey).as_str().to_string()
    }

    pub fn keys(&self) -> Array {
        let keys: Vec<f64> = self.inner.borrow().registry.keys().iter().map(|k| *k as f64).collect();
        arr_f64(&keys)
    }

    pub fn reference_coords(&self, key: f64) -> JsValue {
        match self.inner.borrow().registry.get(key as MapKey) {
            Some(m) => arr_str(m.geometry().reference_coords()).into(),
            None => JsValue::NULL,
        }
    }

    pub fn describe(&self, key: f64) -> JsValue {
        let s = self.inner.borrow();
        let Some(m) = s.registry.get(key as MapKey) else { return JsValue::NULL };
        let info = MapInfo {
            key: m.key(),
            name: m.name().to_string(),
            state: m.state().as_str(),
            regions: m.geometry().len(),
            passes: m.passes(),
            reference_coords: m.geometry().reference_coords().to_vec(),
            subscribed: m.subscribed(),
        };
        serde_wasm_bindgen::to_value(&info).unwrap_or(JsValue::NULL)
    }

    pub fn listener_count(&self) -> u32 { self.inner.borrow().host.listener_count() as u32 }

    /// Insert a map for the label-source result `labels` (JSON text or object) next
    /// to `img` and make it responsive. Returns the key, or null for no labels.
    pub fn create_image_map(&self, img: HtmlImageElement, labels: JsValue) -> Result<JsValue, JsValue> {
        let labels = parse_labels(labels).map_err(|e| error::to_throw(&e))?;
        let mut s = self.inner.borrow_mut();
        let Shared { registry, host } = &mut *s;
        let Some(map) = crate::markup::insert_map(host, &img, &labels)? else { return Ok(JsValue::NULL) };
        let key = registry.attach(host, map.into()).map_err(|e| error::to_throw(&e))?;
        Ok(JsValue::from_f64(key as f64))
    }
}
