use imagemap::MapRegistry;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
mod api;
mod dom;
mod error;
mod interop;
mod logging;
mod markup;

pub(crate) struct Shared {
    pub(crate) registry: MapRegistry<dom::DomHost>,
    pub(crate) host: dom::DomHost,
}

/// Responsive image maps bound to the current page.
#[wasm_bindgen]
pub struct ImageMaps { pub(crate) inner: Rc<RefCell<Shared>> }

impl ImageMaps {
    pub fn rs_new(config: imagemap::ResizeConfig) -> Result<ImageMaps, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("window has no document"))?;
        let registry = MapRegistry::with_config(config).map_err(|e| error::to_throw(&e))?;
        let inner = Rc::new_cyclic(|weak| {
            RefCell::new(Shared { registry, host: dom::DomHost::new(weak.clone(), window, document) })
        });
        Ok(ImageMaps { inner })
    }
}
