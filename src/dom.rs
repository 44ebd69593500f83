use crate::Shared;
use imagemap::{Document as MapDocument, ImageMapError, MapKey, MapRegistry, RegistryId, Signal, Signals, Size, Timers};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlImageElement, Window};

const KEY_ATTR: &str = "data-imagemap-key";

const NO_EVENTS: &[&str] = &[];
const LOAD_EVENTS: &[&str] = &["load"];
const FOCUS_EVENTS: &[&str] = &["focus"];
const RESIZE_EVENTS: &[&str] = &["resize"];
const DOCUMENT_EVENTS: &[&str] = &["readystatechange", "visibilitychange", "fullscreenchange"];

struct Listener {
    target: EventTarget,
    events: &'static [&'static str],
    closure: Closure<dyn FnMut(Event)>,
}

struct PendingTimer {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

/// `web_sys` implementation of the engine's host traits. Listener and timer
/// closures live here until unsubscribed, cancelled or fired.
pub struct DomHost {
    shared: Weak<RefCell<Shared>>,
    window: Window,
    document: Document,
    listeners: HashMap<u64, Listener>,
    timers: HashMap<u64, PendingTimer>,
    fired: Vec<u64>, // timer ids whose closure already ran; freed on next schedule
    next_id: u64,
    next_markup: u64,
}

impl DomHost {
    pub(crate) fn new(shared: Weak<RefCell<Shared>>, window: Window, document: Document) -> DomHost {
        DomHost {
            shared,
            window,
            document,
            listeners: HashMap::new(),
            timers: HashMap::new(),
            fired: Vec::new(),
            next_id: 1,
            next_markup: 1,
        }
    }

    pub(crate) fn document(&self) -> &Document { &self.document }

    pub(crate) fn next_markup_id(&mut self) -> u64 {
        let id = self.next_markup;
        self.next_markup += 1;
        id
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn areas(map: &JsValue) -> Vec<Element> {
        let Some(el) = map.dyn_ref::<Element>() else { return Vec::new() };
        let coll = el.get_elements_by_tag_name("area");
        (0..coll.length()).filter_map(|i| coll.item(i)).collect()
    }

    fn free_fired(&mut self) {
        for id in self.fired.drain(..) {
            self.timers.remove(&id);
        }
    }

    pub(crate) fn listener_count(&self) -> usize { self.listeners.len() }
}

// Listeners registered on window/document outlive this host unless removed;
// their closures would be invalidated once dropped here.
impl Drop for DomHost {
    fn drop(&mut self) {
        for (_, l) in self.listeners.drain() {
            for ev in l.events {
                let _ = l.target.remove_event_listener_with_callback(ev, l.closure.as_ref().unchecked_ref());
            }
        }
        for (_, t) in self.timers.drain() {
            self.window.clear_timeout_with_handle(t.handle);
        }
    }
}

/// Run `f` against the shared registry from an event or timer callback.
pub(crate) fn dispatch<F>(shared: &Weak<RefCell<Shared>>, f: F)
where
    F: FnOnce(&mut MapRegistry<DomHost>, &mut DomHost) -> imagemap::Result<()>,
{
    let Some(rc) = shared.upgrade() else { return };
    let Ok(mut guard) = rc.try_borrow_mut() else {
        tracing::warn!("event arrived during another image map operation, dropped");
        return;
    };
    let Shared { registry, host } = &mut *guard;
    if let Err(e) = f(registry, host) {
        tracing::error!(code = e.code(), "{}", e);
    }
}

/// Each registry stamps its own attribute, e.g. `data-imagemap-key-3`.
fn key_attr(registry: RegistryId) -> String {
    format!("{}-{}", KEY_ATTR, registry)
}

fn css_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

impl MapDocument for DomHost {
    type Node = JsValue;
    type Image = HtmlImageElement;

    fn query(&self, selector: &str) -> imagemap::Result<Vec<JsValue>> {
        let list = self.document.query_selector_all(selector).map_err(|e| ImageMapError::InvalidSelector {
            selector: selector.to_string(),
            reason: e
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
                .unwrap_or_else(|| "rejected by the document".into()),
        })?;
        Ok((0..list.length()).filter_map(|i| list.item(i)).map(JsValue::from).collect())
    }

    fn tag_name(&self, node: &JsValue) -> Option<String> {
        node.dyn_ref::<Element>().map(|e| e.tag_name())
    }

    fn map_name(&self, map: &JsValue) -> String {
        map.dyn_ref::<Element>().and_then(|e| e.get_attribute("name")).unwrap_or_default()
    }

    fn map_key(&self, map: &JsValue, registry: RegistryId) -> Option<MapKey> {
        map.dyn_ref::<Element>()
            .and_then(|e| e.get_attribute(&key_attr(registry)))
            .and_then(|v| v.parse().ok())
    }

    fn set_map_key(&mut self, map: &JsValue, registry: RegistryId, key: MapKey) {
        if let Some(e) = map.dyn_ref::<Element>() {
            let _ = e.set_attribute(&key_attr(registry), &key.to_string());
        }
    }

    fn area_coords(&self, map: &JsValue) -> Vec<String> {
        Self::areas(map).iter().map(|a| a.get_attribute("coords").unwrap_or_default()).collect()
    }

    fn set_area_coords(&mut self, map: &JsValue, index: usize, coords: &str) {
        if let Some(area) = Self::areas(map).get(index) {
            let _ = area.set_attribute("coords", coords);
        }
    }

    fn find_image(&self, name: &str) -> Option<HtmlImageElement> {
        let sel = format!("img[usemap=\"#{}\"]", css_string(name));
        self.document.query_selector(&sel).ok().flatten().and_then(|e| e.dyn_into::<HtmlImageElement>().ok())
    }

    fn displayed_size(&self, image: &HtmlImageElement) -> Size {
        Size::new(image.width() as f64, image.height() as f64)
    }

    fn natural_size(&self, image: &HtmlImageElement) -> Size {
        Size::new(image.natural_width() as f64, image.natural_height() as f64)
    }
}

impl Signals for DomHost {
    type Subscription = u64;

    fn subscribe(&mut self, key: MapKey, signal: Signal, image: Option<&HtmlImageElement>) -> u64 {
        let (target, events): (EventTarget, &'static [&'static str]) = match (signal, image) {
            (Signal::ImageLoad, Some(img)) => (EventTarget::from(img.clone()), LOAD_EVENTS),
            (Signal::ImageLoad, None) => (EventTarget::from(self.window.clone()), NO_EVENTS),
            (Signal::WindowFocus, _) => (EventTarget::from(self.window.clone()), FOCUS_EVENTS),
            (Signal::WindowResize, _) => (EventTarget::from(self.window.clone()), RESIZE_EVENTS),
            (Signal::DocumentChange, _) => (EventTarget::from(self.document.clone()), DOCUMENT_EVENTS),
        };
        let shared = self.shared.clone();
        let closure = Closure::wrap(Box::new(move |_e: Event| {
            dispatch(&shared, |reg, host| reg.on_signal(host, key, signal));
        }) as Box<dyn FnMut(Event)>);
        for ev in events {
            if target.add_event_listener_with_callback(ev, closure.as_ref().unchecked_ref()).is_err() {
                tracing::warn!(key, event = *ev, "addEventListener failed");
            }
        }
        let id = self.take_id();
        self.listeners.insert(id, Listener { target, events, closure });
        id
    }

    fn unsubscribe(&mut self, subscription: u64) {
        if let Some(l) = self.listeners.remove(&subscription) {
            for ev in l.events {
                let _ = l.target.remove_event_listener_with_callback(ev, l.closure.as_ref().unchecked_ref());
            }
        }
    }
}

impl Timers for DomHost {
    type TimerHandle = u64;

    fn schedule(&mut self, key: MapKey, token: u64, delay_ms: u32) -> u64 {
        self.free_fired();
        let id = self.take_id();
        let shared = self.shared.clone();
        let closure = Closure::wrap(Box::new(move || {
            dispatch(&shared, |reg, host| {
                host.fired.push(id);
                reg.on_timer(host, key, token).map(|_| ())
            });
        }) as Box<dyn FnMut()>);
        match self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms as i32,
        ) {
            Ok(handle) => {
                self.timers.insert(id, PendingTimer { handle, _closure: closure });
            }
            Err(_) => tracing::error!(key, "setTimeout failed, resize not rescheduled"),
        }
        id
    }

    fn cancel(&mut self, handle: u64) {
        if let Some(t) = self.timers.remove(&handle) {
            self.window.clear_timeout_with_handle(t.handle);
        }
    }
}
