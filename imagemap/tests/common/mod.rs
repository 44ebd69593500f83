#![allow(dead_code)]

use imagemap::{Document, ImageMapError, MapKey, MapMarkup, MapRegistry, RegistryId, Signal, Signals, Size, Timers};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Node {
    Text,
    Element(usize),
}

pub struct Element {
    pub tag: String,
    pub name: String,
    pub areas: Vec<String>,
    pub keys: HashMap<RegistryId, MapKey>,
}

pub struct Image {
    pub usemap: String,
    pub displayed: Size,
    pub natural: Size,
}

pub struct Sub {
    pub key: MapKey,
    pub signal: Signal,
    pub image: Option<usize>,
    pub active: bool,
}

pub struct Timer {
    pub key: MapKey,
    pub token: u64,
    pub due: u64,
    pub live: bool,
}

/// In-memory page: elements, images, listeners and a manual clock.
#[derive(Default)]
pub struct FakePage {
    pub elements: Vec<Element>,
    pub images: Vec<Image>,
    pub subs: Vec<Sub>,
    pub timers: Vec<Timer>,
    pub now: u64,
    pub writes: usize,
    pub honor_cancel: bool,
}

impl FakePage {
    pub fn new() -> FakePage { FakePage { honor_cancel: true, ..Default::default() } }

    pub fn add_element(&mut self, tag: &str) -> Node {
        self.elements.push(Element { tag: tag.into(), name: String::new(), areas: Vec::new(), keys: HashMap::new() });
        Node::Element(self.elements.len() - 1)
    }

    pub fn add_map(&mut self, name: &str, areas: &[&str]) -> Node {
        self.elements.push(Element {
            tag: "MAP".into(),
            name: name.into(),
            areas: areas.iter().map(|s| s.to_string()).collect(),
            keys: HashMap::new(),
        });
        Node::Element(self.elements.len() - 1)
    }

    pub fn add_markup(&mut self, markup: &MapMarkup) -> Node {
        let areas: Vec<String> = markup.areas.iter().map(|a| a.coords.clone()).collect();
        let refs: Vec<&str> = areas.iter().map(|s| s.as_str()).collect();
        self.add_map(&markup.name, &refs)
    }

    /// Image using `#name`, displayed at `displayed` with intrinsic size `natural`.
    pub fn add_image(&mut self, name: &str, displayed: (f64, f64), natural: (f64, f64)) -> usize {
        self.images.push(Image {
            usemap: format!("#{}", name),
            displayed: Size::new(displayed.0, displayed.1),
            natural: Size::new(natural.0, natural.1),
        });
        self.images.len() - 1
    }

    pub fn resize_image(&mut self, image: usize, w: f64, h: f64) {
        self.images[image].displayed = Size::new(w, h);
    }

    pub fn coords(&self, node: Node) -> Vec<String> {
        match node {
            Node::Element(i) => self.elements[i].areas.clone(),
            Node::Text => Vec::new(),
        }
    }

    pub fn active_subs(&self, key: MapKey) -> Vec<Signal> {
        self.subs.iter().filter(|s| s.active && s.key == key).map(|s| s.signal).collect()
    }

    pub fn live_timers(&self) -> usize { self.timers.iter().filter(|t| t.live).count() }
}

impl Document for FakePage {
    type Node = Node;
    type Image = usize;

    /// Selectors are bare tag names; anything else is a syntax error.
    fn query(&self, selector: &str) -> imagemap::Result<Vec<Node>> {
        if selector.is_empty() || !selector.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ImageMapError::InvalidSelector { selector: selector.into(), reason: "not a tag name".into() });
        }
        Ok(self
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.tag.eq_ignore_ascii_case(selector))
            .map(|(i, _)| Node::Element(i))
            .collect())
    }

    fn tag_name(&self, node: &Node) -> Option<String> {
        match node {
            Node::Text => None,
            Node::Element(i) => Some(self.elements[*i].tag.clone()),
        }
    }

    fn map_name(&self, map: &Node) -> String {
        match map {
            Node::Element(i) => self.elements[*i].name.clone(),
            Node::Text => String::new(),
        }
    }

    fn map_key(&self, map: &Node, registry: RegistryId) -> Option<MapKey> {
        match map {
            Node::Element(i) => self.elements[*i].keys.get(&registry).copied(),
            Node::Text => None,
        }
    }

    fn set_map_key(&mut self, map: &Node, registry: RegistryId, key: MapKey) {
        if let Node::Element(i) = map { self.elements[*i].keys.insert(registry, key); }
    }

    fn area_coords(&self, map: &Node) -> Vec<String> { self.coords(*map) }

    fn set_area_coords(&mut self, map: &Node, index: usize, coords: &str) {
        if let Node::Element(i) = map {
            if let Some(slot) = self.elements[*i].areas.get_mut(index) {
                *slot = coords.to_string();
                self.writes += 1;
            }
        }
    }

    fn find_image(&self, name: &str) -> Option<usize> {
        let usemap = format!("#{}", name);
        self.images.iter().position(|img| img.usemap == usemap)
    }

    fn displayed_size(&self, image: &usize) -> Size { self.images[*image].displayed }
    fn natural_size(&self, image: &usize) -> Size { self.images[*image].natural }
}

impl Signals for FakePage {
    type Subscription = usize;

    fn subscribe(&mut self, key: MapKey, signal: Signal, image: Option<&usize>) -> usize {
        self.subs.push(Sub { key, signal, image: image.copied(), active: true });
        self.subs.len() - 1
    }

    fn unsubscribe(&mut self, subscription: usize) {
        self.subs[subscription].active = false;
    }
}

impl Timers for FakePage {
    type TimerHandle = usize;

    fn schedule(&mut self, key: MapKey, token: u64, delay_ms: u32) -> usize {
        self.timers.push(Timer { key, token, due: self.now + delay_ms as u64, live: true });
        self.timers.len() - 1
    }

    fn cancel(&mut self, handle: usize) {
        if self.honor_cancel { self.timers[handle].live = false; }
    }
}

/// Dispatch `signal` to every live listener, like the browser would.
pub fn fire(reg: &mut MapRegistry<FakePage>, page: &mut FakePage, signal: Signal) {
    let targets: Vec<MapKey> = page.subs.iter().filter(|s| s.active && s.signal == signal).map(|s| s.key).collect();
    for key in targets {
        reg.on_signal(page, key, signal).unwrap();
    }
}

/// Advance the clock, firing due timers in schedule order.
pub fn advance(reg: &mut MapRegistry<FakePage>, page: &mut FakePage, ms: u64) {
    page.now += ms;
    let now = page.now;
    let due: Vec<(usize, MapKey, u64)> = page
        .timers
        .iter()
        .enumerate()
        .filter(|(_, t)| t.live && t.due <= now)
        .map(|(i, t)| (i, t.key, t.token))
        .collect();
    for (i, key, token) in due {
        page.timers[i].live = false;
        reg.on_timer(page, key, token).unwrap();
    }
}
