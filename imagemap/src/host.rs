//! Seams between the resize engine and the page it runs in.
//!
//! The engine only talks to these traits; `imagemap-wasm` implements them over
//! `web_sys`, tests implement them in memory.

use crate::error::Result;
use crate::model::{MapKey, RegistryId, Signal, Size};

pub trait Document {
    /// Handle to any node a caller may pass as a target.
    type Node: Clone;
    type Image: Clone;

    /// Err(InvalidSelector) when the document cannot parse `selector`.
    fn query(&self, selector: &str) -> Result<Vec<Self::Node>>;
    /// None when the node is not an element at all.
    fn tag_name(&self, node: &Self::Node) -> Option<String>;
    fn map_name(&self, map: &Self::Node) -> String;
    /// Key previously stamped onto a map by `set_map_key` for the same registry.
    /// Stamps of other registries must not be visible here.
    fn map_key(&self, map: &Self::Node, registry: RegistryId) -> Option<MapKey>;
    fn set_map_key(&mut self, map: &Self::Node, registry: RegistryId, key: MapKey);
    /// Raw `coords` attribute of every area in the map, in document order.
    fn area_coords(&self, map: &Self::Node) -> Vec<String>;
    fn set_area_coords(&mut self, map: &Self::Node, index: usize, coords: &str);
    /// The image whose `usemap` is `#name`.
    fn find_image(&self, name: &str) -> Option<Self::Image>;
    fn displayed_size(&self, image: &Self::Image) -> Size;
    fn natural_size(&self, image: &Self::Image) -> Size;
}

/// Event subscriptions. Fired events are routed by the host to
/// `MapRegistry::on_signal(key, signal)`.
pub trait Signals: Document {
    type Subscription;

    /// `image` is Some only for `Signal::ImageLoad`.
    fn subscribe(&mut self, key: MapKey, signal: Signal, image: Option<&Self::Image>) -> Self::Subscription;
    fn unsubscribe(&mut self, subscription: Self::Subscription);
}

/// One-shot timers. A fired timer is routed to `MapRegistry::on_timer(key, token)`.
pub trait Timers {
    type TimerHandle;

    fn schedule(&mut self, key: MapKey, token: u64, delay_ms: u32) -> Self::TimerHandle;
    fn cancel(&mut self, handle: Self::TimerHandle);
}

pub trait Host: Signals + Timers {}

impl<T: Signals + Timers> Host for T {}
