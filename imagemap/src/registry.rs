use crate::config::ResizeConfig;
use crate::controller::ResponsiveMap;
use crate::error::{ImageMapError, Result};
use crate::host::{Document, Host};
use crate::model::{MapKey, MapState, RegistryId, Signal, Target};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REGISTRY: AtomicU64 = AtomicU64::new(1);

/// Owns the responsive state of every attached map. Keys are stamped onto the map
/// element under this registry's id, so several registries can share a page.
pub struct MapRegistry<H: Host> {
    id: RegistryId,
    maps: HashMap<MapKey, ResponsiveMap<H>>,
    next_key: MapKey,
    config: ResizeConfig,
}

impl<H: Host> Default for MapRegistry<H> {
    fn default() -> Self { Self::new() }
}

/// Fails unless `node` is a `<map>` element.
pub fn check_map<D: Document>(doc: &D, node: &D::Node) -> Result<()> {
    match doc.tag_name(node) {
        None => Err(ImageMapError::InvalidTarget),
        Some(tag) if tag.eq_ignore_ascii_case("map") => Ok(()),
        Some(tag) => Err(ImageMapError::TypeMismatch { found: tag }),
    }
}

impl<H: Host> MapRegistry<H> {
    pub fn new() -> MapRegistry<H> {
        MapRegistry { id: NEXT_REGISTRY.fetch_add(1, Ordering::Relaxed), maps: HashMap::new(), next_key: 1, config: ResizeConfig::default() }
    }

    pub fn with_config(config: ResizeConfig) -> Result<MapRegistry<H>> {
        config.validate()?;
        Ok(MapRegistry { id: NEXT_REGISTRY.fetch_add(1, Ordering::Relaxed), maps: HashMap::new(), next_key: 1, config })
    }

    pub fn id(&self) -> RegistryId { self.id }
    pub fn config(&self) -> &ResizeConfig { &self.config }

    /// Applies to maps attached from now on.
    pub fn set_config(&mut self, config: ResizeConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Attach one map. Re-attaching an already managed map does not re-capture or
    /// re-subscribe; it runs one immediate recompute instead.
    pub fn attach(&mut self, host: &mut H, node: H::Node) -> Result<MapKey> {
        check_map(host, &node)?;
        if let Some(key) = host.map_key(&node, self.id) {
            if let Some(map) = self.maps.get_mut(&key) {
                map.recompute(host)?;
                return Ok(key);
            }
        }
        let key = self.next_key;
        let map = ResponsiveMap::attach(host, key, node.clone(), self.config.debounce_ms)?;
        self.next_key += 1;
        host.set_map_key(&node, self.id, key);
        self.maps.insert(key, map);
        Ok(key)
    }

    /// Attach every map a target resolves to; returns the keys attached by this call.
    pub fn attach_all(&mut self, host: &mut H, target: Target<H::Node>) -> Result<Vec<MapKey>> {
        let nodes = match target {
            Target::None => host.query(&self.config.default_selector)?,
            Target::Selector(sel) => host.query(&sel)?,
            Target::Direct(node) => vec![node],
        };
        let mut keys = Vec::with_capacity(nodes.len());
        for node in nodes {
            keys.push(self.attach(host, node)?);
        }
        Ok(keys)
    }

    pub fn recompute(&mut self, host: &mut H, key: MapKey) -> Result<bool> {
        self.map_mut(key)?.recompute(host)
    }

    pub fn schedule_recompute(&mut self, host: &mut H, key: MapKey) -> Result<()> {
        self.map_mut(key)?.schedule_recompute(host);
        Ok(())
    }

    /// Entry point for host events. Events for detached maps are dropped.
    pub fn on_signal(&mut self, host: &mut H, key: MapKey, signal: Signal) -> Result<()> {
        match self.maps.get_mut(&key) {
            Some(map) => map.on_signal(host, signal),
            None => Ok(()),
        }
    }

    /// Entry point for fired debounce timers.
    pub fn on_timer(&mut self, host: &mut H, key: MapKey, token: u64) -> Result<bool> {
        match self.maps.get_mut(&key) {
            Some(map) => map.on_timer(host, token),
            None => Ok(false),
        }
    }

    pub fn detach(&mut self, host: &mut H, key: MapKey) -> Result<()> {
        let map = self.maps.remove(&key).ok_or(ImageMapError::UnknownMap(key))?;
        map.detach(host);
        Ok(())
    }

    pub fn state(&self, key: MapKey) -> MapState {
        self.maps.get(&key).map_or(MapState::Unattached, |m| m.state())
    }

    pub fn get(&self, key: MapKey) -> Option<&ResponsiveMap<H>> { self.maps.get(&key) }

    pub fn keys(&self) -> Vec<MapKey> {
        let mut keys: Vec<MapKey> = self.maps.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize { self.maps.len() }
    pub fn is_empty(&self) -> bool { self.maps.is_empty() }

    fn map_mut(&mut self, key: MapKey) -> Result<&mut ResponsiveMap<H>> {
        self.maps.get_mut(&key).ok_or(ImageMapError::UnknownMap(key))
    }
}
