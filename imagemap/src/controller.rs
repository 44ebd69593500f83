use crate::error::Result;
use crate::host::{Document, Host, Signals, Timers};
use crate::model::{MapKey, MapState, ScaleFactors, Signal};
use crate::store::GeometryStore;

struct Pending<T> {
    token: u64,
    handle: T,
}

/// Responsive behaviour of one attached map: reference capture, scaling passes,
/// debounced rescheduling and its event subscriptions.
pub struct ResponsiveMap<H: Host> {
    key: MapKey,
    name: String,
    node: H::Node,
    image: Option<H::Image>,
    store: GeometryStore,
    subscriptions: Vec<(Signal, H::Subscription)>,
    pending: Option<Pending<H::TimerHandle>>,
    next_token: u64,
    debounce_ms: u32,
    settled: bool, // an event or explicit recompute has been handled since attach
    passes: u64,
}

impl<H: Host> ResponsiveMap<H> {
    /// Capture reference geometry, subscribe, and run the initial pass when the
    /// image is already displayed at a size other than its intrinsic one.
    /// The node must already be known to be a map element.
    pub(crate) fn attach(host: &mut H, key: MapKey, node: H::Node, debounce_ms: u32) -> Result<ResponsiveMap<H>> {
        let name = host.map_name(&node);
        let image = host.find_image(&name);
        let reference_size = image.as_ref().map(|img| host.natural_size(img));
        let store = GeometryStore::capture(host.area_coords(&node), reference_size);
        // Reject malformed coords before any subscription exists.
        store.scale_all(ScaleFactors::IDENTITY)?;

        let mut map = ResponsiveMap {
            key,
            name,
            node,
            image: None,
            store,
            subscriptions: Vec::with_capacity(4),
            pending: None,
            next_token: 1,
            debounce_ms,
            settled: false,
            passes: 0,
        };
        if let Some(img) = image {
            map.bind_image(host, img);
        } else {
            tracing::warn!(key, name = %map.name, "no image uses this map yet");
        }
        for signal in Signal::WINDOW {
            let sub = host.subscribe(key, signal, None);
            map.subscriptions.push((signal, sub));
        }
        let rescaled = map.image.as_ref().map_or(false, |img| host.displayed_size(img) != host.natural_size(img));
        if rescaled {
            map.run_pass(host)?;
        }
        tracing::debug!(key, name = %map.name, regions = map.store.len(), "map attached");
        Ok(map)
    }

    fn bind_image(&mut self, host: &mut H, image: H::Image) {
        self.store.note_reference_size(host.natural_size(&image));
        let sub = host.subscribe(self.key, Signal::ImageLoad, Some(&image));
        self.subscriptions.push((Signal::ImageLoad, sub));
        self.image = Some(image);
    }

    /// One scaling pass from the reference geometry and the current displayed size.
    /// Returns false when skipped (no image, or the image has no intrinsic size yet).
    fn run_pass(&mut self, host: &mut H) -> Result<bool> {
        if self.image.is_none() {
            match host.find_image(&self.name) {
                Some(img) => self.bind_image(host, img),
                None => return Ok(false),
            }
        }
        let Some(img) = self.image.as_ref() else { return Ok(false) };
        let displayed = host.displayed_size(img);
        let natural = host.natural_size(img);
        let Some(factors) = ScaleFactors::between(displayed, natural) else {
            tracing::debug!(key = self.key, ?natural, "intrinsic size unknown, pass skipped");
            return Ok(false);
        };
        let scaled = self.store.scale_all(factors)?;
        for (i, coords) in scaled.iter().enumerate() {
            host.set_area_coords(&self.node, i, coords);
        }
        self.passes += 1;
        tracing::trace!(key = self.key, fx = factors.width, fy = factors.height, "regions rescaled");
        Ok(true)
    }

    /// Immediate recompute; idempotent for a fixed displayed size.
    pub fn recompute(&mut self, host: &mut H) -> Result<bool> {
        self.settled = true;
        self.run_pass(host)
    }

    /// Debounced recompute: replaces any pending timer with a fresh one.
    pub fn schedule_recompute(&mut self, host: &mut H) {
        if let Some(prev) = self.pending.take() {
            host.cancel(prev.handle);
        }
        let token = self.next_token;
        self.next_token += 1;
        let handle = host.schedule(self.key, token, self.debounce_ms);
        self.pending = Some(Pending { token, handle });
        self.settled = true;
    }

    /// Timer callback. Stale tokens (superseded timers) are ignored.
    pub fn on_timer(&mut self, host: &mut H, token: u64) -> Result<bool> {
        match self.pending.as_ref() {
            Some(p) if p.token == token => {
                self.pending = None;
                self.recompute(host)
            }
            _ => {
                tracing::trace!(key = self.key, token, "stale debounce timer ignored");
                Ok(false)
            }
        }
    }

    pub fn on_signal(&mut self, host: &mut H, signal: Signal) -> Result<()> {
        if signal.is_debounced() {
            self.schedule_recompute(host);
        } else {
            self.recompute(host)?;
        }
        Ok(())
    }

    /// Drop every subscription and any pending timer.
    pub(crate) fn detach(mut self, host: &mut H) {
        if let Some(p) = self.pending.take() {
            host.cancel(p.handle);
        }
        for (_, sub) in self.subscriptions.drain(..) {
            host.unsubscribe(sub);
        }
        tracing::debug!(key = self.key, name = %self.name, "map detached");
    }

    pub fn key(&self) -> MapKey { self.key }
    pub fn name(&self) -> &str { &self.name }
    pub fn node(&self) -> &H::Node { &self.node }
    pub fn image(&self) -> Option<&H::Image> { self.image.as_ref() }
    pub fn geometry(&self) -> &GeometryStore { &self.store }
    pub fn subscribed(&self) -> Vec<Signal> { self.subscriptions.iter().map(|(s, _)| *s).collect() }
    /// Number of scaling passes actually applied.
    pub fn passes(&self) -> u64 { self.passes }

    pub fn state(&self) -> MapState {
        if self.pending.is_some() {
            MapState::Scheduled
        } else if self.settled {
            MapState::Idle
        } else {
            MapState::Initialized
        }
    }
}
