//! Drives a `MapRegistry` through repeated window resizes and reports how long
//! each resize takes to settle: signal, debounce timer, rescale, attribute writes.
//!
//! `resize_bench [--maps=N] [--regions=N] [--resizes=N] [--max-median-ms=F]`

use imagemap::{
    Document, ImageMapError, MapKey, MapRegistry, RegistryId, Signal, Signals, Size, Target, Timers,
};
use std::collections::HashMap;
use std::time::Instant;

struct BenchMap {
    name: String,
    areas: Vec<String>,
    keys: HashMap<RegistryId, MapKey>,
    natural: Size,
}

/// Page of `<map>`s, each with one image, all sharing the window width.
struct BenchPage {
    maps: Vec<BenchMap>,
    width: f64,
    listeners: Vec<(MapKey, Signal, bool)>,
    timers: Vec<(MapKey, u64, bool)>,
    writes: usize,
}

impl BenchPage {
    fn new(maps: usize, regions: usize) -> BenchPage {
        let maps = (0..maps)
            .map(|m| BenchMap {
                name: format!("bench{}", m),
                // detection-style boxes on a 64-wide grid, mixed separators
                areas: (0..regions)
                    .map(|i| {
                        let x = (i % 64) * 40;
                        let y = (i / 64) * 30;
                        format!("{} , {} {},{}", x, y, x + 40, y + 30)
                    })
                    .collect(),
                keys: HashMap::new(),
                natural: Size::new(2560.0, 1920.0),
            })
            .collect();
        BenchPage { maps, width: 2560.0, listeners: Vec::new(), timers: Vec::new(), writes: 0 }
    }

    /// Resize the window, deliver the resize event, then let every debounce timer fire.
    fn resize(&mut self, reg: &mut MapRegistry<BenchPage>, width: f64) -> imagemap::Result<()> {
        self.width = width;
        let keys: Vec<MapKey> = self
            .listeners
            .iter()
            .filter(|(_, s, live)| *live && *s == Signal::WindowResize)
            .map(|(k, _, _)| *k)
            .collect();
        for key in keys {
            reg.on_signal(self, key, Signal::WindowResize)?;
        }
        let due: Vec<(usize, MapKey, u64)> =
            self.timers.iter().enumerate().filter(|(_, t)| t.2).map(|(i, t)| (i, t.0, t.1)).collect();
        for (i, key, token) in due {
            self.timers[i].2 = false;
            reg.on_timer(self, key, token)?;
        }
        Ok(())
    }
}

impl Document for BenchPage {
    type Node = usize;
    type Image = usize;

    fn query(&self, selector: &str) -> imagemap::Result<Vec<usize>> {
        match selector {
            "map" => Ok((0..self.maps.len()).collect()),
            _ => Err(ImageMapError::InvalidSelector { selector: selector.into(), reason: "only `map` is known".into() }),
        }
    }

    fn tag_name(&self, _node: &usize) -> Option<String> { Some("MAP".into()) }
    fn map_name(&self, map: &usize) -> String { self.maps[*map].name.clone() }

    fn map_key(&self, map: &usize, registry: RegistryId) -> Option<MapKey> {
        self.maps[*map].keys.get(&registry).copied()
    }

    fn set_map_key(&mut self, map: &usize, registry: RegistryId, key: MapKey) {
        self.maps[*map].keys.insert(registry, key);
    }

    fn area_coords(&self, map: &usize) -> Vec<String> { self.maps[*map].areas.clone() }

    fn set_area_coords(&mut self, map: &usize, index: usize, coords: &str) {
        if let Some(slot) = self.maps[*map].areas.get_mut(index) {
            slot.clear();
            slot.push_str(coords);
            self.writes += 1;
        }
    }

    fn find_image(&self, name: &str) -> Option<usize> { self.maps.iter().position(|m| m.name == name) }

    fn displayed_size(&self, image: &usize) -> Size {
        let n = self.maps[*image].natural;
        Size::new(self.width, (self.width * n.height / n.width).round())
    }

    fn natural_size(&self, image: &usize) -> Size { self.maps[*image].natural }
}

impl Signals for BenchPage {
    type Subscription = usize;

    fn subscribe(&mut self, key: MapKey, signal: Signal, _image: Option<&usize>) -> usize {
        self.listeners.push((key, signal, true));
        self.listeners.len() - 1
    }

    fn unsubscribe(&mut self, subscription: usize) { self.listeners[subscription].2 = false; }
}

impl Timers for BenchPage {
    type TimerHandle = usize;

    fn schedule(&mut self, key: MapKey, token: u64, _delay_ms: u32) -> usize {
        self.timers.push((key, token, true));
        self.timers.len() - 1
    }

    fn cancel(&mut self, handle: usize) { self.timers[handle].2 = false; }
}

struct Opts {
    maps: usize,
    regions: usize,
    resizes: usize,
    max_median_ms: Option<f64>,
}

fn parse_opts() -> Result<Opts, String> {
    let mut o = Opts { maps: 8, regions: 500, resizes: 300, max_median_ms: None };
    for arg in std::env::args().skip(1) {
        let (flag, val) = arg.split_once('=').ok_or_else(|| format!("expected --flag=value, got {}", arg))?;
        let bad = |_: std::num::ParseIntError| format!("bad value for {}: {}", flag, val);
        match flag {
            "--maps" => o.maps = val.parse().map_err(bad)?,
            "--regions" => o.regions = val.parse().map_err(bad)?,
            "--resizes" => o.resizes = val.parse().map_err(bad)?,
            "--max-median-ms" => o.max_median_ms = Some(val.parse().map_err(|_| format!("bad value for {}: {}", flag, val))?),
            _ => return Err(format!("unknown flag {}", flag)),
        }
    }
    Ok(o)
}

/// Nearest-rank statistics over per-resize wall times.
struct Summary {
    min: f64,
    median: f64,
    p95: f64,
    max: f64,
    mean: f64,
}

impl Summary {
    fn of(mut samples: Vec<f64>) -> Option<Summary> {
        if samples.is_empty() { return None; }
        samples.sort_by(f64::total_cmp);
        let rank = |q: f64| samples[((q * samples.len() as f64).ceil() as usize).clamp(1, samples.len()) - 1];
        Some(Summary {
            min: samples[0],
            median: rank(0.5),
            p95: rank(0.95),
            max: samples[samples.len() - 1],
            mean: samples.iter().sum::<f64>() / samples.len() as f64,
        })
    }
}

fn main() {
    let opts = match parse_opts() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let mut page = BenchPage::new(opts.maps, opts.regions);
    let mut reg = MapRegistry::new();
    let attach_start = Instant::now();
    let keys = match reg.attach_all(&mut page, Target::None) {
        Ok(k) => k,
        Err(e) => {
            eprintln!("attach failed: {}", e);
            std::process::exit(1);
        }
    };
    let attach_ms = attach_start.elapsed().as_secs_f64() * 1000.0;
    page.writes = 0;

    // drag the window between 320px and full width and back
    let mut samples = Vec::with_capacity(opts.resizes);
    for step in 0..opts.resizes {
        let phase = (step % 200) as f64 / 100.0;
        let width = 320.0 + 2240.0 * if phase <= 1.0 { 1.0 - phase } else { phase - 1.0 };
        let t0 = Instant::now();
        if let Err(e) = page.resize(&mut reg, width) {
            eprintln!("resize to {} failed: {}", width, e);
            std::process::exit(1);
        }
        samples.push(t0.elapsed().as_secs_f64() * 1000.0);
    }

    let passes: u64 = keys.iter().filter_map(|k| reg.get(*k)).map(|m| m.passes()).sum();
    println!("maps={} regions={} resizes={} attach_ms={:.3} passes={} writes={}", keys.len(), opts.regions, opts.resizes, attach_ms, passes, page.writes);
    let Some(s) = Summary::of(samples) else { return };
    println!("resize_ms min={:.4} median={:.4} mean={:.4} p95={:.4} max={:.4}", s.min, s.median, s.mean, s.p95, s.max);
    if let Some(limit) = opts.max_median_ms {
        if s.median > limit {
            eprintln!("median {:.4} ms exceeds {:.3} ms", s.median, limit);
            std::process::exit(1);
        }
    }
}
