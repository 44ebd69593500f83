use serde::{Deserialize, Serialize};

/// Identity of one managed map, unique for the lifetime of a registry.
pub type MapKey = u64;

/// Namespace for map keys; distinct for every registry in the process.
pub type RegistryId = u64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Size { Size { width, height } }
}

/// Ratio of displayed to reference size, per axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    pub width: f64,
    pub height: f64,
}

impl ScaleFactors {
    pub const IDENTITY: ScaleFactors = ScaleFactors { width: 1.0, height: 1.0 };

    /// None when either axis would be non-finite or the reference is degenerate
    /// (e.g. an image whose intrinsic size is still 0x0).
    pub fn between(displayed: Size, reference: Size) -> Option<ScaleFactors> {
        if reference.width <= 0.0 || reference.height <= 0.0 { return None; }
        let f = ScaleFactors { width: displayed.width / reference.width, height: displayed.height / reference.height };
        if f.width.is_finite() && f.height.is_finite() { Some(f) } else { None }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Rect,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self { Shape::Rect => "rect" }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One labelled clickable rectangle, coords in reference-scale pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub shape: Shape,
    pub coords: [f64; 4], // x1,y1,x2,y2
    pub label: String,
}

impl Region {
    pub fn rect(topleft: Point, bottomright: Point, label: impl Into<String>) -> Region {
        Region { shape: Shape::Rect, coords: [topleft.x, topleft.y, bottomright.x, bottomright.y], label: label.into() }
    }

    /// Comma-joined coordinate attribute, integers printed without a fraction.
    pub fn coords_attr(&self) -> String {
        self.coords.iter().map(|v| fmt_num(*v)).collect::<Vec<_>>().join(",")
    }
}

fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 { format!("{}", v as i64) } else { format!("{}", v) }
}

/// Lifecycle state of one managed map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MapState {
    Unattached,
    Initialized,
    Idle,
    Scheduled,
}

impl MapState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapState::Unattached => "unattached",
            MapState::Initialized => "initialized",
            MapState::Idle => "idle",
            MapState::Scheduled => "scheduled",
        }
    }
}

/// External trigger sources a controller subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    ImageLoad,
    WindowFocus,
    WindowResize,
    DocumentChange, // visibility, ready-state and fullscreen changes
}

impl Signal {
    pub const WINDOW: [Signal; 3] = [Signal::WindowFocus, Signal::WindowResize, Signal::DocumentChange];

    pub fn is_debounced(&self) -> bool { matches!(self, Signal::WindowResize) }
}

/// Batch attach input: absent, a selector, or an already-resolved container.
#[derive(Clone, Debug)]
pub enum Target<N> {
    None,
    Selector(String),
    Direct(N),
}
