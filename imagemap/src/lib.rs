//! Responsive image maps: region coordinates captured at an image's intrinsic
//! size and rescaled whenever its displayed size changes.

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod labels;
pub mod markup;
pub mod model;
pub mod registry;
pub mod store;
pub mod geometry {
    pub mod coords;
    pub mod limits;
}

pub use config::ResizeConfig;
pub use controller::ResponsiveMap;
pub use error::{ImageMapError, Result};
pub use host::{Document, Host, Signals, Timers};
pub use labels::{LabelRecord, LabelResponse};
pub use markup::{AreaMarkup, MapMarkup};
pub use model::{MapKey, MapState, RegistryId, Point, Region, ScaleFactors, Shape, Signal, Size, Target};
pub use registry::{check_map, MapRegistry};
pub use store::GeometryStore;
