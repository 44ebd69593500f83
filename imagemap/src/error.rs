use crate::model::MapKey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageMapError {
    #[error("object is not a valid DOM element")]
    InvalidTarget,

    #[error("expected <MAP> tag, found <{found}>")]
    TypeMismatch { found: String },

    #[error("unexpected data type ({found})")]
    UnsupportedTargetType { found: String },

    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("region {region}: coordinate {index} is not a finite number ({token:?})")]
    InvalidCoordinate { region: usize, index: usize, token: String },

    #[error("region {region}: {count} coordinates exceeds the limit of {max}")]
    TooManyCoordinates { region: usize, count: usize, max: usize },

    #[error("no map is attached under key {0}")]
    UnknownMap(MapKey),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("label response is malformed: {0}")]
    LabelParse(#[from] serde_json::Error),
}

impl ImageMapError {
    /// Stable machine-readable code, used by the wasm result envelope.
    pub fn code(&self) -> &'static str {
        match self {
            ImageMapError::InvalidTarget => "invalid_target",
            ImageMapError::TypeMismatch { .. } => "type_mismatch",
            ImageMapError::UnsupportedTargetType { .. } => "unsupported_target_type",
            ImageMapError::InvalidSelector { .. } => "invalid_selector",
            ImageMapError::InvalidCoordinate { .. } => "invalid_coordinate",
            ImageMapError::TooManyCoordinates { .. } => "too_many_coordinates",
            ImageMapError::UnknownMap(_) => "unknown_map",
            ImageMapError::InvalidConfig(_) => "invalid_config",
            ImageMapError::LabelParse(_) => "label_parse",
        }
    }

    /// Programmer errors at the API boundary, as opposed to bad data.
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            ImageMapError::InvalidTarget | ImageMapError::TypeMismatch { .. } | ImageMapError::UnsupportedTargetType { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ImageMapError>;
