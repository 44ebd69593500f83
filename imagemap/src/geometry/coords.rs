use crate::error::{ImageMapError, Result};
use crate::geometry::limits::MAX_COORDS_PER_REGION;
use crate::model::ScaleFactors;

/// Canonical csv form of a `coords` attribute: trimmed, with whitespace around
/// commas dropped and any other whitespace run (space, tab, CR, LF) turned into a
/// single comma. Consecutive commas keep their empty slot so `parse` can reject it.
pub fn normalize(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() { return String::new(); }
    let mut tokens: Vec<&str> = Vec::new();
    for seg in raw.split(',') {
        let seg = seg.trim();
        if seg.is_empty() {
            tokens.push("");
        } else {
            tokens.extend(seg.split_whitespace());
        }
    }
    tokens.join(",")
}

/// Parse a normalized coordinate string. `region` only labels the error.
pub fn parse(normalized: &str, region: usize) -> Result<Vec<f64>> {
    if normalized.is_empty() { return Ok(Vec::new()); }
    let mut out = Vec::new();
    for (index, token) in normalized.split(',').enumerate() {
        if index >= MAX_COORDS_PER_REGION {
            let count = normalized.split(',').count();
            return Err(ImageMapError::TooManyCoordinates { region, count, max: MAX_COORDS_PER_REGION });
        }
        match token.parse::<f64>() {
            Ok(v) if v.is_finite() => out.push(v),
            _ => return Err(ImageMapError::InvalidCoordinate { region, index, token: token.to_string() }),
        }
    }
    Ok(out)
}

/// Scale a flattened coordinate list. The axis flips on every element across the
/// whole list, starting with x; each result is floored.
pub fn scale_values(reference: &[f64], factors: ScaleFactors) -> Vec<i64> {
    let mut is_width = false;
    reference
        .iter()
        .map(|v| {
            is_width = !is_width;
            let f = if is_width { factors.width } else { factors.height };
            (v * f).floor() as i64
        })
        .collect()
}

/// Parse then scale one reference coordinate string.
pub fn scale(reference: &str, factors: ScaleFactors) -> Result<Vec<i64>> {
    Ok(scale_values(&parse(reference, 0)?, factors))
}

pub fn format(coords: &[i64]) -> String {
    coords.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(",")
}
