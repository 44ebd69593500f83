use crate::error::Result;
use crate::geometry::limits::MAX_REGIONS_PER_MAP;
use crate::model::{Point, Region};
use serde::{Deserialize, Serialize};

/// One detection from the label source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub label: String,
    pub topleft: Point,
    pub bottomright: Point,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LabelResponse {
    #[serde(default)]
    pub labels: Option<Vec<LabelRecord>>,
}

impl LabelResponse {
    pub fn parse(json: &str) -> Result<LabelResponse> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_value(v: serde_json::Value) -> Result<LabelResponse> {
        Ok(serde_json::from_value(v)?)
    }

    /// Missing and empty label lists both mean "no regions".
    pub fn records(&self) -> &[LabelRecord] {
        self.labels.as_deref().unwrap_or(&[])
    }
}

pub fn regions_from_labels(labels: &[LabelRecord]) -> Vec<Region> {
    labels
        .iter()
        .take(MAX_REGIONS_PER_MAP)
        .map(|l| Region::rect(l.topleft, l.bottomright, l.label.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_label_records() {
        let r = LabelResponse::parse(
            r#"{"labels":[{"label":"dog","topleft":{"x":10,"y":20},"bottomright":{"x":30,"y":40}}]}"#,
        )
        .unwrap();
        let regions = regions_from_labels(r.records());
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].coords_attr(), "10,20,30,40");
        assert_eq!(regions[0].label, "dog");
    }

    #[test]
    fn absent_or_empty_labels_yield_nothing() {
        assert!(LabelResponse::parse("{}").unwrap().records().is_empty());
        assert!(LabelResponse::parse(r#"{"labels":null}"#).unwrap().records().is_empty());
        assert!(LabelResponse::parse(r#"{"labels":[]}"#).unwrap().records().is_empty());
    }

    #[test]
    fn malformed_records_fail_to_parse() {
        assert!(LabelResponse::parse(r#"{"labels":[{"label":"x"}]}"#).is_err());
        assert!(LabelResponse::parse("not json").is_err());
    }
}
