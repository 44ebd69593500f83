use crate::labels::{regions_from_labels, LabelRecord};
use crate::model::{MapKey, Shape};
use serde::Serialize;

/// One `<area>` to emit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AreaMarkup {
    pub shape: Shape,
    pub coords: String,
    pub alt: String,
    pub href: String,
    /// Areas without a real link target still need an href for screen readers,
    /// but must not navigate.
    pub disable_click: bool,
}

/// A `<map>` plus the `usemap` value the image should carry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapMarkup {
    pub name: String,
    pub areas: Vec<AreaMarkup>,
}

impl MapMarkup {
    /// None when there is nothing to label. `parent_href` is the link wrapping the
    /// image, if any; every area then points there.
    pub fn from_labels(image_src: &str, key: MapKey, parent_href: Option<&str>, labels: &[LabelRecord]) -> Option<MapMarkup> {
        if labels.is_empty() { return None; }
        let areas = regions_from_labels(labels)
            .into_iter()
            .map(|r| {
                let (href, disable_click) = match parent_href {
                    Some(h) => (h.to_string(), false),
                    None => (format!("#{}", r.label), true),
                };
                AreaMarkup { shape: r.shape, coords: r.coords_attr(), alt: r.label, href, disable_click }
            })
            .collect();
        Some(MapMarkup { name: map_name(image_src, key), areas })
    }

    pub fn usemap(&self) -> String { format!("#{}", self.name) }
}

pub fn map_name(image_src: &str, key: MapKey) -> String { format!("labeled_{}{}", key, image_src) }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;

    fn rec(label: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> LabelRecord {
        LabelRecord { label: label.into(), topleft: Point { x: x1, y: y1 }, bottomright: Point { x: x2, y: y2 } }
    }

    #[test]
    fn unlinked_image_gets_anchor_hrefs() {
        let m = MapMarkup::from_labels("cat.png", 7, None, &[rec("cat", 1.0, 2.0, 3.0, 4.0)]).unwrap();
        assert_eq!(m.name, "labeled_7cat.png");
        assert_eq!(m.usemap(), "#labeled_7cat.png");
        let a = &m.areas[0];
        assert_eq!(a.href, "#cat");
        assert!(a.disable_click);
        assert_eq!(a.coords, "1,2,3,4");
        assert_eq!(a.alt, "cat");
    }

    #[test]
    fn linked_image_shares_its_link() {
        let labels = [rec("a", 0.0, 0.0, 1.0, 1.0), rec("b", 2.0, 2.0, 3.0, 3.0)];
        let m = MapMarkup::from_labels("x.jpg", 1, Some("https://example.org/"), &labels).unwrap();
        assert!(m.areas.iter().all(|a| a.href == "https://example.org/" && !a.disable_click));
    }

    #[test]
    fn no_labels_no_map() {
        assert!(MapMarkup::from_labels("x.jpg", 1, None, &[]).is_none());
    }
}
