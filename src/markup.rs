use crate::dom::DomHost;
use imagemap::{LabelResponse, MapMarkup};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlAnchorElement, HtmlImageElement};

/// Build the `<map>` for `labels`, link the image to it and insert it right after
/// the image. None when there is nothing to label.
pub fn insert_map(host: &mut DomHost, img: &HtmlImageElement, labels: &LabelResponse) -> Result<Option<Element>, JsValue> {
    let parent_href = img
        .parent_element()
        .filter(|p| p.tag_name().eq_ignore_ascii_case("a"))
        .and_then(|p| p.dyn_into::<HtmlAnchorElement>().ok())
        .map(|a| a.href());
    let id = host.next_markup_id();
    let Some(markup) = MapMarkup::from_labels(&img.src(), id, parent_href.as_deref(), labels.records()) else {
        return Ok(None);
    };
    let doc = host.document();
    let map = doc.create_element("map")?;
    map.set_attribute("name", &markup.name)?;
    for a in &markup.areas {
        let area = doc.create_element("area")?;
        area.set_attribute("shape", a.shape.as_str())?;
        area.set_attribute("href", &a.href)?;
        if a.disable_click {
            area.set_attribute("onclick", "return false;")?;
        }
        area.set_attribute("coords", &a.coords)?;
        area.set_attribute("alt", &a.alt)?;
        map.append_child(&area)?;
    }
    img.set_attribute("usemap", &markup.usemap())?;
    if let Some(parent) = img.parent_node() {
        parent.insert_before(&map, img.next_sibling().as_ref())?;
    }
    tracing::debug!(name = %markup.name, areas = markup.areas.len(), "image map inserted");
    Ok(Some(map))
}
