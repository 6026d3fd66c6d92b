use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, MouseEvent};

use crate::dom::{self, DomElement, ElementRef};

/// Id named by an in-page link, `None` for a bare `#` or an external href.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scrolls to the link's target. Returns `true` when the browser's own jump
/// should be suppressed.
pub fn follow(href: &str, lookup: impl Fn(&str) -> Option<ElementRef>) -> bool {
    let Some(target) = fragment_id(href).and_then(lookup) else {
        return false;
    };
    target.scroll_into_view();
    true
}

pub fn attach(document: &Document) -> Result<usize, JsValue> {
    let anchors = dom::query_all(document, "a[href^=\"#\"]");
    for anchor in &anchors {
        let document = document.clone();
        let href = anchor.get_attribute("href").unwrap_or_default();
        let on_click = Closure::wrap(Box::new(move |event: MouseEvent| {
            let lookup = |id: &str| dom::by_id(&document, id).map(dom::element_ref);
            if follow(&href, lookup) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        anchor.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    if let Some(indicator) = dom::query(document, ".scroll-indicator") {
        let document = document.clone();
        let on_click = Closure::wrap(Box::new(move |_: MouseEvent| {
            if let Some(countdown) = dom::by_id(&document, "countdown") {
                dom::DomElement::scroll_into_view(&countdown);
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        indicator.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(anchors.len())
}
