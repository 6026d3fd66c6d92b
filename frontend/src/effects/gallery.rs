use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::config;
use crate::dom::{self, DomElement, ElementRef};
use crate::scheduler::Scheduler;

const PRESSED: &str = "scale(0.95)";

/// Brief press-in on a tapped gallery tile.
pub fn press(item: &ElementRef, scheduler: &dyn Scheduler) {
    item.set_style("transform", PRESSED);
    let released = item.clone();
    scheduler
        .timeout(
            config::GALLERY_PRESS_MS,
            Box::new(move || released.set_style("transform", "")),
        )
        .forget();
}

pub fn attach(document: &Document, scheduler: Rc<dyn Scheduler>) -> Result<usize, JsValue> {
    let items = dom::query_all(document, ".gallery-item");
    for item in &items {
        let tile = dom::element_ref(item.clone());
        let scheduler = scheduler.clone();
        dom::listen(item, "click", move || press(&tile, &*scheduler))?;
    }
    Ok(items.len())
}
