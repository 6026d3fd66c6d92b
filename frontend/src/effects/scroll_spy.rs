use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use super::throttle::FrameGate;
use crate::config;
use crate::dom::{self, DomElement, ElementRef};
use crate::scheduler::Scheduler;

const ACTIVE: &str = "active";

/// Highlights the nav link of the section under the reading line.
pub struct ScrollSpy {
    sections: Vec<ElementRef>,
    links: Vec<ElementRef>,
}

impl ScrollSpy {
    pub fn new(sections: Vec<ElementRef>, links: Vec<ElementRef>) -> Self {
        Self { sections, links }
    }

    pub fn update(&self, scroll_y: f64) {
        let position = scroll_y + config::SCROLL_SPY_OFFSET_PX;
        for section in &self.sections {
            let top = section.offset_top();
            if position < top || position >= top + section.offset_height() {
                continue;
            }
            let href = format!("#{}", section.attribute("id").unwrap_or_default());
            for link in &self.links {
                link.set_class(ACTIVE, link.attribute("href").as_deref() == Some(href.as_str()));
            }
        }
    }
}

pub fn attach(window: &Window, document: &Document, scheduler: Rc<dyn Scheduler>) -> Result<bool, JsValue> {
    let sections: Vec<ElementRef> = dom::query_all(document, "section[id]")
        .into_iter()
        .map(dom::element_ref)
        .collect();
    if sections.is_empty() {
        return Ok(false);
    }
    let links = dom::query_all(document, "a[href^=\"#\"]")
        .into_iter()
        .map(dom::element_ref)
        .collect();

    let spy = ScrollSpy::new(sections, links);
    let frame_window = window.clone();
    let gate = FrameGate::new(scheduler, move || {
        spy.update(frame_window.scroll_y().unwrap_or(0.0));
    });
    dom::listen(window, "scroll", move || gate.request())?;
    Ok(true)
}
