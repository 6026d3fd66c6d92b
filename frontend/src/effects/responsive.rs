use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use super::throttle::Debouncer;
use crate::config;
use crate::dom::{self, DomElement, ElementRef};
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Mobile,
    Wide,
}

impl Layout {
    pub fn for_width(width: f64) -> Self {
        if width <= config::MOBILE_BREAKPOINT_PX {
            Layout::Mobile
        } else {
            Layout::Wide
        }
    }
}

pub struct Responsive {
    timeline: ElementRef,
}

impl Responsive {
    pub fn new(timeline: ElementRef) -> Self {
        Self { timeline }
    }

    pub fn apply(&self, width: f64) -> Layout {
        let layout = Layout::for_width(width);
        self.timeline.set_class("mobile", layout == Layout::Mobile);
        layout
    }
}

pub fn attach(window: &Window, document: &Document, scheduler: Rc<dyn Scheduler>) -> Result<bool, JsValue> {
    let Some(timeline) = dom::query(document, ".timeline") else {
        debug!("no .timeline, nothing to reflow");
        return Ok(false);
    };
    let responsive = Responsive::new(dom::element_ref(timeline));
    let measure = window.clone();
    let debouncer = Rc::new(Debouncer::new(scheduler, config::RESIZE_QUIET_MS, move || {
        let width = measure.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(0.0);
        let layout = responsive.apply(width);
        debug!("layout now {:?} at {}px", layout, width);
    }));

    let on_resize = debouncer.clone();
    dom::listen(window, "resize", move || on_resize.poke())?;
    debouncer.poke();
    Ok(true)
}
