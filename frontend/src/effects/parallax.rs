use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use super::throttle::FrameGate;
use crate::config;
use crate::dom::{self, DomElement, ElementRef};
use crate::scheduler::Scheduler;

pub struct Parallax {
    hero: ElementRef,
}

impl Parallax {
    pub fn new(hero: ElementRef) -> Self {
        Self { hero }
    }

    /// Shifts the hero while it is still on screen; past it, the last offset stays.
    pub fn update(&self, scroll_y: f64) {
        if scroll_y < self.hero.offset_height() {
            let rate = scroll_y * config::PARALLAX_RATE;
            self.hero.set_style("transform", &format!("translateY({}px)", rate));
        }
    }
}

pub fn attach(window: &Window, document: &Document, scheduler: Rc<dyn Scheduler>) -> Result<bool, JsValue> {
    let Some(hero) = dom::query(document, ".hero") else {
        debug!("no .hero, parallax off");
        return Ok(false);
    };
    let parallax = Parallax::new(dom::element_ref(hero));
    let frame_window = window.clone();
    let gate = FrameGate::new(scheduler, move || {
        parallax.update(frame_window.scroll_y().unwrap_or(0.0));
    });
    dom::listen(window, "scroll", move || gate.request())?;
    Ok(true)
}
