use std::cell::Cell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::config;
use crate::dom::{self, DomElement, ElementRef};
use crate::scheduler::Scheduler;

const REVEALED: &str = "aos-animate";
const DELAY_ATTRIBUTE: &str = "data-aos-delay";

/// Reads the leading integer of a delay attribute; anything else means no delay.
pub fn parse_delay(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 0;
    };
    let digits: String = raw.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

struct Watched {
    element: ElementRef,
    fired: Cell<bool>,
}

pub struct ScrollReveal {
    watched: Vec<Watched>,
    scheduler: Rc<dyn Scheduler>,
}

impl ScrollReveal {
    pub fn new(elements: Vec<ElementRef>, scheduler: Rc<dyn Scheduler>) -> Self {
        let watched = elements
            .into_iter()
            .map(|element| Watched { element, fired: Cell::new(false) })
            .collect();
        Self { watched, scheduler }
    }

    /// Element `index` became visible. Returns whether this was its first time,
    /// after which the caller stops observing it.
    pub fn entered(&self, index: usize) -> bool {
        let Some(watched) = self.watched.get(index) else {
            return false;
        };
        if watched.fired.replace(true) {
            return false;
        }
        let delay = parse_delay(watched.element.attribute(DELAY_ATTRIBUTE).as_deref());
        let element = watched.element.clone();
        self.scheduler
            .timeout(delay, Box::new(move || element.add_class(REVEALED)))
            .forget();
        true
    }
}

pub fn attach(document: &Document, scheduler: Rc<dyn Scheduler>) -> Result<usize, JsValue> {
    let targets: Vec<HtmlElement> = dom::query_all(document, "[data-aos]");
    if targets.is_empty() {
        debug!("no [data-aos] elements, scroll reveal idle");
        return Ok(0);
    }

    let reveal = ScrollReveal::new(targets.iter().cloned().map(dom::element_ref).collect(), scheduler);
    let lookup = targets.clone();
    let on_intersect = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                warn!("unexpected intersection entry");
                continue;
            };
            if !entry.is_intersecting() {
                continue;
            }
            let target = entry.target();
            let index = lookup
                .iter()
                .position(|candidate| AsRef::<web_sys::Element>::as_ref(candidate) == &target);
            if let Some(index) = index {
                if reveal.entered(index) {
                    observer.unobserve(&target);
                }
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config::REVEAL_THRESHOLD));
    options.set_root_margin(config::REVEAL_ROOT_MARGIN);
    let observer = IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)?;
    for target in &targets {
        observer.observe(target);
    }
    on_intersect.forget();
    Ok(targets.len())
}
