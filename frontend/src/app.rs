use std::rc::Rc;

use log::{debug, error, info};
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::config;
use crate::effects::{accessibility, gallery, parallax, resources, responsive, scroll_spy};
use crate::features::{countdown, faq, navigation, reveal};
use crate::rsvp::form;
use crate::scheduler::{BrowserScheduler, Scheduler};

/// Wires every handler against the live page. A step that fails is logged and
/// skipped so the rest of the page still comes alive.
pub fn start(window: &Window, document: &Document) {
    let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler);

    match config::event_moment() {
        Ok(target) => {
            if let Some(ticker) = countdown::attach(document, target) {
                ticker.forget();
            }
        }
        Err(e) => error!("countdown disabled: {}", e),
    }

    report("scroll reveal", reveal::attach(document, scheduler.clone()).map(|n| debug!("observing {} elements", n)));
    report("navigation", navigation::attach(document).map(|n| debug!("{} in-page links", n)));
    report("faq", faq::attach(document).map(|n| debug!("{} faq panels", n)));
    report(
        "rsvp form",
        form::attach(document, scheduler.clone()).map(|wired| {
            if !wired {
                debug!("rsvp handling off");
            }
        }),
    );
    report("gallery", gallery::attach(document, scheduler.clone()).map(drop));
    report("parallax", parallax::attach(window, document, scheduler.clone()).map(drop));
    report("scroll spy", scroll_spy::attach(window, document, scheduler.clone()).map(drop));
    report("responsive", responsive::attach(window, document, scheduler.clone()).map(drop));
    report("accessibility", accessibility::attach(document));
    report("resource checks", resources::attach(window, document, scheduler));

    info!("Wedding invitation app initialized successfully!");
}

fn report(step: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        error!("{} setup failed: {:?}", step, e);
    }
}
