use log::{error, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

mod app;
mod config;
mod dom;
mod scheduler;
#[cfg(test)]
mod testing;

mod features {
    pub mod countdown;
    pub mod faq;
    pub mod navigation;
    pub mod reveal;
}
mod rsvp {
    pub mod banner;
    pub mod form;
    pub mod transport;
    pub mod validation;
}
mod effects {
    pub mod accessibility;
    pub mod gallery;
    pub mod parallax;
    pub mod resources;
    pub mod responsive;
    pub mod scroll_spy;
    pub mod throttle;
}

fn boot() {
    let Some(window) = web_sys::window() else {
        error!("no window, nothing to enhance");
        return;
    };
    let Some(document) = window.document() else {
        error!("window has no document");
        return;
    };
    app::start(&window, &document);
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting invitation enhancements");
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if let Err(e) = effects::resources::preload_fonts(&document) {
        error!("font preload failed: {:?}", e);
    }

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(boot);
        if let Err(e) = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref()) {
            error!("could not wait for DOMContentLoaded: {:?}", e);
        }
    } else {
        boot();
    }
}
