use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, HtmlElement, HtmlLinkElement, Window};

use crate::config;
use crate::dom;
use crate::scheduler::{Scheduler, TimerHandle};

/// Warns if web fonts have not settled within the timeout.
pub struct FontWatch {
    timer: RefCell<Option<TimerHandle>>,
    warned: Rc<Cell<bool>>,
}

impl FontWatch {
    pub fn start(scheduler: &dyn Scheduler) -> Self {
        let warned = Rc::new(Cell::new(false));
        let flag = warned.clone();
        let timer = scheduler.timeout(
            config::FONT_TIMEOUT_MS,
            Box::new(move || {
                flag.set(true);
                warn!("Google Fonts may have failed to load, using fallback fonts");
            }),
        );
        Self {
            timer: RefCell::new(Some(timer)),
            warned,
        }
    }

    pub fn fonts_ready(&self) {
        self.timer.borrow_mut().take();
    }

    pub fn warned(&self) -> bool {
        self.warned.get()
    }
}

/// Computed `::before` content of the probe icon; empty or `none` means the
/// icon font never arrived.
pub fn icon_font_missing(content: Option<&str>) -> bool {
    match content.map(str::trim) {
        None | Some("") | Some("none") => true,
        Some(_) => false,
    }
}

pub fn preload_fonts(document: &Document) -> Result<(), JsValue> {
    let link: HtmlLinkElement = document.create_element("link")?.dyn_into()?;
    link.set_rel("preload");
    link.set_href(config::FONTS_STYLESHEET);
    link.set_as("style");
    link.set_cross_origin(Some("anonymous"));
    if let Some(head) = document.head() {
        head.append_child(&link)?;
    }
    Ok(())
}

fn probe_icon_font(window: &Window, document: &Document) -> Result<(), JsValue> {
    let Some(body) = document.body() else {
        return Ok(());
    };
    let probe: HtmlElement = document.create_element("i")?.dyn_into()?;
    probe.set_class_name("fas fa-heart");
    dom::DomElement::set_css_text(&probe, "position: absolute; left: -10000px;");
    body.append_child(&probe)?;

    let content = window
        .get_computed_style_with_pseudo_elt(&probe, "::before")?
        .and_then(|style| style.get_property_value("content").ok());
    if icon_font_missing(content.as_deref()) {
        warn!("Font Awesome may have failed to load");
    }
    body.remove_child(&probe)?;
    Ok(())
}

pub fn attach(window: &Window, document: &Document, scheduler: Rc<dyn Scheduler>) -> Result<(), JsValue> {
    let watch = FontWatch::start(&*scheduler);
    let ready = document.fonts().ready()?;
    spawn_local(async move {
        if JsFuture::from(ready).await.is_ok() {
            watch.fonts_ready();
        }
    });

    let probe_window = window.clone();
    let probe_document = document.clone();
    dom::listen(window, "load", move || {
        if let Err(e) = probe_icon_font(&probe_window, &probe_document) {
            warn!("icon font probe failed: {:?}", e);
        }
    })
}
