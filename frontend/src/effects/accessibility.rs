use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlAnchorElement, HtmlElement, KeyboardEvent};

use crate::config;
use crate::dom::{self, DomElement, ElementRef};

const HIDDEN_CSS: &str = "position: absolute; left: -10000px; top: auto; width: 1px; height: 1px; overflow: hidden;";
const FOCUSED_CSS: &str = "position: absolute; left: 6px; top: 7px; z-index: 999999; padding: 8px 16px; \
    background: var(--color-primary); color: var(--color-btn-primary-text); text-decoration: none; border-radius: 4px;";

/// Off-screen until keyboard focus lands on it.
pub struct SkipLink {
    link: ElementRef,
}

impl SkipLink {
    pub fn new(link: ElementRef) -> Self {
        link.set_css_text(HIDDEN_CSS);
        Self { link }
    }

    pub fn focused(&self) {
        self.link.set_css_text(FOCUSED_CSS);
    }

    pub fn blurred(&self) {
        self.link.set_css_text(HIDDEN_CSS);
    }
}

/// Enter and Space on a FAQ question act like a click.
pub fn activates_question(key: &str, target: &dyn DomElement) -> bool {
    matches!(key, "Enter" | " ") && target.has_class("faq-question")
}

pub fn attach(document: &Document) -> Result<(), JsValue> {
    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(config::SKIP_LINK_TARGET);
    link.set_text_content(Some("Skip to main content"));
    link.set_class_name("sr-only");

    let skip = Rc::new(SkipLink::new(dom::element_ref(link.clone().into())));
    let on_focus = skip.clone();
    dom::listen(&link, "focus", move || on_focus.focused())?;
    dom::listen(&link, "blur", move || skip.blurred())?;

    if let Some(body) = document.body() {
        body.insert_before(&link, body.first_child().as_ref())?;
    }

    let on_keydown = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<HtmlElement>().ok()) else {
            return;
        };
        if activates_question(&event.key(), &target) {
            event.prevent_default();
            target.click();
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    document.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;
    on_keydown.forget();
    Ok(())
}
