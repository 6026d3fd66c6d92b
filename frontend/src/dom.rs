use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, EventTarget, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

/// The slice of an element the page handlers touch.
pub trait DomElement {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_text(&self, text: &str);
    fn inner_html(&self) -> String;
    fn set_inner_html(&self, html: &str);
    /// An empty `value` removes the property.
    fn set_style(&self, property: &str, value: &str);
    fn set_css_text(&self, css: &str);
    fn offset_top(&self) -> f64;
    fn offset_height(&self) -> f64;
    fn scroll_into_view(&self);
    fn set_disabled(&self, disabled: bool);

    fn set_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }
}

pub type ElementRef = Rc<dyn DomElement>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Radio,
    Checkbox,
    Select,
    TextArea,
    /// submit, reset, button and image inputs
    Button,
    File,
    Other(String),
}

impl FieldKind {
    pub fn from_input_type(kind: &str) -> Self {
        match kind.to_ascii_lowercase().as_str() {
            "text" | "" => FieldKind::Text,
            "email" => FieldKind::Email,
            "radio" => FieldKind::Radio,
            "checkbox" => FieldKind::Checkbox,
            "submit" | "reset" | "button" | "image" => FieldKind::Button,
            "file" => FieldKind::File,
            other => FieldKind::Other(other.to_string()),
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, FieldKind::Radio | FieldKind::Checkbox)
    }

    /// Whether the value belongs in an url-encoded form body.
    pub fn is_submitted(&self) -> bool {
        !matches!(self, FieldKind::Button | FieldKind::File)
    }
}

pub trait FormField {
    fn name(&self) -> String;
    fn kind(&self) -> FieldKind;
    fn value(&self) -> String;
    fn is_required(&self) -> bool;
    fn is_checked(&self) -> bool;
    fn is_disabled(&self) -> bool;
    fn set_border_color(&self, color: &str);
}

pub type FieldRef = Rc<dyn FormField>;

pub trait FormHost {
    fn action(&self) -> String;
    fn fields(&self) -> Vec<FieldRef>;
    fn reset(&self);
}

impl DomElement for HtmlElement {
    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn inner_html(&self) -> String {
        web_sys::Element::inner_html(self)
    }

    fn set_inner_html(&self, html: &str) {
        web_sys::Element::set_inner_html(self, html);
    }

    fn set_style(&self, property: &str, value: &str) {
        let style = self.style();
        if value.is_empty() {
            let _ = style.remove_property(property);
        } else {
            let _ = style.set_property(property, value);
        }
    }

    fn set_css_text(&self, css: &str) {
        self.style().set_css_text(css);
    }

    fn offset_top(&self) -> f64 {
        HtmlElement::offset_top(self) as f64
    }

    fn offset_height(&self) -> f64 {
        HtmlElement::offset_height(self) as f64
    }

    fn scroll_into_view(&self) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        self.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn set_disabled(&self, disabled: bool) {
        if disabled {
            let _ = self.set_attribute("disabled", "");
        } else {
            let _ = self.remove_attribute("disabled");
        }
    }
}

/// Wraps whichever form control the element turns out to be.
pub struct WebField(pub HtmlElement);

impl FormField for WebField {
    fn name(&self) -> String {
        self.0.get_attribute("name").unwrap_or_default()
    }

    fn kind(&self) -> FieldKind {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            FieldKind::from_input_type(&input.type_())
        } else if self.0.is_instance_of::<HtmlSelectElement>() {
            FieldKind::Select
        } else if self.0.is_instance_of::<HtmlTextAreaElement>() {
            FieldKind::TextArea
        } else {
            FieldKind::Other(self.0.tag_name().to_ascii_lowercase())
        }
    }

    fn value(&self) -> String {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = self.0.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn is_required(&self) -> bool {
        self.0.has_attribute("required")
    }

    fn is_checked(&self) -> bool {
        self.0
            .dyn_ref::<HtmlInputElement>()
            .map(|input| input.checked())
            .unwrap_or(false)
    }

    fn is_disabled(&self) -> bool {
        self.0.matches(":disabled").unwrap_or(false)
    }

    fn set_border_color(&self, color: &str) {
        DomElement::set_style(&self.0, "border-color", color);
    }
}

impl FormHost for HtmlFormElement {
    fn action(&self) -> String {
        HtmlFormElement::action(self)
    }

    fn fields(&self) -> Vec<FieldRef> {
        query_all_in(self, "input, select, textarea")
            .into_iter()
            .map(|element| Rc::new(WebField(element)) as FieldRef)
            .collect()
    }

    fn reset(&self) {
        HtmlFormElement::reset(self);
    }
}

pub fn by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

pub fn query(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

pub fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    query_all_within(document.query_selector_all(selector).ok())
}

pub fn query_all_in(root: &HtmlElement, selector: &str) -> Vec<HtmlElement> {
    query_all_within(root.query_selector_all(selector).ok())
}

fn query_all_within(nodes: Option<web_sys::NodeList>) -> Vec<HtmlElement> {
    let Some(nodes) = nodes else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn element_ref(element: HtmlElement) -> ElementRef {
    Rc::new(element)
}

/// Attaches a listener that lives as long as the page.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut() + 'static) -> Result<(), JsValue> {
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}
