use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, MouseEvent};

use crate::dom::{self, DomElement, ElementRef};

const OPEN: &str = "active";

pub struct FaqPanel {
    pub question: ElementRef,
    pub answer: ElementRef,
}

impl FaqPanel {
    fn is_open(&self) -> bool {
        self.question.has_class(OPEN)
    }

    fn set_open(&self, open: bool) {
        self.question.set_class(OPEN, open);
        self.answer.set_class(OPEN, open);
    }
}

/// At most one panel open at a time.
pub struct Accordion {
    panels: Vec<FaqPanel>,
}

impl Accordion {
    pub fn new(panels: Vec<FaqPanel>) -> Self {
        Self { panels }
    }

    pub fn toggle(&self, index: usize) {
        let Some(panel) = self.panels.get(index) else {
            return;
        };
        let was_open = panel.is_open();
        for (other_index, other) in self.panels.iter().enumerate() {
            if other_index != index {
                other.set_open(false);
            }
        }
        panel.set_open(!was_open);
    }

    pub fn open_panel(&self) -> Option<usize> {
        self.panels.iter().position(FaqPanel::is_open)
    }
}

pub fn attach(document: &Document) -> Result<usize, JsValue> {
    let mut questions: Vec<HtmlElement> = Vec::new();
    let mut panels = Vec::new();
    for item in dom::query_all(document, ".faq-item") {
        let question = dom::query_all_in(&item, ".faq-question").into_iter().next();
        let answer = dom::query_all_in(&item, ".faq-answer").into_iter().next();
        if let (Some(question), Some(answer)) = (question, answer) {
            questions.push(question.clone());
            panels.push(FaqPanel {
                question: dom::element_ref(question),
                answer: dom::element_ref(answer),
            });
        }
    }

    let accordion = Rc::new(Accordion::new(panels));
    for (index, question) in questions.iter().enumerate() {
        let accordion = accordion.clone();
        let on_click = Closure::wrap(Box::new(move |_: MouseEvent| {
            accordion.toggle(index);
        }) as Box<dyn FnMut(MouseEvent)>);
        question.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(questions.len())
}
