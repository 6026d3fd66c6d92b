use std::cell::Cell;
use std::rc::Rc;

use log::{debug, error, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, FocusEvent, HtmlFormElement};

use super::banner::Banners;
use super::transport::{read_rejection, FetchTransport, Rejection, Submission, Transport, TransportError};
use super::validation::{blur_feedback, validate, FieldFeedback, ValidationError};
use crate::dom::{self, DomElement, ElementRef, FieldRef, FormHost, WebField};
use crate::scheduler::Scheduler;

pub const SUCCESS_MESSAGE: &str = "Thank you! Your RSVP has been received. We can't wait to celebrate with you!";
pub const REJECTED_MESSAGE: &str = "There was an error sending your RSVP. Please try again.";
pub const OFFLINE_MESSAGE: &str = "There was an error sending your RSVP. Please check your internet connection and try again.";

const LOADING_LABEL: &str = r#"<i class="fas fa-spinner fa-spin"></i> Sending..."#;
const ERROR_BORDER: &str = "var(--color-error)";
const FOCUS_BORDER: &str = "var(--color-primary)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Validating,
    Submitting,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid(ValidationError),
    Accepted,
    Rejected(String),
    Failed(TransportError),
}

/// Puts the submit button back the way it was, whichever way submission ends.
struct BusyButton<'a> {
    button: &'a ElementRef,
    label: String,
}

impl<'a> BusyButton<'a> {
    fn engage(button: &'a ElementRef) -> Self {
        let label = button.inner_html();
        button.set_inner_html(LOADING_LABEL);
        button.set_disabled(true);
        Self { button, label }
    }
}

impl Drop for BusyButton<'_> {
    fn drop(&mut self) {
        self.button.set_inner_html(&self.label);
        self.button.set_disabled(false);
    }
}

pub struct RsvpForm {
    form: Rc<dyn FormHost>,
    submit_button: ElementRef,
    banners: Banners,
    transport: Rc<dyn Transport>,
    state: Cell<FormState>,
}

impl RsvpForm {
    pub fn new(
        form: Rc<dyn FormHost>,
        submit_button: ElementRef,
        banners: Banners,
        transport: Rc<dyn Transport>,
    ) -> Self {
        Self {
            form,
            submit_button,
            banners,
            transport,
            state: Cell::new(FormState::Idle),
        }
    }

    pub fn state(&self) -> FormState {
        self.state.get()
    }

    /// Name/value pairs the browser would send: unnamed, disabled and button or
    /// file controls are skipped, as are unchecked choices.
    pub fn contents(&self) -> Vec<(String, String)> {
        self.form
            .fields()
            .iter()
            .filter(|field| !field.name().is_empty() && !field.is_disabled())
            .filter(|field| field.kind().is_submitted())
            .filter(|field| !field.kind().is_choice() || field.is_checked())
            .map(|field| (field.name(), field.value()))
            .collect()
    }

    pub async fn submit(&self) -> SubmitOutcome {
        self.state.set(FormState::Validating);
        if let Err(invalid) = validate(&self.form.fields()) {
            self.banners.show_error(&invalid.to_string());
            self.state.set(FormState::Idle);
            return SubmitOutcome::Invalid(invalid);
        }

        self.state.set(FormState::Submitting);
        let submission = Submission {
            action: self.form.action(),
            fields: self.contents(),
        };
        let outcome = {
            let _busy = BusyButton::engage(&self.submit_button);
            match self.transport.send(submission).await {
                Ok(response) if response.ok() => {
                    self.banners.show_success(SUCCESS_MESSAGE);
                    self.form.reset();
                    SubmitOutcome::Accepted
                }
                Ok(response) => match read_rejection(&response.body) {
                    Rejection::Detailed(message) => {
                        info!("RSVP rejected with status {}", response.status);
                        self.banners.show_error(&message);
                        SubmitOutcome::Rejected(message)
                    }
                    Rejection::Generic => {
                        info!("RSVP rejected with status {}", response.status);
                        self.banners.show_error(REJECTED_MESSAGE);
                        SubmitOutcome::Rejected(REJECTED_MESSAGE.to_string())
                    }
                    Rejection::Unreadable(reason) => {
                        let failure = TransportError::Body(reason);
                        error!("Form submission error (status {}): {}", response.status, failure);
                        self.banners.show_error(OFFLINE_MESSAGE);
                        SubmitOutcome::Failed(failure)
                    }
                },
                Err(failure) => {
                    error!("Form submission error: {}", failure);
                    self.banners.show_error(OFFLINE_MESSAGE);
                    SubmitOutcome::Failed(failure)
                }
            }
        };
        self.state.set(FormState::Idle);
        outcome
    }

    pub fn field_blurred(&self, field: &dyn dom::FormField) {
        match blur_feedback(&field.kind(), field.is_required(), &field.value()) {
            FieldFeedback::Invalid => field.set_border_color(ERROR_BORDER),
            FieldFeedback::Neutral => field.set_border_color(""),
        }
    }

    pub fn field_focused(&self, field: &dyn dom::FormField) {
        field.set_border_color(FOCUS_BORDER);
        self.banners.hide_all();
    }
}

/// `Ok(false)` when the page carries no RSVP form.
pub fn attach(document: &Document, scheduler: Rc<dyn Scheduler>) -> Result<bool, JsValue> {
    let Some(form) = document
        .get_element_by_id("rsvp-form")
        .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
    else {
        debug!("no #rsvp-form on the page");
        return Ok(false);
    };
    let (Some(submit_button), Some(success), Some(failure)) = (
        dom::by_id(document, "submit-btn"),
        dom::by_id(document, "success-message"),
        dom::by_id(document, "error-message"),
    ) else {
        debug!("rsvp form is missing its button or banners");
        return Ok(false);
    };

    let banners = Banners::new(dom::element_ref(success), dom::element_ref(failure), scheduler);
    let rsvp = Rc::new(RsvpForm::new(
        Rc::new(form.clone()),
        dom::element_ref(submit_button),
        banners,
        Rc::new(FetchTransport),
    ));

    {
        let rsvp = rsvp.clone();
        let on_submit = Closure::wrap(Box::new(move |event: Event| {
            event.prevent_default();
            let rsvp = rsvp.clone();
            spawn_local(async move {
                let outcome = rsvp.submit().await;
                debug!("rsvp submission finished: {:?}", outcome);
            });
        }) as Box<dyn FnMut(Event)>);
        form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
        on_submit.forget();
    }

    for control in dom::query_all_in(&form, "input, select, textarea") {
        let field: FieldRef = Rc::new(WebField(control.clone()));

        let on_blur = {
            let rsvp = rsvp.clone();
            let field = field.clone();
            Closure::wrap(Box::new(move |_: FocusEvent| {
                rsvp.field_blurred(&*field);
            }) as Box<dyn FnMut(FocusEvent)>)
        };
        let on_focus = {
            let rsvp = rsvp.clone();
            Closure::wrap(Box::new(move |_: FocusEvent| {
                rsvp.field_focused(&*field);
            }) as Box<dyn FnMut(FocusEvent)>)
        };
        control.add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref())?;
        control.add_event_listener_with_callback("focus", on_focus.as_ref().unchecked_ref())?;
        on_blur.forget();
        on_focus.forget();
    }
    Ok(true)
}
