//! In-memory stand-ins for the browser so handlers can run under `cargo test`.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::rc::{Rc, Weak};

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;

use crate::dom::{DomElement, FieldKind, FieldRef, FormField, FormHost};
use crate::rsvp::transport::{Submission, SubmitResponse, Transport, TransportError};
use crate::scheduler::{Scheduler, TimerHandle};

#[derive(Default)]
pub struct FakeElement {
    classes: RefCell<BTreeSet<String>>,
    attributes: RefCell<HashMap<String, String>>,
    styles: RefCell<HashMap<String, String>>,
    text: RefCell<String>,
    html: RefCell<String>,
    css_text: RefCell<String>,
    pub top: Cell<f64>,
    pub height: Cell<f64>,
    pub scrolls: Cell<u32>,
    disabled: Cell<bool>,
}

impl FakeElement {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with_attr(name: &str, value: &str) -> Rc<Self> {
        let element = Self::default();
        element.attributes.borrow_mut().insert(name.to_string(), value.to_string());
        Rc::new(element)
    }

    pub fn with_classes(classes: &[&str]) -> Rc<Self> {
        let element = Self::default();
        element.classes.borrow_mut().extend(classes.iter().map(|c| c.to_string()));
        Rc::new(element)
    }

    pub fn section(id: &str, top: f64, height: f64) -> Rc<Self> {
        let element = Self::with_attr("id", id);
        element.top.set(top);
        element.height.set(height);
        element
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.styles.borrow().get(property).cloned()
    }

    pub fn css_text(&self) -> String {
        self.css_text.borrow().clone()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }
}

impl DomElement for FakeElement {
    fn add_class(&self, class: &str) {
        self.classes.borrow_mut().insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }

    fn inner_html(&self) -> String {
        self.html.borrow().clone()
    }

    fn set_inner_html(&self, html: &str) {
        *self.html.borrow_mut() = html.to_string();
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut styles = self.styles.borrow_mut();
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_string(), value.to_string());
        }
    }

    fn set_css_text(&self, css: &str) {
        *self.css_text.borrow_mut() = css.to_string();
    }

    fn offset_top(&self) -> f64 {
        self.top.get()
    }

    fn offset_height(&self) -> f64 {
        self.height.get()
    }

    fn scroll_into_view(&self) {
        self.scrolls.set(self.scrolls.get() + 1);
    }

    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }
}

pub struct FakeField {
    name: String,
    kind: FieldKind,
    required: bool,
    pub value: RefCell<String>,
    pub checked: Cell<bool>,
    pub disabled: Cell<bool>,
    pub border: RefCell<String>,
}

impl FakeField {
    pub fn new(name: &str, kind: FieldKind, required: bool) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_string(),
            kind,
            required,
            value: RefCell::new(String::new()),
            checked: Cell::new(false),
            disabled: Cell::new(false),
            border: RefCell::new(String::new()),
        })
    }

    pub fn radio(name: &str, value: &str) -> Rc<Self> {
        let field = Self::new(name, FieldKind::Radio, true);
        *field.value.borrow_mut() = value.to_string();
        field
    }

    pub fn set(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
    }

    pub fn border(&self) -> String {
        self.border.borrow().clone()
    }
}

impl FormField for FakeField {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn kind(&self) -> FieldKind {
        self.kind.clone()
    }

    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn is_checked(&self) -> bool {
        self.checked.get()
    }

    fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    fn set_border_color(&self, color: &str) {
        *self.border.borrow_mut() = color.to_string();
    }
}

/// Name, email, a message and a yes/no attendance pair.
pub struct FakeForm {
    pub name: Rc<FakeField>,
    pub email: Rc<FakeField>,
    pub message: Rc<FakeField>,
    pub attending: Rc<FakeField>,
    pub declining: Rc<FakeField>,
    /// Further controls appended after the standard ones.
    pub extras: RefCell<Vec<FieldRef>>,
    pub resets: Cell<u32>,
}

impl FakeForm {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            name: FakeField::new("name", FieldKind::Text, true),
            email: FakeField::new("email", FieldKind::Email, true),
            message: FakeField::new("message", FieldKind::TextArea, false),
            attending: FakeField::radio("attendance", "yes"),
            declining: FakeField::radio("attendance", "no"),
            extras: RefCell::new(Vec::new()),
            resets: Cell::new(0),
        })
    }

    pub fn filled() -> Rc<Self> {
        let form = Self::new();
        form.name.set("Ada Lovelace");
        form.email.set("ada@example.com");
        form.attending.checked.set(true);
        form
    }

    pub fn is_blank(&self) -> bool {
        self.name.value().is_empty()
            && self.email.value().is_empty()
            && self.message.value().is_empty()
            && !self.attending.is_checked()
            && !self.declining.is_checked()
    }
}

impl FormHost for FakeForm {
    fn action(&self) -> String {
        "https://forms.example.test/rsvp".to_string()
    }

    fn fields(&self) -> Vec<FieldRef> {
        let mut fields = vec![
            self.name.clone() as FieldRef,
            self.email.clone() as FieldRef,
            self.message.clone() as FieldRef,
            self.attending.clone() as FieldRef,
            self.declining.clone() as FieldRef,
        ];
        fields.extend(self.extras.borrow().iter().cloned());
        fields
    }

    fn reset(&self) {
        self.resets.set(self.resets.get() + 1);
        for field in [&self.name, &self.email, &self.message] {
            field.set("");
        }
        self.attending.checked.set(false);
        self.declining.checked.set(false);
    }
}

struct PendingTimer {
    id: u64,
    due: u64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: u64,
    next_id: u64,
    timers: Vec<PendingTimer>,
    frames: Vec<Box<dyn FnOnce()>>,
    refuse_frames: bool,
}

/// Simulated clock: timers fire only from `advance`, frames only from `run_frames`.
#[derive(Default, Clone)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl ManualScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    pub fn pending_timers(&self) -> usize {
        self.clock.borrow().timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.clock.borrow().frames.len()
    }

    pub fn advance(&self, millis: u64) {
        let target = self.clock.borrow().now + millis;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let due = clock
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(_, timer)| (timer.due, timer.id))
                    .map(|(index, _)| index);
                due.map(|index| {
                    let timer = clock.timers.remove(index);
                    clock.now = timer.due;
                    timer.callback
                })
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }

    /// While set, `animation_frame` reports that nothing was scheduled.
    pub fn refuse_frames(&self, refuse: bool) {
        self.clock.borrow_mut().refuse_frames = refuse;
    }

    pub fn run_frames(&self) {
        let frames = std::mem::take(&mut self.clock.borrow_mut().frames);
        for frame in frames {
            frame();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn timeout(&self, millis: u32, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now + u64::from(millis);
        clock.timers.push(PendingTimer { id, due, callback });

        let weak: Weak<RefCell<Clock>> = Rc::downgrade(&self.clock);
        TimerHandle::new(move || {
            if let Some(clock) = weak.upgrade() {
                clock.borrow_mut().timers.retain(|timer| timer.id != id);
            }
        })
    }

    fn animation_frame(&self, callback: Box<dyn FnOnce()>) -> bool {
        let mut clock = self.clock.borrow_mut();
        if clock.refuse_frames {
            return false;
        }
        clock.frames.push(callback);
        true
    }
}

pub type Reply = Result<SubmitResponse, TransportError>;

pub enum Scripted {
    Respond(u16, &'static str),
    Fail(&'static str),
    /// Stays in flight until the paired sender answers.
    Held(oneshot::Receiver<Reply>),
}

impl Scripted {
    pub fn held() -> (oneshot::Sender<Reply>, Self) {
        let (sender, receiver) = oneshot::channel();
        (sender, Scripted::Held(receiver))
    }
}

/// Replays queued outcomes and records every submission it saw.
pub struct FakeTransport {
    script: RefCell<VecDeque<Scripted>>,
    pub sent: RefCell<Vec<Submission>>,
}

impl FakeTransport {
    pub fn new(script: Vec<Scripted>) -> Rc<Self> {
        Rc::new(Self {
            script: RefCell::new(script.into()),
            sent: RefCell::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.sent.borrow().len()
    }
}

impl Transport for FakeTransport {
    fn send(&self, submission: Submission) -> LocalBoxFuture<'_, Result<SubmitResponse, TransportError>> {
        self.sent.borrow_mut().push(submission);
        let next = self.script.borrow_mut().pop_front();
        Box::pin(async move {
            match next {
                Some(Scripted::Respond(status, body)) => Ok(SubmitResponse {
                    status,
                    body: body.to_string(),
                }),
                Some(Scripted::Fail(reason)) => Err(TransportError::Network(reason.to_string())),
                Some(Scripted::Held(reply)) => reply
                    .await
                    .unwrap_or_else(|_| Err(TransportError::Network("reply dropped".to_string()))),
                None => Err(TransportError::Network("no scripted response".to_string())),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropped_handle_never_fires() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let handle = scheduler.timeout(10, Box::new(move || flag.set(true)));
        drop(handle);
        scheduler.advance(20);
        assert!(!fired.get());
    }

    #[test]
    fn timers_fire_in_due_order() {
        let scheduler = ManualScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (delay, tag) in [(30, "c"), (10, "a"), (20, "b")] {
            let order = order.clone();
            scheduler.timeout(delay, Box::new(move || order.borrow_mut().push(tag))).forget();
        }
        scheduler.advance(25);
        assert_eq!(*order.borrow(), vec!["a", "b"]);
        scheduler.advance(5);
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }
}
