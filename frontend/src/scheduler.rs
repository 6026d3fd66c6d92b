use gloo_timers::callback::Timeout;
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Pending timer. Dropping it cancels the callback, `forget` lets it run.
#[must_use = "dropping a TimerHandle cancels the timer"]
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    pub fn forget(mut self) {
        self.cancel = None;
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

pub trait Scheduler {
    fn timeout(&self, millis: u32, callback: Box<dyn FnOnce()>) -> TimerHandle;
    /// Returns `false` when the frame could not be requested; the callback
    /// will then never run.
    fn animation_frame(&self, callback: Box<dyn FnOnce()>) -> bool;
}

pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn timeout(&self, millis: u32, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let timeout = Timeout::new(millis, move || callback());
        TimerHandle::new(move || drop(timeout))
    }

    fn animation_frame(&self, callback: Box<dyn FnOnce()>) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let frame = Closure::once_into_js(move || callback());
        if window.request_animation_frame(frame.unchecked_ref()).is_err() {
            warn!("requestAnimationFrame rejected the callback");
            return false;
        }
        true
    }
}
