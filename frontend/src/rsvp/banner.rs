use std::cell::RefCell;
use std::rc::Rc;

use crate::config;
use crate::dom::{DomElement, ElementRef};
use crate::scheduler::{Scheduler, TimerHandle};

const HIDDEN: &str = "hidden";

/// Success and error banners. Showing one hides the other and restarts the
/// auto-hide timer.
pub struct Banners {
    success: ElementRef,
    error: ElementRef,
    scheduler: Rc<dyn Scheduler>,
    hide_timer: RefCell<Option<TimerHandle>>,
}

impl Banners {
    pub fn new(success: ElementRef, error: ElementRef, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            success,
            error,
            scheduler,
            hide_timer: RefCell::new(None),
        }
    }

    pub fn show_success(&self, message: &str) {
        self.show(&self.success, message);
    }

    pub fn show_error(&self, message: &str) {
        self.show(&self.error, message);
    }

    pub fn hide_all(&self) {
        self.hide_timer.borrow_mut().take();
        self.success.add_class(HIDDEN);
        self.error.add_class(HIDDEN);
    }

    fn show(&self, banner: &ElementRef, message: &str) {
        self.hide_all();
        banner.set_text(message);
        banner.remove_class(HIDDEN);

        let expiring = banner.clone();
        let timer = self.scheduler.timeout(
            config::BANNER_LIFETIME_MS,
            Box::new(move || expiring.add_class(HIDDEN)),
        );
        *self.hide_timer.borrow_mut() = Some(timer);
    }
}
