use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::scheduler::{Scheduler, TimerHandle};

/// Runs `update` at most once per animation frame however often `request` fires.
pub struct FrameGate {
    scheduler: Rc<dyn Scheduler>,
    update: Rc<dyn Fn()>,
    pending: Rc<Cell<bool>>,
}

impl FrameGate {
    pub fn new(scheduler: Rc<dyn Scheduler>, update: impl Fn() + 'static) -> Self {
        Self {
            scheduler,
            update: Rc::new(update),
            pending: Rc::new(Cell::new(false)),
        }
    }

    pub fn request(&self) {
        if self.pending.replace(true) {
            return;
        }
        let update = self.update.clone();
        let pending = self.pending.clone();
        let scheduled = self.scheduler.animation_frame(Box::new(move || {
            update();
            pending.set(false);
        }));
        if !scheduled {
            self.pending.set(false);
        }
    }
}

/// Runs `action` once input has been quiet for `quiet_ms`.
pub struct Debouncer {
    scheduler: Rc<dyn Scheduler>,
    quiet_ms: u32,
    action: Rc<dyn Fn()>,
    timer: RefCell<Option<TimerHandle>>,
}

impl Debouncer {
    pub fn new(scheduler: Rc<dyn Scheduler>, quiet_ms: u32, action: impl Fn() + 'static) -> Self {
        Self {
            scheduler,
            quiet_ms,
            action: Rc::new(action),
            timer: RefCell::new(None),
        }
    }

    pub fn poke(&self) {
        let action = self.action.clone();
        let timer = self.scheduler.timeout(self.quiet_ms, Box::new(move || action()));
        // Replacing the handle cancels the previous timer.
        *self.timer.borrow_mut() = Some(timer);
    }
}
