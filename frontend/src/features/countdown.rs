use chrono::{DateTime, Utc};
use gloo_timers::callback::Interval;
use log::debug;
use web_sys::Document;

use crate::config;
use crate::dom::{self, DomElement, ElementRef};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    /// Breakdown of `target - now`, all zero once the target has passed.
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let left = (target - now).num_milliseconds();
        if left <= 0 {
            return Self::default();
        }
        Self {
            days: left / MS_PER_DAY,
            hours: (left % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (left % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (left % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    pub fn digits(&self) -> [String; 4] {
        [self.days, self.hours, self.minutes, self.seconds].map(|value| format!("{:02}", value))
    }
}

pub struct Countdown {
    target: DateTime<Utc>,
    slots: [ElementRef; 4],
}

impl Countdown {
    /// Slots in days, hours, minutes, seconds order.
    pub fn new(target: DateTime<Utc>, slots: [ElementRef; 4]) -> Self {
        Self { target, slots }
    }

    pub fn render(&self, now: DateTime<Utc>) -> TimeLeft {
        let left = TimeLeft::until(self.target, now);
        for (slot, text) in self.slots.iter().zip(left.digits()) {
            slot.set_text(&text);
        }
        left
    }
}

pub fn attach(document: &Document, target: DateTime<Utc>) -> Option<Interval> {
    let mut slots = Vec::with_capacity(4);
    for id in ["days", "hours", "minutes", "seconds"] {
        match dom::by_id(document, id) {
            Some(slot) => slots.push(dom::element_ref(slot)),
            None => {
                debug!("countdown slot #{} missing, countdown disabled", id);
                return None;
            }
        }
    }
    let slots: [ElementRef; 4] = slots.try_into().ok()?;
    let countdown = Countdown::new(target, slots);
    countdown.render(Utc::now());

    Some(Interval::new(config::COUNTDOWN_TICK_MS, move || {
        countdown.render(Utc::now());
    }))
}
