use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use log::Level;
use thiserror::Error;

/// Local wall-clock moment the ceremony starts.
pub const EVENT_MOMENT: &str = "2026-06-15T15:00:00";

pub const COUNTDOWN_TICK_MS: u32 = 1_000;
pub const BANNER_LIFETIME_MS: u32 = 5_000;
pub const RESIZE_QUIET_MS: u32 = 250;
pub const FONT_TIMEOUT_MS: u32 = 3_000;
pub const GALLERY_PRESS_MS: u32 = 150;

pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;
pub const SCROLL_SPY_OFFSET_PX: f64 = 100.0;
pub const PARALLAX_RATE: f64 = -0.5;

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

pub const SKIP_LINK_TARGET: &str = "#countdown";
pub const FONTS_STYLESHEET: &str = "https://fonts.googleapis.com/css2?family=Playfair+Display:wght@400;700&family=Inter:wght@300;400;500;600&display=swap";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("event moment {0:?} is not a valid timestamp")]
    Malformed(String),
    #[error("event moment {0:?} does not exist in the local timezone")]
    NotLocal(String),
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

pub fn event_moment() -> Result<DateTime<Utc>, ConfigError> {
    parse_local_moment(EVENT_MOMENT, &Local)
}

/// Reads a `YYYY-MM-DDTHH:MM:SS` literal as wall-clock time in `zone`.
pub fn parse_local_moment<Tz: TimeZone>(literal: &str, zone: &Tz) -> Result<DateTime<Utc>, ConfigError> {
    let naive = NaiveDateTime::parse_from_str(literal, "%Y-%m-%dT%H:%M:%S")
        .map_err(|_| ConfigError::Malformed(literal.to_string()))?;
    zone.from_local_datetime(&naive)
        .earliest()
        .map(|moment| moment.with_timezone(&Utc))
        .ok_or_else(|| ConfigError::NotLocal(literal.to_string()))
}
