#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`AlarmFace`**: One alarm entry with day rule, time, pitch and beep length
//! - **`TimerFace`**: One countdown with pause/resume and optional auto-repeat
//! - **`WatchFace`**: The setup/activate/loop/resign/background contract every face implements
//! - **`Host`**: Trait to implement for your runtime (clock, buzzer, display, wake scheduler)
//! - **`Event`**: A discrete input delivered by the host, tagged with the tick subsecond
//! - **`EditCursor`**: Field selection, blink and quick-cycle state shared by both faces
//! - **`DateTime`**: Calendar time with weekday and unix timestamp conversion
//!
//! Faces never block or poll. Each call to `handle_event` runs to completion and
//! leaves follow-up work (wakes, tone sequences, tick rate changes) to the host.

#[macro_use]
mod log;

pub mod time;
pub mod types;
pub mod host;
pub mod tone;
pub mod cursor;
pub mod display;
pub mod alarm;
pub mod timer;

pub use alarm::AlarmFace;
pub use cursor::{BASE_TICK_HZ, EDIT_TICK_HZ, EditCursor, QUICK_TICK_HZ};
pub use display::Frame;
pub use host::{Host, Settings, WatchFace};
pub use time::{DateTime, Timestamp};
pub use timer::{TimerFace, TimerMode};
pub use tone::{Note, SignalCounter, ToneStep};
pub use types::{
    AlarmEntry, Button, DayRule, EntryError, Event, EventKind, FaceId, Indicator, Pitch,
    TimerEntry,
};

/// Highest beep-rounds setting of an alarm; plays an extended signal.
pub const MAX_BEEP_ROUNDS: u8 = 10;
