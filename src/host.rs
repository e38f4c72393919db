//! Host runtime abstraction and the face contract.
//!
//! Defines the [`Host`] trait through which faces reach the clock, buzzer,
//! display and wake scheduler, and the [`WatchFace`] trait every face
//! implements for the host's dispatch loop.

use crate::time::DateTime;
use crate::tone::{Note, ToneStep};
use crate::types::{Button, Event, FaceId, Indicator};

/// User preferences owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Show hours 0-23 instead of 12 hour time with a PM indicator.
    pub clock_24h: bool,
    /// Play a click on button actions that have no other audible feedback.
    pub button_sound: bool,
    /// Local time zone offset east of UTC, in minutes.
    pub tz_offset_minutes: i16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            clock_24h: true,
            button_sound: true,
            tz_offset_minutes: 0,
        }
    }
}

/// Trait for abstracting the watch runtime.
///
/// Implement this for your firmware's services. None of the methods can fail;
/// implementations handle hardware errors internally.
pub trait Host {
    /// Current local date and time from the RTC.
    fn now(&self) -> DateTime;

    /// Current user settings.
    fn settings(&self) -> Settings;

    /// Schedules a one-shot background wake for `face` at local time `at`.
    ///
    /// Replaces any wake already scheduled for that face.
    fn schedule_wake(&mut self, face: FaceId, at: DateTime);

    /// Cancels the pending wake of `face`, if any.
    fn cancel_wake(&mut self, face: FaceId);

    /// Requests the tick rate in Hz for the active face.
    fn set_tick_rate(&mut self, hz: u8);

    /// Plays a single note, blocking for its duration.
    fn play_tone(&mut self, note: Note, duration_ms: u16);

    /// Starts playing a tone sequence in the background.
    ///
    /// When playback ends the host must call
    /// [`WatchFace::sequence_complete`] on the face that started it.
    fn play_sequence(&mut self, sequence: &'static [ToneStep]);

    /// Plays `rounds` rounds of the standard alarm signal at `note`.
    fn play_alarm_beeps(&mut self, rounds: u8, note: Note);

    /// Whether the buzzer peripheral is currently powered.
    fn buzzer_enabled(&self) -> bool;

    /// Powers the buzzer peripheral on or off.
    fn set_buzzer_enabled(&mut self, enabled: bool);

    fn set_indicator(&mut self, indicator: Indicator);

    fn clear_indicator(&mut self, indicator: Indicator);

    /// Writes `text` to the display starting at character `offset`.
    fn write_display(&mut self, text: &str, offset: u8);

    /// True while `button` is physically held down.
    fn button_pressed(&self, button: Button) -> bool;

    /// Turns on the backlight for the host's configured duration.
    fn illuminate(&mut self);

    /// Publishes whether any alarm will go off within the next 24 hours.
    fn publish_alarm_active(&mut self, active: bool);

    /// Returns to the home face.
    fn navigate_home(&mut self);

    /// Busy-waits for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u16);

    /// Sets or clears an indicator.
    fn show_indicator(&mut self, indicator: Indicator, on: bool) {
        if on {
            self.set_indicator(indicator);
        } else {
            self.clear_indicator(indicator);
        }
    }
}

/// Contract between a face and the host's dispatch loop.
///
/// The host calls `setup` once, then `activate` each time the face comes into
/// view, `handle_event` for every event while it is shown, and `resign` when
/// it leaves. `wants_background_task` is polled once per minute whether or
/// not the face is shown.
pub trait WatchFace {
    /// Creates the face's persistent state with default values.
    fn setup(id: FaceId) -> Self;

    /// Prepares the display when the face comes into view.
    fn activate<H: Host>(&mut self, host: &mut H);

    /// Handles one event. Returns true when the host may sleep afterwards.
    fn handle_event<H: Host>(&mut self, event: Event, host: &mut H) -> bool;

    /// Leaves the face, restoring any shared resources it changed.
    fn resign<H: Host>(&mut self, host: &mut H);

    /// Whether the face needs a `BackgroundTask` event right now.
    fn wants_background_task<H: Host>(&mut self, host: &mut H) -> bool {
        let _ = host;
        false
    }

    /// Notifies the face that a sequence started with
    /// [`Host::play_sequence`] finished playing.
    fn sequence_complete<H: Host>(&mut self, host: &mut H) {
        let _ = host;
    }
}
