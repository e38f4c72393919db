//! Countdown timer face with pause, resume and auto-repeat.
//!
//! Provides [`TimerFace`], which runs a single countdown against the wall
//! clock. Expiry is delivered by a background wake scheduled with the host,
//! so the timer keeps running while other faces are shown.
//!
//! # Modes
//! * `Waiting` - idle, showing the stored duration
//! * `Setting` - editing: erase prompt, hours, minutes, seconds, repeat flag
//! * `Running` - counting down towards a scheduled wake
//! * `Pausing` - halted with the remaining time kept aside
//!
//! # Buttons
//! * Light long press - enter or leave `Setting` (from `Waiting`)
//! * Light press - next field while setting
//! * Alarm press - increment a field, or pause/resume a running timer
//! * Alarm long press - start from `Waiting`, cancel from `Running`/`Pausing`,
//!   or auto-increment a duration field while held

use core::fmt::Write;

use crate::cursor::{BASE_TICK_HZ, EDIT_TICK_HZ, EditCursor};
use crate::display::Frame;
use crate::host::{Host, WatchFace};
use crate::time::{DateTime, Timestamp};
use crate::tone::{Note, RING_REPEATS, RING_SEQUENCE, START_SEQUENCE, SignalCounter};
use crate::types::{Button, Event, EventKind, FaceId, Indicator, TimerEntry};

/// Number of editable timer fields.
pub const TIMER_FIELDS: usize = 5;

const FIELD_ERASE: u8 = 0;
const FIELD_HOURS: u8 = 1;
const FIELD_MINUTES: u8 = 2;
const FIELD_SECONDS: u8 = 3;
const FIELD_REPEAT: u8 = 4;

/// Display offset of the timer area; the face title sits before it.
const DISPLAY_OFFSET: u8 = 3;

const CANCEL_CLICK_MS: u16 = 50;

/// Run state of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerMode {
    #[default]
    Waiting,
    Setting,
    Running,
    Pausing,
}

/// Controls a single countdown.
#[derive(Debug, Clone)]
pub struct TimerFace {
    id: FaceId,
    entry: TimerEntry,
    mode: TimerMode,
    cursor: EditCursor<TIMER_FIELDS>,
    erase_pending: bool,
    target_ts: Timestamp,
    now_ts: Timestamp,
    paused_remaining: u32,
    pausing_seconds: u8,
    loop_count: u8,
    signal: SignalCounter,
}

impl TimerFace {
    /// Creates a waiting face with the default one minute countdown.
    pub fn new(id: FaceId) -> Self {
        Self::with_entry(id, TimerEntry::default())
    }

    /// Creates a waiting face around a previously stored entry.
    pub fn with_entry(id: FaceId, entry: TimerEntry) -> Self {
        Self {
            id,
            entry,
            mode: TimerMode::Waiting,
            cursor: EditCursor::new(),
            erase_pending: false,
            target_ts: 0,
            now_ts: 0,
            paused_remaining: 0,
            pausing_seconds: 0,
            loop_count: 0,
            signal: SignalCounter::new(),
        }
    }

    pub fn id(&self) -> FaceId {
        self.id
    }

    pub fn entry(&self) -> &TimerEntry {
        &self.entry
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Selected field in `Setting`: 0 erase, 1 hours, 2 minutes, 3 seconds, 4 repeat.
    pub fn field_index(&self) -> Option<u8> {
        (self.mode == TimerMode::Setting).then(|| self.cursor.index())
    }

    pub fn is_quick_cycling(&self) -> bool {
        self.cursor.is_quick_cycling()
    }

    /// Whether the erase prompt is answered with yes.
    pub fn is_erase_pending(&self) -> bool {
        self.erase_pending
    }

    /// Completed repeat cycles, 0-9 wrapping.
    pub fn loop_count(&self) -> u8 {
        self.loop_count
    }

    /// Wall-clock expiry while running.
    pub fn target_timestamp(&self) -> Option<Timestamp> {
        (self.mode == TimerMode::Running).then_some(self.target_ts)
    }

    /// Seconds left while running or paused.
    pub fn remaining_secs(&self) -> Option<u32> {
        match self.mode {
            TimerMode::Running => Some(self.target_ts.saturating_sub(self.now_ts)),
            TimerMode::Pausing => Some(self.paused_remaining),
            _ => None,
        }
    }

    /// Ring signal repetitions still queued.
    pub fn pending_rings(&self) -> u8 {
        self.signal.pending()
    }

    /// Starts the countdown from `Waiting` and plays the start chime.
    ///
    /// Does nothing in other modes or when the stored duration is zero.
    pub fn start<H: Host>(&mut self, host: &mut H) {
        if self.mode == TimerMode::Waiting {
            self.launch(host, true);
        }
    }

    /// Pauses a running countdown, keeping the remaining time aside.
    pub fn pause<H: Host>(&mut self, host: &mut H) {
        if self.mode != TimerMode::Running {
            return;
        }
        self.now_ts = host.now().to_unix(host.settings().tz_offset_minutes);
        self.paused_remaining = self.target_ts.saturating_sub(self.now_ts);
        self.pausing_seconds = 0;
        self.mode = TimerMode::Pausing;
        host.cancel_wake(self.id);
        info!("timer paused, {}s left", self.paused_remaining);
    }

    /// Resumes a paused countdown from now, without a chime.
    pub fn resume<H: Host>(&mut self, host: &mut H) {
        if self.mode == TimerMode::Pausing {
            self.launch(host, false);
        }
    }

    /// Cancels a running or paused countdown back to `Waiting`.
    pub fn cancel<H: Host>(&mut self, host: &mut H) {
        if !matches!(self.mode, TimerMode::Running | TimerMode::Pausing) {
            return;
        }
        info!("timer cancelled");
        self.halt(host);
        self.loop_count = 0;
        if host.settings().button_sound {
            host.play_tone(Note::C7, CANCEL_CLICK_MS);
        }
    }

    /// Handles expiry: rings, stops, and restarts when repeating.
    fn expire<H: Host>(&mut self, host: &mut H) {
        info!("timer expired");
        self.signal.arm(RING_REPEATS);
        host.play_sequence(&RING_SEQUENCE);
        self.halt(host);
        if self.entry.repeat {
            self.loop_count = (self.loop_count + 1) % 10;
            self.launch(host, false);
        } else {
            self.loop_count = 0;
        }
    }

    /// Sets the target from now and schedules the wake. A paused timer
    /// continues with its remaining time, otherwise the full duration runs.
    fn launch<H: Host>(&mut self, host: &mut H, chime: bool) {
        if self.entry.is_zero() {
            return;
        }
        let tz_offset = host.settings().tz_offset_minutes;
        self.now_ts = host.now().to_unix(tz_offset);
        let remaining = if self.mode == TimerMode::Pausing {
            self.paused_remaining
        } else {
            self.entry.duration_secs()
        };
        self.target_ts = self.now_ts.saturating_add(remaining);
        self.mode = TimerMode::Running;
        host.schedule_wake(self.id, DateTime::from_unix(self.target_ts, tz_offset));
        host.set_indicator(Indicator::Bell);
        if chime {
            // the chime replaces any ring still in flight
            self.signal.acknowledge();
            host.play_sequence(&START_SEQUENCE);
        }
        info!("timer running, {}s left", remaining);
    }

    /// Returns to `Waiting` and drops the scheduled wake.
    fn halt<H: Host>(&mut self, host: &mut H) {
        self.mode = TimerMode::Waiting;
        host.cancel_wake(self.id);
        host.clear_indicator(Indicator::Bell);
    }

    fn begin_setting<H: Host>(&mut self, host: &mut H) {
        debug!("timer edit start");
        self.mode = TimerMode::Setting;
        self.cursor.reset();
        self.erase_pending = false;
        host.set_tick_rate(EDIT_TICK_HZ);
    }

    fn end_setting<H: Host>(&mut self, host: &mut H) {
        debug!("timer edit end");
        self.cursor.reset();
        self.mode = TimerMode::Waiting;
        host.set_tick_rate(BASE_TICK_HZ);
    }

    fn next_field<H: Host>(&mut self, host: &mut H) {
        if self.erase_pending {
            self.entry.clear();
            self.erase_pending = false;
        }
        if !self.cursor.advance() {
            self.end_setting(host);
        } else if self.cursor.index() == FIELD_REPEAT && self.entry.is_zero() {
            // repeating a zero-length timer is meaningless
            self.cursor.set_index(FIELD_HOURS);
        }
    }

    fn increment_field(&mut self) {
        match self.cursor.index() {
            FIELD_ERASE => self.erase_pending = !self.erase_pending,
            FIELD_HOURS => self.entry.hours = (self.entry.hours + 1) % 24,
            FIELD_MINUTES => self.entry.minutes = (self.entry.minutes + 1) % 60,
            FIELD_SECONDS => self.entry.seconds = (self.entry.seconds + 1) % 60,
            _ => self.entry.repeat = !self.entry.repeat,
        }
    }

    fn tick<H: Host>(&mut self, mut subsecond: u8, host: &mut H) {
        match self.mode {
            TimerMode::Running => self.now_ts = self.now_ts.wrapping_add(1),
            TimerMode::Pausing => self.pausing_seconds = self.pausing_seconds.wrapping_add(1),
            _ if self.cursor.is_quick_cycling() => {
                let on_duration = matches!(
                    self.cursor.index(),
                    FIELD_HOURS | FIELD_MINUTES | FIELD_SECONDS
                );
                if on_duration && host.button_pressed(Button::Alarm) {
                    self.increment_field();
                    subsecond = 0;
                } else {
                    self.cursor.stop_quick_cycle(host);
                }
            }
            _ => {}
        }
        self.draw(subsecond, host);
    }

    fn alarm_button_up<H: Host>(&mut self, mut subsecond: u8, host: &mut H) {
        // a release that ends quick-cycle or silences the ring does nothing else
        let was_quick_cycling = self.cursor.stop_quick_cycle(host);
        let silenced = self.signal.acknowledge();
        if was_quick_cycling || silenced {
            return;
        }

        match self.mode {
            TimerMode::Running => self.pause(host),
            TimerMode::Pausing => self.resume(host),
            TimerMode::Setting => {
                self.increment_field();
                subsecond = 0;
            }
            TimerMode::Waiting => {}
        }
        self.draw(subsecond, host);
    }

    fn write_duration<H: Host>(&self, frame: &mut Frame, host: &mut H) {
        let _ = write!(
            frame,
            " {:2}{:02}{:02}",
            self.entry.hours, self.entry.minutes, self.entry.seconds
        );
        host.set_indicator(Indicator::Colon);
    }

    fn write_remaining<H: Host>(&self, frame: &mut Frame, host: &mut H) {
        let delta = self.target_ts.saturating_sub(self.now_ts);
        let seconds = delta % 60;
        let minutes = delta / 60 % 60;
        let hours = delta / 3600;
        let _ = write!(
            frame,
            "{}{:2}{:02}{:02}",
            self.loop_count, hours, minutes, seconds
        );
        host.set_indicator(Indicator::Colon);
    }

    fn draw<H: Host>(&self, subsecond: u8, host: &mut H) {
        let mut frame = Frame::new();
        match self.mode {
            TimerMode::Pausing => {
                host.show_indicator(Indicator::Bell, self.pausing_seconds % 2 == 0);
                // text only changes on the first blink frame
                if self.pausing_seconds != 1 {
                    return;
                }
                self.write_remaining(&mut frame, host);
            }
            TimerMode::Running => self.write_remaining(&mut frame, host),
            TimerMode::Setting => match self.cursor.index() {
                FIELD_ERASE => {
                    let _ = write!(frame, " CLEAR{}", yes_no(self.erase_pending));
                    host.clear_indicator(Indicator::Colon);
                }
                FIELD_REPEAT => {
                    let _ = write!(frame, "  LOOP{}", yes_no(self.entry.repeat));
                    host.clear_indicator(Indicator::Colon);
                }
                _ => self.write_duration(&mut frame, host),
            },
            TimerMode::Waiting => self.write_duration(&mut frame, host),
        }

        if self.loop_count == 0 {
            frame.blank(&[0]);
        }
        if self.mode == TimerMode::Setting && self.cursor.is_field_hidden(subsecond) {
            match self.cursor.index() {
                FIELD_ERASE | FIELD_REPEAT => frame.blank(&[6]),
                field => {
                    let field = field as usize;
                    frame.blank(&[field * 2 - 1, field * 2]);
                }
            }
        }
        host.write_display(frame.as_str(), DISPLAY_OFFSET);
        host.show_indicator(Indicator::Lap, self.entry.repeat);
    }
}

fn yes_no(flag: bool) -> char {
    if flag { 'y' } else { 'n' }
}

impl WatchFace for TimerFace {
    fn setup(id: FaceId) -> Self {
        debug!("timer face setup");
        Self::new(id)
    }

    fn activate<H: Host>(&mut self, host: &mut H) {
        host.write_display("TR", 0);
        host.set_indicator(Indicator::Colon);
        if self.mode == TimerMode::Running {
            self.now_ts = host.now().to_unix(host.settings().tz_offset_minutes);
            host.set_indicator(Indicator::Bell);
        } else {
            self.pausing_seconds = 1;
            self.signal.acknowledge();
        }
    }

    fn handle_event<H: Host>(&mut self, event: Event, host: &mut H) -> bool {
        match event.kind {
            EventKind::Activate => self.draw(event.subsecond, host),
            EventKind::Tick => self.tick(event.subsecond, host),
            EventKind::LightButtonUp => {
                if self.mode == TimerMode::Setting {
                    self.next_field(host);
                } else {
                    host.illuminate();
                }
                self.draw(event.subsecond, host);
            }
            EventKind::AlarmButtonUp => self.alarm_button_up(event.subsecond, host),
            EventKind::LightLongPress => {
                match self.mode {
                    TimerMode::Waiting => self.begin_setting(host),
                    TimerMode::Setting => self.end_setting(host),
                    TimerMode::Running | TimerMode::Pausing => {}
                }
                self.draw(event.subsecond, host);
            }
            EventKind::BackgroundTask => self.expire(host),
            EventKind::AlarmLongPress => {
                match self.mode {
                    TimerMode::Setting => {
                        if matches!(
                            self.cursor.index(),
                            FIELD_HOURS | FIELD_MINUTES | FIELD_SECONDS
                        ) {
                            self.cursor.start_quick_cycle(host);
                        }
                    }
                    TimerMode::Waiting => self.start(host),
                    TimerMode::Running | TimerMode::Pausing => self.cancel(host),
                }
                self.draw(event.subsecond, host);
            }
            EventKind::AlarmLongUp => {
                self.cursor.stop_quick_cycle(host);
            }
            EventKind::ModeLongPress | EventKind::Timeout => {
                self.cursor.stop_quick_cycle(host);
                host.navigate_home();
            }
            EventKind::Resign => self.resign(host),
            EventKind::LightButtonDown => {}
        }
        true
    }

    fn resign<H: Host>(&mut self, host: &mut H) {
        if self.mode == TimerMode::Setting {
            self.cursor.reset();
            self.mode = TimerMode::Waiting;
        }
        self.cursor.clear_quick_cycle();
        host.set_tick_rate(BASE_TICK_HZ);
    }

    fn sequence_complete<H: Host>(&mut self, host: &mut H) {
        if self.signal.advance() {
            host.play_sequence(&RING_SEQUENCE);
        }
    }
}
