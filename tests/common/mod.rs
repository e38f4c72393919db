//! Shared test infrastructure for wrist-faces integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use wrist_faces::{
    Button, DateTime, Event, EventKind, FaceId, Host, Indicator, Note, Settings, Timestamp,
    ToneStep, WatchFace,
};

// ============================================================================
// Recorded Host Calls
// ============================================================================

/// Every service call a face makes on the mock host
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ScheduleWake(FaceId, DateTime),
    CancelWake(FaceId),
    TickRate(u8),
    Tone(Note, u16),
    Sequence(&'static [ToneStep]),
    AlarmBeeps(u8, Note),
    Buzzer(bool),
    SetIndicator(Indicator),
    ClearIndicator(Indicator),
    Display(String, u8),
    Illuminate,
    AlarmActive(bool),
    NavigateHome,
    Delay(u16),
}

// ============================================================================
// Mock Host
// ============================================================================

/// Mock host with a controllable clock and alarm button level
pub struct MockHost {
    pub now: DateTime,
    pub settings: Settings,
    pub alarm_held: bool,
    pub buzzer_on: bool,
    pub calls: Vec<Call>,
    wake: Option<(FaceId, DateTime)>,
    indicators: Vec<Indicator>,
    tick_rate: u8,
}

impl MockHost {
    pub fn new(now: DateTime) -> Self {
        Self {
            now,
            settings: Settings::default(),
            alarm_held: false,
            buzzer_on: true,
            calls: Vec::new(),
            wake: None,
            indicators: Vec::new(),
            tick_rate: 1,
        }
    }

    /// Current time as a unix timestamp in the configured zone
    pub fn timestamp(&self) -> Timestamp {
        self.now.to_unix(self.settings.tz_offset_minutes)
    }

    /// Advance the clock by whole seconds
    pub fn advance_secs(&mut self, secs: u32) {
        let offset = self.settings.tz_offset_minutes;
        self.now = DateTime::from_unix(self.timestamp() + secs, offset);
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn tick_rate(&self) -> u8 {
        self.tick_rate
    }

    pub fn scheduled_wake(&self) -> Option<(FaceId, DateTime)> {
        self.wake
    }

    pub fn indicator(&self, indicator: Indicator) -> bool {
        self.indicators.contains(&indicator)
    }

    /// Text and offset of the most recent display write
    pub fn last_display(&self) -> Option<(&str, u8)> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::Display(text, offset) => Some((text.as_str(), *offset)),
            _ => None,
        })
    }

    pub fn display_writes(&self) -> usize {
        self.count(|call| matches!(call, Call::Display(..)))
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn made(&self, call: &Call) -> bool {
        self.calls.contains(call)
    }

    /// Most recent published alarm-active flag
    pub fn alarm_active(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::AlarmActive(active) => Some(*active),
            _ => None,
        })
    }
}

impl Host for MockHost {
    fn now(&self) -> DateTime {
        self.now
    }

    fn settings(&self) -> Settings {
        self.settings
    }

    fn schedule_wake(&mut self, face: FaceId, at: DateTime) {
        self.wake = Some((face, at));
        self.calls.push(Call::ScheduleWake(face, at));
    }

    fn cancel_wake(&mut self, face: FaceId) {
        if matches!(self.wake, Some((id, _)) if id == face) {
            self.wake = None;
        }
        self.calls.push(Call::CancelWake(face));
    }

    fn set_tick_rate(&mut self, hz: u8) {
        self.tick_rate = hz;
        self.calls.push(Call::TickRate(hz));
    }

    fn play_tone(&mut self, note: Note, duration_ms: u16) {
        self.calls.push(Call::Tone(note, duration_ms));
    }

    fn play_sequence(&mut self, sequence: &'static [ToneStep]) {
        self.calls.push(Call::Sequence(sequence));
    }

    fn play_alarm_beeps(&mut self, rounds: u8, note: Note) {
        self.calls.push(Call::AlarmBeeps(rounds, note));
    }

    fn buzzer_enabled(&self) -> bool {
        self.buzzer_on
    }

    fn set_buzzer_enabled(&mut self, enabled: bool) {
        self.buzzer_on = enabled;
        self.calls.push(Call::Buzzer(enabled));
    }

    fn set_indicator(&mut self, indicator: Indicator) {
        if !self.indicators.contains(&indicator) {
            self.indicators.push(indicator);
        }
        self.calls.push(Call::SetIndicator(indicator));
    }

    fn clear_indicator(&mut self, indicator: Indicator) {
        self.indicators.retain(|i| *i != indicator);
        self.calls.push(Call::ClearIndicator(indicator));
    }

    fn write_display(&mut self, text: &str, offset: u8) {
        self.calls.push(Call::Display(text.to_string(), offset));
    }

    fn button_pressed(&self, button: Button) -> bool {
        button == Button::Alarm && self.alarm_held
    }

    fn illuminate(&mut self) {
        self.calls.push(Call::Illuminate);
    }

    fn publish_alarm_active(&mut self, active: bool) {
        self.calls.push(Call::AlarmActive(active));
    }

    fn navigate_home(&mut self) {
        self.calls.push(Call::NavigateHome);
    }

    fn delay_ms(&mut self, ms: u16) {
        self.calls.push(Call::Delay(ms));
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Deliver an event at subsecond 0
pub fn send<F: WatchFace>(face: &mut F, host: &mut MockHost, kind: EventKind) -> bool {
    face.handle_event(Event::new(kind, 0), host)
}

/// Deliver an event at a given subsecond
pub fn send_at<F: WatchFace>(
    face: &mut F,
    host: &mut MockHost,
    kind: EventKind,
    subsecond: u8,
) -> bool {
    face.handle_event(Event::new(kind, subsecond), host)
}

/// Deliver `n` tick events
pub fn ticks<F: WatchFace>(face: &mut F, host: &mut MockHost, n: usize) {
    for _ in 0..n {
        send(face, host, EventKind::Tick);
    }
}

/// Monday 2024-01-08 at the given time
pub fn monday(hour: u8, minute: u8) -> DateTime {
    DateTime::new(2024, 1, 8, hour, minute, 0)
}

/// Saturday 2024-01-13 at the given time
pub fn saturday(hour: u8, minute: u8) -> DateTime {
    DateTime::new(2024, 1, 13, hour, minute, 0)
}
