//! Alarm face: one alarm entry with an in-place editor.
//!
//! Provides [`AlarmFace`], which decides once per minute whether its alarm
//! fires, predicts whether it will fire within the next 24 hours for the
//! host's status indicator, and lets the user edit day rule, time, pitch and
//! beep length with the light and alarm buttons.
//!
//! # Buttons
//! * Light long press - enter or leave edit mode
//! * Light press - next field; leaving the last field ends editing
//! * Alarm press - increment the selected field
//! * Alarm long press - outside editing, toggle the alarm. Keep holding for
//!   two ticks to take the toggle back. Inside editing on hour or minute,
//!   auto-increment until released.

use core::fmt::Write;

use crate::cursor::{BASE_TICK_HZ, EDIT_TICK_HZ, EditCursor};
use crate::display::Frame;
use crate::host::{Host, WatchFace};
use crate::time::DateTime;
use crate::tone::{Note, play_short_beep};
use crate::types::{AlarmEntry, DayRule, Event, EventKind, FaceId, Indicator};
use crate::MAX_BEEP_ROUNDS;

/// Number of editable alarm fields.
pub const ALARM_FIELDS: usize = 5;

const FIELD_DAY: u8 = 0;
const FIELD_HOUR: u8 = 1;
const FIELD_MINUTE: u8 = 2;
const FIELD_PITCH: u8 = 3;

/// Ticks an alarm long press may be held before its toggle is reverted.
const CONFIRM_TICKS: u8 = 2;

/// How long the reverted signal indicator is held visible.
const REVERT_FLASH_MS: u16 = 275;

/// Rounds played for the extended beep setting.
const EXTENDED_SIGNAL_ROUNDS: u8 = 20;

/// Display positions blanked while each field blinks.
const BLINK_POSITIONS: [&[usize]; ALARM_FIELDS] = [&[0, 1], &[4, 5], &[6, 7], &[2], &[3]];

const SEPARATOR: char = '=';

/// Controls a single alarm entry.
#[derive(Debug, Clone)]
pub struct AlarmFace {
    id: FaceId,
    entry: AlarmEntry,
    editing: bool,
    cursor: EditCursor<ALARM_FIELDS>,
    confirm_wait_ticks: Option<u8>,
    last_fired_minute: Option<u8>,
}

impl AlarmFace {
    /// Creates a face with the default alarm: every day at 00:00, medium
    /// pitch, five beep rounds, disabled.
    pub fn new(id: FaceId) -> Self {
        Self::with_entry(id, AlarmEntry::default())
    }

    /// Creates a face around a previously stored entry.
    pub fn with_entry(id: FaceId, entry: AlarmEntry) -> Self {
        Self {
            id,
            entry,
            editing: false,
            cursor: EditCursor::new(),
            confirm_wait_ticks: None,
            last_fired_minute: None,
        }
    }

    pub fn id(&self) -> FaceId {
        self.id
    }

    /// The alarm entry as currently edited.
    pub fn entry(&self) -> &AlarmEntry {
        &self.entry
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Selected field while editing: 0 day, 1 hour, 2 minute, 3 pitch, 4 beeps.
    pub fn field_index(&self) -> Option<u8> {
        self.editing.then(|| self.cursor.index())
    }

    pub fn is_quick_cycling(&self) -> bool {
        self.cursor.is_quick_cycling()
    }

    /// Whether the enable-toggle confirmation window is open.
    pub fn is_confirming(&self) -> bool {
        self.confirm_wait_ticks.is_some()
    }

    /// Decides whether the alarm fires in the current minute.
    ///
    /// Returns true at most once per calendar minute, so the host may poll
    /// more often than once a minute. Every twelfth minute the 24 hour
    /// active summary is republished as well.
    pub fn should_fire_now<H: Host>(&mut self, host: &mut H) -> bool {
        let now = host.now();
        if self.last_fired_minute == Some(now.minute) {
            return false;
        }

        let fires = self.fires_at(&now);
        self.last_fired_minute = fires.then_some(now.minute);

        if now.minute % 12 == 0 {
            self.publish_active_summary(&now, host);
        }

        if fires {
            info!("alarm fires at {}:{}", now.hour, now.minute);
        }
        fires
    }

    /// Whether the alarm is due at `now`, ignoring the once-per-minute guard.
    pub fn fires_at(&self, now: &DateTime) -> bool {
        self.entry.enabled
            && self.entry.hour == now.hour
            && self.entry.minute == now.minute
            && self.entry.day_rule.matches_weekday(now.weekday())
    }

    /// Whether the alarm goes off within the rolling 24 hours after `now`.
    pub fn is_active_within_day(&self, now: &DateTime) -> bool {
        if !self.entry.enabled {
            return false;
        }

        let weekday = now.weekday();
        let now_minutes = now.minutes_of_day();
        let alarm_minutes = self.entry.minutes_of_day();
        let later_today = alarm_minutes >= now_minutes;
        let by_now_tomorrow = alarm_minutes <= now_minutes;

        match self.entry.day_rule {
            DayRule::EveryDay => true,
            DayRule::Workday => {
                weekday < 4 || (weekday == 4 && later_today) || (weekday == 6 && by_now_tomorrow)
            }
            DayRule::Weekend => {
                weekday == 5 || (weekday == 6 && later_today) || (weekday == 4 && by_now_tomorrow)
            }
            single => {
                let day = single as u8;
                (day == weekday && later_today) || ((weekday + 1) % 7 == day && by_now_tomorrow)
            }
        }
    }

    /// Recomputes the 24 hour active summary and publishes it to the host.
    pub fn recompute_active_summary<H: Host>(&self, host: &mut H) {
        let now = host.now();
        self.publish_active_summary(&now, host);
    }

    fn publish_active_summary<H: Host>(&self, now: &DateTime, host: &mut H) {
        let active = self.is_active_within_day(now);
        debug!("alarm active within 24h: {}", active);
        host.publish_alarm_active(active);
    }

    /// Plays a sample of the current pitch and beep setting.
    pub fn play_preview<H: Host>(&self, host: &mut H) {
        let note = Note::from(self.entry.pitch);
        if self.entry.beep_rounds == 0 {
            play_short_beep(host, note);
        } else {
            host.play_alarm_beeps(1, note);
        }
    }

    /// Plays the alarm signal for a background wake.
    fn ring<H: Host>(&self, host: &mut H) {
        let note = Note::from(self.entry.pitch);
        match self.entry.beep_rounds {
            0 if host.buzzer_enabled() => play_short_beep(host, note),
            0 => {
                host.set_buzzer_enabled(true);
                play_short_beep(host, note);
                host.set_buzzer_enabled(false);
            }
            MAX_BEEP_ROUNDS => host.play_alarm_beeps(EXTENDED_SIGNAL_ROUNDS, note),
            rounds => host.play_alarm_beeps(rounds, note),
        }
    }

    fn begin_editing<H: Host>(&mut self, host: &mut H) {
        debug!("alarm edit start");
        self.editing = true;
        self.cursor.reset();
        host.set_tick_rate(EDIT_TICK_HZ);
    }

    fn end_editing<H: Host>(&mut self, host: &mut H) {
        debug!("alarm edit end");
        self.editing = false;
        self.cursor.reset();
        host.set_tick_rate(BASE_TICK_HZ);
    }

    fn increment_field<H: Host>(&mut self, host: &mut H) {
        match self.cursor.index() {
            FIELD_DAY => self.entry.day_rule = self.entry.day_rule.next(),
            FIELD_HOUR => {
                self.cursor.stop_quick_cycle(host);
                self.entry.hour = (self.entry.hour + 1) % 24;
            }
            FIELD_MINUTE => {
                self.cursor.stop_quick_cycle(host);
                self.entry.minute = (self.entry.minute + 1) % 60;
            }
            FIELD_PITCH => {
                self.entry.pitch = self.entry.pitch.next();
                self.play_preview(host);
            }
            _ => {
                self.entry.beep_rounds = (self.entry.beep_rounds + 1) % (MAX_BEEP_ROUNDS + 1);
                if self.entry.beep_rounds <= 1 {
                    self.play_preview(host);
                }
            }
        }
    }

    fn on_hour_or_minute(&self) -> bool {
        matches!(self.cursor.index(), FIELD_HOUR | FIELD_MINUTE)
    }

    fn tick<H: Host>(&mut self, subsecond: u8, host: &mut H) {
        if self.cursor.is_quick_cycling() {
            match self.cursor.index() {
                FIELD_HOUR => self.entry.hour = (self.entry.hour + 1) % 24,
                FIELD_MINUTE => self.entry.minute = (self.entry.minute + 1) % 60,
                _ => {
                    self.cursor.stop_quick_cycle(host);
                }
            }
        } else if !self.editing {
            let Some(ticks) = self.confirm_wait_ticks else {
                return;
            };
            let ticks = ticks + 1;
            if ticks < CONFIRM_TICKS {
                self.confirm_wait_ticks = Some(ticks);
                return;
            }

            // held through the window: take the toggle back
            self.confirm_wait_ticks = None;
            self.entry.enabled = !self.entry.enabled;
            info!("alarm toggle reverted, enabled={}", self.entry.enabled);
            self.show_signal(host);
            host.delay_ms(REVERT_FLASH_MS);
        }
        self.draw(subsecond, host);
    }

    fn show_signal<H: Host>(&self, host: &mut H) {
        host.show_indicator(Indicator::Signal, self.entry.enabled);
    }

    fn draw<H: Host>(&self, subsecond: u8, host: &mut H) {
        let mut hour = self.entry.hour;
        if host.settings().clock_24h {
            host.set_indicator(Indicator::Clock24h);
        } else {
            host.show_indicator(Indicator::Pm, hour >= 12);
            hour %= 12;
            if hour == 0 {
                hour = 12;
            }
        }

        let mut frame = Frame::new();
        let _ = write!(
            frame,
            "{}{}{}{:2}{:02}  ",
            self.entry.day_rule.label(),
            SEPARATOR,
            beep_glyph(self.entry.beep_rounds),
            hour,
            self.entry.minute
        );
        if self.editing && self.cursor.is_field_hidden(subsecond) {
            frame.blank(BLINK_POSITIONS[self.cursor.index() as usize]);
        }
        host.write_display(frame.as_str(), 0);
        self.show_signal(host);
    }
}

/// Display glyph for a beep-rounds setting.
fn beep_glyph(beep_rounds: u8) -> char {
    match beep_rounds {
        0 => 'o',
        MAX_BEEP_ROUNDS => 'L',
        n => char::from(b'0' + n),
    }
}

impl WatchFace for AlarmFace {
    fn setup(id: FaceId) -> Self {
        debug!("alarm face setup");
        Self::new(id)
    }

    fn activate<H: Host>(&mut self, host: &mut H) {
        host.set_indicator(Indicator::Colon);
    }

    fn handle_event<H: Host>(&mut self, event: Event, host: &mut H) -> bool {
        match event.kind {
            EventKind::Tick => self.tick(event.subsecond, host),
            EventKind::Activate => self.draw(event.subsecond, host),
            EventKind::LightButtonUp => {
                if !self.editing {
                    host.illuminate();
                } else if !self.cursor.advance() {
                    self.end_editing(host);
                    self.draw(event.subsecond, host);
                }
            }
            EventKind::LightLongPress => {
                if self.editing {
                    self.end_editing(host);
                } else {
                    self.begin_editing(host);
                }
                self.draw(event.subsecond, host);
            }
            EventKind::AlarmButtonUp => {
                if self.editing {
                    self.increment_field(host);
                } else {
                    self.confirm_wait_ticks = None;
                }
                self.draw(event.subsecond, host);
            }
            EventKind::AlarmLongPress => {
                if !self.editing {
                    self.entry.enabled = !self.entry.enabled;
                    self.confirm_wait_ticks = Some(0);
                    info!("alarm toggled, enabled={}", self.entry.enabled);
                } else if self.on_hour_or_minute() {
                    self.cursor.start_quick_cycle(host);
                }
                self.draw(event.subsecond, host);
            }
            EventKind::AlarmLongUp => {
                if !self.editing {
                    self.confirm_wait_ticks = None;
                } else if self.on_hour_or_minute() {
                    self.cursor.stop_quick_cycle(host);
                }
            }
            EventKind::BackgroundTask => self.ring(host),
            EventKind::Timeout => host.navigate_home(),
            EventKind::Resign => self.resign(host),
            EventKind::LightButtonDown | EventKind::ModeLongPress => {}
        }
        true
    }

    fn resign<H: Host>(&mut self, host: &mut H) {
        self.editing = false;
        self.cursor.reset();
        self.recompute_active_summary(host);
        self.confirm_wait_ticks = None;
        host.set_tick_rate(BASE_TICK_HZ);
    }

    fn wants_background_task<H: Host>(&mut self, host: &mut H) -> bool {
        self.should_fire_now(host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_with(day_rule: DayRule, hour: u8, minute: u8) -> AlarmFace {
        let entry = AlarmEntry::new(day_rule, hour, minute, Default::default(), 5, true).unwrap();
        AlarmFace::with_entry(FaceId(0), entry)
    }

    #[test]
    fn beep_glyphs() {
        assert_eq!(beep_glyph(0), 'o');
        assert_eq!(beep_glyph(1), '1');
        assert_eq!(beep_glyph(9), '9');
        assert_eq!(beep_glyph(10), 'L');
    }

    #[test]
    fn fires_at_matches_time_and_day() {
        // 2024-01-06 is a Saturday, 2024-01-08 a Monday
        let face = face_with(DayRule::Workday, 8, 0);
        assert!(!face.fires_at(&DateTime::new(2024, 1, 6, 8, 0, 0)));
        assert!(face.fires_at(&DateTime::new(2024, 1, 8, 8, 0, 0)));
        assert!(!face.fires_at(&DateTime::new(2024, 1, 8, 8, 1, 0)));
    }

    #[test]
    fn single_day_active_for_tomorrow_morning() {
        // Sunday 22:00, alarm Monday 07:00
        let face = face_with(DayRule::Monday, 7, 0);
        assert!(face.is_active_within_day(&DateTime::new(2024, 1, 7, 22, 0, 0)));
        // Sunday 06:00, alarm Monday 07:00 is 25 hours away
        assert!(!face.is_active_within_day(&DateTime::new(2024, 1, 7, 6, 0, 0)));
    }

    #[test]
    fn disabled_alarm_is_never_active() {
        let face = AlarmFace::new(FaceId(0));
        assert!(!face.is_active_within_day(&DateTime::new(2024, 1, 7, 22, 0, 0)));
    }
}
