//! Core types shared by the faces: entries, events and host-facing identifiers.

use crate::MAX_BEEP_ROUNDS;

/// Recurrence rule deciding on which days an alarm applies.
///
/// The first seven variants are single weekdays in the same order as
/// [`DateTime::weekday`](crate::DateTime::weekday), so their discriminant is
/// the weekday index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DayRule {
    Monday = 0,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    /// Every day of the week.
    #[default]
    EveryDay,
    /// Monday to Friday.
    Workday,
    /// Saturday and Sunday.
    Weekend,
}

impl DayRule {
    /// Number of distinct rules.
    pub const COUNT: u8 = 10;

    /// The next rule in edit order, wrapping after `Weekend`.
    pub fn next(self) -> Self {
        match self {
            DayRule::Monday => DayRule::Tuesday,
            DayRule::Tuesday => DayRule::Wednesday,
            DayRule::Wednesday => DayRule::Thursday,
            DayRule::Thursday => DayRule::Friday,
            DayRule::Friday => DayRule::Saturday,
            DayRule::Saturday => DayRule::Sunday,
            DayRule::Sunday => DayRule::EveryDay,
            DayRule::EveryDay => DayRule::Workday,
            DayRule::Workday => DayRule::Weekend,
            DayRule::Weekend => DayRule::Monday,
        }
    }

    /// Weekday index (0 = Monday) for single-day rules.
    pub fn weekday_index(self) -> Option<u8> {
        let index = self as u8;
        (index < 7).then_some(index)
    }

    /// Whether the rule applies on the given weekday (0 = Monday).
    pub fn matches_weekday(self, weekday: u8) -> bool {
        match self {
            DayRule::EveryDay => true,
            DayRule::Workday => weekday < 5,
            DayRule::Weekend => weekday >= 5,
            single => single as u8 == weekday,
        }
    }

    /// Two-letter display label.
    pub fn label(self) -> &'static str {
        match self {
            DayRule::Monday => "MO",
            DayRule::Tuesday => "TU",
            DayRule::Wednesday => "WE",
            DayRule::Thursday => "TH",
            DayRule::Friday => "FR",
            DayRule::Saturday => "SA",
            DayRule::Sunday => "SU",
            DayRule::EveryDay => "AL",
            DayRule::Workday => "MF",
            DayRule::Weekend => "WN",
        }
    }
}

impl TryFrom<u8> for DayRule {
    type Error = EntryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => DayRule::Monday,
            1 => DayRule::Tuesday,
            2 => DayRule::Wednesday,
            3 => DayRule::Thursday,
            4 => DayRule::Friday,
            5 => DayRule::Saturday,
            6 => DayRule::Sunday,
            7 => DayRule::EveryDay,
            8 => DayRule::Workday,
            9 => DayRule::Weekend,
            other => return Err(EntryError::InvalidDayRule(other)),
        })
    }
}

/// Alarm tone pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Pitch {
    Low = 0,
    #[default]
    Medium,
    High,
}

impl Pitch {
    /// The next pitch, wrapping after `High`.
    pub fn next(self) -> Self {
        match self {
            Pitch::Low => Pitch::Medium,
            Pitch::Medium => Pitch::High,
            Pitch::High => Pitch::Low,
        }
    }
}

impl TryFrom<u8> for Pitch {
    type Error = EntryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Pitch::Low),
            1 => Ok(Pitch::Medium),
            2 => Ok(Pitch::High),
            other => Err(EntryError::InvalidPitch(other)),
        }
    }
}

/// Validation errors for entry construction and unpacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryError {
    /// Day rule index outside 0-9.
    InvalidDayRule(u8),

    /// Hour outside 0-23.
    InvalidHour(u8),

    /// Minute outside 0-59.
    InvalidMinute(u8),

    /// Second outside 0-59.
    InvalidSecond(u8),

    /// Pitch outside 0-2.
    InvalidPitch(u8),

    /// Beep rounds above the maximum setting.
    InvalidBeepRounds(u8),
}

impl core::fmt::Display for EntryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EntryError::InvalidDayRule(v) => write!(f, "day rule {} out of range 0-9", v),
            EntryError::InvalidHour(v) => write!(f, "hour {} out of range 0-23", v),
            EntryError::InvalidMinute(v) => write!(f, "minute {} out of range 0-59", v),
            EntryError::InvalidSecond(v) => write!(f, "second {} out of range 0-59", v),
            EntryError::InvalidPitch(v) => write!(f, "pitch {} out of range 0-2", v),
            EntryError::InvalidBeepRounds(v) => {
                write!(f, "beep rounds {} out of range 0-{}", v, MAX_BEEP_ROUNDS)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EntryError {}

fn check_hour(hour: u8) -> Result<u8, EntryError> {
    if hour < 24 {
        Ok(hour)
    } else {
        Err(EntryError::InvalidHour(hour))
    }
}

fn check_minute(minute: u8) -> Result<u8, EntryError> {
    if minute < 60 {
        Ok(minute)
    } else {
        Err(EntryError::InvalidMinute(minute))
    }
}

/// A single alarm definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmEntry {
    pub(crate) day_rule: DayRule,
    pub(crate) hour: u8,
    pub(crate) minute: u8,
    pub(crate) pitch: Pitch,
    pub(crate) beep_rounds: u8,
    pub(crate) enabled: bool,
}

impl Default for AlarmEntry {
    fn default() -> Self {
        Self {
            day_rule: DayRule::EveryDay,
            hour: 0,
            minute: 0,
            pitch: Pitch::Medium,
            beep_rounds: 5,
            enabled: false,
        }
    }
}

impl AlarmEntry {
    /// Creates a validated alarm entry.
    ///
    /// # Errors
    /// * `InvalidHour` / `InvalidMinute` - time outside the 24 hour clock
    /// * `InvalidBeepRounds` - `beep_rounds` above [`MAX_BEEP_ROUNDS`]
    pub fn new(
        day_rule: DayRule,
        hour: u8,
        minute: u8,
        pitch: Pitch,
        beep_rounds: u8,
        enabled: bool,
    ) -> Result<Self, EntryError> {
        if beep_rounds > MAX_BEEP_ROUNDS {
            return Err(EntryError::InvalidBeepRounds(beep_rounds));
        }
        Ok(Self {
            day_rule,
            hour: check_hour(hour)?,
            minute: check_minute(minute)?,
            pitch,
            beep_rounds,
            enabled,
        })
    }

    pub fn day_rule(&self) -> DayRule {
        self.day_rule
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn pitch(&self) -> Pitch {
        self.pitch
    }

    /// 0 = short double beep, 1-9 = rounds, 10 = extended signal.
    pub fn beep_rounds(&self) -> u8 {
        self.beep_rounds
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Alarm time as minutes since midnight.
    pub fn minutes_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Packs the entry into 22 bits for persistent storage.
    pub fn to_bits(&self) -> u32 {
        (self.day_rule as u32)
            | (self.hour as u32) << 4
            | (self.minute as u32) << 9
            | (self.pitch as u32) << 15
            | (self.beep_rounds as u32) << 17
            | (self.enabled as u32) << 21
    }

    /// Unpacks an entry produced by [`to_bits`](Self::to_bits).
    pub fn from_bits(bits: u32) -> Result<Self, EntryError> {
        Self::new(
            DayRule::try_from((bits & 0xF) as u8)?,
            (bits >> 4 & 0x1F) as u8,
            (bits >> 9 & 0x3F) as u8,
            Pitch::try_from((bits >> 15 & 0x3) as u8)?,
            (bits >> 17 & 0xF) as u8,
            bits >> 21 & 1 == 1,
        )
    }
}

/// A countdown duration with optional auto-repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerEntry {
    pub(crate) hours: u8,
    pub(crate) minutes: u8,
    pub(crate) seconds: u8,
    pub(crate) repeat: bool,
}

impl Default for TimerEntry {
    /// One minute, no repeat.
    fn default() -> Self {
        Self {
            hours: 0,
            minutes: 1,
            seconds: 0,
            repeat: false,
        }
    }
}

impl TimerEntry {
    /// Creates a validated timer entry.
    ///
    /// # Errors
    /// * `InvalidHour` / `InvalidMinute` / `InvalidSecond` - field out of range
    pub fn new(hours: u8, minutes: u8, seconds: u8, repeat: bool) -> Result<Self, EntryError> {
        if seconds >= 60 {
            return Err(EntryError::InvalidSecond(seconds));
        }
        Ok(Self {
            hours: check_hour(hours)?,
            minutes: check_minute(minutes)?,
            seconds,
            repeat,
        })
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    /// True when hours, minutes and seconds are all zero.
    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    /// Total duration in seconds.
    pub fn duration_secs(&self) -> u32 {
        self.hours as u32 * 3600 + self.minutes as u32 * 60 + self.seconds as u32
    }

    /// Clears the duration and the repeat flag.
    pub(crate) fn clear(&mut self) {
        *self = Self {
            hours: 0,
            minutes: 0,
            seconds: 0,
            repeat: false,
        };
    }

    /// Packs the entry for persistent storage: seconds in byte 0, minutes in
    /// byte 1, hours in the low 5 bits of byte 2 and repeat in bit 21.
    pub fn to_bits(&self) -> u32 {
        (self.seconds as u32)
            | (self.minutes as u32) << 8
            | (self.hours as u32) << 16
            | (self.repeat as u32) << 21
    }

    /// Unpacks an entry produced by [`to_bits`](Self::to_bits).
    pub fn from_bits(bits: u32) -> Result<Self, EntryError> {
        Self::new(
            (bits >> 16 & 0x1F) as u8,
            (bits >> 8 & 0xFF) as u8,
            (bits & 0xFF) as u8,
            bits >> 21 & 1 == 1,
        )
    }
}

/// Identifies a face to the host's wake scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceId(pub u8);

/// Physical buttons whose level the host can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Light,
    Mode,
    Alarm,
}

/// Display indicator segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Indicator {
    /// Alarm enabled.
    Signal,
    /// Timer running.
    Bell,
    /// Afternoon in 12 hour mode.
    Pm,
    /// 24 hour mode.
    Clock24h,
    /// Repeating timer.
    Lap,
    /// Hour/minute separator.
    Colon,
}

/// Kind of event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    Activate,
    Resign,
    Tick,
    LightButtonDown,
    LightButtonUp,
    LightLongPress,
    AlarmButtonUp,
    AlarmLongPress,
    AlarmLongUp,
    BackgroundTask,
    Timeout,
    ModeLongPress,
}

/// An event with the subsecond tick counter at the time it occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Event {
    pub kind: EventKind,
    pub subsecond: u8,
}

impl Event {
    /// Creates an event.
    #[inline]
    pub fn new(kind: EventKind, subsecond: u8) -> Self {
        Self { kind, subsecond }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_rule_cycles_through_all_ten() {
        let mut rule = DayRule::Monday;
        for index in 0..DayRule::COUNT {
            assert_eq!(rule as u8, index);
            rule = rule.next();
        }
        assert_eq!(rule, DayRule::Monday);
    }

    #[test]
    fn day_rule_weekday_matching() {
        assert!(DayRule::Workday.matches_weekday(4));
        assert!(!DayRule::Workday.matches_weekday(5));
        assert!(DayRule::Weekend.matches_weekday(6));
        assert!(!DayRule::Weekend.matches_weekday(0));
        assert!(DayRule::Wednesday.matches_weekday(2));
        assert!(!DayRule::Wednesday.matches_weekday(3));
        assert!((0..7).all(|w| DayRule::EveryDay.matches_weekday(w)));
        assert_eq!(DayRule::Workday.weekday_index(), None);
        assert_eq!(DayRule::Sunday.weekday_index(), Some(6));
    }

    #[test]
    fn alarm_entry_validation() {
        assert_eq!(
            AlarmEntry::new(DayRule::EveryDay, 24, 0, Pitch::Low, 1, true),
            Err(EntryError::InvalidHour(24))
        );
        assert_eq!(
            AlarmEntry::new(DayRule::EveryDay, 7, 60, Pitch::Low, 1, true),
            Err(EntryError::InvalidMinute(60))
        );
        assert_eq!(
            AlarmEntry::new(DayRule::EveryDay, 7, 30, Pitch::Low, 11, true),
            Err(EntryError::InvalidBeepRounds(11))
        );
        assert_eq!(DayRule::try_from(10), Err(EntryError::InvalidDayRule(10)));
        assert_eq!(Pitch::try_from(3), Err(EntryError::InvalidPitch(3)));
    }

    #[test]
    fn alarm_entry_bits_restore() {
        let entry = AlarmEntry::new(DayRule::Weekend, 23, 59, Pitch::High, 10, true).unwrap();
        assert_eq!(AlarmEntry::from_bits(entry.to_bits()), Ok(entry));

        // day rule nibble 15 is not a valid rule
        assert_eq!(AlarmEntry::from_bits(0xF), Err(EntryError::InvalidDayRule(15)));
    }

    #[test]
    fn timer_entry_default_matches_packed_layout() {
        assert_eq!(TimerEntry::default().to_bits(), 0x00_01_00);
        assert_eq!(TimerEntry::from_bits(0x00_01_00), Ok(TimerEntry::default()));

        let entry = TimerEntry::new(23, 59, 59, true).unwrap();
        assert_eq!(TimerEntry::from_bits(entry.to_bits()), Ok(entry));
        assert_eq!(TimerEntry::from_bits(60), Err(EntryError::InvalidSecond(60)));
    }

    #[test]
    fn timer_entry_duration() {
        let entry = TimerEntry::new(1, 2, 3, false).unwrap();
        assert_eq!(entry.duration_secs(), 3723);
        assert!(!entry.is_zero());
        assert!(TimerEntry::new(0, 0, 0, true).unwrap().is_zero());
    }
}
