//! Calendar time, weekday and unix timestamp conversion.

/// Seconds since 1970-01-01 00:00:00 UTC.
pub type Timestamp = u32;

const SECONDS_PER_DAY: i64 = 86_400;

/// Days between 0000-03-01 and 1970-01-01 in the proleptic Gregorian calendar.
const UNIX_EPOCH_DAYS: i64 = 719_468;

/// A local calendar date and wall clock time as read from the RTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    /// Full year, e.g. 2024.
    pub year: u16,
    /// Month, 1-12.
    pub month: u8,
    /// Day of month, 1-31.
    pub day: u8,
    /// Hour, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
    /// Second, 0-59.
    pub second: u8,
}

impl DateTime {
    /// Creates a new date time. Values are taken as-is.
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Day of week in the proleptic Gregorian calendar, 0 = Monday .. 6 = Sunday.
    pub fn weekday(&self) -> u8 {
        // Zeller's congruence yields 0 = Saturday
        let mut year = self.year as i32;
        let mut month = self.month as i32;
        if month <= 2 {
            month += 12;
            year -= 1;
        }
        let k = year.rem_euclid(100);
        let j = year.div_euclid(100);
        let h = (self.day as i32 + 13 * (month + 1) / 5 + k + k / 4 + j.div_euclid(4) + 5 * j)
            .rem_euclid(7);
        ((h + 5) % 7) as u8
    }

    /// Minutes elapsed since local midnight.
    #[inline]
    pub fn minutes_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Converts local time to a unix timestamp.
    ///
    /// `tz_offset_minutes` is the local offset east of UTC. Times before the
    /// epoch clamp to 0.
    pub fn to_unix(&self, tz_offset_minutes: i16) -> Timestamp {
        let days = days_from_civil(self.year as i64, self.month as i64, self.day as i64);
        let local = days * SECONDS_PER_DAY
            + self.hour as i64 * 3600
            + self.minute as i64 * 60
            + self.second as i64;
        let utc = local - tz_offset_minutes as i64 * 60;
        utc.clamp(0, Timestamp::MAX as i64) as Timestamp
    }

    /// Converts a unix timestamp to local time.
    pub fn from_unix(timestamp: Timestamp, tz_offset_minutes: i16) -> Self {
        let local = timestamp as i64 + tz_offset_minutes as i64 * 60;
        let days = local.div_euclid(SECONDS_PER_DAY);
        let secs = local.rem_euclid(SECONDS_PER_DAY);
        let (year, month, day) = civil_from_days(days);

        Self {
            year: year as u16,
            month: month as u8,
            day: day as u8,
            hour: (secs / 3600) as u8,
            minute: (secs / 60 % 60) as u8,
            second: (secs % 60) as u8,
        }
    }
}

/// Days since the unix epoch for a civil date.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let month_from_march = (month + 9) % 12;
    let day_of_year = (153 * month_from_march + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - UNIX_EPOCH_DAYS
}

/// Civil date `(year, month, day)` for a day count since the unix epoch.
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let days = days + UNIX_EPOCH_DAYS;
    let era = days.div_euclid(146_097);
    let day_of_era = days - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_from_march = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * month_from_march + 2) / 5 + 1;
    let month = if month_from_march < 10 {
        month_from_march + 3
    } else {
        month_from_march - 9
    };
    let year = year_of_era + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}
