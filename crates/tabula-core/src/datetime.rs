//! Date ↔ serial number conversion
//!
//! Spreadsheets store dates as day counts from an epoch, with the time of
//! day as the fractional part. The 1900 system counts 1900-01-01 as day 1
//! and keeps the phantom 1900-02-29 (serial 60); the 1904 system counts
//! 1904-01-01 as day 0.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

const SECONDS_PER_DAY: f64 = 86_400.0;

fn epoch(date_1904: bool) -> NaiveDate {
    if date_1904 {
        NaiveDate::from_ymd_opt(1904, 1, 1).unwrap_or(NaiveDate::MIN)
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 31).unwrap_or(NaiveDate::MIN)
    }
}

fn phantom_leap_day_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 3, 1).unwrap_or(NaiveDate::MIN)
}

/// Serial number of a date and time
pub fn date_to_serial(datetime: NaiveDateTime, date_1904: bool) -> f64 {
    let date = datetime.date();
    let mut days = (date - epoch(date_1904)).num_days();
    if !date_1904 && date >= phantom_leap_day_end() {
        days += 1;
    }
    let seconds = datetime.time().num_seconds_from_midnight() as f64;
    days as f64 + seconds / SECONDS_PER_DAY
}

/// Date and time of a serial number.
///
/// Serial 60 in the 1900 system (the non-existent 1900-02-29) maps to
/// 1900-02-28. Returns `None` for non-finite or out-of-range serials.
pub fn serial_to_date(serial: f64, date_1904: bool) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let mut days = serial.floor() as i64;
    if !date_1904 && days >= 61 {
        days -= 1;
    } else if !date_1904 && days == 60 {
        days = 59;
    }
    let date = epoch(date_1904).checked_add_signed(Duration::days(days))?;

    let seconds = ((serial - serial.floor()) * SECONDS_PER_DAY).round() as u32;
    let time = if seconds >= 86_400 {
        NaiveTime::MIN
    } else {
        NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)?
    };
    let datetime = date.and_time(time);
    if seconds >= 86_400 {
        datetime.checked_add_signed(Duration::days(1))
    } else {
        Some(datetime)
    }
}
