//! Spanish display formatting for dates and per-subject colours.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

const WEEKDAYS: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

pub const SUBJECT_PALETTE: [&str; 8] = [
    "#3b82f6", "#10b981", "#8b5cf6", "#f97316", "#ef4444", "#14b8a6", "#f59e0b", "#6366f1",
];

fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAYS[weekday.num_days_from_monday() as usize]
}

/// "jueves, 16 de octubre de 2026"
pub fn long_date<D: Datelike>(date: &D) -> String {
    format!(
        "{}, {} de {} de {}",
        weekday_name(date.weekday()),
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Formats a session date as sent by the server. The wall-clock time is
/// kept as is; offsets are not converted to local time. Input that does
/// not parse is returned unchanged.
pub fn session_date(raw: &str) -> String {
    let raw = raw.trim();

    let date_time = DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"));

    if let Ok(date_time) = date_time {
        return format!(
            "{}, {:02}:{:02}",
            long_date(&date_time),
            date_time.hour(),
            date_time.minute()
        );
    }

    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => long_date(&date),
        Err(_) => raw.to_string(),
    }
}

/// Picks a palette colour from a string hash over UTF-16 code units, so
/// every card of the same subject gets the same colour.
pub fn subject_color(subject: &str) -> &'static str {
    // Arithmetic mirrors a double accumulator whose left shift truncates to
    // a signed 32-bit integer.
    let mut hash = 0f64;
    for unit in subject.encode_utf16() {
        let shifted = to_int32(hash).wrapping_shl(5);
        hash = f64::from(unit) + (f64::from(shifted) - hash);
    }
    let index = (hash.abs() % SUBJECT_PALETTE.len() as f64) as usize;
    SUBJECT_PALETTE[index]
}

fn to_int32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let wrapped = value.trunc().rem_euclid(4_294_967_296.0);
    if wrapped >= 2_147_483_648.0 {
        (wrapped - 4_294_967_296.0) as i32
    } else {
        wrapped as i32
    }
}
