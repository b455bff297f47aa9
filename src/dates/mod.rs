// Natural-language date resolution for the guided intake flow
//
// Turns free-text answers like "hari ini", "3 hari lalu" or "14-11-2025"
// into a calendar date plus its Indonesian weekday and display rendering.

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;

/// Indonesian weekday names, indexed from Sunday.
pub const WEEKDAYS: [&str; 7] = [
    "Minggu", "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu",
];

/// Indonesian month names, indexed from January.
pub const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// A resolved calendar date.
///
/// `weekday` and `display_text` are derived from `iso_date` and never set
/// independently; the three fields always describe the same day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDate {
    pub iso_date: NaiveDate,
    pub weekday: &'static str,
    pub display_text: String,
}

impl ParsedDate {
    fn from_date(date: NaiveDate) -> Self {
        let weekday = weekday_name(date);
        let display_text = format!(
            "{} {} {}, {}",
            date.day(),
            MONTHS[date.month0() as usize],
            date.year(),
            weekday
        );
        Self {
            iso_date: date,
            weekday,
            display_text,
        }
    }

    /// The date formatted as `YYYY-MM-DD`.
    pub fn iso_string(&self) -> String {
        self.iso_date.format("%Y-%m-%d").to_string()
    }
}

/// Indonesian weekday name for a date.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_sunday() as usize]
}

/// Resolve a free-text date expression against an explicit reference date.
///
/// Resolution order: relative keywords, relative numeric offsets, explicit
/// numeric patterns (`D-M-Y` or `Y-M-D`), then a written-month fallback.
/// Keywords win over offsets, so "3 hari kemarin" reads as "kemarin".
/// Returns `None` when nothing matches or the date does not exist on the
/// calendar; invalid dates are rejected, never clamped.
pub fn resolve(input: &str, today: NaiveDate) -> Option<ParsedDate> {
    let lower = input.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }

    if lower.contains("hari ini") || lower == "sekarang" || lower == "today" {
        return Some(ParsedDate::from_date(today));
    }
    if lower.contains("kemarin") || lower == "yesterday" {
        return shift(today, -1).map(ParsedDate::from_date);
    }
    if lower.contains("besok") || lower == "tomorrow" {
        return shift(today, 1).map(ParsedDate::from_date);
    }
    if lower.contains("lusa") {
        return shift(today, 2).map(ParsedDate::from_date);
    }

    if let Some(days) = match_offset(&lower, r"(\d+)\s*hari\s*(yang\s*)?lalu") {
        return shift(today, -days).map(ParsedDate::from_date);
    }
    if let Some(days) = match_offset(&lower, r"(\d+)\s*hari\s*(yang\s*)?(akan datang|ke depan|lagi)") {
        return shift(today, days).map(ParsedDate::from_date);
    }

    if let Some(date) = parse_numeric_date(&lower) {
        return Some(ParsedDate::from_date(date));
    }

    parse_written_date(&lower).map(ParsedDate::from_date)
}

fn match_offset(lower: &str, pattern: &str) -> Option<i64> {
    let re = Regex::new(pattern).expect("offset pattern is valid");
    let caps = re.captures(lower)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Checked day offset; `None` when the result falls outside chrono's range.
fn shift(today: NaiveDate, days: i64) -> Option<NaiveDate> {
    today.checked_add_signed(Duration::try_days(days)?)
}

/// Parse `D-M-Y` (also `/` and `.` separators) or year-first `Y-M-D`.
///
/// Day-first is assumed when the last group has 4 digits, year-first when the
/// first group does. All-2-digit-year forms are deliberately not guessed at.
fn parse_numeric_date(lower: &str) -> Option<NaiveDate> {
    let re = Regex::new(r"(\d{1,4})[-/.](\d{1,2})[-/.](\d{1,4})").expect("date pattern is valid");
    let caps = re.captures(lower)?;
    let first = caps.get(1)?.as_str();
    let middle: u32 = caps.get(2)?.as_str().parse().ok()?;
    let last = caps.get(3)?.as_str();

    let (year, month, day) = if last.len() == 4 {
        (last.parse().ok()?, middle, first.parse().ok()?)
    } else if first.len() == 4 {
        (first.parse().ok()?, middle, last.parse().ok()?)
    } else {
        return None;
    };

    // from_ymd_opt rejects impossible dates (no silent rollover)
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Fallback for dates with a written month, e.g. "14 november 2025".
fn parse_written_date(lower: &str) -> Option<NaiveDate> {
    let re = Regex::new(r"(\d{1,2})\s+([a-z]+)\s+(\d{4})").expect("written date pattern is valid");
    let caps = re.captures(lower)?;
    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let year: i32 = caps.get(3)?.as_str().parse().ok()?;
    let month = month_from_name(caps.get(2)?.as_str())?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_from_name(name: &str) -> Option<u32> {
    const ENGLISH: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];

    for (idx, id_name) in MONTHS.iter().enumerate() {
        if id_name.to_lowercase() == name {
            return Some(idx as u32 + 1);
        }
    }
    ENGLISH
        .iter()
        .position(|en| *en == name)
        .map(|idx| idx as u32 + 1)
}
