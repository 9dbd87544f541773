//! moment.js-style date patterns
//!
//! Users configure the timestamp with the pattern language they know from
//! note-taking apps (`YYYY-MM-DD HH:mm:ss`), so the pattern is rendered
//! token by token instead of being handed to `strftime`.

use std::fmt::Write;

use chrono::{DateTime, Datelike, FixedOffset, Timelike};

#[derive(Debug, Clone, Copy)]
enum Token {
    Year,
    YearShort,
    Quarter,
    MonthName,
    MonthAbbr,
    MonthPadded,
    Month,
    DayOfYearPadded,
    DayOfYear,
    DayPadded,
    DayOrdinal,
    Day,
    WeekdayName,
    WeekdayAbbr,
    WeekdayMin,
    Weekday,
    IsoWeekday,
    IsoWeekPadded,
    IsoWeek,
    IsoWeekYear,
    HourPadded,
    Hour,
    Hour12Padded,
    Hour12,
    HourFromOnePadded,
    HourFromOne,
    MinutePadded,
    Minute,
    SecondPadded,
    Second,
    Millis,
    Centis,
    Decis,
    MeridiemUpper,
    MeridiemLower,
    OffsetCompact,
    Offset,
    UnixSeconds,
    UnixMillis,
}

/// Ordered longest-first so that `MMMM` wins over `MM` and `Do` over `D`
const TOKENS: &[(&str, Token)] = &[
    ("YYYY", Token::Year),
    ("MMMM", Token::MonthName),
    ("DDDD", Token::DayOfYearPadded),
    ("dddd", Token::WeekdayName),
    ("GGGG", Token::IsoWeekYear),
    ("MMM", Token::MonthAbbr),
    ("DDD", Token::DayOfYear),
    ("ddd", Token::WeekdayAbbr),
    ("SSS", Token::Millis),
    ("YY", Token::YearShort),
    ("MM", Token::MonthPadded),
    ("DD", Token::DayPadded),
    ("Do", Token::DayOrdinal),
    ("dd", Token::WeekdayMin),
    ("WW", Token::IsoWeekPadded),
    ("HH", Token::HourPadded),
    ("hh", Token::Hour12Padded),
    ("kk", Token::HourFromOnePadded),
    ("mm", Token::MinutePadded),
    ("ss", Token::SecondPadded),
    ("SS", Token::Centis),
    ("ZZ", Token::OffsetCompact),
    ("Q", Token::Quarter),
    ("M", Token::Month),
    ("D", Token::Day),
    ("d", Token::Weekday),
    ("E", Token::IsoWeekday),
    ("W", Token::IsoWeek),
    ("H", Token::Hour),
    ("h", Token::Hour12),
    ("k", Token::HourFromOne),
    ("m", Token::Minute),
    ("s", Token::Second),
    ("S", Token::Decis),
    ("A", Token::MeridiemUpper),
    ("a", Token::MeridiemLower),
    ("Z", Token::Offset),
    ("X", Token::UnixSeconds),
    ("x", Token::UnixMillis),
];

/// Render `moment` with a moment.js-style pattern.
///
/// `[...]` escapes literal text. Characters that are not part of a token are
/// copied through unchanged.
pub(crate) fn format_moment(moment: &DateTime<FixedOffset>, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;

    while let Some(ch) = rest.chars().next() {
        if ch == '['
            && let Some(end) = rest[1..].find(']')
        {
            out.push_str(&rest[1..1 + end]);
            rest = &rest[end + 2..];
            continue;
        }
        if let Some((text, token)) = TOKENS.iter().find(|(text, _)| rest.starts_with(text)) {
            render(moment, *token, &mut out);
            rest = &rest[text.len()..];
            continue;
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}

fn render(moment: &DateTime<FixedOffset>, token: Token, out: &mut String) {
    // Writing into a String cannot fail
    let _ = match token {
        Token::Year => write!(out, "{:04}", moment.year()),
        Token::YearShort => write!(out, "{:02}", moment.year().rem_euclid(100)),
        Token::Quarter => write!(out, "{}", (moment.month() - 1) / 3 + 1),
        Token::MonthName => write!(out, "{}", moment.format("%B")),
        Token::MonthAbbr => write!(out, "{}", moment.format("%b")),
        Token::MonthPadded => write!(out, "{:02}", moment.month()),
        Token::Month => write!(out, "{}", moment.month()),
        Token::DayOfYearPadded => write!(out, "{:03}", moment.ordinal()),
        Token::DayOfYear => write!(out, "{}", moment.ordinal()),
        Token::DayPadded => write!(out, "{:02}", moment.day()),
        Token::DayOrdinal => write!(out, "{}{}", moment.day(), ordinal_suffix(moment.day())),
        Token::Day => write!(out, "{}", moment.day()),
        Token::WeekdayName => write!(out, "{}", moment.format("%A")),
        Token::WeekdayAbbr => write!(out, "{}", moment.format("%a")),
        Token::WeekdayMin => {
            let abbr = moment.format("%a").to_string();
            write!(out, "{}", &abbr[..2])
        }
        Token::Weekday => write!(out, "{}", moment.weekday().num_days_from_sunday()),
        Token::IsoWeekday => write!(out, "{}", moment.weekday().number_from_monday()),
        Token::IsoWeekPadded => write!(out, "{:02}", moment.iso_week().week()),
        Token::IsoWeek => write!(out, "{}", moment.iso_week().week()),
        Token::IsoWeekYear => write!(out, "{:04}", moment.iso_week().year()),
        Token::HourPadded => write!(out, "{:02}", moment.hour()),
        Token::Hour => write!(out, "{}", moment.hour()),
        Token::Hour12Padded => write!(out, "{:02}", moment.hour12().1),
        Token::Hour12 => write!(out, "{}", moment.hour12().1),
        Token::HourFromOnePadded => write!(out, "{:02}", hour_from_one(moment)),
        Token::HourFromOne => write!(out, "{}", hour_from_one(moment)),
        Token::MinutePadded => write!(out, "{:02}", moment.minute()),
        Token::Minute => write!(out, "{}", moment.minute()),
        Token::SecondPadded => write!(out, "{:02}", moment.second()),
        Token::Second => write!(out, "{}", moment.second()),
        Token::Millis => write!(out, "{:03}", millis(moment)),
        Token::Centis => write!(out, "{:02}", millis(moment) / 10),
        Token::Decis => write!(out, "{}", millis(moment) / 100),
        Token::MeridiemUpper => write!(out, "{}", if moment.hour12().0 { "PM" } else { "AM" }),
        Token::MeridiemLower => write!(out, "{}", if moment.hour12().0 { "pm" } else { "am" }),
        Token::OffsetCompact => write_offset(moment, "", out),
        Token::Offset => write_offset(moment, ":", out),
        Token::UnixSeconds => write!(out, "{}", moment.timestamp()),
        Token::UnixMillis => write!(out, "{}", moment.timestamp_millis()),
    };
}

fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

fn hour_from_one(moment: &DateTime<FixedOffset>) -> u32 {
    match moment.hour() {
        0 => 24,
        h => h,
    }
}

// Leap seconds report 1000..2000 ms
fn millis(moment: &DateTime<FixedOffset>) -> u32 {
    moment.timestamp_subsec_millis().min(999)
}

fn write_offset(
    moment: &DateTime<FixedOffset>,
    separator: &str,
    out: &mut String,
) -> std::fmt::Result {
    let secs = moment.offset().local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let abs = secs.unsigned_abs();
    write!(out, "{sign}{:02}{separator}{:02}", abs / 3600, (abs % 3600) / 60)
}
