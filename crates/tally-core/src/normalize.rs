//! Field normalization for ledger dates and amounts
//!
//! Ledger sheets are hand-typed, so both parsers are forgiving: dates are
//! searched for anywhere in the cell and amounts tolerate currency markers and
//! thousands separators. A date that cannot be recovered is reported with a
//! [`DateRejection`] so callers can skip the row and count why.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

/// Why a raw date cell could not be turned into a calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateRejection {
    #[error("date cell is empty")]
    Empty,
    #[error("no recognised date pattern")]
    UnmatchedPattern,
    #[error("not a valid calendar date")]
    InvalidCalendarDate,
}

fn day_first_slash_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})").expect("invalid d/m/y regex")
    })
}

fn day_first_dash_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([0-9]{1,2})-([0-9]{1,2})-([0-9]{4})").expect("invalid d-m-y regex")
    })
}

fn year_first_slash_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([0-9]{4})/([0-9]{1,2})/([0-9]{1,2})").expect("invalid y/m/d regex")
    })
}

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+\.?[0-9]*").expect("invalid amount regex"))
}

/// Correct the year typos seen in day-first ledger dates.
///
/// Years from 2050 up collapse to 2024, 2031..=2049 are kept as typed, and
/// 2021/2023 are rewritten to 2024.
fn correct_year(year: i32) -> i32 {
    let year = if year >= 2050 { 2024 } else { year };
    if year == 2021 || year == 2023 {
        2024
    } else {
        year
    }
}

fn calendar_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(1..=9999).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a ledger date cell.
///
/// Accepted shapes, tried in order: `D/M/YYYY`, `D-M-YYYY` (both found
/// anywhere in the cell, with year correction) and `YYYY/M/D` (must be the
/// whole cell, no year correction). A pattern that matches but names an
/// impossible date falls through to the next pattern.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DateRejection> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(DateRejection::Empty);
    }

    let mut matched = false;

    for re in [day_first_slash_re(), day_first_dash_re()] {
        let Some(caps) = re.captures(s) else {
            continue;
        };
        matched = true;

        let day = caps[1].parse::<u32>().ok();
        let month = caps[2].parse::<u32>().ok();
        let year = caps[3].parse::<i32>().ok().map(correct_year);

        if let (Some(day), Some(month), Some(year)) = (day, month, year) {
            if let Some(date) = calendar_date(year, month, day) {
                return Ok(date);
            }
        }
    }

    if let Some(caps) = year_first_slash_re().captures(s) {
        matched = true;
        // Trailing or leading text is not tolerated in this shape
        let whole = caps.get(0).is_some_and(|m| m.start() == 0 && m.end() == s.len());
        if whole {
            let year = caps[1].parse::<i32>().ok();
            let month = caps[2].parse::<u32>().ok();
            let day = caps[3].parse::<u32>().ok();
            if let (Some(year), Some(month), Some(day)) = (year, month, day) {
                if let Some(date) = calendar_date(year, month, day) {
                    return Ok(date);
                }
            }
        }
    }

    if matched {
        Err(DateRejection::InvalidCalendarDate)
    } else {
        Err(DateRejection::UnmatchedPattern)
    }
}

/// Parse a ledger amount cell into a signed value.
///
/// Strips `₹`, `Rs` and thousands separators, remembers a leading minus, then
/// takes the first number in what remains. Empty cells, the `-` placeholder
/// and cells without digits all yield 0.
pub fn parse_amount(raw: &str) -> f64 {
    if raw.is_empty() || raw == "-" {
        return 0.0;
    }

    let cleaned = raw
        .trim()
        .replace('₹', "")
        .replace("Rs", "")
        .replace(',', "");

    let negative = cleaned.starts_with('-');
    let cleaned = cleaned.replace('-', "");

    let value = amount_re()
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0);

    if negative {
        -value
    } else {
        value
    }
}
