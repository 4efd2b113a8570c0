//! String to typed value conversions.
//!
//! Every function returns `None` when the text is not a valid value of
//! the requested type; the caller leaves the field untouched in that case.

use std::str::FromStr;

use chrono::{
    NaiveDate, NaiveDateTime, ParseResult, TimeDelta,
    format::{self, Parsed, StrftimeItems},
};

use super::layout;

/// Base-10 unsigned integer of the width of `T`. No sign prefix.
pub(crate) fn parse_unsigned<T: FromStr>(text: &str) -> Option<T> {
    if text.starts_with('+') {
        return None;
    }
    text.parse().ok()
}

/// Floating-point literal. Finite literals that overflow to infinity are
/// rejected; `inf`/`infinity` (any case, optionally signed) are accepted.
pub(crate) fn parse_float<T>(text: &str) -> Option<T>
where
    T: FromStr + Into<f64> + Copy,
{
    let value: T = text.parse().ok()?;
    if value.into().is_infinite() && !names_infinity(text) {
        return None;
    }
    Some(value)
}

fn names_infinity(text: &str) -> bool {
    let unsigned = text.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Date and time with the given hint.
///
/// Components the layout does not mention take their zero value: year 0,
/// January, day 1, midnight. A layout with an offset yields the UTC wall
/// time.
pub(crate) fn parse_datetime(text: &str, hint: &str) -> Option<NaiveDateTime> {
    let parsed = parse_with_defaults(text, hint)?;
    let local = parsed.to_naive_datetime_with_offset(0).ok()?;
    match parsed.offset() {
        Some(offset) => local.checked_sub_signed(TimeDelta::seconds(offset.into())),
        None => Some(local),
    }
}

/// Calendar date with the given hint. Time fields in the layout are
/// parsed and dropped.
pub(crate) fn parse_date(text: &str, hint: &str) -> Option<NaiveDate> {
    parse_with_defaults(text, hint)?.to_naive_date().ok()
}

fn parse_with_defaults(text: &str, hint: &str) -> Option<Parsed> {
    let fmt = layout::to_strftime(hint).ok()?;
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, text, StrftimeItems::new(&fmt)).ok()?;
    fill_missing(&mut parsed).ok()?;
    Some(parsed)
}

fn fill_missing(parsed: &mut Parsed) -> ParseResult<()> {
    if parsed.timestamp().is_some() {
        return Ok(());
    }

    let no_year = parsed.year().is_none()
        && parsed.year_div_100().is_none()
        && parsed.year_mod_100().is_none()
        && parsed.isoyear().is_none();
    if no_year {
        parsed.set_year(0)?;
    }

    let week_based = parsed.isoweek().is_some()
        || parsed.week_from_sun().is_some()
        || parsed.week_from_mon().is_some();
    if !week_based && parsed.ordinal().is_none() {
        if parsed.month().is_none() {
            parsed.set_month(1)?;
        }
        if parsed.day().is_none() {
            parsed.set_day(1)?;
        }
    }

    if parsed.hour_div_12().is_none() {
        parsed.set_ampm(false)?;
    }
    if parsed.hour_mod_12().is_none() {
        parsed.set_hour12(12)?;
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    Ok(())
}
