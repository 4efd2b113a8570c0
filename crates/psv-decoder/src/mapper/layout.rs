//! Format hints: chrono `strftime` patterns or reference-date layouts.
//!
//! A reference layout spells the reference moment
//! `Mon Jan 2 15:04:05 MST 2006` in the desired shape, e.g. `2006-01-02`
//! or `02/01/2006 15:04`. Any hint containing `%` is taken to be a
//! `strftime` pattern and used verbatim.

use std::borrow::Cow;

use thiserror::Error;

/// Reference tokens and their `strftime` equivalents.
///
/// Ordered so that a longer token is tried before any of its prefixes.
const TOKENS: &[(&str, &str)] = &[
    ("January", "%B"),
    ("Monday", "%A"),
    ("Z07:00", "%:z"),
    ("-07:00", "%:z"),
    ("-0700", "%z"),
    ("2006", "%Y"),
    (".000000000", "%.9f"),
    (".999999999", "%.f"),
    (".000000", "%.6f"),
    (".999999", "%.f"),
    (".000", "%.3f"),
    (".999", "%.f"),
    ("Jan", "%b"),
    ("Mon", "%a"),
    ("MST", ""),
    ("_2", "%e"),
    ("01", "%m"),
    ("02", "%d"),
    ("03", "%I"),
    ("04", "%M"),
    ("05", "%S"),
    ("06", "%y"),
    ("15", "%H"),
    ("PM", "%p"),
    ("pm", "%P"),
    ("1", "%m"),
    ("2", "%d"),
    ("3", "%I"),
    ("4", "%M"),
    ("5", "%S"),
];

/// Errors from translating a reference layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum LayoutError {
    /// The layout uses a token chrono can't parse.
    #[error("layout token '{0}' can't be parsed")]
    Unparseable(&'static str),
}

/// Returns the `strftime` pattern for a format hint.
pub(crate) fn to_strftime(hint: &str) -> Result<Cow<'_, str>, LayoutError> {
    if hint.contains('%') {
        return Ok(Cow::Borrowed(hint));
    }

    let mut out = String::with_capacity(hint.len() * 2);
    let mut rest = hint;
    'scan: while !rest.is_empty() {
        for &(token, pattern) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                if pattern.is_empty() {
                    return Err(LayoutError::Unparseable(token));
                }
                out.push_str(pattern);
                rest = tail;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    Ok(Cow::Owned(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strftime_is_passed_through() {
        assert_eq!(to_strftime("%Y-%m-%d").unwrap(), "%Y-%m-%d");
    }

    #[test]
    fn date_layout() {
        assert_eq!(to_strftime("2006-01-02").unwrap(), "%Y-%m-%d");
    }

    #[test]
    fn date_time_layout() {
        assert_eq!(to_strftime("2006-01-02 15:04:05").unwrap(), "%Y-%m-%d %H:%M:%S");
    }

    #[test]
    fn names_and_clock() {
        assert_eq!(to_strftime("Mon, 02 Jan 2006 03:04 PM").unwrap(), "%a, %d %b %Y %I:%M %p");
        assert_eq!(to_strftime("Monday January _2").unwrap(), "%A %B %e");
    }

    #[test]
    fn offsets_and_fractions() {
        assert_eq!(
            to_strftime("2006-01-02T15:04:05.000-07:00").unwrap(),
            "%Y-%m-%dT%H:%M:%S%.3f%:z"
        );
        assert_eq!(to_strftime("15:04:05.999999999 -0700").unwrap(), "%H:%M:%S%.f %z");
    }

    #[test]
    fn short_forms() {
        assert_eq!(to_strftime("1/2/06").unwrap(), "%m/%d/%y");
    }

    #[test]
    fn zone_abbreviation_is_rejected() {
        assert_eq!(to_strftime("2006-01-02 MST"), Err(LayoutError::Unparseable("MST")));
    }

    #[test]
    fn non_token_text_is_kept() {
        assert_eq!(to_strftime("at 15h").unwrap(), "at %Hh");
    }
}
