//! Conversion of unquoted literals into integers, floats and date/time values.
//!
//! The document parser scans a literal up to the next terminator and hands the raw
//! text to [`parse_literal`]. Date/time literals are recognised by a single regular
//! expression; everything else goes through TOML's numeric rules.

use crate::chars;
use crate::{Error, Result, ValueKind};
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Date, separator, time (with optional fraction) and offset, every part optional.
/// Digits are ASCII only.
static DATE_TIME_REGEX: OnceLock<Regex> = OnceLock::new();

fn date_time_regex() -> &'static Regex {
    DATE_TIME_REGEX.get_or_init(|| {
        Regex::new(
            r"^(?:([0-9]{4})-([0-9]{2})-([0-9]{2}))?([Tt ])?(?:([0-9]{2}):([0-9]{2}):([0-9]{2})(?:\.([0-9]+))?)?([Zz]|[+-][0-9]{2}:[0-9]{2})?$",
        )
        .expect("date/time pattern is valid and should always compile")
    })
}

/// Parses a complete literal into a number or a date/time.
pub(crate) fn parse_literal(literal: &str, line: usize) -> Result<ValueKind> {
    if let Some(captures) = date_time_regex().captures(literal) {
        if captures.get(1).is_some() || captures.get(5).is_some() {
            return parse_date_time(literal, &captures, line);
        }
    }
    parse_number(literal, line)
}

/// Returns `true` if the literal looks like a bare date (`YYYY-MM-DD`), the only shape
/// that may be followed by a space-separated time.
pub(crate) fn is_bare_date(literal: &str) -> bool {
    let bytes = literal.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}

fn parse_date_time(literal: &str, captures: &Captures<'_>, line: usize) -> Result<ValueKind> {
    let has_date = captures.get(1).is_some();
    let has_separator = captures.get(4).is_some();
    let has_time = captures.get(5).is_some();
    let offset = captures.get(9).map(|m| m.as_str());

    if has_date && has_time && !has_separator {
        return Err(Error::MissingDateTimeSeparator {
            line,
            literal: literal.to_string(),
        });
    }
    if has_separator && !(has_date && has_time) {
        return Err(Error::UnnecessaryDateTimeSeparator {
            line,
            literal: literal.to_string(),
        });
    }
    if offset.is_some() && !(has_date && has_time) {
        return Err(Error::OffsetOnBareDateTime {
            line,
            literal: literal.to_string(),
        });
    }

    let invalid = || Error::InvalidDateTime {
        line,
        literal: literal.to_string(),
    };
    let field = |index: usize| -> Result<u32> {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(invalid)
    };

    let date = if has_date {
        let year = i32::try_from(field(1)?).map_err(|_| invalid())?;
        Some(NaiveDate::from_ymd_opt(year, field(2)?, field(3)?).ok_or_else(invalid)?)
    } else {
        None
    };
    let time = if has_time {
        let nanos = match captures.get(8) {
            Some(fraction) => fraction_to_nanos(fraction.as_str()).ok_or_else(invalid)?,
            None => 0,
        };
        Some(NaiveTime::from_hms_nano_opt(field(5)?, field(6)?, field(7)?, nanos).ok_or_else(invalid)?)
    } else {
        None
    };

    match (date, time, offset) {
        (Some(date), None, _) => Ok(ValueKind::LocalDate(date)),
        (None, Some(time), _) => Ok(ValueKind::LocalTime(time)),
        (Some(date), Some(time), None) => Ok(ValueKind::LocalDateTime(date.and_time(time))),
        (Some(date), Some(time), Some(offset)) => {
            let offset = parse_offset(offset).ok_or_else(invalid)?;
            let local = NaiveDateTime::new(date, time);
            local
                .and_local_timezone(offset)
                .single()
                .map(ValueKind::OffsetDateTime)
                .ok_or_else(invalid)
        }
        (None, None, _) => Err(invalid()),
    }
}

/// Sub-second digits beyond nanosecond precision are truncated.
fn fraction_to_nanos(digits: &str) -> Option<u32> {
    if !digits.chars().all(chars::is_digit) {
        return None;
    }
    digits
        .chars()
        .chain(std::iter::repeat('0'))
        .take(9)
        .try_fold(0, |acc, c| Some(acc * 10 + c.to_digit(10)?))
}

fn parse_offset(text: &str) -> Option<FixedOffset> {
    if text.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }
    let sign = if text.starts_with('-') { -1 } else { 1 };
    let hours: i32 = text.get(1..3)?.parse().ok()?;
    let minutes: i32 = text.get(4..6)?.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn parse_number(literal: &str, line: usize) -> Result<ValueKind> {
    let invalid = || Error::InvalidNumber {
        line,
        literal: literal.to_string(),
    };
    if literal.is_empty() || !literal.chars().all(chars::is_numeric_literal_char) {
        return Err(invalid());
    }

    let unsigned = literal.trim_start_matches(['+', '-']);
    if literal.len() - unsigned.len() > 1 {
        return Err(invalid());
    }
    let is_radix = unsigned.starts_with("0x") || unsigned.starts_with("0o") || unsigned.starts_with("0b");
    let is_float = !is_radix
        && (unsigned.contains(['.', 'e', 'E']) || unsigned == "inf" || unsigned == "nan");

    if is_float {
        parse_float(literal, unsigned).map(ValueKind::Float).ok_or_else(invalid)
    } else {
        parse_integer(literal, unsigned).map(ValueKind::Integer).ok_or_else(invalid)
    }
}

fn parse_integer(literal: &str, unsigned: &str) -> Option<i64> {
    let signed = literal.len() != unsigned.len();
    let radix = match unsigned.get(..2) {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => 10,
    };

    if radix != 10 {
        if signed {
            return None;
        }
        let digits = &unsigned[2..];
        if !valid_digit_groups(digits, |c| c.is_digit(radix)) {
            return None;
        }
        return i64::from_str_radix(&digits.replace('_', ""), radix).ok();
    }

    if !valid_digit_groups(unsigned, chars::is_digit) || has_leading_zero(unsigned) {
        return None;
    }
    let sign = if literal.starts_with('-') { "-" } else { "" };
    format!("{sign}{}", unsigned.replace('_', "")).parse().ok()
}

fn parse_float(literal: &str, unsigned: &str) -> Option<f64> {
    let negative = literal.starts_with('-');
    match unsigned {
        "inf" => return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY }),
        "nan" => return Some(if negative { -f64::NAN } else { f64::NAN }),
        _ => {}
    }

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(index) => (&unsigned[..index], Some(&unsigned[index + 1..])),
        None => (unsigned, None),
    };
    let (integer, fraction) = match mantissa.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (mantissa, None),
    };

    if !valid_digit_groups(integer, chars::is_digit) || has_leading_zero(integer) {
        return None;
    }
    if let Some(fraction) = fraction {
        if !valid_digit_groups(fraction, chars::is_digit) {
            return None;
        }
    }
    if let Some(exponent) = exponent {
        let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        if !valid_digit_groups(digits, chars::is_digit) {
            return None;
        }
    }

    literal.replace('_', "").parse().ok()
}

/// Digits of one radix, with single underscores allowed only between two digits.
fn valid_digit_groups(digits: &str, is_digit: impl Fn(char) -> bool) -> bool {
    !digits.is_empty()
        && !digits.starts_with('_')
        && !digits.ends_with('_')
        && !digits.contains("__")
        && digits.chars().all(|c| c == '_' || is_digit(c))
}

fn has_leading_zero(digits: &str) -> bool {
    digits.len() > 1 && digits.starts_with('0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Offset, Timelike};

    fn integer(literal: &str) -> Result<i64> {
        match parse_literal(literal, 1)? {
            ValueKind::Integer(i) => Ok(i),
            other => panic!("expected integer, got {other:?}"),
        }
    }

    fn float(literal: &str) -> f64 {
        match parse_literal(literal, 1).unwrap() {
            ValueKind::Float(f) => f,
            other => panic!("expected float, got {other:?}"),
        }
    }

    #[test]
    fn test_decimal_integers() {
        assert_eq!(integer("+99").unwrap(), 99);
        assert_eq!(integer("-17").unwrap(), -17);
        assert_eq!(integer("0").unwrap(), 0);
        assert_eq!(integer("-0").unwrap(), 0);
        assert_eq!(integer("1_000").unwrap(), 1000);
        assert_eq!(integer("5_349_221").unwrap(), 5_349_221);
        assert_eq!(integer("-9223372036854775808").unwrap(), i64::MIN);
    }

    #[test]
    fn test_prefixed_integers() {
        assert_eq!(integer("0xDEADBEEF").unwrap(), 0xDEAD_BEEF);
        assert_eq!(integer("0xdead_beef").unwrap(), 0xDEAD_BEEF);
        assert_eq!(integer("0o755").unwrap(), 0o755);
        assert_eq!(integer("0b1101_0110").unwrap(), 0b1101_0110);
        // `e` is a hex digit, not an exponent.
        assert_eq!(integer("0xe").unwrap(), 14);
    }

    #[test]
    fn test_invalid_integers() {
        for literal in [
            "1__0", "_1", "1_", "01", "+0x10", "-0b1", "0x", "0xG", "0o8", "9223372036854775808",
            "++1", "1a",
        ] {
            assert!(
                matches!(parse_literal(literal, 3), Err(Error::InvalidNumber { line: 3, .. })),
                "{literal}"
            );
        }
    }

    #[test]
    fn test_floats() {
        assert_eq!(float("+1.0"), 1.0);
        assert_eq!(float("3.1415"), 3.1415);
        assert_eq!(float("-0.01"), -0.01);
        assert_eq!(float("5e+22"), 5e22);
        assert_eq!(float("1e06"), 1e6);
        assert_eq!(float("-2E-2"), -0.02);
        assert_eq!(float("6.626e-34"), 6.626e-34);
        assert_eq!(float("224_617.445_991"), 224_617.445_991);
        assert_eq!(float("inf"), f64::INFINITY);
        assert_eq!(float("-inf"), f64::NEG_INFINITY);
        assert!(float("+nan").is_nan());
        assert!(float("-nan").is_nan());
    }

    #[test]
    fn test_invalid_floats() {
        for literal in [".7", "7.", "3.e+20", "1e", "1.0e_1", "01.5", "1._5", "infinity"] {
            assert!(parse_literal(literal, 1).is_err(), "{literal}");
        }
    }

    #[test]
    fn test_date_disambiguation() {
        assert!(matches!(parse_literal("1979-05-27", 1), Ok(ValueKind::LocalDate(_))));
        assert!(matches!(parse_literal("07:32:00", 1), Ok(ValueKind::LocalTime(_))));
        assert!(matches!(
            parse_literal("1979-05-27T07:32:00", 1),
            Ok(ValueKind::LocalDateTime(_))
        ));
        assert!(matches!(
            parse_literal("1979-05-27 07:32:00", 1),
            Ok(ValueKind::LocalDateTime(_))
        ));
        assert!(matches!(
            parse_literal("1979-05-27T07:32:00Z", 1),
            Ok(ValueKind::OffsetDateTime(_))
        ));
    }

    #[test]
    fn test_offset_is_preserved() {
        let ValueKind::OffsetDateTime(dt) = parse_literal("1979-05-27T00:32:00.999999-07:00", 1).unwrap()
        else {
            panic!("expected offset date-time");
        };
        assert_eq!(dt.offset().fix().local_minus_utc(), -7 * 3600);
        assert_eq!(dt.day(), 27);
        assert_eq!(dt.nanosecond(), 999_999_000);
    }

    #[test]
    fn test_fraction_truncates_past_nanoseconds() {
        let ValueKind::LocalTime(time) = parse_literal("00:32:00.1234567891", 1).unwrap() else {
            panic!("expected local time");
        };
        assert_eq!(time.nanosecond(), 123_456_789);
    }

    #[test]
    fn test_separator_and_offset_errors() {
        assert!(matches!(
            parse_literal("1979-05-2707:32:00", 2),
            Err(Error::MissingDateTimeSeparator { line: 2, .. })
        ));
        assert!(matches!(
            parse_literal("1979-05-27T", 2),
            Err(Error::UnnecessaryDateTimeSeparator { .. })
        ));
        assert!(matches!(
            parse_literal("07:32:00Z", 2),
            Err(Error::OffsetOnBareDateTime { .. })
        ));
        assert!(matches!(
            parse_literal("1979-05-27+01:00", 2),
            Err(Error::OffsetOnBareDateTime { .. })
        ));
    }

    #[test]
    fn test_out_of_range_components() {
        for literal in ["1979-13-01", "1979-02-30", "25:00:00", "1979-05-27T07:32:00+24:00"] {
            assert!(
                matches!(parse_literal(literal, 1), Err(Error::InvalidDateTime { .. })),
                "{literal}"
            );
        }

        // U+0665 ARABIC-INDIC DIGIT FIVE is a digit, but not one TOML accepts.
        for literal in ["07:32:00.\u{665}", "07:32:00.5\u{665}", "1979-05-27T07:32:0\u{665}"] {
            assert!(parse_literal(literal, 1).is_err(), "{literal}");
        }
        assert_eq!(fraction_to_nanos("\u{665}"), None);
        assert_eq!(fraction_to_nanos("5"), Some(500_000_000));
        assert_eq!(fraction_to_nanos("1234567891"), Some(123_456_789));
    }

    #[test]
    fn test_bare_date_shape() {
        assert!(is_bare_date("1979-05-27"));
        assert!(!is_bare_date("1979-05-27T07:32:00"));
        assert!(!is_bare_date("1979_05_27"));
    }
}
