//! PDF date strings.
//!
//! PDF Spec: ISO 32000-1:2008, Section 7.9.4 - Dates. The format is
//! `D:YYYYMMDDHHmmSSOHH'mm'`, where every field after the year is optional and
//! `O` is `+`, `-` or `Z`.

use crate::error::{Error, Result};
use crate::object::Dictionary;
use crate::validate::entry::validate_string_entry;
use crate::version::VersionGate;
use crate::xref::XRefTable;
use chrono::{DateTime, FixedOffset, NaiveDate};

/// Parse a PDF date.
///
/// With `relaxed` set, the `D:` prefix may be missing, the apostrophe after
/// the offset minutes may be dropped, and `Z` may be followed by a zero offset
/// (`Z00'00'`).
pub fn parse_pdf_date(s: &str, relaxed: bool) -> Option<DateTime<FixedOffset>> {
    let body = match s.strip_prefix("D:") {
        Some(body) => body,
        None if relaxed => s.trim(),
        None => return None,
    };

    let digits = body.bytes().take_while(u8::is_ascii_digit).count();
    if !(4..=14).contains(&digits) || digits % 2 != 0 {
        return None;
    }
    let (stamp, zone) = body.split_at(digits);

    let field = |start: usize, default: u32| -> Option<u32> {
        match stamp.get(start..start + 2) {
            Some(v) => v.parse().ok(),
            None => Some(default),
        }
    };
    let year: i32 = stamp.get(0..4)?.parse().ok()?;
    let month = field(4, 1)?;
    let day = field(6, 1)?;
    let hour = field(8, 0)?;
    let minute = field(10, 0)?;
    let second = field(12, 0)?;

    let offset = FixedOffset::east_opt(parse_offset(zone, relaxed)?)?;
    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(hour, minute, second)?
        .and_local_timezone(offset)
        .single()
}

/// Offset in seconds east of UTC.
fn parse_offset(zone: &str, relaxed: bool) -> Option<i32> {
    let mut chars = zone.chars();
    let sign = match chars.next() {
        None => return Some(0),
        Some('Z') => {
            let rest = chars.as_str();
            let zero = !rest.is_empty() && rest.chars().all(|c| c == '0' || c == '\'');
            return (rest.is_empty() || (relaxed && zero)).then_some(0);
        },
        Some('+') => 1,
        Some('-') => -1,
        Some(_) => return None,
    };

    let rest = chars.as_str();
    let hours: i32 = rest.get(0..2)?.parse().ok()?;
    let after = rest.get(2..)?;

    let minutes: i32 = match after {
        "" | "'" => 0,
        _ => {
            let (mm, tail) = match after.strip_prefix('\'') {
                Some(a) => (a.get(0..2)?, a.get(2..)?),
                None if relaxed => (after.get(0..2)?, after.get(2..)?),
                None => return None,
            };
            match tail {
                "'" => {},
                "" if relaxed => {},
                _ => return None,
            }
            mm.parse().ok()?
        },
    };

    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * 3600 + minutes * 60))
}

/// Validate an entry holding a date string.
///
/// In relaxed mode a date that cannot be parsed even leniently is logged and
/// reported as absent.
pub fn validate_date_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
) -> Result<Option<DateTime<FixedOffset>>> {
    let Some(raw) = validate_string_entry(xref, dict, dict_name, entry_name, required, since, None)?
    else {
        return Ok(None);
    };

    let text = String::from_utf8_lossy(&raw);
    let relaxed = xref.config().is_relaxed();
    match parse_pdf_date(&text, relaxed) {
        Some(date) => Ok(Some(date)),
        None if relaxed => {
            log::warn!("{}: ignoring unparsable date /{} ({})", dict_name, entry_name, text);
            Ok(None)
        },
        None => Err(Error::violation(dict_name, entry_name, format!("({})", text))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_full_date() {
        let date = parse_pdf_date("D:20240115103045+05'30'", false).unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
        assert_eq!(date.hour(), 10);
        assert_eq!(date.second(), 45);
        assert_eq!(date.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn test_year_only() {
        let date = parse_pdf_date("D:2024", false).unwrap();
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 1);
    }

    #[test]
    fn test_utc_and_negative_offsets() {
        assert_eq!(parse_pdf_date("D:19990101000000Z", false).unwrap().offset().local_minus_utc(), 0);
        let date = parse_pdf_date("D:19990101000000-08'00'", false).unwrap();
        assert_eq!(date.offset().local_minus_utc(), -8 * 3600);
    }

    #[test]
    fn test_strict_rejections() {
        assert!(parse_pdf_date("20240115", false).is_none());
        assert!(parse_pdf_date("D:20241301", false).is_none());
        assert!(parse_pdf_date("D:202401151", false).is_none());
        assert!(parse_pdf_date("D:20240115103045+05'30", false).is_none());
        assert!(parse_pdf_date("D:20240115103045Z00'00'", false).is_none());
    }

    #[test]
    fn test_relaxed_variants() {
        assert!(parse_pdf_date("20240115", true).is_some());
        assert!(parse_pdf_date("D:20240115103045+05'30", true).is_some());
        assert!(parse_pdf_date("D:20240115103045+0530", true).is_some());
        assert!(parse_pdf_date("D:20240115103045Z00'00'", true).is_some());
        assert!(parse_pdf_date("yesterday", true).is_none());
    }
}
