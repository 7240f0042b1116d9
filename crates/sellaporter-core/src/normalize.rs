//! Date and time normalisation for authored launch fields.
//!
//! Launch dates come from a date picker (`20160114` or `2016-01-14`,
//! depending on the field's return format) and times from a plain text
//! input (`9:30`, `0930`, `17:00`). Both are reduced to their digits,
//! combined with the site's fixed UTC offset into a basic-format ISO 8601
//! string (`20160114T093000+02:00`), and parsed into an instant.
//!
//! # Rules
//!
//! - A date with no digits, or whose digits are numerically zero, is an
//!   [`NormalizeError::InvalidConfiguration`].
//! - Up to four time digits are an `HHMM` integer, zero-padded on the
//!   left, with `00` seconds appended. Five or six digits are read as
//!   `HHMMSS`, zero-padded on the left (`9:30:00` is `093000`).
//! - Any other time input falls back to midnight with a warning; a bad time
//!   never invalidates the date.

use chrono::{DateTime, FixedOffset};
use tracing::warn;

/// Clock value used when the authored time cannot be understood.
pub const MIDNIGHT: &str = "000000";

/// Layout of the combined ISO 8601 string built by [`to_iso8601`].
const ISO_BASIC_FORMAT: &str = "%Y%m%dT%H%M%S%:z";

/// Errors raised while normalising launch fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    /// The authored value cannot describe an instant.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Explanation of what is wrong with the value.
        reason: String,
    },
}

impl NormalizeError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

/// Normalise a raw date, raw time, and UTC offset into an instant.
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidConfiguration`] if the date is missing,
/// zero, or not a calendar date, or if `tz_offset` is not `+HH:MM`/`-HH:MM`.
pub fn to_instant(
    date_raw: &str,
    time_raw: &str,
    tz_offset: &str,
) -> Result<DateTime<FixedOffset>, NormalizeError> {
    let iso = to_iso8601(date_raw, time_raw, tz_offset)?;
    DateTime::parse_from_str(&iso, ISO_BASIC_FORMAT)
        .map_err(|e| NormalizeError::invalid(format!("cannot parse `{iso}`: {e}")))
}

/// Build the basic-format ISO 8601 string for a raw date and time.
///
/// The result is not checked for calendar validity; [`to_instant`] does that.
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidConfiguration`] if the date has no
/// digits or its digits are numerically zero.
pub fn to_iso8601(date_raw: &str, time_raw: &str, tz_offset: &str) -> Result<String, NormalizeError> {
    let clean_date = digits(date_raw);
    let is_zero = clean_date.bytes().all(|b| b == b'0');
    if is_zero {
        return Err(NormalizeError::invalid(format!(
            "launch date `{date_raw}` has no usable digits"
        )));
    }

    let clean_time = clock_digits(time_raw);
    Ok(format!("{clean_date}T{clean_time}{tz_offset}"))
}

/// Check that an offset string is accepted by [`to_instant`].
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidConfiguration`] for anything other than
/// a `+HH:MM` / `-HH:MM` offset.
pub fn validate_offset(tz_offset: &str) -> Result<(), NormalizeError> {
    to_instant("20000101", "", tz_offset)
        .map(|_| ())
        .map_err(|_err| NormalizeError::invalid(format!("`{tz_offset}` is not a UTC offset")))
}

/// Reduce an authored time to a six-digit `HHMMSS` clock value.
///
/// Falls back to [`MIDNIGHT`] (with a warning) for anything unusable.
pub fn clock_digits(time_raw: &str) -> String {
    let clean = digits(time_raw);

    let parts = match clean.len() {
        0 => Some((0, 0, 0)),
        1..=4 => clean.parse::<u32>().ok().and_then(|hhmm| {
            Some((hhmm.checked_div(100)?, hhmm.checked_rem(100)?, 0))
        }),
        5 => split_hhmmss(&format!("{clean:0>6}")),
        6 => split_hhmmss(&clean),
        _ => None,
    };

    match parts {
        Some((hour, minute, second)) if hour < 24 && minute < 60 && second < 60 => {
            format!("{hour:02}{minute:02}{second:02}")
        }
        _ => {
            warn!(time = time_raw, "Unrecognised launch time, using midnight");
            MIDNIGHT.to_owned()
        }
    }
}

fn split_hhmmss(clean: &str) -> Option<(u32, u32, u32)> {
    let hour = clean.get(0..2)?.parse().ok()?;
    let minute = clean.get(2..4)?.parse().ok()?;
    let second = clean.get(4..6)?.parse().ok()?;
    Some((hour, minute, second))
}

fn digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn separators_do_not_matter() {
        let dashed = to_instant("2016-01-14", "9:30", "+00:00").unwrap();
        let bare = to_instant("20160114", "930", "+00:00").unwrap();
        assert_eq!(dashed, bare);
        assert_eq!(
            dashed.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2016, 1, 14, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn offset_shifts_the_instant() {
        let berlin = to_instant("2016-01-14", "12:00", "+02:00").unwrap();
        assert_eq!(
            berlin.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2016, 1, 14, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn empty_date_is_invalid() {
        let result = to_instant("", "00:00", "+00:00");
        assert!(matches!(
            result,
            Err(NormalizeError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn zero_and_garbage_dates_are_invalid() {
        assert!(to_instant("0000-00-00", "", "+00:00").is_err());
        assert!(to_instant("soon", "", "+00:00").is_err());
        assert!(to_instant("2016-13-40", "", "+00:00").is_err());
        assert!(to_instant("2016-1-4", "", "+00:00").is_err());
    }

    #[test]
    fn short_times_are_left_padded() {
        assert_eq!(clock_digits("9:30"), "093000");
        assert_eq!(clock_digits("0:00"), "000000");
        assert_eq!(clock_digits("17:05"), "170500");
        assert_eq!(clock_digits("9"), "000900");
        assert_eq!(clock_digits(""), "000000");
    }

    #[test]
    fn six_digit_times_keep_seconds() {
        assert_eq!(clock_digits("12:30:45"), "123045");
        assert_eq!(clock_digits("9:30:00"), "093000");
        assert_eq!(clock_digits("0:00:05"), "000005");
    }

    #[test]
    fn single_digit_hour_with_seconds_keeps_the_hour() {
        let instant = to_instant("2024-06-01", "9:30:00", "+00:00").unwrap();
        assert_eq!(
            instant.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn malformed_times_fall_back_to_midnight() {
        assert_eq!(clock_digits("25:00"), MIDNIGHT);
        assert_eq!(clock_digits("12:75"), MIDNIGHT);
        assert_eq!(clock_digits("1234567"), MIDNIGHT);
        assert_eq!(clock_digits("9:75:00"), MIDNIGHT);
        assert_eq!(clock_digits("noon"), MIDNIGHT);
    }

    #[test]
    fn bad_time_keeps_the_date() {
        let instant = to_instant("2024-06-01", "lunchtime", "+00:00").unwrap();
        assert_eq!(
            instant.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn iso_string_layout() {
        let iso = to_iso8601("2016-01-14", "9:30", "-05:00").unwrap();
        assert_eq!(iso, "20160114T093000-05:00");
    }

    #[test]
    fn offsets_are_validated() {
        assert!(validate_offset("+00:00").is_ok());
        assert!(validate_offset("-05:30").is_ok());
        assert!(validate_offset("UTC").is_err());
        assert!(validate_offset("").is_err());
    }
}
