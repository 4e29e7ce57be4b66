//! Conversion between caption timestamps and epoch seconds.
//!
//! Timestamps come in two textual shapes: `H:M:S` when the source includes
//! an hour component and `M:S` otherwise. The numeric side is the count of
//! seconds since the video started (not Unix time).

use crate::{Result, VidmarkError};

/// Seconds elapsed since the start of the video
pub type EpochSeconds = u64;

/// Parse a caption timestamp into epoch seconds.
///
/// Three colon-separated components are read as `H:M:S`, two as `M:S`.
/// Leading zeros are ignored, so `"01:43"` and `"1:43"` are both 103.
/// Any other component count, a non-numeric component, or a total past
/// `u64::MAX` seconds is rejected.
pub fn parse_timestamp(timestamp: &str) -> Result<EpochSeconds> {
    let parts: Vec<&str> = timestamp.split(':').collect();

    match parts.as_slice() {
        [hours, minutes, seconds] => {
            let hours = parse_component(hours, timestamp)?;
            let minutes = parse_component(minutes, timestamp)?;
            let seconds = parse_seconds(seconds, timestamp)?;
            checked_total(hours, minutes, seconds, timestamp)
        }
        [minutes, seconds] => {
            let minutes = parse_component(minutes, timestamp)?;
            let seconds = parse_seconds(seconds, timestamp)?;
            checked_total(0, minutes, seconds, timestamp)
        }
        _ => Err(VidmarkError::MalformedTimestamp(timestamp.to_string())),
    }
}

/// Format epoch seconds as a zero-padded timestamp.
///
/// The hour component is dropped only when it is zero; minutes and seconds
/// are always present. Hours past 99 simply widen, they are never clamped,
/// so the round trip through [`parse_timestamp`] holds for any value.
pub fn format_epoch(seconds: EpochSeconds) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds / 60) % 60;
    let secs = seconds % 60;

    if hours == 0 {
        format!("{:02}:{:02}", minutes, secs)
    } else {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }
}

/// Combine the components without wrapping; a timestamp whose total cannot
/// be represented is malformed, not a number near zero.
fn checked_total(
    hours: EpochSeconds,
    minutes: EpochSeconds,
    seconds: EpochSeconds,
    timestamp: &str,
) -> Result<EpochSeconds> {
    hours
        .checked_mul(3600)
        .and_then(|total| total.checked_add(minutes.checked_mul(60)?))
        .and_then(|total| total.checked_add(seconds))
        .ok_or_else(|| VidmarkError::MalformedTimestamp(timestamp.to_string()))
}

fn parse_component(component: &str, timestamp: &str) -> Result<EpochSeconds> {
    component
        .trim()
        .parse::<EpochSeconds>()
        .map_err(|_| VidmarkError::MalformedTimestamp(timestamp.to_string()))
}

/// The seconds component of SBV timestamps may carry a fractional part
/// (`0:00:03.439`); it is truncated, matching how every historical consumer
/// of this format read the field.
fn parse_seconds(component: &str, timestamp: &str) -> Result<EpochSeconds> {
    let whole = component.split('.').next().unwrap_or(component);
    parse_component(whole, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_hours() {
        assert_eq!(parse_timestamp("0:01:43").unwrap(), 103);
        assert_eq!(parse_timestamp("00:01:43").unwrap(), 103);
        assert_eq!(parse_timestamp("00:1:43").unwrap(), 103);
        assert_eq!(parse_timestamp("0:1:43").unwrap(), 103);
        assert_ne!(parse_timestamp("01:1:43").unwrap(), 103);
        assert_eq!(parse_timestamp("01:1:43").unwrap(), 3703);
    }

    #[test]
    fn test_hms() {
        assert_eq!(parse_timestamp("1:52:34").unwrap(), 6754);
        assert_eq!(parse_timestamp("01:52:34").unwrap(), 6754);
        assert_eq!(parse_timestamp("2:30:00").unwrap(), 9000);
        assert_eq!(parse_timestamp("2:30:0").unwrap(), 9000);
        assert_eq!(parse_timestamp("2:00:03").unwrap(), 7203);
    }

    #[test]
    fn test_ms() {
        assert_eq!(parse_timestamp("01:43").unwrap(), 103);
        assert_eq!(parse_timestamp("1:43").unwrap(), 103);
        assert_eq!(parse_timestamp("30:00").unwrap(), 1800);
        assert_eq!(parse_timestamp("30:0").unwrap(), 1800);
        assert_eq!(parse_timestamp("00:03").unwrap(), 3);
        assert_eq!(parse_timestamp("0:3").unwrap(), 3);
    }

    #[test]
    fn test_fractional_seconds_truncated() {
        assert_eq!(parse_timestamp("0:00:03.439").unwrap(), 3);
        assert_eq!(parse_timestamp("1:04.160").unwrap(), 64);
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            parse_timestamp("12"),
            Err(VidmarkError::MalformedTimestamp(_))
        ));
        assert!(matches!(
            parse_timestamp("1:2:3:4"),
            Err(VidmarkError::MalformedTimestamp(_))
        ));
        assert!(matches!(
            parse_timestamp("one:43"),
            Err(VidmarkError::MalformedTimestamp(_))
        ));
        assert!(matches!(
            parse_timestamp(""),
            Err(VidmarkError::MalformedTimestamp(_))
        ));
    }

    #[test]
    fn test_overflowing_total_is_malformed() {
        // u64::MAX in the hours field would wrap the multiplication
        assert!(matches!(
            parse_timestamp("18446744073709551615:00:00"),
            Err(VidmarkError::MalformedTimestamp(_))
        ));
        assert!(matches!(
            parse_timestamp("18446744073709551615:00"),
            Err(VidmarkError::MalformedTimestamp(_))
        ));
        assert!(matches!(
            parse_timestamp("5124095576030431:59:59"),
            Err(VidmarkError::MalformedTimestamp(_))
        ));

        // the largest representable total still parses
        let max_hours = u64::MAX / 3600;
        let remainder = u64::MAX - max_hours * 3600;
        let timestamp = format!("{}:{}:{}", max_hours, remainder / 60, remainder % 60);
        assert_eq!(parse_timestamp(&timestamp).unwrap(), u64::MAX);
    }

    #[test]
    fn test_format_epoch() {
        assert_eq!(format_epoch(0), "00:00");
        assert_eq!(format_epoch(103), "01:43");
        assert_eq!(format_epoch(2603), "43:23");
        assert_eq!(format_epoch(3600), "01:00:00");
        assert_eq!(format_epoch(6754), "01:52:34");
        // hours widen past two digits, no clamping
        assert_eq!(format_epoch(53 * 3600), "53:00:00");
        assert_eq!(format_epoch(100 * 3600 + 61), "100:01:01");
    }

    #[test]
    fn test_round_trip_epoch() {
        for seconds in [0, 1, 59, 60, 103, 3599, 3600, 6754, 86400, 9687654321] {
            assert_eq!(parse_timestamp(&format_epoch(seconds)).unwrap(), seconds);
        }
    }

    #[test]
    fn test_round_trip_string() {
        assert_eq!(format_epoch(parse_timestamp("1:52:34").unwrap()), "01:52:34");
        assert_eq!(format_epoch(parse_timestamp("01:52:34").unwrap()), "01:52:34");
        assert_eq!(format_epoch(parse_timestamp("0:43:23").unwrap()), "43:23");
        assert_eq!(format_epoch(parse_timestamp("1:4:7").unwrap()), "01:04:07");
        assert_eq!(format_epoch(parse_timestamp("53:00:00").unwrap()), "53:00:00");
    }
}
