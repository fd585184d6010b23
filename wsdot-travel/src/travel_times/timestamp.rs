//! Embedded timestamp decoding.
//!
//! WSDOT serializes instants as `/Date(<ms><+hhmm>)/`: thirteen digits of
//! milliseconds since the Unix epoch followed by a signed UTC offset, for
//! example `/Date(1234567890123+0800)/`.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Deserializer;
use serde::de::{self, Visitor};

const PREFIX: &[u8] = b"/Date(";
const SUFFIX: &[u8] = b")/";
const MILLIS_DIGITS: usize = 13;

/// Total length: prefix, millis, sign, hh, mm, suffix.
const ENCODED_LEN: usize = PREFIX.len() + MILLIS_DIGITS + 1 + 2 + 2 + SUFFIX.len();

/// Error returned when an embedded timestamp cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(r#"unsupported datetime format (expected "/Date(<13-digit ms><+hhmm>)/"): {reason}"#)]
pub struct TimestampError {
    reason: &'static str,
}

impl TimestampError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    /// What was wrong with the input.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// Decode an embedded timestamp into an instant in its own fixed offset.
///
/// # Examples
///
/// ```
/// use wsdot_travel::travel_times::parse_embedded_timestamp;
///
/// let ts = parse_embedded_timestamp("/Date(1234567890123+0800)/").unwrap();
/// assert_eq!(ts.timestamp_millis(), 1_234_567_890_123);
/// assert_eq!(ts.offset().local_minus_utc(), 8 * 3600);
///
/// assert!(parse_embedded_timestamp("/Date(1234567890123+08)/").is_err());
/// assert!(parse_embedded_timestamp("1234567890123+0800)/").is_err());
/// ```
pub fn parse_embedded_timestamp(s: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    let bytes = s.as_bytes();
    if bytes.len() != ENCODED_LEN {
        return Err(TimestampError::new("wrong length"));
    }

    let inner = bytes
        .strip_prefix(PREFIX)
        .ok_or_else(|| TimestampError::new("missing /Date( prefix"))?;
    let inner = inner
        .strip_suffix(SUFFIX)
        .ok_or_else(|| TimestampError::new("missing )/ suffix"))?;

    let (millis, offset) = inner.split_at(MILLIS_DIGITS);
    let millis =
        parse_digits(millis).ok_or_else(|| TimestampError::new("invalid millisecond digits"))?;

    let sign = match offset[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return Err(TimestampError::new("missing offset sign")),
    };
    let hours =
        parse_digits(&offset[1..3]).ok_or_else(|| TimestampError::new("invalid offset hours"))?;
    let minutes =
        parse_digits(&offset[3..5]).ok_or_else(|| TimestampError::new("invalid offset minutes"))?;
    // Minutes carry the same sign as hours: -0530 is five and a half hours
    // west. They are not capped at 59, so +0160 is two hours east.
    let offset_secs = sign * (hours * 3600 + minutes * 60);
    let offset = i32::try_from(offset_secs)
        .ok()
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| TimestampError::new("offset out of range"))?;

    let utc = DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| TimestampError::new("timestamp out of range"))?;
    Ok(utc.with_timezone(&offset))
}

/// ASCII decimal digits only; `None` on anything else or empty input.
fn parse_digits(bytes: &[u8]) -> Option<i64> {
    if bytes.is_empty() {
        return None;
    }
    bytes.iter().try_fold(0i64, |acc, b| {
        let digit = (*b as char).to_digit(10)?;
        acc.checked_mul(10)?.checked_add(i64::from(digit))
    })
}

/// Serde adapter for `#[serde(deserialize_with = "...")]`.
///
/// Only JSON strings are accepted; numbers, nulls, and objects are rejected
/// with the same expected-format message.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_str(EmbeddedTimestampVisitor)
}

struct EmbeddedTimestampVisitor;

impl Visitor<'_> for EmbeddedTimestampVisitor {
    type Value = DateTime<FixedOffset>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(r#"a timestamp string "/Date(<13-digit ms><+hhmm>)/""#)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_embedded_timestamp(v).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike, Utc};

    #[test]
    fn decodes_reference_timestamp() {
        let ts = parse_embedded_timestamp("/Date(1234567890123+0800)/").unwrap();

        assert_eq!(ts.timestamp(), 1_234_567_890);
        assert_eq!(ts.timestamp_subsec_millis(), 123);
        assert_eq!(ts.offset(), &FixedOffset::east_opt(8 * 3600).unwrap());
        assert_eq!(
            ts.with_timezone(&Utc),
            Utc.timestamp_millis_opt(1_234_567_890_123).unwrap()
        );
        // 2009-02-13 23:31:30.123 UTC is 07:31 the next morning at +08:00
        assert_eq!(ts.hour(), 7);
        assert_eq!(ts.minute(), 31);
    }

    #[test]
    fn negative_offset_applies_to_minutes() {
        let ts = parse_embedded_timestamp("/Date(1700000000000-0530)/").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), -(5 * 3600 + 30 * 60));
        assert_eq!(ts.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn zero_offset() {
        let ts = parse_embedded_timestamp("/Date(0000000000000+0000)/").unwrap();
        assert_eq!(ts.timestamp_millis(), 0);
        assert_eq!(ts.offset().local_minus_utc(), 0);
    }

    #[test]
    fn reject_missing_minute_digits() {
        let err = parse_embedded_timestamp("/Date(1234567890123+08)/").unwrap_err();
        assert_eq!(err.reason(), "wrong length");
    }

    #[test]
    fn reject_missing_prefix() {
        assert!(parse_embedded_timestamp("1234567890123+0800)/").is_err());
        let err = parse_embedded_timestamp("xDate(1234567890123+0800)/").unwrap_err();
        assert_eq!(err.reason(), "missing /Date( prefix");
    }

    #[test]
    fn reject_missing_suffix() {
        let err = parse_embedded_timestamp("/Date(1234567890123+0800)x").unwrap_err();
        assert_eq!(err.reason(), "missing )/ suffix");
    }

    #[test]
    fn reject_missing_sign() {
        let err = parse_embedded_timestamp("/Date(1234567890123 0800)/").unwrap_err();
        assert_eq!(err.reason(), "missing offset sign");
    }

    #[test]
    fn reject_wrong_digit_counts() {
        assert!(parse_embedded_timestamp("/Date(123456789012+0800)/").is_err());
        assert!(parse_embedded_timestamp("/Date(12345678901234+0800)/").is_err());
        assert!(parse_embedded_timestamp("/Date(123456789012a+0800)/").is_err());
    }

    #[test]
    fn reject_case_mismatch() {
        assert!(parse_embedded_timestamp("/date(1234567890123+0800)/").is_err());
    }

    #[test]
    fn reject_out_of_range_offsets() {
        let err = parse_embedded_timestamp("/Date(1234567890123+2400)/").unwrap_err();
        assert_eq!(err.reason(), "offset out of range");
        let err = parse_embedded_timestamp("/Date(1234567890123-2360)/").unwrap_err();
        assert_eq!(err.reason(), "offset out of range");
    }

    #[test]
    fn minutes_past_59_roll_into_hours() {
        let ts = parse_embedded_timestamp("/Date(1234567890123+0160)/").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 2 * 3600);

        let ts = parse_embedded_timestamp("/Date(1234567890123-0099)/").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), -99 * 60);
        assert_eq!(ts.timestamp_millis(), 1_234_567_890_123);
    }

    #[test]
    fn reject_non_ascii_digits() {
        // Same byte length is impossible with multi-byte digits, but make sure
        // nothing panics on odd input.
        assert!(parse_embedded_timestamp("/Date(١٢٣٤٥٦٧٨٩٠١٢٣+0800)/").is_err());
        assert!(parse_embedded_timestamp("").is_err());
    }

    #[test]
    fn error_display_names_expected_format() {
        let err = parse_embedded_timestamp("garbage").unwrap_err();
        assert!(err.to_string().contains("/Date("));
        assert!(err.to_string().contains("wrong length"));
    }

    #[derive(Debug, serde::Deserialize)]
    struct Wrapper {
        #[serde(deserialize_with = "super::deserialize")]
        at: DateTime<FixedOffset>,
    }

    #[test]
    fn serde_accepts_string() {
        let w: Wrapper = serde_json::from_str(r#"{"at": "/Date(1234567890123+0800)/"}"#).unwrap();
        assert_eq!(w.at.timestamp_millis(), 1_234_567_890_123);
    }

    #[test]
    fn serde_rejects_non_string() {
        let err = serde_json::from_str::<Wrapper>(r#"{"at": 1234567890123}"#).unwrap_err();
        assert!(err.to_string().contains("/Date("));

        assert!(serde_json::from_str::<Wrapper>(r#"{"at": null}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{}"#).is_err());
    }

    #[test]
    fn serde_rejects_malformed_string() {
        let err =
            serde_json::from_str::<Wrapper>(r#"{"at": "/Date(1234567890123)/"}"#).unwrap_err();
        assert!(err.to_string().contains("unsupported datetime format"));
    }
}
