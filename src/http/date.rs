//! HTTP date formatting
//!
//! Header dates (`Expires`, `Last-Modified`) use the RFC 1123 form in GMT.

use chrono::{DateTime, Utc};

/// Format used for header dates, e.g. `Sat, 10 Apr 2010 17:31:31 GMT`
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format milliseconds since the Unix epoch as an HTTP header date
///
/// # Examples
/// ```
/// use sass_bridge::http::date::to_date_as_string;
/// assert_eq!(to_date_as_string(1_270_920_691_000), "Sat, 10 Apr 2010 17:31:31 GMT");
/// ```
pub fn to_date_as_string(milliseconds: i64) -> String {
    // Out-of-range timestamps fall back to the epoch
    let time = DateTime::<Utc>::from_timestamp_millis(milliseconds).unwrap_or_default();
    time.format(HTTP_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        assert_eq!(to_date_as_string(0), "Thu, 01 Jan 1970 00:00:00 GMT");
    }

    #[test]
    fn test_known_date() {
        assert_eq!(
            to_date_as_string(1_270_920_691_000),
            "Sat, 10 Apr 2010 17:31:31 GMT"
        );
    }

    #[test]
    fn test_millis_truncated() {
        assert_eq!(
            to_date_as_string(1_270_920_691_999),
            "Sat, 10 Apr 2010 17:31:31 GMT"
        );
    }

    #[test]
    fn test_single_digit_day_padded() {
        // 2021-03-05T08:09:10Z
        assert_eq!(
            to_date_as_string(1_614_931_750_000),
            "Fri, 05 Mar 2021 08:09:10 GMT"
        );
    }

    #[test]
    fn test_out_of_range_falls_back_to_epoch() {
        assert_eq!(to_date_as_string(i64::MAX), "Thu, 01 Jan 1970 00:00:00 GMT");
    }
}
