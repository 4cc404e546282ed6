use std::time::SystemTime;

/// Formats a timestamp as an IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn format_http_date(time: SystemTime) -> String {
    httpdate::fmt_http_date(time)
}

/// The current time, formatted for a `Date` header.
pub fn now() -> String {
    format_http_date(SystemTime::now())
}
