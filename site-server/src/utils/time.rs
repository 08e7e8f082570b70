//! Time helpers
//!
//! Stored timestamps are RFC 3339 strings in UTC; `reopening_date` stays in
//! whatever format the admin entered (format preserved verbatim).

use chrono::Utc;

/// Current time as an RFC 3339 string (UTC)
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}
