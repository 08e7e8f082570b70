//! Site Settings Model (Singleton)
//!
//! One record per deployment, updated in place, never created or deleted
//! after the initial seed.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Site settings entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Free text shown in the footer and on the home page
    pub opening_hours: String,
    pub is_closed: bool,
    /// Stored verbatim in whatever format the admin entered
    #[serde(default)]
    pub reopening_date: Option<String>,
    /// Free text; "None" (any case) or empty means no regular closure
    pub closed_days: String,
    pub updated_at: Option<String>,
}

impl SiteSettings {
    /// Whether a regular weekly closure is configured
    pub fn has_regular_closure(&self) -> bool {
        let v = self.closed_days.trim();
        !v.is_empty() && !v.eq_ignore_ascii_case("none")
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            id: None,
            opening_hours: "05:00 AM – 04:00 PM".to_string(),
            is_closed: false,
            reopening_date: None,
            closed_days: "None".to_string(),
            updated_at: None,
        }
    }
}

/// Update site settings payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_closed: Option<bool>,
    /// Double Option: outer None = untouched, inner None = clear the date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reopening_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_days: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_sentinel_means_no_regular_closure() {
        let mut settings = SiteSettings::default();
        assert!(!settings.has_regular_closure());

        settings.closed_days = "none".to_string();
        assert!(!settings.has_regular_closure());

        settings.closed_days = "  ".to_string();
        assert!(!settings.has_regular_closure());

        settings.closed_days = "Friday".to_string();
        assert!(settings.has_regular_closure());
    }
}
