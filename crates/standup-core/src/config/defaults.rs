//! Default value functions used by serde for config deserialization.

pub fn default_name() -> String {
    "Standup".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_tracker_url() -> String {
    crate::report::DEFAULT_TRACKER_URL.to_string()
}
