use crate::env::{flag, string_or};

/// Settings for the outbound SMS gateway.
///
/// When `enabled` is false, messages are logged instead of sent.
#[derive(Clone, Debug)]
pub struct SmsConfig {
    pub enabled: bool,
    pub api_url: String,
    pub api_key: String,
    pub sender_id: String,
}

impl SmsConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: flag("SMS_ENABLED", false),
            api_url: string_or("SMS_API_URL", "http://localhost:8025/api/sms"),
            api_key: string_or("SMS_API_KEY", ""),
            sender_id: string_or("SMS_SENDER_ID", "HostelHub"),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            api_url: String::new(),
            api_key: String::new(),
            sender_id: "HostelHub".to_string(),
        }
    }
}
