//! Outbound SMS through the provider's HTTP API.
//!
//! With `SMS_ENABLED` unset the message is written to the log instead, which
//! is how OTPs are read in development.

use serde::Serialize;
use tracing::{info, instrument, warn};

use hostelhub_config::SmsConfig;
use hostelhub_core::AppError;

#[derive(Debug, Serialize)]
struct SmsRequest<'a> {
    api_key: &'a str,
    senderid: &'a str,
    number: &'a str,
    message: &'a str,
}

#[derive(Clone, Debug)]
pub struct SmsService {
    config: SmsConfig,
    client: reqwest::Client,
}

impl SmsService {
    pub fn new(config: SmsConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    #[instrument(skip(self, message))]
    pub async fn send(&self, phone: &str, message: &str) -> Result<(), AppError> {
        if !self.config.enabled {
            info!(phone = %phone, message = %message, "SMS disabled, message not sent");
            return Ok(());
        }

        let response = self
            .client
            .post(&self.config.api_url)
            .json(&SmsRequest {
                api_key: &self.config.api_key,
                senderid: &self.config.sender_id,
                number: phone,
                message,
            })
            .send()
            .await
            .map_err(|e| AppError::internal(anyhow::anyhow!("SMS request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(phone = %phone, status = %status, "SMS provider rejected message");
            return Err(AppError::internal(anyhow::anyhow!(
                "SMS provider returned {}",
                status
            )));
        }

        info!(phone = %phone, "SMS sent");
        Ok(())
    }

    /// Sends a verification code. Delivery failures are logged and not
    /// returned; the owner can ask for a new code.
    pub async fn send_otp(&self, phone: &str, otp: &str, ttl_seconds: i64) {
        let message = format!(
            "Your HostelHub verification code is {}. It expires in {} minutes.",
            otp,
            ttl_seconds / 60
        );

        match self.send(phone, &message).await {
            Ok(()) => crate::metrics::track_otp_sent(true),
            Err(e) => {
                crate::metrics::track_otp_sent(false);
                warn!(phone = %phone, error = %e.error, "Failed to deliver OTP");
            }
        }
    }
}
