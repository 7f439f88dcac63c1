//! Outbound SMS delivery.

use async_trait::async_trait;

use crate::error::AppError;

/// Delivery collaborator for verification codes. The production
/// implementation talks to Twilio; tests inject a recording fake.
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send(&self, to: &str, body: &str) -> Result<(), AppError>;
}

pub struct TwilioSms {
    http: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl TwilioSms {
    pub fn new(account_sid: &str, auth_token: &str, from_number: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            account_sid: account_sid.to_string(),
            auth_token: auth_token.to_string(),
            from_number: from_number.to_string(),
        }
    }
}

#[async_trait]
impl SmsSender for TwilioSms {
    async fn send(&self, to: &str, body: &str) -> Result<(), AppError> {
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        );

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("To", to),
                ("From", self.from_number.as_str()),
                ("Body", body),
            ])
            .send()
            .await
            .map_err(|e| AppError::Delivery(format!("Twilio request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Delivery(format!(
                "Twilio returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
