use reqwest::Method;

use super::ApiClient;
use crate::errors::ApiError;
use crate::models::Message;

impl ApiClient {
    /// POST /utils/test-email/?email_to=
    pub async fn test_email(&self, email_to: &str) -> Result<Message, ApiError> {
        Self::send_json(
            self.request(Method::POST, "/utils/test-email/")
                .query(&[("email_to", email_to)]),
        )
        .await
    }
}
