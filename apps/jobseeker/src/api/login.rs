use reqwest::Method;

use super::ApiClient;
use crate::errors::ApiError;
use crate::models::{LoginForm, Message, NewPassword, Token, User};

impl ApiClient {
    /// POST /login/access-token
    ///
    /// OAuth2-compatible password login. Does not store the token; see `Session::login`.
    pub async fn login_access_token(&self, form: &LoginForm) -> Result<Token, ApiError> {
        Self::send_json(self.request(Method::POST, "/login/access-token").form(form)).await
    }

    /// POST /login/test-token
    pub async fn test_token(&self) -> Result<User, ApiError> {
        Self::send_json(self.request(Method::POST, "/login/test-token")).await
    }

    /// POST /password-recovery/{email}
    pub async fn recover_password(&self, email: &str) -> Result<Message, ApiError> {
        let path = format!("/password-recovery/{}", urlencoding::encode(email));
        Self::send_json(self.request(Method::POST, &path)).await
    }

    /// POST /password-recovery-html-content/{email}
    ///
    /// Returns the rendered recovery e-mail, for superusers previewing it.
    pub async fn recover_password_html_content(&self, email: &str) -> Result<String, ApiError> {
        let path = format!("/password-recovery-html-content/{}", urlencoding::encode(email));
        Self::send_text(self.request(Method::POST, &path)).await
    }

    /// POST /reset-password/
    pub async fn reset_password(&self, body: &NewPassword) -> Result<Message, ApiError> {
        Self::send_json(self.request(Method::POST, "/reset-password/").json(body)).await
    }
}
