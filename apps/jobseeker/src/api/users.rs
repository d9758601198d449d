use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Method;

use super::ApiClient;
use crate::errors::ApiError;
use crate::models::{
    Message, ModelParameters, UpdatePassword, User, UserCreate, UserRegister, UserUpdateMe,
};

/// Multipart field name the upload endpoint expects.
pub const RESUME_FIELD: &str = "file";

impl ApiClient {
    /// POST /users/
    pub async fn create_user(&self, body: &UserCreate) -> Result<User, ApiError> {
        Self::send_json(self.request(Method::POST, "/users/").json(body)).await
    }

    /// POST /users/signup
    pub async fn register_user(&self, body: &UserRegister) -> Result<User, ApiError> {
        Self::send_json(self.request(Method::POST, "/users/signup").json(body)).await
    }

    /// GET /users/me
    pub async fn read_user_me(&self) -> Result<User, ApiError> {
        Self::send_json(self.request(Method::GET, "/users/me")).await
    }

    /// PATCH /users/me
    pub async fn update_user_me(&self, body: &UserUpdateMe) -> Result<User, ApiError> {
        Self::send_json(self.request(Method::PATCH, "/users/me").json(body)).await
    }

    /// PATCH /users/me/password
    pub async fn update_password_me(&self, body: &UpdatePassword) -> Result<Message, ApiError> {
        Self::send_json(self.request(Method::PATCH, "/users/me/password").json(body)).await
    }

    /// DELETE /users/{user_id}
    pub async fn delete_user(&self, user_id: i64) -> Result<Message, ApiError> {
        Self::send_json(self.request(Method::DELETE, &format!("/users/{user_id}"))).await
    }

    /// PATCH /users/me/upload-resume
    ///
    /// Sends the PDF as multipart field `file`.
    pub async fn upload_resume(&self, file_name: &str, pdf: Bytes) -> Result<Message, ApiError> {
        let part = Part::bytes(pdf.to_vec())
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new().part(RESUME_FIELD, part);

        Self::send_json(
            self.request(Method::PATCH, "/users/me/upload-resume")
                .multipart(form),
        )
        .await
    }

    /// PATCH /users/me/parse-resume
    ///
    /// Asks the backend to extract structured profile data from the uploaded résumé.
    pub async fn parse_resume(&self, parameters: &ModelParameters) -> Result<Message, ApiError> {
        Self::send_json(
            self.request(Method::PATCH, "/users/me/parse-resume")
                .json(parameters),
        )
        .await
    }
}
