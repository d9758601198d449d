use reqwest::Method;

use super::ApiClient;
use crate::errors::ApiError;
use crate::models::ModelName;

impl ApiClient {
    /// GET /model-names
    pub async fn get_model_names(&self) -> Result<Vec<ModelName>, ApiError> {
        Self::send_json(self.request(Method::GET, "/model-names")).await
    }
}
