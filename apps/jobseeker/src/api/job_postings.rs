use reqwest::Method;

use super::ApiClient;
use crate::errors::ApiError;
use crate::models::{JobPostingQuery, JobPostings};

impl ApiClient {
    /// GET /job-postings?skip=&limit=&job_title=&company_name=
    pub async fn get_job_postings(&self, query: &JobPostingQuery) -> Result<JobPostings, ApiError> {
        Self::send_json(self.request(Method::GET, "/job-postings").query(query)).await
    }
}
