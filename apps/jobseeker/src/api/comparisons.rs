use reqwest::Method;
use tracing::warn;

use super::ApiClient;
use crate::errors::ApiError;
use crate::models::{
    ComparisonDetail, ComparisonLookup, ComparisonQuery, Comparisons, CoverLetterParagraph,
    Message, ModelParameters, WorkExperience,
};

impl ApiClient {
    /// GET /comparisons/?comparison_id=&job_posting_id=
    ///
    /// Returns `ApiError::NotFound` when the user has no such comparison.
    pub async fn get_comparison(&self, query: &ComparisonQuery) -> Result<ComparisonDetail, ApiError> {
        Self::send_json(self.request(Method::GET, "/comparisons/").query(query)).await
    }

    /// Like [`get_comparison`](Self::get_comparison), but folds a 404 into
    /// `ComparisonLookup::NotFound`.
    pub async fn lookup_comparison(&self, query: &ComparisonQuery) -> ComparisonLookup {
        if query.is_empty() {
            warn!("Comparison lookup needs a comparison_id or a job_posting_id");
            return ComparisonLookup::NotFound;
        }

        match self.get_comparison(query).await {
            Ok(detail) => ComparisonLookup::Found(Box::new(detail)),
            Err(e) if e.is_not_found() => ComparisonLookup::NotFound,
            Err(e) => ComparisonLookup::Error(e),
        }
    }

    /// GET /comparisons/current_user
    pub async fn get_user_comparisons(&self) -> Result<Comparisons, ApiError> {
        Self::send_json(self.request(Method::GET, "/comparisons/current_user")).await
    }

    /// PATCH /comparisons/create-activate?job_posting_id=
    ///
    /// Creates the comparison, or re-activates an existing inactive one.
    pub async fn activate_comparison(&self, job_posting_id: i64) -> Result<Message, ApiError> {
        Self::send_json(
            self.request(Method::PATCH, "/comparisons/create-activate")
                .query(&[("job_posting_id", job_posting_id)]),
        )
        .await
    }

    /// PATCH /comparisons/deactivate?job_posting_id=
    pub async fn deactivate_comparison(&self, job_posting_id: i64) -> Result<Message, ApiError> {
        Self::send_json(
            self.request(Method::PATCH, "/comparisons/deactivate")
                .query(&[("job_posting_id", job_posting_id)]),
        )
        .await
    }

    /// POST /comparisons/generate-work-experiences?comparison_id=
    pub async fn generate_work_experiences(
        &self,
        comparison_id: i64,
        parameters: &ModelParameters,
    ) -> Result<Message, ApiError> {
        Self::send_json(
            self.request(Method::POST, "/comparisons/generate-work-experiences")
                .query(&[("comparison_id", comparison_id)])
                .json(parameters),
        )
        .await
    }

    /// POST /comparisons/generate-cover-letter-paragraphs?comparison_id=
    pub async fn generate_cover_letter_paragraphs(
        &self,
        comparison_id: i64,
        parameters: &ModelParameters,
    ) -> Result<Message, ApiError> {
        Self::send_json(
            self.request(Method::POST, "/comparisons/generate-cover-letter-paragraphs")
                .query(&[("comparison_id", comparison_id)])
                .json(parameters),
        )
        .await
    }

    /// PATCH /comparisons/build-resume?comparison_id=
    pub async fn build_resume(&self, comparison_id: i64) -> Result<Message, ApiError> {
        Self::send_json(
            self.request(Method::PATCH, "/comparisons/build-resume")
                .query(&[("comparison_id", comparison_id)]),
        )
        .await
    }

    /// PATCH /comparisons/build-cover-letter?comparison_id=
    pub async fn build_cover_letter(&self, comparison_id: i64) -> Result<Message, ApiError> {
        Self::send_json(
            self.request(Method::PATCH, "/comparisons/build-cover-letter")
                .query(&[("comparison_id", comparison_id)]),
        )
        .await
    }

    /// POST /comparisons/edit-work-experience
    pub async fn edit_work_experience(&self, experience: &WorkExperience) -> Result<Message, ApiError> {
        Self::send_json(
            self.request(Method::POST, "/comparisons/edit-work-experience")
                .json(experience),
        )
        .await
    }

    /// POST /comparisons/edit-cover-letter-paragraph
    pub async fn edit_cover_letter_paragraph(
        &self,
        paragraph: &CoverLetterParagraph,
    ) -> Result<Message, ApiError> {
        Self::send_json(
            self.request(Method::POST, "/comparisons/edit-cover-letter-paragraph")
                .json(paragraph),
        )
        .await
    }
}
