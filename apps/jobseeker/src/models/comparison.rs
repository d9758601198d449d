use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ApiError;

/// A user's pairing with one job posting, as listed by `/comparisons/current_user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub id: i64,
    pub user_id: i64,
    pub job_posting_id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Opaque requirements/qualifications comparison produced by the backend.
    #[serde(default)]
    pub comparison: Option<Value>,
    /// Built résumé, base64-encoded PDF. Stale once its work experiences change.
    #[serde(default)]
    pub resume: Option<String>,
    /// Built cover letter, base64-encoded PDF. Stale once its paragraphs change.
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparisons {
    pub data: Vec<Comparison>,
}

/// Full comparison with its generated entries, as returned by `GET /comparisons/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonDetail {
    #[serde(flatten)]
    pub comparison: Comparison,
    #[serde(default)]
    pub work_experiences: Vec<WorkExperience>,
    #[serde(default)]
    pub cover_letter_paragraphs: Vec<CoverLetterParagraph>,
}

impl ComparisonDetail {
    pub fn id(&self) -> i64 {
        self.comparison.id
    }

    pub fn is_active(&self) -> bool {
        self.comparison.is_active
    }
}

/// One generated work-experience entry of a comparison's résumé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub id: i64,
    pub comparison_id: i64,
    pub title: String,
    pub company: String,
    pub start_year: Option<i32>,
    #[serde(default)]
    pub start_month: Option<u32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub end_month: Option<u32>,
    #[serde(default)]
    pub accomplishments: Vec<String>,
}

/// One generated paragraph of a comparison's cover letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverLetterParagraph {
    pub id: i64,
    pub comparison_id: i64,
    pub paragraph_number: i32,
    pub paragraph_text: String,
}

/// Query for `GET /comparisons/`. Unset ids are omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_posting_id: Option<i64>,
}

impl ComparisonQuery {
    pub fn by_id(comparison_id: i64) -> Self {
        Self {
            comparison_id: Some(comparison_id),
            job_posting_id: None,
        }
    }

    pub fn by_job_posting(job_posting_id: i64) -> Self {
        Self {
            comparison_id: None,
            job_posting_id: Some(job_posting_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.comparison_id.is_none() && self.job_posting_id.is_none()
    }
}

/// Outcome of looking up a comparison. A missing comparison is a normal state.
#[derive(Debug)]
pub enum ComparisonLookup {
    Found(Box<ComparisonDetail>),
    NotFound,
    Error(ApiError),
}

impl ComparisonLookup {
    /// The comparison, or `None` for both "not found" and failed lookups.
    pub fn into_found(self) -> Option<ComparisonDetail> {
        match self {
            ComparisonLookup::Found(detail) => Some(*detail),
            ComparisonLookup::NotFound | ComparisonLookup::Error(_) => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ComparisonLookup::Found(detail) if detail.is_active())
    }
}
