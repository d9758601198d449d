use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A scraped job posting. Read-only to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: i64,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub seniority_level: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub remote_modality: Option<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub industries: Option<Vec<String>>,
    #[serde(default)]
    pub job_functions: Option<Vec<String>>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub job_salary_min: Option<f64>,
    #[serde(default)]
    pub job_salary_max: Option<f64>,
    #[serde(default)]
    pub job_poster_name: Option<String>,
    #[serde(default)]
    pub job_poster_profile: Option<String>,
    #[serde(default)]
    pub summary: Option<Value>,
    #[serde(default)]
    pub institution_about: Option<String>,
    #[serde(default)]
    pub institution_website: Option<String>,
    #[serde(default)]
    pub institution_industry: Option<String>,
    #[serde(default)]
    pub institution_size: Option<String>,
    #[serde(default)]
    pub institution_followers: Option<i64>,
    #[serde(default)]
    pub institution_employees: Option<i64>,
    #[serde(default)]
    pub institution_tagline: Option<String>,
    #[serde(default)]
    pub institution_location: Option<String>,
    #[serde(default)]
    pub institution_specialties: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPostings {
    pub data: Vec<JobPosting>,
}

/// Query parameters for `GET /job-postings`. Empty filters are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobPostingQuery {
    pub skip: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl JobPostingQuery {
    /// Query for a 1-based page of `limit` items.
    pub fn page(page: u32, limit: u32, job_title: &str, company_name: &str) -> Self {
        Self {
            skip: limit.saturating_mul(page.saturating_sub(1)),
            limit,
            job_title: non_empty(job_title),
            company_name: non_empty(company_name),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
