use std::fmt;

use crate::models::JobPosting;

const NOT_SPECIFIED: &str = "Not specified";

/// Labelled rendering of one job posting.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDetailsView {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: Vec<String>,
    pub fields: Vec<(&'static str, String)>,
}

fn or_unspecified<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

impl From<&JobPosting> for JobDetailsView {
    fn from(job: &JobPosting) -> Self {
        let fields = vec![
            ("Seniority Level", or_unspecified(job.seniority_level.as_ref())),
            ("Employment Type", or_unspecified(job.employment_type.as_ref())),
            ("Experience Level", or_unspecified(job.experience_level.as_ref())),
            ("Remote Modality", or_unspecified(job.remote_modality.as_ref())),
            ("Salary Range", or_unspecified(job.salary_range.as_ref())),
            ("About the Company", or_unspecified(job.institution_about.as_ref())),
            ("Website", or_unspecified(job.institution_website.as_ref())),
            ("Industry", or_unspecified(job.institution_industry.as_ref())),
            ("Company Size", or_unspecified(job.institution_size.as_ref())),
            ("Followers", or_unspecified(job.institution_followers)),
            ("Employees", or_unspecified(job.institution_employees)),
            ("Tagline", or_unspecified(job.institution_tagline.as_ref())),
            ("Location", or_unspecified(job.institution_location.as_ref())),
            (
                "Specialties",
                or_unspecified(job.institution_specialties.as_ref().map(|s| s.join(", "))),
            ),
        ];

        Self {
            title: job.title.clone(),
            company: job.company.clone(),
            location: job
                .location
                .clone()
                .unwrap_or_else(|| "Location not specified".to_string()),
            description: job.description.split('\n').map(str::to_string).collect(),
            fields,
        }
    }
}

impl fmt::Display for JobDetailsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.company)?;
        writeln!(f, "{}", self.location)?;
        writeln!(f)?;
        for line in &self.description {
            writeln!(f, "{line}")?;
        }
        for (label, value) in &self.fields {
            writeln!(f)?;
            writeln!(f, "{label}:")?;
            writeln!(f, "{value}")?;
        }
        Ok(())
    }
}
