use tracing::{debug, error};

use super::pagination::Pagination;
use crate::api::ApiClient;
use crate::models::{ComparisonDetail, ComparisonLookup, ComparisonQuery, JobPosting, JobPostingQuery};
use crate::notify::{Toaster, SHORT_TOAST_MS};

pub const PAGE_SIZE: u32 = 25;
/// The listing endpoint returns no total; the page count assumes this many pages.
pub const ASSUMED_PAGE_COUNT: u32 = 10;

/// Job postings page: filters, current page, selected job and its comparison status.
pub struct JobPostingBrowser {
    api: ApiClient,
    toaster: Toaster,
    page: u32,
    job_title: String,
    company_name: String,
    postings: Vec<JobPosting>,
    selected: Option<JobPosting>,
    comparison: Option<ComparisonDetail>,
}

impl JobPostingBrowser {
    pub fn new(api: ApiClient, toaster: Toaster) -> Self {
        Self {
            api,
            toaster,
            page: 1,
            job_title: String::new(),
            company_name: String::new(),
            postings: Vec::new(),
            selected: None,
            comparison: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            current_page: self.page,
            total_items: PAGE_SIZE * ASSUMED_PAGE_COUNT,
            items_per_page: PAGE_SIZE,
        }
    }

    pub fn query(&self) -> JobPostingQuery {
        JobPostingQuery::page(self.page, PAGE_SIZE, &self.job_title, &self.company_name)
    }

    /// Fetches the current page. On failure the previous page stays displayed.
    pub async fn fetch(&mut self) -> bool {
        let query = self.query();
        debug!(?query, "Fetching job postings");
        match self.api.get_job_postings(&query).await {
            Ok(postings) => {
                self.postings = postings.data;
                true
            }
            Err(e) => {
                error!("Error fetching job postings: {e}");
                self.toaster
                    .error("Error", "Failed to fetch job postings", SHORT_TOAST_MS);
                false
            }
        }
    }

    pub async fn set_job_title(&mut self, job_title: &str) -> bool {
        self.job_title = job_title.to_string();
        self.search().await
    }

    pub async fn set_company_name(&mut self, company_name: &str) -> bool {
        self.company_name = company_name.to_string();
        self.search().await
    }

    /// Sets both filters at once and searches.
    pub async fn apply_filters(&mut self, job_title: &str, company_name: &str) -> bool {
        self.job_title = job_title.to_string();
        self.company_name = company_name.to_string();
        self.search().await
    }

    /// Back to page 1 with the current filters.
    pub async fn search(&mut self) -> bool {
        self.page = 1;
        self.fetch().await
    }

    /// Moves to `page` if it is within the page range.
    pub async fn go_to_page(&mut self, page: u32) -> bool {
        if page == 0 || page > self.pagination().total_pages() {
            return false;
        }
        self.page = page;
        self.fetch().await
    }

    pub async fn next_page(&mut self) -> bool {
        match self.pagination().next() {
            Some(page) => self.go_to_page(page).await,
            None => false,
        }
    }

    pub async fn previous_page(&mut self) -> bool {
        match self.pagination().previous() {
            Some(page) => self.go_to_page(page).await,
            None => false,
        }
    }

    pub fn selected(&self) -> Option<&JobPosting> {
        self.selected.as_ref()
    }

    /// The selected job's comparison, `None` when there is none yet.
    pub fn comparison(&self) -> Option<&ComparisonDetail> {
        self.comparison.as_ref()
    }

    /// Selects a job from the current page and looks up its comparison.
    /// Returns `false` if the job is not on the page.
    pub async fn select_job(&mut self, job_posting_id: i64) -> bool {
        let Some(job) = self.postings.iter().find(|j| j.id == job_posting_id).cloned() else {
            return false;
        };
        self.selected = Some(job);
        self.comparison = None;
        self.load_comparison(job_posting_id).await;
        true
    }

    async fn load_comparison(&mut self, job_posting_id: i64) {
        let query = ComparisonQuery::by_job_posting(job_posting_id);
        self.comparison = match self.api.lookup_comparison(&query).await {
            ComparisonLookup::Found(detail) => Some(*detail),
            ComparisonLookup::NotFound => None,
            ComparisonLookup::Error(e) => {
                error!("Unexpected error fetching comparison status: {e}");
                self.toaster
                    .error("Error", "Failed to fetch comparison status", SHORT_TOAST_MS);
                None
            }
        };
    }

    /// Activation is offered unless the selected job already has an active comparison.
    pub fn can_activate(&self) -> bool {
        self.selected.is_some() && !self.comparison.as_ref().is_some_and(|c| c.is_active())
    }

    pub fn activation_label(&self) -> &'static str {
        if self.comparison.as_ref().is_some_and(|c| c.is_active()) {
            "Comparison already active"
        } else {
            "Activate this job for comparison"
        }
    }

    /// Creates or re-activates the comparison for the selected job, then reloads its status.
    pub async fn activate_selected(&mut self) -> bool {
        if !self.can_activate() {
            return false;
        }
        let Some(job_posting_id) = self.selected.as_ref().map(|j| j.id) else {
            return false;
        };

        match self.api.activate_comparison(job_posting_id).await {
            Ok(response) => {
                self.toaster
                    .success("Comparison Activated", &response.message, SHORT_TOAST_MS);
                self.load_comparison(job_posting_id).await;
                true
            }
            Err(e) => {
                error!("Error activating comparison: {e}");
                self.toaster
                    .error("Error", "Failed to activate comparison", SHORT_TOAST_MS);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let browser = JobPostingBrowser::new(ApiClient::new("http://localhost:8000").unwrap(), Toaster::new());
        assert_eq!(browser.page(), 1);
        assert_eq!(browser.pagination().total_pages(), ASSUMED_PAGE_COUNT);
        assert!(!browser.can_activate());
        assert_eq!(browser.activation_label(), "Activate this job for comparison");
        assert_eq!(browser.query().skip, 0);
        assert_eq!(browser.query().limit, 25);
    }
}
