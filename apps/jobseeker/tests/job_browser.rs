mod common;

use common::MockBackend;
use jobseeker::job_postings::{JobDetailsView, JobPostingBrowser, PAGE_SIZE};
use jobseeker::notify::Toaster;

fn last_listing_query(backend: &MockBackend) -> std::collections::HashMap<String, String> {
    backend
        .requests_to("/job-postings")
        .pop()
        .expect("no listing request")
        .query
}

#[tokio::test]
async fn test_filter_change_resets_page() {
    let backend = MockBackend::start().await;
    let mut browser = JobPostingBrowser::new(backend.client(), Toaster::new());

    assert!(browser.fetch().await);
    assert_eq!(browser.postings().len(), PAGE_SIZE as usize);
    assert!(browser.go_to_page(3).await);
    assert_eq!(last_listing_query(&backend)["skip"], "50");

    assert!(browser.set_job_title("data").await);
    assert_eq!(browser.page(), 1);
    let query = last_listing_query(&backend);
    assert_eq!(query["skip"], "0");
    assert_eq!(query["job_title"], "data");
    assert!(browser.postings().iter().all(|j| j.title.starts_with("Data Scientist")));

    browser.go_to_page(2).await;
    assert!(browser.set_company_name("acme").await);
    assert_eq!(browser.page(), 1);
    let query = last_listing_query(&backend);
    assert_eq!(query["skip"], "0");
    assert_eq!(query["company_name"], "acme");
    assert_eq!(query["job_title"], "data");
}

#[tokio::test]
async fn test_page_navigation_bounds() {
    let backend = MockBackend::start().await;
    let mut browser = JobPostingBrowser::new(backend.client(), Toaster::new());

    assert!(!browser.previous_page().await);
    assert!(!browser.go_to_page(0).await);
    assert!(!browser.go_to_page(11).await);
    assert!(backend.requests().is_empty());

    assert!(browser.next_page().await);
    assert_eq!(browser.page(), 2);
    assert_eq!(browser.pagination().label(), "Page 2 of 10");
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_page() {
    let backend = MockBackend::start().await;
    let toaster = Toaster::new();
    let mut browser = JobPostingBrowser::new(backend.client(), toaster.clone());
    browser.fetch().await;
    let before = browser.postings().to_vec();

    let mut anonymous = JobPostingBrowser::new(backend.anonymous_client(), toaster.clone());
    assert!(!anonymous.fetch().await);
    assert!(anonymous.postings().is_empty());
    assert!(toaster.has_errors());
    assert_eq!(browser.postings(), before.as_slice());
}

#[tokio::test]
async fn test_job_without_comparison_is_not_an_error() {
    let backend = MockBackend::start().await;
    let toaster = Toaster::new();
    let mut browser = JobPostingBrowser::new(backend.client(), toaster.clone());
    browser.fetch().await;

    assert!(browser.select_job(5).await);
    assert!(browser.comparison().is_none());
    assert!(toaster.pending().is_empty());
    assert!(browser.can_activate());
    assert_eq!(browser.activation_label(), "Activate this job for comparison");

    let view = JobDetailsView::from(browser.selected().unwrap());
    assert_eq!(view.title, "Backend Engineer 5");
    assert_eq!(view.location, "Berlin");
}

#[tokio::test]
async fn test_active_comparison_disables_activation() {
    let backend = MockBackend::start().await;
    let mut browser = JobPostingBrowser::new(backend.client(), Toaster::new());
    browser.fetch().await;

    assert!(browser.select_job(1).await);
    assert!(browser.comparison().unwrap().is_active());
    assert!(!browser.can_activate());
    assert_eq!(browser.activation_label(), "Comparison already active");

    assert!(!browser.activate_selected().await);
    assert!(backend.requests_to("/comparisons/create-activate").is_empty());
}

#[tokio::test]
async fn test_activation_creates_or_reactivates() {
    let backend = MockBackend::start().await;
    let toaster = Toaster::new();
    let mut browser = JobPostingBrowser::new(backend.client(), toaster.clone());
    browser.fetch().await;

    browser.select_job(2).await;
    assert!(!browser.comparison().unwrap().is_active());
    assert!(browser.activate_selected().await);
    assert!(browser.comparison().unwrap().is_active());
    assert_eq!(browser.activation_label(), "Comparison already active");

    browser.select_job(4).await;
    assert!(browser.comparison().is_none());
    assert!(browser.activate_selected().await);
    let created = browser.comparison().unwrap();
    assert_eq!(created.comparison.job_posting_id, 4);
    assert!(created.work_experiences.is_empty());

    let activations = backend.requests_to("/comparisons/create-activate");
    assert_eq!(activations.len(), 2);
    assert_eq!(activations[1].query["job_posting_id"], "4");
    assert!(!toaster.has_errors());
}

#[tokio::test]
async fn test_select_job_not_on_page() {
    let backend = MockBackend::start().await;
    let mut browser = JobPostingBrowser::new(backend.client(), Toaster::new());
    browser.fetch().await;
    assert!(!browser.select_job(40).await);
    assert!(browser.selected().is_none());
}
