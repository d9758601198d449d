//! Paginated, filterable job-posting browser and the job detail view.

pub mod browser;
pub mod details;
pub mod pagination;

pub use browser::{JobPostingBrowser, ASSUMED_PAGE_COUNT, PAGE_SIZE};
pub use details::JobDetailsView;
pub use pagination::Pagination;
