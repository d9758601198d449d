pub mod api;
pub mod cache;
pub mod comparisons;
pub mod config;
pub mod display;
pub mod errors;
pub mod job_postings;
pub mod model_selector;
pub mod models;
pub mod notify;
pub mod pages;
pub mod profile;
pub mod session;
