pub mod admin;
pub mod dashboard;

pub use admin::{AdminListing, MemberRow};
pub use dashboard::Dashboard;
