pub mod comparison;
pub mod job_posting;
pub mod llm;
pub mod user;

use serde::{Deserialize, Serialize};

pub use comparison::{
    Comparison, ComparisonDetail, ComparisonLookup, ComparisonQuery, Comparisons,
    CoverLetterParagraph, WorkExperience,
};
pub use job_posting::{JobPosting, JobPostingQuery, JobPostings};
pub use llm::{ModelName, ModelParameters};
pub use user::{
    LoginForm, NewPassword, Token, UpdatePassword, User, UserCreate, UserRegister, UserUpdateMe,
};

/// Generic acknowledgement body returned by most mutating endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}
