//! Comparison workspace: master-detail over the user's comparisons, the four
//! generate/build actions, and the per-item editors.

pub mod editor;
pub mod work_experience;
pub mod workspace;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use editor::ListEditor;
pub use workspace::{Action, ComparisonWorkspace};

/// Whether a generate action also rebuilds the matching PDF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildPolicy {
    /// Generate and build are triggered separately.
    #[default]
    Independent,
    /// Generating (or saving an edit) rebuilds the affected PDF before the refresh.
    Chained,
}

#[derive(Debug, Error)]
#[error("unknown build policy '{0}'")]
pub struct UnknownBuildPolicy(String);

impl FromStr for BuildPolicy {
    type Err = UnknownBuildPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "independent" => Ok(BuildPolicy::Independent),
            "chained" => Ok(BuildPolicy::Chained),
            other => Err(UnknownBuildPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for BuildPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildPolicy::Independent => write!(f, "independent"),
            BuildPolicy::Chained => write!(f, "chained"),
        }
    }
}
