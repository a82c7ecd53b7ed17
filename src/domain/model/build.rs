use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a CI run.
///
/// Runs that are still executing have no conclusion yet and count as pending,
/// as do conclusions other than success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    Success,
    Failure,
    #[default]
    Pending,
}

impl BuildStatus {
    pub fn from_conclusion(conclusion: Option<&str>) -> Self {
        match conclusion {
            Some("success") => BuildStatus::Success,
            Some("failure") => BuildStatus::Failure,
            _ => BuildStatus::Pending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BuildStatus::Success => "build succeeded",
            BuildStatus::Failure => "build failed",
            BuildStatus::Pending => "in progress",
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStatus::Success => write!(f, "success"),
            BuildStatus::Failure => write!(f, "failure"),
            BuildStatus::Pending => write!(f, "pending"),
        }
    }
}

/// A CI run as reported by the hosting API, before any filtering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WorkflowRun {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    pub run_number: u64,
    #[serde(default)]
    pub head_branch: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
}

/// A recent CI build of a plugin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Build {
    pub id: u64,
    pub name: String,
    pub number: u64,
    pub branch: String,
    #[serde(default)]
    pub created_at: Option<String>,
    pub status: BuildStatus,
    /// Run page on the hosting site
    pub url: String,
}
