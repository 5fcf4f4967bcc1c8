use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Countable actions gated by a package limit, one counter each per
/// subject and calendar month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UsageResource {
    ResumesCreated,
    RevisionsUsed,
    JobsViewed,
}

impl Display for UsageResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let resource = match self {
            UsageResource::ResumesCreated => "resumes_created",
            UsageResource::RevisionsUsed => "revisions_used",
            UsageResource::JobsViewed => "jobs_viewed",
        };
        write!(f, "{}", resource)
    }
}

impl UsageResource {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "resumes_created" => Some(UsageResource::ResumesCreated),
            "revisions_used" => Some(UsageResource::RevisionsUsed),
            "jobs_viewed" => Some(UsageResource::JobsViewed),
            _ => None,
        }
    }

    pub fn all() -> [UsageResource; 3] {
        [
            UsageResource::ResumesCreated,
            UsageResource::RevisionsUsed,
            UsageResource::JobsViewed,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_from_str_agree() {
        for resource in UsageResource::all() {
            assert_eq!(
                UsageResource::from_str(&resource.to_string()),
                Some(resource)
            );
        }
        assert_eq!(UsageResource::from_str("downloads"), None);
    }
}
