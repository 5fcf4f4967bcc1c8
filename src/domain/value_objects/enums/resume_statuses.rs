use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Conventional resume tags. The column itself is free-form text; any
/// client-supplied value is stored as-is.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum ResumeStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl Display for ResumeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            ResumeStatus::Draft => "draft",
            ResumeStatus::Published => "published",
            ResumeStatus::Archived => "archived",
        };
        write!(f, "{}", status)
    }
}
