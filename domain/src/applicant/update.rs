//! Staged form updates

use crate::applicant::path::Path;
use serde::{Deserialize, Serialize};

/// One staged answer: a target path and the raw value the applicant entered
/// (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Update {
    path: Path,
    value: String,
}

impl Update {
    pub fn new(path: Path, value: impl Into<String>) -> Self {
        Self {
            path,
            value: value.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}
