//! Scalar leaf types of the applicant document.

use serde::{Deserialize, Serialize};

/// Primitive type of one leaf node a question writes (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    String,
    Int,
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarType::String => write!(f, "string"),
            ScalarType::Int => write!(f, "int"),
        }
    }
}
