//! Question definition entity

use crate::applicant::path::Path;
use crate::question::localized::LocalizedText;
use crate::question::scalars::ScalarType;
use serde::{Deserialize, Serialize};

/// Kind of form question, determining which scalar leaves it owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Address,
    Name,
    Number,
    Text,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::Address => write!(f, "address"),
            QuestionType::Name => write!(f, "name"),
            QuestionType::Number => write!(f, "number"),
            QuestionType::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "address" => Ok(QuestionType::Address),
            "name" => Ok(QuestionType::Name),
            "number" => Ok(QuestionType::Number),
            "text" => Ok(QuestionType::Text),
            other => Err(format!("unknown question type '{}'", other)),
        }
    }
}

/// An administrator-defined form question (Entity)
///
/// Each question owns the subtree of the applicant document rooted at its
/// `path`; the concrete leaves depend on the question type (see
/// [`QuestionDefinition::scalar_paths`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    id: Option<i64>,
    version: i64,
    name: String,
    path: Path,
    description: String,
    question_text: LocalizedText,
    question_help_text: LocalizedText,
    question_type: QuestionType,
}

impl QuestionDefinition {
    pub fn new(
        name: impl Into<String>,
        path: Path,
        description: impl Into<String>,
        question_text: LocalizedText,
        question_help_text: LocalizedText,
        question_type: QuestionType,
    ) -> Self {
        Self {
            id: None,
            version: 1,
            name: name.into(),
            path,
            description: description.into(),
            question_text,
            question_help_text,
            question_type,
        }
    }

    /// Attach a persisted id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn question_text(&self) -> &LocalizedText {
        &self.question_text
    }

    pub fn question_help_text(&self) -> &LocalizedText {
        &self.question_help_text
    }

    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    /// The leaf paths this question writes, with their scalar types.
    ///
    /// Single-leaf types (text, number) write at the question path itself;
    /// compound types fan out below it.
    pub fn scalar_paths(&self) -> Vec<(Path, ScalarType)> {
        match self.question_type {
            QuestionType::Text => vec![(self.path.clone(), ScalarType::String)],
            QuestionType::Number => vec![(self.path.clone(), ScalarType::Int)],
            QuestionType::Name => ["first", "middle", "last"]
                .iter()
                .map(|leaf| (self.path.join(leaf), ScalarType::String))
                .collect(),
            QuestionType::Address => ["street", "city", "state", "zip"]
                .iter()
                .map(|leaf| (self.path.join(leaf), ScalarType::String))
                .collect(),
        }
    }

    /// True when `path` is one of this question's scalar leaves.
    pub fn owns_scalar(&self, path: &Path) -> bool {
        self.scalar_paths().iter().any(|(p, _)| p == path)
    }
}
