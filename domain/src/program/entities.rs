//! Program, block, and program-question entities

use crate::applicant::path::Path;
use crate::question::entities::QuestionDefinition;
use crate::question::scalars::ScalarType;
use serde::{Deserialize, Serialize};

/// A question as attached to a program block (Value Object)
///
/// Wraps the full [`QuestionDefinition`] so a program snapshot stays stable
/// even as the question bank evolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramQuestionDefinition {
    question: QuestionDefinition,
}

impl ProgramQuestionDefinition {
    pub fn new(question: QuestionDefinition) -> Self {
        Self { question }
    }

    pub fn question(&self) -> &QuestionDefinition {
        &self.question
    }
}

/// One step of a multi-step application form (Entity)
///
/// Block ids are 1-based and unique within their program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDefinition {
    id: i64,
    name: String,
    description: String,
    program_question_definitions: Vec<ProgramQuestionDefinition>,
}

impl BlockDefinition {
    pub fn new(id: i64, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            program_question_definitions: Vec::new(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn program_question_definitions(&self) -> &[ProgramQuestionDefinition] {
        &self.program_question_definitions
    }

    /// Replace this block's question list.
    pub fn set_program_question_definitions(
        &mut self,
        questions: Vec<ProgramQuestionDefinition>,
    ) {
        self.program_question_definitions = questions;
    }

    /// All scalar leaves the questions of this block write.
    pub fn scalar_paths(&self) -> Vec<(Path, ScalarType)> {
        self.program_question_definitions
            .iter()
            .flat_map(|pqd| pqd.question().scalar_paths())
            .collect()
    }

    /// True when `path` is a scalar leaf of one of this block's questions.
    pub fn owns_scalar(&self, path: &Path) -> bool {
        self.program_question_definitions
            .iter()
            .any(|pqd| pqd.question().owns_scalar(path))
    }
}

/// An administrator-defined benefits program and its form structure (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDefinition {
    id: Option<i64>,
    name: String,
    description: String,
    block_definitions: Vec<BlockDefinition>,
}

impl ProgramDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            block_definitions: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn block_definitions(&self) -> &[BlockDefinition] {
        &self.block_definitions
    }

    /// Look up a block by its program-scoped id.
    pub fn block(&self, block_id: i64) -> Option<&BlockDefinition> {
        self.block_definitions.iter().find(|b| b.id() == block_id)
    }

    pub fn block_mut(&mut self, block_id: i64) -> Option<&mut BlockDefinition> {
        self.block_definitions
            .iter_mut()
            .find(|b| b.id() == block_id)
    }

    /// The id the next added block will get.
    pub fn next_block_id(&self) -> i64 {
        self.block_definitions
            .iter()
            .map(BlockDefinition::id)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Replace the whole block list (used when rehydrating from storage).
    pub fn set_block_definitions(&mut self, blocks: Vec<BlockDefinition>) {
        self.block_definitions = blocks;
    }

    /// Append an empty block and return its id.
    pub fn add_block(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> i64 {
        let id = self.next_block_id();
        self.block_definitions
            .push(BlockDefinition::new(id, name, description));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::entities::QuestionType;
    use crate::question::localized::LocalizedText;

    fn text_question(name: &str, path: &str) -> QuestionDefinition {
        QuestionDefinition::new(
            name,
            Path::new(path),
            "",
            LocalizedText::of("question?"),
            LocalizedText::of("help text"),
            QuestionType::Text,
        )
    }

    #[test]
    fn test_block_ids_are_sequential() {
        let mut program = ProgramDefinition::new("test program", "desc");
        assert_eq!(program.next_block_id(), 1);
        program.add_block("first block", "");
        program.add_block("second block", "");
        let ids: Vec<i64> = program.block_definitions().iter().map(|b| b.id()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_block_lookup() {
        let mut program = ProgramDefinition::new("test program", "desc");
        program.add_block("only block", "block description");
        assert_eq!(program.block(1).map(|b| b.name()), Some("only block"));
        assert!(program.block(2).is_none());
    }

    #[test]
    fn test_set_block_questions() {
        let mut program = ProgramDefinition::new("test program", "desc");
        program.add_block("step one", "");
        let question = text_question("favorite color", "applicant.favorite_color");
        program
            .block_mut(1)
            .unwrap()
            .set_program_question_definitions(vec![ProgramQuestionDefinition::new(question)]);

        let block = program.block(1).unwrap();
        assert_eq!(block.program_question_definitions().len(), 1);
        assert!(block.owns_scalar(&Path::new("applicant.favorite_color")));
        assert!(!block.owns_scalar(&Path::new("applicant.name")));
    }

    #[test]
    fn test_block_scalar_paths_flatten_questions() {
        let mut block = BlockDefinition::new(1, "step", "");
        block.set_program_question_definitions(vec![
            ProgramQuestionDefinition::new(text_question("color", "applicant.color")),
            ProgramQuestionDefinition::new(text_question("pet", "applicant.pet")),
        ]);
        assert_eq!(block.scalar_paths().len(), 2);
    }

    #[test]
    fn test_program_serde_round_trip() {
        let mut program = ProgramDefinition::new("food assistance", "monthly benefit").with_id(7);
        program.add_block("about you", "name and address");
        let json = serde_json::to_string(&program).unwrap();
        let back: ProgramDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, program);
    }
}
