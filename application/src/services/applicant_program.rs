//! Read-only view of one applicant's progress through one program.
//!
//! [`ReadOnlyApplicantProgramService`] pairs a snapshot of the applicant's
//! answer document with a program definition and answers the questions the
//! form flow needs: which blocks exist, what has been answered, and where
//! the applicant should resume.

use uniapp_domain::{ApplicantData, BlockDefinition, ProgramDefinition, QuestionDefinition};

/// Read-only pairing of applicant data and a program definition.
pub struct ReadOnlyApplicantProgramService {
    applicant_data: ApplicantData,
    program: ProgramDefinition,
}

impl ReadOnlyApplicantProgramService {
    pub fn new(applicant_data: ApplicantData, program: ProgramDefinition) -> Self {
        Self {
            applicant_data,
            program,
        }
    }

    pub fn program(&self) -> &ProgramDefinition {
        &self.program
    }

    pub fn applicant_data(&self) -> &ApplicantData {
        &self.applicant_data
    }

    /// All blocks of the program, in form order.
    pub fn block_list(&self) -> Vec<Block<'_>> {
        self.program
            .block_definitions()
            .iter()
            .map(|definition| Block {
                definition,
                data: &self.applicant_data,
            })
            .collect()
    }

    /// One block by its program-scoped id.
    pub fn block(&self, block_id: i64) -> Option<Block<'_>> {
        self.program.block(block_id).map(|definition| Block {
            definition,
            data: &self.applicant_data,
        })
    }

    /// The first block with an unanswered question — where a multi-step form
    /// resumes. `None` once the whole application is complete.
    pub fn first_incomplete_block(&self) -> Option<Block<'_>> {
        self.block_list().into_iter().find(|b| !b.is_complete())
    }
}

/// One form step, with answer state resolved against the applicant data.
pub struct Block<'a> {
    definition: &'a BlockDefinition,
    data: &'a ApplicantData,
}

impl<'a> Block<'a> {
    pub fn id(&self) -> i64 {
        self.definition.id()
    }

    pub fn name(&self) -> &'a str {
        self.definition.name()
    }

    pub fn description(&self) -> &'a str {
        self.definition.description()
    }

    pub fn definition(&self) -> &'a BlockDefinition {
        self.definition
    }

    /// The block's questions, each paired with the applicant's answers.
    pub fn questions(&self) -> Vec<ApplicantQuestion<'a>> {
        self.definition
            .program_question_definitions()
            .iter()
            .map(|pqd| ApplicantQuestion {
                definition: pqd.question(),
                data: self.data,
            })
            .collect()
    }

    /// True when every question in the block is answered.
    pub fn is_complete(&self) -> bool {
        self.questions().iter().all(|q| q.is_answered())
    }
}

/// A question joined with the applicant's current answers.
pub struct ApplicantQuestion<'a> {
    definition: &'a QuestionDefinition,
    data: &'a ApplicantData,
}

impl<'a> ApplicantQuestion<'a> {
    pub fn definition(&self) -> &'a QuestionDefinition {
        self.definition
    }

    /// True when every scalar leaf of the question has a value.
    pub fn is_answered(&self) -> bool {
        self.definition
            .scalar_paths()
            .iter()
            .all(|(path, _)| self.data.has_path(path))
    }
}
