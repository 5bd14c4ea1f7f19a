//! Program aggregate: administrator-defined application forms, structured as
//! ordered blocks of questions.

pub mod entities;
