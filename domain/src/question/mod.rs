//! Question aggregate: administrator-defined form questions and the scalar
//! paths they own in the applicant document.

pub mod entities;
pub mod localized;
pub mod scalars;
