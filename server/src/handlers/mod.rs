//! Route handlers, grouped by resource.

pub mod applicants;
pub mod health;
pub mod programs;
pub mod questions;
