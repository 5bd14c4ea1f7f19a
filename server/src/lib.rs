//! Presentation layer for uniapp
//!
//! A REST API over the application services: applicant form flow for end
//! users, program/question management for administrators. JSON in, JSON
//! out; errors map to conventional status codes.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export commonly used types
pub use error::ApiError;
pub use router::build_router;
pub use server::serve;
pub use state::AppState;
