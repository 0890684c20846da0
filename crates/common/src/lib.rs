//! Shared types for the swing AI service.

pub mod schema;
pub mod types;

pub use schema::{FieldError, FieldSpec, Loc, RequestSchema};
pub use types::{AnalysisRequest, GoalId, SwingId};
