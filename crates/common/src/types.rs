use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema::{FieldSpec, RequestSchema};

/// Identifier of a recorded swing.
///
/// Opaque to this service: any JSON string is accepted, including the
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwingId(String);

impl SwingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SwingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SwingId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Identifier of the goal a swing is analysed against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(String);

impl GoalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GoalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GoalId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Body of `POST /v1/analysis`.
///
/// Lives only for the duration of a single request. Unknown fields are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisRequest {
    #[schema(value_type = String, example = "abc123")]
    pub swing_id: SwingId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "g1")]
    pub goal_id: Option<GoalId>,
}

impl AnalysisRequest {
    pub fn new(swing_id: SwingId) -> Self {
        Self {
            swing_id,
            goal_id: None,
        }
    }

    pub fn with_goal(mut self, goal_id: GoalId) -> Self {
        self.goal_id = Some(goal_id);
        self
    }
}

impl RequestSchema for AnalysisRequest {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required_string("swing_id"),
        FieldSpec::optional_string("goal_id"),
    ];
}
