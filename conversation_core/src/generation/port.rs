//! The message generator port and its response type.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::NpcMessageContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseTone {
    Friendly,
    Encouraging,
    Informative,
    Diplomatic,
    Playful,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationalValue {
    Low,
    Medium,
    High,
}

/// What the generator produced for one NPC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpcResponse {
    pub message: String,
    pub tone: ResponseTone,
    pub educational_value: EducationalValue,
    pub personality_traits: Vec<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    #[error("Generation request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid generator response: {0}")]
    InvalidResponse(String),
}

/// Produces the chat message an NPC sends for a given context.
///
/// `Ok(None)` means the generator chose not to (or could not) speak for this NPC.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NpcMessageGenerator: Send + Sync {
    async fn generate(
        &self,
        context: NpcMessageContext,
    ) -> Result<Option<NpcResponse>, GenerationError>;
}
