//! Offline generator that answers from the personality's canned chat lines.

use async_trait::async_trait;
use npc_roster::{NpcDirectory, NpcTriggerType};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{
    EducationalValue, GenerationError, NpcMessageContext, NpcMessageGenerator, NpcResponse,
    ResponseTone,
};

/// Rotates through each personality's pre-written lines.
pub struct CannedMessageGenerator {
    directory: Arc<NpcDirectory>,
    cursor: AtomicUsize,
}

impl CannedMessageGenerator {
    pub fn new(directory: Arc<NpcDirectory>) -> Self {
        Self {
            directory,
            cursor: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl NpcMessageGenerator for CannedMessageGenerator {
    async fn generate(
        &self,
        context: NpcMessageContext,
    ) -> Result<Option<NpcResponse>, GenerationError> {
        let Some(personality) = self.directory.get(&context.npc_id) else {
            return Ok(None);
        };

        let lines = personality.chat_messages.lines_for(context.trigger_type);
        if lines.is_empty() {
            return Ok(None);
        }

        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % lines.len();
        let (tone, educational_value) = match context.trigger_type {
            NpcTriggerType::OnHelpRequest => (ResponseTone::Informative, EducationalValue::High),
            NpcTriggerType::OnEncouragementNeeded => {
                (ResponseTone::Encouraging, EducationalValue::Low)
            }
            NpcTriggerType::OnIncorrectAnswer => (ResponseTone::Encouraging, EducationalValue::Medium),
            NpcTriggerType::OnCorrectAnswer
            | NpcTriggerType::OnGameStart
            | NpcTriggerType::OnGameEnd => (ResponseTone::Friendly, EducationalValue::Low),
        };

        Ok(Some(NpcResponse {
            message: lines[index].clone(),
            tone,
            educational_value,
            personality_traits: personality.specialties.clone(),
        }))
    }
}
