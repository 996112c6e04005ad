//! Recording platform used by scheduler and service tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::{
    error::AppError,
    platform::{DeliveryStatus, MessageRef, OutgoingEmbed, Platform, ReactionUser},
};

#[derive(Default)]
struct MockState {
    messages: HashSet<MessageRef>,
    reactions: HashMap<(MessageRef, String), Vec<ReactionUser>>,
    unreachable_users: HashSet<u64>,
    panicking_channels: HashSet<u64>,
    rejected_emojis: HashSet<String>,
    fail_sends: bool,
    next_message_id: u64,

    direct_messages: Vec<(u64, String)>,
    sent: Vec<(u64, OutgoingEmbed)>,
    deleted: Vec<MessageRef>,
    added_reactions: Vec<(MessageRef, String)>,
}

/// In-memory `Platform` that records every side effect.
#[derive(Default)]
pub struct MockPlatform {
    state: Mutex<MockState>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a message that `get_message` will find.
    pub fn with_message(self, channel_id: u64, message_id: u64) -> Self {
        self.state.lock().unwrap().messages.insert(MessageRef {
            channel_id,
            message_id,
        });
        self
    }

    /// Sets the users returned for `emoji` on a message.
    pub fn with_reactions(
        self,
        channel_id: u64,
        message_id: u64,
        emoji: &str,
        users: Vec<ReactionUser>,
    ) -> Self {
        let message = MessageRef {
            channel_id,
            message_id,
        };
        self.state
            .lock()
            .unwrap()
            .reactions
            .insert((message, emoji.to_string()), users);
        self
    }

    pub fn with_unreachable_user(self, user_id: u64) -> Self {
        self.state.lock().unwrap().unreachable_users.insert(user_id);
        self
    }

    /// Makes `get_message` panic for `channel_id`, like serenity does for an invalid id.
    pub fn with_panicking_channel(self, channel_id: u64) -> Self {
        self.state.lock().unwrap().panicking_channels.insert(channel_id);
        self
    }

    /// Makes `add_reaction` fail for `emoji`.
    pub fn with_rejected_emoji(self, emoji: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .rejected_emojis
            .insert(emoji.to_string());
        self
    }

    /// Makes every `send_message` and `send_direct_message` fail.
    pub fn failing_sends(self) -> Self {
        self.state.lock().unwrap().fail_sends = true;
        self
    }

    pub fn direct_messages(&self) -> Vec<(u64, String)> {
        self.state.lock().unwrap().direct_messages.clone()
    }

    pub fn sent(&self) -> Vec<(u64, OutgoingEmbed)> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn deleted(&self) -> Vec<MessageRef> {
        self.state.lock().unwrap().deleted.clone()
    }

    pub fn added_reactions(&self) -> Vec<(MessageRef, String)> {
        self.state.lock().unwrap().added_reactions.clone()
    }

    /// Total finalization side effects: DMs delivered plus messages posted.
    pub fn side_effects(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.direct_messages.len() + state.sent.len()
    }
}

fn send_failure() -> AppError {
    AppError::NotFound("mock platform send failure".to_string())
}

#[async_trait]
impl Platform for MockPlatform {
    async fn send_direct_message(
        &self,
        user_id: u64,
        content: &str,
    ) -> Result<DeliveryStatus, AppError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_sends {
            return Err(send_failure());
        }
        if state.unreachable_users.contains(&user_id) {
            return Ok(DeliveryStatus::UserUnreachable);
        }
        state.direct_messages.push((user_id, content.to_string()));
        Ok(DeliveryStatus::Delivered)
    }

    async fn get_message(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Option<MessageRef>, AppError> {
        let panics = self.state.lock().unwrap().panicking_channels.contains(&channel_id);
        if panics {
            panic!("invalid channel id {}", channel_id);
        }

        let message = MessageRef {
            channel_id,
            message_id,
        };
        let state = self.state.lock().unwrap();
        Ok(state.messages.contains(&message).then_some(message))
    }

    async fn delete_message(&self, message: &MessageRef) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state.messages.remove(message);
        state.deleted.push(*message);
        Ok(())
    }

    async fn send_message(
        &self,
        channel_id: u64,
        embed: OutgoingEmbed,
    ) -> Result<MessageRef, AppError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_sends {
            return Err(send_failure());
        }
        state.next_message_id += 1;
        let message = MessageRef {
            channel_id,
            message_id: 900_000 + state.next_message_id,
        };
        state.messages.insert(message);
        state.sent.push((channel_id, embed));
        Ok(message)
    }

    async fn add_reaction(&self, message: &MessageRef, emoji: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        if state.rejected_emojis.contains(emoji) {
            return Err(AppError::BadRequest(format!("unknown emoji {}", emoji)));
        }
        state.added_reactions.push((*message, emoji.to_string()));
        Ok(())
    }

    async fn get_reaction_users(
        &self,
        message: &MessageRef,
        emoji: &str,
    ) -> Result<Vec<ReactionUser>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .reactions
            .get(&(*message, emoji.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}
