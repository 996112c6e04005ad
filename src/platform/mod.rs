//! Chat-platform capabilities consumed by deferred work.
//!
//! Finalization code never talks to Serenity directly; it goes through the `Platform`
//! trait so the scheduler, recovery and services can be exercised against a recording
//! mock. `SerenityPlatform` is the production implementation over a Serenity
//! `Arc<Http>`.

#[cfg(test)]
pub mod mock;
pub mod discord;

use async_trait::async_trait;

use crate::error::AppError;

/// Location of a message on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub channel_id: u64,
    pub message_id: u64,
}

/// Result of attempting a direct message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    /// The user has DMs closed, blocked the bot or no longer exists.
    UserUnreachable,
}

/// A user who added a given reaction to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionUser {
    pub id: u64,
    pub bot: bool,
}

impl From<&::serenity::all::User> for ReactionUser {
    fn from(user: &::serenity::all::User) -> Self {
        Self {
            id: user.id.get(),
            bot: user.bot,
        }
    }
}

/// Platform-neutral description of an embed to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmbed {
    pub title: String,
    pub description: String,
    pub colour: u32,
    pub footer: Option<String>,
}

impl OutgoingEmbed {
    pub fn new(title: impl Into<String>, description: impl Into<String>, colour: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            colour,
            footer: None,
        }
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

/// Platform operations needed to deliver reminders and finalize polls and giveaways.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Sends `content` to a user's direct messages.
    ///
    /// An unreachable user is a normal outcome, not an error.
    async fn send_direct_message(
        &self,
        user_id: u64,
        content: &str,
    ) -> Result<DeliveryStatus, AppError>;

    /// Looks up a message, returning `None` when it no longer exists.
    async fn get_message(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Option<MessageRef>, AppError>;

    async fn delete_message(&self, message: &MessageRef) -> Result<(), AppError>;

    async fn send_message(
        &self,
        channel_id: u64,
        embed: OutgoingEmbed,
    ) -> Result<MessageRef, AppError>;

    async fn add_reaction(&self, message: &MessageRef, emoji: &str) -> Result<(), AppError>;

    /// Gets every user who reacted with `emoji`, across all pages.
    async fn get_reaction_users(
        &self,
        message: &MessageRef,
        emoji: &str,
    ) -> Result<Vec<ReactionUser>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::serenity::create_test_user;

    #[test]
    fn reaction_user_keeps_bot_flag() {
        let member = ReactionUser::from(&create_test_user(1001, "alice", false));
        let bot = ReactionUser::from(&create_test_user(1002, "tsgs", true));

        assert_eq!(
            member,
            ReactionUser {
                id: 1001,
                bot: false
            }
        );
        assert!(bot.bot);
    }
}
