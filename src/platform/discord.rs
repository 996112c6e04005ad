//! Serenity-backed implementation of the platform capabilities.

use async_trait::async_trait;
use serenity::all::{
    ChannelId, CreateEmbed, CreateEmbedFooter, CreateMessage, MessageId, ReactionType, Timestamp,
    UserId,
};
use serenity::http::Http;
use std::sync::Arc;

use crate::{
    error::AppError,
    platform::{DeliveryStatus, MessageRef, OutgoingEmbed, Platform, ReactionUser},
};

/// Discord allows at most 100 users per reaction page.
const REACTION_PAGE_SIZE: u8 = 100;

pub struct SerenityPlatform {
    http: Arc<Http>,
}

impl SerenityPlatform {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

/// Parses a stored emoji string into a Serenity reaction.
///
/// Accepts unicode emoji and custom emoji in `<:name:id>` or `<a:name:id>` form.
///
/// # Returns
/// - `Ok(ReactionType)` - Parsed reaction
/// - `Err(AppError::BadRequest)` - Text is not an emoji Discord can react with
pub fn parse_reaction(emoji: &str) -> Result<ReactionType, AppError> {
    ReactionType::try_from(emoji.trim())
        .map_err(|_| AppError::BadRequest(format!("'{}' is not a valid emoji", emoji)))
}

impl From<OutgoingEmbed> for CreateEmbed {
    fn from(embed: OutgoingEmbed) -> Self {
        let builder = CreateEmbed::new()
            .title(embed.title)
            .description(embed.description)
            .colour(embed.colour)
            .timestamp(Timestamp::now());

        match embed.footer {
            Some(footer) => builder.footer(CreateEmbedFooter::new(footer)),
            None => builder,
        }
    }
}

/// Returns the HTTP status of a failed Discord request, if there was one.
fn http_status(err: &serenity::Error) -> Option<u16> {
    match err {
        serenity::Error::Http(http_err) => http_err.status_code().map(|status| status.as_u16()),
        _ => None,
    }
}

#[async_trait]
impl Platform for SerenityPlatform {
    async fn send_direct_message(
        &self,
        user_id: u64,
        content: &str,
    ) -> Result<DeliveryStatus, AppError> {
        let message = CreateMessage::new().content(content);

        match UserId::new(user_id)
            .direct_message(&self.http, message)
            .await
        {
            Ok(_) => Ok(DeliveryStatus::Delivered),
            // 403: DMs closed or bot blocked, 404: unknown user
            Err(e) if matches!(http_status(&e), Some(403) | Some(404)) => {
                Ok(DeliveryStatus::UserUnreachable)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_message(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Option<MessageRef>, AppError> {
        match ChannelId::new(channel_id)
            .message(&self.http, MessageId::new(message_id))
            .await
        {
            Ok(message) => Ok(Some(MessageRef {
                channel_id: message.channel_id.get(),
                message_id: message.id.get(),
            })),
            // 403 covers channels the bot can no longer see
            Err(e) if matches!(http_status(&e), Some(403) | Some(404)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_message(&self, message: &MessageRef) -> Result<(), AppError> {
        ChannelId::new(message.channel_id)
            .delete_message(&self.http, MessageId::new(message.message_id))
            .await?;
        Ok(())
    }

    async fn send_message(
        &self,
        channel_id: u64,
        embed: OutgoingEmbed,
    ) -> Result<MessageRef, AppError> {
        let message = ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().embed(embed.into()))
            .await?;

        Ok(MessageRef {
            channel_id: message.channel_id.get(),
            message_id: message.id.get(),
        })
    }

    async fn add_reaction(&self, message: &MessageRef, emoji: &str) -> Result<(), AppError> {
        let reaction = parse_reaction(emoji)?;

        ChannelId::new(message.channel_id)
            .create_reaction(&self.http, MessageId::new(message.message_id), reaction)
            .await?;
        Ok(())
    }

    async fn get_reaction_users(
        &self,
        message: &MessageRef,
        emoji: &str,
    ) -> Result<Vec<ReactionUser>, AppError> {
        let reaction = parse_reaction(emoji)?;
        let channel_id = ChannelId::new(message.channel_id);
        let message_id = MessageId::new(message.message_id);

        let mut users = Vec::new();
        let mut after: Option<UserId> = None;
        loop {
            let page = channel_id
                .reaction_users(
                    &self.http,
                    message_id,
                    reaction.clone(),
                    Some(REACTION_PAGE_SIZE),
                    after,
                )
                .await?;

            let page_len = page.len();
            after = page.last().map(|user| user.id);
            users.extend(page.iter().map(ReactionUser::from));

            if page_len < REACTION_PAGE_SIZE as usize {
                break;
            }
        }

        Ok(users)
    }
}
