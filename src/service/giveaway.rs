use chrono::{DateTime, Utc};
use rand::{seq::SliceRandom, Rng};
use sea_orm::DatabaseConnection;
use tokio_util::sync::CancellationToken;

use crate::{
    data::giveaway::GiveawayRepository,
    error::AppError,
    model::giveaway::{CreateGiveawayParam, GiveawayParam},
    platform::{OutgoingEmbed, Platform},
    scheduler::{
        deferred::{run_when_due, DeferredContext, DueRecord, Finalized},
        task::{DeferredTask, TaskKind},
    },
};

/// Entry reaction used when the host does not choose one.
pub const DEFAULT_GIVEAWAY_EMOJI: &str = "🎉";

const LIVE_COLOUR: u32 = 0x1ABC9C;
const RESULTS_COLOUR: u32 = 0x2ECC71;

/// Everything needed to publish a new giveaway.
#[derive(Debug, Clone)]
pub struct GiveawayDraft {
    pub guild_id: u64,
    pub channel_id: u64,
    pub prize: String,
    pub winner_count: usize,
    pub reaction_emoji: String,
    pub due_time: DateTime<Utc>,
    pub created_by: u64,
}

pub struct GiveawayService<'a> {
    db: &'a DatabaseConnection,
    platform: &'a dyn Platform,
}

impl<'a> GiveawayService<'a> {
    pub fn new(db: &'a DatabaseConnection, platform: &'a dyn Platform) -> Self {
        Self { db, platform }
    }

    /// Posts a giveaway, seeds the entry reaction and persists it.
    ///
    /// # Returns
    /// - `Ok(GiveawayParam)` - The stored giveaway pointing at the posted message
    /// - `Err(AppError::BadRequest)` - Winner count is zero
    /// - `Err(AppError)` - Platform or database error
    pub async fn publish(&self, draft: GiveawayDraft) -> Result<GiveawayParam, AppError> {
        if draft.winner_count == 0 {
            return Err(AppError::BadRequest(
                "A giveaway needs at least one winner.".to_string(),
            ));
        }

        let embed = live_embed(
            &draft.prize,
            &draft.reaction_emoji,
            draft.winner_count,
            draft.due_time,
        );
        let message = self.platform.send_message(draft.channel_id, embed).await?;
        if let Err(e) = self
            .platform
            .add_reaction(&message, &draft.reaction_emoji)
            .await
        {
            tracing::warn!(
                "Failed to seed {} on giveaway message {}, removing it: {}",
                draft.reaction_emoji,
                message.message_id,
                e
            );
            if let Err(delete_err) = self.platform.delete_message(&message).await {
                tracing::error!(
                    "Failed to remove unseeded giveaway message {}: {}",
                    message.message_id,
                    delete_err
                );
            }
            return Err(e);
        }

        let entity = GiveawayRepository::new(self.db)
            .create(CreateGiveawayParam {
                guild_id: draft.guild_id,
                channel_id: message.channel_id,
                message_id: message.message_id,
                prize: draft.prize,
                winner_count: draft.winner_count,
                reaction_emoji: draft.reaction_emoji,
                due_time: draft.due_time,
                created_by: draft.created_by,
            })
            .await?;

        tracing::info!(
            "Giveaway {} created by {} in channel {}, message {}",
            entity.id,
            draft.created_by,
            message.channel_id,
            message.message_id
        );

        GiveawayParam::from_entity(entity)
    }

    /// Whether the giveaway's message still exists.
    pub async fn resolve(&self, giveaway: &GiveawayParam) -> Result<bool, AppError> {
        Ok(self
            .platform
            .get_message(giveaway.channel_id, giveaway.message_id)
            .await?
            .is_some())
    }

    /// Draws winners among entrants and replaces the giveaway message with the result.
    ///
    /// # Returns
    /// - `Ok(Finalized::Performed)` - Result posted, possibly with no winners
    /// - `Ok(Finalized::TargetMissing)` - Giveaway message was deleted
    /// - `Ok(Finalized::AlreadyCompleted)` - Record completed or deleted
    /// - `Err(AppError)` - Database, platform or stored-data error
    pub async fn finalize(&self, giveaway_id: i32) -> Result<Finalized, AppError> {
        let Some(entity) = GiveawayRepository::new(self.db)
            .get_by_id(giveaway_id)
            .await?
        else {
            return Ok(Finalized::AlreadyCompleted);
        };
        if entity.completed {
            return Ok(Finalized::AlreadyCompleted);
        }
        let giveaway = GiveawayParam::from_entity(entity)?;

        let Some(message) = self
            .platform
            .get_message(giveaway.channel_id, giveaway.message_id)
            .await?
        else {
            return Ok(Finalized::TargetMissing);
        };

        let participants: Vec<u64> = self
            .platform
            .get_reaction_users(&message, &giveaway.reaction_emoji)
            .await?
            .into_iter()
            .filter(|user| !user.bot)
            .map(|user| user.id)
            .collect();

        let winners = pick_winners(&participants, giveaway.winner_count, &mut rand::rng());
        let embed = results_embed(&giveaway, &winners, participants.len());

        self.platform.delete_message(&message).await?;
        self.platform.send_message(giveaway.channel_id, embed).await?;

        tracing::info!(
            "Finalized giveaway {} with {} winner(s) from {} entries",
            giveaway.id,
            winners.len(),
            participants.len()
        );

        Ok(Finalized::Performed)
    }

    pub async fn mark_completed(&self, giveaway_id: i32) -> Result<(), AppError> {
        GiveawayRepository::new(self.db)
            .mark_completed(giveaway_id)
            .await?;
        Ok(())
    }
}

/// Builds the deferred task that draws `giveaway` when it is due.
pub fn giveaway_task(ctx: DeferredContext, giveaway: &GiveawayParam) -> DeferredTask {
    let due = DueRecord {
        kind: TaskKind::GiveawayFinalization,
        record_id: giveaway.id,
        due_time: giveaway.due_time,
    };

    DeferredTask::new(
        TaskKind::GiveawayFinalization,
        format!("giveaway {} in channel {}", giveaway.id, giveaway.channel_id),
        move |cancel: CancellationToken| async move {
            let service = GiveawayService::new(&ctx.db, ctx.platform.as_ref());
            run_when_due(
                due,
                &cancel,
                &ctx.inflight,
                || service.finalize(due.record_id),
                || service.mark_completed(due.record_id),
            )
            .await
        },
    )
}

/// Draws up to `winner_count` distinct winners uniformly at random.
///
/// Duplicate entries count once. Fewer participants than winners yields everyone; no
/// participants yields no winners.
pub fn pick_winners<R: Rng + ?Sized>(
    participants: &[u64],
    winner_count: usize,
    rng: &mut R,
) -> Vec<u64> {
    let mut pool: Vec<u64> = Vec::with_capacity(participants.len());
    for id in participants {
        if !pool.contains(id) {
            pool.push(*id);
        }
    }

    pool.shuffle(rng);
    pool.truncate(winner_count);
    pool
}

fn results_embed(giveaway: &GiveawayParam, winners: &[u64], entries: usize) -> OutgoingEmbed {
    let winner_label = if giveaway.winner_count > 1 {
        "Winners"
    } else {
        "Winner"
    };
    let mentions = if winners.is_empty() {
        "No winners".to_string()
    } else {
        winners
            .iter()
            .map(|id| format!("<@{}>", id))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let entry_label = if entries == 1 { "Entry" } else { "Entries" };

    OutgoingEmbed::new(
        "🎉 Giveaway Ended!",
        format!(
            "**Prize:** {}\n\n🏆 **{}:** {}\n\n📋 **{}:** {}",
            giveaway.prize, winner_label, mentions, entry_label, entries
        ),
        RESULTS_COLOUR,
    )
    .footer(format!("Hosted by user {}", giveaway.created_by))
}

/// Renders the live giveaway shown while entries are open.
pub fn live_embed(
    prize: &str,
    reaction_emoji: &str,
    winner_count: usize,
    due_time: DateTime<Utc>,
) -> OutgoingEmbed {
    OutgoingEmbed::new(
        "🎁 Giveaway",
        format!(
            "**Prize:** {}\n\nReact with {} to enter!\n\n🏆 **Winners:** {}\n⏳ **Ends:** <t:{}:R>",
            prize,
            reaction_emoji,
            winner_count,
            due_time.timestamp()
        ),
        LIVE_COLOUR,
    )
}
