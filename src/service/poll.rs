use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tokio_util::sync::CancellationToken;

use crate::{
    data::poll::PollRepository,
    error::AppError,
    model::poll::{CreatePollParam, PollOption, PollParam, MAX_POLL_OPTIONS, MIN_POLL_OPTIONS},
    platform::{OutgoingEmbed, Platform},
    scheduler::{
        deferred::{run_when_due, DeferredContext, DueRecord, Finalized},
        task::{DeferredTask, TaskKind},
    },
};

/// Reactions seeded when the author leaves emojis blank.
pub const DEFAULT_POLL_EMOJIS: [&str; MAX_POLL_OPTIONS] = [
    "1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣", "🔟",
];

const LIVE_COLOUR: u32 = 0x1ABC9C;
const RESULTS_COLOUR: u32 = 0x00FF00;
const NO_VOTES_COLOUR: u32 = 0x992D22;
const BAR_SEGMENTS: usize = 12;

/// Where an option placed once voting closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    Winner,
    Tie,
    None,
}

/// Final vote count for one option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionResult {
    pub option: PollOption,
    pub votes: usize,
    pub standing: Standing,
}

/// Everything needed to publish a new poll.
#[derive(Debug, Clone)]
pub struct PollDraft {
    pub guild_id: u64,
    pub channel_id: u64,
    pub question: String,
    pub options: Vec<PollOption>,
    pub due_time: DateTime<Utc>,
    pub created_by: u64,
}

pub struct PollService<'a> {
    db: &'a DatabaseConnection,
    platform: &'a dyn Platform,
}

impl<'a> PollService<'a> {
    pub fn new(db: &'a DatabaseConnection, platform: &'a dyn Platform) -> Self {
        Self { db, platform }
    }

    /// Posts a poll, seeds one reaction per option and persists it.
    ///
    /// A message whose reactions could not be seeded is deleted again, since no record
    /// would ever finalize it.
    ///
    /// # Returns
    /// - `Ok(PollParam)` - The stored poll pointing at the posted message
    /// - `Err(AppError::BadRequest)` - Option count outside 2 to 10
    /// - `Err(AppError)` - Platform or database error
    pub async fn publish(&self, draft: PollDraft) -> Result<PollParam, AppError> {
        if !(MIN_POLL_OPTIONS..=MAX_POLL_OPTIONS).contains(&draft.options.len()) {
            return Err(AppError::BadRequest(format!(
                "A poll needs between {} and {} answers.",
                MIN_POLL_OPTIONS, MAX_POLL_OPTIONS
            )));
        }

        let embed = live_embed(&draft.question, &draft.options, draft.due_time);
        let message = self.platform.send_message(draft.channel_id, embed).await?;

        for option in &draft.options {
            if let Err(e) = self.platform.add_reaction(&message, &option.emoji).await {
                tracing::warn!(
                    "Failed to seed {} on poll message {}, removing it: {}",
                    option.emoji,
                    message.message_id,
                    e
                );
                if let Err(delete_err) = self.platform.delete_message(&message).await {
                    tracing::error!(
                        "Failed to remove unseeded poll message {}: {}",
                        message.message_id,
                        delete_err
                    );
                }
                return Err(e);
            }
        }

        let entity = PollRepository::new(self.db)
            .create(CreatePollParam {
                guild_id: draft.guild_id,
                channel_id: message.channel_id,
                message_id: message.message_id,
                question: draft.question,
                options: draft.options,
                due_time: draft.due_time,
                created_by: draft.created_by,
            })
            .await?;

        tracing::info!(
            "Poll {} created by {} in channel {}, message {}",
            entity.id,
            draft.created_by,
            message.channel_id,
            message.message_id
        );

        PollParam::from_entity(entity)
    }

    /// Whether the poll's message still exists.
    pub async fn resolve(&self, poll: &PollParam) -> Result<bool, AppError> {
        Ok(self
            .platform
            .get_message(poll.channel_id, poll.message_id)
            .await?
            .is_some())
    }

    /// Tallies votes, replaces the poll message with a results summary.
    ///
    /// # Returns
    /// - `Ok(Finalized::Performed)` - Results posted
    /// - `Ok(Finalized::TargetMissing)` - Poll message was deleted
    /// - `Ok(Finalized::AlreadyCompleted)` - Record completed or deleted
    /// - `Err(AppError)` - Database, platform or stored-data error
    pub async fn finalize(&self, poll_id: i32) -> Result<Finalized, AppError> {
        let Some(entity) = PollRepository::new(self.db).get_by_id(poll_id).await? else {
            return Ok(Finalized::AlreadyCompleted);
        };
        if entity.completed {
            return Ok(Finalized::AlreadyCompleted);
        }
        let poll = PollParam::from_entity(entity)?;

        let Some(message) = self
            .platform
            .get_message(poll.channel_id, poll.message_id)
            .await?
        else {
            return Ok(Finalized::TargetMissing);
        };

        let mut counts = Vec::with_capacity(poll.options.len());
        for option in &poll.options {
            let voters = self
                .platform
                .get_reaction_users(&message, &option.emoji)
                .await?;
            // the seed reaction comes from the bot
            counts.push(voters.iter().filter(|user| !user.bot).count());
        }

        let results = tally(&poll.options, &counts);
        let embed = results_embed(&poll.question, &results);

        self.platform.delete_message(&message).await?;
        self.platform.send_message(poll.channel_id, embed).await?;

        tracing::info!("Finalized poll {}", poll.id);

        Ok(Finalized::Performed)
    }

    pub async fn mark_completed(&self, poll_id: i32) -> Result<(), AppError> {
        PollRepository::new(self.db).mark_completed(poll_id).await?;
        Ok(())
    }
}

/// Builds the deferred task that finalizes `poll` when it is due.
pub fn poll_task(ctx: DeferredContext, poll: &PollParam) -> DeferredTask {
    let due = DueRecord {
        kind: TaskKind::PollFinalization,
        record_id: poll.id,
        due_time: poll.due_time,
    };

    DeferredTask::new(
        TaskKind::PollFinalization,
        format!("poll {} in channel {}", poll.id, poll.channel_id),
        move |cancel: CancellationToken| async move {
            let service = PollService::new(&ctx.db, ctx.platform.as_ref());
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

/// Pairs answers with emojis, filling blanks with keycap defaults.
///
/// Emojis that repeat an earlier one are replaced by the next unused default so every
/// option keeps a distinct reaction.
pub fn build_options(answers: &[String], emojis: &[String]) -> Vec<PollOption> {
    let mut used: Vec<String> = Vec::with_capacity(answers.len());
    let mut defaults = DEFAULT_POLL_EMOJIS.iter().map(|e| e.to_string());

    for index in 0..answers.len() {
        let candidate = emojis
            .get(index)
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty() && !used.contains(e));

        let emoji = match candidate {
            Some(emoji) => emoji,
            None => match defaults.by_ref().find(|d| !used.contains(d)) {
                Some(default) => default,
                None => break,
            },
        };
        used.push(emoji);
    }

    answers
        .iter()
        .zip(used)
        .map(|(answer, emoji)| PollOption {
            answer: answer.clone(),
            emoji,
        })
        .collect()
}

/// Ranks options by votes, highest first, and flags the leader.
///
/// The leader is a `Winner` when it has more votes than every other option. When two or
/// more options share the top count they are all flagged `Tie`. Nothing is flagged when
/// nobody voted.
pub fn tally(options: &[PollOption], counts: &[usize]) -> Vec<OptionResult> {
    let mut results: Vec<OptionResult> = options
        .iter()
        .zip(counts.iter().copied().chain(std::iter::repeat(0)))
        .map(|(option, votes)| OptionResult {
            option: option.clone(),
            votes,
            standing: Standing::None,
        })
        .collect();

    // stable sort keeps creation order among equal counts
    results.sort_by(|a, b| b.votes.cmp(&a.votes));

    let top = results.first().map(|r| r.votes).unwrap_or(0);
    if top > 0 {
        let leaders = results.iter().filter(|r| r.votes == top).count();
        let standing = if leaders > 1 {
            Standing::Tie
        } else {
            Standing::Winner
        };
        for result in results.iter_mut().filter(|r| r.votes == top) {
            result.standing = standing;
        }
    }

    results
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 8.33).round() as usize).min(BAR_SEGMENTS);
    format!(
        "{}{}",
        "▰".repeat(filled),
        "▱".repeat(BAR_SEGMENTS - filled)
    )
}

/// Renders the final results summary.
pub fn results_embed(question: &str, results: &[OptionResult]) -> OutgoingEmbed {
    let total: usize = results.iter().map(|r| r.votes).sum();

    let lines: Vec<String> = results
        .iter()
        .map(|result| {
            let percent = if total > 0 {
                result.votes as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            let marker = match result.standing {
                Standing::Winner => " ← WINNER 👑",
                Standing::Tie => " ← TIE 🤝",
                Standing::None => "",
            };
            format!(
                "{} **{}**\n     ┗ {:>3} votes ({:.1}%) {}{}",
                result.option.emoji,
                result.option.answer,
                result.votes,
                percent,
                progress_bar(percent),
                marker
            )
        })
        .collect();

    let colour = if total > 0 {
        RESULTS_COLOUR
    } else {
        NO_VOTES_COLOUR
    };

    OutgoingEmbed::new(
        "Poll Ended – Final Results",
        format!(
            "**{}**\n\n{}\n\n**Total votes:** {}",
            question,
            lines.join("\n"),
            total
        ),
        colour,
    )
}

/// Renders the live poll shown while voting is open.
pub fn live_embed(question: &str, options: &[PollOption], due_time: DateTime<Utc>) -> OutgoingEmbed {
    let lines: Vec<String> = options
        .iter()
        .map(|option| format!("{} {}", option.emoji, option.answer))
        .collect();

    OutgoingEmbed::new(
        "📊 Poll",
        format!(
            "{}\n\n{}\n\n⏳ Ends: <t:{}:R>",
            question,
            lines.join("\n"),
            due_time.timestamp()
        ),
        LIVE_COLOUR,
    )
}
