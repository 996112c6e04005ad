use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateInteractionResponseFollowup,
};

use crate::{
    bot::command::{due_in, option_str},
    error::AppError,
    model::reminder::CreateReminderParam,
    service::reminder::{reminder_task, ReminderService},
    state::AppState,
    util::duration::{format_duration_words, parse_duration},
};

const UNPARSEABLE_DURATION: &str =
    "❌ I couldn't understand that time.\nTry something like `10m`, `1h 30m`, or `2d`.";

pub fn register() -> CreateCommand {
    CreateCommand::new("remind")
        .description("Set a reminder for a task at a specific time")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "task",
                "The task or item to remind you about",
            )
            .required(true),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "duration",
                "When to remind you (e.g. 7h 30m, 2d, 1w)",
            )
            .required(true),
        )
}

/// Stores a reminder and queues its delivery.
///
/// The duration is validated before anything is stored; an unparseable duration only
/// produces an ephemeral hint.
pub async fn run(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    command.defer_ephemeral(&ctx.http).await?;

    let task = option_str(command, "task").unwrap_or_default().trim();
    let duration = option_str(command, "duration").unwrap_or_default();

    if task.is_empty() {
        return Err(AppError::BadRequest(
            "Tell me what to remind you about.".to_string(),
        ));
    }

    let Some(delay) = parse_duration(duration) else {
        command
            .create_followup(
                &ctx.http,
                CreateInteractionResponseFollowup::new()
                    .content(UNPARSEABLE_DURATION)
                    .ephemeral(true),
            )
            .await?;
        return Ok(());
    };
    let due_time = due_in(delay)?;

    let reminder = ReminderService::new(&state.db, state.platform.as_ref())
        .create(CreateReminderParam {
            user_id: command.user.id.get(),
            task: task.to_string(),
            due_time,
        })
        .await?;

    state
        .queue
        .enqueue(reminder_task(state.deferred_context(), &reminder))
        .await?;

    command
        .create_followup(
            &ctx.http,
            CreateInteractionResponseFollowup::new()
                .content(format!(
                    "Reminder set for **{}** at <t:{}:F>.\nI will remind you in {}.",
                    reminder.task,
                    reminder.due_time.timestamp(),
                    format_duration_words(delay)
                ))
                .ephemeral(true),
        )
        .await?;

    Ok(())
}
