use chrono::Utc;
use serenity::all::{
    CommandInteraction, Context, CreateCommand, CreateEmbed, CreateEmbedFooter,
    CreateInteractionResponseFollowup, Timestamp,
};

use crate::{
    error::AppError, model::reminder::ReminderParam, service::reminder::ReminderService,
    state::AppState, util::duration::format_time_remaining,
};

/// Discord rejects embeds with more fields than this.
const MAX_EMBED_FIELDS: usize = 25;
const LIST_COLOUR: u32 = 0x3498DB;

pub fn register() -> CreateCommand {
    CreateCommand::new("myreminders").description("View all your active reminders")
}

pub async fn run(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    command.defer_ephemeral(&ctx.http).await?;

    let reminders = ReminderService::new(&state.db, state.platform.as_ref())
        .list_active_for_user(command.user.id.get())
        .await?;

    let followup = if reminders.is_empty() {
        CreateInteractionResponseFollowup::new().content("📭 You don't have any active reminders.")
    } else {
        CreateInteractionResponseFollowup::new()
            .embed(reminders_embed(&reminders, &command.user.name))
    };

    command
        .create_followup(&ctx.http, followup.ephemeral(true))
        .await?;

    Ok(())
}

/// Lists reminders in due order, one field each.
fn reminders_embed(reminders: &[ReminderParam], requested_by: &str) -> CreateEmbed {
    let now = Utc::now();

    let fields = reminders.iter().take(MAX_EMBED_FIELDS).map(|reminder| {
        let ts = reminder.due_time.timestamp();
        let left = (reminder.due_time - now)
            .to_std()
            .map(format_time_remaining)
            .unwrap_or_else(|_| "due now".to_string());
        (
            reminder.task.clone(),
            format!("<t:{}:F>\n*<t:{}:R>* ({})", ts, ts, left),
            false,
        )
    });

    let mut footer = format!("Requested by {}", requested_by);
    if reminders.len() > MAX_EMBED_FIELDS {
        footer.push_str(&format!(
            " · {} more not shown",
            reminders.len() - MAX_EMBED_FIELDS
        ));
    }

    CreateEmbed::new()
        .title(format!("📋 Your Reminders ({})", reminders.len()))
        .colour(LIST_COLOUR)
        .fields(fields)
        .footer(CreateEmbedFooter::new(footer))
        .timestamp(Timestamp::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn reminder(id: i32, task: &str) -> ReminderParam {
        ReminderParam {
            id,
            user_id: 1,
            task: task.to_string(),
            due_time: Utc::now() + Duration::hours(i64::from(id)),
            completed: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn embed_lists_each_reminder() {
        let embed = reminders_embed(&[reminder(1, "Stretch"), reminder(2, "Water plants")], "ana");
        let json = serde_json::to_value(&embed).unwrap();

        assert_eq!(json["title"], "📋 Your Reminders (2)");
        assert_eq!(json["fields"][0]["name"], "Stretch");
        assert_eq!(json["fields"][1]["name"], "Water plants");
        assert_eq!(json["footer"]["text"], "Requested by ana");
    }

    #[test]
    fn embed_caps_field_count() {
        let reminders: Vec<ReminderParam> = (1..=30).map(|id| reminder(id, "Task")).collect();

        let json = serde_json::to_value(reminders_embed(&reminders, "ana")).unwrap();

        assert_eq!(json["fields"].as_array().unwrap().len(), MAX_EMBED_FIELDS);
        assert_eq!(json["footer"]["text"], "Requested by ana · 5 more not shown");
    }
}
