//! Slash commands and their multi-step wizards.
//!
//! Each command module exposes `register()` building its command definition, `run()` for
//! the slash command itself, and, for wizards, handlers for the component and modal
//! interactions whose custom ids carry the command's prefix (`poll_`, `giveaway_`,
//! `support_`).

pub mod giveaway;
pub mod myreminders;
pub mod poll;
pub mod remind;
pub mod support;

use serenity::all::{
    ActionRowComponent, CommandInteraction, ComponentInteraction, ComponentInteractionDataKind,
    Context, CreateCommand, CreateInputText, CreateSelectMenu, CreateSelectMenuKind,
    CreateSelectMenuOption, GuildId, InputTextStyle, ModalInteraction,
};
use std::collections::HashMap;
use std::time::Duration;

use crate::error::AppError;

/// Wizard duration choices as label and minutes.
const DURATION_CHOICES: [(&str, u64); 13] = [
    ("5 minutes", 5),
    ("15 minutes", 15),
    ("30 minutes", 30),
    ("1 hour", 60),
    ("3 hours", 180),
    ("6 hours", 360),
    ("12 hours", 720),
    ("24 hours", 1440),
    ("3 days", 4320),
    ("1 week", 10080),
    ("2 weeks", 20160),
    ("3 weeks", 30240),
    ("1 month", 43200),
];

/// Every command the bot registers.
pub fn all() -> Vec<CreateCommand> {
    vec![
        remind::register(),
        myreminders::register(),
        poll::register(),
        giveaway::register(),
        support::register(),
    ]
}

/// Returns a string option of a slash command.
pub fn option_str<'a>(command: &'a CommandInteraction, name: &str) -> Option<&'a str> {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_str())
}

/// First value picked in a string select menu.
pub fn selected_value(component: &ComponentInteraction) -> Option<&str> {
    match &component.data.kind {
        ComponentInteractionDataKind::StringSelect { values } => {
            values.first().map(String::as_str)
        }
        _ => None,
    }
}

/// Text inputs of a submitted modal keyed by custom id; empty inputs map to "".
pub fn modal_values(modal: &ModalInteraction) -> HashMap<String, String> {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .filter_map(|component| match component {
            ActionRowComponent::InputText(input) => Some((
                input.custom_id.clone(),
                input.value.clone().unwrap_or_default(),
            )),
            _ => None,
        })
        .collect()
}

/// Select menu offering the wizard durations.
pub fn duration_menu(custom_id: &str, placeholder: &str) -> CreateSelectMenu {
    let options = DURATION_CHOICES
        .iter()
        .map(|(label, minutes)| CreateSelectMenuOption::new(*label, minutes.to_string()))
        .collect();

    CreateSelectMenu::new(custom_id, CreateSelectMenuKind::String { options })
        .placeholder(placeholder)
}

/// Reads the duration picked in a `duration_menu`.
///
/// # Returns
/// - `Ok(Duration)` - The chosen duration
/// - `Err(AppError::BadRequest)` - Nothing picked or the value is not one of the choices
pub fn selected_duration(component: &ComponentInteraction) -> Result<Duration, AppError> {
    let value = selected_value(component)
        .ok_or_else(|| AppError::BadRequest("Please pick a duration.".to_string()))?;

    duration_choice(value)
}

fn duration_choice(value: &str) -> Result<Duration, AppError> {
    DURATION_CHOICES
        .iter()
        .find(|(_, minutes)| minutes.to_string() == value)
        .map(|(_, minutes)| Duration::from_secs(minutes * 60))
        .ok_or_else(|| AppError::BadRequest(format!("'{}' is not a known duration.", value)))
}

/// Splits multi-line modal input into trimmed, non-empty lines.
pub fn lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Text input for a wizard modal, prefilled with `value` when editing.
pub fn text_input(
    style: InputTextStyle,
    label: &str,
    custom_id: &str,
    value: &str,
    required: bool,
) -> CreateInputText {
    let input = CreateInputText::new(style, label, custom_id).required(required);
    if value.is_empty() {
        input
    } else {
        input.value(value)
    }
}

/// Replaces `:name:` entries with the guild's custom emoji of that name.
///
/// Unknown names and anything else are kept as typed. Failing to fetch the guild's emojis
/// is logged and leaves the input unchanged.
pub async fn resolve_emoji_names(
    ctx: &Context,
    guild_id: Option<GuildId>,
    raw: Vec<String>,
) -> Vec<String> {
    let Some(guild_id) = guild_id else {
        return raw;
    };
    if !raw.iter().any(|emoji| is_emoji_name(emoji)) {
        return raw;
    }

    match guild_id.emojis(&ctx.http).await {
        Ok(emojis) => {
            let known: Vec<(String, String)> = emojis
                .iter()
                .map(|emoji| (emoji.name.clone(), emoji.to_string()))
                .collect();
            substitute_emoji_names(raw, &known)
        }
        Err(e) => {
            tracing::warn!("Failed to fetch emojis for guild {}: {}", guild_id, e);
            raw
        }
    }
}

fn is_emoji_name(text: &str) -> bool {
    text.len() > 2 && text.starts_with(':') && text.ends_with(':')
}

fn substitute_emoji_names(raw: Vec<String>, known: &[(String, String)]) -> Vec<String> {
    raw.into_iter()
        .map(|emoji| {
            if !is_emoji_name(&emoji) {
                return emoji;
            }
            let name = emoji.trim_matches(':');
            known
                .iter()
                .find(|(known_name, _)| known_name.eq_ignore_ascii_case(name))
                .map(|(_, rendered)| rendered.clone())
                .unwrap_or(emoji)
        })
        .collect()
}

/// Absolute due time `delay` from now.
///
/// # Returns
/// - `Ok(DateTime<Utc>)` - Due time
/// - `Err(AppError::BadRequest)` - The delay does not fit a calendar date
pub fn due_in(delay: Duration) -> Result<chrono::DateTime<chrono::Utc>, AppError> {
    chrono::Duration::from_std(delay)
        .ok()
        .and_then(|delay| chrono::Utc::now().checked_add_signed(delay))
        .ok_or_else(|| AppError::BadRequest("That is too far in the future.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_choice_accepts_listed_minutes_only() {
        assert_eq!(duration_choice("60").unwrap(), Duration::from_secs(3600));
        assert_eq!(
            duration_choice("43200").unwrap(),
            Duration::from_secs(30 * 24 * 3600)
        );
        assert!(matches!(duration_choice("61"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn lines_drops_blank_entries() {
        assert_eq!(
            lines("  Yes \n\n No\r\n   \nMaybe"),
            vec!["Yes".to_string(), "No".to_string(), "Maybe".to_string()]
        );
    }

    #[test]
    fn due_in_rejects_unrepresentable_delay() {
        assert!(due_in(Duration::from_secs(60)).is_ok());
        assert!(matches!(
            due_in(Duration::from_secs(u64::MAX)),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn emoji_names_resolve_case_insensitively() {
        let known = vec![("Pepe".to_string(), "<:Pepe:42>".to_string())];
        let raw = vec![":pepe:".to_string(), "🤨".to_string(), ":unknown:".to_string()];

        assert_eq!(
            substitute_emoji_names(raw, &known),
            vec![
                "<:Pepe:42>".to_string(),
                "🤨".to_string(),
                ":unknown:".to_string()
            ]
        );
    }

    #[test]
    fn every_command_is_registered() {
        assert_eq!(all().len(), 5);
    }
}
