//! `/support` wizard: pick the application and issue details, then fill in a modal. The
//! finished ticket goes to the configured support channel.

use serenity::all::{
    ButtonStyle, CommandInteraction, ComponentInteraction, Context, CreateActionRow, CreateButton,
    CreateCommand, CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage,
    CreateModal, CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption, InputTextStyle,
    ModalInteraction,
};
use std::collections::HashMap;

use crate::{
    bot::command::{modal_values, selected_value, text_input},
    error::AppError,
    platform::OutgoingEmbed,
    state::{form::SupportForm, AppState},
};

pub const PREFIX: &str = "support_";

const APP_ID: &str = "support_app";
const ISSUE_TYPE_ID: &str = "support_issue_type";
const REPRO_ID: &str = "support_repro";
const URGENCY_ID: &str = "support_urgency";
const PLATFORM_ID: &str = "support_platform";
const CONTINUE_ID: &str = "support_continue";
const MODAL_ID: &str = "support_modal_full";

const TICKET_COLOUR: u32 = 0x03A9FC;
const NOT_SPECIFIED: &str = "Not specified";

/// Applications tickets can be filed for, as select value and display name.
const APPLICATIONS: [(&str, &str); 2] = [
    ("cs2aa", "CS2 AutoAccept"),
    ("sdc", "Stream Drop Collector"),
];

pub fn register() -> CreateCommand {
    CreateCommand::new("support").description("Open a support request for one of our applications")
}

pub async fn run(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    if state.support_channel_id.is_none() {
        return Err(AppError::BadRequest(
            "Support requests are not enabled on this bot.".to_string(),
        ));
    }

    state.forms.support.reset(command.user.id.get());

    let options = APPLICATIONS
        .iter()
        .map(|(value, name)| CreateSelectMenuOption::new(*name, *value))
        .collect();
    let menu = CreateSelectMenu::new(APP_ID, CreateSelectMenuKind::String { options })
        .placeholder("Select the application");

    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content("Which application do you need help with?")
                    .components(vec![CreateActionRow::SelectMenu(menu)])
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

pub async fn handle_component(
    ctx: &Context,
    state: &AppState,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let user_id = component.user.id.get();
    let custom_id = component.data.custom_id.as_str();

    match custom_id {
        APP_ID => {
            let app = selected_value(component)
                .and_then(application_name)
                .ok_or_else(|| AppError::BadRequest("Please select an application.".to_string()))?;
            let value = selected_value(component).unwrap_or_default().to_string();
            state
                .forms
                .support
                .update(user_id, |form| form.application = Some(value.clone()));

            component
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::UpdateMessage(
                        CreateInteractionResponseMessage::new()
                            .content(format!(
                                "Selected: **{}**\nNow fill out the remaining fields.",
                                app
                            ))
                            .components(detail_rows(&value)),
                    ),
                )
                .await?;
        }
        ISSUE_TYPE_ID | REPRO_ID | URGENCY_ID | PLATFORM_ID => {
            let value = selected_value(component).map(str::to_string);
            state.forms.support.update(user_id, |form| match custom_id {
                ISSUE_TYPE_ID => form.issue_type = value,
                REPRO_ID => form.reproducibility = value,
                URGENCY_ID => form.urgency = value,
                _ => form.platform = value,
            });

            component
                .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
                .await?;
        }
        CONTINUE_ID => {
            let app = state
                .forms
                .support
                .try_get(user_id)
                .and_then(|form| form.application)
                .ok_or_else(|| {
                    AppError::BadRequest("Please select an application first.".to_string())
                })?;

            component
                .create_response(&ctx.http, CreateInteractionResponse::Modal(support_modal(&app)))
                .await?;
        }
        other => tracing::warn!("Unknown support component '{}'", other),
    }

    Ok(())
}

/// Posts the ticket to the support channel and confirms to the user.
pub async fn handle_modal(
    ctx: &Context,
    state: &AppState,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    if modal.data.custom_id != MODAL_ID {
        tracing::warn!("Unknown support modal '{}'", modal.data.custom_id);
        return Ok(());
    }

    let user_id = modal.user.id.get();
    let form = state.forms.support.try_get(user_id).ok_or_else(|| {
        AppError::BadRequest("Session expired or invalid. Please start over with /support".to_string())
    })?;
    let channel_id = state.support_channel_id.ok_or_else(|| {
        AppError::BadRequest("Support requests are not enabled on this bot.".to_string())
    })?;

    let ticket = ticket_embed(&form, &modal_values(modal), user_id)?;
    state.platform.send_message(channel_id, ticket.clone()).await?;
    state.forms.support.clear(user_id);

    tracing::info!("Support request from user {} posted to channel {}", user_id, channel_id);

    modal
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content("✅ Support request submitted! You can close this.")
                    .embed(CreateEmbed::from(ticket))
                    .components(vec![]),
            ),
        )
        .await?;

    Ok(())
}

fn application_name(value: &str) -> Option<&'static str> {
    APPLICATIONS
        .iter()
        .find(|(known, _)| *known == value)
        .map(|(_, name)| *name)
}

fn string_menu(custom_id: &str, placeholder: &str, choices: &[(&str, &str)]) -> CreateActionRow {
    let options = choices
        .iter()
        .map(|(label, value)| CreateSelectMenuOption::new(*label, *value))
        .collect();

    CreateActionRow::SelectMenu(
        CreateSelectMenu::new(custom_id, CreateSelectMenuKind::String { options })
            .placeholder(placeholder),
    )
}

/// The four detail selects plus the continue button; platforms depend on the application.
fn detail_rows(app: &str) -> Vec<CreateActionRow> {
    let platforms: &[(&str, &str)] = if app == "cs2aa" {
        &[
            ("Faceit", "Faceit"),
            ("Matchmaking", "Regular Matchmaking"),
            ("Other", "Other"),
        ]
    } else {
        &[("Twitch", "Twitch"), ("Kick", "Kick"), ("Both", "Both")]
    };

    vec![
        string_menu(
            ISSUE_TYPE_ID,
            "Select Issue Type",
            &[
                ("🐞 Bug Report", "Bug Report"),
                ("💡 Feature Request", "Feature Request"),
                ("❓ General Question", "General Question"),
                ("⚙️ Other", "Other"),
            ],
        ),
        string_menu(
            REPRO_ID,
            "Select Reproducibility",
            &[
                ("Every time", "Every time"),
                ("Occasionally", "Occasionally"),
                ("Rarely", "Rarely"),
                ("Only once", "Only once"),
            ],
        ),
        string_menu(
            URGENCY_ID,
            "Select Urgency",
            &[
                ("Low", "Low"),
                ("Medium", "Medium"),
                ("High", "High"),
                ("Critical", "Critical"),
            ],
        ),
        string_menu(PLATFORM_ID, "Select Platform", platforms),
        CreateActionRow::Buttons(vec![CreateButton::new(CONTINUE_ID)
            .label("Continue to Form")
            .style(ButtonStyle::Primary)]),
    ]
}

fn support_modal(app: &str) -> CreateModal {
    let name = application_name(app).unwrap_or("Application");

    CreateModal::new(MODAL_ID, format!("{} Support Form", name)).components(vec![
        CreateActionRow::InputText(text_input(
            InputTextStyle::Paragraph,
            "Describe the Issue",
            "description",
            "",
            true,
        )),
        CreateActionRow::InputText(text_input(
            InputTextStyle::Short,
            "Operating System",
            "os",
            "",
            true,
        )),
        CreateActionRow::InputText(text_input(
            InputTextStyle::Short,
            &format!("{} Version", name),
            "version",
            "",
            true,
        )),
        CreateActionRow::InputText(text_input(
            InputTextStyle::Paragraph,
            "Steps to Reproduce",
            "steps",
            "",
            false,
        )),
        CreateActionRow::InputText(text_input(
            InputTextStyle::Paragraph,
            "Additional Info / Logs",
            "additional",
            "",
            false,
        )),
    ])
}

/// Renders a ticket from the wizard selections and the modal fields.
///
/// # Returns
/// - `Ok(OutgoingEmbed)` - The ticket
/// - `Err(AppError::BadRequest)` - No application selected or the description is empty
fn ticket_embed(
    form: &SupportForm,
    details: &HashMap<String, String>,
    user_id: u64,
) -> Result<OutgoingEmbed, AppError> {
    let app = form
        .application
        .as_deref()
        .and_then(application_name)
        .ok_or_else(|| AppError::BadRequest("Please select an application first.".to_string()))?;

    let detail = |key: &str, fallback: &'static str| -> String {
        details
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    };

    let description = detail("description", "");
    if description.is_empty() {
        return Err(AppError::BadRequest("Please describe the issue.".to_string()));
    }

    let selection = |value: &Option<String>| value.clone().unwrap_or_else(|| NOT_SPECIFIED.to_string());

    let body = format!(
        "**Submitted by:** <@{}>\n\
         **Application:** {}\n\
         **Issue Type:** {}\n\
         **Reproducibility:** {}\n\
         **Urgency:** {}\n\
         **Platform:** {}\n\
         **Operating System:** {}\n\
         **Version:** {}\n\n\
         **Description**\n{}\n\n\
         **Steps**\n{}\n\n\
         **Additional Info**\n{}",
        user_id,
        app,
        selection(&form.issue_type),
        selection(&form.reproducibility),
        selection(&form.urgency),
        selection(&form.platform),
        detail("os", NOT_SPECIFIED),
        detail("version", NOT_SPECIFIED),
        description,
        detail("steps", "Not provided"),
        detail("additional", "None"),
    );

    Ok(OutgoingEmbed::new(
        format!("🧾 {} Support Request", app),
        body,
        TICKET_COLOUR,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn ticket_fills_missing_fields_with_placeholders() {
        let form = SupportForm {
            application: Some("sdc".to_string()),
            urgency: Some("High".to_string()),
            ..Default::default()
        };

        let ticket = ticket_embed(
            &form,
            &details(&[("description", "Drops stop after an hour"), ("os", "Windows 11")]),
            42,
        )
        .unwrap();

        assert_eq!(ticket.title, "🧾 Stream Drop Collector Support Request");
        assert!(ticket.description.contains("**Urgency:** High"));
        assert!(ticket.description.contains("**Issue Type:** Not specified"));
        assert!(ticket.description.contains("**Version:** Not specified"));
        assert!(ticket.description.contains("**Steps**\nNot provided"));
        assert!(ticket.description.contains("<@42>"));
    }

    #[test]
    fn ticket_requires_application_and_description() {
        let no_app = SupportForm::default();
        assert!(matches!(
            ticket_embed(&no_app, &details(&[("description", "Broken")]), 1),
            Err(AppError::BadRequest(_))
        ));

        let form = SupportForm {
            application: Some("cs2aa".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            ticket_embed(&form, &details(&[("description", "   ")]), 1),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn platforms_follow_selected_application() {
        let cs2 = serde_json::to_value(detail_rows("cs2aa")).unwrap();
        let sdc = serde_json::to_value(detail_rows("sdc")).unwrap();

        assert!(cs2[3].to_string().contains("Faceit"));
        assert!(sdc[3].to_string().contains("Twitch"));
        assert_eq!(cs2.as_array().unwrap().len(), 5);
    }
}
