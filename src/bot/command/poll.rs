//! `/poll` wizard: duration select, question modal, preview, publish.

use serenity::all::{
    ButtonStyle, CommandInteraction, ComponentInteraction, Context, CreateActionRow, CreateButton,
    CreateCommand, CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage,
    CreateModal, EditInteractionResponse, InputTextStyle, ModalInteraction, Permissions,
};

use crate::{
    bot::command::{
        due_in, duration_menu, lines, modal_values, resolve_emoji_names, selected_duration,
        text_input,
    },
    error::AppError,
    model::poll::{MAX_POLL_OPTIONS, MIN_POLL_OPTIONS},
    service::poll::{build_options, live_embed, poll_task, PollDraft, PollService},
    state::{form::PollForm, AppState},
    util::duration::format_duration_words,
};

pub const PREFIX: &str = "poll_";

const DURATION_ID: &str = "poll_duration";
const CONTINUE_ID: &str = "poll_continue";
const MODAL_ID: &str = "poll_modal";
const CONFIRM_ID: &str = "poll_confirm";
const EDIT_ID: &str = "poll_edit";
const CANCEL_ID: &str = "poll_cancel";

pub fn register() -> CreateCommand {
    CreateCommand::new("poll")
        .description("Start a poll where users can participate by reacting")
        .default_member_permissions(Permissions::MANAGE_MESSAGES)
}

/// Starts the wizard with the duration select.
pub async fn run(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    if command.guild_id.is_none() {
        return Err(AppError::BadRequest(
            "Polls can only be created in a server.".to_string(),
        ));
    }

    state.forms.poll.reset(command.user.id.get());

    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content("First, select the duration of your poll:")
                    .components(vec![CreateActionRow::SelectMenu(duration_menu(
                        DURATION_ID,
                        "How long should the poll last?",
                    ))])
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

    match component.data.custom_id.as_str() {
        DURATION_ID => {
            let duration = selected_duration(component)?;
            state
                .forms
                .poll
                .update(user_id, |form| form.duration = Some(duration));

            let continue_button = CreateButton::new(CONTINUE_ID)
                .label("Continue →")
                .style(ButtonStyle::Primary);
            component
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::UpdateMessage(
                        CreateInteractionResponseMessage::new()
                            .content(format!(
                                "Duration set to {}.\nClick Continue to set up your poll.",
                                format_duration_words(duration)
                            ))
                            .components(vec![CreateActionRow::Buttons(vec![continue_button])]),
                    ),
                )
                .await?;
        }
        CONTINUE_ID | EDIT_ID => {
            let form = state.forms.poll.get_or_create(user_id);
            component
                .create_response(&ctx.http, CreateInteractionResponse::Modal(poll_modal(&form)))
                .await?;
        }
        CONFIRM_ID => confirm(ctx, state, component).await?,
        CANCEL_ID => {
            state.forms.poll.clear(user_id);
            component
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::UpdateMessage(
                        CreateInteractionResponseMessage::new()
                            .content("Poll creation cancelled.")
                            .embeds(vec![])
                            .components(vec![]),
                    ),
                )
                .await?;
        }
        other => tracing::warn!("Unknown poll component '{}'", other),
    }

    Ok(())
}

/// Stores the submitted question and answers and shows the preview.
pub async fn handle_modal(
    ctx: &Context,
    state: &AppState,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    if modal.data.custom_id != MODAL_ID {
        tracing::warn!("Unknown poll modal '{}'", modal.data.custom_id);
        return Ok(());
    }

    let values = modal_values(modal);
    let question = values
        .get("question")
        .map(|q| q.trim().to_string())
        .unwrap_or_default();
    let answers = lines(values.get("answers").map(String::as_str).unwrap_or_default());
    let raw_emojis = lines(values.get("emojis").map(String::as_str).unwrap_or_default());

    validate(&question, &answers)?;
    let emojis = resolve_emoji_names(ctx, modal.guild_id, raw_emojis).await;

    let form = state.forms.poll.update(modal.user.id.get(), |form| {
        form.question = question;
        form.answers = answers;
        form.emojis = emojis;
    });
    let duration = form.duration.ok_or_else(session_expired)?;

    let mut preview = live_embed(
        &form.question,
        &build_options(&form.answers, &form.emojis),
        due_in(duration)?,
    );
    preview.title = "📊 Poll (Preview)".to_string();

    modal
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content("Does this look good?")
                    .embed(CreateEmbed::from(preview))
                    .components(vec![CreateActionRow::Buttons(vec![
                        CreateButton::new(CONFIRM_ID)
                            .label("Create Poll")
                            .style(ButtonStyle::Success),
                        CreateButton::new(EDIT_ID)
                            .label("Edit")
                            .style(ButtonStyle::Secondary),
                        CreateButton::new(CANCEL_ID)
                            .label("Cancel")
                            .style(ButtonStyle::Danger),
                    ])]),
            ),
        )
        .await?;

    Ok(())
}

/// Publishes the previewed poll and queues its finalization.
async fn confirm(
    ctx: &Context,
    state: &AppState,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let user_id = component.user.id.get();
    let form = state.forms.poll.try_get(user_id).ok_or_else(session_expired)?;
    let duration = form.duration.ok_or_else(session_expired)?;
    validate(&form.question, &form.answers)?;
    let guild_id = component
        .guild_id
        .ok_or_else(|| AppError::BadRequest("Polls can only be created in a server.".to_string()))?;

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content("⏳ Creating poll...")
                    .embeds(vec![])
                    .components(vec![]),
            ),
        )
        .await?;

    let draft = PollDraft {
        guild_id: guild_id.get(),
        channel_id: component.channel_id.get(),
        options: build_options(&form.answers, &form.emojis),
        question: form.question,
        due_time: due_in(duration)?,
        created_by: user_id,
    };
    let poll = PollService::new(&state.db, state.platform.as_ref())
        .publish(draft)
        .await?;
    state.forms.poll.clear(user_id);

    state
        .queue
        .enqueue(poll_task(state.deferred_context(), &poll))
        .await?;

    component
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(format!(
                "✅ Poll created. It ends <t:{}:R>.",
                poll.due_time.timestamp()
            )),
        )
        .await?;

    Ok(())
}

fn validate(question: &str, answers: &[String]) -> Result<(), AppError> {
    if question.is_empty() {
        return Err(AppError::BadRequest("The poll needs a question.".to_string()));
    }
    if !(MIN_POLL_OPTIONS..=MAX_POLL_OPTIONS).contains(&answers.len()) {
        return Err(AppError::BadRequest(format!(
            "You must provide {}–{} answers.",
            MIN_POLL_OPTIONS, MAX_POLL_OPTIONS
        )));
    }
    Ok(())
}

fn session_expired() -> AppError {
    AppError::BadRequest("Session expired. Please start over with /poll.".to_string())
}

fn poll_modal(form: &PollForm) -> CreateModal {
    CreateModal::new(MODAL_ID, "Create Your Poll").components(vec![
        CreateActionRow::InputText(
            text_input(
                InputTextStyle::Short,
                "Poll Question",
                "question",
                &form.question,
                true,
            )
            .placeholder("Are we raiding tonight?"),
        ),
        CreateActionRow::InputText(
            text_input(
                InputTextStyle::Paragraph,
                "Answers (one per line, 2–10)",
                "answers",
                &form.answers.join("\n"),
                true,
            )
            .placeholder("Yes definitely!\nNo way\nOnly if bribed"),
        ),
        CreateActionRow::InputText(
            text_input(
                InputTextStyle::Paragraph,
                "Custom Emojis (one per line, optional)",
                "emojis",
                &form.emojis.join("\n"),
                false,
            )
            .placeholder(":pepe:\n🤨\n:banhammer:"),
        ),
    ])
}
