//! `/giveaway` wizard: duration select, prize modal, preview, publish.

use serenity::all::{
    ButtonStyle, CommandInteraction, ComponentInteraction, Context, CreateActionRow, CreateButton,
    CreateCommand, CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage,
    CreateModal, EditInteractionResponse, InputTextStyle, ModalInteraction, Permissions,
};

use crate::{
    bot::command::{
        due_in, duration_menu, modal_values, resolve_emoji_names, selected_duration, text_input,
    },
    error::AppError,
    platform::discord::parse_reaction,
    service::giveaway::{
        giveaway_task, live_embed, GiveawayDraft, GiveawayService, DEFAULT_GIVEAWAY_EMOJI,
    },
    state::{form::GiveawayForm, AppState},
    util::duration::format_duration_words,
};

pub const PREFIX: &str = "giveaway_";

const DURATION_ID: &str = "giveaway_duration";
const CONTINUE_ID: &str = "giveaway_continue";
const MODAL_ID: &str = "giveaway_modal";
const CONFIRM_ID: &str = "giveaway_confirm";
const EDIT_ID: &str = "giveaway_edit";
const CANCEL_ID: &str = "giveaway_cancel";

/// Upper bound on winners per giveaway.
const MAX_WINNERS: usize = 50;

pub fn register() -> CreateCommand {
    CreateCommand::new("giveaway")
        .description("Start a giveaway where users enter by reacting")
        .default_member_permissions(Permissions::MANAGE_MESSAGES)
}

pub async fn run(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    if command.guild_id.is_none() {
        return Err(AppError::BadRequest(
            "Giveaways can only be created in a server.".to_string(),
        ));
    }

    state.forms.giveaway.reset(command.user.id.get());

    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content("First, select the duration of your giveaway:")
                    .components(vec![CreateActionRow::SelectMenu(duration_menu(
                        DURATION_ID,
                        "How long should the giveaway last?",
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
                .giveaway
                .update(user_id, |form| form.duration = Some(duration));

            component
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::UpdateMessage(
                        CreateInteractionResponseMessage::new()
                            .content(format!(
                                "Duration set to {}.\nClick Continue to set up your giveaway.",
                                format_duration_words(duration)
                            ))
                            .components(vec![CreateActionRow::Buttons(vec![CreateButton::new(
                                CONTINUE_ID,
                            )
                            .label("Continue →")
                            .style(ButtonStyle::Primary)])]),
                    ),
                )
                .await?;
        }
        CONTINUE_ID | EDIT_ID => {
            let form = state.forms.giveaway.get_or_create(user_id);
            component
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::Modal(giveaway_modal(&form)),
                )
                .await?;
        }
        CONFIRM_ID => confirm(ctx, state, component).await?,
        CANCEL_ID => {
            state.forms.giveaway.clear(user_id);
            component
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::UpdateMessage(
                        CreateInteractionResponseMessage::new()
                            .content("Giveaway creation cancelled.")
                            .embeds(vec![])
                            .components(vec![]),
                    ),
                )
                .await?;
        }
        other => tracing::warn!("Unknown giveaway component '{}'", other),
    }

    Ok(())
}

pub async fn handle_modal(
    ctx: &Context,
    state: &AppState,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    if modal.data.custom_id != MODAL_ID {
        tracing::warn!("Unknown giveaway modal '{}'", modal.data.custom_id);
        return Ok(());
    }

    let values = modal_values(modal);
    let prize = values
        .get("prize")
        .map(|p| p.trim().to_string())
        .unwrap_or_default();
    if prize.is_empty() {
        return Err(AppError::BadRequest("The giveaway needs a prize.".to_string()));
    }
    let winner_count = parse_winner_count(values.get("winners").map(String::as_str).unwrap_or("1"))?;

    let typed_emoji = values
        .get("reaction_emoji")
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| DEFAULT_GIVEAWAY_EMOJI.to_string());
    let reaction_emoji = resolve_emoji_names(ctx, modal.guild_id, vec![typed_emoji])
        .await
        .into_iter()
        .next()
        .unwrap_or_else(|| DEFAULT_GIVEAWAY_EMOJI.to_string());
    parse_reaction(&reaction_emoji)?;

    let form = state.forms.giveaway.update(modal.user.id.get(), |form| {
        form.prize = prize;
        form.winner_count = winner_count;
        form.reaction_emoji = reaction_emoji;
    });
    let duration = form.duration.ok_or_else(session_expired)?;

    let mut preview = live_embed(
        &form.prize,
        &form.reaction_emoji,
        form.winner_count,
        due_in(duration)?,
    );
    preview.title = "🎁 Giveaway (Preview)".to_string();

    modal
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content("Does this look good?")
                    .embed(CreateEmbed::from(preview))
                    .components(vec![CreateActionRow::Buttons(vec![
                        CreateButton::new(CONFIRM_ID)
                            .label("Create Giveaway")
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

async fn confirm(
    ctx: &Context,
    state: &AppState,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let user_id = component.user.id.get();
    let form = state
        .forms
        .giveaway
        .try_get(user_id)
        .filter(|form| !form.prize.is_empty())
        .ok_or_else(session_expired)?;
    let duration = form.duration.ok_or_else(session_expired)?;
    let guild_id = component.guild_id.ok_or_else(|| {
        AppError::BadRequest("Giveaways can only be created in a server.".to_string())
    })?;

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content("⏳ Creating giveaway...")
                    .embeds(vec![])
                    .components(vec![]),
            ),
        )
        .await?;

    let giveaway = GiveawayService::new(&state.db, state.platform.as_ref())
        .publish(GiveawayDraft {
            guild_id: guild_id.get(),
            channel_id: component.channel_id.get(),
            prize: form.prize,
            winner_count: form.winner_count,
            reaction_emoji: form.reaction_emoji,
            due_time: due_in(duration)?,
            created_by: user_id,
        })
        .await?;
    state.forms.giveaway.clear(user_id);

    state
        .queue
        .enqueue(giveaway_task(state.deferred_context(), &giveaway))
        .await?;

    component
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(format!(
                "✅ Giveaway created. It ends <t:{}:R>.",
                giveaway.due_time.timestamp()
            )),
        )
        .await?;

    Ok(())
}

/// Parses the winner count typed in the modal.
///
/// # Returns
/// - `Ok(usize)` - A count from 1 to `MAX_WINNERS`
/// - `Err(AppError::BadRequest)` - Not a number or out of range
fn parse_winner_count(text: &str) -> Result<usize, AppError> {
    match text.trim().parse::<usize>() {
        Ok(count) if (1..=MAX_WINNERS).contains(&count) => Ok(count),
        _ => Err(AppError::BadRequest(format!(
            "Winner count must be a number from 1 to {}.",
            MAX_WINNERS
        ))),
    }
}

fn session_expired() -> AppError {
    AppError::BadRequest("Session expired. Please start over with /giveaway.".to_string())
}

fn giveaway_modal(form: &GiveawayForm) -> CreateModal {
    let winners = if form.winner_count == 0 {
        "1".to_string()
    } else {
        form.winner_count.to_string()
    };
    let emoji = if form.reaction_emoji.is_empty() {
        DEFAULT_GIVEAWAY_EMOJI
    } else {
        form.reaction_emoji.as_str()
    };

    CreateModal::new(MODAL_ID, "Create Your Giveaway").components(vec![
        CreateActionRow::InputText(
            text_input(InputTextStyle::Short, "What's the prize", "prize", &form.prize, true)
                .placeholder("The key to my heart"),
        ),
        CreateActionRow::InputText(text_input(
            InputTextStyle::Short,
            "How many can win",
            "winners",
            &winners,
            true,
        )),
        CreateActionRow::InputText(text_input(
            InputTextStyle::Short,
            "Reaction emoji",
            "reaction_emoji",
            emoji,
            true,
        )),
    ])
}
