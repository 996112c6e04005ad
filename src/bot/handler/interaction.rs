//! Routes interactions to the command modules.
//!
//! Handlers return `AppError`. User-facing errors (`BadRequest`, `NotFound`) are shown
//! to the user ephemerally; everything else is logged and answered with a generic note.

use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, Http, Interaction,
    ModalInteraction,
};

use crate::{
    bot::command::{giveaway, myreminders, poll, remind, support},
    error::AppError,
    state::AppState,
};

const GENERIC_FAILURE: &str = "❌ Something went wrong. Please try again later.";

/// The interaction an error reply is sent to.
enum Origin<'a> {
    Command(&'a CommandInteraction),
    Component(&'a ComponentInteraction),
    Modal(&'a ModalInteraction),
}

impl Origin<'_> {
    /// Replies ephemerally, as a follow-up when the interaction was already answered.
    async fn reply(&self, http: &Http, content: &str) -> Result<(), serenity::Error> {
        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(content)
                .ephemeral(true),
        );
        let followup = CreateInteractionResponseFollowup::new()
            .content(content)
            .ephemeral(true);

        let first = match self {
            Origin::Command(i) => i.create_response(http, response).await,
            Origin::Component(i) => i.create_response(http, response).await,
            Origin::Modal(i) => i.create_response(http, response).await,
        };
        if first.is_ok() {
            return Ok(());
        }

        match self {
            Origin::Command(i) => i.create_followup(http, followup).await.map(|_| ()),
            Origin::Component(i) => i.create_followup(http, followup).await.map(|_| ()),
            Origin::Modal(i) => i.create_followup(http, followup).await.map(|_| ()),
        }
    }
}

pub async fn handle_interaction(state: &AppState, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => {
            let name = command.data.name.clone();
            tracing::debug!("/{} used by {}", name, command.user.id);

            let result = match name.as_str() {
                "remind" => remind::run(&ctx, state, &command).await,
                "myreminders" => myreminders::run(&ctx, state, &command).await,
                "poll" => poll::run(&ctx, state, &command).await,
                "giveaway" => giveaway::run(&ctx, state, &command).await,
                "support" => support::run(&ctx, state, &command).await,
                other => {
                    tracing::warn!("Unknown command /{}", other);
                    Ok(())
                }
            };
            report(&ctx, &format!("/{}", name), Origin::Command(&command), result).await;
        }
        Interaction::Component(component) => {
            let custom_id = component.data.custom_id.clone();

            let result = if custom_id.starts_with(poll::PREFIX) {
                poll::handle_component(&ctx, state, &component).await
            } else if custom_id.starts_with(giveaway::PREFIX) {
                giveaway::handle_component(&ctx, state, &component).await
            } else if custom_id.starts_with(support::PREFIX) {
                support::handle_component(&ctx, state, &component).await
            } else {
                tracing::warn!("Unrouted component '{}'", custom_id);
                Ok(())
            };
            report(&ctx, &custom_id, Origin::Component(&component), result).await;
        }
        Interaction::Modal(modal) => {
            let custom_id = modal.data.custom_id.clone();

            let result = if custom_id.starts_with(poll::PREFIX) {
                poll::handle_modal(&ctx, state, &modal).await
            } else if custom_id.starts_with(giveaway::PREFIX) {
                giveaway::handle_modal(&ctx, state, &modal).await
            } else if custom_id.starts_with(support::PREFIX) {
                support::handle_modal(&ctx, state, &modal).await
            } else {
                tracing::warn!("Unrouted modal '{}'", custom_id);
                Ok(())
            };
            report(&ctx, &custom_id, Origin::Modal(&modal), result).await;
        }
        _ => {}
    }
}

async fn report(ctx: &Context, source: &str, origin: Origin<'_>, result: Result<(), AppError>) {
    let Err(err) = result else {
        return;
    };

    let content = match &err {
        AppError::BadRequest(message) | AppError::NotFound(message) => {
            tracing::debug!("{} rejected: {}", source, message);
            format!("❌ {}", message)
        }
        _ => {
            tracing::error!("{} failed: {}", source, err);
            GENERIC_FAILURE.to_string()
        }
    };

    if let Err(e) = origin.reply(&ctx.http, &content).await {
        tracing::error!("Failed to report error for {}: {}", source, e);
    }
}
