use super::saved_lists;
use crate::formatting::{saved_confirmation, saved_list_message, title_from_embed};
use moviebot_interactions::{
    custom_id::CustomId, ApplicationCommandInteractionHandler, Command, Component, InvocationError,
    MessageComponentInteractionHandler, ParseError,
};
use serenity::{
    async_trait,
    builder::CreateApplicationCommand,
    client::Context,
    model::application::interaction::{
        application_command::ApplicationCommandInteraction,
        message_component::MessageComponentInteraction, InteractionResponseType,
    },
};
use tracing::info;

pub const SAVED_COMMAND_NAME: &str = "saved";
pub const SAVE_BUTTON_ROUTE: &str = "save_movie";

#[derive(Debug)]
pub struct SavedCommand;

impl Command for SavedCommand {
    fn parse(_command: &ApplicationCommandInteraction) -> Result<Self, ParseError> {
        Ok(Self)
    }

    fn register(command: &mut CreateApplicationCommand) -> &mut CreateApplicationCommand {
        command
            .name(SAVED_COMMAND_NAME)
            .description("📂 View your saved movies")
    }

    fn name() -> String {
        SAVED_COMMAND_NAME.to_owned()
    }
}

#[async_trait]
impl ApplicationCommandInteractionHandler for SavedCommand {
    async fn invoke(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<(), InvocationError> {
        let saved = saved_lists(ctx).await?.get(command.user.id).await;
        command
            .create_interaction_response(&ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message.content(saved_list_message(&saved)).ephemeral(true)
                    })
            })
            .await?;
        Ok(())
    }
}

/// The "Save for Later" button under a recommendation. The title comes from the embed the
/// button is attached to rather than the `custom_id`, which is too short to hold every title.
#[derive(Debug)]
pub struct SaveButtonComponent {
    movie_id: Option<u64>,
    title: String,
}

impl Component for SaveButtonComponent {
    fn parse(interaction: &MessageComponentInteraction) -> Result<Self, ParseError> {
        let title = interaction
            .message
            .embeds
            .first()
            .and_then(|embed| embed.title.as_deref())
            .map(title_from_embed)
            .ok_or(ParseError::MissingOption)?;
        let movie_id = CustomId::parse(&interaction.data.custom_id)
            .payload
            .and_then(|id| id.parse().ok());
        Ok(Self {
            movie_id,
            title: title.to_owned(),
        })
    }
}

#[async_trait]
impl MessageComponentInteractionHandler for SaveButtonComponent {
    async fn invoke(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<(), InvocationError> {
        saved_lists(ctx)
            .await?
            .append(interaction.user.id, self.title.clone())
            .await;
        info!(
            user = %interaction.user.id,
            movie_id = ?self.movie_id,
            title = %self.title,
            "Saved movie"
        );
        interaction
            .create_interaction_response(&ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message
                            .content(saved_confirmation(&self.title))
                            .ephemeral(true)
                    })
            })
            .await?;
        Ok(())
    }
}
