use super::saved_lists;
use crate::formatting::{NOTHING_TO_CLEAR, SAVED_LIST_CLEARED};
use moviebot_interactions::{
    ApplicationCommandInteractionHandler, Command, InvocationError, ParseError,
};
use serenity::{
    async_trait,
    builder::CreateApplicationCommand,
    client::Context,
    model::application::interaction::{
        application_command::ApplicationCommandInteraction, InteractionResponseType,
    },
};
use tracing::info;

pub const CLEAR_SAVED_COMMAND_NAME: &str = "clear_saved";

#[derive(Debug)]
pub struct ClearSavedCommand;

impl Command for ClearSavedCommand {
    fn parse(_command: &ApplicationCommandInteraction) -> Result<Self, ParseError> {
        Ok(Self)
    }

    fn register(command: &mut CreateApplicationCommand) -> &mut CreateApplicationCommand {
        command
            .name(CLEAR_SAVED_COMMAND_NAME)
            .description("🗑️ Clear your saved movie list")
    }

    fn name() -> String {
        CLEAR_SAVED_COMMAND_NAME.to_owned()
    }
}

#[async_trait]
impl ApplicationCommandInteractionHandler for ClearSavedCommand {
    async fn invoke(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<(), InvocationError> {
        let cleared = saved_lists(ctx).await?.clear(command.user.id).await;
        if cleared {
            info!(user = %command.user.id, "Cleared saved list");
        }
        command
            .create_interaction_response(&ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message
                            .content(if cleared {
                                SAVED_LIST_CLEARED
                            } else {
                                NOTHING_TO_CLEAR
                            })
                            .ephemeral(true)
                    })
            })
            .await?;
        Ok(())
    }
}
