use moviebot_interactions::{register_commands, Commands};
use serenity::{
    async_trait,
    client::{Context, EventHandler},
    model::{application::interaction::Interaction, id::GuildId, prelude::Ready},
};
use tracing::{error, info, warn};

use crate::commands::{
    BotCommands, BotComponents, BotModals, ClearSavedCommand, RecommendCommand, SavedCommand,
};

pub struct Handler {
    /// Register commands to this guild instead of globally
    pub test_guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command_interaction) => {
                let command = match BotCommands::parse(&ctx, &command_interaction) {
                    Ok(command) => command,
                    Err(why) => {
                        warn!("Failed to parse command: {}", why);
                        return;
                    }
                };
                if let Err(why) = command.invoke(&ctx, &command_interaction).await {
                    error!(
                        command = %command_interaction.data.name,
                        user = %command_interaction.user.id,
                        "Failed to invoke command: {}",
                        why
                    );
                }
            }
            Interaction::MessageComponent(component_interaction) => {
                let component = match BotComponents::parse(&component_interaction) {
                    Ok(component) => component,
                    Err(why) => {
                        warn!("Failed to parse component interaction: {}", why);
                        return;
                    }
                };
                if let Err(why) = component.invoke(&ctx, &component_interaction).await {
                    error!(
                        custom_id = %component_interaction.data.custom_id,
                        user = %component_interaction.user.id,
                        "Failed to handle component interaction: {}",
                        why
                    );
                }
            }
            Interaction::ModalSubmit(modal_interaction) => {
                let modal = match BotModals::parse(&modal_interaction) {
                    Ok(modal) => modal,
                    Err(why) => {
                        warn!("Failed to parse modal submission: {}", why);
                        return;
                    }
                };
                if let Err(why) = modal.invoke(&ctx, &modal_interaction).await {
                    error!(
                        custom_id = %modal_interaction.data.custom_id,
                        user = %modal_interaction.user.id,
                        "Failed to handle modal submission: {}",
                        why
                    );
                }
            }
            _ => (),
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
        let commands = register_commands!(
            &ctx,
            self.test_guild_id,
            [RecommendCommand, SavedCommand, ClearSavedCommand]
        );
        match commands {
            Ok(commands) => info!(
                "Registered {} commands {}",
                commands.len(),
                match self.test_guild_id {
                    Some(id) => format!("for guild_id: {}", id),
                    None => "globally".to_owned(),
                },
            ),
            Err(why) => error!("Unable to register commands: {}", why),
        }
    }
}
