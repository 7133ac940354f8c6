//! Interaction plumbing for moviebot
//!
//! A bot conversation in Discord is a chain of interactions: a slash command, then possibly a
//! select menu or button press on the reply, then possibly a modal submission. Each link of the
//! chain gets a type here:
//!
//! - slash commands implement [`Command`] and [`ApplicationCommandInteractionHandler`]
//! - select menus and buttons implement [`Component`] and [`MessageComponentInteractionHandler`]
//! - modals implement [`Modal`] and [`ModalSubmitInteractionHandler`]
//!
//! Components and modals are matched back to their handler through the `custom_id` they were
//! created with, which can also carry a small payload forward to the next step (see
//! [`custom_id`]).
//!
//! Make sure to read the [Discord documentation](https://discord.com/developers/docs/interactions/receiving-and-responding)
//! on interactions to understand the general concepts.

#![warn(missing_docs)]
use serenity::{
    async_trait,
    builder::CreateApplicationCommand,
    client::Context,
    model::application::interaction::{
        application_command::ApplicationCommandInteraction,
        message_component::MessageComponentInteraction, modal::ModalSubmitInteraction,
    },
};

pub use serenity;

/// Encoding of routes and payloads into component `custom_id`s
pub mod custom_id;

/// Reading user input back out of interactions
pub mod inputs;

/// An error that occured while trying to parse an interaction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A required option or input was missing
    #[error("a required option was missing")]
    MissingOption,
    /// An option or input was malformed
    #[error("an option was malformed")]
    InvalidOption,
    /// The command was not one we know about
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    /// The component or modal `custom_id` was not one we know about
    #[error("unknown component {0:?}")]
    UnknownComponent(String),
}

/// An error that occured while trying to respond to an interaction
#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    /// Discord rejected or failed a request
    #[error("discord request failed: {0}")]
    Discord(#[from] serenity::Error),
    /// Shared state that should have been inserted at startup is missing
    #[error("{0} is missing from the client data")]
    MissingData(&'static str),
}

/// This trait provides the methods needed to parse and register a slash command.
pub trait Command: ApplicationCommandInteractionHandler + Sized {
    /// Try to parse the interaction as this type of command
    fn parse(command: &ApplicationCommandInteraction) -> Result<Self, ParseError>;
    /// Register this command so that it can be used
    fn register(command: &mut CreateApplicationCommand) -> &mut CreateApplicationCommand;
    /// The name of the command
    fn name() -> String;
}

/// This trait provides a function to receive and respond to slash command interactions.
///
/// Typically you will want to respond using [`create_interaction_response`] - see the [`serenity`]
/// docs for more info.
///
/// [`create_interaction_response`]: serenity::model::application::interaction::application_command::ApplicationCommandInteraction::create_interaction_response
#[async_trait]
pub trait ApplicationCommandInteractionHandler {
    /// Invoke the command
    async fn invoke(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<(), InvocationError>;
}

/// This trait provides the method needed to parse a message component (button or select menu)
/// interaction into a handler.
///
/// The component was created by an earlier step with a `custom_id`; any state the earlier step
/// wants to hand over must travel in that id or in the message the component is attached to.
pub trait Component: MessageComponentInteractionHandler + Sized {
    /// Try to parse the interaction as this component
    fn parse(interaction: &MessageComponentInteraction) -> Result<Self, ParseError>;
}

/// This trait provides a function to receive and respond to message component interactions.
#[async_trait]
pub trait MessageComponentInteractionHandler {
    /// Handle the message component interaction
    async fn invoke(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<(), InvocationError>;
}

/// This trait provides the method needed to parse a modal submission into a handler.
pub trait Modal: ModalSubmitInteractionHandler + Sized {
    /// Try to parse the submission as this modal
    fn parse(interaction: &ModalSubmitInteraction) -> Result<Self, ParseError>;
}

/// This trait provides a function to receive and respond to modal submissions.
#[async_trait]
pub trait ModalSubmitInteractionHandler {
    /// Handle the modal submission
    async fn invoke(
        &self,
        ctx: &Context,
        interaction: &ModalSubmitInteraction,
    ) -> Result<(), InvocationError>;
}

/// This trait should be implemented for an enum with a variant for each command.
/// It is responsible for:
/// - Parsing an interaction into a specific command based on the command name
/// - Delegating the invocation of a command to the specific enum variant
#[async_trait]
pub trait Commands: Sized {
    /// Parse an interaction into a specific command
    fn parse(ctx: &Context, command: &ApplicationCommandInteraction) -> Result<Self, ParseError>;

    /// Invoke the command
    async fn invoke(
        &self,
        ctx: &Context,
        command_interaction: &ApplicationCommandInteraction,
    ) -> Result<(), InvocationError>;
}

/// Register a set of commands (either globally or to a specific guild)
///
/// Note: register each [`Command`] here rather than the [`Commands`] enum. This gives you the
/// flexibility to have some commands registered globally and others registered only in specific
/// guilds.
///
/// ```ignore
/// // Register to a single guild while testing
/// register_commands!(&ctx, Some(GuildId(0)), [RecommendCommand, SavedCommand]);
///
/// // Register globally
/// register_commands!(&ctx, None, [RecommendCommand, SavedCommand]);
/// ```
#[macro_export]
macro_rules! register_commands {
    ($ctx:expr, $guild_id:expr, [$($cmdType:ty),+]) => {{
        if let Some(guild_id) = $guild_id {
            $crate::serenity::model::id::GuildId::set_application_commands(&guild_id, &$ctx.http, |commands_builder| {
                commands_builder
                $(
                    .create_application_command(|command| <$cmdType as $crate::Command>::register(command))
                )*
            })
            .await
        } else {
            $crate::serenity::model::application::command::Command::set_global_application_commands(&$ctx.http, |commands_builder| {
                commands_builder
                $(
                    .create_application_command(|command| <$cmdType as $crate::Command>::register(command))
                )*
            })
            .await
        }
    }};
}
