use moviebot_interactions::{
    custom_id::CustomId, ApplicationCommandInteractionHandler, Command, Commands, Component,
    InvocationError, MessageComponentInteractionHandler, Modal, ModalSubmitInteractionHandler,
    ParseError,
};
use serenity::{
    async_trait,
    client::Context,
    model::application::interaction::{
        application_command::ApplicationCommandInteraction,
        message_component::MessageComponentInteraction, modal::ModalSubmitInteraction,
    },
};
use std::sync::Arc;

use crate::{store::SavedListStore, tmdb::TmdbClient, MovieDb, SavedLists};

pub use self::{
    clear_saved::{ClearSavedCommand, CLEAR_SAVED_COMMAND_NAME},
    recommend::{
        DetailFormModal, GenreMenuComponent, RecommendCommand, DETAIL_FORM_ROUTE,
        GENRE_MENU_ROUTE, RECOMMEND_COMMAND_NAME,
    },
    saved::{SaveButtonComponent, SavedCommand, SAVED_COMMAND_NAME, SAVE_BUTTON_ROUTE},
};

mod clear_saved;
mod recommend;
mod saved;

#[derive(Debug)]
pub enum BotCommands {
    Recommend(RecommendCommand),
    Saved(SavedCommand),
    ClearSaved(ClearSavedCommand),
}

#[async_trait]
impl Commands for BotCommands {
    fn parse(_ctx: &Context, command: &ApplicationCommandInteraction) -> Result<Self, ParseError> {
        match command.data.name.as_ref() {
            RECOMMEND_COMMAND_NAME => Ok(Self::Recommend(RecommendCommand::parse(command)?)),
            SAVED_COMMAND_NAME => Ok(Self::Saved(SavedCommand::parse(command)?)),
            CLEAR_SAVED_COMMAND_NAME => Ok(Self::ClearSaved(ClearSavedCommand::parse(command)?)),
            other => Err(ParseError::UnknownCommand(other.to_owned())),
        }
    }

    async fn invoke(
        &self,
        ctx: &Context,
        command_interaction: &ApplicationCommandInteraction,
    ) -> Result<(), InvocationError> {
        match self {
            Self::Recommend(command) => command.invoke(ctx, command_interaction).await,
            Self::Saved(command) => command.invoke(ctx, command_interaction).await,
            Self::ClearSaved(command) => command.invoke(ctx, command_interaction).await,
        }
    }
}

/// Buttons and select menus, routed by the route part of their `custom_id`
#[derive(Debug)]
pub enum BotComponents {
    GenreMenu(GenreMenuComponent),
    SaveButton(SaveButtonComponent),
}

impl BotComponents {
    pub fn parse(interaction: &MessageComponentInteraction) -> Result<Self, ParseError> {
        match CustomId::parse(&interaction.data.custom_id).route {
            GENRE_MENU_ROUTE => Ok(Self::GenreMenu(GenreMenuComponent::parse(interaction)?)),
            SAVE_BUTTON_ROUTE => Ok(Self::SaveButton(SaveButtonComponent::parse(interaction)?)),
            _ => Err(ParseError::UnknownComponent(
                interaction.data.custom_id.clone(),
            )),
        }
    }

    pub async fn invoke(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<(), InvocationError> {
        match self {
            Self::GenreMenu(component) => component.invoke(ctx, interaction).await,
            Self::SaveButton(component) => component.invoke(ctx, interaction).await,
        }
    }
}

#[derive(Debug)]
pub enum BotModals {
    DetailForm(DetailFormModal),
}

impl BotModals {
    pub fn parse(interaction: &ModalSubmitInteraction) -> Result<Self, ParseError> {
        match CustomId::parse(&interaction.data.custom_id).route {
            DETAIL_FORM_ROUTE => Ok(Self::DetailForm(DetailFormModal::parse(interaction)?)),
            _ => Err(ParseError::UnknownComponent(
                interaction.data.custom_id.clone(),
            )),
        }
    }

    pub async fn invoke(
        &self,
        ctx: &Context,
        interaction: &ModalSubmitInteraction,
    ) -> Result<(), InvocationError> {
        match self {
            Self::DetailForm(modal) => modal.invoke(ctx, interaction).await,
        }
    }
}

async fn movie_db(ctx: &Context) -> Result<Arc<TmdbClient>, InvocationError> {
    let data = ctx.data.read().await;
    data.get::<MovieDb>()
        .cloned()
        .ok_or(InvocationError::MissingData("MovieDb"))
}

async fn saved_lists(ctx: &Context) -> Result<Arc<dyn SavedListStore>, InvocationError> {
    let data = ctx.data.read().await;
    data.get::<SavedLists>()
        .cloned()
        .ok_or(InvocationError::MissingData("SavedLists"))
}
