use super::{movie_db, SAVE_BUTTON_ROUTE};
use crate::{
    filters::{
        DetailForm, DetailInput, FilterError, Filters, GenreSelection, GENRE_MENU_TIMEOUT_SECS,
    },
    formatting::{
        error_message, format_recommendation_embed, MENU_EXPIRED, NO_RESULTS, PICK_GENRE,
        SAVE_BUTTON_LABEL,
    },
    recommendations::recommend,
};
use chrono::Utc;
use moviebot_interactions::{
    custom_id::{self, CustomId},
    inputs::{selected_value, text_input},
    ApplicationCommandInteractionHandler, Command, Component, InvocationError,
    MessageComponentInteractionHandler, Modal, ModalSubmitInteractionHandler, ParseError,
};
use serenity::{
    async_trait,
    builder::{CreateApplicationCommand, CreateInputText},
    client::Context,
    model::application::{
        component::{ButtonStyle, InputTextStyle},
        interaction::{
            application_command::ApplicationCommandInteraction,
            message_component::MessageComponentInteraction, modal::ModalSubmitInteraction,
            InteractionResponseType,
        },
    },
};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const RECOMMEND_COMMAND_NAME: &str = "recommend";
pub const GENRE_MENU_ROUTE: &str = "recommend_genre";
pub const DETAIL_FORM_ROUTE: &str = "recommend_details";

const YEAR_RANGE_INPUT: &str = "year_range";
const RATING_INPUT: &str = "rating";
const LANGUAGE_INPUT: &str = "language";

#[derive(Debug)]
pub struct RecommendCommand;

impl Command for RecommendCommand {
    fn parse(_command: &ApplicationCommandInteraction) -> Result<Self, ParseError> {
        Ok(Self)
    }

    fn register(command: &mut CreateApplicationCommand) -> &mut CreateApplicationCommand {
        command
            .name(RECOMMEND_COMMAND_NAME)
            .description("🎯 Get movie recommendations!")
    }

    fn name() -> String {
        RECOMMEND_COMMAND_NAME.to_owned()
    }
}

#[async_trait]
impl ApplicationCommandInteractionHandler for RecommendCommand {
    async fn invoke(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<(), InvocationError> {
        command
            .create_interaction_response(&ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message
                            .content(PICK_GENRE)
                            .ephemeral(true)
                            .components(|components| {
                                components.create_action_row(|row| {
                                    row.create_select_menu(|menu| {
                                        menu.custom_id(GENRE_MENU_ROUTE)
                                            .placeholder("Pick a genre")
                                            .min_values(1)
                                            .max_values(1)
                                            .options(|options| {
                                                for genre in GenreSelection::options() {
                                                    options.create_option(|option| {
                                                        option.label(genre).value(genre)
                                                    });
                                                }
                                                options
                                            })
                                    })
                                })
                            })
                    })
            })
            .await?;

        // Once the menu expires, take it off the reply so it can't be used
        let http = ctx.http.clone();
        let command = command.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(GENRE_MENU_TIMEOUT_SECS as u64)).await;
            if let Err(why) = command
                .edit_original_interaction_response(&http, |response| {
                    response.components(|components| components)
                })
                .await
            {
                debug!("Could not remove expired genre menu: {}", why);
            }
        });
        Ok(())
    }
}

/// The user picked a genre from the menu sent by `/recommend`
#[derive(Debug)]
pub struct GenreMenuComponent {
    form: DetailForm,
}

impl Component for GenreMenuComponent {
    fn parse(interaction: &MessageComponentInteraction) -> Result<Self, ParseError> {
        let genre = selected_value(&interaction.data.values)?;
        let form = GenreSelection
            .select(genre)
            .map_err(|_| ParseError::InvalidOption)?;
        Ok(Self { form })
    }
}

fn detail_field<'a>(
    input: &'a mut CreateInputText,
    custom_id: &str,
    label: &str,
    placeholder: &str,
) -> &'a mut CreateInputText {
    input
        .custom_id(custom_id)
        .label(label)
        .placeholder(placeholder)
        .style(InputTextStyle::Short)
        .required(true)
}

#[async_trait]
impl MessageComponentInteractionHandler for GenreMenuComponent {
    async fn invoke(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<(), InvocationError> {
        let opened_at = interaction.message.timestamp.unix_timestamp();
        if GenreSelection::is_expired(opened_at, Utc::now().timestamp()) {
            interaction
                .create_interaction_response(&ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|message| {
                            message.content(MENU_EXPIRED).ephemeral(true)
                        })
                })
                .await?;
            return Ok(());
        }

        interaction
            .create_interaction_response(&ctx.http, |response| {
                response
                    .kind(InteractionResponseType::Modal)
                    .interaction_response_data(|modal| {
                        modal
                            .custom_id(custom_id::encode(DETAIL_FORM_ROUTE, self.form.genre()))
                            .title("🎬 Movie Preferences")
                            .components(|components| {
                                components
                                    .create_action_row(|row| {
                                        row.create_input_text(|input| {
                                            detail_field(
                                                input,
                                                YEAR_RANGE_INPUT,
                                                "Year Range",
                                                "e.g. 2010-2022",
                                            )
                                        })
                                    })
                                    .create_action_row(|row| {
                                        row.create_input_text(|input| {
                                            detail_field(input, RATING_INPUT, "Min Rating", "e.g. 7.0")
                                        })
                                    })
                                    .create_action_row(|row| {
                                        row.create_input_text(|input| {
                                            detail_field(
                                                input,
                                                LANGUAGE_INPUT,
                                                "Language",
                                                "e.g. English",
                                            )
                                        })
                                    })
                            })
                    })
            })
            .await?;
        Ok(())
    }
}

/// The detail form was submitted. The filters are parsed up front so a typo is answered
/// privately before anything is sent to the channel.
#[derive(Debug)]
pub struct DetailFormModal {
    submission: Result<Filters, FilterError>,
}

impl Modal for DetailFormModal {
    fn parse(interaction: &ModalSubmitInteraction) -> Result<Self, ParseError> {
        let genre = CustomId::parse(&interaction.data.custom_id)
            .payload
            .ok_or(ParseError::MissingOption)?;
        let form = GenreSelection
            .select(genre)
            .map_err(|_| ParseError::InvalidOption)?;
        let rows = &interaction.data.components;
        let input = DetailInput {
            year_range: text_input(rows, YEAR_RANGE_INPUT)?,
            rating: text_input(rows, RATING_INPUT)?,
            language: text_input(rows, LANGUAGE_INPUT)?,
        };
        Ok(Self {
            submission: form.submit(&input),
        })
    }
}

#[async_trait]
impl ModalSubmitInteractionHandler for DetailFormModal {
    async fn invoke(
        &self,
        ctx: &Context,
        interaction: &ModalSubmitInteraction,
    ) -> Result<(), InvocationError> {
        let filters = match &self.submission {
            Ok(filters) => filters,
            Err(why) => {
                debug!(user = %interaction.user.id, "Rejected detail form: {}", why);
                interaction
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content(error_message(why)).ephemeral(true)
                            })
                    })
                    .await?;
                return Ok(());
            }
        };

        interaction
            .create_interaction_response(&ctx.http, |response| {
                response.kind(InteractionResponseType::DeferredChannelMessageWithSource)
            })
            .await?;

        let tmdb = movie_db(ctx).await?;
        let recommendations = match recommend(tmdb.as_ref(), filters).await {
            Ok(recommendations) => recommendations,
            Err(why) => {
                warn!("Recommendation lookup failed: {}", why);
                Vec::new()
            }
        };
        info!(
            user = %interaction.user.id,
            genre = %filters.genre,
            count = recommendations.len(),
            "Sending recommendations"
        );

        if recommendations.is_empty() {
            // The first follow-up takes over the public placeholder, so drop it to stay ephemeral
            interaction.delete_original_interaction_response(&ctx.http).await?;
            interaction
                .create_followup_message(&ctx.http, |followup| {
                    followup.content(NO_RESULTS).ephemeral(true)
                })
                .await?;
            return Ok(());
        }

        for recommendation in &recommendations {
            let poster_url = recommendation
                .movie
                .poster_path
                .as_deref()
                .map(|path| tmdb.poster_url(path));
            interaction
                .create_followup_message(&ctx.http, |followup| {
                    followup
                        .embed(|embed| {
                            format_recommendation_embed(
                                recommendation,
                                filters.language,
                                poster_url,
                                embed,
                            )
                        })
                        .components(|components| {
                            components.create_action_row(|row| {
                                row.create_button(|button| {
                                    button
                                        .custom_id(custom_id::encode(
                                            SAVE_BUTTON_ROUTE,
                                            recommendation.movie.id,
                                        ))
                                        .label(SAVE_BUTTON_LABEL)
                                        .style(ButtonStyle::Success)
                                })
                            })
                        })
                })
                .await?;
        }
        Ok(())
    }
}
