use anyhow::{Context, Result};
use dotenv::dotenv;
use moviebot::{
    config::{variables::LOG_FILTER, Config},
    handler::Handler,
    store::InMemoryStore,
    tmdb::TmdbClient,
    MovieDb, SavedLists,
};
use serenity::{prelude::GatewayIntents, Client};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // Read the filter from the environment, defaulting to info logs and above
    let filter = EnvFilter::try_from_env(LOG_FILTER).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    info!(?config, "Starting moviebot...");

    let tmdb = TmdbClient::new(config.tmdb_api_key.clone())
        .with_base_url(config.tmdb_api_url.clone())
        .with_image_base_url(config.tmdb_image_url.clone())
        .with_region(config.tmdb_region.clone());

    let mut client = Client::builder(&config.discord_token, GatewayIntents::empty())
        .event_handler(Handler {
            test_guild_id: config.test_guild_id,
        })
        .application_id(config.application_id)
        .await
        .context("Error creating client")?;

    {
        let mut data = client.data.write().await;
        data.insert::<MovieDb>(Arc::new(tmdb));
        data.insert::<SavedLists>(Arc::new(InMemoryStore::default()));
    }

    client.start().await.context("Client error")?;
    info!("Shutting moviebot down.");
    Ok(())
}
