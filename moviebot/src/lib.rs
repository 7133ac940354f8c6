pub mod commands;
pub mod config;
pub mod filters;
pub mod formatting;
pub mod handler;
pub mod recommendations;
pub mod store;
pub mod tmdb;

use serenity::prelude::TypeMapKey;
use std::sync::Arc;

use crate::{store::SavedListStore, tmdb::TmdbClient};

pub struct MovieDb;
impl TypeMapKey for MovieDb {
    type Value = Arc<TmdbClient>;
}

pub struct SavedLists;
impl TypeMapKey for SavedLists {
    type Value = Arc<dyn SavedListStore>;
}
