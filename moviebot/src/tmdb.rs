//! Client for the two TMDB endpoints the bot uses: movie discovery and watch providers.
//!
//! Both calls are plain GETs authenticated with the `api_key` query parameter. Neither has a
//! timeout or retry, and failures degrade to "no data".

use std::{collections::HashMap, fmt};

use reqwest::StatusCode;
use serde::Deserialize;
use serenity::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::filters::Filters;

pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_REGION: &str = "US";

/// Only the top of the first results page is ever shown
pub const MAX_RESULTS: usize = 5;
const MIN_VOTE_COUNT: u32 = 50;
const SORT_BY: &str = "vote_average.desc";

const DISCOVER_ENDPOINT: &str = "discover";
const PROVIDERS_ENDPOINT: &str = "watch providers";

/// A movie as returned by the discover endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DiscoverResponse {
    #[serde(default)]
    results: Vec<Movie>,
}

#[derive(Debug, Deserialize)]
struct WatchProvidersResponse {
    #[serde(default)]
    results: HashMap<String, RegionProviders>,
}

#[derive(Debug, Default, Deserialize)]
struct RegionProviders {
    #[serde(default)]
    flatrate: Vec<Provider>,
}

#[derive(Debug, Deserialize)]
struct Provider {
    provider_name: String,
}

/// Where a movie can be streamed on a subscription service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamingInfo {
    Available(Vec<String>),
    NotAvailable,
    LookupFailed,
}

impl fmt::Display for StreamingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamingInfo::Available(providers) => write!(f, "{}", providers.join(", ")),
            StreamingInfo::NotAvailable => write!(f, "Not available"),
            StreamingInfo::LookupFailed => write!(f, "❌ No info"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("{endpoint} request failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} request returned {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },
}

/// The movie lookups the recommendation pipeline needs
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// Discover up to [`MAX_RESULTS`] movies matching the filters, best rated first
    async fn try_discover(&self, filters: &Filters) -> Result<Vec<Movie>, TmdbError>;

    /// Which subscription services stream the movie
    async fn get_providers(&self, movie_id: u64) -> StreamingInfo;

    /// Like [`MovieApi::try_discover`], but a failed lookup is just an empty result
    async fn discover(&self, filters: &Filters) -> Vec<Movie> {
        match self.try_discover(filters).await {
            Ok(movies) => movies,
            Err(why) => {
                warn!("Movie discovery failed: {}", why);
                Vec::new()
            }
        }
    }
}

#[derive(Clone)]
pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
    region: String,
}

impl fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .field("image_base_url", &self.image_base_url)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_API_URL.to_owned(),
            image_base_url: DEFAULT_IMAGE_URL.to_owned(),
            region: DEFAULT_REGION.to_owned(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_image_base_url(mut self, image_base_url: impl Into<String>) -> Self {
        self.image_base_url = image_base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// The country whose streaming catalogue is reported, e.g. `US`
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn poster_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.image_base_url, poster_path)
    }

    fn discover_query(&self, filters: &Filters) -> Vec<(&'static str, String)> {
        let without_genres = filters
            .genre
            .excluded_genres()
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        vec![
            ("api_key", self.api_key.clone()),
            ("with_genres", filters.genre.tmdb_id().to_string()),
            ("without_genres", without_genres),
            ("sort_by", SORT_BY.to_owned()),
            ("vote_count.gte", MIN_VOTE_COUNT.to_string()),
            ("vote_average.gte", filters.min_rating.to_string()),
            (
                "primary_release_date.gte",
                format!("{}-01-01", filters.year_from),
            ),
            (
                "primary_release_date.lte",
                format!("{}-12-31", filters.year_to),
            ),
            ("language", filters.language.code().to_owned()),
            ("page", "1".to_owned()),
        ]
    }

    async fn try_get_providers(&self, movie_id: u64) -> Result<Vec<String>, TmdbError> {
        let request_failed = |source| TmdbError::Request {
            endpoint: PROVIDERS_ENDPOINT,
            source,
        };
        let response = self
            .client
            .get(format!("{}/movie/{}/watch/providers", self.base_url, movie_id))
            .query(&[("api_key", &self.api_key)])
            .send()
            .await
            .map_err(request_failed)?;
        if !response.status().is_success() {
            return Err(TmdbError::Status {
                endpoint: PROVIDERS_ENDPOINT,
                status: response.status(),
            });
        }
        let mut providers = response
            .json::<WatchProvidersResponse>()
            .await
            .map_err(request_failed)?;
        Ok(providers
            .results
            .remove(&self.region)
            .unwrap_or_default()
            .flatrate
            .into_iter()
            .map(|provider| provider.provider_name)
            .collect())
    }
}

#[async_trait]
impl MovieApi for TmdbClient {
    async fn try_discover(&self, filters: &Filters) -> Result<Vec<Movie>, TmdbError> {
        let request_failed = |source| TmdbError::Request {
            endpoint: DISCOVER_ENDPOINT,
            source,
        };
        let response = self
            .client
            .get(format!("{}/discover/movie", self.base_url))
            .query(&self.discover_query(filters))
            .send()
            .await
            .map_err(request_failed)?;
        if !response.status().is_success() {
            return Err(TmdbError::Status {
                endpoint: DISCOVER_ENDPOINT,
                status: response.status(),
            });
        }
        let mut movies = response
            .json::<DiscoverResponse>()
            .await
            .map_err(request_failed)?
            .results;
        movies.truncate(MAX_RESULTS);
        debug!(count = movies.len(), genre = %filters.genre, "Discovered movies");
        Ok(movies)
    }

    async fn get_providers(&self, movie_id: u64) -> StreamingInfo {
        match self.try_get_providers(movie_id).await {
            Ok(providers) if providers.is_empty() => StreamingInfo::NotAvailable,
            Ok(providers) => StreamingInfo::Available(providers),
            Err(why) => {
                warn!(movie_id, "Streaming provider lookup failed: {}", why);
                StreamingInfo::LookupFailed
            }
        }
    }
}
