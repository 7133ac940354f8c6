use anyhow::{Context, Result};
use serenity::model::id::GuildId;
use std::{env, fmt, fs};

use crate::tmdb::{DEFAULT_API_URL, DEFAULT_IMAGE_URL, DEFAULT_REGION};

pub mod variables {
    //! The environment variables the bot reads at startup.

    pub const DISCORD_TOKEN: &str = "DISCORD_TOKEN";
    pub const DISCORD_USER_ID: &str = "DISCORD_USER_ID";
    /// Register commands to this guild only, which takes effect immediately
    pub const TEST_GUILD_ID: &str = "TEST_GUILD_ID";

    pub const TMDB_API_KEY: &str = "TMDB_API_KEY";
    pub const TMDB_API_URL: &str = "TMDB_API_URL";
    pub const TMDB_IMAGE_URL: &str = "TMDB_IMAGE_URL";
    pub const TMDB_REGION: &str = "TMDB_REGION";

    pub const LOG_FILTER: &str = "MOVIEBOT_LOG_FILTER";
}

use variables::*;

/// Retrieve an environment variable by name, falling back to reading the file whose path is in
/// `<name>_FILE`. Surrounding whitespace is trimmed either way.
pub fn get_env_var(name: &str) -> Result<String> {
    let value = match env::var(name) {
        Ok(value) => value,
        Err(e) => get_from_file(name).with_context(|| {
            format!(
                "Could not find a value for {} nor for {}_FILE. Original Error: {:?}",
                name, name, e
            )
        })?,
    };
    Ok(value.trim().to_owned())
}

fn get_from_file(name: &str) -> Result<String> {
    let path = env::var(format!("{}_FILE", name))?;
    Ok(fs::read_to_string(path)?)
}

#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    pub application_id: u64,
    pub test_guild_id: Option<GuildId>,
    pub tmdb_api_key: String,
    pub tmdb_api_url: String,
    pub tmdb_image_url: String,
    pub tmdb_region: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("discord_token", &"<redacted>")
            .field("application_id", &self.application_id)
            .field("test_guild_id", &self.test_guild_id)
            .field("tmdb_api_key", &"<redacted>")
            .field("tmdb_api_url", &self.tmdb_api_url)
            .field("tmdb_image_url", &self.tmdb_image_url)
            .field("tmdb_region", &self.tmdb_region)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(get_env_var)
    }

    /// Build the config from any variable source; `lookup` fails for unset variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Result<String>) -> Result<Self> {
        let application_id = lookup(DISCORD_USER_ID)?;
        let application_id = application_id
            .parse()
            .with_context(|| format!("Invalid {}: {:?}", DISCORD_USER_ID, application_id))?;
        let test_guild_id = match lookup(TEST_GUILD_ID) {
            Ok(id) => Some(GuildId(
                id.parse()
                    .with_context(|| format!("Invalid {}: {:?}", TEST_GUILD_ID, id))?,
            )),
            Err(_) => None,
        };
        Ok(Self {
            discord_token: lookup(DISCORD_TOKEN)?,
            application_id,
            test_guild_id,
            tmdb_api_key: lookup(TMDB_API_KEY)?,
            tmdb_api_url: lookup(TMDB_API_URL).unwrap_or_else(|_| DEFAULT_API_URL.to_owned()),
            tmdb_image_url: lookup(TMDB_IMAGE_URL)
                .unwrap_or_else(|_| DEFAULT_IMAGE_URL.to_owned()),
            tmdb_region: lookup(TMDB_REGION).unwrap_or_else(|_| DEFAULT_REGION.to_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned().ok_or_else(|| anyhow!("{} not set", name))
    }

    const REQUIRED: [(&str, &str); 3] = [
        (DISCORD_TOKEN, "secret-token"),
        (DISCORD_USER_ID, "1234"),
        (TMDB_API_KEY, "tmdb-key"),
    ];

    #[test]
    fn defaults_fill_optional_values() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.application_id, 1234);
        assert_eq!(config.test_guild_id, None);
        assert_eq!(config.tmdb_api_url, DEFAULT_API_URL);
        assert_eq!(config.tmdb_image_url, DEFAULT_IMAGE_URL);
        assert_eq!(config.tmdb_region, "US");
    }

    #[test]
    fn overrides_are_used() {
        let mut vars = REQUIRED.to_vec();
        vars.push((TEST_GUILD_ID, "42"));
        vars.push((TMDB_REGION, "GB"));
        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.test_guild_id, Some(GuildId(42)));
        assert_eq!(config.tmdb_region, "GB");
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let config = Config::from_lookup(lookup(&REQUIRED[..2]));
        assert!(config.is_err());
    }

    #[test]
    fn bad_guild_id_is_an_error() {
        let mut vars = REQUIRED.to_vec();
        vars.push((TEST_GUILD_ID, "general"));
        let error = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(error.to_string().contains(TEST_GUILD_ID));
    }

    #[test]
    fn debug_hides_secrets() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("tmdb-key"));
        assert!(!debug.contains("secret-token"));
    }
}
