//! Process configuration read once from the environment

use std::time::Duration;

use crate::error::{Error, Result};

/// WooCommerce refuses `per_page` values above this
pub const MAX_PER_PAGE: u32 = 100;

/// Default interchange file for export and import
pub const DEFAULT_CSV_FILE: &str = "product_images.csv";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_API_VERSION: &str = "wc/v3";

pub const ENV_URL: &str = "WC_URL";
pub const ENV_CONSUMER_KEY: &str = "WC_CONSUMER_KEY";
pub const ENV_CONSUMER_SECRET: &str = "WC_CONSUMER_SECRET";
pub const ENV_PRODUCTION: &str = "WC_PRODUCTION_ENVIRONMENT";

/// Connection settings for one WooCommerce shop.
///
/// Built once per process and passed by reference to the pipelines.
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
    /// Production shops always ask for confirmation, `--force` is ignored
    pub production: bool,
    pub per_page: u32,
    pub timeout: Duration,
    pub api_version: String,
}

impl Config {
    /// Reads the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Every missing or empty credential is collected so the error names all of them.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let url = value(ENV_URL);
        let consumer_key = value(ENV_CONSUMER_KEY);
        let consumer_secret = value(ENV_CONSUMER_SECRET);

        let (url, consumer_key, consumer_secret) = match (url, consumer_key, consumer_secret) {
            (Some(url), Some(key), Some(secret)) => (url, key, secret),
            (url, key, secret) => {
                let missing = [
                    (ENV_URL, url.is_none()),
                    (ENV_CONSUMER_KEY, key.is_none()),
                    (ENV_CONSUMER_SECRET, secret.is_none()),
                ]
                .into_iter()
                .filter(|(_, missing)| *missing)
                .map(|(name, _)| name)
                .collect();
                return Err(Error::MissingCredentials(missing));
            }
        };

        Ok(Self {
            url,
            consumer_key,
            consumer_secret,
            production: value(ENV_PRODUCTION).is_some(),
            per_page: MAX_PER_PAGE,
            timeout: DEFAULT_TIMEOUT,
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Base URL of the REST API, e.g. `https://shop.example/wp-json/wc/v3`
    pub fn api_base(&self) -> String {
        format!(
            "{}/wp-json/{}",
            self.url.trim_end_matches('/'),
            self.api_version
        )
    }
}
