use serde::Deserialize;

use crate::services::ranker::{DEFAULT_ALPHA, DEFAULT_TOP_N};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Catalog CSV produced by the offline feature-extraction stage
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Dense item-item similarity matrix, rows aligned with the catalog
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// Prefix joined with a product id to build its link
    #[serde(default = "default_marketplace_base_url")]
    pub marketplace_base_url: String,

    /// Blend weight used when a request does not specify one
    #[serde(default = "default_alpha")]
    pub default_alpha: f64,

    /// Number of recommendations returned when a request does not specify one
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_catalog_path() -> String {
    "data/final_data.csv".to_string()
}

fn default_similarity_path() -> String {
    "model/cosine_similarity_matrix.csv".to_string()
}

fn default_marketplace_base_url() -> String {
    "https://www.amazon.co.uk/dp/".to_string()
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog_path: default_catalog_path(),
            similarity_path: default_similarity_path(),
            marketplace_base_url: default_marketplace_base_url(),
            default_alpha: default_alpha(),
            default_top_n: default_top_n(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects defaults the ranker would refuse at request time
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.default_alpha) {
            anyhow::bail!(
                "DEFAULT_ALPHA must be within [0, 1], got {}",
                self.default_alpha
            );
        }
        if self.default_top_n == 0 {
            anyhow::bail!("DEFAULT_TOP_N must be at least 1");
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
