//! TOML configuration.
//!
//! Every section and field is optional; a missing file section falls back
//! to the defaults below, which reproduce the tuned behaviour of the
//! built-in catalog (threshold `0.3`, unigrams + bigrams, 500 features).
//!
//! ```toml
//! [engine]
//! threshold = 0.3
//! ngram_min = 1
//! ngram_max = 2
//! max_features = 500      # 0 = no cap
//!
//! [catalog]
//! path = "./catalog.toml" # omit to use the built-in catalog
//!
//! [server]
//! bind = "127.0.0.1:8080"
//!
//! [logging]
//! filter = "info"         # RUST_LOG takes precedence
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use support_bot_core::engine::{EngineConfig, DEFAULT_MAX_FEATURES, DEFAULT_THRESHOLD, FALLBACK_TEXT};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineSection,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EngineSection {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_ngram_min")]
    pub ngram_min: usize,
    #[serde(default = "default_ngram_max")]
    pub ngram_max: usize,
    #[serde(default = "default_max_features")]
    pub max_features: usize,
    #[serde(default)]
    pub fallback_text: Option<String>,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            ngram_min: default_ngram_min(),
            ngram_max: default_ngram_max(),
            max_features: default_max_features(),
            fallback_text: None,
        }
    }
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}
fn default_ngram_min() -> usize {
    1
}
fn default_ngram_max() -> usize {
    2
}
fn default_max_features() -> usize {
    DEFAULT_MAX_FEATURES
}

impl EngineSection {
    /// Translate the file section into core engine parameters.
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            threshold: self.threshold,
            ngram_range: (self.ngram_min, self.ngram_max),
            max_features: if self.max_features == 0 {
                None
            } else {
                Some(self.max_features)
            },
            fallback_text: self
                .fallback_text
                .clone()
                .unwrap_or_else(|| FALLBACK_TEXT.to_string()),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// TOML or JSON catalog file. `None` selects the built-in catalog.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config = parse_config(&content)?;

    // Relative catalog paths are resolved against the config file's directory
    if let Some(catalog) = config.catalog.path.as_mut() {
        if catalog.is_relative() {
            if let Some(base) = path.parent() {
                *catalog = base.join(&*catalog);
            }
        }
    }

    Ok(config)
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    let engine = &config.engine;

    if !(0.0..=1.0).contains(&engine.threshold) {
        anyhow::bail!("engine.threshold must be in [0.0, 1.0]");
    }

    if engine.ngram_min == 0 || engine.ngram_min > engine.ngram_max {
        anyhow::bail!(
            "engine.ngram_min must be >= 1 and <= engine.ngram_max (got {} and {})",
            engine.ngram_min,
            engine.ngram_max
        );
    }

    if let Some(text) = &engine.fallback_text {
        if text.trim().is_empty() {
            anyhow::bail!("engine.fallback_text must not be empty when set");
        }
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(())
}
