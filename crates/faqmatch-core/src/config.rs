//! Matching configuration loader.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `NLP_*` env vars. The env names follow the deployment convention
//! (`NLP_ALPHA`, `NLP_UNDERSTOOD`, `NLP_AMBIG`, `NLP_TOP_K`).

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::Error;

pub const DEFAULT_BASE_ALPHA: f64 = 0.6;
pub const DEFAULT_UNDERSTOOD_THRESHOLD: f64 = 0.55;
pub const DEFAULT_AMBIGUOUS_THRESHOLD: f64 = 0.35;
pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Tuning knobs for blending and classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Weight of the lexical (tf-idf cosine) score; fuzzy gets `1 - alpha`.
    pub base_alpha: f64,
    /// Confidence floor for a direct answer.
    pub understood_threshold: f64,
    /// Confidence floor for offering alternatives.
    pub ambiguous_threshold: f64,
    pub top_k: usize,
    /// Corpus size from which fuzzy scoring fans out across threads.
    pub parallel_threshold: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            base_alpha: DEFAULT_BASE_ALPHA,
            understood_threshold: DEFAULT_UNDERSTOOD_THRESHOLD,
            ambiguous_threshold: DEFAULT_AMBIGUOUS_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(0.0..=1.0).contains(&self.base_alpha) {
            return Err(Error::InvalidConfig(format!(
                "base_alpha must be within [0, 1], got {}",
                self.base_alpha
            )));
        }
        if !(0.0..=1.0).contains(&self.understood_threshold)
            || !(0.0..=1.0).contains(&self.ambiguous_threshold)
        {
            return Err(Error::InvalidConfig(
                "thresholds must be within [0, 1]".to_string(),
            ));
        }
        if self.ambiguous_threshold >= self.understood_threshold {
            return Err(Error::InvalidConfig(format!(
                "ambiguous_threshold ({}) must be below understood_threshold ({})",
                self.ambiguous_threshold, self.understood_threshold
            )));
        }
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be at least 1".to_string()));
        }
        Ok(())
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(MatchConfig::default()))
            .merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(nlp_env());
        Self::from_figment(figment)
    }

    /// Wrap an already assembled figment; validates the matching section.
    pub fn from_figment(figment: Figment) -> anyhow::Result<Self> {
        let config = Self { figment };
        config.matching()?;
        Ok(config)
    }

    pub fn matching(&self) -> anyhow::Result<MatchConfig> {
        let matching: MatchConfig = self
            .figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to read matching config: {}", e))?;
        matching.validate()?;
        Ok(matching)
    }
}

fn nlp_env() -> Env {
    Env::prefixed("NLP_").map(|key| match key.as_str().to_ascii_lowercase().as_str() {
        "alpha" => "base_alpha".into(),
        "understood" => "understood_threshold".into(),
        "ambig" => "ambiguous_threshold".into(),
        _ => key.as_str().to_ascii_lowercase().into(),
    })
}
