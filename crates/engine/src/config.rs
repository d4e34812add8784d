use crate::error::{ConfigError, Result};
use features::{FeatureConfig, DEFAULT_MAX_FEATURES};
use serde::{Deserialize, Serialize};

/// Prefix of every engine environment variable
pub const ENV_PREFIX: &str = "REEL_RECS_";

/// Engine tuning, loaded from `REEL_RECS_*` environment variables.
///
/// Every field has a default, so an empty environment is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Vocabulary cap for the TF-IDF model; 0 keeps every term
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Hybrid weight of the content score
    #[serde(default = "default_weight")]
    pub content_weight: f32,

    /// Hybrid weight of the profile score
    #[serde(default = "default_weight")]
    pub profile_weight: f32,

    /// Candidates fetched per requested hybrid result, from each side
    #[serde(default = "default_overfetch_factor")]
    pub overfetch_factor: usize,

    /// Rating that contributes nothing to a taste profile
    #[serde(default = "default_rating_pivot")]
    pub rating_pivot: f32,

    #[serde(default = "default_rating_scale")]
    pub rating_scale: f32,

    /// Trending only considers movies from this year on
    #[serde(default = "default_trending_min_year")]
    pub trending_min_year: u16,

    #[serde(default = "default_trending_base_year")]
    pub trending_base_year: u16,

    #[serde(default = "default_trending_divisor")]
    pub trending_divisor: f32,
}

fn default_max_features() -> usize {
    DEFAULT_MAX_FEATURES
}

fn default_weight() -> f32 {
    0.5
}

fn default_overfetch_factor() -> usize {
    2
}

fn default_rating_pivot() -> f32 {
    2.5
}

fn default_rating_scale() -> f32 {
    2.5
}

fn default_trending_min_year() -> u16 {
    2010
}

fn default_trending_base_year() -> u16 {
    2000
}

fn default_trending_divisor() -> f32 {
    25.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_features: default_max_features(),
            content_weight: default_weight(),
            profile_weight: default_weight(),
            overfetch_factor: default_overfetch_factor(),
            rating_pivot: default_rating_pivot(),
            rating_scale: default_rating_scale(),
            trending_min_year: default_trending_min_year(),
            trending_base_year: default_trending_base_year(),
            trending_divisor: default_trending_divisor(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables (and `.env`, if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<EngineConfig>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from explicit `(name, value)` pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::prefixed(ENV_PREFIX)
            .from_iter::<_, EngineConfig>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (field, weight) in [
            ("content_weight", self.content_weight),
            ("profile_weight", self.profile_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("{weight} is not a non-negative number"),
                }
                .into());
            }
        }
        if self.overfetch_factor == 0 {
            return Err(ConfigError::InvalidValue {
                field: "overfetch_factor",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if !self.rating_scale.is_finite() || self.rating_scale == 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "rating_scale",
                reason: format!("{} cannot divide a rating", self.rating_scale),
            }
            .into());
        }
        if !self.trending_divisor.is_finite() || self.trending_divisor == 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "trending_divisor",
                reason: format!("{} cannot divide a score", self.trending_divisor),
            }
            .into());
        }
        Ok(())
    }

    pub fn feature_config(&self) -> FeatureConfig {
        FeatureConfig::default().with_max_features(self.max_features)
    }
}
