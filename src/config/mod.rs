// ABOUTME: Environment-driven configuration for default targets and the USDA estimator
// ABOUTME: Applies env overrides onto defaults, validates, and caches a process-wide instance
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Ledger Configuration
//!
//! Configuration is environment-only. Every value has a default; environment
//! variables override it:
//!
//! ```bash
//! export NUTRITION_DAILY_CALORIE_GOAL=2200
//! export NUTRITION_TARGET_PROTEIN=160
//! export USDA_API_KEY=your_key
//! export USDA_RATE_LIMIT_PER_MINUTE=20
//! ```

use crate::external::usda_client::UsdaClientConfig;
use crate::models::UserSettings;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::warn;

/// Global configuration singleton
static LEDGER_CONFIG: OnceLock<LedgerConfig> = OnceLock::new();

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value is outside its allowed range
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),

    /// An environment variable could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Targets used when the caller supplies none
    pub default_settings: UserSettings,
    /// USDA `FoodData` Central estimator
    pub usda: UsdaClientConfig,
}

impl LedgerConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        LEDGER_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load ledger config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable holds an unparsable value
    /// or the resulting configuration fails validation
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Whether a USDA API key is configured
    #[must_use]
    pub fn usda_enabled(&self) -> bool {
        !self.usda.api_key.trim().is_empty()
    }

    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Default targets
        let settings = &mut self.default_settings;
        Self::apply_env_var(
            "NUTRITION_DAILY_CALORIE_GOAL",
            &mut settings.daily_calorie_goal,
        )?;
        Self::apply_env_var("NUTRITION_TARGET_PROTEIN", &mut settings.target_protein)?;
        Self::apply_env_var("NUTRITION_TARGET_CARBS", &mut settings.target_carbs)?;
        Self::apply_env_var("NUTRITION_TARGET_FAT", &mut settings.target_fat)?;

        // USDA estimator
        let usda = &mut self.usda;
        Self::apply_env_var("USDA_API_KEY", &mut usda.api_key)?;
        Self::apply_env_var("USDA_BASE_URL", &mut usda.base_url)?;
        Self::apply_env_var("USDA_TIMEOUT_SECS", &mut usda.timeout_secs)?;
        Self::apply_env_var("USDA_CACHE_TTL_SECS", &mut usda.cache_ttl_secs)?;
        Self::apply_env_var(
            "USDA_RATE_LIMIT_PER_MINUTE",
            &mut usda.rate_limit_per_minute,
        )?;
        Self::apply_env_var("USDA_ESTIMATE_CONFIDENCE", &mut usda.estimate_confidence)?;

        Ok(self)
    }

    /// Validate the configuration
    ///
    /// Non-positive targets are accepted; they only zero out percentages.
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for non-finite targets, a confidence outside
    /// `[0, 1]`, a zero rate limit or timeout, or an empty base URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        let settings = &self.default_settings;
        let targets = [
            settings.daily_calorie_goal,
            settings.target_protein,
            settings.target_carbs,
            settings.target_fat,
        ];
        if targets.iter().any(|t| !t.is_finite()) {
            return Err(ConfigError::ValueOutOfRange(
                "nutrition targets must be finite numbers",
            ));
        }

        if !(0.0..=1.0).contains(&self.usda.estimate_confidence) {
            return Err(ConfigError::ValueOutOfRange(
                "USDA estimate confidence must be within [0, 1]",
            ));
        }
        if self.usda.rate_limit_per_minute == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "USDA rate limit must be at least 1 request per minute",
            ));
        }
        if self.usda.timeout_secs == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "USDA timeout must be at least 1 second",
            ));
        }
        if self.usda.base_url.trim().is_empty() {
            return Err(ConfigError::ValueOutOfRange("USDA base URL cannot be empty"));
        }

        Ok(())
    }
}
