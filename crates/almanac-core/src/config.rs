use anyhow::Result;
use config::Config;
use config::builder::{ConfigBuilder, DefaultState};
use serde::Deserialize;

use crate::constants::{
    FALLBACK_TIMEZONE, MAX_EMITTED_OCCURRENCES, MAX_SUB_YEARLY_ITERATIONS, MAX_YEARLY_ITERATIONS,
    SUB_YEARLY_HORIZON_DAYS, YEARLY_HORIZON_YEARS,
};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub expansion: ExpansionSettings,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Caps and horizons applied when expanding repeating events.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExpansionSettings {
    pub max_sub_yearly_iterations: usize,
    pub max_yearly_iterations: usize,
    pub max_emitted_occurrences: usize,
    pub sub_yearly_horizon_days: i64,
    pub yearly_horizon_years: i32,
}

impl Default for ExpansionSettings {
    fn default() -> Self {
        Self {
            max_sub_yearly_iterations: MAX_SUB_YEARLY_ITERATIONS,
            max_yearly_iterations: MAX_YEARLY_ITERATIONS,
            max_emitted_occurrences: MAX_EMITTED_OCCURRENCES,
            sub_yearly_horizon_days: SUB_YEARLY_HORIZON_DAYS,
            yearly_horizon_years: YEARLY_HORIZON_YEARS,
        }
    }
}

impl ExpansionSettings {
    /// ## Summary
    /// Rejects settings that would stop expansion from ever producing output.
    ///
    /// ## Errors
    /// Returns `CoreError::ValidationError` if any cap is zero or a horizon is negative.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_sub_yearly_iterations == 0 || self.max_yearly_iterations == 0 {
            return Err(CoreError::ValidationError(
                "expansion iteration caps must be positive".to_string(),
            ));
        }
        if self.max_emitted_occurrences == 0 {
            return Err(CoreError::ValidationError(
                "expansion.max_emitted_occurrences must be positive".to_string(),
            ));
        }
        if self.sub_yearly_horizon_days < 0 || self.yearly_horizon_years < 0 {
            return Err(CoreError::ValidationError(
                "expansion horizons cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub timezone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, `almanac.toml` and `ALMANAC_*` environment variables.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if building or deserializing the configuration fails,
    /// and `CoreError::ValidationError` if the expansion settings are unusable.
    pub fn load() -> Result<Self> {
        Self::load_from("almanac.toml")
    }

    /// ## Summary
    /// Like [`Settings::load`], reading the optional TOML file at `path`.
    ///
    /// ## Errors
    /// Same as [`Settings::load`].
    pub fn load_from(path: &str) -> Result<Self> {
        let settings = Self::builder(path)?
            .build()
            .and_then(|config| config.try_deserialize::<Settings>())
            .map_err(|e| CoreError::ConfigError(e.to_string()))?;

        settings.expansion.validate()?;
        tracing::debug!(?settings, "Configuration loaded");

        Ok(settings)
    }

    fn builder(path: &str) -> Result<ConfigBuilder<DefaultState>> {
        let builder = Config::builder()
            .set_default(
                "expansion.max_sub_yearly_iterations",
                u64::try_from(MAX_SUB_YEARLY_ITERATIONS)?,
            )?
            .set_default(
                "expansion.max_yearly_iterations",
                u64::try_from(MAX_YEARLY_ITERATIONS)?,
            )?
            .set_default(
                "expansion.max_emitted_occurrences",
                u64::try_from(MAX_EMITTED_OCCURRENCES)?,
            )?
            .set_default("expansion.sub_yearly_horizon_days", SUB_YEARLY_HORIZON_DAYS)?
            .set_default("expansion.yearly_horizon_years", i64::from(YEARLY_HORIZON_YEARS))?
            .set_default("display.timezone", FALLBACK_TIMEZONE)?
            .set_default("logging.level", "info")?
            // TOML file
            .add_source(config::File::with_name(path).required(false))
            // Env
            .add_source(
                config::Environment::with_prefix("ALMANAC")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            );

        Ok(builder)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
