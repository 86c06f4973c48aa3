// ABOUTME: Environment-based configuration for the adjustment engine
// ABOUTME: Inference credentials, model names, timeouts, and evaluation cycle settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engine configuration
//!
//! All settings come from environment variables. Unset variables fall back to
//! defaults; set-but-invalid variables are rejected with [`ConfigError`].

use std::collections::BTreeMap;
use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::constants::cycles::{
    DEFAULT_EVALUATION_WINDOW_DAYS, DEFAULT_REMINDER_CADENCE_DAYS, MAX_EVALUATION_WINDOW_DAYS,
    MIN_EVALUATION_WINDOW_DAYS,
};
use crate::errors::{AppError, ErrorCode};
use crate::inference::CredentialSlot;

/// Default model for plan adjustment decisions
pub const DEFAULT_ADJUSTMENT_MODEL: &str = "llama-3.3-70b-versatile";

/// Default model for measurement narrative analysis
pub const DEFAULT_ANALYSIS_MODEL: &str = "llama-3.1-8b-instant";

/// Default upper bound on a single inference call
pub const DEFAULT_INFERENCE_TIMEOUT_SECS: u64 = 30;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Variable set but not parseable
    #[error("Parse error: {0}")]
    Parse(String),

    /// Variable parsed but outside its accepted range
    #[error("Value out of range: {0}")]
    ValueOutOfRange(String),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::new(ErrorCode::ConfigInvalid, error.to_string())
    }
}

/// Whether a key value is a template placeholder rather than a real credential
#[must_use]
pub fn is_placeholder_key(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.starts_with("your_")
}

/// Inference service settings
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Usable keys by slot; placeholder values are never stored
    pub keys: BTreeMap<CredentialSlot, String>,
    /// Model used for plan adjustment decisions
    pub adjustment_model: String,
    /// Model used for measurement narrative analysis
    pub analysis_model: String,
    /// Upper bound on a single inference call
    pub timeout: Duration,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            keys: BTreeMap::new(),
            adjustment_model: DEFAULT_ADJUSTMENT_MODEL.to_owned(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_INFERENCE_TIMEOUT_SECS),
        }
    }
}

impl InferenceConfig {
    /// Load inference settings from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `FITAI_INFERENCE_TIMEOUT_SECS` is not a positive integer
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for slot in CredentialSlot::ALL {
            if let Ok(value) = env::var(slot.env_var()) {
                config = config.with_key(slot, value);
            }
        }

        if let Ok(model) = env::var("FITAI_ADJUSTMENT_MODEL") {
            if !model.trim().is_empty() {
                config.adjustment_model = model.trim().to_owned();
            }
        }

        if let Ok(model) = env::var("FITAI_ANALYSIS_MODEL") {
            if !model.trim().is_empty() {
                config.analysis_model = model.trim().to_owned();
            }
        }

        if let Ok(val) = env::var("FITAI_INFERENCE_TIMEOUT_SECS") {
            let secs: u64 = val.trim().parse().map_err(|_| {
                ConfigError::Parse(format!("Invalid FITAI_INFERENCE_TIMEOUT_SECS: {val}"))
            })?;
            if secs == 0 {
                return Err(ConfigError::ValueOutOfRange(
                    "FITAI_INFERENCE_TIMEOUT_SECS must be greater than zero".to_owned(),
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Add a key for a slot, ignoring placeholder values
    #[must_use]
    pub fn with_key(mut self, slot: CredentialSlot, value: impl Into<String>) -> Self {
        let value = value.into();
        if !is_placeholder_key(&value) {
            self.keys.insert(slot, value.trim().to_owned());
        }
        self
    }

    /// Usable key for a slot
    #[must_use]
    pub fn key(&self, slot: CredentialSlot) -> Option<&str> {
        self.keys.get(&slot).map(String::as_str)
    }
}

/// Evaluation and measurement cycle settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleConfig {
    /// Rolling window of daily logs used for evaluation
    pub evaluation_window_days: u32,
    /// Days between measurement reminders
    pub reminder_cadence_days: u32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            evaluation_window_days: DEFAULT_EVALUATION_WINDOW_DAYS,
            reminder_cadence_days: DEFAULT_REMINDER_CADENCE_DAYS,
        }
    }
}

impl CycleConfig {
    /// Load cycle settings from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is not an integer or is out of range
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(val) = env::var("FITAI_EVALUATION_WINDOW_DAYS") {
            config.evaluation_window_days = val.trim().parse().map_err(|_| {
                ConfigError::Parse(format!("Invalid FITAI_EVALUATION_WINDOW_DAYS: {val}"))
            })?;
        }

        if let Ok(val) = env::var("FITAI_REMINDER_CADENCE_DAYS") {
            config.reminder_cadence_days = val.trim().parse().map_err(|_| {
                ConfigError::Parse(format!("Invalid FITAI_REMINDER_CADENCE_DAYS: {val}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate ranges
    ///
    /// # Errors
    ///
    /// Returns an error if the window is outside 7..=182 days or the cadence is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_EVALUATION_WINDOW_DAYS..=MAX_EVALUATION_WINDOW_DAYS)
            .contains(&self.evaluation_window_days)
        {
            return Err(ConfigError::ValueOutOfRange(format!(
                "FITAI_EVALUATION_WINDOW_DAYS must be between {MIN_EVALUATION_WINDOW_DAYS} and {MAX_EVALUATION_WINDOW_DAYS}"
            )));
        }
        if self.reminder_cadence_days == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "FITAI_REMINDER_CADENCE_DAYS must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Inference service settings
    pub inference: InferenceConfig,
    /// Evaluation and measurement cycle settings
    pub cycles: CycleConfig,
}

impl EngineConfig {
    /// Load the full configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is set to an invalid value
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            inference: InferenceConfig::from_env()?,
            cycles: CycleConfig::from_env()?,
        })
    }
}
