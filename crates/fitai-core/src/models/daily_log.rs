// ABOUTME: Daily behavioral and biometric log model
// ABOUTME: DailyLog and EnergyLevel definitions read by the metrics aggregator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Self-reported energy level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLevel {
    /// Exhausted
    #[serde(alias = "Very Tired")]
    VeryTired,
    /// Somewhat tired
    #[serde(alias = "Slightly Fatigued")]
    SlightlyFatigued,
    /// Normal energy
    #[serde(alias = "Normal")]
    Normal,
    /// High energy
    #[serde(alias = "Energized")]
    Energized,
}

impl EnergyLevel {
    /// Whether this level counts as a fatigue flag
    #[must_use]
    pub const fn is_fatigued(self) -> bool {
        matches!(self, Self::SlightlyFatigued | Self::VeryTired)
    }
}

/// One log per user per calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLog {
    /// Owning user
    pub user_id: Uuid,
    /// Calendar day of the log
    pub date: DateTime<Utc>,
    /// Whether the planned workout was completed
    #[serde(default)]
    pub workout_completed: bool,
    /// Whether the diet plan was followed
    #[serde(default)]
    pub diet_followed: bool,
    /// Morning weight in kilograms
    #[serde(default)]
    pub weight_kg: Option<f64>,
    /// Hours slept
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    /// Water intake in liters
    #[serde(default)]
    pub water_liters: Option<f64>,
    /// Calories consumed
    #[serde(default)]
    pub calories_consumed: Option<u32>,
    /// Energy level
    #[serde(default)]
    pub energy_level: Option<EnergyLevel>,
    /// Free-text mood
    #[serde(default)]
    pub mood: Option<String>,
}

impl DailyLog {
    /// Weight value usable for trend calculations (present and positive)
    #[must_use]
    pub fn valid_weight(&self) -> Option<f64> {
        self.weight_kg.filter(|w| *w > 0.0)
    }

    /// Whether the log carries a fatigue flag
    #[must_use]
    pub fn is_fatigued(&self) -> bool {
        self.energy_level.is_some_and(EnergyLevel::is_fatigued)
    }
}
