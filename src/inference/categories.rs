// ABOUTME: Task categories and credential slots for the inference service
// ABOUTME: Maps each task category to its dedicated key slot and environment variable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of work an inference request is made for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    /// Weekly workout plan generation
    Workout,
    /// Weekly diet plan generation
    Diet,
    /// Conversational coaching
    Coaching,
    /// Adaptive plan adjustment decisions
    PlanAdjustment,
    /// Body measurement narrative analysis
    MeasurementAnalysis,
}

impl TaskCategory {
    /// All categories
    pub const ALL: [Self; 5] = [
        Self::Workout,
        Self::Diet,
        Self::Coaching,
        Self::PlanAdjustment,
        Self::MeasurementAnalysis,
    ];

    /// Dedicated credential slot preferred for this category
    #[must_use]
    pub const fn preferred_slot(self) -> CredentialSlot {
        match self {
            Self::Workout => CredentialSlot::Workout,
            Self::Diet => CredentialSlot::Diet,
            Self::Coaching => CredentialSlot::Assistant,
            Self::PlanAdjustment => CredentialSlot::PlanAdjustment,
            Self::MeasurementAnalysis => CredentialSlot::Measurement,
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Workout => "workout",
            Self::Diet => "diet",
            Self::Coaching => "coaching",
            Self::PlanAdjustment => "plan_adjustment",
            Self::MeasurementAnalysis => "measurement_analysis",
        };
        f.write_str(name)
    }
}

/// Named credential slot holding one inference key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSlot {
    /// Key dedicated to workout generation
    Workout,
    /// Key dedicated to diet generation
    Diet,
    /// Key dedicated to the coaching assistant
    Assistant,
    /// Key dedicated to plan adjustment
    PlanAdjustment,
    /// Key dedicated to measurement analysis
    Measurement,
    /// Shared key used when a dedicated key is absent
    Fallback,
}

impl CredentialSlot {
    /// All slots, fallback last
    pub const ALL: [Self; 6] = [
        Self::Workout,
        Self::Diet,
        Self::Assistant,
        Self::PlanAdjustment,
        Self::Measurement,
        Self::Fallback,
    ];

    /// Environment variable holding this slot's key
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::Workout => "GROQ_API_KEY_WORKOUT",
            Self::Diet => "GROQ_API_KEY_DIET",
            Self::Assistant => "GROQ_API_KEY_ASSISTANT",
            Self::PlanAdjustment => "GROQ_API_KEY_PLAN_ADJUSTMENT",
            Self::Measurement => "GROQ_API_KEY_MEASUREMENT",
            Self::Fallback => "GROQ_API_KEY",
        }
    }

    /// Position in fixed-size per-slot tables
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Workout => 0,
            Self::Diet => 1,
            Self::Assistant => 2,
            Self::PlanAdjustment => 3,
            Self::Measurement => 4,
            Self::Fallback => 5,
        }
    }
}

impl fmt::Display for CredentialSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Workout => "workout",
            Self::Diet => "diet",
            Self::Assistant => "assistant",
            Self::PlanAdjustment => "plan_adjustment",
            Self::Measurement => "measurement",
            Self::Fallback => "fallback",
        };
        f.write_str(name)
    }
}
