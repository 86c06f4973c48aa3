// ABOUTME: User profile model with goal, experience, and initial body measurements
// ABOUTME: FitnessGoal, Gender, ActivityLevel, ExperienceLevel, and Profile definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::MeasurementSet;

/// Primary training goal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    /// Reduce body weight
    #[serde(alias = "Weight Loss")]
    WeightLoss,
    /// Build muscle mass
    #[serde(alias = "Muscle Gain")]
    MuscleGain,
    /// Hold current body composition
    #[serde(alias = "Maintenance")]
    Maintenance,
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeightLoss => write!(f, "Weight Loss"),
            Self::MuscleGain => write!(f, "Muscle Gain"),
            Self::Maintenance => write!(f, "Maintenance"),
        }
    }
}

/// Gender as recorded on the profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Other or undisclosed
    Other,
}

/// Day-to-day activity outside training
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActivityLevel {
    /// Little or no activity
    Sedentary,
    /// Light activity
    Light,
    /// Moderate activity
    Moderate,
    /// Highly active
    Active,
}

/// Training experience
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExperienceLevel {
    /// New to structured training
    Beginner,
    /// Some structured training history
    Intermediate,
    /// Long structured training history
    Advanced,
}

/// Baseline measurements captured at profile setup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitialMeasurements {
    /// Circumference measurements
    #[serde(flatten)]
    pub sites: MeasurementSet,
    /// When the baseline was taken
    pub measured_at: DateTime<Utc>,
}

/// User profile
///
/// Owned by a single user and never deleted by the engine. Plan adjustments
/// update `daily_calorie_target`; measurement recording updates
/// `initial_measurements` and `last_measurement_reminder`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Owning user
    pub user_id: Uuid,
    /// Age in years
    pub age: u32,
    /// Gender
    pub gender: Gender,
    /// Height in centimeters
    pub height_cm: f64,
    /// Current weight in kilograms
    pub weight_kg: f64,
    /// Target weight in kilograms
    pub target_weight_kg: f64,
    /// Primary goal
    pub goal: FitnessGoal,
    /// Activity level
    pub activity_level: ActivityLevel,
    /// Experience level
    pub experience_level: ExperienceLevel,
    /// Training days available per week
    pub available_days_per_week: u8,
    /// Free-text dietary preferences
    #[serde(default)]
    pub dietary_preferences: String,
    /// Free-text allergies
    #[serde(default)]
    pub allergies: String,
    /// Free-text injuries or limitations
    #[serde(default)]
    pub injuries_limitations: String,
    /// Current daily calorie target
    #[serde(default)]
    pub daily_calorie_target: Option<u32>,
    /// Baseline body measurements
    #[serde(default)]
    pub initial_measurements: Option<InitialMeasurements>,
    /// Last time the measurement reminder was satisfied
    #[serde(default)]
    pub last_measurement_reminder: Option<DateTime<Utc>>,
}

impl Profile {
    /// Reference date for the measurement reminder cadence
    ///
    /// Falls back to the baseline measurement date when no reminder has fired yet.
    #[must_use]
    pub fn last_measurement_date(&self) -> Option<DateTime<Utc>> {
        self.last_measurement_reminder.or_else(|| {
            self.initial_measurements
                .as_ref()
                .map(|initial| initial.measured_at)
        })
    }
}
