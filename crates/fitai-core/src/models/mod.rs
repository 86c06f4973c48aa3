// ABOUTME: Core data models for profiles, daily logs, body measurements, and plans
// ABOUTME: Serde-serializable documents exchanged with the data store and the API layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Documents owned by external collaborators (profile store, log store, plan
//! store) that the engine reads and, for plans and profiles, writes back.

mod daily_log;
mod measurement;
mod plan;
mod profile;

pub use daily_log::{DailyLog, EnergyLevel};
pub use measurement::{BodyMeasurement, MeasurementSet, MeasurementSite};
pub use plan::{DietPlan, Exercise, MacroSplit, Meal, MealMacros, WorkoutDay, WorkoutPlan};
pub use profile::{
    ActivityLevel, ExperienceLevel, FitnessGoal, Gender, InitialMeasurements, Profile,
};
