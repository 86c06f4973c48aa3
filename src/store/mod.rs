// ABOUTME: Collaborator interfaces for user data persistence and plan generation
// ABOUTME: FitnessDataStore and PlanGenerator traits with an in-memory store implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data store abstraction
//!
//! The engine never owns persistence. Profiles, logs, measurements and plans
//! are read and written through [`FitnessDataStore`]; fresh weekly plans come
//! from a [`PlanGenerator`].

mod memory;

pub use memory::{InMemoryStore, StoreFixture};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::{BodyMeasurement, DailyLog, DietPlan, Profile, WorkoutPlan};

/// Persistence operations the engine depends on
#[async_trait]
pub trait FitnessDataStore: Send + Sync {
    // ================================
    // Profiles
    // ================================

    /// Get a user's profile
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>>;

    /// Insert or replace a profile
    async fn save_profile(&self, profile: &Profile) -> AppResult<()>;

    // ================================
    // Daily Logs
    // ================================

    /// Logs with `start <= date <= end`, ordered by date
    async fn get_logs_in_range(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<DailyLog>>;

    // ================================
    // Body Measurements
    // ================================

    /// All measurement records for a user, oldest first
    async fn list_measurements(&self, user_id: Uuid) -> AppResult<Vec<BodyMeasurement>>;

    /// Append a measurement record
    async fn append_measurement(&self, measurement: &BodyMeasurement) -> AppResult<()>;

    // ================================
    // Plans
    // ================================

    /// Latest workout plan for a user
    async fn get_latest_workout_plan(&self, user_id: Uuid) -> AppResult<Option<WorkoutPlan>>;

    /// Replace the latest workout plan
    async fn save_workout_plan(&self, plan: &WorkoutPlan) -> AppResult<()>;

    /// Latest diet plan for a user
    async fn get_latest_diet_plan(&self, user_id: Uuid) -> AppResult<Option<DietPlan>>;

    /// Replace the latest diet plan
    async fn save_diet_plan(&self, plan: &DietPlan) -> AppResult<()>;
}

/// External generator of fresh weekly plans
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Generate a workout plan for `week_number`
    async fn generate_workout_plan(
        &self,
        profile: &Profile,
        week_number: u32,
    ) -> AppResult<WorkoutPlan>;

    /// Generate a diet plan for `week_number`
    async fn generate_diet_plan(&self, profile: &Profile, week_number: u32)
        -> AppResult<DietPlan>;
}
