// ABOUTME: In-memory FitnessDataStore used by tests, benchmarks, and the CLI
// ABOUTME: Holds per-user profiles, logs, measurements, and latest plans behind a tokio RwLock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::FitnessDataStore;
use crate::errors::AppResult;
use crate::models::{BodyMeasurement, DailyLog, DietPlan, Profile, WorkoutPlan};

#[derive(Debug, Default)]
struct StoreState {
    profiles: HashMap<Uuid, Profile>,
    logs: HashMap<Uuid, Vec<DailyLog>>,
    measurements: HashMap<Uuid, Vec<BodyMeasurement>>,
    workout_plans: HashMap<Uuid, WorkoutPlan>,
    diet_plans: HashMap<Uuid, DietPlan>,
}

/// Snapshot of one user's data, loadable from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreFixture {
    /// User profile
    pub profile: Profile,
    /// Daily logs
    #[serde(default)]
    pub logs: Vec<DailyLog>,
    /// Measurement records
    #[serde(default)]
    pub measurements: Vec<BodyMeasurement>,
    /// Latest workout plan
    #[serde(default)]
    pub workout_plan: Option<WorkoutPlan>,
    /// Latest diet plan
    #[serde(default)]
    pub diet_plan: Option<DietPlan>,
}

/// In-memory data store
///
/// Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a fixture, replacing any existing data for its user
    pub async fn load_fixture(&self, fixture: StoreFixture) {
        let user_id = fixture.profile.user_id;
        let mut state = self.state.write().await;

        let mut logs = fixture.logs;
        logs.sort_by_key(|log| log.date);
        state.logs.insert(user_id, logs);

        let mut measurements = fixture.measurements;
        measurements.sort_by_key(|m| m.date);
        state.measurements.insert(user_id, measurements);

        if let Some(plan) = fixture.workout_plan {
            state.workout_plans.insert(user_id, plan);
        }
        if let Some(plan) = fixture.diet_plan {
            state.diet_plans.insert(user_id, plan);
        }
        state.profiles.insert(user_id, fixture.profile);
    }

    /// Append a daily log, keeping logs ordered by date
    pub async fn add_log(&self, log: DailyLog) {
        let mut state = self.state.write().await;
        let logs = state.logs.entry(log.user_id).or_default();
        let position = logs.partition_point(|existing| existing.date <= log.date);
        logs.insert(position, log);
    }
}

#[async_trait]
impl FitnessDataStore for InMemoryStore {
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        Ok(self.state.read().await.profiles.get(&user_id).cloned())
    }

    async fn save_profile(&self, profile: &Profile) -> AppResult<()> {
        self.state
            .write()
            .await
            .profiles
            .insert(profile.user_id, profile.clone());
        Ok(())
    }

    async fn get_logs_in_range(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<DailyLog>> {
        let state = self.state.read().await;
        Ok(state
            .logs
            .get(&user_id)
            .map(|logs| {
                logs.iter()
                    .filter(|log| log.date >= start && log.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_measurements(&self, user_id: Uuid) -> AppResult<Vec<BodyMeasurement>> {
        let state = self.state.read().await;
        Ok(state
            .measurements
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn append_measurement(&self, measurement: &BodyMeasurement) -> AppResult<()> {
        let mut state = self.state.write().await;
        let records = state.measurements.entry(measurement.user_id).or_default();
        let position = records.partition_point(|existing| existing.date <= measurement.date);
        records.insert(position, measurement.clone());
        Ok(())
    }

    async fn get_latest_workout_plan(&self, user_id: Uuid) -> AppResult<Option<WorkoutPlan>> {
        Ok(self.state.read().await.workout_plans.get(&user_id).cloned())
    }

    async fn save_workout_plan(&self, plan: &WorkoutPlan) -> AppResult<()> {
        self.state
            .write()
            .await
            .workout_plans
            .insert(plan.user_id, plan.clone());
        Ok(())
    }

    async fn get_latest_diet_plan(&self, user_id: Uuid) -> AppResult<Option<DietPlan>> {
        Ok(self.state.read().await.diet_plans.get(&user_id).cloned())
    }

    async fn save_diet_plan(&self, plan: &DietPlan) -> AppResult<()> {
        self.state
            .write()
            .await
            .diet_plans
            .insert(plan.user_id, plan.clone());
        Ok(())
    }
}
