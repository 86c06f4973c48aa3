// ABOUTME: Biometric cycle orchestration binding the analyzer to the data store and plan generator
// ABOUTME: Measurement recording, reminder checks, analysis, and verdict-driven plan regeneration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::errors::AppResult;
use crate::inference::InferenceClientPool;
use crate::intelligence::biometric_analyzer::{
    self, BiometricAnalyzer, BiometricVerdict, MeasurementPoint, RegenerationResult,
    ReminderStatus,
};
use crate::models::{BodyMeasurement, MeasurementSet};
use crate::store::{FitnessDataStore, PlanGenerator};

/// Analysis together with the regeneration it triggered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReview {
    /// The verdict
    pub verdict: BiometricVerdict,
    /// Plans regenerated because of it
    pub regeneration: RegenerationResult,
}

/// Biometric cycle operations for one deployment
pub struct BiometricService {
    store: Arc<dyn FitnessDataStore>,
    generator: Arc<dyn PlanGenerator>,
    analyzer: BiometricAnalyzer,
}

impl BiometricService {
    /// Create a service over `store` and `generator`, sharing `pool`
    #[must_use]
    pub fn new(
        store: Arc<dyn FitnessDataStore>,
        generator: Arc<dyn PlanGenerator>,
        pool: Arc<InferenceClientPool>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            store,
            generator,
            analyzer: BiometricAnalyzer::new(pool, &config.inference, &config.cycles),
        }
    }

    /// Record the full baseline
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending site, or `ResourceNotFound`
    pub async fn record_initial_measurements(
        &self,
        user_id: Uuid,
        sites: MeasurementSet,
    ) -> AppResult<BodyMeasurement> {
        biometric_analyzer::record_initial_measurements(
            self.store.as_ref(),
            user_id,
            sites,
            Utc::now(),
        )
        .await
    }

    /// Record a follow-up measurement
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty or non-positive values, or `ResourceNotFound`
    pub async fn record_measurement(
        &self,
        user_id: Uuid,
        sites: MeasurementSet,
        notes: &str,
    ) -> AppResult<BodyMeasurement> {
        biometric_analyzer::record_measurement(
            self.store.as_ref(),
            user_id,
            sites,
            notes,
            Utc::now(),
        )
        .await
    }

    /// Chart points for all measurements
    ///
    /// # Errors
    ///
    /// Returns a store error
    pub async fn measurement_history(&self, user_id: Uuid) -> AppResult<Vec<MeasurementPoint>> {
        biometric_analyzer::measurement_history(self.store.as_ref(), user_id).await
    }

    /// Whether a measurement is due
    ///
    /// # Errors
    ///
    /// Returns a store error
    pub async fn check_reminder(&self, user_id: Uuid) -> AppResult<ReminderStatus> {
        self.analyzer
            .check_reminder(self.store.as_ref(), user_id, Utc::now())
            .await
    }

    /// Analyze the latest measurement against the baseline
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` or a field-level validation error
    pub async fn analyze(&self, user_id: Uuid) -> AppResult<BiometricVerdict> {
        self.analyzer.analyze(self.store.as_ref(), user_id).await
    }

    /// Regenerate the plans `verdict` flags
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the profile is absent, or a store error
    pub async fn regenerate(
        &self,
        user_id: Uuid,
        verdict: &BiometricVerdict,
    ) -> AppResult<RegenerationResult> {
        self.analyzer
            .regenerate(
                self.store.as_ref(),
                self.generator.as_ref(),
                user_id,
                verdict,
            )
            .await
    }

    /// Analyze, then regenerate whatever the verdict flags
    ///
    /// # Errors
    ///
    /// See [`Self::analyze`] and [`Self::regenerate`]
    pub async fn review_cycle(&self, user_id: Uuid) -> AppResult<CycleReview> {
        let verdict = self.analyze(user_id).await?;
        let regeneration = self.regenerate(user_id, &verdict).await?;
        Ok(CycleReview {
            verdict,
            regeneration,
        })
    }
}
