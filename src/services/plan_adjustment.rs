// ABOUTME: Weekly plan adjustment orchestration over the decision engine and plan mutator
// ABOUTME: Evaluates, applies, persists adjusted plans, and deduplicates runs by idempotency key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::constants::adjustment::IDEMPOTENCY_KEY_TTL_DAYS;
use crate::errors::{AppError, AppResult};
use crate::inference::{InferenceClientPool, UsageStats};
use crate::intelligence::plan_mutator;
use crate::intelligence::{AdjustmentDecision, AppliedAdjustment, DecisionEngine, Evaluation};
use crate::logging::EngineLogger;
use crate::store::FitnessDataStore;

/// Result of an automatic adjustment run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoAdjustOutcome {
    /// The decision that drove the run
    pub decision: AdjustmentDecision,
    /// What was changed and persisted
    pub applied: AppliedAdjustment,
    /// Why a recommended adjustment was not applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped_reason: Option<String>,
    /// Message for the user's dashboard
    pub message: String,
    /// Whether this outcome was returned from an earlier run with the same key
    #[serde(default)]
    pub replayed: bool,
}

impl AutoAdjustOutcome {
    /// Whether any plan was changed
    #[must_use]
    pub const fn adjusted(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Outcome stored under an idempotency key
#[derive(Debug, Clone)]
struct StoredOutcome {
    outcome: AutoAdjustOutcome,
    recorded_at: DateTime<Utc>,
}

/// Idempotency keys are scoped per user
type OutcomeKey = (Uuid, String);

/// Orchestrates evaluation and application of weekly plan adjustments
pub struct PlanAdjustmentService {
    store: Arc<dyn FitnessDataStore>,
    pool: Arc<InferenceClientPool>,
    engine: DecisionEngine,
    config: EngineConfig,
    outcomes: DashMap<OutcomeKey, Arc<OnceCell<StoredOutcome>>>,
}

impl PlanAdjustmentService {
    /// Create a service over `store`, sharing `pool`
    #[must_use]
    pub fn new(
        store: Arc<dyn FitnessDataStore>,
        pool: Arc<InferenceClientPool>,
        config: EngineConfig,
    ) -> Self {
        let engine = DecisionEngine::new(Arc::clone(&pool), &config.inference);
        Self {
            store,
            pool,
            engine,
            config,
            outcomes: DashMap::new(),
        }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Decide whether `user_id`'s plans should change, as of now
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the profile is absent, or a store error
    pub async fn evaluate(&self, user_id: Uuid) -> AppResult<AdjustmentDecision> {
        Ok(self.evaluate_at(user_id, Utc::now()).await?.decision)
    }

    /// Decide as of `now`, returning the metrics used
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the profile is absent, or a store error
    pub async fn evaluate_at(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<Evaluation> {
        self.engine
            .evaluate(
                self.store.as_ref(),
                user_id,
                self.config.cycles.evaluation_window_days,
                now,
            )
            .await
    }

    /// Compute adjusted plans for `decision` without persisting them
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when a needed plan is absent, or a store error
    pub async fn apply_decision(
        &self,
        user_id: Uuid,
        decision: &AdjustmentDecision,
    ) -> AppResult<AppliedAdjustment> {
        plan_mutator::apply_decision(self.store.as_ref(), user_id, decision, Utc::now()).await
    }

    /// Evaluate, apply, and persist in one step
    ///
    /// A repeated `idempotency_key` for the same user returns the stored
    /// outcome without evaluating or writing again. Concurrent calls with the
    /// same key wait for the first one. Keys expire after
    /// `IDEMPOTENCY_KEY_TTL_DAYS`; a failed run leaves its key unused.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the profile is absent, or a store error.
    /// A missing plan is reported through `skipped_reason` instead.
    pub async fn auto_adjust(
        &self,
        user_id: Uuid,
        idempotency_key: Option<&str>,
    ) -> AppResult<AutoAdjustOutcome> {
        self.auto_adjust_at(user_id, idempotency_key, Utc::now())
            .await
    }

    /// [`Self::auto_adjust`] as of `now`
    ///
    /// # Errors
    ///
    /// See [`Self::auto_adjust`]
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn auto_adjust_at(
        &self,
        user_id: Uuid,
        idempotency_key: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<AutoAdjustOutcome> {
        let Some(key) = idempotency_key else {
            return self.run_adjustment(user_id, now).await;
        };

        self.evict_expired(now);
        let cell = Arc::clone(
            self.outcomes
                .entry((user_id, key.to_owned()))
                .or_default()
                .value(),
        );

        let mut ran = false;
        let stored = cell
            .get_or_try_init(|| {
                ran = true;
                async move {
                    let outcome = self.run_adjustment(user_id, now).await?;
                    Ok::<_, AppError>(StoredOutcome {
                        outcome,
                        recorded_at: now,
                    })
                }
            })
            .await?;

        let mut outcome = stored.outcome.clone();
        if !ran {
            debug!(key, "Returning stored adjustment outcome");
            outcome.replayed = true;
        }
        Ok(outcome)
    }

    async fn run_adjustment(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<AutoAdjustOutcome> {
        let Evaluation { decision, .. } = self.evaluate_at(user_id, now).await?;
        self.apply_and_persist(user_id, decision, now).await
    }

    /// Drop keys older than the replay window and keys whose run failed
    ///
    /// A key with no outcome yet is kept while a caller still holds its cell.
    fn evict_expired(&self, now: DateTime<Utc>) {
        let ttl = Duration::days(IDEMPOTENCY_KEY_TTL_DAYS);
        self.outcomes.retain(|_, cell| match cell.get() {
            Some(stored) => now - stored.recorded_at < ttl,
            None => Arc::strong_count(cell) > 1,
        });
    }

    /// Number of idempotency keys currently held
    #[must_use]
    pub fn stored_key_count(&self) -> usize {
        self.outcomes.len()
    }

    async fn apply_and_persist(
        &self,
        user_id: Uuid,
        decision: AdjustmentDecision,
        now: DateTime<Utc>,
    ) -> AppResult<AutoAdjustOutcome> {
        if !decision.needs_adjustment {
            return Ok(AutoAdjustOutcome {
                message: decision.notification_text.clone(),
                decision,
                applied: AppliedAdjustment::default(),
                skipped_reason: None,
                replayed: false,
            });
        }

        let applied =
            match plan_mutator::apply_decision(self.store.as_ref(), user_id, &decision, now).await
            {
                Ok(applied) => applied,
                Err(error) if error.is_not_found() => {
                    info!(%error, "Adjustment recommended but no plan to adjust");
                    return Ok(AutoAdjustOutcome {
                        message: format!(
                            "{} Generate a plan to apply these adjustments.",
                            decision.notification_text
                        ),
                        decision,
                        applied: AppliedAdjustment::default(),
                        skipped_reason: Some(error.message),
                        replayed: false,
                    });
                }
                Err(error) => return Err(error),
            };

        self.persist(user_id, &applied).await?;
        EngineLogger::log_adjustment_applied(
            &user_id.to_string(),
            applied.workout_adjusted,
            applied.diet_adjusted,
        );

        Ok(AutoAdjustOutcome {
            message: decision.notification_text.clone(),
            decision,
            applied,
            skipped_reason: None,
            replayed: false,
        })
    }

    async fn persist(&self, user_id: Uuid, applied: &AppliedAdjustment) -> AppResult<()> {
        if let Some(plan) = &applied.adjusted_workout {
            self.store.save_workout_plan(plan).await?;
        }
        if let Some(plan) = &applied.adjusted_diet {
            self.store.save_diet_plan(plan).await?;
            let mut profile = self
                .store
                .get_profile(user_id)
                .await?
                .ok_or_else(|| AppError::not_found("Profile"))?;
            profile.daily_calorie_target = Some(plan.daily_calories);
            self.store.save_profile(&profile).await?;
        }
        Ok(())
    }

    /// Per-slot inference usage and category availability
    #[must_use]
    pub fn usage_stats(&self) -> UsageStats {
        self.pool.usage_stats()
    }
}
