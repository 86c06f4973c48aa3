// ABOUTME: Plan adjustment decision engine with inference-backed and rule-based branches
// ABOUTME: Runs an explicit TryAi/Fallback/Done state machine over weekly metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Decision Engine
//!
//! The inference branch is tried first when a plan-adjustment key resolves.
//! Any failure (transport error, timeout, unparseable response) is counted
//! against the serving slot and the deterministic rule table decides instead.
//! Callers only see the outcome through [`AdjustmentDecision::source`].

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::decision::AdjustmentDecision;
use super::metrics_aggregator::{compute_metrics_for_profile, validate_window, WeeklyMetrics};
use super::response_parser::{parse_decision, ParsedDecision};
use super::rules::evaluate_rules;
use crate::config::InferenceConfig;
use crate::errors::{AppError, AppResult};
use crate::inference::{complete_with_timeout, InferenceClientPool, InferenceFailure, TaskCategory};
use crate::llm::prompts::PLAN_ADJUSTMENT_SYSTEM_PROMPT;
use crate::llm::ChatRequest;
use crate::logging::EngineLogger;
use crate::models::Profile;
use crate::store::FitnessDataStore;

/// Sampling temperature for adjustment decisions
pub const ADJUSTMENT_TEMPERATURE: f32 = 0.3;

/// Completion budget for adjustment decisions
pub const ADJUSTMENT_MAX_TOKENS: u32 = 1000;

enum EvaluationState {
    TryAi,
    Fallback(InferenceFailure),
    Done(AdjustmentDecision),
}

/// Evaluation result with the metrics it was derived from
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// The decision
    pub decision: AdjustmentDecision,
    /// Metrics the decision was based on
    pub metrics: WeeklyMetrics,
}

/// Chooses between the inference and rule branches
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    pool: Arc<InferenceClientPool>,
    model: String,
    timeout: Duration,
}

impl DecisionEngine {
    /// Create an engine using the pool and the configured model and timeout
    #[must_use]
    pub fn new(pool: Arc<InferenceClientPool>, config: &InferenceConfig) -> Self {
        Self {
            pool,
            model: config.adjustment_model.clone(),
            timeout: config.timeout,
        }
    }

    /// Load metrics and profile for `user_id`, then decide
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the profile is absent, a validation
    /// error for an out-of-range window, or a store error
    #[instrument(skip(self, store), fields(user_id = %user_id))]
    pub async fn evaluate(
        &self,
        store: &dyn FitnessDataStore,
        user_id: Uuid,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> AppResult<Evaluation> {
        validate_window(window_days)?;
        let profile = store
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile"))?;
        let metrics = compute_metrics_for_profile(store, &profile, window_days, now).await?;

        let decision = self.decide(&profile, &metrics).await;
        EngineLogger::log_decision(
            &user_id.to_string(),
            decision.source.as_str(),
            decision.needs_adjustment,
            decision.triggers.len(),
        );
        Ok(Evaluation { decision, metrics })
    }

    /// Decide from already computed metrics
    pub async fn decide(&self, profile: &Profile, metrics: &WeeklyMetrics) -> AdjustmentDecision {
        let mut state = EvaluationState::TryAi;
        loop {
            state = match state {
                EvaluationState::TryAi => match self.try_ai(profile, metrics).await {
                    Ok(decision) => EvaluationState::Done(decision),
                    Err(failure) => EvaluationState::Fallback(failure),
                },
                EvaluationState::Fallback(failure) => {
                    if failure == InferenceFailure::Unavailable {
                        debug!("Inference not configured, using rule-based evaluation");
                    } else {
                        warn!(%failure, "AI evaluation failed, falling back to rule-based");
                    }
                    EvaluationState::Done(evaluate_rules(profile.goal, metrics))
                }
                EvaluationState::Done(decision) => return decision,
            };
        }
    }

    async fn try_ai(
        &self,
        profile: &Profile,
        metrics: &WeeklyMetrics,
    ) -> Result<AdjustmentDecision, InferenceFailure> {
        let client = self
            .pool
            .get_client(TaskCategory::PlanAdjustment)
            .ok_or(InferenceFailure::Unavailable)?;

        let request = ChatRequest::instructed(
            PLAN_ADJUSTMENT_SYSTEM_PROMPT,
            build_adjustment_prompt(profile, metrics),
            client.provider.capabilities(),
            true,
        )
        .with_model(self.model.clone())
        .with_temperature(ADJUSTMENT_TEMPERATURE)
        .with_max_tokens(ADJUSTMENT_MAX_TOKENS);

        let outcome = match complete_with_timeout(&client, &request, self.timeout).await {
            Ok(response) => match parse_decision(&response.content) {
                ParsedDecision::Parsed(parsed) => Ok(parsed.into_decision()),
                ParsedDecision::ParseFailure { raw, reason } => {
                    debug!(raw_len = raw.len(), "Unparseable adjustment response");
                    Err(InferenceFailure::Malformed(reason))
                }
            },
            Err(failure) => Err(failure),
        };

        match outcome {
            Ok(decision) => {
                check_macro_split(&decision);
                Ok(decision)
            }
            Err(failure) => {
                if failure.counts_as_error() {
                    self.pool.record_error(client.slot);
                }
                Err(failure)
            }
        }
    }
}

/// Advisory check; an unbalanced split is logged, not rejected
fn check_macro_split(decision: &AdjustmentDecision) {
    for split in decision.recommendations.iter().filter_map(|r| r.new_macros) {
        if !split.is_balanced() {
            warn!(
                protein = split.protein,
                carbs = split.carbs,
                fat = split.fat,
                total = split.total(),
                "AI macro split does not sum to 100%"
            );
        }
    }
}

/// User prompt describing the profile, recent progress, and current plan
#[must_use]
pub fn build_adjustment_prompt(profile: &Profile, metrics: &WeeklyMetrics) -> String {
    let mut prompt = String::new();
    let current_weight = metrics.current_weight().unwrap_or(profile.weight_kg);
    let calorie_target = metrics
        .current_calorie_target
        .or(profile.daily_calorie_target)
        .unwrap_or(metrics.avg_calories);
    let split = metrics.current_macro_split;

    let _ = writeln!(prompt, "User Profile:");
    let _ = writeln!(prompt, "Age: {}", profile.age);
    let _ = writeln!(prompt, "Gender: {:?}", profile.gender);
    let _ = writeln!(prompt, "Goal: {}", profile.goal);
    let _ = writeln!(prompt, "Current Weight: {current_weight:.1} kg");
    let _ = writeln!(prompt, "Target Weight: {:.1} kg", profile.target_weight_kg);
    let _ = writeln!(prompt, "Activity Level: {:?}", profile.activity_level);
    let _ = writeln!(prompt, "Experience Level: {:?}", profile.experience_level);
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Past 4 Weeks Data:");
    for (week, weight) in metrics.week_weights.iter().enumerate() {
        let _ = writeln!(prompt, "Week {} Weight: {weight:.1} kg", week + 1);
    }
    let _ = writeln!(
        prompt,
        "Average Weekly Change: {:.2} kg",
        metrics.avg_weekly_change
    );
    let _ = writeln!(
        prompt,
        "Workout Adherence: {}%",
        metrics.workout_adherence_pct
    );
    let _ = writeln!(prompt, "Diet Adherence: {}%", metrics.diet_adherence_pct);
    let _ = writeln!(prompt, "Habit Score: {}", metrics.habit_score);
    let _ = writeln!(
        prompt,
        "Fatigue Reports (last 7 days): {}",
        metrics.fatigue_count_7d
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Current Plan:");
    let _ = writeln!(prompt, "Calorie Target: {calorie_target} kcal");
    let _ = writeln!(
        prompt,
        "Macro Split: {}% protein, {}% carbs, {}% fat",
        split.protein, split.carbs, split.fat
    );
    let _ = writeln!(
        prompt,
        "Workout Volume: {} sets per week",
        metrics.current_workout_volume
    );
    let _ = writeln!(prompt, "Workout Structure: {}", metrics.split_type);
    prompt
}
