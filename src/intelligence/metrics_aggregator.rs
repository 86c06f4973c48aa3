// ABOUTME: Reduces a rolling window of daily logs and current plans into weekly progress metrics
// ABOUTME: Weekly weight buckets, adherence, habit score, fatigue, calories, and plan snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Weekly metrics aggregation
//!
//! Metrics are derived on demand and never cached. Missing data degrades to
//! zero values rather than errors so a sparse log history still produces a
//! usable evaluation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::constants::adjustment::{HABIT_DIET_WEIGHT, HABIT_WORKOUT_WEIGHT};
use crate::constants::cycles::{
    DAYS_PER_WEEK, FATIGUE_WINDOW_DAYS, MAX_EVALUATION_WINDOW_DAYS, MIN_EVALUATION_WINDOW_DAYS,
    WEEK_BUCKETS,
};
use crate::constants::plans::DEFAULT_SPLIT_TYPE;
use crate::errors::{AppError, AppResult};
use crate::models::{DailyLog, DietPlan, MacroSplit, Profile, WorkoutPlan};
use crate::store::FitnessDataStore;

/// Normalized progress metrics over an evaluation window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyMetrics {
    /// Mean valid weight per 7-day bucket, oldest first; 0 when a bucket is empty
    pub week_weights: [f64; WEEK_BUCKETS],
    /// Average change in kg per week across valid buckets (negative = losing)
    pub avg_weekly_change: f64,
    /// Share of logs with a completed workout (0-100)
    pub workout_adherence_pct: u32,
    /// Share of logs with the diet followed (0-100)
    pub diet_adherence_pct: u32,
    /// Weighted blend of workout and diet adherence (0-100)
    pub habit_score: u32,
    /// Fatigue flags in the trailing 7 days
    pub fatigue_count_7d: u32,
    /// Mean calories per log, missing values counted as 0
    pub avg_calories: u32,
    /// Macro split of the latest diet plan, or the default split
    pub current_macro_split: MacroSplit,
    /// Daily calorie target of the latest diet plan
    pub current_calorie_target: Option<u32>,
    /// Total weekly sets of the latest workout plan
    pub current_workout_volume: u32,
    /// Split type of the latest workout plan
    pub split_type: String,
    /// Logs that fell inside the window
    pub logs_in_window: usize,
}

impl WeeklyMetrics {
    /// Derive metrics from logs, counting only those within `window_days` before `now`
    #[must_use]
    pub fn from_logs(
        logs: &[DailyLog],
        workout_plan: Option<&WorkoutPlan>,
        diet_plan: Option<&DietPlan>,
        now: DateTime<Utc>,
        window_days: u32,
    ) -> Self {
        let window_start = now - Duration::days(i64::from(window_days));
        let logs: Vec<&DailyLog> = logs
            .iter()
            .filter(|log| log.date >= window_start && log.date <= now)
            .collect();

        let week_weights = weekly_average_weights(logs.iter().copied(), now);
        let workout_adherence_pct = percentage(&logs, |log| log.workout_completed);
        let diet_adherence_pct = percentage(&logs, |log| log.diet_followed);

        let fatigue_since = now - Duration::days(FATIGUE_WINDOW_DAYS);
        let fatigue_count_7d = logs
            .iter()
            .filter(|log| log.date >= fatigue_since && log.is_fatigued())
            .count() as u32;

        Self {
            week_weights,
            avg_weekly_change: average_weekly_change(&week_weights),
            workout_adherence_pct,
            diet_adherence_pct,
            habit_score: habit_score(workout_adherence_pct, diet_adherence_pct),
            fatigue_count_7d,
            avg_calories: average_calories(&logs),
            current_macro_split: diet_plan
                .and_then(DietPlan::macro_split)
                .unwrap_or_default(),
            current_calorie_target: diet_plan.map(|plan| plan.daily_calories),
            current_workout_volume: workout_plan.map_or(0, WorkoutPlan::total_sets),
            split_type: workout_plan
                .map_or(DEFAULT_SPLIT_TYPE, WorkoutPlan::split_type)
                .to_owned(),
            logs_in_window: logs.len(),
        }
    }

    /// Weight lost per week (positive = losing)
    #[must_use]
    pub fn weight_loss_rate(&self) -> f64 {
        -self.avg_weekly_change
    }

    /// Mean of workout and diet adherence
    #[must_use]
    pub fn combined_adherence(&self) -> f64 {
        f64::from(self.workout_adherence_pct + self.diet_adherence_pct) / 2.0
    }

    /// Most recent non-empty weekly weight
    #[must_use]
    pub fn current_weight(&self) -> Option<f64> {
        self.week_weights.iter().rev().copied().find(|w| *w > 0.0)
    }
}

/// Mean positive weight per 7-day bucket, index 3 = most recent week
#[must_use]
pub fn weekly_average_weights<'a>(
    logs: impl IntoIterator<Item = &'a DailyLog>,
    now: DateTime<Utc>,
) -> [f64; WEEK_BUCKETS] {
    let mut sums = [0.0_f64; WEEK_BUCKETS];
    let mut counts = [0_u32; WEEK_BUCKETS];

    for log in logs {
        let Some(weight) = log.valid_weight() else {
            continue;
        };
        let days_since = (now - log.date).num_days();
        if days_since < 0 {
            continue;
        }
        let week_index = (days_since / DAYS_PER_WEEK) as usize;
        if week_index < WEEK_BUCKETS {
            let bucket = WEEK_BUCKETS - 1 - week_index;
            sums[bucket] += weight;
            counts[bucket] += 1;
        }
    }

    let mut averages = [0.0_f64; WEEK_BUCKETS];
    for (i, average) in averages.iter_mut().enumerate() {
        if counts[i] > 0 {
            *average = sums[i] / f64::from(counts[i]);
        }
    }
    averages
}

/// `(last valid - first valid) / (valid buckets - 1)`, 0 with fewer than two valid buckets
#[must_use]
pub fn average_weekly_change(week_weights: &[f64]) -> f64 {
    let valid: Vec<f64> = week_weights.iter().copied().filter(|w| *w > 0.0).collect();
    match (valid.first(), valid.last()) {
        (Some(first), Some(last)) if valid.len() >= 2 => (last - first) / (valid.len() - 1) as f64,
        _ => 0.0,
    }
}

/// Weighted habit score from workout and diet adherence
#[must_use]
pub fn habit_score(workout_adherence_pct: u32, diet_adherence_pct: u32) -> u32 {
    f64::from(workout_adherence_pct)
        .mul_add(
            HABIT_WORKOUT_WEIGHT,
            f64::from(diet_adherence_pct) * HABIT_DIET_WEIGHT,
        )
        .round() as u32
}

fn percentage(logs: &[&DailyLog], predicate: impl Fn(&DailyLog) -> bool) -> u32 {
    if logs.is_empty() {
        return 0;
    }
    let hits = logs.iter().filter(|&&log| predicate(log)).count();
    (hits as f64 / logs.len() as f64 * 100.0).round() as u32
}

fn average_calories(logs: &[&DailyLog]) -> u32 {
    if logs.is_empty() {
        return 0;
    }
    let total: u64 = logs
        .iter()
        .map(|log| u64::from(log.calories_consumed.unwrap_or(0)))
        .sum();
    (total as f64 / logs.len() as f64).round() as u32
}

/// Check an evaluation window length
///
/// # Errors
///
/// Returns `ValueOutOfRange` when `window_days` is outside 7..=182
pub fn validate_window(window_days: u32) -> AppResult<()> {
    if (MIN_EVALUATION_WINDOW_DAYS..=MAX_EVALUATION_WINDOW_DAYS).contains(&window_days) {
        Ok(())
    } else {
        Err(AppError::out_of_range(
            "window_days",
            format!(
                "Evaluation window must be between {MIN_EVALUATION_WINDOW_DAYS} and {MAX_EVALUATION_WINDOW_DAYS} days, got {window_days}"
            ),
        ))
    }
}

/// Load the window's logs and latest plans, then derive metrics
///
/// # Errors
///
/// Returns a validation error for an out-of-range window, `ResourceNotFound`
/// when the profile does not exist, or a store error
#[instrument(skip(store), fields(user_id = %user_id))]
pub async fn compute_weekly_metrics(
    store: &dyn FitnessDataStore,
    user_id: Uuid,
    window_days: u32,
    now: DateTime<Utc>,
) -> AppResult<WeeklyMetrics> {
    validate_window(window_days)?;

    let profile = store
        .get_profile(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Profile"))?;

    compute_metrics_for_profile(store, &profile, window_days, now).await
}

/// [`compute_weekly_metrics`] for a profile the caller already loaded
///
/// # Errors
///
/// Returns a validation error for an out-of-range window, or a store error
pub async fn compute_metrics_for_profile(
    store: &dyn FitnessDataStore,
    profile: &Profile,
    window_days: u32,
    now: DateTime<Utc>,
) -> AppResult<WeeklyMetrics> {
    validate_window(window_days)?;

    let user_id = profile.user_id;
    let start = now - Duration::days(i64::from(window_days));
    let logs = store.get_logs_in_range(user_id, start, now).await?;
    let workout_plan = store.get_latest_workout_plan(user_id).await?;
    let diet_plan = store.get_latest_diet_plan(user_id).await?;

    let metrics = WeeklyMetrics::from_logs(
        &logs,
        workout_plan.as_ref(),
        diet_plan.as_ref(),
        now,
        window_days,
    );

    debug!(
        logs = metrics.logs_in_window,
        avg_weekly_change = metrics.avg_weekly_change,
        habit_score = metrics.habit_score,
        "Computed weekly metrics"
    );

    Ok(metrics)
}
