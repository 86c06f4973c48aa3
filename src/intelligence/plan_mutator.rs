// ABOUTME: Applies adjustment decisions to workout and diet plans as pure transforms
// ABOUTME: Calorie and macro retargeting, set scaling, plan simplification, and beginner reset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Mutator
//!
//! Every transform takes a plan by reference and returns a new plan value.
//! Persisting the result is the caller's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::decision::{AdjustmentAction, AdjustmentDecision, Recommendation};
use crate::constants::plans::{
    MAX_SETS, MIN_SETS, RESET_MAX_EXERCISES, RESET_TRAINING_DAYS, SIMPLIFIED_MAX_EXERCISES,
};
use crate::errors::{AppError, AppResult};
use crate::models::{DietPlan, MacroSplit, MealMacros, WorkoutPlan};
use crate::store::FitnessDataStore;

const SIMPLIFIED_NOTE: &str = "Simplified plan for better adherence - focus on key compound movements";
const RESET_TRAINING_NOTE: &str = "Beginner-friendly reset - 3 exercises per session";
const RESET_REST_NOTE: &str = "Rest day for recovery";

/// Result of applying a decision
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppliedAdjustment {
    /// Whether the workout plan changed
    pub workout_adjusted: bool,
    /// Whether the diet plan changed
    pub diet_adjusted: bool,
    /// The new workout plan, when changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_workout: Option<WorkoutPlan>,
    /// The new diet plan, when changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_diet: Option<DietPlan>,
    /// Human-readable summary of each change
    pub changes: Vec<String>,
}

impl AppliedAdjustment {
    /// Whether anything changed
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.workout_adjusted && !self.diet_adjusted
    }
}

/// Retarget a diet plan to `new_calories`
///
/// Grams follow `macros`, else the plan's current split, else the default
/// split. Meals keep their previous share of the day's calories.
#[must_use]
pub fn adjust_diet(
    plan: &DietPlan,
    new_calories: u32,
    macros: Option<MacroSplit>,
    reason: &str,
    now: DateTime<Utc>,
) -> DietPlan {
    let split = macros
        .or_else(|| plan.macro_split())
        .unwrap_or_default();
    let (protein_grams, carbs_grams, fat_grams) = split.grams_for(new_calories);

    let meal_total = plan
        .meals
        .iter()
        .fold(0_u32, |total, meal| total.saturating_add(meal.estimated_calories));
    let meals = plan
        .meals
        .iter()
        .map(|meal| {
            let mut meal = meal.clone();
            if meal_total > 0 && meal.estimated_calories > 0 {
                let share = f64::from(meal.estimated_calories) / f64::from(meal_total);
                let calories = (f64::from(new_calories) * share).round() as u32;
                let ratio = f64::from(calories) / f64::from(meal.estimated_calories);
                let scale = |grams: u32| (f64::from(grams) * ratio).round() as u32;
                meal.macros = MealMacros {
                    protein_g: scale(meal.macros.protein_g),
                    carbs_g: scale(meal.macros.carbs_g),
                    fat_g: scale(meal.macros.fat_g),
                };
                meal.estimated_calories = calories;
            }
            meal
        })
        .collect();

    DietPlan {
        daily_calories: new_calories,
        protein_grams,
        carbs_grams,
        fat_grams,
        meals,
        adjusted: true,
        adjustment_reason: Some(reason.to_owned()),
        adjustment_date: Some(now),
        ..plan.clone()
    }
}

/// Scale sets on training days by `(1 + pct / 100)`, clamped to `MIN_SETS..=MAX_SETS`
#[must_use]
pub fn scale_volume(plan: &WorkoutPlan, pct: f64, note: &str) -> WorkoutPlan {
    let multiplier = 1.0 + pct / 100.0;
    let mut adjusted = plan.clone();
    for day in adjusted.workouts.iter_mut().filter(|d| !d.rest_day) {
        for exercise in &mut day.exercises {
            let scaled = (f64::from(exercise.sets) * multiplier)
                .round()
                .clamp(f64::from(MIN_SETS), f64::from(MAX_SETS));
            exercise.sets = scaled as u32;
            exercise.guidance = if exercise.guidance.is_empty() {
                note.to_owned()
            } else {
                format!("{} | {note}", exercise.guidance)
            };
        }
    }
    adjusted
}

/// Keep at most four exercises on each training day
#[must_use]
pub fn simplify(plan: &WorkoutPlan) -> WorkoutPlan {
    let mut adjusted = plan.clone();
    for day in adjusted.workouts.iter_mut().filter(|d| !d.rest_day) {
        if day.exercises.len() > SIMPLIFIED_MAX_EXERCISES {
            day.exercises.truncate(SIMPLIFIED_MAX_EXERCISES);
            day.notes = Some(SIMPLIFIED_NOTE.to_owned());
        }
    }
    adjusted
}

/// Three-day beginner template: Monday, Wednesday, Friday with up to three exercises
#[must_use]
pub fn reset(plan: &WorkoutPlan) -> WorkoutPlan {
    let mut adjusted = plan.clone();
    for day in &mut adjusted.workouts {
        let name = day.day_name.to_lowercase();
        if RESET_TRAINING_DAYS.contains(&name.as_str()) {
            day.exercises.truncate(RESET_MAX_EXERCISES);
            day.notes = Some(RESET_TRAINING_NOTE.to_owned());
        } else {
            day.rest_day = true;
            day.exercises.clear();
            day.notes = Some(RESET_REST_NOTE.to_owned());
        }
    }
    adjusted
}

fn volume_note(recommendation: &Recommendation, pct: f64) -> String {
    match recommendation.action {
        AdjustmentAction::AiAdjustment => format!("AI adjusted: {}", recommendation.description),
        _ => format!("Volume {} {:.0}% for progressive overload", direction(pct), pct.abs()),
    }
}

const fn direction(pct: f64) -> &'static str {
    if pct < 0.0 {
        "reduced"
    } else {
        "increased"
    }
}

fn join_actions<'a>(recommendations: impl Iterator<Item = &'a Recommendation>) -> String {
    recommendations
        .map(|r| r.action.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Apply `decision` to the given plans without touching storage
///
/// # Errors
///
/// Returns `ResourceNotFound` when the decision needs a plan that is absent
pub fn apply_to_plans(
    decision: &AdjustmentDecision,
    workout: Option<&WorkoutPlan>,
    diet: Option<&DietPlan>,
    now: DateTime<Utc>,
) -> AppResult<AppliedAdjustment> {
    let mut applied = AppliedAdjustment::default();
    if !decision.needs_adjustment {
        return Ok(applied);
    }

    let workout_recs: Vec<&Recommendation> = decision
        .recommendations
        .iter()
        .filter(|r| r.affects_workout())
        .collect();
    let diet_rec = decision.recommendations.iter().find(|r| r.affects_diet());

    if !workout_recs.is_empty() {
        let original = workout.ok_or_else(|| AppError::not_found("Workout plan"))?;
        let mut plan = original.clone();

        for recommendation in &workout_recs {
            plan = match recommendation.action {
                AdjustmentAction::SimplifyPlan => {
                    applied
                        .changes
                        .push(format!("Simplified training days to at most {SIMPLIFIED_MAX_EXERCISES} exercises"));
                    simplify(&plan)
                }
                AdjustmentAction::ResetPlan => {
                    applied
                        .changes
                        .push("Reset to a 3-day beginner plan (Monday, Wednesday, Friday)".to_owned());
                    reset(&plan)
                }
                _ => {
                    let pct = recommendation.volume_change_pct.unwrap_or_default();
                    let before = plan.total_sets();
                    let scaled = scale_volume(&plan, pct, &volume_note(recommendation, pct));
                    applied.changes.push(format!(
                        "Weekly sets changed from {before} to {} ({pct:+.0}%)",
                        scaled.total_sets()
                    ));
                    scaled
                }
            };
        }

        plan.adjusted = true;
        plan.adjustment_reason = Some(join_actions(workout_recs.iter().copied()));
        plan.adjustment_date = Some(now);
        applied.workout_adjusted = true;
        applied.adjusted_workout = Some(plan);
    }

    if let Some(recommendation) = diet_rec {
        let original = diet.ok_or_else(|| AppError::not_found("Diet plan"))?;
        if let Some(new_calories) = recommendation.new_calories {
            let plan = adjust_diet(
                original,
                new_calories,
                recommendation.new_macros,
                recommendation.action.as_str(),
                now,
            );
            applied.changes.push(format!(
                "Daily calories changed from {} to {} kcal (P {}g / C {}g / F {}g)",
                original.daily_calories,
                plan.daily_calories,
                plan.protein_grams,
                plan.carbs_grams,
                plan.fat_grams
            ));
            applied.diet_adjusted = true;
            applied.adjusted_diet = Some(plan);
        }
    }

    Ok(applied)
}

/// Load the latest plans for `user_id` and apply `decision`
///
/// Plans are only read when the decision needs an adjustment. Nothing is persisted.
///
/// # Errors
///
/// Returns `ResourceNotFound` when a needed plan is absent, or a store error
#[instrument(skip(store, decision), fields(user_id = %user_id, needs_adjustment = decision.needs_adjustment))]
pub async fn apply_decision(
    store: &dyn FitnessDataStore,
    user_id: Uuid,
    decision: &AdjustmentDecision,
    now: DateTime<Utc>,
) -> AppResult<AppliedAdjustment> {
    if !decision.needs_adjustment {
        debug!("Decision needs no adjustment, plans untouched");
        return Ok(AppliedAdjustment::default());
    }

    let needs_workout = decision.recommendations.iter().any(Recommendation::affects_workout);
    let needs_diet = decision.recommendations.iter().any(Recommendation::affects_diet);

    let workout = if needs_workout {
        store.get_latest_workout_plan(user_id).await?
    } else {
        None
    };
    let diet = if needs_diet {
        store.get_latest_diet_plan(user_id).await?
    } else {
        None
    };

    apply_to_plans(decision, workout.as_ref(), diet.as_ref(), now)
}
