// ABOUTME: Tests for applying adjustment decisions to workout and diet plans
// ABOUTME: Calorie retargeting, macro preservation, set scaling with floor, simplification, reset, and chaining
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{
    fixed_now, init_test_logging, sample_diet_plan, sample_profile, sample_workout_plan,
    seeded_store, test_user_id,
};
use fitai_engine::intelligence::plan_mutator::{adjust_diet, reset, scale_volume, simplify};
use fitai_engine::intelligence::{
    apply_decision, apply_to_plans, AdjustmentAction, AdjustmentDecision, AdjustmentTrigger,
    DecisionSource, Recommendation, Severity, TriggerKind,
};
use fitai_engine::models::{FitnessGoal, MacroSplit};
use fitai_engine::store::FitnessDataStore;

fn decision_with(recommendations: Vec<Recommendation>) -> AdjustmentDecision {
    AdjustmentDecision {
        needs_adjustment: true,
        source: DecisionSource::Rule,
        triggers: vec![AdjustmentTrigger {
            kind: TriggerKind::LowAdherence,
            message: "test trigger".to_owned(),
            severity: Severity::Medium,
        }],
        recommendations,
        notification_text: "Your plan has been updated: test trigger".to_owned(),
    }
}

// ============================================================================
// Diet
// ============================================================================

#[test]
fn test_macro_grams_round_trip_to_target() {
    let split = MacroSplit::new(30, 40, 30);

    let (protein, carbs, fat) = split.grams_for(2000);

    assert_eq!((protein, carbs, fat), (150, 200, 67));
    let kcal = protein * 4 + carbs * 4 + fat * 9;
    assert!(kcal.abs_diff(2000) <= 20, "{kcal} kcal");
    assert_eq!(
        MacroSplit::from_grams(protein, carbs, fat, 2000),
        Some(split)
    );
}

#[test]
fn test_adjust_diet_keeps_current_split() {
    let now = fixed_now();
    let plan = sample_diet_plan(test_user_id(), now);

    let adjusted = adjust_diet(&plan, 1800, None, "increase_deficit", now);

    assert_eq!(adjusted.daily_calories, 1800);
    assert_eq!(
        (adjusted.protein_grams, adjusted.carbs_grams, adjusted.fat_grams),
        (135, 180, 60)
    );
    assert_eq!(adjusted.macro_split(), plan.macro_split());
    assert!(adjusted.adjusted);
    assert_eq!(adjusted.adjustment_reason.as_deref(), Some("increase_deficit"));
    assert_eq!(adjusted.adjustment_date, Some(now));
    assert_eq!(adjusted.id, plan.id);
    assert_eq!(adjusted.week_number, plan.week_number);
}

#[test]
fn test_adjust_diet_rescales_meals_by_share() {
    let now = fixed_now();
    let plan = sample_diet_plan(test_user_id(), now);

    let adjusted = adjust_diet(&plan, 1800, None, "increase_deficit", now);

    let calories: Vec<u32> = adjusted.meals.iter().map(|m| m.estimated_calories).collect();
    assert_eq!(calories, vec![540, 720, 540]);
    assert_eq!(adjusted.meals[1].macros.protein_g, 54);
    assert_eq!(adjusted.meals[1].macros.carbs_g, 72);
    assert_eq!(adjusted.meals[0].meal_name, "Breakfast");
}

#[test]
fn test_adjust_diet_with_new_split() {
    let now = fixed_now();
    let plan = sample_diet_plan(test_user_id(), now);

    let adjusted = adjust_diet(
        &plan,
        1850,
        Some(MacroSplit::new(35, 35, 30)),
        "ai_adjustment",
        now,
    );

    assert_eq!(
        (adjusted.protein_grams, adjusted.carbs_grams, adjusted.fat_grams),
        (162, 162, 62)
    );
    assert_eq!(adjusted.macro_split(), Some(MacroSplit::new(35, 35, 30)));
}

#[test]
fn test_adjust_diet_does_not_touch_input() {
    let now = fixed_now();
    let plan = sample_diet_plan(test_user_id(), now);
    let before = plan.clone();

    let _ = adjust_diet(&plan, 2300, None, "reduce_deficit", now);

    assert_eq!(plan, before);
}

// ============================================================================
// Workout
// ============================================================================

#[test]
fn test_scale_volume_rounds_and_annotates() {
    let plan = sample_workout_plan(test_user_id(), fixed_now());

    let scaled = scale_volume(&plan, 20.0, "Volume increased 20% for progressive overload");

    assert_eq!(scaled.total_sets(), 100);
    let first = &scaled.workouts[0].exercises[0];
    assert_eq!(first.sets, 4);
    assert_eq!(
        first.guidance,
        "Controlled tempo | Volume increased 20% for progressive overload"
    );
    assert!(scaled.workouts[5].exercises.is_empty());
}

#[test]
fn test_scale_volume_never_drops_below_one_set() {
    let plan = sample_workout_plan(test_user_id(), fixed_now());

    let scaled = scale_volume(&plan, -90.0, "deload");

    assert!(scaled
        .workouts
        .iter()
        .flat_map(|day| &day.exercises)
        .all(|exercise| exercise.sets == 1));
    assert_eq!(scaled.total_sets(), 25);
}

#[test]
fn test_scale_volume_caps_sets_per_exercise() {
    let plan = sample_workout_plan(test_user_id(), fixed_now());

    let scaled = scale_volume(&plan, 1e12, "overload");

    assert!(scaled
        .workouts
        .iter()
        .flat_map(|day| &day.exercises)
        .all(|exercise| exercise.sets == 20));
    assert_eq!(scaled.total_sets(), 500);
}

#[test]
fn test_simplify_caps_exercises() {
    let plan = sample_workout_plan(test_user_id(), fixed_now());

    let simplified = simplify(&plan);

    for day in simplified.workouts.iter().filter(|d| !d.rest_day) {
        assert_eq!(day.exercises.len(), 4);
        assert!(day.notes.as_deref().unwrap().starts_with("Simplified plan"));
    }
    assert_eq!(simplified.total_sets(), 60);
    assert_eq!(simplified.workouts.len(), 7);
}

#[test]
fn test_reset_to_three_day_template() {
    let plan = sample_workout_plan(test_user_id(), fixed_now());

    let template = reset(&plan);

    let training: Vec<&str> = template
        .workouts
        .iter()
        .filter(|d| !d.rest_day)
        .map(|d| d.day_name.as_str())
        .collect();
    assert_eq!(training, vec!["Monday", "Wednesday", "Friday"]);
    for day in template.workouts.iter().filter(|d| !d.rest_day) {
        assert_eq!(day.exercises.len(), 3);
    }
    let tuesday = &template.workouts[1];
    assert!(tuesday.rest_day);
    assert!(tuesday.exercises.is_empty());
    assert_eq!(tuesday.notes.as_deref(), Some("Rest day for recovery"));
    assert_eq!(template.total_sets(), 27);
}

// ============================================================================
// Applying Decisions
// ============================================================================

#[test]
fn test_no_adjustment_leaves_plans_untouched() {
    let now = fixed_now();
    let workout = sample_workout_plan(test_user_id(), now);
    let diet = sample_diet_plan(test_user_id(), now);

    let applied = apply_to_plans(
        &AdjustmentDecision::no_change(DecisionSource::Ai),
        Some(&workout),
        Some(&diet),
        now,
    )
    .unwrap();

    assert!(applied.is_empty());
    assert!(applied.adjusted_workout.is_none());
    assert!(applied.adjusted_diet.is_none());
    assert!(applied.changes.is_empty());
}

#[test]
fn test_calorie_only_decision_needs_no_workout_plan() {
    let now = fixed_now();
    let diet = sample_diet_plan(test_user_id(), now);
    let decision = decision_with(vec![Recommendation::new(
        AdjustmentAction::IncreaseDeficit,
        "Slightly increase calorie deficit by 10%",
    )
    .with_calories(Some(1800))]);

    let applied = apply_to_plans(&decision, None, Some(&diet), now).unwrap();

    assert!(applied.diet_adjusted);
    assert!(!applied.workout_adjusted);
    assert_eq!(
        applied.changes,
        vec!["Daily calories changed from 2000 to 1800 kcal (P 135g / C 180g / F 60g)"]
    );
    let adjusted = applied.adjusted_diet.unwrap();
    assert_eq!(adjusted.adjustment_reason.as_deref(), Some("increase_deficit"));
}

#[test]
fn test_volume_and_surplus_applied_together() {
    let now = fixed_now();
    let workout = sample_workout_plan(test_user_id(), now);
    let diet = sample_diet_plan(test_user_id(), now);
    let decision = decision_with(vec![
        Recommendation::new(AdjustmentAction::IncreaseVolume, "Increase workout volume by 20%")
            .with_volume_change(20.0),
        Recommendation::new(AdjustmentAction::IncreaseCalories, "Increase calories by 10%")
            .with_calories(Some(2200)),
    ]);

    let applied = apply_to_plans(&decision, Some(&workout), Some(&diet), now).unwrap();

    assert!(applied.workout_adjusted && applied.diet_adjusted);
    let plan = applied.adjusted_workout.unwrap();
    assert_eq!(plan.total_sets(), 100);
    assert_eq!(plan.adjustment_reason.as_deref(), Some("increase_volume"));
    assert_eq!(plan.adjustment_date, Some(now));
    assert!(plan.workouts[0].exercises[0]
        .guidance
        .ends_with("Volume increased 20% for progressive overload"));
    assert_eq!(applied.changes[0], "Weekly sets changed from 75 to 100 (+20%)");
    assert_eq!(applied.adjusted_diet.unwrap().daily_calories, 2200);
}

#[test]
fn test_simplify_then_reset_chain_in_order() {
    let now = fixed_now();
    let workout = sample_workout_plan(test_user_id(), now);
    let decision = decision_with(vec![
        Recommendation::new(AdjustmentAction::SimplifyPlan, "Simplify"),
        Recommendation::new(AdjustmentAction::ResetPlan, "Reset"),
    ]);

    let applied = apply_to_plans(&decision, Some(&workout), None, now).unwrap();

    let plan = applied.adjusted_workout.unwrap();
    assert_eq!(
        plan.adjustment_reason.as_deref(),
        Some("simplify_plan, reset_plan")
    );
    assert_eq!(plan.total_sets(), 27);
    assert_eq!(applied.changes.len(), 2);
    assert!(applied.changes[1].starts_with("Reset to a 3-day beginner plan"));
    assert!(!applied.diet_adjusted);
}

#[test]
fn test_ai_volume_note_carries_description() {
    let now = fixed_now();
    let workout = sample_workout_plan(test_user_id(), now);
    let mut recommendation =
        Recommendation::new(AdjustmentAction::AiAdjustment, "Deload week").with_volume_change(-33.0);
    recommendation.new_macros = Some(MacroSplit::new(30, 40, 30));
    let decision = decision_with(vec![recommendation]);

    let applied = apply_to_plans(&decision, Some(&workout), None, now).unwrap();

    let plan = applied.adjusted_workout.unwrap();
    assert_eq!(plan.workouts[0].exercises[0].sets, 2);
    assert!(plan.workouts[0].exercises[0]
        .guidance
        .ends_with("AI adjusted: Deload week"));
    assert_eq!(applied.changes[0], "Weekly sets changed from 75 to 50 (-33%)");
}

#[test]
fn test_missing_plans_are_not_found() {
    let now = fixed_now();
    let volume = decision_with(vec![
        Recommendation::new(AdjustmentAction::IncreaseVolume, "More sets").with_volume_change(20.0),
    ]);
    let calories = decision_with(vec![
        Recommendation::new(AdjustmentAction::ReduceDeficit, "Eat more").with_calories(Some(2300)),
    ]);

    let workout_error = apply_to_plans(&volume, None, None, now).unwrap_err();
    let diet_error = apply_to_plans(&calories, None, None, now).unwrap_err();

    assert!(workout_error.is_not_found());
    assert_eq!(workout_error.message, "Workout plan not found");
    assert_eq!(diet_error.message, "Diet plan not found");
}

#[tokio::test]
async fn test_apply_decision_reads_store_without_writing() {
    init_test_logging();
    let now = fixed_now();
    let user = test_user_id();
    let workout = sample_workout_plan(user, now);
    let store = seeded_store(
        sample_profile(user, FitnessGoal::MuscleGain),
        Vec::new(),
        Some(workout.clone()),
        Some(sample_diet_plan(user, now)),
    )
    .await;
    let decision = decision_with(vec![
        Recommendation::new(AdjustmentAction::IncreaseVolume, "More sets").with_volume_change(20.0),
    ]);

    let applied = apply_decision(store.as_ref(), user, &decision, now)
        .await
        .unwrap();

    assert!(applied.workout_adjusted);
    let stored = store.get_latest_workout_plan(user).await.unwrap().unwrap();
    assert_eq!(stored, workout);
}
