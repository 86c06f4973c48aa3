// ABOUTME: Deterministic rule table for plan adjustment decisions
// ABOUTME: Goal-aware weight trend and adherence triggers with calorie and volume recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Rule-based plan evaluation
//!
//! Every rule is evaluated independently and all fired triggers accumulate.
//! Inputs come only from [`WeeklyMetrics`] and the profile goal, so the same
//! metrics always yield the same decision.

use super::decision::{
    AdjustmentAction, AdjustmentDecision, AdjustmentTrigger, DecisionSource, Recommendation,
    Severity, TriggerKind,
};
use super::metrics_aggregator::WeeklyMetrics;
use crate::constants::adjustment::{
    INCREASE_DEFICIT_MULTIPLIER, LOW_ADHERENCE_PCT, NO_PROGRESS_KG_PER_WEEK,
    RAPID_WEIGHT_LOSS_KG_PER_WEEK, REDUCE_DEFICIT_MULTIPLIER, RESET_ADHERENCE_PCT,
    SLOW_WEIGHT_LOSS_KG_PER_WEEK, STAGNANT_GAIN_KG_PER_WEEK, STAGNANT_VOLUME_INCREASE_PCT,
    SURPLUS_MULTIPLIER,
};
use crate::models::FitnessGoal;

/// Scale average intake by `multiplier`; `None` when there is no intake data
fn scaled_calories(avg_calories: u32, multiplier: f64) -> Option<u32> {
    (avg_calories > 0).then(|| (f64::from(avg_calories) * multiplier).round() as u32)
}

/// Evaluate the rule table
#[must_use]
pub fn evaluate_rules(goal: FitnessGoal, metrics: &WeeklyMetrics) -> AdjustmentDecision {
    let loss_rate = metrics.weight_loss_rate();
    let change = metrics.avg_weekly_change;
    let adherence = metrics.combined_adherence();

    let mut triggers = Vec::new();
    let mut recommendations = Vec::new();

    if goal == FitnessGoal::WeightLoss
        && (0.0..SLOW_WEIGHT_LOSS_KG_PER_WEEK).contains(&loss_rate)
    {
        triggers.push(AdjustmentTrigger {
            kind: TriggerKind::SlowWeightLoss,
            message: format!(
                "Weight loss slower than target (< {SLOW_WEIGHT_LOSS_KG_PER_WEEK} kg/week), currently {loss_rate:.2} kg/week"
            ),
            severity: Severity::Low,
        });
        recommendations.push(
            Recommendation::new(
                AdjustmentAction::IncreaseDeficit,
                "Slightly increase calorie deficit by 10%",
            )
            .with_calories(scaled_calories(
                metrics.avg_calories,
                INCREASE_DEFICIT_MULTIPLIER,
            )),
        );
    }

    if goal == FitnessGoal::WeightLoss && loss_rate > RAPID_WEIGHT_LOSS_KG_PER_WEEK {
        triggers.push(AdjustmentTrigger {
            kind: TriggerKind::RapidWeightLoss,
            message: format!(
                "Weight loss too rapid (> {RAPID_WEIGHT_LOSS_KG_PER_WEEK} kg/week), currently {loss_rate:.2} kg/week"
            ),
            severity: Severity::High,
        });
        recommendations.push(
            Recommendation::new(
                AdjustmentAction::ReduceDeficit,
                "Increase calorie intake by 15% for safety",
            )
            .with_calories(scaled_calories(
                metrics.avg_calories,
                REDUCE_DEFICIT_MULTIPLIER,
            )),
        );
    }

    if goal == FitnessGoal::MuscleGain && change.abs() < STAGNANT_GAIN_KG_PER_WEEK {
        triggers.push(AdjustmentTrigger {
            kind: TriggerKind::StagnantMuscleGain,
            message: format!(
                "Muscle gain progress stagnant (< {STAGNANT_GAIN_KG_PER_WEEK} kg/week), currently {change:.2} kg/week"
            ),
            severity: Severity::Low,
        });
        recommendations.push(
            Recommendation::new(
                AdjustmentAction::IncreaseVolume,
                "Increase workout volume by 20% for progressive overload",
            )
            .with_volume_change(STAGNANT_VOLUME_INCREASE_PCT),
        );
        recommendations.push(
            Recommendation::new(
                AdjustmentAction::IncreaseCalories,
                "Increase calorie intake by 10% for a caloric surplus",
            )
            .with_calories(scaled_calories(metrics.avg_calories, SURPLUS_MULTIPLIER)),
        );
    }

    if adherence < LOW_ADHERENCE_PCT {
        triggers.push(AdjustmentTrigger {
            kind: TriggerKind::LowAdherence,
            message: format!(
                "Low adherence rate (< {LOW_ADHERENCE_PCT}%), currently {adherence:.1}%"
            ),
            severity: Severity::Medium,
        });
        recommendations.push(Recommendation::new(
            AdjustmentAction::SimplifyPlan,
            "Simplify workout and diet plan for better adherence",
        ));
    }

    if change.abs() < NO_PROGRESS_KG_PER_WEEK && adherence < RESET_ADHERENCE_PCT {
        triggers.push(AdjustmentTrigger {
            kind: TriggerKind::NoProgressLowAdherence,
            message: "No progress with low adherence".to_owned(),
            severity: Severity::High,
        });
        recommendations.push(Recommendation::new(
            AdjustmentAction::ResetPlan,
            "Reset to beginner-friendly plan with easier goals",
        ));
    }

    if triggers.is_empty() {
        return AdjustmentDecision::no_change(DecisionSource::Rule);
    }

    let notification_text = notification_for(&triggers);
    AdjustmentDecision {
        needs_adjustment: true,
        source: DecisionSource::Rule,
        triggers,
        recommendations,
        notification_text,
    }
}

fn notification_for(triggers: &[AdjustmentTrigger]) -> String {
    let summary = triggers
        .iter()
        .map(|t| t.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    format!("Your plan has been updated: {summary}")
}
