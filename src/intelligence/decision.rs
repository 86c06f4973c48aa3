// ABOUTME: Adjustment decision types shared by the AI and rule branches
// ABOUTME: Triggers, recommendations, actions, severity, and the decision source tag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::MacroSplit;

/// Notification shown when no trigger fired
pub const NO_ADJUSTMENT_NOTIFICATION: &str = "No adjustments needed - progress is on track!";

/// Which branch produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionSource {
    /// Inference service evaluation
    Ai,
    /// Deterministic rule table
    Rule,
}

impl DecisionSource {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Rule => "rule",
        }
    }
}

/// Trigger severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth acting on at the next cycle
    Low,
    /// Affects plan sustainability
    Medium,
    /// Safety or program-level concern
    High,
}

/// Condition that caused an adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Weight loss below 0.3 kg/week
    SlowWeightLoss,
    /// Weight loss above 1 kg/week
    RapidWeightLoss,
    /// Weight change under 0.2 kg/week on a muscle gain goal
    StagnantMuscleGain,
    /// Combined adherence under 60%
    LowAdherence,
    /// Flat weight with combined adherence under 70%
    NoProgressLowAdherence,
    /// Adjustment requested by the inference service
    AiRecommendation,
}

impl TriggerKind {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SlowWeightLoss => "slow_weight_loss",
            Self::RapidWeightLoss => "rapid_weight_loss",
            Self::StagnantMuscleGain => "stagnant_muscle_gain",
            Self::LowAdherence => "low_adherence",
            Self::NoProgressLowAdherence => "no_progress_low_adherence",
            Self::AiRecommendation => "ai_recommendation",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plan change to carry out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentAction {
    /// Lower calories to deepen the deficit
    IncreaseDeficit,
    /// Raise calories to slow weight loss
    ReduceDeficit,
    /// Scale up weekly sets
    IncreaseVolume,
    /// Raise calories into a surplus
    IncreaseCalories,
    /// Trim exercises per session
    SimplifyPlan,
    /// Fall back to a three-day beginner template
    ResetPlan,
    /// Calorie, macro, and volume changes proposed by the inference service
    AiAdjustment,
}

impl AdjustmentAction {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IncreaseDeficit => "increase_deficit",
            Self::ReduceDeficit => "reduce_deficit",
            Self::IncreaseVolume => "increase_volume",
            Self::IncreaseCalories => "increase_calories",
            Self::SimplifyPlan => "simplify_plan",
            Self::ResetPlan => "reset_plan",
            Self::AiAdjustment => "ai_adjustment",
        }
    }
}

impl fmt::Display for AdjustmentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fired trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentTrigger {
    /// Trigger kind
    #[serde(rename = "type")]
    pub kind: TriggerKind,
    /// Human-readable explanation
    pub message: String,
    /// Severity
    pub severity: Severity,
}

/// A concrete plan change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// What to change
    pub action: AdjustmentAction,
    /// Human-readable description
    pub description: String,
    /// New daily calorie target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_calories: Option<u32>,
    /// New macro split
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_macros: Option<MacroSplit>,
    /// Change in weekly sets (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_change_pct: Option<f64>,
    /// Free-text workout structure suggestion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_structure: Option<String>,
}

impl Recommendation {
    /// Recommendation with only an action and description
    #[must_use]
    pub fn new(action: AdjustmentAction, description: impl Into<String>) -> Self {
        Self {
            action,
            description: description.into(),
            new_calories: None,
            new_macros: None,
            volume_change_pct: None,
            workout_structure: None,
        }
    }

    /// Set the new calorie target
    #[must_use]
    pub const fn with_calories(mut self, calories: Option<u32>) -> Self {
        self.new_calories = calories;
        self
    }

    /// Set the volume change
    #[must_use]
    pub const fn with_volume_change(mut self, pct: f64) -> Self {
        self.volume_change_pct = Some(pct);
        self
    }

    /// Whether applying this recommendation touches the diet plan
    #[must_use]
    pub const fn affects_diet(&self) -> bool {
        self.new_calories.is_some()
    }

    /// Whether applying this recommendation touches the workout plan
    #[must_use]
    pub fn affects_workout(&self) -> bool {
        match self.action {
            AdjustmentAction::IncreaseVolume
            | AdjustmentAction::SimplifyPlan
            | AdjustmentAction::ResetPlan => true,
            AdjustmentAction::AiAdjustment => self
                .volume_change_pct
                .is_some_and(|pct| pct.is_finite() && pct != 0.0),
            AdjustmentAction::IncreaseDeficit
            | AdjustmentAction::ReduceDeficit
            | AdjustmentAction::IncreaseCalories => false,
        }
    }
}

/// Outcome of a plan evaluation
///
/// Carries no timestamps so the same inputs always serialize identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentDecision {
    /// Whether any change should be applied
    pub needs_adjustment: bool,
    /// Branch that produced the decision
    pub source: DecisionSource,
    /// Fired triggers
    pub triggers: Vec<AdjustmentTrigger>,
    /// Changes to apply
    pub recommendations: Vec<Recommendation>,
    /// Message for the user's dashboard
    pub notification_text: String,
}

impl AdjustmentDecision {
    /// Decision that changes nothing
    #[must_use]
    pub fn no_change(source: DecisionSource) -> Self {
        Self {
            needs_adjustment: false,
            source,
            triggers: Vec::new(),
            recommendations: Vec::new(),
            notification_text: NO_ADJUSTMENT_NOTIFICATION.to_owned(),
        }
    }

    /// Whether a trigger of `kind` fired
    #[must_use]
    pub fn has_trigger(&self, kind: TriggerKind) -> bool {
        self.triggers.iter().any(|t| t.kind == kind)
    }

    /// First recommendation with `action`
    #[must_use]
    pub fn recommendation(&self, action: AdjustmentAction) -> Option<&Recommendation> {
        self.recommendations.iter().find(|r| r.action == action)
    }
}
