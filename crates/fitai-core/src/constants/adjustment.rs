// ABOUTME: Thresholds and multipliers used by the rule-based adjustment branch
// ABOUTME: Weight-change rates, adherence cut-offs, and calorie/volume multipliers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Weight loss below this rate (kg/week) is considered slow
pub const SLOW_WEIGHT_LOSS_KG_PER_WEEK: f64 = 0.3;

/// Weight loss above this rate (kg/week) is a safety concern
pub const RAPID_WEIGHT_LOSS_KG_PER_WEEK: f64 = 1.0;

/// Absolute weekly change below which muscle gain is stagnant
pub const STAGNANT_GAIN_KG_PER_WEEK: f64 = 0.2;

/// Absolute weekly change below which there is no progress at all
pub const NO_PROGRESS_KG_PER_WEEK: f64 = 0.1;

/// Combined adherence below which the plan is simplified
pub const LOW_ADHERENCE_PCT: f64 = 60.0;

/// Combined adherence below which a stalled user is reset
pub const RESET_ADHERENCE_PCT: f64 = 70.0;

/// Calorie multiplier for a slightly larger deficit
pub const INCREASE_DEFICIT_MULTIPLIER: f64 = 0.9;

/// Calorie multiplier when weight loss is too fast
pub const REDUCE_DEFICIT_MULTIPLIER: f64 = 1.15;

/// Calorie multiplier for a muscle-gain surplus
pub const SURPLUS_MULTIPLIER: f64 = 1.1;

/// Volume increase (%) for stagnant muscle gain
pub const STAGNANT_VOLUME_INCREASE_PCT: f64 = 20.0;

/// Weight given to workout adherence in the habit score
pub const HABIT_WORKOUT_WEIGHT: f64 = 0.60;

/// Weight given to diet adherence in the habit score
pub const HABIT_DIET_WEIGHT: f64 = 0.40;

/// Smallest weekly volume change (%) accepted from the inference service
pub const AI_MIN_VOLUME_CHANGE_PCT: f64 = -90.0;

/// Largest weekly volume change (%) accepted from the inference service
pub const AI_MAX_VOLUME_CHANGE_PCT: f64 = 100.0;

/// How long an idempotency key replays its stored outcome
pub const IDEMPOTENCY_KEY_TTL_DAYS: i64 = 8;
