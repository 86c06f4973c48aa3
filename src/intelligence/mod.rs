// ABOUTME: Adjustment intelligence: metrics aggregation, decisions, plan mutation, biometric analysis
// ABOUTME: Re-exports the decision engine, rule table, parsers, and biometric cycle analyzer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! Data flows one way: daily logs and plans are aggregated into
//! [`WeeklyMetrics`], the [`DecisionEngine`] turns metrics into an
//! [`AdjustmentDecision`], and the plan mutator applies the decision to
//! produce new plan values. The [`BiometricAnalyzer`] runs on its own
//! measurement cadence and regenerates plans rather than patching them.

/// Biometric cycle reminder, analysis, and regeneration
pub mod biometric_analyzer;
/// Decision, trigger, and recommendation types
pub mod decision;
/// AI-first decision engine with rule fallback
pub mod decision_engine;
/// Rolling-window metrics aggregation
pub mod metrics_aggregator;
/// Measurement narrative parsing
pub mod narrative_parser;
/// Pure plan transforms
pub mod plan_mutator;
/// AI adjustment response cleanup and parsing
pub mod response_parser;
/// Deterministic rule table
pub mod rules;

pub use biometric_analyzer::{
    assess_changes, compute_deltas, measurement_history, record_initial_measurements,
    record_measurement, BiometricAnalyzer, BiometricVerdict, MeasurementDelta, MeasurementPoint,
    RegenerationResult, ReminderStatus, RuleAssessment,
};
pub use decision::{
    AdjustmentAction, AdjustmentDecision, AdjustmentTrigger, DecisionSource, Recommendation,
    Severity, TriggerKind, NO_ADJUSTMENT_NOTIFICATION,
};
pub use decision_engine::{build_adjustment_prompt, DecisionEngine, Evaluation};
pub use metrics_aggregator::{compute_metrics_for_profile, compute_weekly_metrics, WeeklyMetrics};
pub use narrative_parser::{parse_narrative, AdjustmentFlag, NarrativeVerdict, ProgressRating};
pub use plan_mutator::{apply_decision, apply_to_plans, AppliedAdjustment};
pub use response_parser::{parse_decision, AiAdjustmentResponse, ParsedDecision};
pub use rules::evaluate_rules;
