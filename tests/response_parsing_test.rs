// ABOUTME: Tests for cleaning and parsing structured adjustment responses from the inference service
// ABOUTME: Code fences, surrounding prose, trailing commas, fractional splits, and unusable payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use fitai_engine::intelligence::response_parser::{
    extract_json_object, strip_code_fences, strip_trailing_commas, AiMacroSplit,
};
use fitai_engine::intelligence::{
    parse_decision, AdjustmentAction, AiAdjustmentResponse, DecisionSource, ParsedDecision,
    TriggerKind, NO_ADJUSTMENT_NOTIFICATION,
};
use fitai_engine::models::MacroSplit;

fn parsed(raw: &str) -> AiAdjustmentResponse {
    match parse_decision(raw) {
        ParsedDecision::Parsed(response) => response,
        ParsedDecision::ParseFailure { reason, .. } => panic!("expected parse, got {reason}"),
    }
}

#[test]
fn test_strip_code_fences_variants() {
    assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
    assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
}

#[test]
fn test_extract_json_object_from_prose() {
    let text = "Here is my analysis: {\"adjustmentRequired\": false} Hope this helps!";
    assert_eq!(
        extract_json_object(text),
        Some("{\"adjustmentRequired\": false}")
    );
    assert_eq!(extract_json_object("no braces here"), None);
    assert_eq!(extract_json_object("} backwards {"), None);
}

#[test]
fn test_strip_trailing_commas() {
    let repaired = strip_trailing_commas("{\"a\": [1, 2,], \"b\": 3,\n}");
    assert_eq!(repaired, "{\"a\": [1, 2], \"b\": 3\n}");
}

#[test]
fn test_parse_full_response() {
    let response = parsed(
        r#"```json
{
  "adjustmentRequired": true,
  "reason": "Plateau",
  "newCalorieTarget": 1850.4,
  "newMacroSplit": {"protein": 34.6, "carbs": 35.2, "fat": 30.2},
  "workoutChanges": {"volumeChangePercent": -10, "newWorkoutStructure": "Upper/Lower"},
  "dashboardNotification": "Small changes this week",
  "explanation": "Deload slightly while tightening calories"
}
```"#,
    );

    let decision = response.into_decision();

    assert!(decision.needs_adjustment);
    assert_eq!(decision.source, DecisionSource::Ai);
    assert_eq!(decision.triggers[0].kind, TriggerKind::AiRecommendation);
    assert_eq!(decision.triggers[0].message, "Plateau");
    let recommendation = &decision.recommendations[0];
    assert_eq!(recommendation.action, AdjustmentAction::AiAdjustment);
    assert_eq!(recommendation.new_calories, Some(1850));
    assert_eq!(recommendation.new_macros, Some(MacroSplit::new(35, 35, 30)));
    assert_eq!(recommendation.volume_change_pct, Some(-10.0));
    assert_eq!(recommendation.workout_structure.as_deref(), Some("Upper/Lower"));
    assert_eq!(
        recommendation.description,
        "Deload slightly while tightening calories"
    );
    assert_eq!(decision.notification_text, "Small changes this week");
}

#[test]
fn test_parse_repairs_trailing_commas() {
    let response = parsed(
        "{\"adjustmentRequired\": true, \"newCalorieTarget\": 2100, \"workoutChanges\": {\"volumeChangePercent\": 15,},}",
    );

    assert!(response.adjustment_required);
    assert_eq!(response.new_calorie_target, Some(2100.0));
    assert_eq!(
        response.workout_changes.unwrap().volume_change_percent,
        Some(15.0)
    );
}

#[test]
fn test_parse_json_embedded_in_prose() {
    let response = parsed(
        "Based on the data, I recommend:\n{\"adjustmentRequired\": false, \"reason\": \"On track\"}\nLet me know.",
    );

    assert!(!response.adjustment_required);
    assert_eq!(response.reason.as_deref(), Some("On track"));
}

#[test]
fn test_parse_failure_keeps_raw_text() {
    let raw = "I cannot evaluate this week.";
    match parse_decision(raw) {
        ParsedDecision::ParseFailure { raw: kept, reason } => {
            assert_eq!(kept, raw);
            assert_eq!(reason, "no JSON object found");
        }
        ParsedDecision::Parsed(_) => panic!("prose without JSON must not parse"),
    }
}

#[test]
fn test_parse_failure_on_missing_required_flag() {
    assert!(matches!(
        parse_decision("{\"reason\": \"no flag\"}"),
        ParsedDecision::ParseFailure { .. }
    ));
    assert!(matches!(
        parse_decision("{\"adjustmentRequired\": \"maybe\"}"),
        ParsedDecision::ParseFailure { .. }
    ));
}

#[test]
fn test_no_adjustment_uses_default_notification() {
    let decision = parsed("{\"adjustmentRequired\": false, \"dashboardNotification\": \"  \"}")
        .into_decision();

    assert!(!decision.needs_adjustment);
    assert!(decision.recommendations.is_empty());
    assert_eq!(decision.notification_text, NO_ADJUSTMENT_NOTIFICATION);
}

#[test]
fn test_invalid_numbers_dropped() {
    let decision = parsed(
        r#"{"adjustmentRequired": true, "newCalorieTarget": -200,
            "newMacroSplit": {"protein": -5, "carbs": 60, "fat": 45},
            "workoutChanges": {"volumeChangePercent": 0}}"#,
    )
    .into_decision();

    let recommendation = &decision.recommendations[0];
    assert_eq!(recommendation.new_calories, None);
    assert_eq!(recommendation.new_macros, None);
    assert_eq!(recommendation.volume_change_pct, None);
    assert!(!recommendation.affects_diet());
    assert!(!recommendation.affects_workout());
    assert_eq!(
        decision.notification_text,
        "Adjustment recommended based on recent progress"
    );
}

#[test]
fn test_unbalanced_split_is_kept() {
    let split = AiMacroSplit {
        protein: 40.0,
        carbs: 40.0,
        fat: 30.0,
    }
    .to_split()
    .unwrap();

    assert_eq!(split.total(), 110);
    assert!(!split.is_balanced());
}

#[test]
fn test_out_of_range_numbers_dropped_or_clamped() {
    let decision = parsed(
        r#"{"adjustmentRequired": true, "newCalorieTarget": 1e12,
            "newMacroSplit": {"protein": 5000000000, "carbs": 30, "fat": 20},
            "workoutChanges": {"volumeChangePercent": 1e12}}"#,
    )
    .into_decision();

    let recommendation = &decision.recommendations[0];
    assert_eq!(recommendation.new_calories, None);
    assert_eq!(recommendation.new_macros, None);
    assert_eq!(recommendation.volume_change_pct, Some(100.0));

    let decision = parsed(
        r#"{"adjustmentRequired": true, "workoutChanges": {"volumeChangePercent": -400}}"#,
    )
    .into_decision();
    assert_eq!(decision.recommendations[0].volume_change_pct, Some(-90.0));
}

#[test]
fn test_share_above_hundred_rejected() {
    let split = AiMacroSplit {
        protein: 100.4,
        carbs: 0.0,
        fat: 0.0,
    };
    assert_eq!(split.to_split(), Some(MacroSplit::new(100, 0, 0)));

    let split = AiMacroSplit {
        protein: 101.0,
        carbs: 0.0,
        fat: 0.0,
    };
    assert_eq!(split.to_split(), None);
}

#[test]
fn test_macro_total_saturates() {
    let split = MacroSplit::new(u32::MAX, u32::MAX, 1);

    assert_eq!(split.total(), u32::MAX);
    assert!(!split.is_balanced());
}
