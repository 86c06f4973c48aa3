// ABOUTME: Tests for the labelled-line measurement analysis narrative parser
// ABOUTME: Well-formed templates, markdown noise, multi-line sections, and malformed inputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use fitai_engine::intelligence::{parse_narrative, AdjustmentFlag, ProgressRating};

const WELL_FORMED: &str = "PROGRESS: good
INSIGHTS: Waist is down 2.4 cm while chest held steady.
DIET_ADJUSTMENT: no - the deficit is working
WORKOUT_ADJUSTMENT: yes - add lower body volume
RECOMMENDATIONS: Keep protein high";

#[test]
fn test_well_formed_narrative() {
    let verdict = parse_narrative(WELL_FORMED).unwrap();

    assert_eq!(verdict.progress, Some(ProgressRating::Good));
    assert_eq!(
        verdict.insights,
        vec!["Waist is down 2.4 cm while chest held steady."]
    );
    assert_eq!(
        verdict.diet_adjustment,
        Some(AdjustmentFlag {
            needed: false,
            reason: "the deficit is working".to_owned(),
        })
    );
    assert_eq!(
        verdict.workout_adjustment,
        Some(AdjustmentFlag {
            needed: true,
            reason: "add lower body volume".to_owned(),
        })
    );
    assert!(!verdict.needs_diet_adjustment());
    assert!(verdict.needs_workout_adjustment());
    assert_eq!(verdict.recommendations, vec!["Keep protein high"]);
}

#[test]
fn test_markdown_emphasis_and_case() {
    let text = "**Progress:** Excellent - ahead of schedule\n\
                ## insights: Hips down 3 cm\n\
                **DIET_ADJUSTMENT**: Yes: raise protein\n\
                > workout_adjustment: NO";

    let verdict = parse_narrative(text).unwrap();

    assert_eq!(verdict.progress, Some(ProgressRating::Excellent));
    assert_eq!(verdict.insights, vec!["Hips down 3 cm"]);
    assert!(verdict.needs_diet_adjustment());
    assert_eq!(verdict.diet_adjustment.unwrap().reason, "raise protein");
    let workout = verdict.workout_adjustment.unwrap();
    assert!(!workout.needed);
    assert_eq!(workout.reason, "");
}

#[test]
fn test_multi_line_sections_until_next_label() {
    let text = "PROGRESS: moderate
INSIGHTS:
- Waist down 1 cm
- Arms up 0.5 cm

RECOMMENDATIONS:
1. Add one leg session
2) Sleep 8 hours
* Track protein daily
DIET_ADJUSTMENT: no
this line belongs to no list section";

    let verdict = parse_narrative(text).unwrap();

    assert_eq!(verdict.insights, vec!["Waist down 1 cm", "Arms up 0.5 cm"]);
    assert_eq!(
        verdict.recommendations,
        vec!["Add one leg session", "Sleep 8 hours", "Track protein daily"]
    );
    assert_eq!(verdict.progress, Some(ProgressRating::Moderate));
    assert!(!verdict.needs_diet_adjustment());
    assert!(verdict.workout_adjustment.is_none());
}

#[test]
fn test_text_before_first_label_is_ignored() {
    let text = "Here is the analysis you asked for.\n\nPROGRESS: poor\nINSIGHTS: Waist up 2 cm";

    let verdict = parse_narrative(text).unwrap();

    assert_eq!(verdict.progress, Some(ProgressRating::Poor));
    assert_eq!(verdict.insights, vec!["Waist up 2 cm"]);
}

// ============================================================================
// Malformed Inputs
// ============================================================================

#[test]
fn test_empty_and_unlabelled_inputs_return_none() {
    assert!(parse_narrative("").is_none());
    assert!(parse_narrative("   \n\n  ").is_none());
    assert!(parse_narrative("Great progress overall, keep going!").is_none());
    assert!(parse_narrative("{\"progress\": \"good\"}").is_none());
    // label must start the line
    assert!(parse_narrative("Overall PROGRESS: good").is_none());
    // unknown label
    assert!(parse_narrative("SUMMARY: good").is_none());
}

#[test]
fn test_label_without_colon_is_not_a_label() {
    assert!(parse_narrative("PROGRESS good\nINSIGHTS none").is_none());
}

#[test]
fn test_unknown_progress_value_leaves_rating_empty() {
    let verdict = parse_narrative("PROGRESS: fantastic\nINSIGHTS: ok").unwrap();

    assert_eq!(verdict.progress, None);
    assert_eq!(verdict.insights, vec!["ok"]);
}

#[test]
fn test_empty_label_values() {
    let verdict = parse_narrative("PROGRESS:\nDIET_ADJUSTMENT:\nWORKOUT_ADJUSTMENT:   ").unwrap();

    assert_eq!(verdict.progress, None);
    assert!(verdict.diet_adjustment.is_none());
    assert!(verdict.workout_adjustment.is_none());
    assert!(verdict.insights.is_empty());
    assert!(verdict.recommendations.is_empty());
}

#[test]
fn test_flag_without_yes_or_no_is_dropped() {
    let verdict =
        parse_narrative("DIET_ADJUSTMENT: maybe later\nWORKOUT_ADJUSTMENT: yesterday was hard")
            .unwrap();

    assert!(verdict.diet_adjustment.is_none());
    assert!(verdict.workout_adjustment.is_none());
    assert!(!verdict.needs_diet_adjustment());
    assert!(!verdict.needs_workout_adjustment());
}

#[test]
fn test_repeated_label_first_value_wins_for_scalars() {
    let verdict = parse_narrative("PROGRESS: poor\nPROGRESS: good").unwrap();
    assert_eq!(verdict.progress, Some(ProgressRating::Poor));

    let verdict =
        parse_narrative("DIET_ADJUSTMENT: yes - cut 100 kcal\nDIET_ADJUSTMENT: no").unwrap();
    assert!(verdict.needs_diet_adjustment());
}

#[test]
fn test_label_word_in_insight_prose_stays_in_section() {
    let verdict = parse_narrative(
        "PROGRESS: good
INSIGHTS: waist down 3cm
Progress: steady downward trend across both sites
- hips down 1cm
DIET_ADJUSTMENT: no",
    )
    .unwrap();

    assert_eq!(verdict.progress, Some(ProgressRating::Good));
    assert_eq!(
        verdict.insights,
        vec![
            "waist down 3cm",
            "Progress: steady downward trend across both sites",
            "hips down 1cm",
        ]
    );
    assert!(verdict.diet_adjustment.is_some());
}

#[test]
fn test_unusable_repeat_outside_list_keeps_first_value() {
    let verdict = parse_narrative("PROGRESS: excellent\nPROGRESS: hard to say").unwrap();
    assert_eq!(verdict.progress, Some(ProgressRating::Excellent));
}

#[test]
fn test_truncated_response_keeps_what_parsed() {
    let verdict = parse_narrative("PROGRESS: good\nINSIGHTS: Waist down 2").unwrap();

    assert_eq!(verdict.progress, Some(ProgressRating::Good));
    assert!(verdict.diet_adjustment.is_none());
    assert!(verdict.recommendations.is_empty());
}

#[test]
fn test_progress_rating_parsing() {
    assert_eq!("Good".parse::<ProgressRating>(), Ok(ProgressRating::Good));
    assert_eq!("**excellent**".parse::<ProgressRating>(), Ok(ProgressRating::Excellent));
    assert_eq!("poor, needs work".parse::<ProgressRating>(), Ok(ProgressRating::Poor));
    assert_eq!("".parse::<ProgressRating>(), Err(()));
    assert_eq!(ProgressRating::Moderate.to_string(), "moderate");
}
