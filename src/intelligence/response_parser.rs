// ABOUTME: Cleans and parses structured plan adjustment responses from the inference service
// ABOUTME: Strips code fences, isolates the JSON object, and retries without trailing commas
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::decision::{
    AdjustmentAction, AdjustmentDecision, AdjustmentTrigger, DecisionSource, Recommendation,
    Severity, TriggerKind,
};
use crate::constants::adjustment::{AI_MAX_VOLUME_CHANGE_PCT, AI_MIN_VOLUME_CHANGE_PCT};
use crate::constants::nutrition::{MAX_DAILY_CALORIES, MAX_MACRO_PCT};
use crate::models::MacroSplit;

static TRAILING_COMMA: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r",(\s*[}\]])").ok());

/// Macro split as returned by the model, which may use fractional percentages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiMacroSplit {
    /// Protein share (%)
    pub protein: f64,
    /// Carbohydrate share (%)
    pub carbs: f64,
    /// Fat share (%)
    pub fat: f64,
}

impl AiMacroSplit {
    /// Round to whole percentages; `None` if any share is outside `0..=100` or not finite
    #[must_use]
    pub fn to_split(self) -> Option<MacroSplit> {
        let pct = |v: f64| (0.0..=MAX_MACRO_PCT).contains(&v).then(|| v.round() as u32);
        Some(MacroSplit::new(
            pct(self.protein)?,
            pct(self.carbs)?,
            pct(self.fat)?,
        ))
    }
}

/// Workout changes proposed by the model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiWorkoutChanges {
    /// Change in weekly volume (%)
    #[serde(default)]
    pub volume_change_percent: Option<f64>,
    /// Free-text structure suggestion
    #[serde(default)]
    pub new_workout_structure: Option<String>,
}

/// Structured response the model is asked to produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAdjustmentResponse {
    /// Whether the model wants a change
    pub adjustment_required: bool,
    /// Why
    #[serde(default)]
    pub reason: Option<String>,
    /// New daily calorie target
    #[serde(default)]
    pub new_calorie_target: Option<f64>,
    /// New macro split
    #[serde(default)]
    pub new_macro_split: Option<AiMacroSplit>,
    /// Workout changes
    #[serde(default)]
    pub workout_changes: Option<AiWorkoutChanges>,
    /// Message for the dashboard
    #[serde(default)]
    pub dashboard_notification: Option<String>,
    /// Short explanation
    #[serde(default)]
    pub explanation: Option<String>,
}

impl AiAdjustmentResponse {
    /// Normalize into the shared decision shape
    #[must_use]
    pub fn into_decision(self) -> AdjustmentDecision {
        if !self.adjustment_required {
            let mut decision = AdjustmentDecision::no_change(DecisionSource::Ai);
            if let Some(text) = non_empty(self.dashboard_notification) {
                decision.notification_text = text;
            }
            return decision;
        }

        let reason = non_empty(self.reason)
            .unwrap_or_else(|| "Adjustment recommended based on recent progress".to_owned());
        let description = non_empty(self.explanation).unwrap_or_else(|| reason.clone());
        let changes = self.workout_changes.unwrap_or_default();

        let recommendation = Recommendation {
            action: AdjustmentAction::AiAdjustment,
            description,
            new_calories: self
                .new_calorie_target
                .filter(|kcal| *kcal > 0.0 && *kcal <= MAX_DAILY_CALORIES)
                .map(|kcal| kcal.round() as u32),
            new_macros: self.new_macro_split.and_then(AiMacroSplit::to_split),
            volume_change_pct: changes
                .volume_change_percent
                .filter(|pct| pct.is_finite() && *pct != 0.0)
                .map(|pct| pct.clamp(AI_MIN_VOLUME_CHANGE_PCT, AI_MAX_VOLUME_CHANGE_PCT)),
            workout_structure: non_empty(changes.new_workout_structure),
        };

        AdjustmentDecision {
            needs_adjustment: true,
            source: DecisionSource::Ai,
            triggers: vec![AdjustmentTrigger {
                kind: TriggerKind::AiRecommendation,
                message: reason.clone(),
                severity: Severity::Medium,
            }],
            recommendations: vec![recommendation],
            notification_text: non_empty(self.dashboard_notification).unwrap_or(reason),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

/// Result of parsing a model response
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedDecision {
    /// Response matched the expected structure
    Parsed(AiAdjustmentResponse),
    /// Response could not be parsed
    ParseFailure {
        /// Raw response text
        raw: String,
        /// Parser error
        reason: String,
    },
}

/// Remove Markdown code fences around a response
#[must_use]
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```JSON"))
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .trim()
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

/// Slice from the first `{` to the last `}`
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Remove commas directly before a closing brace or bracket
#[must_use]
pub fn strip_trailing_commas(json: &str) -> Cow<'_, str> {
    TRAILING_COMMA
        .as_ref()
        .map_or(Cow::Borrowed(json), |re| re.replace_all(json, "$1"))
}

/// Parse a model response into a decision payload
#[must_use]
pub fn parse_decision(raw: &str) -> ParsedDecision {
    let cleaned = strip_code_fences(raw);
    let Some(json) = extract_json_object(cleaned) else {
        return ParsedDecision::ParseFailure {
            raw: raw.to_owned(),
            reason: "no JSON object found".to_owned(),
        };
    };

    match serde_json::from_str::<AiAdjustmentResponse>(json) {
        Ok(parsed) => ParsedDecision::Parsed(parsed),
        Err(first_error) => {
            let repaired = strip_trailing_commas(json);
            serde_json::from_str::<AiAdjustmentResponse>(&repaired).map_or_else(
                |_| ParsedDecision::ParseFailure {
                    raw: raw.to_owned(),
                    reason: first_error.to_string(),
                },
                ParsedDecision::Parsed,
            )
        }
    }
}
