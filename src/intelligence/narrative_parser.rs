// ABOUTME: Parser for the labelled-line measurement analysis narrative returned by the inference service
// ABOUTME: Extracts progress rating, insights, adjustment flags, and recommendations into a typed verdict
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Narrative Parser
//!
//! The analysis narrative is a fixed template of labelled lines:
//!
//! ```text
//! PROGRESS: good
//! INSIGHTS: Waist down 2.5 cm, hips stable.
//! DIET_ADJUSTMENT: no - deficit is working
//! WORKOUT_ADJUSTMENT: yes - add lower body volume
//! RECOMMENDATIONS: Keep protein high
//! ```
//!
//! Labels are matched at the start of a line, case-insensitively, tolerating
//! markdown emphasis and heading markers. `INSIGHTS` and `RECOMMENDATIONS`
//! may continue over following lines until the next label.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Labelled line: optional markdown noise, the label, a colon, the value
static LABEL_LINE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[\s*#>]*(PROGRESS|INSIGHTS|DIET_ADJUSTMENT|WORKOUT_ADJUSTMENT|RECOMMENDATIONS)[\s*]*:[\s*]*(.*)$",
    )
    .ok()
});

/// `yes - reason` / `no: reason` / bare `yes`
static FLAG_VALUE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^\W*(yes|no)\b[\s\-:,.]*(.*)$").ok());

/// Leading list markers: `-`, `*`, `•`, `1.`, `2)`
static LIST_MARKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?:[-*•]+|\d+[.)])\s+").ok());

/// Overall progress classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressRating {
    /// Clearly ahead of goal
    Excellent,
    /// On track
    Good,
    /// Some progress, room to improve
    Moderate,
    /// Off track
    Poor,
}

impl ProgressRating {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Poor => "poor",
        }
    }
}

impl fmt::Display for ProgressRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgressRating {
    type Err = ();

    /// Matches the first word of the value, so `Good - steady loss` is `Good`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .split(|c: char| !c.is_alphanumeric())
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match word.as_str() {
            "excellent" => Ok(Self::Excellent),
            "good" => Ok(Self::Good),
            "moderate" => Ok(Self::Moderate),
            "poor" => Ok(Self::Poor),
            _ => Err(()),
        }
    }
}

/// A yes/no adjustment flag with its reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentFlag {
    /// Whether the plan should change
    pub needed: bool,
    /// Reason given, possibly empty
    pub reason: String,
}

/// Structured content extracted from a narrative
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeVerdict {
    /// Progress rating, when the value was recognized
    pub progress: Option<ProgressRating>,
    /// Insight lines
    pub insights: Vec<String>,
    /// Diet flag, when the value started with yes or no
    pub diet_adjustment: Option<AdjustmentFlag>,
    /// Workout flag, when the value started with yes or no
    pub workout_adjustment: Option<AdjustmentFlag>,
    /// Recommendation lines
    pub recommendations: Vec<String>,
}

impl NarrativeVerdict {
    /// Whether the diet flag says yes
    #[must_use]
    pub fn needs_diet_adjustment(&self) -> bool {
        self.diet_adjustment.as_ref().is_some_and(|f| f.needed)
    }

    /// Whether the workout flag says yes
    #[must_use]
    pub fn needs_workout_adjustment(&self) -> bool {
        self.workout_adjustment.as_ref().is_some_and(|f| f.needed)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Label {
    Progress,
    Insights,
    Diet,
    Workout,
    Recommendations,
}

impl Label {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "PROGRESS" => Some(Self::Progress),
            "INSIGHTS" => Some(Self::Insights),
            "DIET_ADJUSTMENT" => Some(Self::Diet),
            "WORKOUT_ADJUSTMENT" => Some(Self::Workout),
            "RECOMMENDATIONS" => Some(Self::Recommendations),
            _ => None,
        }
    }

    const fn is_list(self) -> bool {
        matches!(self, Self::Insights | Self::Recommendations)
    }
}

fn clean_item(line: &str) -> Option<String> {
    let trimmed = line.trim().trim_matches('*').trim();
    let stripped = LIST_MARKER
        .as_ref()
        .map_or(trimmed, |re| re.find(trimmed).map_or(trimmed, |m| &trimmed[m.end()..]))
        .trim();
    (!stripped.is_empty()).then(|| stripped.to_owned())
}

fn parse_flag(value: &str) -> Option<AdjustmentFlag> {
    let caps = FLAG_VALUE.as_ref()?.captures(value.trim())?;
    let needed = caps.get(1)?.as_str().eq_ignore_ascii_case("yes");
    let reason = caps
        .get(2)
        .map(|m| m.as_str().trim().trim_end_matches('*').trim().to_owned())
        .unwrap_or_default();
    Some(AdjustmentFlag { needed, reason })
}

/// Parse a measurement analysis narrative
///
/// Returns `None` when no label is present at all, which callers treat as
/// an unstructured response. A label whose value cannot be interpreted
/// leaves the matching field empty. The first usable PROGRESS and adjustment
/// values win; a later repeat inside a list section is kept as list text.
#[must_use]
pub fn parse_narrative(text: &str) -> Option<NarrativeVerdict> {
    let label_line = LABEL_LINE.as_ref()?;
    let mut verdict = NarrativeVerdict::default();
    let mut recognized = false;
    let mut current: Option<Label> = None;

    for line in text.lines() {
        if let Some(caps) = label_line.captures(line) {
            let Some(label) = caps.get(1).and_then(|m| Label::from_keyword(m.as_str())) else {
                continue;
            };
            let value = caps.get(2).map_or("", |m| m.as_str());
            let usable = match label {
                Label::Progress => {
                    verdict.progress.is_none() && value.parse::<ProgressRating>().is_ok()
                }
                Label::Diet => verdict.diet_adjustment.is_none() && parse_flag(value).is_some(),
                Label::Workout => {
                    verdict.workout_adjustment.is_none() && parse_flag(value).is_some()
                }
                Label::Insights | Label::Recommendations => true,
            };

            if !usable && current.is_some_and(Label::is_list) {
                push_list_item(&mut verdict, current, line);
                continue;
            }

            recognized = true;
            current = Some(label);
            if !usable {
                continue;
            }
            match label {
                Label::Progress => verdict.progress = value.parse().ok(),
                Label::Diet => verdict.diet_adjustment = parse_flag(value),
                Label::Workout => verdict.workout_adjustment = parse_flag(value),
                Label::Insights => verdict.insights.extend(clean_item(value)),
                Label::Recommendations => verdict.recommendations.extend(clean_item(value)),
            }
            continue;
        }

        push_list_item(&mut verdict, current, line);
    }

    recognized.then_some(verdict)
}

fn push_list_item(verdict: &mut NarrativeVerdict, section: Option<Label>, line: &str) {
    match section {
        Some(Label::Insights) => verdict.insights.extend(clean_item(line)),
        Some(Label::Recommendations) => verdict.recommendations.extend(clean_item(line)),
        _ => {}
    }
}
