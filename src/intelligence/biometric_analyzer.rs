// ABOUTME: Biometric cycle analysis over body circumference measurements on a 28-day cadence
// ABOUTME: Reminder status, measurement deltas, AI narrative verdicts with rule fallback, plan regeneration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Biometric Cycle Analyzer
//!
//! Runs independently of the weekly plan evaluation. A user records a full
//! baseline once, then follow-up measurements every cadence period. The
//! analyzer compares the baseline against the latest record, asks the
//! inference service for a narrative verdict, and falls back to a goal-aware
//! rule table when the narrative is unavailable or unusable.
//!
//! Regeneration asks the external [`PlanGenerator`] for a fresh weekly plan
//! instead of patching the current one.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::decision::DecisionSource;
use super::narrative_parser::{parse_narrative, NarrativeVerdict, ProgressRating};
use crate::config::{CycleConfig, InferenceConfig};
use crate::constants::biometrics::{
    ARM_GAIN_CM, CHEST_GAIN_CM, HIPS_LOSS_CM, MAINTENANCE_DRIFT_CM, MAINTENANCE_STABLE_CM,
    NARRATIVE_EXCERPT_CHARS, THIGH_GAIN_CM, WAIST_GAIN_CONCERN_CM, WAIST_LOSS_CM,
};
use crate::errors::{AppError, AppResult};
use crate::inference::{complete_with_timeout, InferenceClientPool, InferenceFailure, TaskCategory};
use crate::llm::prompts::MEASUREMENT_ANALYSIS_SYSTEM_PROMPT;
use crate::llm::ChatRequest;
use crate::logging::EngineLogger;
use crate::models::{
    BodyMeasurement, FitnessGoal, InitialMeasurements, MeasurementSet, MeasurementSite, Profile,
};
use crate::store::{FitnessDataStore, PlanGenerator};

/// Sampling temperature for narrative analysis
pub const ANALYSIS_TEMPERATURE: f32 = 0.7;

/// Completion budget for narrative analysis
pub const ANALYSIS_MAX_TOKENS: u32 = 1000;

const RULE_NARRATIVE: &str =
    "Detailed AI analysis is unavailable right now. Progress was assessed from your measurement changes.";

// ============================================================================
// Reminder
// ============================================================================

/// Measurement reminder state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderStatus {
    /// Whether a new measurement is due
    pub due: bool,
    /// Whole days until the next measurement, zero once due
    pub days_until_next: u32,
    /// Reference date the cadence counts from
    pub last_measurement_date: Option<DateTime<Utc>>,
    /// When the next measurement falls due
    pub next_due_date: Option<DateTime<Utc>>,
}

impl ReminderStatus {
    /// Status for a reference date, as of `now`
    ///
    /// Without a reference date nothing is due and the full cadence remains.
    #[must_use]
    pub fn from_reference(
        reference: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        cadence_days: u32,
    ) -> Self {
        let Some(reference) = reference else {
            return Self {
                due: false,
                days_until_next: cadence_days,
                last_measurement_date: None,
                next_due_date: None,
            };
        };

        let days_since = (now - reference).num_days().max(0);
        let cadence = i64::from(cadence_days);
        Self {
            due: days_since >= cadence,
            days_until_next: (cadence - days_since).max(0) as u32,
            last_measurement_date: Some(reference),
            next_due_date: Some(reference + chrono::Duration::days(cadence)),
        }
    }
}

// ============================================================================
// Deltas
// ============================================================================

/// Change at one site between baseline and latest record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementDelta {
    /// Site
    pub site: MeasurementSite,
    /// Baseline value (cm)
    pub initial_cm: f64,
    /// Latest value (cm)
    pub current_cm: f64,
    /// `current_cm - initial_cm`
    pub change_cm: f64,
}

/// Deltas for all seven sites in reporting order
///
/// # Errors
///
/// Returns `MissingRequiredField` naming the first site absent from either set
pub fn compute_deltas(
    initial: &MeasurementSet,
    current: &MeasurementSet,
) -> AppResult<Vec<MeasurementDelta>> {
    MeasurementSite::ALL
        .iter()
        .map(|&site| {
            let initial_cm = initial.require(site)?;
            let current_cm = current.require(site)?;
            Ok(MeasurementDelta {
                site,
                initial_cm,
                current_cm,
                change_cm: current_cm - initial_cm,
            })
        })
        .collect()
}

fn change(deltas: &[MeasurementDelta], site: MeasurementSite) -> f64 {
    deltas
        .iter()
        .find(|d| d.site == site)
        .map_or(0.0, |d| d.change_cm)
}

fn paired_change(deltas: &[MeasurementDelta], left: MeasurementSite, right: MeasurementSite) -> f64 {
    (change(deltas, left) + change(deltas, right)) / 2.0
}

// ============================================================================
// Verdict
// ============================================================================

/// Outcome of a biometric analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricVerdict {
    /// Branch that produced the verdict
    pub source: DecisionSource,
    /// Overall progress
    pub progress: ProgressRating,
    /// Per-site changes
    pub changes: Vec<MeasurementDelta>,
    /// Narrative insight lines
    pub insights: Vec<String>,
    /// Goal-aligned changes found by the rule table
    pub positive_indicators: Vec<String>,
    /// Goal-opposed changes found by the rule table
    pub concerns: Vec<String>,
    /// Whether the diet plan should be regenerated
    pub needs_diet_adjustment: bool,
    /// Why the diet plan should change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_adjustment_reason: Option<String>,
    /// Whether the workout plan should be regenerated
    pub needs_workout_adjustment: bool,
    /// Why the workout plan should change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_adjustment_reason: Option<String>,
    /// Next steps
    pub recommendations: Vec<String>,
    /// Date of the latest measurement
    pub measured_at: DateTime<Utc>,
}

impl BiometricVerdict {
    /// Whether either plan is flagged for regeneration
    #[must_use]
    pub const fn needs_regeneration(&self) -> bool {
        self.needs_diet_adjustment || self.needs_workout_adjustment
    }
}

/// Indicators found by the goal-aware rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleAssessment {
    /// Overall progress
    pub progress: ProgressRating,
    /// Goal-aligned changes
    pub positive_indicators: Vec<String>,
    /// Goal-opposed changes
    pub concerns: Vec<String>,
}

/// Classify progress from measurement deltas and the user's goal
#[must_use]
pub fn assess_changes(goal: FitnessGoal, deltas: &[MeasurementDelta]) -> RuleAssessment {
    let mut positives = Vec::new();
    let mut concerns = Vec::new();
    let waist = change(deltas, MeasurementSite::Waist);

    let progress = match goal {
        FitnessGoal::WeightLoss => {
            if waist < -WAIST_LOSS_CM {
                positives.push("Significant waist reduction - excellent progress!".to_owned());
            } else if waist > 0.0 {
                concerns.push("Waist measurement increased - may need diet adjustment".to_owned());
            }
            if change(deltas, MeasurementSite::Hips) < -HIPS_LOSS_CM {
                positives.push("Hip measurement decreased - good fat loss".to_owned());
            }
            if positives.len() > concerns.len() {
                ProgressRating::Good
            } else {
                ProgressRating::Poor
            }
        }
        FitnessGoal::MuscleGain => {
            if change(deltas, MeasurementSite::Chest) > CHEST_GAIN_CM {
                positives.push("Chest measurement increased - muscle growth detected!".to_owned());
            }
            let arms = paired_change(deltas, MeasurementSite::LeftArm, MeasurementSite::RightArm);
            if arms > ARM_GAIN_CM {
                positives.push("Arm measurement increased - good muscle development".to_owned());
            }
            let thighs =
                paired_change(deltas, MeasurementSite::LeftThigh, MeasurementSite::RightThigh);
            if thighs > THIGH_GAIN_CM {
                positives.push("Leg muscles growing - excellent lower body progress".to_owned());
            }
            if waist > WAIST_GAIN_CONCERN_CM {
                concerns
                    .push("Waist increased significantly - may be gaining excess fat".to_owned());
            }
            if positives.len() >= 2 {
                ProgressRating::Excellent
            } else {
                ProgressRating::Moderate
            }
        }
        FitnessGoal::Maintenance => {
            let mean_abs = if deltas.is_empty() {
                0.0
            } else {
                deltas.iter().map(|d| d.change_cm.abs()).sum::<f64>() / deltas.len() as f64
            };
            if mean_abs < MAINTENANCE_STABLE_CM {
                positives.push("Measurements stable - excellent maintenance!".to_owned());
                ProgressRating::Excellent
            } else if mean_abs > MAINTENANCE_DRIFT_CM {
                concerns
                    .push("Significant measurement changes - may need plan adjustment".to_owned());
                ProgressRating::Poor
            } else {
                ProgressRating::Moderate
            }
        }
    };

    RuleAssessment {
        progress,
        positive_indicators: positives,
        concerns,
    }
}

fn rule_recommendations(assessment: &RuleAssessment) -> Vec<String> {
    let lines: &[&str] = if !assessment.concerns.is_empty() {
        &[
            "Consider regenerating your workout and diet plans",
            "Review your nutrition and training consistency over the next cycle",
        ]
    } else if !assessment.positive_indicators.is_empty() {
        &[
            "Keep up the excellent work!",
            "Continue with current plan for another 4 weeks",
        ]
    } else {
        &["Stay consistent with your current plan and measure again in 4 weeks"]
    };
    lines.iter().map(|&line| line.to_owned()).collect()
}

/// Verdict built from the rule table alone
#[must_use]
pub fn rule_verdict(
    goal: FitnessGoal,
    deltas: Vec<MeasurementDelta>,
    measured_at: DateTime<Utc>,
) -> BiometricVerdict {
    let assessment = assess_changes(goal, &deltas);
    let flagged = !assessment.concerns.is_empty();
    let reason = flagged.then(|| assessment.concerns.join("; "));
    let recommendations = rule_recommendations(&assessment);

    BiometricVerdict {
        source: DecisionSource::Rule,
        progress: assessment.progress,
        changes: deltas,
        insights: vec![RULE_NARRATIVE.to_owned()],
        positive_indicators: assessment.positive_indicators,
        concerns: assessment.concerns,
        needs_diet_adjustment: flagged,
        diet_adjustment_reason: reason.clone(),
        needs_workout_adjustment: flagged,
        workout_adjustment_reason: reason,
        recommendations,
        measured_at,
    }
}

/// Verdict from a parsed narrative, with rule-table indicators for context
#[must_use]
pub fn narrative_verdict(
    goal: FitnessGoal,
    deltas: Vec<MeasurementDelta>,
    measured_at: DateTime<Utc>,
    narrative: NarrativeVerdict,
    raw: &str,
) -> BiometricVerdict {
    let assessment = assess_changes(goal, &deltas);
    let needs_diet_adjustment = narrative.needs_diet_adjustment();
    let needs_workout_adjustment = narrative.needs_workout_adjustment();

    let insights = if narrative.insights.is_empty() {
        vec![raw.trim().chars().take(NARRATIVE_EXCERPT_CHARS).collect()]
    } else {
        narrative.insights
    };
    let recommendations = if narrative.recommendations.is_empty() {
        rule_recommendations(&assessment)
    } else {
        narrative.recommendations
    };

    BiometricVerdict {
        source: DecisionSource::Ai,
        progress: narrative.progress.unwrap_or(ProgressRating::Moderate),
        changes: deltas,
        insights,
        positive_indicators: assessment.positive_indicators,
        concerns: assessment.concerns,
        needs_diet_adjustment,
        diet_adjustment_reason: narrative.diet_adjustment.map(|f| f.reason),
        needs_workout_adjustment,
        workout_adjustment_reason: narrative.workout_adjustment.map(|f| f.reason),
        recommendations,
        measured_at,
    }
}

/// User prompt comparing baseline and latest measurements
#[must_use]
pub fn build_measurement_prompt(profile: &Profile, deltas: &[MeasurementDelta]) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Analyze these body measurement changes for a {}-year-old {:?} with goal: {}",
        profile.age, profile.gender, profile.goal
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "MEASUREMENTS (initial -> current, change):");
    for delta in deltas {
        let _ = writeln!(
            prompt,
            "- {}: {:.1}cm -> {:.1}cm ({:+.1}cm)",
            delta.site, delta.initial_cm, delta.current_cm, delta.change_cm
        );
    }
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "USER PROFILE:");
    let _ = writeln!(prompt, "- Activity Level: {:?}", profile.activity_level);
    let _ = writeln!(prompt, "- Experience Level: {:?}", profile.experience_level);
    let _ = writeln!(prompt, "- Current Weight: {:.1}kg", profile.weight_kg);
    let _ = writeln!(prompt, "- Target Weight: {:.1}kg", profile.target_weight_kg);
    prompt
}

// ============================================================================
// Regeneration
// ============================================================================

/// Outcome of regenerating flagged plans
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegenerationResult {
    /// Whether a new diet plan was generated and saved
    pub diet_regenerated: bool,
    /// Whether a new workout plan was generated and saved
    pub workout_regenerated: bool,
    /// Week number of the new diet plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_week: Option<u32>,
    /// Week number of the new workout plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_week: Option<u32>,
    /// User-facing messages, one per plan
    pub messages: Vec<String>,
}

fn next_week(current: Option<u32>) -> u32 {
    current.map_or(1, |week| week + 1)
}

fn reason_suffix(reason: Option<&String>) -> String {
    reason
        .filter(|r| !r.is_empty())
        .map(|r| format!(": {r}"))
        .unwrap_or_default()
}

// ============================================================================
// Analyzer
// ============================================================================

/// Runs reminder checks, analyses, and regeneration for the biometric cycle
#[derive(Debug, Clone)]
pub struct BiometricAnalyzer {
    pool: Arc<InferenceClientPool>,
    model: String,
    timeout: Duration,
    cadence_days: u32,
}

impl BiometricAnalyzer {
    /// Create an analyzer using the pool, the analysis model, and the reminder cadence
    #[must_use]
    pub fn new(
        pool: Arc<InferenceClientPool>,
        inference: &InferenceConfig,
        cycles: &CycleConfig,
    ) -> Self {
        Self {
            pool,
            model: inference.analysis_model.clone(),
            timeout: inference.timeout,
            cadence_days: cycles.reminder_cadence_days,
        }
    }

    /// Reminder cadence in days
    #[must_use]
    pub const fn cadence_days(&self) -> u32 {
        self.cadence_days
    }

    /// Whether `user_id` is due for a new measurement
    ///
    /// A user without a profile gets the not-due default.
    ///
    /// # Errors
    ///
    /// Returns a store error
    #[instrument(skip(self, store), fields(user_id = %user_id))]
    pub async fn check_reminder(
        &self,
        store: &dyn FitnessDataStore,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<ReminderStatus> {
        let reference = store
            .get_profile(user_id)
            .await?
            .and_then(|profile| profile.last_measurement_date());
        let status = ReminderStatus::from_reference(reference, now, self.cadence_days);
        debug!(
            due = status.due,
            days_until_next = status.days_until_next,
            "Measurement reminder checked"
        );
        Ok(status)
    }

    /// Compare the baseline with the latest measurement and produce a verdict
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the profile or any measurement is absent,
    /// or `MissingRequiredField` when a site is missing from either snapshot
    #[instrument(skip(self, store), fields(user_id = %user_id))]
    pub async fn analyze(
        &self,
        store: &dyn FitnessDataStore,
        user_id: Uuid,
    ) -> AppResult<BiometricVerdict> {
        let profile = store
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile"))?;
        let records = store.list_measurements(user_id).await?;
        let latest = records
            .last()
            .ok_or_else(|| AppError::not_found("Body measurements"))?;

        let initial = match profile.initial_measurements.as_ref() {
            Some(initial) => &initial.sites,
            None => &records
                .first()
                .ok_or_else(|| AppError::not_found("Body measurements"))?
                .measurements,
        };
        let deltas = compute_deltas(initial, &latest.measurements)?;

        let verdict = match self.request_narrative(&profile, &deltas).await {
            Ok((narrative, raw)) => {
                narrative_verdict(profile.goal, deltas, latest.date, narrative, &raw)
            }
            Err(failure) => {
                if failure == InferenceFailure::Unavailable {
                    debug!("Inference not configured, using rule-based measurement analysis");
                } else {
                    warn!(%failure, "Measurement analysis failed, falling back to rule-based");
                }
                rule_verdict(profile.goal, deltas, latest.date)
            }
        };

        EngineLogger::log_measurement_analysis(
            &user_id.to_string(),
            verdict.source.as_str(),
            verdict.progress.as_str(),
        );
        Ok(verdict)
    }

    async fn request_narrative(
        &self,
        profile: &Profile,
        deltas: &[MeasurementDelta],
    ) -> Result<(NarrativeVerdict, String), InferenceFailure> {
        let client = self
            .pool
            .get_client(TaskCategory::MeasurementAnalysis)
            .ok_or(InferenceFailure::Unavailable)?;

        let request = ChatRequest::instructed(
            MEASUREMENT_ANALYSIS_SYSTEM_PROMPT,
            build_measurement_prompt(profile, deltas),
            client.provider.capabilities(),
            false,
        )
        .with_model(self.model.clone())
        .with_temperature(ANALYSIS_TEMPERATURE)
        .with_max_tokens(ANALYSIS_MAX_TOKENS);

        let outcome = match complete_with_timeout(&client, &request, self.timeout).await {
            Ok(response) => parse_narrative(&response.content)
                .map(|narrative| (narrative, response.content))
                .ok_or_else(|| {
                    InferenceFailure::Malformed("no labelled lines in narrative".to_owned())
                }),
            Err(failure) => Err(failure),
        };

        if let Err(failure) = &outcome {
            if failure.counts_as_error() {
                self.pool.record_error(client.slot);
            }
        }
        outcome
    }

    /// Generate fresh plans for the parts `verdict` flags
    ///
    /// Each new plan takes the latest plan's week number plus one, or week 1.
    /// A generator or save failure for one plan becomes a message.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the profile is absent, or a store error
    #[instrument(skip(self, store, generator, verdict), fields(user_id = %user_id))]
    pub async fn regenerate(
        &self,
        store: &dyn FitnessDataStore,
        generator: &dyn PlanGenerator,
        user_id: Uuid,
        verdict: &BiometricVerdict,
    ) -> AppResult<RegenerationResult> {
        let mut result = RegenerationResult::default();
        if !verdict.needs_regeneration() {
            result
                .messages
                .push("No plan adjustments needed. Continue with current plans.".to_owned());
            return Ok(result);
        }

        let profile = store
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile"))?;

        if verdict.needs_diet_adjustment {
            let current = store.get_latest_diet_plan(user_id).await?;
            let week = next_week(current.map(|plan| plan.week_number));
            let outcome = match generator.generate_diet_plan(&profile, week).await {
                Ok(plan) => store.save_diet_plan(&plan).await,
                Err(error) => Err(error),
            };
            match outcome {
                Ok(()) => {
                    info!(week, "Diet plan regenerated");
                    result.diet_regenerated = true;
                    result.diet_week = Some(week);
                    result.messages.push(format!(
                        "Diet plan regenerated (Week {week}){}",
                        reason_suffix(verdict.diet_adjustment_reason.as_ref())
                    ));
                }
                Err(error) => {
                    warn!(%error, "Diet plan regeneration failed");
                    result
                        .messages
                        .push("Failed to regenerate diet plan. Please generate manually.".to_owned());
                }
            }
        }

        if verdict.needs_workout_adjustment {
            let current = store.get_latest_workout_plan(user_id).await?;
            let week = next_week(current.map(|plan| plan.week_number));
            let outcome = match generator.generate_workout_plan(&profile, week).await {
                Ok(plan) => store.save_workout_plan(&plan).await,
                Err(error) => Err(error),
            };
            match outcome {
                Ok(()) => {
                    info!(week, "Workout plan regenerated");
                    result.workout_regenerated = true;
                    result.workout_week = Some(week);
                    result.messages.push(format!(
                        "Workout plan regenerated (Week {week}){}",
                        reason_suffix(verdict.workout_adjustment_reason.as_ref())
                    ));
                }
                Err(error) => {
                    warn!(%error, "Workout plan regeneration failed");
                    result.messages.push(
                        "Failed to regenerate workout plan. Please generate manually.".to_owned(),
                    );
                }
            }
        }

        Ok(result)
    }
}

// ============================================================================
// Recording
// ============================================================================

/// One point of a measurement history chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPoint {
    /// Measurement date
    pub date: DateTime<Utc>,
    /// Waist (cm)
    pub waist_cm: Option<f64>,
    /// Chest (cm)
    pub chest_cm: Option<f64>,
    /// Hips (cm)
    pub hips_cm: Option<f64>,
    /// Mean of both arms (cm)
    pub arms_cm: Option<f64>,
    /// Mean of both thighs (cm)
    pub thighs_cm: Option<f64>,
}

impl From<&BodyMeasurement> for MeasurementPoint {
    fn from(record: &BodyMeasurement) -> Self {
        let sites = &record.measurements;
        Self {
            date: record.date,
            waist_cm: sites.waist_cm,
            chest_cm: sites.chest_cm,
            hips_cm: sites.hips_cm,
            arms_cm: sites.average_arm(),
            thighs_cm: sites.average_thigh(),
        }
    }
}

/// Store a full baseline on the profile and append it as the first record
///
/// Also resets the reminder cadence to `now`.
///
/// # Errors
///
/// Returns a validation error naming the offending site, `ResourceNotFound`
/// when the profile is absent, or a store error
#[instrument(skip(store, sites), fields(user_id = %user_id))]
pub async fn record_initial_measurements(
    store: &dyn FitnessDataStore,
    user_id: Uuid,
    sites: MeasurementSet,
    now: DateTime<Utc>,
) -> AppResult<BodyMeasurement> {
    sites.validate_complete()?;
    let mut profile = store
        .get_profile(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Profile"))?;

    profile.initial_measurements = Some(InitialMeasurements {
        sites: sites.clone(),
        measured_at: now,
    });
    profile.last_measurement_reminder = Some(now);
    store.save_profile(&profile).await?;

    let record = BodyMeasurement {
        user_id,
        date: now,
        measurements: sites,
        notes: "Initial measurements".to_owned(),
    };
    store.append_measurement(&record).await?;
    info!("Initial measurements recorded");
    Ok(record)
}

/// Append a follow-up measurement and reset the reminder cadence
///
/// # Errors
///
/// Returns a validation error when no site is present or a value is not
/// positive, `ResourceNotFound` when the profile is absent, or a store error
#[instrument(skip(store, sites, notes), fields(user_id = %user_id))]
pub async fn record_measurement(
    store: &dyn FitnessDataStore,
    user_id: Uuid,
    sites: MeasurementSet,
    notes: impl Into<String> + Send,
    now: DateTime<Utc>,
) -> AppResult<BodyMeasurement> {
    sites.validate_partial()?;
    let mut profile = store
        .get_profile(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Profile"))?;

    let record = BodyMeasurement {
        user_id,
        date: now,
        measurements: sites,
        notes: notes.into(),
    };
    store.append_measurement(&record).await?;

    profile.last_measurement_reminder = Some(now);
    store.save_profile(&profile).await?;
    info!("Measurement recorded");
    Ok(record)
}

/// Chart points for every measurement, oldest first
///
/// # Errors
///
/// Returns a store error
pub async fn measurement_history(
    store: &dyn FitnessDataStore,
    user_id: Uuid,
) -> AppResult<Vec<MeasurementPoint>> {
    let records = store.list_measurements(user_id).await?;
    Ok(records.iter().map(MeasurementPoint::from).collect())
}
