// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Scripted inference providers, plan generator, and profile/log/plan builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::wildcard_in_or_patterns,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::too_many_lines,
    clippy::similar_names,
    clippy::cast_possible_wrap
)]
//! Shared test utilities for `fitai_engine`
//!
//! This module provides common fixtures and scripted collaborators to reduce
//! duplication across integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use fitai_engine::config::InferenceConfig;
use fitai_engine::errors::{AppError, AppResult};
use fitai_engine::inference::{ClientFactory, CredentialSlot, InferenceClientPool};
use fitai_engine::llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider};
use fitai_engine::models::{
    ActivityLevel, DailyLog, DietPlan, EnergyLevel, Exercise, ExperienceLevel, FitnessGoal,
    Gender, MacroSplit, Meal, MealMacros, MeasurementSet, Profile, WorkoutDay, WorkoutPlan,
};
use fitai_engine::store::{InMemoryStore, PlanGenerator, StoreFixture};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

// ============================================================================
// Time and identity
// ============================================================================

/// Fixed evaluation time so window arithmetic is reproducible
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()
}

/// Deterministic test user
pub fn test_user_id() -> Uuid {
    Uuid::from_u128(0x00fa_17a1_0000_0000_0000_0000_0000_0001)
}

/// `now` minus whole days
pub fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - chrono::Duration::days(days)
}

// ============================================================================
// Profiles and logs
// ============================================================================

/// Profile with a calorie target and no measurements
pub fn sample_profile(user_id: Uuid, goal: FitnessGoal) -> Profile {
    Profile {
        user_id,
        age: 32,
        gender: Gender::Female,
        height_cm: 168.0,
        weight_kg: 80.0,
        target_weight_kg: 70.0,
        goal,
        activity_level: ActivityLevel::Moderate,
        experience_level: ExperienceLevel::Intermediate,
        available_days_per_week: 5,
        dietary_preferences: String::new(),
        allergies: String::new(),
        injuries_limitations: String::new(),
        daily_calorie_target: Some(2000),
        initial_measurements: None,
        last_measurement_reminder: None,
    }
}

/// One daily log
pub fn daily_log(
    user_id: Uuid,
    date: DateTime<Utc>,
    weight_kg: Option<f64>,
    workout_completed: bool,
    diet_followed: bool,
    calories_consumed: Option<u32>,
) -> DailyLog {
    DailyLog {
        user_id,
        date,
        workout_completed,
        diet_followed,
        weight_kg,
        sleep_hours: Some(7.5),
        water_liters: Some(2.0),
        calories_consumed,
        energy_level: Some(EnergyLevel::Normal),
        mood: None,
    }
}

/// Twenty-eight daily logs whose weekly weight averages are `week_weights`, oldest first
///
/// Every log carries the same adherence flags and calorie intake.
pub fn weekly_weight_logs(
    user_id: Uuid,
    now: DateTime<Utc>,
    week_weights: [f64; 4],
    workout_completed: bool,
    diet_followed: bool,
    calories: u32,
) -> Vec<DailyLog> {
    (0..28_i64)
        .rev()
        .map(|day| {
            let bucket = 3 - (day / 7) as usize;
            daily_log(
                user_id,
                days_ago(now, day),
                Some(week_weights[bucket]),
                workout_completed,
                diet_followed,
                Some(calories),
            )
        })
        .collect()
}

/// Slow weight loss: weekly averages 80.0, 79.8, 79.7, 79.7 with full adherence at 2000 kcal
pub fn slow_weight_loss_logs(user_id: Uuid, now: DateTime<Utc>) -> Vec<DailyLog> {
    weekly_weight_logs(user_id, now, [80.0, 79.8, 79.7, 79.7], true, true, 2000)
}

// ============================================================================
// Plans
// ============================================================================

const WEEK_DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Exercise with `sets` sets
pub fn exercise(name: &str, sets: u32) -> Exercise {
    Exercise {
        name: name.to_owned(),
        sets,
        reps: "8-12".to_owned(),
        rest_seconds: 90,
        guidance: "Controlled tempo".to_owned(),
        intensity_level: Some("moderate".to_owned()),
    }
}

/// Monday to Friday training with five 3-set exercises each; weekend rest (75 weekly sets)
pub fn sample_workout_plan(user_id: Uuid, now: DateTime<Utc>) -> WorkoutPlan {
    let workouts = WEEK_DAYS
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let rest_day = index >= 5;
            WorkoutDay {
                day: index as u8 + 1,
                day_name: (*name).to_owned(),
                workout_type: if rest_day { "Rest" } else { "Full Body" }.to_owned(),
                rest_day,
                exercises: if rest_day {
                    Vec::new()
                } else {
                    (1..=5)
                        .map(|n| exercise(&format!("{name} lift {n}"), 3))
                        .collect()
                },
                notes: None,
            }
        })
        .collect();

    WorkoutPlan {
        id: Uuid::new_v4(),
        user_id,
        week_number: 3,
        created_at: days_ago(now, 6),
        workouts,
        adjusted: false,
        adjustment_reason: None,
        adjustment_date: None,
    }
}

fn meal(meal_number: u8, meal_name: &str, calories: u32, macros: MealMacros) -> Meal {
    Meal {
        meal_number,
        meal_name: meal_name.to_owned(),
        estimated_calories: calories,
        macros,
        ingredients: vec!["Oats 80g".to_owned()],
    }
}

/// 2000 kcal plan at a 30/40/30 split, three meals of 600/800/600 kcal
pub fn sample_diet_plan(user_id: Uuid, now: DateTime<Utc>) -> DietPlan {
    DietPlan {
        id: Uuid::new_v4(),
        user_id,
        week_number: 3,
        created_at: days_ago(now, 6),
        daily_calories: 2000,
        protein_grams: 150,
        carbs_grams: 200,
        fat_grams: 67,
        meals: vec![
            meal(
                1,
                "Breakfast",
                600,
                MealMacros {
                    protein_g: 45,
                    carbs_g: 60,
                    fat_g: 20,
                },
            ),
            meal(
                2,
                "Lunch",
                800,
                MealMacros {
                    protein_g: 60,
                    carbs_g: 80,
                    fat_g: 27,
                },
            ),
            meal(
                3,
                "Dinner",
                600,
                MealMacros {
                    protein_g: 45,
                    carbs_g: 60,
                    fat_g: 20,
                },
            ),
        ],
        adjusted: false,
        adjustment_reason: None,
        adjustment_date: None,
    }
}

// ============================================================================
// Measurements
// ============================================================================

/// Full measurement set with matching left and right limbs
pub fn measurement_set(waist: f64, chest: f64, hips: f64, arm: f64, thigh: f64) -> MeasurementSet {
    MeasurementSet {
        waist_cm: Some(waist),
        chest_cm: Some(chest),
        hips_cm: Some(hips),
        left_arm_cm: Some(arm),
        right_arm_cm: Some(arm),
        left_thigh_cm: Some(thigh),
        right_thigh_cm: Some(thigh),
    }
}

/// Typical baseline
pub fn baseline_set() -> MeasurementSet {
    measurement_set(90.0, 100.0, 105.0, 32.0, 58.0)
}

// ============================================================================
// Store
// ============================================================================

/// In-memory store seeded with one user's data
pub async fn seeded_store(
    profile: Profile,
    logs: Vec<DailyLog>,
    workout_plan: Option<WorkoutPlan>,
    diet_plan: Option<DietPlan>,
) -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store
        .load_fixture(StoreFixture {
            profile,
            logs,
            measurements: Vec::new(),
            workout_plan,
            diet_plan,
        })
        .await;
    store
}

// ============================================================================
// Inference
// ============================================================================

/// What a scripted provider does with a request
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this content
    Content(String),
    /// Fail with this provider error
    Fail(String),
    /// Sleep before answering with an empty object
    Hang(Duration),
    /// Sleep before answering with this content
    Delayed(Duration, String),
}

/// Scripted provider that records every request
///
/// Replies are consumed in order; the last reply repeats once the script runs out.
#[derive(Debug)]
pub struct MockProvider {
    replies: Mutex<VecDeque<MockReply>>,
    last: Mutex<Option<MockReply>>,
    requests: Mutex<Vec<ChatRequest>>,
    capabilities: LlmCapabilities,
}

impl MockProvider {
    pub fn scripted(replies: Vec<MockReply>) -> Arc<Self> {
        Self::with_capabilities(
            replies,
            LlmCapabilities::SYSTEM_MESSAGES | LlmCapabilities::JSON_MODE,
        )
    }

    pub fn with_capabilities(replies: Vec<MockReply>, capabilities: LlmCapabilities) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            last: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            capabilities,
        })
    }

    pub fn replying(content: &str) -> Arc<Self> {
        Self::scripted(vec![MockReply::Content(content.to_owned())])
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::scripted(vec![MockReply::Fail(message.to_owned())])
    }

    pub fn hanging(duration: Duration) -> Arc<Self> {
        Self::scripted(vec![MockReply::Hang(duration)])
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn next_reply(&self) -> Option<MockReply> {
        let mut last = self.last.lock().unwrap();
        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            *last = Some(reply);
        }
        last.clone()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.capabilities
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.next_reply();

        let content = match reply {
            Some(MockReply::Content(content)) => content,
            Some(MockReply::Fail(message)) => {
                return Err(AppError::external_service("Mock", message));
            }
            Some(MockReply::Hang(duration)) => {
                tokio::time::sleep(duration).await;
                "{}".to_owned()
            }
            Some(MockReply::Delayed(duration, content)) => {
                tokio::time::sleep(duration).await;
                content
            }
            None => return Err(AppError::internal("mock provider has no scripted reply")),
        };

        Ok(ChatResponse {
            content,
            model: request.model.clone().unwrap_or_else(|| "mock-model".to_owned()),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        })
    }
}

/// Factory handing out one shared scripted provider and recording creations
#[derive(Debug)]
pub struct MockFactory {
    provider: Arc<MockProvider>,
    created: Mutex<Vec<(CredentialSlot, String)>>,
}

impl MockFactory {
    pub fn new(provider: Arc<MockProvider>) -> Arc<Self> {
        Arc::new(Self {
            provider,
            created: Mutex::new(Vec::new()),
        })
    }

    /// Slots and keys clients were created for, in order
    pub fn created(&self) -> Vec<(CredentialSlot, String)> {
        self.created.lock().unwrap().clone()
    }
}

impl ClientFactory for MockFactory {
    fn create(&self, slot: CredentialSlot, api_key: &str) -> Arc<dyn LlmProvider> {
        self.created
            .lock()
            .unwrap()
            .push((slot, api_key.to_owned()));
        Arc::clone(&self.provider) as Arc<dyn LlmProvider>
    }
}

/// Key value used for `slot` in test configs
pub fn test_key(slot: CredentialSlot) -> String {
    format!("gsk_test_{slot}")
}

/// Inference config with keys for `slots` and a short timeout
pub fn inference_config(slots: &[CredentialSlot]) -> InferenceConfig {
    let mut config = InferenceConfig {
        timeout: Duration::from_millis(200),
        ..InferenceConfig::default()
    };
    for &slot in slots {
        config = config.with_key(slot, test_key(slot));
    }
    config
}

/// Pool over a scripted provider with keys for `slots`
pub fn mock_pool(
    provider: Arc<MockProvider>,
    config: &InferenceConfig,
) -> (Arc<InferenceClientPool>, Arc<MockFactory>) {
    let factory = MockFactory::new(provider);
    let pool = Arc::new(InferenceClientPool::new(
        config,
        Arc::clone(&factory) as Arc<dyn ClientFactory>,
    ));
    (pool, factory)
}

/// Pool with no keys; every category is unavailable
pub fn unconfigured_pool() -> Arc<InferenceClientPool> {
    let (pool, _) = mock_pool(MockProvider::scripted(Vec::new()), &InferenceConfig::default());
    pool
}

/// Well-formed adjustment response
pub fn ai_adjustment_json(calories: u32, volume_pct: f64) -> String {
    format!(
        r#"{{
  "adjustmentRequired": true,
  "reason": "Weight loss has stalled for two weeks",
  "newCalorieTarget": {calories},
  "newMacroSplit": {{"protein": 35, "carbs": 35, "fat": 30}},
  "workoutChanges": {{"volumeChangePercent": {volume_pct}, "newWorkoutStructure": "Upper/Lower"}},
  "dashboardNotification": "We trimmed calories slightly and added a little volume.",
  "explanation": "Small deficit increase with progressive overload"
}}"#
    )
}

// ============================================================================
// Plan generation
// ============================================================================

/// Plan generator producing fixed plans, optionally failing diet generation
#[derive(Debug, Default)]
pub struct MockPlanGenerator {
    pub fail_diet: bool,
    pub fail_workout: bool,
    calls: Mutex<Vec<(String, u32)>>,
}

impl MockPlanGenerator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_diet() -> Arc<Self> {
        Arc::new(Self {
            fail_diet: true,
            ..Self::default()
        })
    }

    /// `("diet" | "workout", week)` per call, in order
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlanGenerator for MockPlanGenerator {
    async fn generate_workout_plan(
        &self,
        profile: &Profile,
        week_number: u32,
    ) -> AppResult<WorkoutPlan> {
        self.calls
            .lock()
            .unwrap()
            .push(("workout".to_owned(), week_number));
        if self.fail_workout {
            return Err(AppError::external_service("Mock", "workout generation failed"));
        }
        let mut plan = sample_workout_plan(profile.user_id, fixed_now());
        plan.week_number = week_number;
        plan.created_at = fixed_now();
        Ok(plan)
    }

    async fn generate_diet_plan(&self, profile: &Profile, week_number: u32) -> AppResult<DietPlan> {
        self.calls
            .lock()
            .unwrap()
            .push(("diet".to_owned(), week_number));
        if self.fail_diet {
            return Err(AppError::external_service("Mock", "diet generation failed"));
        }
        let mut plan = sample_diet_plan(profile.user_id, fixed_now());
        plan.week_number = week_number;
        plan.created_at = fixed_now();
        let split = MacroSplit::new(30, 40, 30);
        let (protein, carbs, fat) = split.grams_for(plan.daily_calories);
        plan.protein_grams = protein;
        plan.carbs_grams = carbs;
        plan.fat_grams = fat;
        Ok(plan)
    }
}
