// ABOUTME: Workout and diet plan documents mutated by plan adjustments
// ABOUTME: WorkoutPlan, WorkoutDay, Exercise, DietPlan, Meal, and MacroSplit definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::nutrition::{
    CARBS_KCAL_PER_GRAM, DEFAULT_CARBS_PCT, DEFAULT_FAT_PCT, DEFAULT_PROTEIN_PCT,
    FAT_KCAL_PER_GRAM, MACRO_SUM_TOLERANCE_PCT, PROTEIN_KCAL_PER_GRAM,
};
use crate::constants::plans::DEFAULT_SPLIT_TYPE;

/// Macronutrient split as whole percentages of daily calories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MacroSplit {
    /// Protein share (%)
    pub protein: u32,
    /// Carbohydrate share (%)
    pub carbs: u32,
    /// Fat share (%)
    pub fat: u32,
}

impl Default for MacroSplit {
    fn default() -> Self {
        Self {
            protein: DEFAULT_PROTEIN_PCT,
            carbs: DEFAULT_CARBS_PCT,
            fat: DEFAULT_FAT_PCT,
        }
    }
}

impl MacroSplit {
    /// Create a split from percentages
    #[must_use]
    pub const fn new(protein: u32, carbs: u32, fat: u32) -> Self {
        Self {
            protein,
            carbs,
            fat,
        }
    }

    /// Sum of the three shares
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.protein.saturating_add(self.carbs).saturating_add(self.fat)
    }

    /// Whether the shares sum to 100 within tolerance
    #[must_use]
    pub const fn is_balanced(&self) -> bool {
        self.total().abs_diff(100) <= MACRO_SUM_TOLERANCE_PCT
    }

    /// Derive the split from gram amounts and a calorie total
    ///
    /// Returns `None` when `calories` is zero.
    #[must_use]
    pub fn from_grams(protein_g: u32, carbs_g: u32, fat_g: u32, calories: u32) -> Option<Self> {
        if calories == 0 {
            return None;
        }
        let calories = f64::from(calories);
        let share = |grams: u32, kcal_per_gram: f64| {
            (f64::from(grams) * kcal_per_gram / calories * 100.0).round() as u32
        };
        Some(Self {
            protein: share(protein_g, PROTEIN_KCAL_PER_GRAM),
            carbs: share(carbs_g, CARBS_KCAL_PER_GRAM),
            fat: share(fat_g, FAT_KCAL_PER_GRAM),
        })
    }

    /// Gram amounts (protein, carbs, fat) for a calorie target
    #[must_use]
    pub fn grams_for(&self, calories: u32) -> (u32, u32, u32) {
        let calories = f64::from(calories);
        let grams = |pct: u32, kcal_per_gram: f64| {
            (calories * f64::from(pct) / 100.0 / kcal_per_gram).round() as u32
        };
        (
            grams(self.protein, PROTEIN_KCAL_PER_GRAM),
            grams(self.carbs, CARBS_KCAL_PER_GRAM),
            grams(self.fat, FAT_KCAL_PER_GRAM),
        )
    }
}

/// Single exercise prescription
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    /// Exercise name
    pub name: String,
    /// Number of sets
    pub sets: u32,
    /// Rep scheme, e.g. "8-10"
    pub reps: String,
    /// Rest between sets
    #[serde(default)]
    pub rest_seconds: u32,
    /// Coaching guidance
    #[serde(default)]
    pub guidance: String,
    /// Light / Moderate / High
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity_level: Option<String>,
}

/// One day in a weekly workout plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutDay {
    /// Day index (1 = Monday)
    pub day: u8,
    /// Day name, e.g. "Monday"
    pub day_name: String,
    /// Session type, e.g. "Push", "Full Body", "Rest"
    #[serde(rename = "type")]
    pub workout_type: String,
    /// Whether this is a rest day
    #[serde(default)]
    pub rest_day: bool,
    /// Exercises for the day
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// Annotation left by adjustments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Latest weekly workout plan for a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    /// Plan identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Program week
    pub week_number: u32,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Daily structure
    pub workouts: Vec<WorkoutDay>,
    /// Whether an adjustment has been applied
    #[serde(default)]
    pub adjusted: bool,
    /// Decision action(s) behind the adjustment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment_reason: Option<String>,
    /// When the adjustment was applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment_date: Option<DateTime<Utc>>,
}

impl WorkoutPlan {
    /// Total sets per week across training days
    #[must_use]
    pub fn total_sets(&self) -> u32 {
        self.workouts
            .iter()
            .filter(|day| !day.rest_day)
            .flat_map(|day| &day.exercises)
            .fold(0_u32, |total, exercise| total.saturating_add(exercise.sets))
    }

    /// Split type, taken from the first day
    #[must_use]
    pub fn split_type(&self) -> &str {
        self.workouts
            .first()
            .map_or(DEFAULT_SPLIT_TYPE, |day| day.workout_type.as_str())
    }
}

/// Macronutrients of a single meal
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MealMacros {
    /// Protein grams
    pub protein_g: u32,
    /// Carbohydrate grams
    pub carbs_g: u32,
    /// Fat grams
    pub fat_g: u32,
}

/// One meal in a daily diet plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    /// Order within the day
    pub meal_number: u8,
    /// Meal name, e.g. "Breakfast"
    pub meal_name: String,
    /// Estimated calories
    pub estimated_calories: u32,
    /// Macronutrients
    #[serde(default)]
    pub macros: MealMacros,
    /// Ingredients with amounts
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Latest diet plan for a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DietPlan {
    /// Plan identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Program week
    pub week_number: u32,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Daily calorie target
    pub daily_calories: u32,
    /// Daily protein grams
    pub protein_grams: u32,
    /// Daily carbohydrate grams
    pub carbs_grams: u32,
    /// Daily fat grams
    pub fat_grams: u32,
    /// Daily meals
    #[serde(default)]
    pub meals: Vec<Meal>,
    /// Whether an adjustment has been applied
    #[serde(default)]
    pub adjusted: bool,
    /// Decision action(s) behind the adjustment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment_reason: Option<String>,
    /// When the adjustment was applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment_date: Option<DateTime<Utc>>,
}

impl DietPlan {
    /// Current macro split derived from the plan's gram targets
    #[must_use]
    pub fn macro_split(&self) -> Option<MacroSplit> {
        MacroSplit::from_grams(
            self.protein_grams,
            self.carbs_grams,
            self.fat_grams,
            self.daily_calories,
        )
    }
}
