// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Adjustment thresholds, nutrition energy densities, cadences, and service names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Rule-branch thresholds for plan adjustment
pub mod adjustment;

/// Default windows and cadences
pub mod cycles {
    /// Default rolling evaluation window in days
    pub const DEFAULT_EVALUATION_WINDOW_DAYS: u32 = 28;
    /// Smallest accepted evaluation window
    pub const MIN_EVALUATION_WINDOW_DAYS: u32 = 7;
    /// Largest accepted evaluation window
    pub const MAX_EVALUATION_WINDOW_DAYS: u32 = 182;
    /// Number of weekly weight buckets
    pub const WEEK_BUCKETS: usize = 4;
    /// Days per bucket
    pub const DAYS_PER_WEEK: i64 = 7;
    /// Trailing window for fatigue counting
    pub const FATIGUE_WINDOW_DAYS: i64 = 7;
    /// Default biometric measurement reminder cadence in days
    pub const DEFAULT_REMINDER_CADENCE_DAYS: u32 = 28;
}

/// Macronutrient energy densities and default split
pub mod nutrition {
    /// Protein energy density
    pub const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;
    /// Carbohydrate energy density
    pub const CARBS_KCAL_PER_GRAM: f64 = 4.0;
    /// Fat energy density
    pub const FAT_KCAL_PER_GRAM: f64 = 9.0;
    /// Default protein share (%)
    pub const DEFAULT_PROTEIN_PCT: u32 = 30;
    /// Default carbohydrate share (%)
    pub const DEFAULT_CARBS_PCT: u32 = 40;
    /// Default fat share (%)
    pub const DEFAULT_FAT_PCT: u32 = 30;
    /// Allowed deviation from 100% when checking a macro split
    pub const MACRO_SUM_TOLERANCE_PCT: u32 = 1;
    /// Largest share a single macronutrient can take (%)
    pub const MAX_MACRO_PCT: f64 = 100.0;
    /// Largest daily calorie target accepted from the inference service
    pub const MAX_DAILY_CALORIES: f64 = 10_000.0;
}

/// Measurement change thresholds (cm) for the rule-based biometric verdict
pub mod biometrics {
    /// Waist drop counted as progress on a weight loss goal
    pub const WAIST_LOSS_CM: f64 = 2.0;
    /// Hip drop counted as progress on a weight loss goal
    pub const HIPS_LOSS_CM: f64 = 2.0;
    /// Chest growth counted as progress on a muscle gain goal
    pub const CHEST_GAIN_CM: f64 = 2.0;
    /// Arm growth counted as progress on a muscle gain goal
    pub const ARM_GAIN_CM: f64 = 1.0;
    /// Thigh growth counted as progress on a muscle gain goal
    pub const THIGH_GAIN_CM: f64 = 2.0;
    /// Waist growth flagged as fat gain on a muscle gain goal
    pub const WAIST_GAIN_CONCERN_CM: f64 = 3.0;
    /// Mean absolute change below which maintenance is excellent
    pub const MAINTENANCE_STABLE_CM: f64 = 1.0;
    /// Mean absolute change above which maintenance needs attention
    pub const MAINTENANCE_DRIFT_CM: f64 = 2.0;
    /// Characters of an unlabelled narrative kept as the insight
    pub const NARRATIVE_EXCERPT_CHARS: usize = 500;
}

/// Plan mutation limits
pub mod plans {
    /// Exercises kept per training day when simplifying
    pub const SIMPLIFIED_MAX_EXERCISES: usize = 4;
    /// Exercises kept per training day in the beginner reset template
    pub const RESET_MAX_EXERCISES: usize = 3;
    /// Training days kept by the beginner reset template
    pub const RESET_TRAINING_DAYS: [&str; 3] = ["monday", "wednesday", "friday"];
    /// Minimum sets per exercise after a volume change
    pub const MIN_SETS: u32 = 1;
    /// Maximum sets per exercise after a volume change
    pub const MAX_SETS: u32 = 20;
    /// Split type reported when no workout plan exists
    pub const DEFAULT_SPLIT_TYPE: &str = "Full Body";
}

/// Service names for structured logging
pub mod service_names {
    /// Engine service name
    pub const FITAI_ENGINE: &str = "fitai-engine";
    /// Inference service display name used in error messages
    pub const INFERENCE_SERVICE: &str = "Groq";
}
