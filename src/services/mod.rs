// ABOUTME: Service layer orchestrating engine components against the data store
// ABOUTME: Weekly plan adjustment and biometric cycle services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Orchestration services
//!
//! The intelligence modules compute; services load inputs, call them, and
//! persist what they return. An HTTP or job layer would sit on top of these.

/// Biometric cycle: measurement recording, reminders, analysis, regeneration
pub mod biometrics;

/// Weekly evaluation and automatic plan adjustment
pub mod plan_adjustment;

pub use biometrics::{BiometricService, CycleReview};
pub use plan_adjustment::{AutoAdjustOutcome, PlanAdjustmentService};
