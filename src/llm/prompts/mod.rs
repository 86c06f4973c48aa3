// ABOUTME: System prompts for inference requests loaded at compile time
// ABOUTME: Plan adjustment JSON contract and measurement analysis labelled-line contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.

/// System prompt for plan adjustment decisions (JSON output)
pub const PLAN_ADJUSTMENT_SYSTEM_PROMPT: &str = include_str!("plan_adjustment_system.md");

/// System prompt for measurement analysis (labelled lines)
pub const MEASUREMENT_ANALYSIS_SYSTEM_PROMPT: &str = include_str!("measurement_analysis_system.md");
