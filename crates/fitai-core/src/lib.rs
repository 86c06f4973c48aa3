// ABOUTME: Core types and constants for the FitAI adaptive plan engine
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitAI Core
//!
//! Foundation crate providing shared types and constants for the FitAI
//! adaptive plan engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Thresholds, cadences, and nutrition constants organized by domain
//! - **models**: Profile, daily log, body measurement, and plan documents

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Profile, `DailyLog`, `BodyMeasurement`, plans)
pub mod models;
