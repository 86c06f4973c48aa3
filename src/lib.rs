// ABOUTME: Main library entry point for the FitAI adaptive plan engine
// ABOUTME: Metrics aggregation, AI/rule plan decisions, plan mutation, and biometric cycles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitAI Engine
//!
//! Adaptive plan adjustment and biometric analysis for a fitness coaching
//! platform. The engine periodically decides whether a user's workout and
//! nutrition plan should change, and applies the change.
//!
//! ## Architecture
//!
//! - **Metrics aggregation**: rolling windows of daily logs reduced to `WeeklyMetrics`
//! - **Inference pool**: per-category credentials for the inference service,
//!   shared fallback key, lazy clients, usage counters
//! - **Decision engine**: AI-backed evaluation with a deterministic rule-table fallback
//! - **Plan mutator**: pure transforms from a decision to updated plan documents
//! - **Biometric analyzer**: 4-week measurement cadence with AI narrative analysis
//! - **Services**: orchestration that persists results through the data store
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fitai_engine::config::EngineConfig;
//! use fitai_engine::inference::InferenceClientPool;
//! use fitai_engine::services::PlanAdjustmentService;
//! use fitai_engine::store::InMemoryStore;
//! use fitai_engine::errors::AppResult;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = EngineConfig::from_env()?;
//!     let pool = Arc::new(InferenceClientPool::from_config(&config.inference));
//!     let store = Arc::new(InMemoryStore::new());
//!     let service = PlanAdjustmentService::new(store, pool, config);
//!
//!     let decision = service.evaluate(Uuid::new_v4()).await?;
//!     println!("needs adjustment: {}", decision.needs_adjustment);
//!     Ok(())
//! }
//! ```

pub use fitai_core::{constants, errors, models};

/// Environment-based engine configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// LLM provider abstraction and the Groq implementation
pub mod llm;

/// Per-category credential pool for the inference service
pub mod inference;

/// Metrics, decision, mutation, and biometric algorithms
pub mod intelligence;

/// Data store and plan generator collaborator interfaces
pub mod store;

/// Orchestration services wiring the engine to the data store
pub mod services;
