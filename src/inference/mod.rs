// ABOUTME: Inference service access with per-category credentials and usage tracking
// ABOUTME: Re-exports task categories, credential slots, and the client pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Inference Client Pool
//!
//! Each task category prefers its own API key so quota is isolated per
//! workload. When a dedicated key is absent or still a template placeholder,
//! the shared `GROQ_API_KEY` serves the category instead.

mod categories;
mod failure;
mod pool;

pub use categories::{CredentialSlot, TaskCategory};
pub use failure::{complete_with_timeout, InferenceFailure};
pub use pool::{
    ClientFactory, GroqClientFactory, InferenceClient, InferenceClientPool, SlotUsage, UsageStats,
};
