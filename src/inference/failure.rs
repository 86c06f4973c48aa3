// ABOUTME: Inference failure classification and timeout-bounded completion helper
// ABOUTME: Failures are logged and counted by callers, then absorbed into rule-based fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::{Duration, Instant};

use thiserror::Error;

use super::pool::InferenceClient;
use crate::llm::{ChatRequest, ChatResponse};
use crate::logging::EngineLogger;

/// Why an inference-backed evaluation could not be used
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InferenceFailure {
    /// No key resolves for the category
    #[error("inference service not configured")]
    Unavailable,

    /// The provider returned an error
    #[error("inference request failed: {0}")]
    Transport(String),

    /// The call exceeded its time budget
    #[error("inference request timed out after {0:?}")]
    Timeout(Duration),

    /// The response could not be interpreted
    #[error("malformed inference response: {0}")]
    Malformed(String),
}

impl InferenceFailure {
    /// Whether this failure should count against the slot's error counter
    #[must_use]
    pub const fn counts_as_error(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

/// Send `request` through `client`, bounded by `timeout`
///
/// # Errors
///
/// Returns `Transport` when the provider fails and `Timeout` when the budget elapses
pub async fn complete_with_timeout(
    client: &InferenceClient,
    request: &ChatRequest,
    timeout: Duration,
) -> Result<ChatResponse, InferenceFailure> {
    let started = Instant::now();
    let outcome = tokio::time::timeout(timeout, client.provider.complete(request)).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    let model = request
        .model
        .as_deref()
        .unwrap_or_else(|| client.provider.default_model());
    let slot = client.slot.to_string();

    match outcome {
        Ok(Ok(response)) => {
            EngineLogger::log_inference_call(&slot, model, true, elapsed_ms);
            Ok(response)
        }
        Ok(Err(error)) => {
            EngineLogger::log_inference_call(&slot, model, false, elapsed_ms);
            Err(InferenceFailure::Transport(error.to_string()))
        }
        Err(_) => {
            EngineLogger::log_inference_call(&slot, model, false, elapsed_ms);
            Err(InferenceFailure::Timeout(timeout))
        }
    }
}
