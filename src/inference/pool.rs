// ABOUTME: Instance-scoped pool of inference clients keyed by credential slot
// ABOUTME: Resolves categories to dedicated or fallback keys, caches clients, counts usage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::categories::{CredentialSlot, TaskCategory};
use crate::config::InferenceConfig;
use crate::llm::{GroqProvider, LlmProvider};

/// Creates provider instances for a credential slot
///
/// Injected into the pool so tests can substitute scripted providers.
pub trait ClientFactory: Send + Sync {
    /// Build a provider bound to `api_key`
    fn create(&self, slot: CredentialSlot, api_key: &str) -> Arc<dyn LlmProvider>;
}

/// Factory producing [`GroqProvider`] clients
#[derive(Debug, Default, Clone, Copy)]
pub struct GroqClientFactory;

impl ClientFactory for GroqClientFactory {
    fn create(&self, _slot: CredentialSlot, api_key: &str) -> Arc<dyn LlmProvider> {
        Arc::new(GroqProvider::new(api_key.to_owned()))
    }
}

/// Client handed out by the pool, tagged with the slot that served it
#[derive(Clone)]
pub struct InferenceClient {
    /// Slot whose key backs this client
    pub slot: CredentialSlot,
    /// Provider to send requests through
    pub provider: Arc<dyn LlmProvider>,
}

impl fmt::Debug for InferenceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceClient")
            .field("slot", &self.slot)
            .field("provider", &self.provider.name())
            .finish()
    }
}

#[derive(Default)]
struct SlotCounters {
    calls: AtomicU64,
    errors: AtomicU64,
    // Unix millis, 0 = never used
    last_used_ms: AtomicI64,
}

/// Usage of a single credential slot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotUsage {
    /// Slot name
    pub slot: CredentialSlot,
    /// Whether a usable key is configured
    pub configured: bool,
    /// Clients handed out
    pub calls: u64,
    /// Failures reported by callers
    pub errors: u64,
    /// Last time a client was handed out
    pub last_used: Option<DateTime<Utc>>,
}

/// Snapshot of pool usage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageStats {
    /// Per-slot usage, fallback last
    pub slots: Vec<SlotUsage>,
    /// Categories that currently resolve to a key
    pub available_categories: Vec<TaskCategory>,
}

impl UsageStats {
    /// Calls summed over all slots
    #[must_use]
    pub fn total_calls(&self) -> u64 {
        self.slots.iter().map(|s| s.calls).sum()
    }

    /// Errors summed over all slots
    #[must_use]
    pub fn total_errors(&self) -> u64 {
        self.slots.iter().map(|s| s.errors).sum()
    }

    /// Usage for one slot
    #[must_use]
    pub fn slot(&self, slot: CredentialSlot) -> Option<&SlotUsage> {
        self.slots.iter().find(|s| s.slot == slot)
    }
}

/// Pool of inference clients, one per resolved credential slot
///
/// Clients are created lazily on first use and cached for the lifetime of
/// the pool. Counters are atomic so the pool can be shared behind an `Arc`.
pub struct InferenceClientPool {
    keys: BTreeMap<CredentialSlot, String>,
    factory: Arc<dyn ClientFactory>,
    clients: DashMap<CredentialSlot, Arc<dyn LlmProvider>>,
    counters: [SlotCounters; 6],
}

impl InferenceClientPool {
    /// Create a pool with an explicit factory
    #[must_use]
    pub fn new(config: &InferenceConfig, factory: Arc<dyn ClientFactory>) -> Self {
        debug!(
            configured_slots = config.keys.len(),
            "Initializing inference client pool"
        );
        Self {
            keys: config.keys.clone(),
            factory,
            clients: DashMap::new(),
            counters: Default::default(),
        }
    }

    /// Create a pool producing Groq clients
    #[must_use]
    pub fn from_config(config: &InferenceConfig) -> Self {
        Self::new(config, Arc::new(GroqClientFactory))
    }

    /// Slot that would serve `category`, if any
    #[must_use]
    pub fn resolve_slot(&self, category: TaskCategory) -> Option<CredentialSlot> {
        let preferred = category.preferred_slot();
        if self.keys.contains_key(&preferred) {
            Some(preferred)
        } else if self.keys.contains_key(&CredentialSlot::Fallback) {
            Some(CredentialSlot::Fallback)
        } else {
            None
        }
    }

    /// Whether `category` resolves to a key; never creates a client
    #[must_use]
    pub fn is_available(&self, category: TaskCategory) -> bool {
        self.resolve_slot(category).is_some()
    }

    /// Client for `category`, counting the call against the resolved slot
    #[must_use]
    pub fn get_client(&self, category: TaskCategory) -> Option<InferenceClient> {
        let Some(slot) = self.resolve_slot(category) else {
            warn!(%category, "No inference key configured for category");
            return None;
        };
        let api_key = self.keys.get(&slot)?;

        let provider = self
            .clients
            .entry(slot)
            .or_insert_with(|| {
                debug!(%slot, "Creating inference client");
                self.factory.create(slot, api_key)
            })
            .value()
            .clone();

        let counters = &self.counters[slot.index()];
        counters.calls.fetch_add(1, Ordering::Relaxed);
        counters
            .last_used_ms
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);

        if slot != category.preferred_slot() {
            debug!(%category, "Using fallback inference key");
        }

        Some(InferenceClient { slot, provider })
    }

    /// Count a failed call against `slot`
    pub fn record_error(&self, slot: CredentialSlot) {
        self.counters[slot.index()]
            .errors
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Whether any slot holds a usable key
    #[must_use]
    pub fn has_any_key(&self) -> bool {
        !self.keys.is_empty()
    }

    /// Snapshot of per-slot usage
    #[must_use]
    pub fn usage_stats(&self) -> UsageStats {
        let slots = CredentialSlot::ALL
            .iter()
            .map(|&slot| {
                let counters = &self.counters[slot.index()];
                let last_used_ms = counters.last_used_ms.load(Ordering::Relaxed);
                SlotUsage {
                    slot,
                    configured: self.keys.contains_key(&slot),
                    calls: counters.calls.load(Ordering::Relaxed),
                    errors: counters.errors.load(Ordering::Relaxed),
                    last_used: (last_used_ms > 0)
                        .then(|| Utc.timestamp_millis_opt(last_used_ms).single())
                        .flatten(),
                }
            })
            .collect();

        UsageStats {
            slots,
            available_categories: TaskCategory::ALL
                .into_iter()
                .filter(|&c| self.is_available(c))
                .collect(),
        }
    }
}

impl fmt::Debug for InferenceClientPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceClientPool")
            .field("configured_slots", &self.keys.keys().collect::<Vec<_>>())
            .field("cached_clients", &self.clients.len())
            .finish_non_exhaustive()
    }
}
