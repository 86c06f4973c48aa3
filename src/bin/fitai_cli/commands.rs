// ABOUTME: Command implementations for the FitAI CLI
// ABOUTME: Loads fixtures into the in-memory store and prints engine results as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fitai_engine::config::EngineConfig;
use fitai_engine::inference::{InferenceClientPool, TaskCategory};
use fitai_engine::intelligence::BiometricAnalyzer;
use fitai_engine::services::PlanAdjustmentService;
use fitai_engine::store::{InMemoryStore, StoreFixture};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

async fn load_fixture(path: &Path) -> Result<(Arc<InMemoryStore>, Uuid)> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read fixture {}", path.display()))?;
    let fixture: StoreFixture = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid fixture {}", path.display()))?;

    let user_id = fixture.profile.user_id;
    let store = Arc::new(InMemoryStore::new());
    store.load_fixture(fixture).await;
    Ok((store, user_id))
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn stats(config: &EngineConfig) -> Result<()> {
    let pool = InferenceClientPool::from_config(&config.inference);
    let stats = pool.usage_stats();

    println!("Inference key availability");
    println!("==========================");
    for category in TaskCategory::ALL {
        let slot = pool
            .resolve_slot(category)
            .map_or_else(|| "unavailable (rule-based only)".to_owned(), |s| s.to_string());
        println!("{:<22} {slot}", category.to_string());
    }
    println!();
    println!("{:<18} {:>10} {:>8} {:>8}", "Slot", "Configured", "Calls", "Errors");
    for usage in &stats.slots {
        println!(
            "{:<18} {:>10} {:>8} {:>8}",
            usage.slot.to_string(),
            if usage.configured { "yes" } else { "no" },
            usage.calls,
            usage.errors
        );
    }
    Ok(())
}

pub async fn evaluate(
    config: EngineConfig,
    fixture: &Path,
    as_of: Option<DateTime<Utc>>,
    show_metrics: bool,
) -> Result<()> {
    let (store, user_id) = load_fixture(fixture).await?;
    let pool = Arc::new(InferenceClientPool::from_config(&config.inference));
    let service = PlanAdjustmentService::new(store, pool, config);

    let evaluation = service
        .evaluate_at(user_id, as_of.unwrap_or_else(Utc::now))
        .await?;
    if show_metrics {
        print_json(&json!({
            "decision": evaluation.decision,
            "metrics": evaluation.metrics,
        }))
    } else {
        print_json(&evaluation.decision)
    }
}

pub async fn adjust(
    config: EngineConfig,
    fixture: &Path,
    as_of: Option<DateTime<Utc>>,
) -> Result<()> {
    let (store, user_id) = load_fixture(fixture).await?;
    let pool = Arc::new(InferenceClientPool::from_config(&config.inference));
    let service = PlanAdjustmentService::new(store, pool, config);

    let outcome = service
        .auto_adjust_at(user_id, None, as_of.unwrap_or_else(Utc::now))
        .await?;
    print_json(&outcome)
}

pub async fn reminder(
    config: &EngineConfig,
    fixture: &Path,
    as_of: Option<DateTime<Utc>>,
) -> Result<()> {
    let (store, user_id) = load_fixture(fixture).await?;
    let pool = Arc::new(InferenceClientPool::from_config(&config.inference));
    let analyzer = BiometricAnalyzer::new(pool, &config.inference, &config.cycles);

    let status = analyzer
        .check_reminder(store.as_ref(), user_id, as_of.unwrap_or_else(Utc::now))
        .await?;
    print_json(&status)
}

pub async fn analyze(config: &EngineConfig, fixture: &Path) -> Result<()> {
    let (store, user_id) = load_fixture(fixture).await?;
    let pool = Arc::new(InferenceClientPool::from_config(&config.inference));
    let analyzer = BiometricAnalyzer::new(pool, &config.inference, &config.cycles);

    let verdict = analyzer.analyze(store.as_ref(), user_id).await?;
    print_json(&verdict)
}
