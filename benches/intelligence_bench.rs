// ABOUTME: Criterion benchmarks for the adjustment intelligence algorithms
// ABOUTME: Measures metrics aggregation, rule evaluation, response parsing, and plan mutation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for adjustment intelligence.
//!
//! Measures metrics aggregation over growing log windows, the rule table,
//! AI response cleanup, narrative parsing, and workout plan transforms.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fitai_engine::intelligence::plan_mutator::{reset, scale_volume, simplify};
use fitai_engine::intelligence::{
    evaluate_rules, parse_decision, parse_narrative, WeeklyMetrics,
};
use fitai_engine::models::{
    DailyLog, EnergyLevel, Exercise, FitnessGoal, WorkoutDay, WorkoutPlan,
};
use uuid::Uuid;

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

fn bench_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

#[allow(clippy::cast_possible_wrap)]
fn generate_logs(days: usize, now: DateTime<Utc>) -> Vec<DailyLog> {
    let user_id = Uuid::from_u128(42);
    (0..days)
        .map(|index| DailyLog {
            user_id,
            date: now - Duration::days(index as i64),
            workout_completed: index % 3 != 0,
            diet_followed: index % 4 != 0,
            weight_kg: (index % 5 != 0).then(|| 82.0 - (days - index) as f64 * 0.03),
            sleep_hours: Some(7.0),
            water_liters: Some(2.5),
            calories_consumed: (index % 2 == 0).then_some(2100 + (index % 7) as u32 * 25),
            energy_level: Some(if index % 6 == 0 {
                EnergyLevel::SlightlyFatigued
            } else {
                EnergyLevel::Normal
            }),
            mood: None,
        })
        .collect()
}

fn generate_workout_plan(now: DateTime<Utc>) -> WorkoutPlan {
    let workouts = DAY_NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let rest_day = index == 6;
            WorkoutDay {
                day: index as u8 + 1,
                day_name: (*name).to_owned(),
                workout_type: if rest_day { "Rest" } else { "Full Body" }.to_owned(),
                rest_day,
                exercises: if rest_day {
                    Vec::new()
                } else {
                    (0..6)
                        .map(|n| Exercise {
                            name: format!("Exercise {n}"),
                            sets: 3 + n % 2,
                            reps: "8-12".to_owned(),
                            rest_seconds: 90,
                            guidance: "Controlled tempo".to_owned(),
                            intensity_level: None,
                        })
                        .collect()
                },
                notes: None,
            }
        })
        .collect();

    WorkoutPlan {
        id: Uuid::from_u128(7),
        user_id: Uuid::from_u128(42),
        week_number: 3,
        created_at: now,
        workouts,
        adjusted: false,
        adjustment_reason: None,
        adjustment_date: None,
    }
}

fn bench_metrics_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics_aggregation");
    let now = bench_now();
    let plan = generate_workout_plan(now);

    for days in [28_usize, 90, 182] {
        let logs = generate_logs(days, now);
        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::new("from_logs", days), &logs, |b, logs| {
            b.iter(|| {
                WeeklyMetrics::from_logs(
                    black_box(logs),
                    Some(&plan),
                    None,
                    now,
                    days as u32,
                )
            });
        });
    }

    group.finish();
}

fn bench_rule_branch(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_branch");
    let now = bench_now();
    let logs = generate_logs(28, now);
    let metrics = WeeklyMetrics::from_logs(&logs, None, None, now, 28);

    for goal in [
        FitnessGoal::WeightLoss,
        FitnessGoal::MuscleGain,
        FitnessGoal::Maintenance,
    ] {
        group.bench_with_input(
            BenchmarkId::new("evaluate_rules", goal.to_string()),
            &goal,
            |b, &goal| b.iter(|| evaluate_rules(goal, black_box(&metrics))),
        );
    }

    group.finish();
}

fn bench_response_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("response_parsing");

    let fenced = r#"```json
{
  "adjustmentRequired": true,
  "reason": "Weight loss has stalled",
  "newCalorieTarget": 1850,
  "newMacroSplit": {"protein": 35, "carbs": 35, "fat": 30},
  "workoutChanges": {"volumeChangePercent": 10, "newWorkoutStructure": "Upper/Lower"},
  "dashboardNotification": "Small calorie cut and a bit more volume this week",
}
```"#;
    group.bench_function("parse_decision_fenced", |b| {
        b.iter(|| parse_decision(black_box(fenced)));
    });

    let narrative = "PROGRESS: good\n\
        INSIGHTS: Waist is down 2.4 cm.\nHips are down 1.1 cm.\n\
        DIET_ADJUSTMENT: no - the deficit is working\n\
        WORKOUT_ADJUSTMENT: yes - add lower body volume\n\
        RECOMMENDATIONS:\n- Keep protein high\n- Add one leg session";
    group.bench_function("parse_narrative", |b| {
        b.iter(|| parse_narrative(black_box(narrative)));
    });

    group.finish();
}

fn bench_plan_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_mutation");
    let plan = generate_workout_plan(bench_now());

    group.bench_function("scale_volume", |b| {
        b.iter(|| scale_volume(black_box(&plan), 20.0, "Volume increased 20%"));
    });
    group.bench_function("simplify", |b| b.iter(|| simplify(black_box(&plan))));
    group.bench_function("reset", |b| b.iter(|| reset(black_box(&plan))));

    group.finish();
}

criterion_group!(
    benches,
    bench_metrics_aggregation,
    bench_rule_branch,
    bench_response_parsing,
    bench_plan_mutation
);
criterion_main!(benches);
