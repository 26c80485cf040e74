use criterion::{Criterion, criterion_group, criterion_main};
use hydration_bot::domains::aggregate;
use hydration_bot::types::{FoodEvent, WaterEvent, WorkoutEvent};
use hydration_bot::LoggedEvent;
use std::hint::black_box;

fn year_of_events() -> Vec<LoggedEvent> {
    let mut events = Vec::new();
    for day in 1..=365u32 {
        let date = format!("2025-{:02}-{:02}", (day - 1) / 31 + 1, (day - 1) % 31 + 1);
        for i in 0..8 {
            events.push(LoggedEvent::Water(WaterEvent {
                date: date.clone(),
                amount_ml: 200 + i * 25,
            }));
        }
        for i in 0..4 {
            events.push(LoggedEvent::Food(FoodEvent {
                date: date.clone(),
                name: format!("meal {i}"),
                kcal: 350.0 + f64::from(i) * 12.5,
            }));
        }
        events.push(LoggedEvent::Workout(WorkoutEvent {
            date,
            activity_type: "бег".into(),
            minutes: 40,
            kcal: 400,
            water_ml: 266,
        }));
    }
    events
}

fn bench_aggregate(c: &mut Criterion) {
    let events = year_of_events();
    c.bench_function("aggregate_one_day_of_a_year", |b| {
        b.iter(|| aggregate(black_box(&events), black_box("2025-06-15"), 2250, 2030))
    });
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
