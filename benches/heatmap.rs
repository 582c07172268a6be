//! This bench aggregates availability for a large guild and lays it out on a
//! viewer's grid.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use roster::{
    Heatmap, SlotIndex,
    domain::{DaySlot, Schedule, SessionCalendar},
};

/// Generates players with staggered evening availability.
fn players(count: usize) -> Vec<(String, Schedule)> {
    (0..count)
        .map(|i| {
            let schedule = DaySlot::week()
                .filter(|cell| (cell.week_index() + i) % 3 != 0 && cell.slot.hour() >= 17)
                .collect();
            (format!("player-{i}"), schedule)
        })
        .collect()
}

fn aggregate(c: &mut Criterion) {
    let players = players(500);
    c.bench_function("aggregate 500 players", |b| {
        b.iter(|| Heatmap::aggregate(black_box(players.as_slice())));
    });
}

fn grid(c: &mut Criterion) {
    let heatmap = Heatmap::aggregate(&players(500));
    let index = SlotIndex::build("America/New_York", &SessionCalendar::default()).unwrap();
    c.bench_function("viewer grid", |b| {
        b.iter(|| heatmap.grid(black_box(&index)));
    });
}

criterion_group!(benches, aggregate, grid);
criterion_main!(benches);
