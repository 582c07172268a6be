//! This bench builds slot indices for a spread of viewer timezones, including
//! weeks with clock changes.

#![allow(missing_docs)]

use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use roster::{
    SlotIndex,
    domain::{SessionCalendar, timezone::parse_timezone},
};

const ZONES: &[&str] = &[
    "UTC",
    "America/New_York",
    "America/Los_Angeles",
    "Europe/Berlin",
    "Asia/Kolkata",
    "Australia/Lord_Howe",
    "Pacific/Kiritimati",
];

fn build(c: &mut Criterion) {
    let calendar = SessionCalendar::default();
    c.bench_function("build reference indices", |b| {
        b.iter(|| {
            for zone in ZONES {
                black_box(SlotIndex::build(zone, &calendar).unwrap());
            }
        });
    });
}

fn dst_week(c: &mut Criterion) {
    let calendar = SessionCalendar::default();
    let timezone = parse_timezone("America/New_York").unwrap();
    let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    c.bench_function("build spring-forward index", |b| {
        b.iter(|| SlotIndex::for_week(timezone, &calendar, black_box(monday)));
    });
}

criterion_group!(benches, build, dst_week);
criterion_main!(benches);
