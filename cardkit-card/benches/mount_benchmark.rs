use std::hint::black_box;

use cardkit_card::{HostPage, ProfileCard, ProfileCardProps};
use criterion::{criterion_group, criterion_main, Criterion};

const LONG: &str = "Software engineer based in the city";

/// Benchmark: mount a card whose description fits (one frame).
fn bench_mount_fits(c: &mut Criterion) {
    c.bench_function("mount_fits", |b| {
        b.iter(|| {
            let mut page: HostPage<ProfileCard> = HostPage::default();
            page.mount(ProfileCard::new(black_box("Hi there"))).unwrap();
        });
    });
}

/// Benchmark: mount a card that truncates (two frames).
fn bench_mount_truncates(c: &mut Criterion) {
    c.bench_function("mount_truncates", |b| {
        b.iter(|| {
            let mut page: HostPage<ProfileCard> = HostPage::default();
            page.mount(ProfileCard::new(black_box(LONG))).unwrap();
        });
    });
}

/// Benchmark: re-render an already mounted card with new props.
fn bench_update_props(c: &mut Criterion) {
    let mut page: HostPage<ProfileCard> = HostPage::default();
    let handle = page.mount(ProfileCard::new(LONG)).unwrap();
    let mut n = 0u64;

    c.bench_function("update_props", |b| {
        b.iter(|| {
            n += 1;
            page.update(handle, ProfileCardProps::new(format!("description {n}")))
                .unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_mount_fits,
    bench_mount_truncates,
    bench_update_props,
);
criterion_main!(benches);
