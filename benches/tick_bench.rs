//! Tick throughput benchmark

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use floorflow::core::config::SimulationConfig;
use floorflow::simulation::scheduler::Scheduler;

fn bench_ticks(c: &mut Criterion) {
    c.bench_function("tick_x100_default_floor", |b| {
        b.iter_batched(
            || Scheduler::new(SimulationConfig::default()).unwrap(),
            |mut scheduler| {
                for _ in 0..100 {
                    scheduler.tick();
                }
                scheduler
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("tick_x100_saturated_injection", |b| {
        let mut config = SimulationConfig::default();
        config.injection_chance = 1.0;
        b.iter_batched(
            || Scheduler::new(config.clone()).unwrap(),
            |mut scheduler| {
                for _ in 0..100 {
                    scheduler.tick();
                }
                scheduler
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_ticks);
criterion_main!(benches);
