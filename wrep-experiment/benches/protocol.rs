use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use wrep_core::{ColorWheel, WHEEL_SIZE};
use wrep_experiment::config::ExperimentConfig;
use wrep_experiment::response::{EngineTick, ResponseEngine, WheelTarget};
use wrep_experiment::{build_block, build_trial};

fn wheel() -> ColorWheel {
    let rows = (0..WHEEL_SIZE)
        .map(|i| [(i % 256) as u8, (i / 256) as u8, 40])
        .collect();
    ColorWheel::from_rows(rows).unwrap()
}

pub fn bench_protocol(c: &mut Criterion) {
    let mut g = c.benchmark_group("protocol");
    g.sample_size(60);

    g.bench_function("trial_set_size_6", |b| {
        let wheel = wheel();
        let config = ExperimentConfig::default();
        b.iter_batched(
            || StdRng::seed_from_u64(7),
            |mut rng| build_trial(black_box(&mut rng), &wheel, &config, 6),
            BatchSize::SmallInput,
        )
    });

    g.bench_function("block_default_config", |b| {
        let wheel = wheel();
        let config = ExperimentConfig::default();
        b.iter_batched(
            || StdRng::seed_from_u64(7),
            |mut rng| build_block(black_box(&mut rng), &wheel, &config),
            BatchSize::SmallInput,
        )
    });

    g.finish();
}

pub fn bench_response_ticks(c: &mut Criterion) {
    let mut g = c.benchmark_group("response_engine");
    g.sample_size(60);

    let targets: Vec<WheelTarget> = (0..6)
        .map(|i| {
            let angle = f64::from(i) * 60.0_f64.to_radians();
            WheelTarget {
                position: ((6.0 * angle.cos()) as f32, (6.0 * angle.sin()) as f32),
                rotation: (i as u16) * 60,
            }
        })
        .collect();

    g.bench_function("hover_tick_six_pending", |b| {
        b.iter_batched(
            || ResponseEngine::new(targets.clone(), 4.0),
            |mut engine| {
                engine.step(black_box(EngineTick {
                    position: (5.5, 0.5),
                    press_edge: false,
                    press_time: 0.0,
                    sampled: Some([10, 20, 30]),
                }))
            },
            BatchSize::SmallInput,
        )
    });

    g.bench_function("resolve_all_six", |b| {
        let positions: Vec<(f32, f32)> = targets.iter().map(|t| t.position).collect();
        b.iter_batched(
            || ResponseEngine::new(targets.clone(), 4.0),
            |mut engine| {
                for (i, &position) in positions.iter().enumerate() {
                    engine.step(black_box(EngineTick {
                        position,
                        press_edge: true,
                        press_time: 0.1 * i as f64,
                        sampled: Some([10, 20, 30]),
                    }));
                }
                engine.into_responses()
            },
            BatchSize::SmallInput,
        )
    });

    g.finish();
}

criterion_group!(benches, bench_protocol, bench_response_ticks);
criterion_main!(benches);
