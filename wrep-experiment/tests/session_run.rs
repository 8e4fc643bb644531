use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use wrep_core::{
    BACKGROUND, ColorWheel, PointerSample, Rgb, Stage, TrialRecord, WHEEL_SIZE,
    signed_wheel_error,
};
use wrep_experiment::{ConfigError, ExperimentConfig, Session, SessionError};
use wrep_timing::HighPrecisionTimer;

fn wheel() -> ColorWheel {
    let rows = (0..WHEEL_SIZE)
        .map(|i| [(i % 256) as u8, (i / 256) as u8, 40])
        .collect();
    ColorWheel::from_rows(rows).unwrap()
}

fn fast_config() -> ExperimentConfig {
    ExperimentConfig {
        set_sizes: vec![1, 3],
        trials_per_set_size: 2,
        number_of_blocks: 2,
        sample_time: 0.001,
        blank_time: 0.0,
        ..Default::default()
    }
}

/// A stage that plays the participant: it aims at the first wheel of the
/// latest presented frame, toggles the button every tick so each press is
/// a fresh edge, and always reads the same answer color off the screen.
struct AutoStage {
    answer: Rgb,
    queued_wheels: Vec<(f32, f32)>,
    frame_wheels: Vec<(f32, f32)>,
    pressed: bool,
    clock_ns: u64,
    cancel_after: Option<usize>,
    cancel_polls: usize,
}

impl AutoStage {
    fn new(answer: Rgb) -> Self {
        Self {
            answer,
            queued_wheels: Vec::new(),
            frame_wheels: Vec::new(),
            pressed: false,
            clock_ns: 1_000_000_000,
            cancel_after: None,
            cancel_polls: 0,
        }
    }

    fn cancelling_after(answer: Rgb, polls: usize) -> Self {
        Self {
            cancel_after: Some(polls),
            ..Self::new(answer)
        }
    }
}

impl Stage for AutoStage {
    fn draw_circle(&mut self, _at: (f32, f32), _radius: f32, _color: Rgb) {}

    fn draw_wheel(&mut self, at: (f32, f32), _radius: f32, _rotation: u16) {
        self.queued_wheels.push(at);
    }

    fn present(&mut self) {
        self.frame_wheels = std::mem::take(&mut self.queued_wheels);
    }

    fn pointer(&mut self) -> PointerSample {
        self.pressed = !self.pressed;
        self.clock_ns += 16_000_000;
        PointerSample {
            position: self.frame_wheels.first().copied().unwrap_or((99.0, 99.0)),
            pressed: self.pressed,
            timestamp: self.clock_ns,
        }
    }

    fn sample_color(&mut self, at: (f32, f32)) -> Option<Rgb> {
        let on_a_wheel = self
            .frame_wheels
            .iter()
            .any(|&(x, y)| (x - at.0).abs() < 0.01 && (y - at.1).abs() < 0.01);
        Some(if on_a_wheel { self.answer } else { BACKGROUND })
    }

    fn cancel_requested(&mut self) -> bool {
        self.cancel_polls += 1;
        self.cancel_after
            .is_some_and(|after| self.cancel_polls > after)
    }
}

fn by_trial(records: &[TrialRecord]) -> BTreeMap<(usize, usize), Vec<&TrialRecord>> {
    let mut grouped: BTreeMap<(usize, usize), Vec<&TrialRecord>> = BTreeMap::new();
    for record in records {
        grouped.entry((record.block, record.trial)).or_default().push(record);
    }
    grouped
}

#[test]
fn a_full_session_records_every_item_of_every_trial() {
    let wheel = wheel();
    let answer = wheel.color(0);
    let config = fast_config();
    let session = Session::new(
        config.clone(),
        wheel,
        "s01",
        AutoStage::new(answer),
        HighPrecisionTimer::new(),
        StdRng::seed_from_u64(42),
        Vec::<TrialRecord>::new(),
    )
    .unwrap();

    let records = session.run().unwrap();

    // 2 blocks x (2 trials of 1 item + 2 trials of 3 items).
    assert_eq!(records.len(), 2 * (2 * 1 + 2 * 3));

    let grouped = by_trial(&records);
    assert_eq!(grouped.len(), 2 * config.trials_per_block());

    for ((block, trial), rows) in &grouped {
        assert!(*block < config.number_of_blocks);
        assert!(*trial < config.trials_per_block());

        let set_size = rows[0].set_size;
        assert_eq!(rows.len(), set_size);
        assert!(config.set_sizes.contains(&set_size));

        // Rows come out in layout order and clicks cover 1..=set_size.
        let mut clicks: Vec<u16> = rows.iter().map(|r| r.click_number).collect();
        clicks.sort_unstable();
        assert_eq!(clicks, (1..=set_size as u16).collect::<Vec<_>>());
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.location_number, i + 1);
            assert_eq!(row.subject, "s01");
            assert_eq!(row.set_size, set_size);
            assert!(row.timestamp > 0);
        }
    }
}

#[test]
fn recorded_errors_score_the_answer_against_each_true_color() {
    let wheel = wheel();
    let answer = wheel.color(0);
    let session = Session::new(
        fast_config(),
        wheel,
        "s02",
        AutoStage::new(answer),
        HighPrecisionTimer::new(),
        StdRng::seed_from_u64(7),
        Vec::<TrialRecord>::new(),
    )
    .unwrap();

    let records = session.run().unwrap();

    for record in &records {
        assert_eq!(record.resp_color, Some(answer));
        // The stage always answers wheel row 0, so every error is the
        // signed offset from the item's true hue back to zero.
        assert_eq!(record.error, Some(signed_wheel_error(0, record.color_index)));
        let rt = record.rt.expect("every item was clicked");
        assert!(rt >= 0.0);
    }
}

#[test]
fn trial_geometry_survives_into_the_records() {
    let wheel = wheel();
    let answer = wheel.color(0);
    let config = fast_config();
    let session = Session::new(
        config.clone(),
        wheel,
        "s03",
        AutoStage::new(answer),
        HighPrecisionTimer::new(),
        StdRng::seed_from_u64(11),
        Vec::<TrialRecord>::new(),
    )
    .unwrap();

    let records = session.run().unwrap();

    for record in &records {
        let norm = (f64::from(record.location_x).powi(2)
            + f64::from(record.location_y).powi(2))
        .sqrt();
        assert!((norm - f64::from(config.distance_from_fixation)).abs() < 1e-4);
        assert!(record.color_index < WHEEL_SIZE);
    }
}

#[test]
fn the_same_seed_reproduces_the_same_protocol() {
    let run = |seed: u64| {
        let wheel = wheel();
        let answer = wheel.color(0);
        Session::new(
            fast_config(),
            wheel,
            "s04",
            AutoStage::new(answer),
            HighPrecisionTimer::new(),
            StdRng::seed_from_u64(seed),
            Vec::<TrialRecord>::new(),
        )
        .unwrap()
        .run()
        .unwrap()
    };

    let first = run(5);
    let second = run(5);
    let protocol = |records: &[TrialRecord]| {
        records
            .iter()
            .map(|r| {
                (
                    r.block,
                    r.trial,
                    r.location_number,
                    r.set_size,
                    r.color_index,
                    r.true_color,
                    (r.location_x.to_bits(), r.location_y.to_bits()),
                )
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(protocol(&first), protocol(&second));
}

#[test]
fn cancelling_mid_trial_aborts_the_whole_run() {
    let wheel = wheel();
    let answer = wheel.color(0);
    let session = Session::new(
        fast_config(),
        wheel,
        "s05",
        AutoStage::cancelling_after(answer, 3),
        HighPrecisionTimer::new(),
        StdRng::seed_from_u64(3),
        Vec::<TrialRecord>::new(),
    )
    .unwrap();

    let err = session.run().unwrap_err();
    assert!(matches!(err, SessionError::Cancelled(_)));
}

#[test]
fn an_infeasible_configuration_never_starts() {
    let config = ExperimentConfig {
        set_sizes: vec![8],
        min_color_dist: 26,
        ..Default::default()
    };
    let result = Session::new(
        config,
        wheel(),
        "s06",
        AutoStage::new([1, 1, 1]),
        HighPrecisionTimer::new(),
        StdRng::seed_from_u64(1),
        Vec::<TrialRecord>::new(),
    );
    let Err(err) = result else {
        panic!("an infeasible configuration validated");
    };
    assert!(matches!(err, ConfigError::InfeasibleColorDist { .. }));
}
