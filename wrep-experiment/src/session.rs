use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::Rng;
use thiserror::Error;

use wrep_core::{ColorWheel, RecordSink, Stage, Trial, TrialRecord, score_error};
use wrep_timing::Timer;

use crate::builder::build_block;
use crate::config::{ConfigError, ExperimentConfig};
use crate::response::{Cancelled, ResponseEngine, WheelTarget};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error("failed to persist a trial record: {0}")]
    Sink(#[from] std::io::Error),
}

/// One participant's run, wired to its collaborators: a stage to show and
/// sample, a timer to pace phases, an rng to build trials, and a sink that
/// takes the finished rows.
///
/// Blocks are built lazily, one at the start of each block, and every
/// trial runs the same ladder: blank, stimulus array, blank retention
/// interval, response wheels, scoring. Trials never overlap and nothing
/// runs concurrently; the whole run is one loop on the caller's thread.
pub struct Session<S, T, R, K> {
    config: ExperimentConfig,
    wheel: ColorWheel,
    subject: String,
    stage: S,
    timer: T,
    rng: R,
    sink: K,
}

impl<S, T, R, K> Session<S, T, R, K>
where
    S: Stage,
    T: Timer<Timestamp = u64>,
    R: Rng,
    K: RecordSink,
{
    /// Wires up a session, validating the configuration first so an
    /// infeasible one never reaches a participant.
    pub fn new(
        config: ExperimentConfig,
        wheel: ColorWheel,
        subject: impl Into<String>,
        stage: S,
        timer: T,
        rng: R,
        sink: K,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            wheel,
            subject: subject.into(),
            stage,
            timer,
            rng,
            sink,
        })
    }

    /// Runs every configured block and hands back the sink. Cancellation
    /// aborts the whole run; rows already pushed to the sink stay there.
    pub fn run(mut self) -> Result<K, SessionError> {
        for block in 0..self.config.number_of_blocks {
            let trials = build_block(&mut self.rng, &self.wheel, &self.config);
            println!("Block {} started: {} trials", block, trials.len());
            for (trial_num, trial) in trials.iter().enumerate() {
                println!(
                    "Block {} trial {}: set size {}",
                    block, trial_num, trial.set_size
                );
                let records = self.run_trial(trial, block, trial_num)?;
                for record in &records {
                    self.sink.push_record(record)?;
                }
            }
        }
        Ok(self.sink)
    }

    /// One trial, start to finish. Returns one record per item in layout
    /// order, scored against the wheel.
    fn run_trial(
        &mut self,
        trial: &Trial,
        block: usize,
        trial_num: usize,
    ) -> Result<Vec<TrialRecord>, SessionError> {
        self.blank();
        self.show_stimuli(trial);
        self.blank();

        let targets = trial
            .locations
            .iter()
            .zip(&trial.wheel_rotations)
            .map(|(&position, &rotation)| WheelTarget { position, rotation })
            .collect();
        let engine = ResponseEngine::new(targets, self.config.hit_radius);
        let responses = engine.run(&mut self.stage, &self.timer, self.config.stim_size)?;

        let timestamp = unix_seconds();
        let records = (0..trial.set_size)
            .map(|item| {
                let response = &responses[item];
                TrialRecord {
                    subject: self.subject.clone(),
                    block,
                    trial: trial_num,
                    location_number: item + 1,
                    click_number: response.click_order,
                    timestamp,
                    set_size: trial.set_size,
                    location_x: trial.locations[item].0,
                    location_y: trial.locations[item].1,
                    color_index: trial.color_indices[item],
                    true_color: trial.color_values[item],
                    resp_color: response.color,
                    error: response.color.and_then(|selected| {
                        score_error(&self.wheel, trial.color_indices[item], selected)
                    }),
                    rt: response.rt,
                }
            })
            .collect();
        Ok(records)
    }

    /// Blank screen for the configured inter-phase interval.
    fn blank(&mut self) {
        self.stage.present();
        self.timer.sleep(Duration::from_secs_f64(self.config.blank_time));
    }

    /// The memory array: every item's disc at its location, held for the
    /// sample interval.
    fn show_stimuli(&mut self, trial: &Trial) {
        for (&position, &color) in trial.locations.iter().zip(&trial.color_values) {
            self.stage.draw_circle(position, self.config.stim_size, color);
        }
        self.stage.present();
        self.timer.sleep(Duration::from_secs_f64(self.config.sample_time));
    }
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
