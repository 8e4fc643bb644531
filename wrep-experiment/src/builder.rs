use rand::Rng;
use rand::seq::SliceRandom;

use wrep_core::{ColorWheel, Trial, WHEEL_SIZE};

use crate::config::ExperimentConfig;
use crate::generate::{draw_color_indices, draw_locations};

/// Builds one trial of `set_size` items: separated hue indices, their
/// literal colors, one independent wheel rotation per item, and the
/// jittered ring layout. Everything random is drawn here; the trial never
/// changes afterwards.
pub fn build_trial<R: Rng>(
    rng: &mut R,
    wheel: &ColorWheel,
    config: &ExperimentConfig,
    set_size: usize,
) -> Trial {
    let color_indices = draw_color_indices(rng, set_size, config.min_color_dist);
    let color_values = color_indices.iter().map(|&index| wheel.color(index)).collect();
    let wheel_rotations = (0..set_size)
        .map(|_| rng.random_range(0..WHEEL_SIZE))
        .collect();
    let locations = draw_locations(rng, set_size, config.distance_from_fixation);
    Trial {
        set_size,
        color_indices,
        color_values,
        wheel_rotations,
        locations,
    }
}

/// Builds one block: `trials_per_set_size` trials for every configured set
/// size, shuffled into a single presentation order so set sizes interleave
/// unpredictably.
pub fn build_block<R: Rng>(
    rng: &mut R,
    wheel: &ColorWheel,
    config: &ExperimentConfig,
) -> Vec<Trial> {
    let mut trials = Vec::with_capacity(config.trials_per_block());
    for &set_size in &config.set_sizes {
        for _ in 0..config.trials_per_set_size {
            trials.push(build_trial(rng, wheel, config, set_size));
        }
    }
    trials.shuffle(rng);
    trials
}
