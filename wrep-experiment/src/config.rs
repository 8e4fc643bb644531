use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generate::LOCATION_JITTER;

/// A configuration the generators could not satisfy. Every variant is
/// checked up front so a bad value fails before a participant sits down,
/// not as a hang or a panic mid-block.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("set_sizes must name at least one set size")]
    EmptySetSizes,
    #[error("set sizes must be at least 1")]
    ZeroSetSize,
    #[error("min_color_dist must be at least 1")]
    ZeroColorDist,
    #[error(
        "min_color_dist {min_color_dist} is too large to place {set_size} colors on the 360 wheel"
    )]
    InfeasibleColorDist { set_size: usize, min_color_dist: u16 },
    #[error("set size {0} spaces locations closer than twice the ±{LOCATION_JITTER} degree jitter, neighbors could land on top of each other")]
    CrowdedLocations(usize),
    #[error("trials_per_set_size must be at least 1")]
    ZeroTrialsPerSetSize,
    #[error("number_of_blocks must be at least 1")]
    ZeroBlocks,
    #[error("{0} must be a positive number")]
    NonPositive(&'static str),
    #[error("blank_time must not be negative")]
    NegativeBlankTime,
}

/// Everything one run needs to know, carrying the reference task's values
/// as defaults. Deserializes from a JSON object with any subset of the
/// fields; missing ones keep their default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Simultaneous items per trial. Each entry gets the same number of
    /// trials per block.
    pub set_sizes: Vec<usize>,
    pub trials_per_set_size: usize,
    pub number_of_blocks: usize,
    /// Radius of the stimulus ring, visual-angle degrees from fixation.
    pub distance_from_fixation: f32,
    /// Stimulus disc radius, visual-angle degrees. Response wheels share
    /// this radius and the preview disc inside a wheel uses half of it.
    pub stim_size: f32,
    /// Smallest circular distance allowed between two colors of one trial.
    pub min_color_dist: u16,
    /// Seconds the stimulus array stays up.
    pub sample_time: f64,
    /// Seconds of blank screen before the array and again before the wheels.
    pub blank_time: f64,
    /// Pointer-to-wheel-center distance below which a wheel counts as
    /// under the pointer, visual-angle degrees.
    pub hit_radius: f32,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            set_sizes: vec![1, 2, 4, 6],
            trials_per_set_size: 5,
            number_of_blocks: 2,
            distance_from_fixation: 6.0,
            stim_size: 1.5,
            min_color_dist: 25,
            sample_time: 2.0,
            blank_time: 1.0,
            hit_radius: 4.0,
        }
    }
}

impl ExperimentConfig {
    /// Checks every generator precondition.
    ///
    /// The color separation bound matters most. The color draw rejects
    /// candidates against the colors already accepted, so it must never be
    /// able to accept a prefix that leaves no legal candidate; requiring
    /// `2 * min_color_dist * (set_size - 1) < 360` keeps free arc on the
    /// wheel after every accepted color, which makes the draw terminate
    /// with probability one. The location bound likewise keeps jittered
    /// neighbors from swapping or colliding.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.set_sizes.is_empty() {
            return Err(ConfigError::EmptySetSizes);
        }
        if self.min_color_dist == 0 {
            return Err(ConfigError::ZeroColorDist);
        }
        for &set_size in &self.set_sizes {
            if set_size == 0 {
                return Err(ConfigError::ZeroSetSize);
            }
            if 2 * self.min_color_dist as usize * (set_size - 1) >= 360 {
                return Err(ConfigError::InfeasibleColorDist {
                    set_size,
                    min_color_dist: self.min_color_dist,
                });
            }
            if 360.0 / set_size as f64 <= f64::from(2 * LOCATION_JITTER) {
                return Err(ConfigError::CrowdedLocations(set_size));
            }
        }
        if self.trials_per_set_size == 0 {
            return Err(ConfigError::ZeroTrialsPerSetSize);
        }
        if self.number_of_blocks == 0 {
            return Err(ConfigError::ZeroBlocks);
        }
        if !(self.distance_from_fixation > 0.0) {
            return Err(ConfigError::NonPositive("distance_from_fixation"));
        }
        if !(self.stim_size > 0.0) {
            return Err(ConfigError::NonPositive("stim_size"));
        }
        if !(self.sample_time > 0.0) {
            return Err(ConfigError::NonPositive("sample_time"));
        }
        if !(self.blank_time >= 0.0) {
            return Err(ConfigError::NegativeBlankTime);
        }
        if !(self.hit_radius > 0.0) {
            return Err(ConfigError::NonPositive("hit_radius"));
        }
        Ok(())
    }

    /// Trials in one block.
    pub fn trials_per_block(&self) -> usize {
        self.set_sizes.len() * self.trials_per_set_size
    }
}
