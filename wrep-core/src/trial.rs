use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// One fully built trial. Constructed up front, displayed and answered
/// once, then dropped; nothing mutates it after construction.
///
/// The four per-item vectors are parallel: index `i` describes item `i`'s
/// hue, its literal color, the rotation of the wheel that will probe it,
/// and where it sits relative to fixation (visual-angle coordinates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    pub set_size: usize,
    pub color_indices: Vec<u16>,
    pub color_values: Vec<Rgb>,
    pub wheel_rotations: Vec<u16>,
    pub locations: Vec<(f32, f32)>,
}

/// What the response phase observed for one item of a trial.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemResponse {
    /// Literal color the participant settled on; `None` until resolved.
    pub color: Option<Rgb>,
    /// Seconds from response onset to the resolving click.
    pub rt: Option<f64>,
    /// 1-based position in the click sequence; 0 means never resolved.
    pub click_order: u16,
}

impl ItemResponse {
    pub fn unanswered() -> Self {
        Self {
            color: None,
            rt: None,
            click_order: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unanswered_items_carry_the_zero_click_sentinel() {
        let response = ItemResponse::unanswered();
        assert_eq!(response.click_order, 0);
        assert_eq!(response.color, None);
        assert_eq!(response.rt, None);
    }

    #[test]
    fn trials_round_trip_through_json() {
        let trial = Trial {
            set_size: 2,
            color_indices: vec![10, 200],
            color_values: vec![[1, 2, 3], [4, 5, 6]],
            wheel_rotations: vec![0, 359],
            locations: vec![(6.0, 0.0), (-6.0, 0.0)],
        };
        let text = serde_json::to_string(&trial).unwrap();
        let back: Trial = serde_json::from_str(&text).unwrap();
        assert_eq!(back, trial);
    }
}
