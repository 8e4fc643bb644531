use rand::Rng;

use wrep_core::{WHEEL_SIZE, circular_distance};

/// Fixed bound of the per-item angular jitter, degrees to either side.
pub const LOCATION_JITTER: i16 = 5;

/// Draws `set_size` hue indices by rejection sampling: a uniform candidate
/// is kept only when it stays at least `min_color_dist` ring steps from
/// every index accepted so far. Acceptance order is preserved, so the first
/// index drawn belongs to the first item.
///
/// Termination needs free arc left after every acceptance, which
/// [`ExperimentConfig::validate`](crate::config::ExperimentConfig::validate)
/// guarantees before any trial is built.
pub fn draw_color_indices<R: Rng>(rng: &mut R, set_size: usize, min_color_dist: u16) -> Vec<u16> {
    let mut indices: Vec<u16> = Vec::with_capacity(set_size);
    while indices.len() < set_size {
        let candidate = rng.random_range(0..WHEEL_SIZE);
        if indices
            .iter()
            .all(|&accepted| circular_distance(accepted, candidate) >= min_color_dist)
        {
            indices.push(candidate);
        }
    }
    indices
}

/// Angular layout for `set_size` items: even spacing around the circle, one
/// shared base rotation drawn from `[0, spacing)`, then an independent
/// whole-degree jitter per item. Angles are returned unreduced and strictly
/// increasing per slot.
fn draw_angles<R: Rng>(rng: &mut R, set_size: usize) -> Vec<f64> {
    let spacing = 360.0 / set_size as f64;
    let rotation = rng.random_range(0.0..spacing);
    (0..set_size)
        .map(|slot| {
            let jitter = rng.random_range(-LOCATION_JITTER..=LOCATION_JITTER);
            slot as f64 * spacing + rotation + f64::from(jitter)
        })
        .collect()
}

/// Draws the jittered ring layout and projects it to Cartesian coordinates
/// at `radius` from fixation. Slot order is preserved: location `i` is the
/// jittered position of the i-th even slot.
pub fn draw_locations<R: Rng>(rng: &mut R, set_size: usize, radius: f32) -> Vec<(f32, f32)> {
    let r = f64::from(radius);
    draw_angles(rng, set_size)
        .into_iter()
        .map(|angle| {
            let radians = angle.to_radians();
            ((r * radians.cos()) as f32, (r * radians.sin()) as f32)
        })
        .collect()
}
