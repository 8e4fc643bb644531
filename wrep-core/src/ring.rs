/// Number of hue steps on the response wheel ring.
pub const WHEEL_SIZE: u16 = 360;

/// Shorter arc between two positions on the 360-step ring.
///
/// Symmetric, bounded by half the ring, and zero exactly when both inputs
/// name the same position. Inputs are reduced modulo the ring size first,
/// so the function is total.
pub fn circular_distance(a: u16, b: u16) -> u16 {
    let raw = (a % WHEEL_SIZE).abs_diff(b % WHEEL_SIZE);
    raw.min(WHEEL_SIZE - raw)
}

/// Signed offset from `truth` to `selected`, normalized into `[-180, 180]`.
///
/// Both endpoints are representable: an offset of exactly half the ring
/// keeps the sign of the unnormalized difference.
pub fn signed_wheel_error(selected: u16, truth: u16) -> i16 {
    let raw = (selected % WHEEL_SIZE) as i16 - (truth % WHEEL_SIZE) as i16;
    if raw < -180 {
        raw + 360
    } else if raw > 180 {
        raw - 360
    } else {
        raw
    }
}
