use crate::color::Rgb;
use crate::ring::signed_wheel_error;
use crate::wheel::ColorWheel;

/// Scores one reconstructed color against the hue it should have matched.
///
/// The selected triple is looked up in the wheel by exact equality; `None`
/// means no row matches, so the response cannot be resolved to a hue and
/// downstream analysis must treat the item as missing rather than as an
/// error of zero. Otherwise the result is the signed circular offset in
/// degrees, normalized into `[-180, 180]`.
pub fn score_error(wheel: &ColorWheel, true_index: u16, selected: Rgb) -> Option<i16> {
    wheel
        .position_of(selected)
        .map(|matched| signed_wheel_error(matched, true_index))
}
