/// Color triple as it crosses every seam: 8-bit RGB.
pub type Rgb = [u8; 3];

/// Mid-gray the response screen is cleared to. A pointer sample equal to
/// this value means no wheel is under the pointer, so the background must
/// never appear as a wheel row.
pub const BACKGROUND: Rgb = [128, 128, 128];
