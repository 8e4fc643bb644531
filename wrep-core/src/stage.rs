use crate::color::Rgb;

/// Pointer state as sampled once per response-loop tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Pointer position in visual-angle coordinates relative to fixation.
    pub position: (f32, f32),
    /// Raw button state this tick. Held, not an edge; the response loop
    /// derives press transitions itself.
    pub pressed: bool,
    /// Nanosecond timestamp of the latest button transition, on the same
    /// clock as the session timer.
    pub timestamp: u64,
}

/// The display and input seam, the only thing trials know about whatever
/// windowing toolkit hosts them.
///
/// Implementations own the screen mapping: positions handed in are in
/// visual-angle coordinates relative to a centered fixation, and pointer
/// samples come back in the same space. `present` flips everything drawn
/// since the previous flip and leaves the next frame cleared to the
/// [`BACKGROUND`](crate::color::BACKGROUND) gray, so presenting with
/// nothing drawn shows a blank screen.
pub trait Stage {
    /// Queues a filled disc.
    fn draw_circle(&mut self, at: (f32, f32), radius: f32, color: Rgb);

    /// Queues a response wheel annulus with its ring rotated by `rotation`
    /// hue steps.
    fn draw_wheel(&mut self, at: (f32, f32), radius: f32, rotation: u16);

    /// Flips the queued frame onto the screen.
    fn present(&mut self);

    /// Samples the pointer.
    fn pointer(&mut self) -> PointerSample;

    /// Color of the presented frame at a point, `None` when the point maps
    /// off the drawable surface.
    fn sample_color(&mut self, at: (f32, f32)) -> Option<Rgb>;

    /// True once the participant has asked to abort the whole run.
    fn cancel_requested(&mut self) -> bool;
}
