use thiserror::Error;

use wrep_core::{BACKGROUND, ItemResponse, Rgb, Stage};
use wrep_timing::Timer;

/// The participant hit the quit control. The whole run aborts, not just
/// the current trial.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("run cancelled by the participant")]
pub struct Cancelled;

/// One wheel as the response phase sees it: where it sits and how its ring
/// is rotated. Index in the target vector is the item it answers for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelTarget {
    pub position: (f32, f32),
    pub rotation: u16,
}

/// Everything one polled tick feeds into the transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineTick {
    /// Pointer position, visual-angle coordinates.
    pub position: (f32, f32),
    /// True only on the tick the button went down. The driver derives this
    /// edge from raw held state; a button held across ticks commits once.
    pub press_edge: bool,
    /// Seconds since the response phase opened, as of the press transition.
    pub press_time: f64,
    /// Color under the pointer, `None` when the pointer is off the surface.
    pub sampled: Option<Rgb>,
}

/// What one tick decided, telling the driver what to draw next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Background or nothing under the pointer, or no pending wheel close
    /// enough. Nothing changes.
    NoTarget,
    /// A pending wheel is under the pointer: preview the sampled color on
    /// its disc, commit nothing.
    Hover { item: usize, color: Rgb },
    /// A press resolved this item.
    Resolved { item: usize },
}

/// Sequential selection over a trial's response wheels.
///
/// One engine serves one trial. Every wheel starts pending; each press
/// while hovering a pending wheel resolves that wheel with the color under
/// the pointer, and the phase is over when none remain. A resolved wheel
/// disappears and never competes for the pointer again, so a click can
/// never answer twice.
///
/// All state lives here and changes only in [`ResponseEngine::step`],
/// which takes plain tick data instead of a display. Tests drive the
/// transition with synthetic ticks; [`ResponseEngine::run`] is the thin
/// polling driver that feeds it from a live [`Stage`].
pub struct ResponseEngine {
    targets: Vec<WheelTarget>,
    /// Indices into `targets` still awaiting a press, in item order.
    pending: Vec<usize>,
    responses: Vec<ItemResponse>,
    next_click: u16,
    hit_radius: f32,
}

impl ResponseEngine {
    pub fn new(targets: Vec<WheelTarget>, hit_radius: f32) -> Self {
        let pending = (0..targets.len()).collect();
        let responses = targets.iter().map(|_| ItemResponse::unanswered()).collect();
        Self {
            targets,
            pending,
            responses,
            next_click: 1,
            hit_radius,
        }
    }

    /// Pending wheels in item order.
    pub fn pending(&self) -> impl Iterator<Item = (usize, WheelTarget)> + '_ {
        self.pending.iter().map(|&item| (item, self.targets[item]))
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    /// Responses collected so far, indexed by item.
    pub fn responses(&self) -> &[ItemResponse] {
        &self.responses
    }

    pub fn into_responses(self) -> Vec<ItemResponse> {
        self.responses
    }

    /// Advances the machine by one polled tick.
    ///
    /// The sampled color is the gate: the background gray means the pointer
    /// is between wheels, so it can neither preview nor commit. Otherwise
    /// the nearest pending wheel within the hit radius takes the tick; ties
    /// at exactly equal distance go to the lower item index.
    pub fn step(&mut self, tick: EngineTick) -> TickOutcome {
        let color = match tick.sampled {
            Some(color) if color != BACKGROUND => color,
            _ => return TickOutcome::NoTarget,
        };

        let mut nearest: Option<(usize, f32)> = None;
        for &item in &self.pending {
            let (x, y) = self.targets[item].position;
            let distance =
                ((x - tick.position.0).powi(2) + (y - tick.position.1).powi(2)).sqrt();
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((item, distance));
            }
        }
        let Some((item, distance)) = nearest else {
            return TickOutcome::NoTarget;
        };
        if distance >= self.hit_radius {
            return TickOutcome::NoTarget;
        }

        if !tick.press_edge {
            return TickOutcome::Hover { item, color };
        }

        self.responses[item] = ItemResponse {
            color: Some(color),
            rt: Some(tick.press_time),
            click_order: self.next_click,
        };
        self.next_click += 1;
        self.pending.retain(|&pending| pending != item);
        TickOutcome::Resolved { item }
    }

    /// Polls a live stage until every wheel is resolved.
    ///
    /// Draws the pending wheels, then loops: check for cancellation, sample
    /// the pointer, derive the press edge, feed one tick through the
    /// transition, redraw. Returns the full response vector; the only way
    /// out with unresolved items is cancellation.
    pub fn run<S, T>(
        mut self,
        stage: &mut S,
        timer: &T,
        stim_size: f32,
    ) -> Result<Vec<ItemResponse>, Cancelled>
    where
        S: Stage,
        T: Timer<Timestamp = u64>,
    {
        let opened = timer.now();
        let mut was_pressed = false;

        self.render(stage, stim_size, None);
        loop {
            if stage.cancel_requested() {
                return Err(Cancelled);
            }

            let pointer = stage.pointer();
            let press_edge = pointer.pressed && !was_pressed;
            was_pressed = pointer.pressed;

            let tick = EngineTick {
                position: pointer.position,
                press_edge,
                press_time: seconds_between(opened, pointer.timestamp),
                sampled: stage.sample_color(pointer.position),
            };
            let outcome = self.step(tick);

            if self.is_complete() {
                return Ok(self.responses);
            }

            let preview = match outcome {
                TickOutcome::Hover { item, color } => {
                    Some((self.targets[item].position, color))
                }
                _ => None,
            };
            self.render(stage, stim_size, preview);
        }
    }

    /// One frame of the response screen: the optional preview disc first,
    /// then every pending wheel over it.
    fn render<S: Stage>(
        &self,
        stage: &mut S,
        stim_size: f32,
        preview: Option<((f32, f32), Rgb)>,
    ) {
        if let Some((at, color)) = preview {
            stage.draw_circle(at, stim_size / 2.0, color);
        }
        for (_, target) in self.pending() {
            stage.draw_wheel(target.position, stim_size, target.rotation);
        }
        stage.present();
    }
}

fn seconds_between(opened: u64, at: u64) -> f64 {
    at.saturating_sub(opened) as f64 / 1e9
}
