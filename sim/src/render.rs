//! Hooks for drawing the simulation. The core never draws anything itself; it hands
//! read-only snapshots to a [`RenderSink`] while it ticks.

use shared::{GermSnapshot, Vector2};

/// An RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colour of a germ at zero health
pub const DYING_COLOR: Rgb = Rgb(0, 203, 201);

/// Colour of a germ at full health
pub const HEALTHY_COLOR: Rgb = Rgb(255, 79, 0);

/// Food is drawn in the dying colour so it stands out against healthy germs
pub const FOOD_COLOR: Rgb = DYING_COLOR;

pub const POISON_COLOR: Rgb = HEALTHY_COLOR;

/// Receives drawable state once per tick
pub trait RenderSink {
    /// Called for every live germ right after it moves
    fn draw_germ(&mut self, germ: &GermSnapshot, show_dna: bool);

    fn draw_food(&mut self, _position: Vector2) {}

    fn draw_poison(&mut self, _position: Vector2) {}
}

/// Discards everything; used for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl RenderSink for NoopSink {
    fn draw_germ(&mut self, _germ: &GermSnapshot, _show_dna: bool) {}
}

/// Blend from [`DYING_COLOR`] to [`HEALTHY_COLOR`] by health. Health outside `0..=1`
/// is clamped, so overfed germs stay fully healthy-coloured.
pub fn health_color(health: f64) -> Rgb {
    let t = if health.is_nan() {
        0.0
    } else {
        health.clamp(0.0, 1.0)
    };
    let lerp = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * t).round() as u8;

    Rgb(
        lerp(DYING_COLOR.0, HEALTHY_COLOR.0),
        lerp(DYING_COLOR.1, HEALTHY_COLOR.1),
        lerp(DYING_COLOR.2, HEALTHY_COLOR.2),
    )
}
