use glam::DVec2;

/// A point, velocity or force on the canvas.
pub type Vector2 = DVec2;

/// Steering math used by the germ behaviours.
pub trait Steering {
    /// Rescale to `magnitude`; the zero vector stays zero.
    fn with_magnitude(self, magnitude: f64) -> Self;

    /// Clamp the length to at most `max`, keeping direction.
    fn limited(self, max: f64) -> Self;

    /// Angle of the vector in radians, measured from the +x axis.
    fn heading(self) -> f64;
}

impl Steering for DVec2 {
    fn with_magnitude(self, magnitude: f64) -> Self {
        self.normalize_or_zero() * magnitude
    }

    fn limited(self, max: f64) -> Self {
        self.clamp_length_max(max)
    }

    fn heading(self) -> f64 {
        self.y.atan2(self.x)
    }
}
