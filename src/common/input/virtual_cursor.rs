use nalgebra::Vector2;

/// Unbounded cursor position built from relative device motion.
///
/// A grabbed cursor stops at the window border (or never moves when locked),
/// so mouse look follows this position instead of the window cursor.
#[derive(Clone, Debug, Default)]
pub struct VirtualCursor {
    position: Vector2<f64>,
}

impl VirtualCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves by a raw device delta, y grows downwards like window coordinates
    pub fn move_by(&mut self, dx: f64, dy: f64) -> Vector2<f64> {
        self.position += Vector2::new(dx, dy);
        self.position
    }
}
