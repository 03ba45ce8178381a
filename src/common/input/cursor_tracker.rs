use nalgebra::Vector2;

/// Turns absolute cursor positions into per-event deltas.
///
/// The first position after creation (or after [`CursorTracker::reset`]) only
/// records a baseline, so grabbing the cursor never produces a jump.
#[derive(Clone, Debug, Default)]
pub struct CursorTracker {
    last_position: Option<Vector2<f64>>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(x - last_x, last_y - y)`, y is flipped so moving the cursor up is positive.
    pub fn on_cursor_move(&mut self, x: f64, y: f64) -> Vector2<f32> {
        let new_position = Vector2::new(x, y);

        let offset = match self.last_position {
            Some(last_position) => Vector2::new(
                (new_position.x - last_position.x) as f32,
                (last_position.y - new_position.y) as f32,
            ),
            None => Vector2::zeros(),
        };

        self.last_position = Some(new_position);

        offset
    }

    pub fn reset(&mut self) {
        self.last_position = None;
    }
}
