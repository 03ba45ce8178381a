use log::debug;
use winit::event::WindowEvent;

use crate::camera::{Camera, FlyCamera};
use crate::input::{CursorTracker, Input, VirtualCursor};
use crate::scene::SceneToggles;

/// Routes window and device input into the camera and scene toggles once per frame.
pub struct Controls {
    pub input: Input,
    pub camera: FlyCamera,
    pub toggles: SceneToggles,
    cursor: CursorTracker,
    virtual_cursor: VirtualCursor,
}

impl Controls {
    pub fn new(camera: FlyCamera) -> Self {
        Self {
            input: Input::new(),
            camera,
            toggles: SceneToggles::default(),
            cursor: CursorTracker::new(),
            virtual_cursor: VirtualCursor::new(),
        }
    }

    pub fn process_window_event(&mut self, event: &WindowEvent) {
        self.input.process_window_event(event);

        if let WindowEvent::Focused(_) = event {
            // The pointer may jump when the cursor is grabbed again
            self.cursor.reset();
        }
    }

    /// Relative motion from `DeviceEvent::MouseMotion`, delivered even when the cursor is grabbed
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        // Device events keep arriving while another window has focus
        if !self.input.focused() {
            return;
        }

        let position = self.virtual_cursor.move_by(delta.0, delta.1);
        let offset = self.cursor.on_cursor_move(position.x, position.y);

        self.camera.process_mouse_movement(offset.x, offset.y);
    }

    pub fn update(&mut self, deltatime: f32) {
        self.toggles.update(&self.input);
        self.camera.update(&self.input, deltatime);

        let scroll = self.input.mouse_wheel_offset();
        if scroll != 0.0 {
            self.camera.process_mouse_scroll(scroll);
            debug!("Zoom is now {}", self.camera.zoom());
        }

        self.input.reset_internal_state();
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Point3;
    use winit::event::{ElementState, MouseScrollDelta};
    use winit::keyboard::KeyCode;

    use super::*;
    use crate::camera::fly_camera::{DEFAULT_YAW, MAX_ZOOM};

    fn controls() -> Controls {
        Controls::new(FlyCamera::default())
    }

    #[test]
    fn first_motion_only_sets_the_baseline() {
        let mut controls = controls();

        controls.process_mouse_motion((300.0, -200.0));

        assert_relative_eq!(controls.camera.yaw(), DEFAULT_YAW);
        assert_relative_eq!(controls.camera.pitch(), 0.0);
    }

    #[test]
    fn mouse_look_is_not_bounded_by_the_window() {
        let mut controls = controls();
        controls.process_mouse_motion((0.0, 0.0));

        // Far wider than any window, a confined cursor would stop at the edge
        for _ in 0..100 {
            controls.process_mouse_motion((50.0, 0.0));
        }

        assert_relative_eq!(controls.camera.yaw(), DEFAULT_YAW + 500.0, epsilon = 1e-3);
        assert_relative_eq!(controls.camera.pitch(), 0.0);
    }

    #[test]
    fn upward_motion_raises_pitch() {
        let mut controls = controls();
        controls.process_mouse_motion((0.0, 0.0));

        controls.process_mouse_motion((0.0, -100.0));

        assert_relative_eq!(controls.camera.pitch(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn motion_is_ignored_while_unfocused() {
        let mut controls = controls();
        controls.process_mouse_motion((0.0, 0.0));

        controls.process_window_event(&WindowEvent::Focused(false));
        controls.process_mouse_motion((400.0, 0.0));

        assert_relative_eq!(controls.camera.yaw(), DEFAULT_YAW);
    }

    #[test]
    fn regaining_focus_starts_a_new_baseline() {
        let mut controls = controls();
        controls.process_mouse_motion((0.0, 0.0));

        controls.process_window_event(&WindowEvent::Focused(false));
        controls.process_window_event(&WindowEvent::Focused(true));

        controls.process_mouse_motion((250.0, 0.0));
        assert_relative_eq!(controls.camera.yaw(), DEFAULT_YAW);

        controls.process_mouse_motion((10.0, 0.0));
        assert_relative_eq!(controls.camera.yaw(), DEFAULT_YAW + 1.0, epsilon = 1e-4);
    }

    #[test]
    fn scroll_is_applied_once_per_frame() {
        let mut controls = controls();

        controls
            .input
            .process_mouse_wheel_event(MouseScrollDelta::LineDelta(0.0, 10.0));

        controls.update(0.016);
        assert_relative_eq!(controls.camera.zoom(), MAX_ZOOM - 10.0);

        controls.update(0.016);
        assert_relative_eq!(controls.camera.zoom(), MAX_ZOOM - 10.0);
    }

    #[test]
    fn update_moves_the_camera_and_flips_toggles() {
        let mut controls = Controls::new(FlyCamera::new(Point3::origin(), DEFAULT_YAW, 0.0));

        controls.input.process_key_code(KeyCode::KeyW, ElementState::Pressed);
        controls.input.process_key_code(KeyCode::Digit1, ElementState::Pressed);
        controls.update(1.0);

        assert!(controls.toggles.wireframe);
        assert_relative_eq!(controls.camera.position(), Point3::new(0.0, 0.0, -2.5), epsilon = 1e-5);
    }
}
