use nalgebra::{Matrix4, Point3, Unit, Vector3};
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::input::Input;
use crate::maths;

pub const CUBE_POSITIONS: [Vector3<f32>; 12] = [
    Vector3::new(0.0, 0.0, 0.0),
    Vector3::new(2.0, 5.0, -15.0),
    Vector3::new(-1.5, -2.2, -2.5),
    Vector3::new(-3.8, -2.0, -12.3),
    Vector3::new(-4.8, -0.1, -6.0),
    Vector3::new(-4.4, 3.0, -6.0),
    Vector3::new(2.4, -0.4, -3.5),
    Vector3::new(-1.7, 3.0, -7.5),
    Vector3::new(1.3, -2.0, -2.5),
    Vector3::new(1.5, 2.0, -2.5),
    Vector3::new(1.5, 0.2, -1.5),
    Vector3::new(-1.3, 1.0, -1.5),
];

pub const POINT_LIGHT_POSITION: Point3<f32> = Point3::new(1.2, 1.0, 2.0);
pub const LAMP_SCALE: f32 = 0.2;

pub const MODEL_POSITION: Vector3<f32> = Vector3::new(-1.8, 0.0, 2.0);
pub const MODEL_SCALE: f32 = 0.5;
pub const OUTLINE_SCALE: f32 = 0.51;

pub const CUBE_SUN_DIRECTION: Vector3<f32> = Vector3::new(-1.0, -1.0, 0.0);
pub const MODEL_SUN_DIRECTION: Vector3<f32> = Vector3::new(1.0, -0.5, -1.0);

const CUBE_OFFSET: Vector3<f32> = Vector3::new(0.0, 0.0, -0.5);
const CUBE_TWIST_AXIS: Vector3<f32> = Vector3::new(0.1, 0.1, 0.15);

/// Everything the user can switch on and off from the keyboard and mouse
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneToggles {
    pub wireframe: bool,
    pub moving_light: bool,
    pub flashlight: bool,
    pub outline: bool,
}

impl SceneToggles {
    pub fn update(&mut self, input: &Input) {
        Self::switch(&mut self.wireframe, input, KeyCode::Digit1, KeyCode::Digit2);
        Self::switch(&mut self.moving_light, input, KeyCode::Digit3, KeyCode::Digit4);
        Self::switch(&mut self.flashlight, input, KeyCode::Digit5, KeyCode::Digit6);
        Self::switch(&mut self.outline, input, KeyCode::Digit7, KeyCode::Digit8);

        // Holding the left mouse button works as a torch
        if input.mouse_button_pressed(MouseButton::Left) {
            self.flashlight = true;
        }

        if input.mouse_button_just_released(MouseButton::Left) {
            self.flashlight = false;
        }
    }

    fn switch(toggle: &mut bool, input: &Input, on: KeyCode, off: KeyCode) {
        if input.key_down(on) {
            *toggle = true;
        }

        if input.key_down(off) {
            *toggle = false;
        }
    }
}

/// Goes from 0 to 1 and back with a period of 2π seconds
fn oscillation(time: f32) -> f32 {
    time.sin() / 2.0 + 0.5
}

pub fn lamp_color(time: f32) -> Vector3<f32> {
    Vector3::new(
        (time * 1.0).sin() / 2.0 + 0.7,
        (time * 0.5).sin() / 2.0 + 0.7,
        (time * 0.4).sin() / 2.0 + 0.7,
    )
}

pub fn clear_color(lamp_color: Vector3<f32>) -> (f32, f32, f32, f32) {
    let dimmed = lamp_color / 10.0;

    (dimmed.x, dimmed.y, dimmed.z, 1.0)
}

pub fn point_light_position(base: Point3<f32>, time: f32, moving: bool) -> Point3<f32> {
    if !moving {
        return base;
    }

    Point3::new(
        base.x * time.sin() * 3.0,
        base.y * time.cos() * 3.0,
        base.z,
    )
}

pub fn lamp_transform(lamp_position: Point3<f32>) -> Matrix4<f32> {
    maths::translation_scale(lamp_position.coords, LAMP_SCALE)
}

pub fn moving_cube_transform(index: usize, base_position: Vector3<f32>, time: f32) -> Matrix4<f32> {
    let oscillation = oscillation(time);
    let twist_speed = index as f32 / 2.0 + 7.0;

    Matrix4::new_translation(&CUBE_OFFSET)
        * Matrix4::new_translation(&(base_position * oscillation))
        * Matrix4::from_axis_angle(&Unit::new_normalize(CUBE_TWIST_AXIS), twist_speed * oscillation)
}

pub fn model_transform(scale: f32) -> Matrix4<f32> {
    maths::translation_scale(MODEL_POSITION, scale)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use winit::event::ElementState;

    use super::*;

    #[test]
    fn lamp_color_stays_in_range() {
        let mut rng = fastrand::Rng::with_seed(9);

        for _ in 0..1000 {
            let color = lamp_color(rng.f32() * 10_000.0);

            assert!(color
                .iter()
                .all(|component| (0.2 - 1e-5..=1.2 + 1e-5).contains(component)));
        }
    }

    #[test]
    fn lamp_color_at_time_zero() {
        assert_relative_eq!(lamp_color(0.0), Vector3::repeat(0.7));
    }

    #[test]
    fn clear_color_is_dimmed_lamp_color() {
        let (r, g, b, a) = clear_color(Vector3::new(1.0, 0.5, 0.2));

        assert_relative_eq!(r, 0.1);
        assert_relative_eq!(g, 0.05);
        assert_relative_eq!(b, 0.02);
        assert_relative_eq!(a, 1.0);
    }

    #[test]
    fn still_light_stays_at_base() {
        assert_eq!(point_light_position(POINT_LIGHT_POSITION, 123.4, false), POINT_LIGHT_POSITION);
    }

    #[test]
    fn moving_light_orbits_base() {
        let position = point_light_position(POINT_LIGHT_POSITION, std::f32::consts::FRAC_PI_2, true);

        assert_relative_eq!(position, Point3::new(3.6, 0.0, 2.0), epsilon = 1e-5);
    }

    #[test]
    fn cubes_collapse_onto_offset_when_oscillation_is_zero() {
        // sin(-π/2) / 2 + 0.5 = 0 means no translation and no twist
        let time = -std::f32::consts::FRAC_PI_2;

        for (index, position) in CUBE_POSITIONS.iter().enumerate() {
            let transform = moving_cube_transform(index, *position, time);

            assert_relative_eq!(
                transform,
                Matrix4::new_translation(&CUBE_OFFSET),
                epsilon = 1e-5
            );
        }
    }

    #[test]
    fn cubes_reach_base_position_at_full_oscillation() {
        let time = std::f32::consts::FRAC_PI_2;
        let transform = moving_cube_transform(3, CUBE_POSITIONS[3], time);

        let center = transform.transform_point(&Point3::origin());

        assert_relative_eq!(center.coords, CUBE_POSITIONS[3] + CUBE_OFFSET, epsilon = 1e-5);
    }

    #[test]
    fn outline_is_slightly_larger_than_model() {
        let model = model_transform(MODEL_SCALE);
        let outline = model_transform(OUTLINE_SCALE);

        let corner = Point3::new(1.0, 1.0, 1.0);
        let model_corner = model.transform_point(&corner).coords - MODEL_POSITION;
        let outline_corner = outline.transform_point(&corner).coords - MODEL_POSITION;

        assert!(outline_corner.norm() > model_corner.norm());
    }

    #[test]
    fn number_keys_switch_toggles() {
        let mut input = Input::new();
        let mut toggles = SceneToggles::default();

        input.process_key_code(KeyCode::Digit1, ElementState::Pressed);
        input.process_key_code(KeyCode::Digit3, ElementState::Pressed);
        input.process_key_code(KeyCode::Digit7, ElementState::Pressed);
        toggles.update(&input);

        assert_eq!(
            toggles,
            SceneToggles {
                wireframe: true,
                moving_light: true,
                flashlight: false,
                outline: true,
            }
        );

        input.process_key_code(KeyCode::Digit1, ElementState::Released);
        input.process_key_code(KeyCode::Digit2, ElementState::Pressed);
        input.process_key_code(KeyCode::Digit8, ElementState::Pressed);
        toggles.update(&input);

        assert!(!toggles.wireframe);
        assert!(toggles.moving_light);
        assert!(!toggles.outline);
    }

    #[test]
    fn toggles_persist_after_key_release() {
        let mut input = Input::new();
        let mut toggles = SceneToggles::default();

        input.process_key_code(KeyCode::Digit5, ElementState::Pressed);
        toggles.update(&input);
        input.process_key_code(KeyCode::Digit5, ElementState::Released);
        input.reset_internal_state();
        toggles.update(&input);

        assert!(toggles.flashlight);
    }

    #[test]
    fn left_mouse_button_holds_flashlight() {
        let mut input = Input::new();
        let mut toggles = SceneToggles::default();

        input.process_mouse_button_event(MouseButton::Left, ElementState::Pressed);
        toggles.update(&input);
        assert!(toggles.flashlight);

        input.reset_internal_state();
        input.process_mouse_button_event(MouseButton::Left, ElementState::Released);
        toggles.update(&input);
        assert!(!toggles.flashlight);
    }
}
