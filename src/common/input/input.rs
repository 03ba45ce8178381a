use log::warn;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, NativeKeyCode, PhysicalKey};

const NUM_KEYS: usize = 194;
const NUM_MOUSE_BUTTONS: usize = 5;

// Touchpads report pixels, the camera expects wheel lines
const PIXELS_PER_SCROLL_LINE: f64 = 20.0;

pub struct Input {
    key_states: [KeyState; NUM_KEYS],
    mouse_button_states: [KeyState; NUM_MOUSE_BUTTONS],
    mouse_wheel_offset: f32,
    focused: bool,
}

#[derive(Copy, Clone, PartialEq, Debug)]
enum KeyState {
    Released,
    Pressed,
    Repeat,
    JustReleased,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    pub fn new() -> Self {
        Self {
            key_states: [KeyState::Released; NUM_KEYS],
            mouse_button_states: [KeyState::Released; NUM_MOUSE_BUTTONS],
            mouse_wheel_offset: 0.0,
            focused: true,
        }
    }

    pub fn key_pressed(&self, key_code: KeyCode) -> bool {
        Self::key_state(key_code, &self.key_states) == KeyState::Pressed
    }

    pub fn key_released(&self, key_code: KeyCode) -> bool {
        Self::key_state(key_code, &self.key_states) == KeyState::Released
    }

    pub fn key_down(&self, key_code: KeyCode) -> bool {
        let state = Self::key_state(key_code, &self.key_states);
        state == KeyState::Pressed || state == KeyState::Repeat
    }

    pub fn key_just_released(&self, key_code: KeyCode) -> bool {
        Self::key_state(key_code, &self.key_states) == KeyState::JustReleased
    }

    pub fn mouse_button_pressed(&self, mouse_button: MouseButton) -> bool {
        self.mouse_button_state(mouse_button) == KeyState::Pressed
    }

    pub fn mouse_button_down(&self, mouse_button: MouseButton) -> bool {
        let state = self.mouse_button_state(mouse_button);
        state == KeyState::Pressed || state == KeyState::Repeat
    }

    pub fn mouse_button_just_released(&self, mouse_button: MouseButton) -> bool {
        self.mouse_button_state(mouse_button) == KeyState::JustReleased
    }

    /// Scroll accumulated since the last [`Input::reset_internal_state`], in wheel lines
    pub fn mouse_wheel_offset(&self) -> f32 {
        self.mouse_wheel_offset
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    pub fn reset_internal_state(&mut self) {
        for key_state in self
            .key_states
            .iter_mut()
            .chain(self.mouse_button_states.iter_mut())
        {
            if *key_state == KeyState::JustReleased {
                *key_state = KeyState::Released;
            }
        }

        self.mouse_wheel_offset = 0.0;
    }

    pub fn process_window_event(&mut self, window_event: &WindowEvent) {
        match window_event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.process_key_event(event);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.process_mouse_button_event(*button, *state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.process_mouse_wheel_event(*delta);
            }
            WindowEvent::Focused(focused) => {
                self.focused = *focused;

                // Releases are not delivered while unfocused
                if !focused {
                    self.release_all();
                }
            }
            _ => (),
        };
    }

    pub(crate) fn process_key_code(&mut self, key_code: KeyCode, state: ElementState) {
        let index = key_code as usize;

        if index >= NUM_KEYS {
            return warn!("Key {:?} is outside of the tracked key range", key_code);
        }

        Self::update_key_state(&mut self.key_states, index, state);
    }

    pub(crate) fn process_mouse_button_event(&mut self, button: MouseButton, state: ElementState) {
        match Self::mouse_button_to_index(button) {
            Some(index) => Self::update_key_state(&mut self.mouse_button_states, index, state),
            None => warn!("Unidentified mouse button event received {:?}", button),
        }
    }

    pub(crate) fn process_mouse_wheel_event(&mut self, delta: MouseScrollDelta) {
        self.mouse_wheel_offset += match delta {
            MouseScrollDelta::LineDelta(_, y_offset) => y_offset,
            MouseScrollDelta::PixelDelta(position) => (position.y / PIXELS_PER_SCROLL_LINE) as f32,
        };
    }

    fn process_key_event(&mut self, key_event: &KeyEvent) {
        match key_event.physical_key {
            PhysicalKey::Code(key_code) => {
                self.process_key_code(key_code, key_event.state);
            }
            PhysicalKey::Unidentified(native_key_code) => {
                let (platform, code) = match native_key_code {
                    NativeKeyCode::Windows(code) => ("Windows", code as u32),
                    NativeKeyCode::MacOS(code) => ("MacOS", code as u32),
                    NativeKeyCode::Android(code) => ("Android", code),
                    NativeKeyCode::Xkb(code) => ("XKB", code),
                    NativeKeyCode::Unidentified => return warn!("Unidentified key event received"),
                };

                warn!("Unidentified {} key event {}", platform, code)
            }
        }
    }

    fn release_all(&mut self) {
        for key_state in self
            .key_states
            .iter_mut()
            .chain(self.mouse_button_states.iter_mut())
        {
            if *key_state == KeyState::Pressed || *key_state == KeyState::Repeat {
                *key_state = KeyState::JustReleased;
            }
        }
    }

    fn key_state(key_code: KeyCode, key_states: &[KeyState]) -> KeyState {
        key_states
            .get(key_code as usize)
            .copied()
            .unwrap_or(KeyState::Released)
    }

    fn mouse_button_state(&self, mouse_button: MouseButton) -> KeyState {
        Self::mouse_button_to_index(mouse_button)
            .map(|index| self.mouse_button_states[index])
            .unwrap_or(KeyState::Released)
    }

    fn update_key_state(key_states: &mut [KeyState], index: usize, state: ElementState) {
        let old_state = key_states[index];

        let new_state = match state {
            ElementState::Pressed => {
                if old_state == KeyState::Pressed || old_state == KeyState::Repeat {
                    KeyState::Repeat
                } else {
                    KeyState::Pressed
                }
            }
            ElementState::Released => {
                if old_state == KeyState::Pressed || old_state == KeyState::Repeat {
                    KeyState::JustReleased
                } else {
                    KeyState::Released
                }
            }
        };

        key_states[index] = new_state;
    }

    fn mouse_button_to_index(button: MouseButton) -> Option<usize> {
        match button {
            MouseButton::Left => Some(0),
            MouseButton::Right => Some(1),
            MouseButton::Middle => Some(2),
            MouseButton::Back => Some(3),
            MouseButton::Forward => Some(4),
            MouseButton::Other(_) => None,
        }
    }
}
