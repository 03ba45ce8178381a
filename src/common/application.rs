use color_eyre::Result;
use glium::glutin::surface::WindowSurface;
use glium::Display;
use winit::error::ExternalError;
use winit::event::{DeviceEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{CursorGrabMode, Window};

use crate::config::DemoConfig;

pub trait Application: Sized {
    fn new(
        config: &DemoConfig,
        window: &Window,
        display: &Display<WindowSurface>,
        event_loop: &ActiveEventLoop,
    ) -> Result<Self>;

    fn window_event(
        &mut self,
        event: WindowEvent,
        event_loop: &ActiveEventLoop,
        window: &Window,
        display: &Display<WindowSurface>,
    );

    #[allow(unused_variables)]
    fn device_event(
        &mut self,
        event: DeviceEvent,
        event_loop: &ActiveEventLoop,
        window: &Window,
        display: &Display<WindowSurface>,
    ) {
    }

    /// Hides the cursor and keeps it inside the window. Some platforms only support one of the grab modes.
    fn capture_cursor(&mut self, window: &Window) -> Result<(), ExternalError> {
        window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))?;

        window.set_cursor_visible(false);

        Ok(())
    }

    fn release_cursor(&mut self, window: &Window) -> Result<(), ExternalError> {
        window.set_cursor_grab(CursorGrabMode::None)?;
        window.set_cursor_visible(true);

        Ok(())
    }
}
