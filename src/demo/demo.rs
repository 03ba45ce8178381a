use std::time::Instant;

use color_eyre::Result;
use glium::glutin::surface::WindowSurface;
use glium::Display;
use log::{error, info, warn};
use winit::event::{DeviceEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::KeyCode;
use winit::window::Window;

use common::application::Application;
use common::camera::FlyCamera;
use common::config::DemoConfig;
use common::models::Model;
use common::renderer::{FrameScene, Renderer};
use common::controls::Controls;

const STATISTICS_INTERVAL: f32 = 1.0;

struct FrameState {
    pub start: Instant,
    pub last_frame_end: Instant,
    pub deltatime: f32,
    pub fps: f32,
    frames_since_statistics: u32,
    time_since_statistics: f32,
}

impl FrameState {
    pub fn update_statistics(&mut self) {
        let deltatime = self.last_frame_end.elapsed().as_secs_f32();
        self.last_frame_end = Instant::now();

        if let Some(fps) = self.record_frame(deltatime) {
            info!("{:.4} seconds per frame, {:.1} fps", 1.0 / fps.max(f32::EPSILON), fps);
        }
    }

    /// Returns the average frame rate whenever a full statistics interval has passed
    fn record_frame(&mut self, deltatime: f32) -> Option<f32> {
        self.deltatime = deltatime;
        self.frames_since_statistics += 1;
        self.time_since_statistics += deltatime;

        if self.time_since_statistics < STATISTICS_INTERVAL {
            return None;
        }

        self.fps = self.frames_since_statistics as f32 / self.time_since_statistics;
        self.frames_since_statistics = 0;
        self.time_since_statistics = 0.0;

        Some(self.fps)
    }

    pub fn time(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

impl Default for FrameState {
    fn default() -> Self {
        let now = Instant::now();

        FrameState {
            start: now,
            last_frame_end: now,
            deltatime: 0.0,
            fps: 0.0,
            frames_since_statistics: 0,
            time_since_statistics: 0.0,
        }
    }
}

pub struct Demo {
    controls: Controls,
    renderer: Renderer,
    model: Option<Model>,
    state: FrameState,
}

impl Application for Demo {
    fn new(
        config: &DemoConfig,
        window: &Window,
        display: &Display<WindowSurface>,
        _event_loop: &ActiveEventLoop,
    ) -> Result<Self> {
        let inner_size = window.inner_size();
        let renderer = Renderer::new(
            &config.assets,
            inner_size.width as f32,
            inner_size.height as f32,
            display,
        )?;

        let model = config
            .assets
            .model
            .as_ref()
            .and_then(|path| match Model::load(path, display) {
                Ok(model) => {
                    info!("Showing model {:?}", model.path);
                    Some(model)
                }
                Err(error) => {
                    warn!("{}, continuing without it", error);
                    None
                }
            });

        let mut demo = Self {
            controls: Controls::new(FlyCamera::from_settings(&config.camera)),
            renderer,
            model,
            state: FrameState::default(),
        };

        demo.grab_cursor(window);

        info!("Move with WASD, look with the mouse, zoom with the scroll wheel");
        info!("1/2 wireframe, 3/4 moving light, 5/6 flashlight, 7/8 outline, Escape quits");

        Ok(demo)
    }

    fn window_event(
        &mut self,
        event: WindowEvent,
        event_loop: &ActiveEventLoop,
        window: &Window,
        display: &Display<WindowSurface>,
    ) {
        self.controls.process_window_event(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(new_size) => {
                display.resize((new_size.width, new_size.height));

                self.renderer
                    .update_window_size(new_size.width as f32, new_size.height as f32);
            }
            WindowEvent::Focused(focused) => {
                if focused {
                    self.grab_cursor(window);
                } else if let Err(error) = self.release_cursor(window) {
                    warn!("Failed to release the cursor: {}", error);
                }
            }
            WindowEvent::RedrawRequested => {
                if self.controls.input.key_pressed(KeyCode::Escape) {
                    event_loop.exit();
                    return;
                }

                self.controls.update(self.state.deltatime);

                if let Err(error) = self.render(display) {
                    error!("Failed to render the frame: {:?}", error);
                    event_loop.exit();
                }

                self.state.update_statistics();
            }
            _ => (),
        };
    }

    fn device_event(
        &mut self,
        event: DeviceEvent,
        _event_loop: &ActiveEventLoop,
        _window: &Window,
        _display: &Display<WindowSurface>,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.controls.process_mouse_motion(delta);
        }
    }
}

impl Demo {

    fn render(&self, display: &Display<WindowSurface>) -> Result<()> {
        let scene = FrameScene {
            camera: &self.controls.camera,
            toggles: self.controls.toggles,
            time: self.state.time(),
            model: self.model.as_ref(),
        };

        let mut target = display.draw();
        let rendered = self.renderer.render(&scene, &mut target);

        // The frame must be finished even when a draw failed
        target.finish()?;

        rendered
    }

    fn grab_cursor(&mut self, window: &Window) {
        if let Err(error) = self.capture_cursor(window) {
            warn!("Failed to capture the cursor: {}", error);
        }
    }
}
