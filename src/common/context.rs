use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use glium::backend::glutin::SimpleWindowBuilder;
use glium::glutin::config::ConfigTemplateBuilder;
use glium::glutin::surface::WindowSurface;
use glium::{Display, Program};
use log::{error, info};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowId};

use crate::application::Application;
use crate::config::{DemoConfig, WindowSettings};

pub struct OpenGLContext<A: Application> {
    pub window: Option<Window>,
    pub display: Option<Display<WindowSurface>>,
    pub application: Option<A>,
    config: DemoConfig,
}

impl<A: Application> OpenGLContext<A> {
    pub fn new(config: DemoConfig) -> Self {
        Self {
            window: None,
            display: None,
            application: None,
            config,
        }
    }
}

pub fn window_attributes(settings: &WindowSettings) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(settings.title.clone())
        .with_inner_size(LogicalSize::new(settings.width, settings.height))
}

impl<A: Application> ApplicationHandler for OpenGLContext<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Desktop platforms only resume once but the window must never be rebuilt
        if self.window.is_some() {
            return;
        }

        let settings = &self.config.window;
        info!(
            "Creating {}x{} window \"{}\"",
            settings.width, settings.height, settings.title
        );

        let (window, display) = SimpleWindowBuilder::new()
            .set_window_builder(window_attributes(settings))
            // The model outline is masked with the stencil buffer
            .with_config_template_builder(
                ConfigTemplateBuilder::new()
                    .with_depth_size(24)
                    .with_stencil_size(8),
            )
            .build(event_loop);

        match A::new(&self.config, &window, &display, event_loop) {
            Ok(application) => self.application = Some(application),
            Err(error) => {
                error!("Failed to start the application: {:?}", error);
                event_loop.exit();
            }
        }

        self.window = Some(window);
        self.display = Some(display);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(window), Some(display), Some(application)) = (
            self.window.as_ref(),
            self.display.as_ref(),
            self.application.as_mut(),
        ) else {
            return;
        };

        if window_id != window.id() {
            return;
        }

        application.window_event(event, event_loop, window, display);
    }

    fn device_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let (Some(window), Some(display), Some(application)) = (
            self.window.as_ref(),
            self.display.as_ref(),
            self.application.as_mut(),
        ) else {
            return;
        };

        application.device_event(event, event_loop, window, display);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

/// Shaders live in `<directory>/<name>/<name>.vert` and `<directory>/<name>/<name>.frag`
pub fn shader_paths(shader_directory: &Path, name: &str) -> (PathBuf, PathBuf) {
    let directory = shader_directory.join(name);

    (
        directory.join(format!("{name}.vert")),
        directory.join(format!("{name}.frag")),
    )
}

pub fn new_program(
    shader_directory: &Path,
    name: &str,
    display: &Display<WindowSurface>,
) -> Result<Program> {
    let (vertex_source_path, fragment_source_path) = shader_paths(shader_directory, name);

    let vertex_source = fs::read_to_string(&vertex_source_path)
        .wrap_err_with(|| format!("Failed to read vertex shader {:?}", vertex_source_path))?;
    let fragment_source = fs::read_to_string(&fragment_source_path)
        .wrap_err_with(|| format!("Failed to read fragment shader {:?}", fragment_source_path))?;

    let program = Program::from_source(
        display,
        vertex_source.as_str(),
        fragment_source.as_str(),
        None,
    )
    .wrap_err_with(|| format!("Failed to compile the {name} program"))?;

    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_paths_follow_program_name() {
        let (vertex, fragment) = shader_paths(Path::new("assets/shaders"), "lit");

        assert_eq!(vertex, PathBuf::from("assets/shaders/lit/lit.vert"));
        assert_eq!(fragment, PathBuf::from("assets/shaders/lit/lit.frag"));
    }

    #[test]
    fn bundled_shaders_exist() {
        let shaders = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/shaders");

        for name in ["lamp", "lit", "model", "outline"] {
            let (vertex, fragment) = shader_paths(&shaders, name);

            assert!(vertex.is_file(), "missing {:?}", vertex);
            assert!(fragment.is_file(), "missing {:?}", fragment);
        }
    }
}
