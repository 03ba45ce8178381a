use color_eyre::Result;
use winit::event_loop::{ControlFlow, EventLoop};

use crate::application::Application;
use crate::config::DemoConfig;
use crate::context::OpenGLContext;

pub fn run<A: Application>(config: DemoConfig) -> Result<()> {
    let event_loop = EventLoop::new()?;
    // Redraw continuously, the scene animates even without input
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut opengl_context = OpenGLContext::<A>::new(config);
    event_loop.run_app(&mut opengl_context)?;

    Ok(())
}
