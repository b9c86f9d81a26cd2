use vspace_render::GraphicsContext;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};
use std::sync::Arc;

// Re-export winit event types for use in application code
pub use winit::event::{ElementState, KeyEvent};
pub use winit::keyboard::{KeyCode, PhysicalKey};
pub use winit::event::Event as WinitEvent;
pub use winit::event::WindowEvent as WinitWindowEvent;

/// Install the global logger; `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

type RenderCallback = Box<dyn FnMut(&mut GraphicsContext) -> Result<(), wgpu::SurfaceError> + 'static>;
type InputCallback = Box<dyn FnMut(&Event<()>) + 'static>;

/// Owns the window and drives the event loop; one redraw per loop iteration.
pub struct App {
    title: String,
    width: u32,
    height: u32,
    render_callback: Option<RenderCallback>,
    input_callback: Option<InputCallback>,
}

impl App {
    /// Create a new App with the specified title and dimensions
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            render_callback: None,
            input_callback: None,
        }
    }

    /// Set the render callback that will be called each frame
    pub fn set_render_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&mut GraphicsContext) -> Result<(), wgpu::SurfaceError> + 'static,
    {
        self.render_callback = Some(Box::new(callback));
    }

    /// Set the input callback that will be called for input events
    pub fn set_input_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&Event<()>) + 'static,
    {
        self.input_callback = Some(Box::new(callback));
    }

    /// Run the application event loop
    pub fn run(mut self) -> Result<(), Box<dyn std::error::Error>> {
        let event_loop = EventLoop::new()?;

        let window = Arc::new(
            WindowBuilder::new()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::PhysicalSize::new(self.width, self.height))
                .build(&event_loop)?,
        );

        log::info!("Window created: {} ({}x{})", self.title, self.width, self.height);

        let mut graphics_context = GraphicsContext::new(window.clone())?;

        event_loop.run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            if let Some(callback) = &mut self.input_callback {
                callback(&event);
            }

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        log::info!("Close requested, exiting...");
                        elwt.exit();
                    }
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(KeyCode::Escape),
                                state: ElementState::Pressed,
                                ..
                            },
                        ..
                    } => {
                        log::info!("Escape pressed, exiting...");
                        elwt.exit();
                    }
                    WindowEvent::Resized(physical_size) => {
                        graphics_context.resize(physical_size);
                        log::info!("Window resized to: {:?}", physical_size);
                    }
                    WindowEvent::RedrawRequested => {
                        let result = match &mut self.render_callback {
                            Some(callback) => callback(&mut graphics_context),
                            None => Ok(()),
                        };

                        match result {
                            Ok(()) => {}
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                log::warn!("Surface lost, reconfiguring");
                                graphics_context.reconfigure();
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                log::error!("Out of GPU memory, exiting...");
                                elwt.exit();
                            }
                            Err(e) => log::warn!("Frame dropped: {}", e),
                        }
                        window.request_redraw();
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    window.request_redraw();
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}
