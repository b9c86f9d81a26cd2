mod clock;
mod config;
mod controls;

use clock::FrameClock;
use config::{field_size, Config, DEFAULT_CONFIG_PATH};
use controls::Controls;
use std::error::Error;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use vspace_core::{App, ElementState, PhysicalKey, WinitEvent as Event, WinitWindowEvent as WindowEvent};
use vspace_noise::{FieldSampler, FrameRenderer, LatticeNoise};
use vspace_render::FieldPipeline;

fn lock(controls: &Mutex<Controls>) -> MutexGuard<'_, Controls> {
    controls.lock().unwrap_or_else(PoisonError::into_inner)
}

fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(config.window.title.clone(), config.window.width, config.window.height);

    log::info!(
        "Octaves: {} (persistence {}, lacunarity {}), easing {:?}",
        config.octaves.count(),
        config.octaves.persistence(),
        config.octaves.lacunarity(),
        config.easing
    );

    // Written by the input handler, snapshotted once per frame
    let shared_controls = Arc::new(Mutex::new(Controls::new(config.render)));

    let sampler = FieldSampler::new(LatticeNoise::new(config.easing), config.octaves);
    let mut renderer = FrameRenderer::new(sampler, config.bands);
    let mut pipeline: Option<FieldPipeline> = None;
    let mut clock = FrameClock::new();
    let pixel_size = config.window.pixel_size;

    let render_controls = Arc::clone(&shared_controls);
    app.set_render_callback(move |graphics_context| {
        let pipeline = pipeline.get_or_insert_with(|| {
            log::info!("Initializing field pipeline");
            FieldPipeline::new(graphics_context.device(), graphics_context.surface_format())
        });

        let elapsed = clock.tick();

        let (state, reset) = lock(&render_controls).snapshot();
        if reset {
            renderer.reset_offset();
            log::info!("Scroll offset reset");
        }

        let (width, height) = field_size(graphics_context.size(), pixel_size);
        let pixels = renderer.render(&state, elapsed, width, height);
        pipeline.upload(graphics_context.device(), graphics_context.queue(), &pixels, width, height);
        pipeline.present(graphics_context)
    });

    let input_controls = Arc::clone(&shared_controls);
    app.set_input_callback(move |event| {
        if let Event::WindowEvent { event: WindowEvent::KeyboardInput { event: key_event, .. }, .. } = event {
            if key_event.state == ElementState::Pressed && !key_event.repeat {
                if let PhysicalKey::Code(keycode) = key_event.physical_key {
                    lock(&input_controls).handle_key(keycode);
                }
            }
        }
    });

    app.run()
}

fn main() {
    vspace_core::init_logging();

    let path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    let config = match Config::load(&path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid config {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config) {
        log::error!("Engine error: {}", e);
        std::process::exit(1);
    }
}
