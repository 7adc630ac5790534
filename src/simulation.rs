//! Simulation builder and runner

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::SimConfig;
use crate::error::SimulationError;
use crate::frame::FrameLoop;
use crate::gpu::GpuState;
use crate::input::Input;
use crate::kernel::KernelParams;
use crate::particle::Particle;
use crate::spawn::spawn_particles;

/// A particle simulation builder.
///
/// Use method chaining to configure, then call `.run()` to start.
///
/// ```ignore
/// Simulation::new()
///     .with_particle_count(250_000)
///     .with_seed(7)
///     .run()?;
/// ```
#[derive(Debug, Default)]
pub struct Simulation {
    config: SimConfig,
}

impl Simulation {
    /// Create a new simulation with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: SimConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.config.particle_count = count;
        self
    }

    /// Fix the seed of the initial state, making runs reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.config.window_size = (width, height);
        self
    }

    /// Cap the delta time of a single frame.
    pub fn with_max_delta(mut self, max_delta: Duration) -> Self {
        self.config.max_delta = max_delta;
        self
    }

    /// Override the kernel constants.
    pub fn with_kernel(mut self, kernel: KernelParams) -> Self {
        self.config.kernel = kernel;
        self
    }

    /// Run the simulation. This blocks until the window is closed.
    pub fn run(self) -> Result<(), SimulationError> {
        self.config.validate()?;

        log::info!(
            "Spawning {} particles (seed: {:?})",
            self.config.particle_count,
            self.config.seed
        );
        let particles = spawn_particles(self.config.particle_count, self.config.seed);

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(particles, self.config);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    particles: Vec<Particle>,
    config: SimConfig,
    input: Input,
    frames: FrameLoop,
    /// Setup failure raised inside a winit callback, returned from `run`.
    error: Option<SimulationError>,
}

impl App {
    fn new(particles: Vec<Particle>, config: SimConfig) -> Self {
        let (width, height) = config.window_size;
        Self {
            window: None,
            gpu_state: None,
            particles,
            input: Input::new(width, height),
            frames: FrameLoop::new(config.max_delta),
            config,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SimulationError> {
        let (width, height) = self.config.window_size;
        let window_attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let size = window.inner_size();
        self.input.set_window_size(size.width, size.height);
        self.window = Some(window.clone());

        self.gpu_state = Some(pollster::block_on(GpuState::new(
            window,
            &self.particles,
            &self.config.kernel,
        ))?);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let plan = self.frames.begin_frame(Instant::now(), &self.input);
        self.input.end_frame();

        if plan.exit {
            event_loop.exit();
            return;
        }

        if let Some(gpu_state) = &mut self.gpu_state {
            if plan.reset {
                let particles = spawn_particles(self.config.particle_count, self.config.seed);
                gpu_state.upload_particles(&particles);
            }

            match gpu_state.render(&plan) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("Surface lost, reconfiguring");
                    match &self.window {
                        Some(window) => gpu_state.resize(window.inner_size()),
                        None => gpu_state.reconfigure(),
                    }
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of GPU memory, exiting");
                    event_loop.exit();
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                log::error!("{}", e);
                self.error = Some(e);
                event_loop.exit();
                return;
            }
            // The initial state now lives on the GPU
            self.particles = Vec::new();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
