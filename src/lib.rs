//! # pointstorm
//!
//! A million point particles drifting in the unit square, updated and drawn
//! entirely on the GPU.
//!
//! Every frame runs two kernels over the same particle buffer:
//!
//! 1. **Update** (compute): pointer attraction/repulsion inside a small
//!    radius, hash noise, damping, integration, and reflection off the
//!    square's edges.
//! 2. **Draw** (vertex): one opaque point per particle, colored by
//!    interpolating between a cool and a hot color by velocity.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pointstorm::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     Simulation::new()
//!         .with_particle_count(1_000_000)
//!         .run()
//! }
//! ```
//!
//! ## Controls
//!
//! | Input | Effect |
//! |-------|--------|
//! | Left mouse / one touch | attract and swirl |
//! | Right mouse / two touches | repel |
//! | `Space` | pause the update stage |
//! | `R` | reset the particles |
//! | `Esc` | quit |
//!
//! ## Headless use
//!
//! [`CpuSimulation`] runs the same rules on the CPU with rayon, for tests,
//! benchmarks and tooling without a GPU:
//!
//! ```
//! use pointstorm::{CpuSimulation, FrameParams};
//!
//! let mut sim = CpuSimulation::new(10_000, Some(1));
//! sim.step(&FrameParams::idle(0.016));
//! assert!(sim.particles().iter().all(|p| p.in_bounds()));
//! ```

pub mod config;
pub mod cpu;
pub mod error;
pub mod frame;
mod gpu;
pub mod input;
pub mod kernel;
mod particle;
pub mod shader;
pub mod shader_utils;
mod simulation;
pub mod spawn;
pub mod time;
mod uniforms;

pub use config::SimConfig;
pub use cpu::CpuSimulation;
pub use error::{ConfigError, GpuError, SimulationError};
pub use frame::{FrameLoop, FramePlan};
pub use glam::{Vec2, Vec3, Vec4};
pub use kernel::{KernelParams, PointVertex};
pub use particle::{Particle, PARTICLE_WGSL};
pub use simulation::Simulation;
pub use uniforms::{FrameParams, FrameUniforms, PointerMode, FRAME_PARAMS_WGSL};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use pointstorm::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::SimConfig;
    pub use crate::cpu::CpuSimulation;
    pub use crate::error::SimulationError;
    pub use crate::kernel::KernelParams;
    pub use crate::particle::Particle;
    pub use crate::simulation::Simulation;
    pub use crate::uniforms::{FrameParams, PointerMode};
    pub use crate::{Vec2, Vec3, Vec4};
}
