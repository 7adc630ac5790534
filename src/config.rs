//! Simulation settings.
//!
//! Everything tunable lives in [`SimConfig`]. The [`Simulation`] builder
//! fills it in and calls [`SimConfig::validate`] before opening a window.
//!
//! [`Simulation`]: crate::Simulation

use std::time::Duration;

use crate::error::ConfigError;
use crate::kernel::KernelParams;
use crate::particle::Particle;
use crate::shader::{MAX_WORKGROUPS, WORKGROUP_SIZE};
use crate::time::DEFAULT_MAX_DELTA;

pub const DEFAULT_PARTICLE_COUNT: u32 = 1_000_000;

/// `max_storage_buffer_binding_size` under `wgpu::Limits::default()`.
const MAX_STORAGE_BINDING: u64 = 128 << 20;

#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub particle_count: u32,
    /// Seed for the initial state. `None` draws one from the clock.
    pub seed: Option<u64>,
    pub title: String,
    /// Initial window size in logical pixels.
    pub window_size: (u32, u32),
    /// Cap on the per-frame delta fed to the update kernel.
    pub max_delta: Duration,
    pub kernel: KernelParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            seed: None,
            title: "pointstorm".to_string(),
            window_size: (1280, 720),
            max_delta: DEFAULT_MAX_DELTA,
            kernel: KernelParams::default(),
        }
    }
}

impl SimConfig {
    /// Largest particle count that fits both one compute dispatch and the
    /// default storage binding size.
    pub const MAX_PARTICLES: u32 = {
        let dispatch = MAX_WORKGROUPS * WORKGROUP_SIZE;
        let binding = (MAX_STORAGE_BINDING / Particle::STRIDE) as u32;
        if dispatch < binding {
            dispatch
        } else {
            binding
        }
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        if self.particle_count > Self::MAX_PARTICLES {
            return Err(ConfigError::TooManyParticles {
                count: self.particle_count,
                max: Self::MAX_PARTICLES,
            });
        }
        if self.max_delta.is_zero() {
            return Err(ConfigError::InvalidMaxDelta(self.max_delta));
        }
        let (width, height) = self.window_size;
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidWindowSize { width, height });
        }
        Ok(())
    }
}
