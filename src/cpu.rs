//! Host backend running both kernels with rayon.
//!
//! Each rayon task owns exactly one particle slot (`par_iter_mut`) and reads
//! the shared [`FrameParams`] immutably, the same contract the compute
//! shader relies on. No locking is involved.

use rayon::prelude::*;

use crate::frame::FramePlan;
use crate::kernel::{KernelParams, PointVertex};
use crate::particle::Particle;
use crate::spawn::spawn_particles;
use crate::uniforms::FrameParams;

/// A particle simulation stepped on the CPU.
#[derive(Clone, Debug)]
pub struct CpuSimulation {
    particles: Vec<Particle>,
    kernel: KernelParams,
    seed: Option<u64>,
}

impl CpuSimulation {
    /// Spawn `count` particles with the default kernel.
    pub fn new(count: u32, seed: Option<u64>) -> Self {
        Self {
            particles: spawn_particles(count, seed),
            kernel: KernelParams::default(),
            seed,
        }
    }

    /// Start from an explicit particle state.
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self {
            particles,
            kernel: KernelParams::default(),
            seed: None,
        }
    }

    pub fn with_kernel(mut self, kernel: KernelParams) -> Self {
        self.kernel = kernel;
        self
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn kernel(&self) -> &KernelParams {
        &self.kernel
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Update stage: advance every particle by one step.
    pub fn step(&mut self, params: &FrameParams) {
        let kernel = &self.kernel;
        self.particles
            .par_iter_mut()
            .for_each(|p| kernel.update(p, params));
    }

    /// Draw stage: one point per particle. Pure in the current state.
    pub fn draw(&self) -> Vec<PointVertex> {
        let kernel = &self.kernel;
        self.particles.par_iter().map(|p| kernel.draw(p)).collect()
    }

    /// Re-spawn the initial state with the original seed.
    pub fn reset(&mut self) {
        self.particles = spawn_particles(self.particles.len() as u32, self.seed);
    }

    /// Carry out a [`FramePlan`] and return the drawn frame.
    pub fn run_frame(&mut self, plan: &FramePlan) -> Vec<PointVertex> {
        if plan.reset {
            self.reset();
        }
        if plan.run_update {
            self.step(&plan.params);
        }
        self.draw()
    }
}
