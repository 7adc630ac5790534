//! The particle record shared by the host, the compute kernel, and the
//! vertex stage.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// One point particle in the unit square.
///
/// The layout is bit-identical to the WGSL `Particle` struct in
/// [`PARTICLE_WGSL`]: two `vec2<f32>`, 16 bytes, no padding.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// Position in normalized space, `[0, 1]` on each axis after an update.
    pub position: Vec2,
    /// Velocity in normalized units per second.
    pub velocity: Vec2,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }

    /// Byte stride of one particle in the GPU buffer.
    pub const STRIDE: u64 = std::mem::size_of::<Particle>() as u64;

    /// Byte offset of `velocity`, used as the second vertex attribute.
    pub const VELOCITY_OFFSET: u64 = std::mem::size_of::<Vec2>() as u64;

    /// Whether both coordinates lie inside the unit square.
    pub fn in_bounds(&self) -> bool {
        (0.0..=1.0).contains(&self.position.x) && (0.0..=1.0).contains(&self.position.y)
    }
}

/// WGSL struct definition matching [`Particle`].
pub const PARTICLE_WGSL: &str = r#"struct Particle {
    position: vec2<f32>,
    velocity: vec2<f32>,
};"#;
