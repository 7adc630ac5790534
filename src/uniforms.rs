//! Per-frame parameters and their uniform-buffer image.
//!
//! [`FrameParams`] is the host-side record the frame loop fills at the start
//! of every frame. [`FrameUniforms`] is the exact bytes uploaded to the GPU.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// What the pointer is doing to nearby particles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PointerMode {
    #[default]
    Inactive = 0,
    Attract = 1,
    Repel = 2,
}

impl PointerMode {
    /// GPU encoding, as compared against in the compute kernel.
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl From<u32> for PointerMode {
    fn from(value: u32) -> Self {
        match value {
            1 => PointerMode::Attract,
            2 => PointerMode::Repel,
            _ => PointerMode::Inactive,
        }
    }
}

/// Frame-global inputs to the update kernel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameParams {
    /// Seconds since the previous frame, already clamped by the frame loop.
    pub delta_time: f32,
    pub pointer_mode: PointerMode,
    /// Pointer position in normalized `[0, 1]` space, Y up.
    pub pointer_position: Vec2,
}

impl FrameParams {
    pub fn new(delta_time: f32, pointer_mode: PointerMode, pointer_position: Vec2) -> Self {
        Self {
            delta_time,
            pointer_mode,
            pointer_position,
        }
    }

    /// Parameters with the pointer released.
    pub fn idle(delta_time: f32) -> Self {
        Self::new(delta_time, PointerMode::Inactive, Vec2::ZERO)
    }

    pub fn to_uniforms(&self) -> FrameUniforms {
        FrameUniforms {
            delta_time: self.delta_time,
            pointer_mode: self.pointer_mode.as_u32(),
            pointer_position: self.pointer_position,
        }
    }
}

/// Uniform buffer contents.
///
/// Mirrors [`FRAME_PARAMS_WGSL`]: `f32` at 0, `u32` at 4, `vec2<f32>` at 8
/// (its natural 8-byte alignment), 16 bytes total.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub delta_time: f32,
    pub pointer_mode: u32,
    pub pointer_position: Vec2,
}

impl From<FrameParams> for FrameUniforms {
    fn from(params: FrameParams) -> Self {
        params.to_uniforms()
    }
}

pub const FRAME_PARAMS_WGSL: &str = r#"struct FrameParams {
    delta_time: f32,
    pointer_mode: u32,
    pointer_position: vec2<f32>,
};"#;
