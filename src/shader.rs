//! WGSL generation for the update and draw kernels.
//!
//! Kernel constants are baked in as literals from [`KernelParams`], so the
//! GPU path and [`KernelParams::update`] never drift apart.

use crate::kernel::KernelParams;
use crate::particle::PARTICLE_WGSL;
use crate::shader_utils::{wgsl_f32, wgsl_vec3, HASH_WGSL};
use crate::uniforms::{PointerMode, FRAME_PARAMS_WGSL};

/// Threads per compute workgroup.
pub const WORKGROUP_SIZE: u32 = 256;

/// Largest workgroup count in one dimension under default wgpu limits.
pub const MAX_WORKGROUPS: u32 = 65_535;

/// Workgroups needed to cover `num_particles`.
pub fn workgroup_count(num_particles: u32) -> u32 {
    num_particles.div_ceil(WORKGROUP_SIZE)
}

/// Generate the update kernel.
///
/// Binding 0 is the particle storage buffer (read-write), binding 1 the
/// frame parameters.
pub fn compute_shader(kernel: &KernelParams) -> String {
    let radius_sq = wgsl_f32(kernel.pointer_radius * kernel.pointer_radius);
    let epsilon = wgsl_f32(kernel.degenerate_epsilon);
    let attract = wgsl_f32(kernel.attract_strength);
    let repel = wgsl_f32(kernel.repel_strength);
    let swirl = wgsl_f32(kernel.swirl_strength);
    let noise = wgsl_f32(kernel.noise_strength);
    let damping = wgsl_f32(kernel.damping);
    let attract_mode = PointerMode::Attract.as_u32();
    let repel_mode = PointerMode::Repel.as_u32();

    format!(
        r#"{PARTICLE_WGSL}

{FRAME_PARAMS_WGSL}

@group(0) @binding(0)
var<storage, read_write> particles: array<Particle>;

@group(0) @binding(1)
var<uniform> params: FrameParams;
{HASH_WGSL}
@compute @workgroup_size({WORKGROUP_SIZE})
fn main(@builtin(global_invocation_id) global_id: vec3<u32>) {{
    let index = global_id.x;
    if index >= arrayLength(&particles) {{
        return;
    }}

    var p = particles[index];
    let dt = params.delta_time;

    // Pointer force
    let dir = params.pointer_position - p.position;
    let dist_sq = dot(dir, dir);
    if dist_sq < {radius_sq} && dist_sq > {epsilon} {{
        let dist = sqrt(dist_sq);
        let toward = dir / dist;
        if params.pointer_mode == {attract_mode}u {{
            p.velocity += toward * {attract} * dt;
            p.velocity += vec2<f32>(-dir.y, dir.x) * {swirl} / dist * dt;
        }} else if params.pointer_mode == {repel_mode}u {{
            p.velocity -= toward * {repel} * dt;
        }}
    }}

    // Noise
    let jitter = vec2<f32>(hash(p.position), hash(p.velocity)) * 2.0 - vec2<f32>(1.0, 1.0);
    p.velocity += jitter * {noise} * dt;

    // Damp and integrate
    p.velocity *= {damping};
    p.position += p.velocity * dt;

    // Reflect off the unit square
    if p.position.x < 0.0 || p.position.x > 1.0 {{
        p.velocity.x = -p.velocity.x;
        p.position.x = clamp(p.position.x, 0.0, 1.0);
    }}
    if p.position.y < 0.0 || p.position.y > 1.0 {{
        p.velocity.y = -p.velocity.y;
        p.position.y = clamp(p.position.y, 0.0, 1.0);
    }}

    particles[index] = p;
}}
"#
    )
}

/// Generate the draw kernel: one point per particle, colored by velocity.
///
/// Reads the particle buffer as a per-vertex buffer (location 0 position,
/// location 1 velocity).
pub fn render_shader(kernel: &KernelParams) -> String {
    let cool = wgsl_vec3(kernel.cool_color);
    let hot = wgsl_vec3(kernel.hot_color);
    let factor = if kernel.clamp_color_factor {
        "clamp(velocity.x + velocity.y * 2.0, 0.0, 1.0)"
    } else {
        "velocity.x + velocity.y * 2.0"
    };

    format!(
        r#"struct VertexOutput {{
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
}};

@vertex
fn vs_main(
    @location(0) position: vec2<f32>,
    @location(1) velocity: vec2<f32>,
) -> VertexOutput {{
    var out: VertexOutput;
    out.clip_position = vec4<f32>(position * 2.0 - vec2<f32>(1.0, 1.0), 0.0, 1.0);
    let t = {factor};
    out.color = vec4<f32>(mix({cool}, {hot}, t), 1.0);
    return out;
}}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {{
    return in.color;
}}
"#
    )
}
