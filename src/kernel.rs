//! The update and color rules, as plain host functions.
//!
//! These are the reference form of the two GPU kernels. The WGSL in
//! [`crate::shader`] is generated from the same [`KernelParams`], and
//! [`crate::cpu::CpuSimulation`] maps these functions over the particle slice.
//!
//! # Update rule
//!
//! For a particle `(p, v)` and frame parameters `(dt, mode, mouse)`:
//!
//! 1. `dir = mouse - p`; if `|dir|² < radius²` the pointer acts:
//!    attract adds `normalize(dir) * dt` plus a swirl along `(-dir.y, dir.x)`,
//!    repel subtracts `normalize(dir) * dt`.
//! 2. Hash noise in `[-1, 1]²` scaled by `noise_strength * dt`.
//! 3. `v *= damping`, then `p += v * dt`.
//! 4. Any axis that left `[0, 1]` has its velocity negated and its
//!    coordinate clamped.

use glam::{Vec2, Vec3, Vec4};

use crate::particle::Particle;
use crate::uniforms::{FrameParams, PointerMode};

/// Constants baked into both kernels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelParams {
    /// Distance from the pointer inside which it exerts a force.
    pub pointer_radius: f32,
    /// Scale of the `normalize(dir) * dt` pull in attract mode.
    pub attract_strength: f32,
    /// Scale of the `normalize(dir) * dt` push in repel mode.
    pub repel_strength: f32,
    /// Tangential swirl added in attract mode, divided by distance.
    pub swirl_strength: f32,
    /// Scale of the hash jitter. Zero disables noise entirely.
    pub noise_strength: f32,
    /// Per-step velocity multiplier.
    pub damping: f32,
    /// Squared distances at or below this skip the pointer force, so a
    /// particle sitting exactly on the pointer never normalizes a zero vector.
    pub degenerate_epsilon: f32,
    /// Color at `t = 0`.
    pub cool_color: Vec3,
    /// Color at `t = 1`.
    pub hot_color: Vec3,
    /// Clamp the color factor into `[0, 1]`. Off by default, so fast
    /// particles extrapolate past the hot color.
    pub clamp_color_factor: bool,
}

impl Default for KernelParams {
    fn default() -> Self {
        Self {
            pointer_radius: 0.2,
            attract_strength: 1.0,
            repel_strength: 1.0,
            swirl_strength: 0.2,
            noise_strength: 0.1,
            damping: 0.99,
            degenerate_epsilon: 1e-12,
            cool_color: Vec3::new(0.149, 1.0, 0.875),
            hot_color: Vec3::new(1.0, 0.173, 0.063),
            clamp_color_factor: false,
        }
    }
}

impl KernelParams {
    /// Defaults with the noise term switched off.
    pub fn without_noise() -> Self {
        Self {
            noise_strength: 0.0,
            ..Self::default()
        }
    }

    pub fn with_noise_strength(mut self, strength: f32) -> Self {
        self.noise_strength = strength;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_pointer_radius(mut self, radius: f32) -> Self {
        self.pointer_radius = radius;
        self
    }

    pub fn with_clamped_color(mut self, clamp: bool) -> Self {
        self.clamp_color_factor = clamp;
        self
    }

    /// Advance one particle by `params.delta_time`.
    pub fn update(&self, particle: &mut Particle, params: &FrameParams) {
        let dt = params.delta_time;
        let mut p = particle.position;
        let mut v = particle.velocity;

        let dir = params.pointer_position - p;
        let dist_sq = dir.length_squared();
        let radius_sq = self.pointer_radius * self.pointer_radius;
        if dist_sq < radius_sq && dist_sq > self.degenerate_epsilon {
            let dist = dist_sq.sqrt();
            let toward = dir / dist;
            match params.pointer_mode {
                PointerMode::Attract => {
                    v += toward * self.attract_strength * dt;
                    v += dir.perp() * self.swirl_strength / dist * dt;
                }
                PointerMode::Repel => {
                    v -= toward * self.repel_strength * dt;
                }
                PointerMode::Inactive => {}
            }
        }

        if self.noise_strength != 0.0 {
            let noise = Vec2::new(hash(p), hash(v)) * 2.0 - Vec2::ONE;
            v += noise * self.noise_strength * dt;
        }

        v *= self.damping;
        p += v * dt;

        if !(0.0..=1.0).contains(&p.x) {
            v.x = -v.x;
            p.x = p.x.clamp(0.0, 1.0);
        }
        if !(0.0..=1.0).contains(&p.y) {
            v.y = -v.y;
            p.y = p.y.clamp(0.0, 1.0);
        }

        particle.position = p;
        particle.velocity = v;
    }

    /// Color factor for a velocity: `v.x + 2 v.y`.
    pub fn color_factor(&self, velocity: Vec2) -> f32 {
        let t = velocity.x + velocity.y * 2.0;
        if self.clamp_color_factor {
            t.clamp(0.0, 1.0)
        } else {
            t
        }
    }

    /// Opaque RGBA color of a particle.
    pub fn color(&self, particle: &Particle) -> Vec4 {
        let t = self.color_factor(particle.velocity);
        self.cool_color.lerp(self.hot_color, t).extend(1.0)
    }

    /// Full draw-stage output for one particle.
    pub fn draw(&self, particle: &Particle) -> PointVertex {
        PointVertex {
            clip_position: clip_position(particle.position),
            color: self.color(particle),
        }
    }
}

/// What the vertex stage emits for one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointVertex {
    pub clip_position: Vec4,
    pub color: Vec4,
}

/// Map `[0, 1]²` onto clip space `[-1, 1]²` at `z = 0`, `w = 1`.
pub fn clip_position(position: Vec2) -> Vec4 {
    let xy = position * 2.0 - Vec2::ONE;
    Vec4::new(xy.x, xy.y, 0.0, 1.0)
}

/// Cheap scalar hash of a 2D input, spread over `[0, 1)`.
///
/// `fract(sin(dot(x, (12.9898, 78.233))) * 43758.5453)`, the same expression
/// as the WGSL `hash` in [`crate::shader_utils::HASH_WGSL`].
pub fn hash(input: Vec2) -> f32 {
    let x = input.dot(Vec2::new(12.9898, 78.233)).sin() * 43758.5453;
    x - x.floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(kernel: &KernelParams, particle: Particle, params: FrameParams) -> Particle {
        let mut p = particle;
        kernel.update(&mut p, &params);
        p
    }

    #[test]
    fn test_hash_range() {
        for i in 0..1000 {
            let x = Vec2::new(i as f32 * 0.013, (i as f32 * 0.071).sin());
            let h = hash(x);
            assert!((0.0..=1.0).contains(&h), "hash({x}) = {h}");
        }
    }

    #[test]
    fn test_hash_deterministic_and_varied() {
        let a = hash(Vec2::new(0.3, 0.7));
        assert_eq!(a, hash(Vec2::new(0.3, 0.7)));
        assert_ne!(a, hash(Vec2::new(0.31, 0.7)));
    }

    #[test]
    fn test_boundary_reflection() {
        let kernel = KernelParams::without_noise();
        let p = step(
            &kernel,
            Particle::new(Vec2::new(0.999, 0.5), Vec2::new(0.5, 0.0)),
            FrameParams::idle(0.02),
        );
        assert_eq!(p.position.x, 1.0);
        assert!(p.velocity.x < 0.0);
        assert!((p.velocity.x + 0.5 * 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_boundary_reflection_low_side() {
        let kernel = KernelParams::without_noise();
        let p = step(
            &kernel,
            Particle::new(Vec2::new(0.5, 0.001), Vec2::new(0.0, -0.5)),
            FrameParams::idle(0.02),
        );
        assert_eq!(p.position.y, 0.0);
        assert!(p.velocity.y > 0.0);
        // Untouched axis keeps its sign
        assert_eq!(p.position.x, 0.5);
    }

    #[test]
    fn test_damping_only() {
        let kernel = KernelParams::without_noise();
        let p = step(
            &kernel,
            Particle::new(Vec2::splat(0.5), Vec2::new(0.1, -0.2)),
            FrameParams::idle(0.016),
        );
        assert!((p.velocity - Vec2::new(0.099, -0.198)).length() < 1e-6);
        assert!((p.position - (Vec2::splat(0.5) + p.velocity * 0.016)).length() < 1e-6);
    }

    #[test]
    fn test_attract_pulls_inward() {
        let kernel = KernelParams::without_noise();
        let mouse = Vec2::new(0.6, 0.5);
        let start = Particle::new(Vec2::new(0.5, 0.5), Vec2::ZERO);
        let p = step(
            &kernel,
            start,
            FrameParams::new(0.016, PointerMode::Attract, mouse),
        );
        let toward = (mouse - start.position).normalize();
        assert!(p.velocity.dot(toward) > 0.0);
        // Swirl adds a tangential component too
        assert!(p.velocity.dot(toward.perp()).abs() > 0.0);
    }

    #[test]
    fn test_repel_pushes_outward() {
        let kernel = KernelParams::without_noise();
        let mouse = Vec2::new(0.5, 0.6);
        let start = Particle::new(Vec2::new(0.5, 0.5), Vec2::ZERO);
        let p = step(
            &kernel,
            start,
            FrameParams::new(0.016, PointerMode::Repel, mouse),
        );
        let away = start.position - mouse;
        assert!(p.velocity.dot(away) > 0.0);
    }

    #[test]
    fn test_pointer_out_of_range() {
        let kernel = KernelParams::without_noise();
        let start = Particle::new(Vec2::new(0.1, 0.1), Vec2::ZERO);
        for mode in [PointerMode::Attract, PointerMode::Repel] {
            let p = step(&kernel, start, FrameParams::new(0.016, mode, Vec2::new(0.9, 0.9)));
            assert_eq!(p.velocity, Vec2::ZERO);
            assert_eq!(p.position, start.position);
        }
    }

    #[test]
    fn test_inactive_pointer_ignored() {
        let kernel = KernelParams::without_noise();
        let start = Particle::new(Vec2::new(0.5, 0.5), Vec2::ZERO);
        let p = step(
            &kernel,
            start,
            FrameParams::new(0.016, PointerMode::Inactive, Vec2::new(0.55, 0.5)),
        );
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_particle_on_pointer_stays_finite() {
        let kernel = KernelParams::default();
        let at = Vec2::new(0.4, 0.4);
        for mode in [PointerMode::Attract, PointerMode::Repel] {
            let p = step(
                &kernel,
                Particle::new(at, Vec2::ZERO),
                FrameParams::new(0.016, mode, at),
            );
            assert!(p.position.is_finite());
            assert!(p.velocity.is_finite());
        }
    }

    #[test]
    fn test_noise_is_bounded() {
        let kernel = KernelParams::default();
        let dt = 0.03;
        let start = Particle::new(Vec2::new(0.37, 0.81), Vec2::ZERO);
        let p = step(&kernel, start, FrameParams::idle(dt));
        let max = kernel.noise_strength * dt * kernel.damping;
        assert!(p.velocity.x.abs() <= max + 1e-7);
        assert!(p.velocity.y.abs() <= max + 1e-7);
    }

    #[test]
    fn test_zero_delta_only_damps() {
        let kernel = KernelParams::default();
        let start = Particle::new(Vec2::new(0.3, 0.3), Vec2::new(0.2, 0.1));
        let p = step(&kernel, start, FrameParams::new(0.0, PointerMode::Attract, Vec2::new(0.35, 0.3)));
        assert_eq!(p.position, start.position);
        assert!((p.velocity - start.velocity * 0.99).length() < 1e-6);
    }

    #[test]
    fn test_clip_position() {
        assert_eq!(clip_position(Vec2::ZERO), Vec4::new(-1.0, -1.0, 0.0, 1.0));
        assert_eq!(clip_position(Vec2::ONE), Vec4::new(1.0, 1.0, 0.0, 1.0));
        assert_eq!(clip_position(Vec2::splat(0.5)), Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_color_endpoints() {
        let kernel = KernelParams::default();
        let cool = kernel.color(&Particle::new(Vec2::ZERO, Vec2::ZERO));
        assert!((cool - Vec4::new(0.149, 1.0, 0.875, 1.0)).length() < 1e-6);

        let hot = kernel.color(&Particle::new(Vec2::ZERO, Vec2::new(1.0, 0.0)));
        assert!((hot - Vec4::new(1.0, 0.173, 0.063, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_color_factor_extrapolates() {
        let kernel = KernelParams::default();
        let fast = Particle::new(Vec2::ZERO, Vec2::new(0.0, 1.0));
        assert_eq!(kernel.color_factor(fast.velocity), 2.0);
        let color = kernel.color(&fast);
        // Red channel runs past the hot color
        assert!(color.x > 1.0);
        assert_eq!(color.w, 1.0);

        let clamped = kernel.with_clamped_color(true);
        assert_eq!(clamped.color_factor(fast.velocity), 1.0);
        assert_eq!(clamped.color_factor(Vec2::new(-1.0, 0.0)), 0.0);
    }
}
