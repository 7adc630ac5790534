//! WGSL helper functions and literal formatting for generated shaders.
//!
//! # Available Functions
//!
//! - `hash(p: vec2<f32>) -> f32` - scalar hash of a 2D point in [0, 1)

use glam::Vec3;

/// WGSL code for the 2D scalar hash used by the noise term.
pub const HASH_WGSL: &str = r#"
// Deterministic jitter source, not a real RNG
fn hash(p: vec2<f32>) -> f32 {
    return fract(sin(dot(p, vec2<f32>(12.9898, 78.233))) * 43758.5453);
}
"#;

/// Format an `f32` as a WGSL float literal.
///
/// `Debug` always keeps a decimal point or exponent, so `1.0` never turns
/// into the integer literal `1`.
pub fn wgsl_f32(value: f32) -> String {
    format!("{:?}", value)
}

pub fn wgsl_vec3(v: Vec3) -> String {
    format!(
        "vec3<f32>({}, {}, {})",
        wgsl_f32(v.x),
        wgsl_f32(v.y),
        wgsl_f32(v.z)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_literals() {
        assert_eq!(wgsl_f32(1.0), "1.0");
        assert_eq!(wgsl_f32(0.99), "0.99");
        assert_eq!(wgsl_f32(-0.5), "-0.5");
        assert_eq!(wgsl_f32(1e-12), "1e-12");
    }

    #[test]
    fn test_vec3_literal() {
        assert_eq!(
            wgsl_vec3(Vec3::new(0.149, 1.0, 0.875)),
            "vec3<f32>(0.149, 1.0, 0.875)"
        );
    }
}
