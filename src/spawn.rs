//! Initial particle state.
//!
//! Positions are uniform over the unit square and velocities uniform over
//! `[-0.05, 0.05]²`. Every particle gets its own `SmallRng` seeded from its
//! index, so spawning runs in parallel and a fixed seed reproduces the same
//! state regardless of thread count.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::particle::Particle;

/// Half-width of the initial velocity range on each axis.
pub const INITIAL_SPEED: f32 = 0.05;

/// Spawn `count` particles.
///
/// With `seed == None` a fresh seed is drawn from the clock, so every run
/// looks different.
pub fn spawn_particles(count: u32, seed: Option<u64>) -> Vec<Particle> {
    let base = seed.unwrap_or_else(clock_seed);
    (0..count)
        .into_par_iter()
        .map(|index| spawn_one(base, index))
        .collect()
}

fn spawn_one(base: u64, index: u32) -> Particle {
    // Spread consecutive indices across the seed space
    let seed = base ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut rng = SmallRng::seed_from_u64(seed);
    Particle {
        position: Vec2::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)),
        velocity: Vec2::new(
            rng.gen_range(-INITIAL_SPEED..=INITIAL_SPEED),
            rng.gen_range(-INITIAL_SPEED..=INITIAL_SPEED),
        ),
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_count_and_ranges() {
        let particles = spawn_particles(10_000, Some(7));
        assert_eq!(particles.len(), 10_000);
        for p in &particles {
            assert!((0.0..1.0).contains(&p.position.x));
            assert!((0.0..1.0).contains(&p.position.y));
            assert!(p.velocity.x.abs() <= INITIAL_SPEED);
            assert!(p.velocity.y.abs() <= INITIAL_SPEED);
        }
    }

    #[test]
    fn test_spawn_seeded_is_reproducible() {
        let a = spawn_particles(1000, Some(1234));
        let b = spawn_particles(1000, Some(1234));
        assert_eq!(a, b);

        let c = spawn_particles(1000, Some(4321));
        assert_ne!(a, c);
    }

    #[test]
    fn test_spawn_covers_square() {
        let particles = spawn_particles(20_000, Some(99));
        let mean = particles.iter().map(|p| p.position).sum::<Vec2>() / particles.len() as f32;
        assert!((mean - Vec2::splat(0.5)).length() < 0.02);

        // Every quadrant gets a fair share
        let low_left = particles
            .iter()
            .filter(|p| p.position.x < 0.5 && p.position.y < 0.5)
            .count();
        assert!(low_left > 4000 && low_left < 6000);
    }

    #[test]
    fn test_spawn_zero() {
        assert!(spawn_particles(0, None).is_empty());
    }
}
