//! Drifting particle field

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::particles as constants;
use crate::vertex::ParticleInstance;

/// Number of particles for an intensity in [0, 1]
pub fn particle_count(intensity: f32) -> usize {
    (intensity.clamp(0.0, 1.0) * constants::MAX_COUNT as f32).floor() as usize
}

/// Randomly seeded particles rising through a cube around the logo.
///
/// The field is reseeded only when the requested count changes, so
/// unrelated edits do not make the particles jump.
pub struct ParticleField {
    rng: StdRng,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()))
    }

    /// Deterministic field for a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            positions: Vec::new(),
            velocities: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Resize to `count` particles. Returns true if the field was reseeded.
    pub fn set_count(&mut self, count: usize) -> bool {
        if count == self.positions.len() {
            return false;
        }

        let h = constants::HALF_EXTENT;
        let vh = constants::MAX_HORIZONTAL_SPEED;
        let rng = &mut self.rng;

        self.positions = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.random_range(-h..=h),
                    rng.random_range(-h..=h),
                    rng.random_range(-h..=h),
                )
            })
            .collect();
        self.velocities = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.random_range(-vh..=vh),
                    rng.random_range(0.0..=constants::MAX_RISE_SPEED),
                    rng.random_range(-vh..=vh),
                )
            })
            .collect();

        tracing::debug!("Reseeded particle field with {} particles", count);
        true
    }

    /// Advance one frame; particles above the cube re-enter at the bottom
    pub fn step(&mut self) {
        let h = constants::HALF_EXTENT;
        for (position, velocity) in self.positions.iter_mut().zip(&self.velocities) {
            *position += *velocity;
            if position.y > h {
                position.y = -h;
            }
        }
    }

    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.positions
            .iter()
            .map(|p| ParticleInstance {
                position: p.to_array(),
            })
            .collect()
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_from_intensity() {
        assert_eq!(particle_count(0.0), 0);
        assert_eq!(particle_count(0.5), 500);
        assert_eq!(particle_count(0.7), 700);
        assert_eq!(particle_count(1.0), 1000);
        assert_eq!(particle_count(0.0019), 1);
    }

    #[test]
    fn test_seeded_within_bounds() {
        let mut field = ParticleField::with_seed(7);
        assert!(field.set_count(500));
        assert_eq!(field.len(), 500);

        for (p, v) in field.positions.iter().zip(&field.velocities) {
            assert!(p.abs().max_element() <= 5.0);
            assert!(v.x.abs() <= 0.01 && v.z.abs() <= 0.01);
            assert!((0.0..=0.02).contains(&v.y));
        }
    }

    #[test]
    fn test_reseed_only_on_count_change() {
        let mut field = ParticleField::with_seed(1);
        field.set_count(100);
        let before = field.positions().to_vec();

        assert!(!field.set_count(100));
        assert_eq!(field.positions(), before.as_slice());

        assert!(field.set_count(101));
        assert_eq!(field.len(), 101);
    }

    #[test]
    fn test_step_wraps_at_top() {
        let mut field = ParticleField::with_seed(3);
        field.set_count(1);
        field.positions[0] = Vec3::new(0.0, 4.999, 0.0);
        field.velocities[0] = Vec3::new(0.0, 0.02, 0.0);

        field.step();
        assert_eq!(field.positions[0].y, -5.0);

        field.step();
        assert!((field.positions[0].y - -4.98).abs() < 1e-5);
    }
}
