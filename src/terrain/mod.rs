//! Noise sampling for surface textures
//!
//! Wraps the primitive noise functions of the `noise` crate behind the
//! [`NoiseSource`] capability, which the texture synthesizer receives
//! explicitly instead of looking a method up by enum.

mod fractal;
mod offset;

pub use fractal::{fractal_sum, NoiseSettings, LACUNARITY_RANGE, OCTAVE_RANGE, PERSISTENCE_RANGE};
pub use offset::{NoiseOffset, OFFSET_RANGE};

use glam::DVec3;
use noise::{NoiseFn, Perlin, Value};

/// Seed of the underlying noise lattice
///
/// Distinct surfaces come from [`NoiseOffset`], not from reseeding the lattice.
pub const LATTICE_SEED: u32 = 0;

/// Supported noise families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoiseType {
    /// Smooth value noise, output in `[0, 1]`
    #[default]
    Value,
    /// Perlin gradient noise, output in `[-1, 1]`
    Perlin,
}

impl NoiseType {
    /// Build the sampling capability for this family
    pub fn source(self) -> Box<dyn NoiseSource> {
        match self {
            NoiseType::Value => Box::new(ValueNoise::new(LATTICE_SEED)),
            NoiseType::Perlin => Box::new(PerlinNoise::new(LATTICE_SEED)),
        }
    }
}

/// A 3D scalar noise function
pub trait NoiseSource {
    /// Sample the noise field at a point
    fn sample(&self, point: DVec3) -> f64;

    /// Whether samples lie in `[-1, 1]` and need [`remap_signed`] before use
    fn is_signed(&self) -> bool {
        false
    }
}

impl<T: NoiseSource + ?Sized> NoiseSource for &T {
    fn sample(&self, point: DVec3) -> f64 {
        (**self).sample(point)
    }

    fn is_signed(&self) -> bool {
        (**self).is_signed()
    }
}

impl<T: NoiseSource + ?Sized> NoiseSource for Box<T> {
    fn sample(&self, point: DVec3) -> f64 {
        (**self).sample(point)
    }

    fn is_signed(&self) -> bool {
        (**self).is_signed()
    }
}

/// Map a signed sample from `[-1, 1]` to `[0, 1]`
#[inline]
pub fn remap_signed(sample: f32) -> f32 {
    sample * 0.5 + 0.5
}

/// Value noise in `[0, 1]`
#[derive(Debug, Clone)]
pub struct ValueNoise {
    inner: Value,
}

impl ValueNoise {
    pub fn new(seed: u32) -> Self {
        Self { inner: Value::new(seed) }
    }
}

impl NoiseSource for ValueNoise {
    fn sample(&self, point: DVec3) -> f64 {
        // The crate's value noise is signed
        (self.inner.get(point.to_array()) * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

/// Perlin gradient noise in `[-1, 1]`
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    inner: Perlin,
}

impl PerlinNoise {
    pub fn new(seed: u32) -> Self {
        Self { inner: Perlin::new(seed) }
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, point: DVec3) -> f64 {
        self.inner.get(point.to_array()).clamp(-1.0, 1.0)
    }

    fn is_signed(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<DVec3> {
        (0..64)
            .map(|i| {
                let t = i as f64 * 0.37;
                DVec3::new(t.sin() * 3.1, t.cos() * 1.7 + 0.13, t * 0.29 - 4.4)
            })
            .collect()
    }

    #[test]
    fn test_value_noise_range() {
        let source = ValueNoise::new(LATTICE_SEED);
        for p in sample_points() {
            let v = source.sample(p);
            assert!((0.0..=1.0).contains(&v), "value noise {} at {:?}", v, p);
        }
        assert!(!source.is_signed());
    }

    #[test]
    fn test_perlin_noise_range() {
        let source = PerlinNoise::new(LATTICE_SEED);
        for p in sample_points() {
            let v = source.sample(p);
            assert!((-1.0..=1.0).contains(&v), "perlin noise {} at {:?}", v, p);
        }
        assert!(source.is_signed());
    }

    #[test]
    fn test_remap_signed_endpoints() {
        assert_eq!(remap_signed(-1.0), 0.0);
        assert_eq!(remap_signed(1.0), 1.0);
        assert_eq!(remap_signed(0.0), 0.5);
    }

    #[test]
    fn test_sources_deterministic() {
        let p = DVec3::new(0.31, -1.7, 2.2);
        for noise_type in [NoiseType::Value, NoiseType::Perlin] {
            let a = noise_type.source();
            let b = noise_type.source();
            assert_eq!(a.sample(p), b.sample(p));
        }
    }

    #[test]
    fn test_boxed_source_forwards_sign() {
        assert!(!NoiseType::Value.source().is_signed());
        assert!(NoiseType::Perlin.source().is_signed());
    }
}
