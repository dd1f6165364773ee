//! Fractal (multi-octave) noise summation
//!
//! Layers successive samples of a [`NoiseSource`] at increasing frequency and
//! decreasing amplitude, then normalizes by the summed amplitudes so the
//! result stays in the source's own output range.

use glam::DVec3;

use super::{NoiseSource, NoiseType};
use crate::error::{Result, SurfaceError};

/// Supported octave count range
pub const OCTAVE_RANGE: std::ops::RangeInclusive<u32> = 1..=8;
/// Supported lacunarity range
pub const LACUNARITY_RANGE: std::ops::RangeInclusive<f32> = 1.0..=4.0;
/// Supported persistence range
pub const PERSISTENCE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=1.0;

/// Configuration for fractal noise sampling
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseSettings {
    /// Noise family to sample
    pub noise_type: NoiseType,
    /// Frequency of the first octave (fixed per family)
    pub frequency: f32,
    /// Number of octaves to layer
    pub octaves: u32,
    /// Frequency multiplier per octave
    pub lacunarity: f32,
    /// Amplitude multiplier per octave
    pub persistence: f32,
}

impl NoiseSettings {
    /// Default octave count
    pub const DEFAULT_OCTAVES: u32 = 6;

    /// Family tuning constants
    ///
    /// The two families differ in native smoothness, so they need different
    /// frequency and falloff to produce comparable terrain scale.
    pub fn for_type(noise_type: NoiseType) -> Self {
        match noise_type {
            NoiseType::Value => Self {
                noise_type,
                frequency: 1.75,
                octaves: Self::DEFAULT_OCTAVES,
                lacunarity: 2.0,
                persistence: 0.5,
            },
            NoiseType::Perlin => Self {
                noise_type,
                frequency: 1.6,
                octaves: Self::DEFAULT_OCTAVES,
                lacunarity: 4.0,
                persistence: 0.25,
            },
        }
    }

    /// Check every parameter against its documented bounds
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first out-of-range parameter.
    pub fn validate(&self) -> Result<()> {
        if !OCTAVE_RANGE.contains(&self.octaves) {
            return Err(SurfaceError::InvalidConfig(format!(
                "octaves must be in 1..=8 (got {})",
                self.octaves
            )));
        }
        if !LACUNARITY_RANGE.contains(&self.lacunarity) {
            return Err(SurfaceError::InvalidConfig(format!(
                "lacunarity must be in 1.0..=4.0 (got {})",
                self.lacunarity
            )));
        }
        if !PERSISTENCE_RANGE.contains(&self.persistence) {
            return Err(SurfaceError::InvalidConfig(format!(
                "persistence must be in 0.0..=1.0 (got {})",
                self.persistence
            )));
        }
        if !(self.frequency > 0.0) {
            return Err(SurfaceError::InvalidConfig(format!(
                "frequency must be positive (got {})",
                self.frequency
            )));
        }
        Ok(())
    }

    /// Sample the fractal sum of `source` with these settings
    #[inline]
    pub fn sample<S: NoiseSource + ?Sized>(&self, source: &S, point: DVec3) -> f32 {
        fractal_sum(
            source,
            point,
            self.frequency as f64,
            self.octaves,
            self.lacunarity as f64,
            self.persistence as f64,
        ) as f32
    }
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self::for_type(NoiseType::default())
    }
}

/// Sum `octaves` layers of noise
///
/// The first octave samples at `frequency` with amplitude 1; each further
/// octave multiplies frequency by `lacunarity` and amplitude by
/// `persistence`. The sum is divided by the total amplitude. An `octaves`
/// of 0 is treated as 1. Runs in `f64`: with lacunarity 4 the top octave
/// samples far from the origin, where `f32` no longer resolves the lattice.
pub fn fractal_sum<S: NoiseSource + ?Sized>(
    source: &S,
    point: DVec3,
    frequency: f64,
    octaves: u32,
    lacunarity: f64,
    persistence: f64,
) -> f64 {
    let mut frequency = frequency;
    let mut sum = source.sample(point * frequency);
    let mut amplitude = 1.0;
    let mut range = 1.0;

    for _ in 1..octaves {
        frequency *= lacunarity;
        amplitude *= persistence;
        range += amplitude;
        sum += source.sample(point * frequency) * amplitude;
    }

    sum / range
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{PerlinNoise, ValueNoise, LATTICE_SEED};

    /// Same value everywhere
    struct Constant(f64);

    impl NoiseSource for Constant {
        fn sample(&self, _point: DVec3) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_family_constants() {
        let value = NoiseSettings::for_type(NoiseType::Value);
        assert_eq!((value.frequency, value.lacunarity, value.persistence), (1.75, 2.0, 0.5));

        let perlin = NoiseSettings::for_type(NoiseType::Perlin);
        assert_eq!((perlin.frequency, perlin.lacunarity, perlin.persistence), (1.6, 4.0, 0.25));
    }

    #[test]
    fn test_constant_source_is_normalized() {
        // A constant field must sum back to the same constant
        for octaves in 1..=8 {
            let v = fractal_sum(&Constant(0.75), DVec3::ONE, 1.0, octaves, 2.0, 0.5);
            assert!((v - 0.75).abs() < 1e-12, "octaves {} gave {}", octaves, v);
        }
    }

    #[test]
    fn test_zero_persistence_keeps_first_octave() {
        let source = ValueNoise::new(LATTICE_SEED);
        let p = DVec3::new(0.4, 1.3, -0.8);
        let single = fractal_sum(&source, p, 1.75, 1, 2.0, 0.5);
        let flat = fractal_sum(&source, p, 1.75, 5, 2.0, 0.0);
        assert_eq!(single, flat);
    }

    #[test]
    fn test_value_sum_in_unit_range() {
        let source = ValueNoise::new(LATTICE_SEED);
        let settings = NoiseSettings::for_type(NoiseType::Value);
        for i in 0..50 {
            let p = DVec3::new(i as f64 * 0.11, 0.5 - i as f64 * 0.07, 1.0 + i as f64 * 0.03);
            let v = settings.sample(&source, p);
            assert!((0.0..=1.0).contains(&v), "value fractal {} out of range", v);
        }
    }

    #[test]
    fn test_perlin_sum_in_signed_range() {
        let source = PerlinNoise::new(LATTICE_SEED);
        let settings = NoiseSettings::for_type(NoiseType::Perlin);
        for i in 0..50 {
            let p = DVec3::new(i as f64 * 0.13, -0.2 + i as f64 * 0.05, 0.9 - i as f64 * 0.02);
            let v = settings.sample(&source, p);
            assert!((-1.0..=1.0).contains(&v), "perlin fractal {} out of range", v);
        }
    }

    #[test]
    fn test_top_octave_resolves_far_from_origin() {
        // Offset-sized coordinates scaled to the eighth Perlin octave
        let source = PerlinNoise::new(LATTICE_SEED);
        let point = DVec3::new(987.654_321, -432.1, 765.4);
        let step = 1e-6;
        let top = 1.6 * 4.0_f64.powi(7);
        let a = fractal_sum(&source, point, top, 1, 4.0, 0.25);
        let b = fractal_sum(&source, point + DVec3::X * step, top, 1, 4.0, 0.25);
        assert_ne!(a, b, "neighbouring points collapsed onto one lattice sample");
    }

    #[test]
    fn test_validate_bounds() {
        let mut settings = NoiseSettings::default();
        assert!(settings.validate().is_ok());

        settings.octaves = 0;
        assert!(settings.validate().is_err());
        settings.octaves = 9;
        assert!(settings.validate().is_err());
        settings.octaves = 8;

        settings.lacunarity = 0.5;
        assert!(settings.validate().is_err());
        settings.lacunarity = 4.0;

        settings.persistence = 1.5;
        assert!(settings.validate().is_err());
        settings.persistence = 0.0;
        assert!(settings.validate().is_ok());
    }
}
