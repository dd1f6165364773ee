//! Surface configuration and builder
//!
//! Every option is range-checked here, at the boundary. The mesh builder,
//! texture synthesizer and controller assume valid values once invoked.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SurfaceError};
use crate::terrain::{NoiseSettings, NoiseType, LACUNARITY_RANGE, OCTAVE_RANGE, PERSISTENCE_RANGE};
use crate::texture::{GradientMap, TEXTURE_RESOLUTION_RANGE};

/// Supported mesh subdivision range
pub const RESOLUTION_RANGE: std::ops::RangeInclusive<u32> = 2..=512;

/// Configuration for a cube-sphere planet surface
///
/// The same configuration always produces the same mesh and, for a given
/// seed, the same face textures.
///
/// # Example
///
/// ```rust
/// use rust_cubesphere_planet::*;
///
/// let config = SurfaceConfigBuilder::new()
///     .seed(42)
///     .resolution(16)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: SurfaceConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    /// Mesh subdivisions per face edge
    pub resolution: u32,

    /// Width and height of each face texture in texels
    pub texture_resolution: u32,

    /// Seed the initial noise offset is derived from
    pub seed: u32,

    /// Fractal noise family and parameters
    pub noise: NoiseSettings,

    /// Sphere radius in world units, fixed per instance
    pub radius: f32,

    /// Scalar to color mapping
    pub gradient: GradientMap,

    /// Seconds the controller stays restarting before it regenerates
    ///
    /// Matches the length of the host's shrink animation.
    pub restart_duration: f32,
}

impl SurfaceConfig {
    /// Re-check every option
    ///
    /// Needed for configurations that did not come from the builder, such as
    /// deserialized ones.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first out-of-range option.
    pub fn validate(&self) -> Result<()> {
        check_resolution(self.resolution)?;
        check_texture_resolution(self.texture_resolution)?;
        check_radius(self.radius)?;
        check_restart_duration(self.restart_duration)?;
        self.noise.validate()?;
        self.gradient.validate()
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        SurfaceConfigBuilder::new().build_unchecked()
    }
}

fn check_resolution(resolution: u32) -> Result<()> {
    if !RESOLUTION_RANGE.contains(&resolution) {
        return Err(SurfaceError::InvalidConfig(format!(
            "resolution must be in 2..=512 (got {})",
            resolution
        )));
    }
    Ok(())
}

fn check_texture_resolution(texture_resolution: u32) -> Result<()> {
    if !TEXTURE_RESOLUTION_RANGE.contains(&texture_resolution) {
        return Err(SurfaceError::InvalidConfig(format!(
            "texture resolution must be in 1..=4096 (got {})",
            texture_resolution
        )));
    }
    Ok(())
}

fn check_radius(radius: f32) -> Result<()> {
    if !(radius > 0.0 && radius.is_finite()) {
        return Err(SurfaceError::InvalidConfig(format!(
            "radius must be positive (got {})",
            radius
        )));
    }
    Ok(())
}

fn check_restart_duration(duration: f32) -> Result<()> {
    if !(duration >= 0.0 && duration.is_finite()) {
        return Err(SurfaceError::InvalidConfig(format!(
            "restart duration must be >= 0 (got {})",
            duration
        )));
    }
    Ok(())
}

/// Builder for creating SurfaceConfig with validation
///
/// # Example
///
/// ```rust
/// use rust_cubesphere_planet::*;
///
/// let config = SurfaceConfigBuilder::new()
///     .seed(12345)
///     .noise_type(NoiseType::Perlin)
///     .octaves(4)
///     .unwrap()
///     .texture_resolution(128)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.noise.lacunarity, 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct SurfaceConfigBuilder {
    resolution: u32,
    texture_resolution: u32,
    seed: Option<u32>,
    noise_type: NoiseType,
    octaves: u32,
    lacunarity: Option<f32>,
    persistence: Option<f32>,
    radius: f32,
    gradient: GradientMap,
    restart_duration: f32,
}

impl SurfaceConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - resolution: 32
    /// - texture_resolution: 256
    /// - seed: Random (generated from thread_rng)
    /// - noise_type: Value, with its family lacunarity and persistence
    /// - octaves: 6
    /// - radius: 1.0
    /// - gradient: [`GradientMap::planet`]
    /// - restart_duration: 0.5 seconds
    pub fn new() -> Self {
        Self {
            resolution: 32,
            texture_resolution: 256,
            seed: None,
            noise_type: NoiseType::default(),
            octaves: NoiseSettings::DEFAULT_OCTAVES,
            lacunarity: None,
            persistence: None,
            radius: 1.0,
            gradient: GradientMap::planet(),
            restart_duration: 0.5,
        }
    }

    /// Set the mesh subdivision resolution
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if resolution is outside 2..=512
    pub fn resolution(mut self, resolution: u32) -> Result<Self> {
        check_resolution(resolution)?;
        self.resolution = resolution;
        Ok(self)
    }

    /// Set the face texture size in texels
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the size is outside 1..=4096
    pub fn texture_resolution(mut self, texture_resolution: u32) -> Result<Self> {
        check_texture_resolution(texture_resolution)?;
        self.texture_resolution = texture_resolution;
        Ok(self)
    }

    /// Set the seed for the initial surface
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the noise family
    ///
    /// Frequency always follows the family; lacunarity and persistence follow
    /// it unless set explicitly.
    pub fn noise_type(mut self, noise_type: NoiseType) -> Self {
        self.noise_type = noise_type;
        self
    }

    /// Set the number of noise octaves
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if octaves is outside 1..=8
    pub fn octaves(mut self, octaves: u32) -> Result<Self> {
        if !OCTAVE_RANGE.contains(&octaves) {
            return Err(SurfaceError::InvalidConfig(format!(
                "octaves must be in 1..=8 (got {})",
                octaves
            )));
        }
        self.octaves = octaves;
        Ok(self)
    }

    /// Override the per-octave frequency multiplier
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if lacunarity is outside 1.0..=4.0
    pub fn lacunarity(mut self, lacunarity: f32) -> Result<Self> {
        if !LACUNARITY_RANGE.contains(&lacunarity) {
            return Err(SurfaceError::InvalidConfig(format!(
                "lacunarity must be in 1.0..=4.0 (got {})",
                lacunarity
            )));
        }
        self.lacunarity = Some(lacunarity);
        Ok(self)
    }

    /// Override the per-octave amplitude multiplier
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if persistence is outside 0.0..=1.0
    pub fn persistence(mut self, persistence: f32) -> Result<Self> {
        if !PERSISTENCE_RANGE.contains(&persistence) {
            return Err(SurfaceError::InvalidConfig(format!(
                "persistence must be in 0.0..=1.0 (got {})",
                persistence
            )));
        }
        self.persistence = Some(persistence);
        Ok(self)
    }

    /// Set the sphere radius
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if radius <= 0.0
    pub fn radius(mut self, radius: f32) -> Result<Self> {
        check_radius(radius)?;
        self.radius = radius;
        Ok(self)
    }

    /// Set the scalar to color gradient
    pub fn gradient(mut self, gradient: GradientMap) -> Self {
        self.gradient = gradient;
        self
    }

    /// Set how long the controller waits in the restarting state
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the duration is negative
    pub fn restart_duration(mut self, seconds: f32) -> Result<Self> {
        check_restart_duration(seconds)?;
        self.restart_duration = seconds;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<SurfaceConfig> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    fn build_unchecked(self) -> SurfaceConfig {
        let seed = self.seed.unwrap_or_else(rand::random);
        let family = NoiseSettings::for_type(self.noise_type);
        let noise = NoiseSettings {
            octaves: self.octaves,
            lacunarity: self.lacunarity.unwrap_or(family.lacunarity),
            persistence: self.persistence.unwrap_or(family.persistence),
            ..family
        };

        SurfaceConfig {
            resolution: self.resolution,
            texture_resolution: self.texture_resolution,
            seed,
            noise,
            radius: self.radius,
            gradient: self.gradient,
            restart_duration: self.restart_duration,
        }
    }
}

impl Default for SurfaceConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
