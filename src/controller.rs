//! Surface regeneration controller
//!
//! Owns the mesh and the current face texture set, and sequences
//! regeneration requests through a two-state machine:
//!
//! ```text
//! Active --regenerate(seed)--> Restarting --finish_restart / advance--> Active
//! ```
//!
//! The host drives it once per frame with [`SurfaceController::advance`] and
//! plays its shrink animation while the controller is restarting.

use crate::config::SurfaceConfig;
use crate::error::{Result, SurfaceError};
use crate::mesh::PlanetMesh;
use crate::terrain::NoiseOffset;
use crate::texture::{FaceTextureSet, TextureSynthesizer};

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SurfaceState {
    /// Showing the current surface
    Active,
    /// A new seed is recorded; textures are replaced when the restart completes
    Restarting,
}

/// Mutable owner of a planet surface
///
/// # Example
///
/// ```rust
/// use rust_cubesphere_planet::*;
///
/// let config = SurfaceConfigBuilder::new()
///     .seed(42)
///     .resolution(4)
///     .unwrap()
///     .texture_resolution(8)
///     .unwrap()
///     .restart_duration(0.25)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let mut surface = SurfaceController::new(config).unwrap();
/// surface.regenerate(7).unwrap();
/// assert_eq!(surface.state(), SurfaceState::Restarting);
///
/// assert!(surface.advance(0.5).unwrap());
/// assert_eq!(surface.state(), SurfaceState::Active);
/// assert_eq!(surface.texture_generation(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SurfaceController {
    config: SurfaceConfig,
    mesh: PlanetMesh,
    textures: FaceTextureSet,
    state: SurfaceState,
    seed: u32,
    pending_seed: Option<u32>,
    // Seconds; f64 so frame-sized steps keep registering in long sessions
    clock: f64,
    transition_at: f64,
    generation: u64,
}

impl SurfaceController {
    /// Build the mesh and the initial textures for `config.seed`
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for out-of-range options and `Consistency` if
    /// the mesh builder breaks an invariant.
    pub fn new(config: SurfaceConfig) -> Result<Self> {
        config.validate()?;
        let mesh = PlanetMesh::build(config.resolution, config.radius)?;
        let textures = synthesize_set(&config, config.seed)?;
        log::info!(
            "surface ready: resolution {}, {}x{} textures, seed {}",
            config.resolution,
            config.texture_resolution,
            config.texture_resolution,
            config.seed
        );

        Ok(Self {
            seed: config.seed,
            pending_seed: None,
            config,
            mesh,
            textures,
            state: SurfaceState::Active,
            clock: 0.0,
            transition_at: 0.0,
            generation: 0,
        })
    }

    /// Request a new surface for `seed`
    ///
    /// Records the seed as pending along with the transition time and enters
    /// `Restarting`. The current textures and [`SurfaceController::seed`] stay
    /// in place until the restart completes.
    ///
    /// # Errors
    ///
    /// Returns `RegenerationPending` if a restart is already in progress.
    pub fn regenerate(&mut self, seed: u32) -> Result<()> {
        if self.state == SurfaceState::Restarting {
            return Err(SurfaceError::RegenerationPending);
        }
        self.pending_seed = Some(seed);
        self.transition_at = self.clock;
        self.state = SurfaceState::Restarting;
        log::info!("surface restarting with seed {} at t={:.3}", seed, self.clock);
        Ok(())
    }

    /// Advance the controller clock by `delta_time` seconds
    ///
    /// Completes a pending restart once `restart_duration` has elapsed since
    /// the request. Returns whether the textures were replaced.
    ///
    /// # Errors
    ///
    /// Propagates synthesis failures; the previous textures stay in effect.
    pub fn advance(&mut self, delta_time: f32) -> Result<bool> {
        self.clock += delta_time.max(0.0) as f64;
        if self.state == SurfaceState::Restarting
            && self.clock - self.transition_at >= self.config.restart_duration as f64
        {
            return self.finish_restart();
        }
        Ok(false)
    }

    /// Complete a pending restart now
    ///
    /// Hosts whose shrink animation signals completion itself call this
    /// instead of waiting for [`SurfaceController::advance`]. Derives the
    /// offset for the pending seed, synthesizes all six faces and swaps the
    /// set in whole. Returns `false` when no restart was pending.
    ///
    /// # Errors
    ///
    /// Propagates synthesis failures; the previous textures stay in effect.
    pub fn finish_restart(&mut self) -> Result<bool> {
        let Some(seed) = self.pending_seed else {
            return Ok(false);
        };

        let textures = synthesize_set(&self.config, seed)?;
        self.textures = textures;
        self.seed = seed;
        self.pending_seed = None;
        self.generation += 1;
        self.state = SurfaceState::Active;
        self.transition_at = self.clock;
        log::info!(
            "surface active with seed {} (texture generation {})",
            self.seed,
            self.generation
        );
        Ok(true)
    }

    /// Rebuild the mesh and textures at a new subdivision resolution
    ///
    /// Both are replaced only after the new ones are complete. The textures
    /// keep the active seed; a pending restart stays pending and still swaps
    /// in its own seed when it completes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the resolution is outside 2..=512.
    pub fn set_resolution(&mut self, resolution: u32) -> Result<()> {
        let config = SurfaceConfig {
            resolution,
            ..self.config.clone()
        };
        config.validate()?;

        let mesh = PlanetMesh::build(resolution, config.radius)?;
        let textures = synthesize_set(&config, self.seed)?;

        self.config = config;
        self.mesh = mesh;
        self.textures = textures;
        self.generation += 1;
        Ok(())
    }

    #[inline]
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    /// Seed of the textures currently in effect
    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Seed recorded by [`SurfaceController::regenerate`], until the restart completes
    #[inline]
    pub fn pending_seed(&self) -> Option<u32> {
        self.pending_seed
    }

    #[inline]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    #[inline]
    pub fn mesh(&self) -> &PlanetMesh {
        &self.mesh
    }

    /// The complete texture set currently in effect
    #[inline]
    pub fn textures(&self) -> &FaceTextureSet {
        &self.textures
    }

    /// Incremented on every texture set replacement
    ///
    /// Renderers re-upload the six images when this changes.
    #[inline]
    pub fn texture_generation(&self) -> u64 {
        self.generation
    }

    /// Seconds since the last state transition
    #[inline]
    pub fn elapsed_since_transition(&self) -> f32 {
        (self.clock - self.transition_at) as f32
    }
}

fn synthesize_set(config: &SurfaceConfig, seed: u32) -> Result<FaceTextureSet> {
    let synthesizer = TextureSynthesizer::new(
        config.noise.noise_type.source(),
        config.noise,
        NoiseOffset::from_seed(seed),
        config.resolution,
        config.texture_resolution,
    )?;
    Ok(synthesizer.synthesize_all(&config.gradient))
}
