//! Cube-sphere planet surface generation
//!
//! A standalone library that builds a sphere mesh by projecting a subdivided
//! cube onto the unit sphere, and synthesizes one seamless texture per cube
//! face from layered noise, suitable for use with any game engine.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rust_cubesphere_planet::*;
//!
//! let config = SurfaceConfigBuilder::new()
//!     .seed(42)
//!     .resolution(32).unwrap()
//!     .texture_resolution(256).unwrap()
//!     .build().unwrap();
//!
//! let mut surface = SurfaceController::new(config).unwrap();
//! println!("Generated {} triangles", surface.mesh().triangle_count());
//!
//! // Ask for a new surface, then drive the controller from the frame loop
//! surface.regenerate(7).unwrap();
//! surface.advance(1.0).unwrap();
//! ```
//!
//! # Features
//!
//! - `serde`: Enables serialization support for configuration types
//! - `image`: Enables `FaceTexture::to_image` conversion to `image::RgbaImage`

// Modules
pub mod error;
pub mod config;
pub mod face;
pub mod projection;
pub mod mesh;
pub mod terrain;
pub mod texture;
pub mod controller;

// Re-export core types for convenience
pub use error::{SurfaceError, Result};
pub use config::{SurfaceConfig, SurfaceConfigBuilder, RESOLUTION_RANGE};
pub use face::{Axis, CubeFace, FaceDescriptor};
pub use projection::project;
pub use mesh::{FaceRange, PlanetMesh, Vertex};
pub use terrain::{fractal_sum, remap_signed, NoiseOffset, NoiseSettings, NoiseSource, NoiseType, PerlinNoise, ValueNoise};
pub use texture::{
    synthesize, ColorMapper, FaceTexture, FaceTextureSet, GradientMap, GradientMode, GradientStop,
    SurfaceColor, TextureSynthesizer,
};
pub use controller::{SurfaceController, SurfaceState};

// Re-export glam vectors for convenience
pub use glam::{DVec3, Vec3};
