//! Procedural face texture synthesis
//!
//! For every texel of a face, finds the matching point on the sphere, moves
//! it by the noise offset, samples fractal noise there and maps the scalar
//! through a [`ColorMapper`]. All faces share the offset and noise settings,
//! so texels that meet at a seam sample the same noise.

mod gradient;

pub use gradient::{ColorMapper, GradientMap, GradientMode, GradientStop, SurfaceColor};

use crate::error::{Result, SurfaceError};
use crate::face::CubeFace;
use crate::projection::project;
use crate::terrain::{remap_signed, NoiseOffset, NoiseSettings, NoiseSource};

/// Supported texture resolution range
pub const TEXTURE_RESOLUTION_RANGE: std::ops::RangeInclusive<u32> = 1..=4096;

/// Square color image for one face
///
/// Row `y = 0` is the `v = 0` edge of the face UV space, so the pixel at
/// `(x, y)` covers UV `((x + 0.5) / size, (y + 0.5) / size)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceTexture {
    face: CubeFace,
    size: u32,
    pixels: Vec<SurfaceColor>,
}

impl FaceTexture {
    #[inline]
    pub fn face(&self) -> CubeFace {
        self.face
    }

    /// Width and height in texels
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Row-major texel colors
    #[inline]
    pub fn pixels(&self) -> &[SurfaceColor] {
        &self.pixels
    }

    /// Color at `(x, y)`, `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<SurfaceColor> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.pixels.get((y * self.size + x) as usize).copied()
    }

    /// Quantize to tightly packed 8-bit RGBA, rows in texture order
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| quantize(*c)).collect()
    }

    /// Convert to an `image::RgbaImage`
    ///
    /// Images store their first row at the top, so rows are flipped to keep
    /// `v = 0` at the bottom.
    #[cfg(feature = "image")]
    pub fn to_image(&self) -> image::RgbaImage {
        let size = self.size;
        image::RgbaImage::from_fn(size, size, |x, y| {
            let color = self.pixels[((size - 1 - y) * size + x) as usize];
            image::Rgba(quantize(color))
        })
    }
}

#[inline]
fn quantize(color: SurfaceColor) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// The six face textures of one regeneration
///
/// Always complete: a set is only constructed once every face is synthesized.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceTextureSet {
    offset: NoiseOffset,
    faces: [FaceTexture; 6],
}

impl FaceTextureSet {
    /// Noise offset the set was synthesized with
    #[inline]
    pub fn offset(&self) -> NoiseOffset {
        self.offset
    }

    #[inline]
    pub fn face(&self, face: CubeFace) -> &FaceTexture {
        &self.faces[face.id()]
    }

    /// Textures in face-id order
    pub fn iter(&self) -> impl Iterator<Item = &FaceTexture> {
        self.faces.iter()
    }
}

/// Synthesizes face textures from an explicit noise capability
pub struct TextureSynthesizer<S> {
    source: S,
    settings: NoiseSettings,
    offset: NoiseOffset,
    resolution: u32,
    texture_resolution: u32,
}

impl<S: NoiseSource> TextureSynthesizer<S> {
    /// Create a synthesizer for a mesh resolution and texture size
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `resolution < 2`, `texture_resolution` is
    /// outside `1..=4096`, or the noise settings are out of bounds.
    pub fn new(
        source: S,
        settings: NoiseSettings,
        offset: NoiseOffset,
        resolution: u32,
        texture_resolution: u32,
    ) -> Result<Self> {
        if resolution < 2 {
            return Err(SurfaceError::InvalidConfig(format!(
                "mesh resolution must be >= 2 (got {})",
                resolution
            )));
        }
        if !TEXTURE_RESOLUTION_RANGE.contains(&texture_resolution) {
            return Err(SurfaceError::InvalidConfig(format!(
                "texture resolution must be in 1..=4096 (got {})",
                texture_resolution
            )));
        }
        settings.validate()?;

        Ok(Self {
            source,
            settings,
            offset,
            resolution,
            texture_resolution,
        })
    }

    #[inline]
    pub fn offset(&self) -> NoiseOffset {
        self.offset
    }

    /// Noise scalar in `[0, 1]` at face coordinates `(u, v)` in cube-grid units
    pub fn sample_scalar(&self, face: CubeFace, u: f32, v: f32) -> f32 {
        let r = self.resolution as f32;
        let cube = face.descriptor().cube_point(u, v, r);
        let point = project(cube, r).as_dvec3() + self.offset.as_dvec3();

        let sample = self.settings.sample(&self.source, point);
        if self.source.is_signed() {
            remap_signed(sample)
        } else {
            sample
        }
    }

    /// Synthesize the texture of one face
    pub fn synthesize<C: ColorMapper + ?Sized>(&self, face: CubeFace, colors: &C) -> FaceTexture {
        let size = self.texture_resolution;
        let scale = self.resolution as f32 / size as f32;
        let mut pixels = Vec::with_capacity((size * size) as usize);

        for y in 0..size {
            for x in 0..size {
                let u = (x as f32 + 0.5) * scale;
                let v = (y as f32 + 0.5) * scale;
                pixels.push(colors.map_color(self.sample_scalar(face, u, v)));
            }
        }

        FaceTexture { face, size, pixels }
    }

    /// Synthesize all six faces as one set
    pub fn synthesize_all<C: ColorMapper + ?Sized>(&self, colors: &C) -> FaceTextureSet {
        let faces = CubeFace::ALL.map(|face| self.synthesize(face, colors));
        log::debug!(
            "synthesized six {}x{} face textures at offset {:?}",
            self.texture_resolution,
            self.texture_resolution,
            self.offset
        );
        FaceTextureSet {
            offset: self.offset,
            faces,
        }
    }
}

/// Synthesize one face texture with the noise family named in `settings`
///
/// # Errors
///
/// Returns `InvalidConfig` for out-of-range resolutions, noise settings or
/// an unordered gradient.
pub fn synthesize(
    resolution: u32,
    texture_resolution: u32,
    face: CubeFace,
    offset: NoiseOffset,
    settings: &NoiseSettings,
    gradient: &GradientMap,
) -> Result<FaceTexture> {
    gradient.validate()?;
    let synthesizer = TextureSynthesizer::new(
        settings.noise_type.source(),
        *settings,
        offset,
        resolution,
        texture_resolution,
    )?;
    Ok(synthesizer.synthesize(face, gradient))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::NoiseType;
    use glam::DVec3;
    use std::collections::HashMap;

    /// Signed source pinned to one value
    struct Pinned(f64);

    impl NoiseSource for Pinned {
        fn sample(&self, _point: DVec3) -> f64 {
            self.0
        }

        fn is_signed(&self) -> bool {
            true
        }
    }

    fn synthesizer(
        noise_type: NoiseType,
        seed: u32,
        resolution: u32,
        texture_resolution: u32,
    ) -> TextureSynthesizer<Box<dyn NoiseSource>> {
        TextureSynthesizer::new(
            noise_type.source(),
            NoiseSettings::for_type(noise_type),
            NoiseOffset::from_seed(seed),
            resolution,
            texture_resolution,
        )
        .unwrap()
    }

    #[test]
    fn test_scenario_seed_42() {
        let gradient = GradientMap::planet();
        let first = synthesizer(NoiseType::Value, 42, 4, 8).synthesize_all(&gradient);
        let again = synthesizer(NoiseType::Value, 42, 4, 8).synthesize_all(&gradient);
        let other = synthesizer(NoiseType::Value, 43, 4, 8).synthesize_all(&gradient);

        for texture in first.iter() {
            assert_eq!(texture.size(), 8);
            assert_eq!(texture.pixels().len(), 64);
        }
        assert_eq!(first, again, "same seed must reproduce identical textures");

        for face in CubeFace::ALL {
            assert_ne!(
                first.face(face).pixels(),
                other.face(face).pixels(),
                "seed 43 left {:?} unchanged",
                face
            );
        }
    }

    #[test]
    fn test_perlin_deterministic() {
        let gradient = GradientMap::planet();
        let a = synthesizer(NoiseType::Perlin, 7, 8, 16).synthesize_all(&gradient);
        let b = synthesizer(NoiseType::Perlin, 7, 8, 16).synthesize_all(&gradient);
        assert_eq!(a, b);
    }

    #[test]
    fn test_texel_centers_map_to_grid() {
        // Non-integer ratio: 3 grid cells spread over 5 texels
        let gradient = GradientMap::planet();
        let synth = synthesizer(NoiseType::Value, 42, 3, 5);
        let scale = 3.0 / 5.0;
        for face in CubeFace::ALL {
            let texture = synth.synthesize(face, &gradient);
            for y in 0..5 {
                for x in 0..5 {
                    let u = (x as f32 + 0.5) * scale;
                    let v = (y as f32 + 0.5) * scale;
                    let expected = gradient.map_color(synth.sample_scalar(face, u, v));
                    assert_eq!(texture.pixel(x, y), Some(expected), "{:?} texel ({}, {})", face, x, y);
                }
            }
        }
    }

    #[test]
    fn test_texel_rows_follow_v() {
        // Rows advance along v
        let gradient = GradientMap::planet();
        let synth = synthesizer(NoiseType::Value, 42, 4, 4);
        let texture = synth.synthesize(CubeFace::PosY, &gradient);
        let expected = gradient.map_color(synth.sample_scalar(CubeFace::PosY, 0.5, 3.5));
        assert_eq!(texture.pixel(0, 3), Some(expected));
        assert_eq!(texture.pixels()[3 * 4], expected);
    }

    #[test]
    fn test_large_offset_keeps_neighbouring_texels_apart() {
        let settings = NoiseSettings::for_type(NoiseType::Perlin);
        let offset = NoiseOffset::new(999.9, -999.9, 999.9);
        let synth = TextureSynthesizer::new(NoiseType::Perlin.source(), settings, offset, 512, 4096).unwrap();
        let step = 512.0 / 4096.0;
        let samples: Vec<f32> = (0..8)
            .map(|i| synth.sample_scalar(CubeFace::PosX, 256.0 + i as f32 * step, 256.0))
            .collect();
        let distinct = samples.windows(2).filter(|w| w[0] != w[1]).count();
        assert_eq!(distinct, samples.len() - 1, "adjacent texels collapsed: {:?}", samples);
    }

    #[test]
    fn test_scalars_in_unit_range() {
        for noise_type in [NoiseType::Value, NoiseType::Perlin] {
            let synth = synthesizer(noise_type, 9, 4, 16);
            for face in CubeFace::ALL {
                for i in 0..16 {
                    let t = (i as f32 + 0.5) * 0.25;
                    let s = synth.sample_scalar(face, t, 4.0 - t);
                    assert!((0.0..=1.0).contains(&s), "{:?} scalar {}", noise_type, s);
                }
            }
        }
    }

    #[test]
    fn test_seams_sample_same_noise() {
        let r = 4_u32;
        let steps = 16;
        for noise_type in [NoiseType::Value, NoiseType::Perlin] {
            let synth = synthesizer(noise_type, 42, r, 8);
            let mut shared: HashMap<[u32; 3], Vec<(CubeFace, f32)>> = HashMap::new();

            for face in CubeFace::ALL {
                for i in 0..=steps {
                    for j in 0..=steps {
                        if i != 0 && i != steps && j != 0 && j != steps {
                            continue;
                        }
                        let u = r as f32 * i as f32 / steps as f32;
                        let v = r as f32 * j as f32 / steps as f32;
                        let key = face
                            .descriptor()
                            .cube_point(u, v, r as f32)
                            .to_array()
                            .map(f32::to_bits);
                        shared
                            .entry(key)
                            .or_default()
                            .push((face, synth.sample_scalar(face, u, v)));
                    }
                }
            }

            for (key, samples) in &shared {
                assert!(samples.len() >= 2, "edge point {:?} belongs to one face", key);
                let (_, reference) = samples[0];
                for &(face, value) in &samples[1..] {
                    assert!(
                        (value - reference).abs() < 1e-6,
                        "{:?} seam mismatch on {:?}: {} vs {}",
                        noise_type,
                        face,
                        value,
                        reference
                    );
                }
            }
        }
    }

    #[test]
    fn test_signed_extremes_remap() {
        let gradient = GradientMap::planet();
        let stops = gradient.stops();
        let settings = NoiseSettings::for_type(NoiseType::Perlin);

        let low = TextureSynthesizer::new(Pinned(-1.0), settings, NoiseOffset::default(), 4, 2).unwrap();
        assert_eq!(low.sample_scalar(CubeFace::PosZ, 1.0, 1.0), 0.0);
        let texture = low.synthesize(CubeFace::PosZ, &gradient);
        assert!(texture.pixels().iter().all(|c| *c == stops[0].color));

        let high = TextureSynthesizer::new(Pinned(1.0), settings, NoiseOffset::default(), 4, 2).unwrap();
        assert_eq!(high.sample_scalar(CubeFace::PosZ, 1.0, 1.0), 1.0);
        let texture = high.synthesize(CubeFace::PosZ, &gradient);
        assert!(texture.pixels().iter().all(|c| *c == stops[stops.len() - 1].color));
    }

    #[test]
    fn test_synthesize_matches_synthesizer() {
        let settings = NoiseSettings::for_type(NoiseType::Value);
        let gradient = GradientMap::planet();
        let offset = NoiseOffset::from_seed(5);
        let single = synthesize(4, 8, CubeFace::NegY, offset, &settings, &gradient).unwrap();
        let set = synthesizer(NoiseType::Value, 5, 4, 8).synthesize_all(&gradient);
        assert_eq!(&single, set.face(CubeFace::NegY));
    }

    #[test]
    fn test_invalid_parameters() {
        let settings = NoiseSettings::default();
        let gradient = GradientMap::planet();
        let offset = NoiseOffset::default();
        assert!(synthesize(1, 8, CubeFace::PosX, offset, &settings, &gradient).is_err());
        assert!(synthesize(4, 0, CubeFace::PosX, offset, &settings, &gradient).is_err());

        let bad = NoiseSettings { octaves: 0, ..settings };
        assert!(synthesize(4, 8, CubeFace::PosX, offset, &bad, &gradient).is_err());
    }

    #[test]
    fn test_invalid_gradient_rejected() {
        let settings = NoiseSettings::default();
        let offset = NoiseOffset::default();
        let empty = GradientMap::unchecked(Vec::new(), GradientMode::Blend);
        assert!(matches!(
            synthesize(4, 8, CubeFace::PosX, offset, &settings, &empty),
            Err(SurfaceError::InvalidConfig(_))
        ));

        let stops = vec![
            GradientStop::new(0.8, [1.0, 1.0, 1.0, 1.0]),
            GradientStop::new(0.2, [0.0, 0.0, 0.0, 1.0]),
        ];
        let unordered = GradientMap::unchecked(stops, GradientMode::Blend);
        assert!(synthesize(4, 8, CubeFace::PosX, offset, &settings, &unordered).is_err());
    }

    #[test]
    fn test_rgba8_quantization() {
        let texture = FaceTexture {
            face: CubeFace::PosX,
            size: 1,
            pixels: vec![[0.0, 0.5, 1.0, 1.0]],
        };
        assert_eq!(texture.to_rgba8(), vec![0, 128, 255, 255]);
        assert_eq!(texture.pixel(0, 0), Some([0.0, 0.5, 1.0, 1.0]));
        assert_eq!(texture.pixel(1, 0), None);
    }
}
