//! Color mapping from noise scalars

use crate::error::{Result, SurfaceError};

/// RGBA color type
pub type SurfaceColor = [f32; 4];

/// Trait for mapping a scalar in `[0, 1]` to a color
pub trait ColorMapper {
    /// Map a scalar to an RGBA color, clamping out-of-range input
    fn map_color(&self, value: f32) -> SurfaceColor;
}

/// How colors between two stops are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GradientMode {
    /// Linear interpolation between the bracketing stops
    #[default]
    Blend,
    /// Color of the next stop at or above the scalar
    Fixed,
}

/// A single gradient control point
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientStop {
    /// Position in `[0, 1]`
    pub position: f32,
    pub color: SurfaceColor,
}

impl GradientStop {
    pub fn new(position: f32, color: SurfaceColor) -> Self {
        Self { position, color }
    }
}

/// Piecewise gradient over `[0, 1]`
///
/// Inputs below the first stop take the first color, inputs above the last
/// stop take the last color.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientMap {
    stops: Vec<GradientStop>,
    mode: GradientMode,
}

impl GradientMap {
    /// Create a blending gradient from ordered stops
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `stops` is empty, a position lies outside
    /// `[0, 1]`, or positions decrease.
    pub fn new(stops: Vec<GradientStop>) -> Result<Self> {
        Self::with_mode(stops, GradientMode::Blend)
    }

    /// Create a gradient with an explicit mode
    ///
    /// # Errors
    ///
    /// Same as [`GradientMap::new`].
    pub fn with_mode(stops: Vec<GradientStop>, mode: GradientMode) -> Result<Self> {
        let gradient = Self { stops, mode };
        gradient.validate()?;
        Ok(gradient)
    }

    /// Check the stop list invariants
    ///
    /// Deserialized gradients skip the constructors, so configuration
    /// validation runs this again.
    ///
    /// # Errors
    ///
    /// Same as [`GradientMap::new`].
    pub fn validate(&self) -> Result<()> {
        if self.stops.is_empty() {
            return Err(SurfaceError::InvalidConfig(
                "gradient needs at least one stop".to_string(),
            ));
        }
        for stop in &self.stops {
            if !(0.0..=1.0).contains(&stop.position) {
                return Err(SurfaceError::InvalidConfig(format!(
                    "gradient stop position must be in [0, 1] (got {})",
                    stop.position
                )));
            }
        }
        if self.stops.windows(2).any(|w| w[1].position < w[0].position) {
            return Err(SurfaceError::InvalidConfig(
                "gradient stops must be ordered by position".to_string(),
            ));
        }
        Ok(())
    }

    /// Default planet gradient, deep ocean through shoreline to snow caps
    pub fn planet() -> Self {
        Self {
            stops: vec![
                GradientStop::new(0.0, [0.02, 0.08, 0.28, 1.0]),  // Deep ocean
                GradientStop::new(0.42, [0.08, 0.32, 0.62, 1.0]), // Shallows
                GradientStop::new(0.5, [0.86, 0.8, 0.55, 1.0]),   // Sand
                GradientStop::new(0.55, [0.3, 0.6, 0.2, 1.0]),    // Grass
                GradientStop::new(0.68, [0.12, 0.4, 0.12, 1.0]),  // Forest
                GradientStop::new(0.82, [0.48, 0.44, 0.4, 1.0]),  // Rock
                GradientStop::new(1.0, [0.96, 0.96, 1.0, 1.0]),   // Snow
            ],
            mode: GradientMode::Blend,
        }
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn mode(&self) -> GradientMode {
        self.mode
    }

    /// Evaluate the gradient at `value`, clamped to `[0, 1]`
    ///
    /// NaN takes the first stop's color. A gradient with no stops, which only
    /// an unvalidated deserialized value can hold, evaluates to opaque black.
    pub fn evaluate(&self, value: f32) -> SurfaceColor {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return [0.0, 0.0, 0.0, 1.0];
        };
        if value.is_nan() {
            return first.color;
        }
        let t = value.clamp(0.0, 1.0);

        if t <= first.position {
            return first.color;
        }
        if t >= last.position || self.stops.len() < 2 {
            return last.color;
        }

        // Unordered stops can push the split point to either end
        let upper = self
            .stops
            .partition_point(|s| s.position < t)
            .clamp(1, self.stops.len() - 1);
        let hi = self.stops[upper];
        let lo = self.stops[upper - 1];

        match self.mode {
            GradientMode::Fixed => hi.color,
            GradientMode::Blend => {
                let span = hi.position - lo.position;
                if span <= 0.0 {
                    return hi.color;
                }
                let f = (t - lo.position) / span;
                let mut color = [0.0; 4];
                for (c, (a, b)) in color.iter_mut().zip(lo.color.iter().zip(&hi.color)) {
                    *c = a * (1.0 - f) + b * f;
                }
                color
            }
        }
    }
}

#[cfg(test)]
impl GradientMap {
    /// Build without validation, standing in for a deserialized value
    pub(crate) fn unchecked(stops: Vec<GradientStop>, mode: GradientMode) -> Self {
        Self { stops, mode }
    }
}

impl Default for GradientMap {
    fn default() -> Self {
        Self::planet()
    }
}

impl ColorMapper for GradientMap {
    fn map_color(&self, value: f32) -> SurfaceColor {
        self.evaluate(value)
    }
}
