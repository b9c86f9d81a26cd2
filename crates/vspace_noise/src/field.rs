use crate::color::{classify, BandTable, ColorMode, PixelColor};
use crate::fractal::OctaveParameters;
use crate::lattice::LatticeNoise;
use glam::Vec2;

/// Smallest usable zoom; anything below is sampled as this value.
pub const MIN_SCALE: f32 = 1.0e-3;
/// Largest zoom accepted by interactive updates.
pub const MAX_SCALE: f32 = 1.0e5;

/// Dense row-major grid of normalized noise values, one per output pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseField {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl NoiseField {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, px: u32, py: u32) -> Option<f32> {
        if px >= self.width || py >= self.height {
            return None;
        }
        self.values
            .get(py as usize * self.width as usize + px as usize)
            .copied()
    }

    /// Classify every value, consuming the field.
    pub fn into_colors(self, mode: ColorMode, bands: &BandTable) -> Vec<PixelColor> {
        self.values
            .into_iter()
            .map(|value| classify(value, mode, bands))
            .collect()
    }
}

/// Clamp a zoom factor into the range the sampler can divide by.
#[inline]
pub fn guard_scale(scale: f32) -> f32 {
    if scale.is_nan() || scale < MIN_SCALE {
        MIN_SCALE
    } else {
        scale
    }
}

/// Evaluates fractal noise over a pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldSampler {
    pub lattice: LatticeNoise,
    pub params: OctaveParameters,
}

impl FieldSampler {
    pub fn new(lattice: LatticeNoise, params: OctaveParameters) -> Self {
        Self { lattice, params }
    }

    /// Field value for pixel `(px, py)` at world position `(p - offset) / scale`.
    #[inline]
    pub fn sample_pixel(&self, px: u32, py: u32, scale: f32, offset: Vec2) -> f32 {
        let point = (Vec2::new(px as f32, py as f32) - offset) / guard_scale(scale);
        self.lattice.fractal(point.x, point.y, &self.params)
    }

    pub fn sample(&self, width: u32, height: u32, scale: f32, offset: Vec2) -> NoiseField {
        let scale = guard_scale(scale);
        let mut values = Vec::with_capacity(width as usize * height as usize);
        for py in 0..height {
            for px in 0..width {
                values.push(self.sample_pixel(px, py, scale, offset));
            }
        }
        log::trace!("Sampled {}x{} field at scale {} offset {:?}", width, height, scale, offset);
        NoiseField {
            width,
            height,
            values,
        }
    }
}

/// Sample the reference lattice over a `width` x `height` grid.
pub fn sample_field(
    width: u32,
    height: u32,
    scale: f32,
    offset: Vec2,
    params: &OctaveParameters,
) -> NoiseField {
    FieldSampler::new(LatticeNoise::default(), *params).sample(width, height, scale, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fractal::fractal_noise;

    #[test]
    fn test_dimensions_and_layout() {
        let params = OctaveParameters::default();
        let field = sample_field(7, 3, 10.0, Vec2::ZERO, &params);
        assert_eq!(field.width(), 7);
        assert_eq!(field.height(), 3);
        assert_eq!(field.values().len(), 21);
        assert_eq!(field.get(4, 2), Some(field.values()[2 * 7 + 4]));
        assert_eq!(field.get(7, 0), None);
        assert_eq!(field.get(0, 3), None);
    }

    #[test]
    fn test_pixel_maps_to_scaled_point() {
        let params = OctaveParameters::default();
        let scale = 16.0;
        let offset = Vec2::new(3.0, -5.0);
        let field = sample_field(8, 8, scale, offset, &params);
        for py in 0..8 {
            for px in 0..8 {
                let x = (px as f32 - offset.x) / scale;
                let y = (py as f32 - offset.y) / scale;
                assert_eq!(field.get(px, py), Some(fractal_noise(x, y, &params)));
            }
        }
    }

    #[test]
    fn test_origin_pixel_is_mid_gray() {
        let params = OctaveParameters::new(1, 0.5, 2.0).unwrap();
        let field = sample_field(4, 4, 32.0, Vec2::ZERO, &params);
        assert_eq!(field.get(0, 0), Some(0.5));
    }

    #[test]
    fn test_scroll_matches_shifted_points() {
        let params = OctaveParameters::default();
        let scale = 24.0;
        let d = 13.75;
        let shifted = sample_field(16, 16, scale, Vec2::splat(d), &params);
        for py in 0..16 {
            for px in 0..16 {
                let x = (px as f32 - d) / scale;
                let y = (py as f32 - d) / scale;
                let expected = fractal_noise(x, y, &params);
                let got = shifted.get(px, py).unwrap();
                assert!((got - expected).abs() < 1e-5, "({px},{py}): {got} vs {expected}");
            }
        }
    }

    #[test]
    fn test_integer_scroll_shifts_field() {
        // With scale 1 a whole-pixel offset is an exact translation of the grid
        let params = OctaveParameters::default();
        let base = sample_field(12, 12, 1.0, Vec2::ZERO, &params);
        let moved = sample_field(12, 12, 1.0, Vec2::splat(2.0), &params);
        for py in 2..12 {
            for px in 2..12 {
                let a = moved.get(px, py).unwrap();
                let b = base.get(px - 2, py - 2).unwrap();
                assert!((a - b).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_scale_guard() {
        assert_eq!(guard_scale(0.0), MIN_SCALE);
        assert_eq!(guard_scale(-4.0), MIN_SCALE);
        assert_eq!(guard_scale(f32::NAN), MIN_SCALE);
        assert_eq!(guard_scale(2.0), 2.0);

        let params = OctaveParameters::default();
        let field = sample_field(4, 4, 0.0, Vec2::ZERO, &params);
        assert!(field.values().iter().all(|v| v.is_finite() && (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_empty_field() {
        let field = sample_field(0, 5, 10.0, Vec2::ZERO, &OctaveParameters::default());
        assert!(field.values().is_empty());
        let colors = field.into_colors(ColorMode::Banded, &BandTable::default());
        assert!(colors.is_empty());
    }

    #[test]
    fn test_into_colors_preserves_order() {
        let params = OctaveParameters::default();
        let field = sample_field(5, 5, 3.0, Vec2::new(1.5, 0.25), &params);
        let values = field.values().to_vec();
        let bands = BandTable::default();
        let colors = field.into_colors(ColorMode::Grayscale, &bands);
        for (value, color) in values.iter().zip(&colors) {
            assert_eq!(*color, classify(*value, ColorMode::Grayscale, &bands));
        }
    }
}
