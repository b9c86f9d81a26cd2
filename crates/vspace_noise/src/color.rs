use crate::error::ConfigError;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// One RGBA8 pixel, laid out for direct texture upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct PixelColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl PixelColor {
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 255,
        }
    }

    pub const fn gray(level: u8) -> Self {
        Self::opaque(level, level, level)
    }
}

impl From<[u8; 3]> for PixelColor {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::opaque(red, green, blue)
    }
}

impl From<PixelColor> for [u8; 3] {
    fn from(color: PixelColor) -> Self {
        [color.red, color.green, color.blue]
    }
}

/// Classification policy applied to every pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Grayscale,
    Banded,
}

impl ColorMode {
    pub fn toggled(self) -> Self {
        match self {
            ColorMode::Grayscale => ColorMode::Banded,
            ColorMode::Banded => ColorMode::Grayscale,
        }
    }
}

/// A color bucket covering values strictly below `upper_bound`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub upper_bound: f32,
    #[serde(with = "rgb")]
    pub color: PixelColor,
}

impl Band {
    pub const fn new(upper_bound: f32, color: PixelColor) -> Self {
        Self { upper_bound, color }
    }
}

/// Ordered threshold table plus the color used above the last threshold.
///
/// Thresholds are strictly ascending inside `(0, 1]`, so every value lands
/// in exactly one bucket: the first band whose bound exceeds it, or the
/// ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BandSpec", into = "BandSpec")]
pub struct BandTable {
    bands: Vec<Band>,
    ceiling: PixelColor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BandSpec {
    bands: Vec<Band>,
    #[serde(with = "rgb")]
    ceiling: PixelColor,
}

impl TryFrom<BandSpec> for BandTable {
    type Error = ConfigError;

    fn try_from(spec: BandSpec) -> Result<Self, Self::Error> {
        Self::new(spec.bands, spec.ceiling)
    }
}

impl From<BandTable> for BandSpec {
    fn from(table: BandTable) -> Self {
        Self {
            bands: table.bands,
            ceiling: table.ceiling,
        }
    }
}

pub const DEEP_WATER: PixelColor = PixelColor::opaque(16, 48, 112);
pub const SHALLOW_WATER: PixelColor = PixelColor::opaque(58, 132, 196);
pub const LOWLAND: PixelColor = PixelColor::opaque(86, 152, 66);
pub const HIGHLAND: PixelColor = PixelColor::opaque(54, 104, 48);
pub const MOUNTAIN: PixelColor = PixelColor::opaque(124, 112, 100);
pub const SNOW: PixelColor = PixelColor::opaque(244, 246, 250);

impl Default for BandTable {
    /// Terrain palette: water, shore, lowland, highland, mountain, snow.
    fn default() -> Self {
        Self {
            bands: vec![
                Band::new(0.49, DEEP_WATER),
                Band::new(0.52, SHALLOW_WATER),
                Band::new(0.56, LOWLAND),
                Band::new(0.58, HIGHLAND),
                Band::new(0.65, MOUNTAIN),
            ],
            ceiling: SNOW,
        }
    }
}

impl BandTable {
    pub fn new(bands: Vec<Band>, ceiling: PixelColor) -> Result<Self, ConfigError> {
        let mut previous = 0.0;
        for (index, band) in bands.iter().enumerate() {
            let value = band.upper_bound;
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::BandOutOfRange { index, value });
            }
            if index > 0 && value <= previous {
                return Err(ConfigError::BandOrder {
                    index,
                    value,
                    previous,
                });
            }
            previous = value;
        }
        Ok(Self { bands, ceiling })
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn ceiling(&self) -> PixelColor {
        self.ceiling
    }

    /// Number of buckets, including the ceiling.
    pub fn bucket_count(&self) -> usize {
        self.bands.len() + 1
    }

    /// Index of the bucket `value` falls in; `bands().len()` means the ceiling.
    pub fn bucket(&self, value: f32) -> usize {
        self.bands
            .iter()
            .position(|band| value < band.upper_bound)
            .unwrap_or(self.bands.len())
    }

    /// Half-open range `[lower, upper)` covered by bucket `index`.
    pub fn bucket_range(&self, index: usize) -> (f32, f32) {
        let lower = match index {
            0 => f32::NEG_INFINITY,
            i => self.bands[i - 1].upper_bound,
        };
        let upper = self
            .bands
            .get(index)
            .map_or(f32::INFINITY, |band| band.upper_bound);
        (lower, upper)
    }

    pub fn color(&self, value: f32) -> PixelColor {
        self.bands
            .get(self.bucket(value))
            .map_or(self.ceiling, |band| band.color)
    }
}

/// `round(255 * value)` on every channel; input is clamped to `[0, 1]`.
#[inline]
pub fn grayscale(value: f32) -> PixelColor {
    PixelColor::gray((value.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Color for one normalized field value under `mode`.
#[inline]
pub fn classify(value: f32, mode: ColorMode, bands: &BandTable) -> PixelColor {
    match mode {
        ColorMode::Grayscale => grayscale(value),
        ColorMode::Banded => bands.color(value),
    }
}

mod rgb {
    use super::PixelColor;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(color: &PixelColor, serializer: S) -> Result<S::Ok, S::Error> {
        <[u8; 3]>::from(*color).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PixelColor, D::Error> {
        <[u8; 3]>::deserialize(deserializer).map(PixelColor::from)
    }
}
