use crate::error::ConfigError;
use crate::lattice::LatticeNoise;
use serde::{Deserialize, Serialize};

/// Octave configuration for the fractal sum.
///
/// Only constructible through validation, so `count >= 1`,
/// `0 < persistence < 1` and `lacunarity > 1` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OctaveSpec", into = "OctaveSpec")]
pub struct OctaveParameters {
    count: u32,
    persistence: f32,
    lacunarity: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
struct OctaveSpec {
    count: u32,
    persistence: f32,
    lacunarity: f32,
}

impl Default for OctaveSpec {
    fn default() -> Self {
        let params = OctaveParameters::default();
        Self {
            count: params.count,
            persistence: params.persistence,
            lacunarity: params.lacunarity,
        }
    }
}

impl TryFrom<OctaveSpec> for OctaveParameters {
    type Error = ConfigError;

    fn try_from(spec: OctaveSpec) -> Result<Self, Self::Error> {
        Self::new(spec.count, spec.persistence, spec.lacunarity)
    }
}

impl From<OctaveParameters> for OctaveSpec {
    fn from(params: OctaveParameters) -> Self {
        Self {
            count: params.count,
            persistence: params.persistence,
            lacunarity: params.lacunarity,
        }
    }
}

impl Default for OctaveParameters {
    /// Four octaves, halving amplitude and doubling frequency each step.
    fn default() -> Self {
        Self {
            count: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

impl OctaveParameters {
    pub fn new(count: u32, persistence: f32, lacunarity: f32) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::NoOctaves);
        }
        // NaN fails both comparisons
        if !(persistence > 0.0 && persistence < 1.0) {
            return Err(ConfigError::Persistence(persistence));
        }
        if !(lacunarity > 1.0 && lacunarity.is_finite()) {
            return Err(ConfigError::Lacunarity(lacunarity));
        }
        Ok(Self {
            count,
            persistence,
            lacunarity,
        })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn persistence(&self) -> f32 {
        self.persistence
    }

    pub fn lacunarity(&self) -> f32 {
        self.lacunarity
    }
}

/// Map raw lattice noise from roughly `[-1, 1]` into `[0, 1]`.
#[inline]
pub fn normalize(value: f32) -> f32 {
    value / 2.0 + 0.5
}

impl LatticeNoise {
    /// Fractal sum of `params.count()` octaves, in `[0, 1]`.
    ///
    /// Each octave is normalized on its own before weighting and the weighted
    /// sum is divided by the total weight. This is not the textbook
    /// "normalize once at the end" fBm and gives a lower-contrast image;
    /// keep it that way so rendered output stays stable.
    pub fn fractal(&self, x: f32, y: f32, params: &OctaveParameters) -> f32 {
        let mut sum = 0.0;
        let mut total_weight = 0.0;
        let mut weight = 1.0;
        let mut frequency = 1.0;

        for _ in 0..params.count {
            sum += weight * normalize(self.sample(x * frequency, y * frequency));
            total_weight += weight;

            weight *= params.persistence;
            frequency *= params.lacunarity;
        }

        sum / total_weight
    }
}

/// Fractal noise over the reference (linear) lattice.
#[inline]
pub fn fractal_noise(x: f32, y: f32, params: &OctaveParameters) -> f32 {
    LatticeNoise::default().fractal(x, y, params)
}
