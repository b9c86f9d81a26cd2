use thiserror::Error;

/// Validation failures for engine parameters.
///
/// The engine never silently repairs a bad configuration: callers get one of
/// these and decide whether to keep the previous value or abort.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("octave count must be at least 1")]
    NoOctaves,

    #[error("persistence must be in (0, 1), got {0}")]
    Persistence(f32),

    #[error("lacunarity must be finite and greater than 1, got {0}")]
    Lacunarity(f32),

    #[error("scale must be finite and within [{min}, {max}], got {value}")]
    Scale { value: f32, min: f32, max: f32 },

    #[error("band {index} threshold {value} is outside (0, 1]")]
    BandOutOfRange { index: usize, value: f32 },

    #[error("band {index} threshold {value} does not exceed the previous threshold {previous}")]
    BandOrder { index: usize, value: f32, previous: f32 },
}
