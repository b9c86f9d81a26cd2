pub mod color;
pub mod error;
pub mod field;
pub mod fractal;
pub mod frame;
pub mod gradient;
pub mod lattice;

// Re-export commonly used items
pub use color::{classify, Band, BandTable, ColorMode, PixelColor};
pub use error::ConfigError;
pub use field::{sample_field, FieldSampler, NoiseField, MAX_SCALE, MIN_SCALE};
pub use fractal::{fractal_noise, normalize, OctaveParameters};
pub use frame::{FrameRenderer, RenderState};
pub use gradient::gradient;
pub use lattice::{noise, Easing, LatticeNoise};
