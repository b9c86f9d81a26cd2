use crate::color::{BandTable, ColorMode, PixelColor};
use crate::error::ConfigError;
use crate::field::{FieldSampler, MAX_SCALE, MIN_SCALE};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// User-controlled view parameters, read once at the start of each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderState {
    pub mode: ColorMode,
    /// Scroll rate in pixels per second, applied to both axes.
    pub speed: f32,
    /// Pixels per lattice cell.
    pub scale: f32,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            mode: ColorMode::Grayscale,
            speed: 20.0,
            scale: 64.0,
        }
    }
}

impl RenderState {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_scale(self.scale)?;
        Ok(())
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        log::debug!("Color mode -> {:?}", self.mode);
    }

    /// Change the scroll rate; zero stops and negative reverses the scroll.
    pub fn adjust_speed(&mut self, delta: f32) {
        if delta.is_finite() {
            self.speed += delta;
            log::debug!("Scroll speed -> {}", self.speed);
        }
    }

    /// Multiply the zoom by `factor`, clamped to `[MIN_SCALE, MAX_SCALE]`.
    pub fn zoom(&mut self, factor: f32) {
        if !(factor.is_finite() && factor > 0.0) {
            log::warn!("Ignoring zoom factor {}", factor);
            return;
        }
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        log::debug!("Scale -> {}", self.scale);
    }

    /// Replace the zoom, rejecting values outside the range `zoom` can reach.
    pub fn set_scale(&mut self, scale: f32) -> Result<(), ConfigError> {
        check_scale(scale)?;
        self.scale = scale;
        Ok(())
    }
}

fn check_scale(scale: f32) -> Result<(), ConfigError> {
    if (MIN_SCALE..=MAX_SCALE).contains(&scale) {
        Ok(())
    } else {
        Err(ConfigError::Scale {
            value: scale,
            min: MIN_SCALE,
            max: MAX_SCALE,
        })
    }
}

/// Per-frame driver: owns the scroll offset, produces the RGBA buffer.
#[derive(Debug, Clone, Default)]
pub struct FrameRenderer {
    sampler: FieldSampler,
    bands: BandTable,
    offset: Vec2,
}

impl FrameRenderer {
    pub fn new(sampler: FieldSampler, bands: BandTable) -> Self {
        Self {
            sampler,
            bands,
            offset: Vec2::ZERO,
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn reset_offset(&mut self) {
        self.offset = Vec2::ZERO;
    }

    /// Scroll diagonally by `elapsed * speed` pixels.
    pub fn advance(&mut self, elapsed: f32, speed: f32) {
        if !(elapsed.is_finite() && elapsed >= 0.0 && speed.is_finite()) {
            log::warn!("Skipping scroll step: elapsed {} speed {}", elapsed, speed);
            return;
        }
        self.offset += Vec2::splat(elapsed * speed);
    }

    /// Advance the scroll and colorize a fresh `width` x `height` field.
    pub fn render(
        &mut self,
        state: &RenderState,
        elapsed: f32,
        width: u32,
        height: u32,
    ) -> Vec<PixelColor> {
        self.advance(elapsed, state.speed);
        self.sampler
            .sample(width, height, state.scale, self.offset)
            .into_colors(state.mode, &self.bands)
    }
}
