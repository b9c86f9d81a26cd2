use vspace_core::KeyCode;
use vspace_noise::RenderState;

const SPEED_STEP: f32 = 10.0;
const ZOOM_STEP: f32 = 1.25;

/// State shared between the input handler and the render callback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Controls {
    pub state: RenderState,
    /// Set by input, consumed by the next frame.
    pub reset_offset: bool,
}

impl Controls {
    pub fn new(state: RenderState) -> Self {
        Self {
            state,
            reset_offset: false,
        }
    }

    /// Apply a key press; returns false for unbound keys.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Space | KeyCode::KeyM => {
                self.state.toggle_mode();
                log::info!("Color mode: {:?}", self.state.mode);
            }
            KeyCode::ArrowUp => self.state.adjust_speed(SPEED_STEP),
            KeyCode::ArrowDown => self.state.adjust_speed(-SPEED_STEP),
            KeyCode::Digit0 | KeyCode::Numpad0 => self.state.speed = 0.0,
            KeyCode::Equal | KeyCode::NumpadAdd => self.state.zoom(ZOOM_STEP),
            KeyCode::Minus | KeyCode::NumpadSubtract => self.state.zoom(1.0 / ZOOM_STEP),
            KeyCode::KeyR => self.reset_offset = true,
            _ => return false,
        }
        log::info!("Speed {:.1} px/s, scale {:.3}", self.state.speed, self.state.scale);
        true
    }

    /// Copy of the state for one frame, clearing the pending reset.
    pub fn snapshot(&mut self) -> (RenderState, bool) {
        (self.state, std::mem::take(&mut self.reset_offset))
    }
}
