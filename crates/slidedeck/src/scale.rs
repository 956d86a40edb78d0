use tracing::debug;

/// Reference viewport width the deck is designed for (a typical laptop).
pub const DEFAULT_BASE_WIDTH: f32 = 1440.0;
/// Viewports at or below this width are never scaled.
pub const DEFAULT_THRESHOLD: f32 = 1920.0;
pub const DEFAULT_MAX_SCALE: f32 = 2.0;

/// Maps viewport width to a uniform scale factor for slides and chrome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaler {
    pub base_width: f32,
    pub threshold: f32,
    pub max: f32,
}

impl Default for Scaler {
    fn default() -> Self {
        Self {
            base_width: DEFAULT_BASE_WIDTH,
            threshold: DEFAULT_THRESHOLD,
            max: DEFAULT_MAX_SCALE,
        }
    }
}

impl Scaler {
    pub fn scale_for(&self, width: f32) -> f32 {
        if width <= self.threshold {
            return 1.0;
        }
        // A cap below 1.0, or NaN, acts as 1.0.
        (width / self.base_width).clamp(1.0, self.max.max(1.0))
    }
}

/// Last computed scale; recomputed from scratch on every resize.
#[derive(Debug, Clone)]
pub struct ScaleState {
    scaler: Scaler,
    width: Option<f32>,
    scale: f32,
}

impl ScaleState {
    pub fn new(scaler: Scaler) -> Self {
        Self {
            scaler,
            width: None,
            scale: 1.0,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Feed the current viewport width. Returns true when the scale changed.
    pub fn resize(&mut self, width: f32) -> bool {
        if self.width == Some(width) {
            return false;
        }
        self.width = Some(width);
        let scale = self.scaler.scale_for(width);
        let changed = scale != self.scale;
        if changed {
            debug!(width, scale, "viewport rescaled");
        }
        self.scale = scale;
        changed
    }
}
