use foundation::time::Time;
use serde::{Deserialize, Serialize};

/// Viewer tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub initial_zoom: f64,
    /// Quiet period before a search edit is applied.
    pub search_debounce_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_zoom: -2.0,
            max_zoom: 20.0,
            initial_zoom: 3.5,
            search_debounce_ms: 200,
        }
    }
}

impl ViewerConfig {
    pub fn debounce_secs(&self) -> f64 {
        Time::from_millis(self.search_debounce_ms).0
    }

    /// Clamp `zoom` into the configured bounds. NaN maps to the initial zoom.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.initial_zoom;
        }
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}
