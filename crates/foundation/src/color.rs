use serde::{Deserialize, Serialize};

/// 8-bit RGB color triple.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Fallback for categories missing from a color table.
    pub const NEUTRAL_GRAY: Rgb = Rgb([150, 150, 150]);
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb([r, g, b])
    }

    /// Attach an alpha channel in `[0, 1]`; out of range values are clamped.
    pub fn with_alpha(self, alpha: f32) -> Rgba {
        let a = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Rgba {
            rgb: self,
            alpha: (a * 255.0).round() as u8,
        }
    }
}

/// RGB plus 8-bit alpha, as handed to the rendering surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: u8,
}

impl Rgba {
    pub fn to_array(self) -> [u8; 4] {
        let [r, g, b] = self.rgb.0;
        [r, g, b, self.alpha]
    }
}
