use foundation::color::{Rgb, Rgba};
use scene::{Node, NodeDetail};
use serde::Serialize;

use crate::labels::LabelStyle;

/// How a drawable picks its color.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub enum ColorRule {
    /// The owning department's color (every node carries it).
    Department,
    Fixed(Rgb),
}

impl ColorRule {
    pub fn resolve(&self, node: &Node) -> Rgb {
        match self {
            ColorRule::Department => node.color,
            ColorRule::Fixed(c) => *c,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Paint {
    pub color: ColorRule,
    pub alpha: f32,
}

impl Paint {
    pub const fn department(alpha: f32) -> Self {
        Self {
            color: ColorRule::Department,
            alpha,
        }
    }

    pub const fn fixed(color: Rgb, alpha: f32) -> Self {
        Self {
            color: ColorRule::Fixed(color),
            alpha,
        }
    }

    pub fn resolve(&self, node: &Node) -> Rgba {
        self.color.resolve(node).with_alpha(self.alpha)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub paint: Paint,
    pub width_px: f32,
}

/// Radius (circles) or text size (labels) per node.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub enum SizeRule {
    /// `node.radius`, in map units.
    NodeRadius,
    /// `base + sqrt(emission / divisor)` screen pixels.
    EmissionPixels { base: f64, divisor: f64 },
    /// `node.label_size` screen pixels.
    LabelSize,
    /// The node's own marker footprint plus `pad_px` screen pixels.
    Halo { pad_px: f64 },
}

/// Map units covered by one screen pixel at `zoom`.
pub fn world_per_pixel(zoom: f64) -> f64 {
    (-zoom).exp2()
}

impl SizeRule {
    /// Emission-scaled trip marker radius.
    pub const TRIP_MARKER: SizeRule = SizeRule::EmissionPixels {
        base: 2.0,
        divisor: 1000.0,
    };

    /// Resolved size in map units at `zoom`.
    pub fn world_size(&self, node: &Node, zoom: f64) -> f64 {
        let px = world_per_pixel(zoom);
        match *self {
            SizeRule::NodeRadius => node.radius,
            SizeRule::EmissionPixels { base, divisor } => {
                let emission = node.detail.emissions().max(0.0);
                (base + (emission / divisor).sqrt()) * px
            }
            SizeRule::LabelSize => f64::from(node.label_size) * px,
            SizeRule::Halo { pad_px } => {
                let footprint = match &node.detail {
                    NodeDetail::Trip(_) => SizeRule::TRIP_MARKER.world_size(node, zoom),
                    _ => node.radius,
                };
                footprint + pad_px * px
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerStyle {
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
    pub size: SizeRule,
    pub text: Option<LabelStyle>,
}

impl LayerStyle {
    pub fn disc(fill_alpha: f32, stroke_alpha: f32) -> Self {
        Self {
            fill: Some(Paint::department(fill_alpha)),
            stroke: Some(Stroke {
                paint: Paint::department(stroke_alpha),
                width_px: 1.0,
            }),
            size: SizeRule::NodeRadius,
            text: None,
        }
    }

    pub fn label(text: LabelStyle) -> Self {
        Self {
            fill: None,
            stroke: None,
            size: SizeRule::LabelSize,
            text: Some(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorRule, Paint, SizeRule, world_per_pixel};
    use foundation::color::Rgb;
    use foundation::math::Vec2;
    use scene::{Node, NodeDetail, ParentPath, TripMetric};

    fn trip(emission: f64) -> Node {
        Node {
            id: "t".into(),
            label: "t".into(),
            position: Vec2::ZERO,
            radius: 2.0,
            label_size: 8.0,
            color: Rgb::new(1, 2, 3),
            path: ParentPath::root(),
            detail: NodeDetail::Trip(TripMetric {
                emission,
                cost: None,
                trip_id: None,
            }),
        }
    }

    #[test]
    fn pixel_scale_halves_per_zoom_level() {
        assert_eq!(world_per_pixel(0.0), 1.0);
        assert_eq!(world_per_pixel(1.0), 0.5);
        assert_eq!(world_per_pixel(-1.0), 2.0);
    }

    #[test]
    fn trip_marker_grows_with_emission() {
        let node = trip(4000.0);
        assert_eq!(SizeRule::TRIP_MARKER.world_size(&node, 0.0), 4.0);
        assert_eq!(SizeRule::TRIP_MARKER.world_size(&node, 1.0), 2.0);
    }

    #[test]
    fn halo_pads_trip_footprint() {
        let node = trip(0.0);
        assert_eq!(SizeRule::Halo { pad_px: 3.0 }.world_size(&node, 0.0), 5.0);
    }

    #[test]
    fn department_color_rule_uses_node_color() {
        let node = trip(1.0);
        assert_eq!(ColorRule::Department.resolve(&node), Rgb::new(1, 2, 3));
        assert_eq!(
            Paint::fixed(Rgb::WHITE, 1.0).resolve(&node).to_array(),
            [255, 255, 255, 255]
        );
    }
}
