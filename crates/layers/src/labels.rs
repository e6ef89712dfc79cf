use foundation::color::{Rgb, Rgba};
use scene::{Node, NodeKind};
use serde::Serialize;

use crate::symbology::{ColorRule, Paint};

/// Longest label text handed to the renderer, in characters.
pub const MAX_LABEL_CHARS: usize = 48;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct LabelStyle {
    pub color: Paint,
    pub halo_color: Rgba,
    pub halo_width_px: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            color: Paint::fixed(Rgb::WHITE, 1.0),
            halo_color: Rgb::new(0, 0, 0).with_alpha(0.85),
            halo_width_px: 2.0,
        }
    }
}

impl LabelStyle {
    /// Label style per hierarchy level: departments in white, groups tinted by department.
    pub fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Department | NodeKind::Trip => Self::default(),
            NodeKind::PurposeGroup => Self {
                color: Paint {
                    color: ColorRule::Department,
                    alpha: 0.95,
                },
                ..Self::default()
            },
            NodeKind::TransportGroup | NodeKind::RouteGroup => Self {
                color: Paint {
                    color: ColorRule::Department,
                    alpha: 0.85,
                },
                halo_width_px: 1.5,
                ..Self::default()
            },
        }
    }
}

/// Display text for a node: trimmed, and cut to [`MAX_LABEL_CHARS`] with an ellipsis.
pub fn label_text(node: &Node) -> String {
    let trimmed = node.label.trim();
    if trimmed.chars().count() <= MAX_LABEL_CHARS {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(MAX_LABEL_CHARS - 1).collect();
    out.push('…');
    out
}
