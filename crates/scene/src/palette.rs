use foundation::color::Rgb;

use crate::node::NodeKind;

/// Fixed department to color table. Lookup is case-sensitive.
pub const DEPARTMENT_COLORS: &[(&str, Rgb)] = &[
    ("Engineering", Rgb::new(66, 135, 245)),
    ("Sales", Rgb::new(245, 166, 35)),
    ("Marketing", Rgb::new(232, 67, 147)),
    ("Finance", Rgb::new(46, 204, 113)),
    ("Operations", Rgb::new(155, 89, 182)),
    ("Human Resources", Rgb::new(241, 196, 15)),
    ("Legal", Rgb::new(127, 140, 141)),
    ("Research", Rgb::new(26, 188, 156)),
    ("Customer Support", Rgb::new(230, 126, 34)),
    ("Executive", Rgb::new(192, 57, 43)),
];

/// Color for a department; unknown names fall back to neutral gray.
pub fn department_color(name: &str) -> Rgb {
    DEPARTMENT_COLORS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, color)| *color)
        .unwrap_or(Rgb::NEUTRAL_GRAY)
}

/// Legend swatch color per hierarchy level.
pub fn kind_color(kind: NodeKind) -> Rgb {
    match kind {
        NodeKind::Department => Rgb::new(66, 135, 245),
        NodeKind::PurposeGroup => Rgb::new(120, 180, 255),
        NodeKind::TransportGroup => Rgb::new(255, 200, 90),
        NodeKind::RouteGroup => Rgb::new(140, 220, 160),
        NodeKind::Trip => Rgb::new(235, 235, 235),
    }
}
