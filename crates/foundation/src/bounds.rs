use crate::math::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in scene space.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb2 {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Aabb2 {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Aabb2 { min, max }
    }

    /// Bounds of a circle.
    pub fn around(center: Vec2, radius: f64) -> Self {
        Aabb2::new(
            [center.x - radius, center.y - radius],
            [center.x + radius, center.y + radius],
        )
    }

    pub fn union(self, other: Self) -> Self {
        Aabb2::new(
            [self.min[0].min(other.min[0]), self.min[1].min(other.min[1])],
            [self.max[0].max(other.max[0]), self.max[1].max(other.max[1])],
        )
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min[0] && p.x <= self.max[0] && p.y >= self.min[1] && p.y <= self.max[1]
    }
}

#[cfg(test)]
mod tests {
    use super::Aabb2;
    use crate::math::Vec2;

    #[test]
    fn union_covers_both_boxes() {
        let a = Aabb2::around(Vec2::new(0.0, 0.0), 1.0);
        let b = Aabb2::around(Vec2::new(10.0, 4.0), 2.0);
        let u = a.union(b);
        assert_eq!(u, Aabb2::new([-1.0, -1.0], [12.0, 6.0]));
        assert_eq!(u.center(), Vec2::new(5.5, 2.5));
        assert!(u.contains(Vec2::new(11.0, 5.0)));
        assert!(!u.contains(Vec2::new(13.0, 0.0)));
    }
}
