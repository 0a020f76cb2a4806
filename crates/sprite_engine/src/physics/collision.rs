//! Axis-aligned bounding boxes

/// Axis-aligned bounding box in pixel coordinates (y grows upwards)
///
/// Edges are widened to `i64` so a box anywhere in the `i32` plane has
/// exact edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Aabb {
    /// Left edge (`x`)
    pub left: i64,
    /// Right edge (`x + width`)
    pub right: i64,
    /// Bottom edge (`y`)
    pub bottom: i64,
    /// Top edge (`y + height`)
    pub top: i64,
}

impl Aabb {
    /// Build a box from a bottom-left corner and a size
    pub fn from_geometry(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            left: i64::from(x),
            right: i64::from(x) + i64::from(width),
            bottom: i64::from(y),
            top: i64::from(y) + i64::from(height),
        }
    }

    /// Strict overlap test; boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Self) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top > other.bottom
            && self.bottom < other.top
    }

    /// Horizontal extent
    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    /// Vertical extent
    pub fn height(&self) -> i64 {
        self.top - self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_from_geometry() {
        let aabb = Aabb::from_geometry(10, -5, 100, 150);
        assert_eq!(aabb.left, 10);
        assert_eq!(aabb.right, 110);
        assert_eq!(aabb.bottom, -5);
        assert_eq!(aabb.top, 145);
        assert_eq!((aabb.width(), aabb.height()), (100, 150));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = Aabb::from_geometry(0, 0, 100, 150);
        let b = Aabb::from_geometry(3, 0, 100, 150);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::from_geometry(0, 0, 100, 150);
        let right = Aabb::from_geometry(100, 0, 100, 150);
        let above = Aabb::from_geometry(0, 150, 100, 150);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&above));
        assert!(!right.overlaps(&a));
    }

    #[test]
    fn test_edges_past_i32_range() {
        let far = Aabb::from_geometry(i32::MAX - 50, i32::MIN, 100, 150);
        assert_eq!(far.right, i64::from(i32::MAX) + 50);
        assert_eq!(far.bottom, i64::from(i32::MIN));
        assert!(far.overlaps(&Aabb::from_geometry(i32::MAX - 10, i32::MIN, 5, 5)));
        assert!(!far.overlaps(&Aabb::from_geometry(0, 0, 100, 150)));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = Aabb::from_geometry(0, 0, 100, 100);
        let inner = Aabb::from_geometry(10, 10, 5, 5);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }
}
