use std::fmt;

use serde::{Deserialize, Serialize};

/// A 2D integer point. Used both as a coordinate and as a size, where `x` is
/// the width and `y` is the height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Area of a size, computed in 64 bits so large sizes never overflow.
    #[inline]
    pub fn area(self) -> i64 {
        i64::from(self.x) * i64::from(self.y)
    }

    /// A size is empty if it covers no space at all. Empty sizes are skipped
    /// by the packing drivers.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.x <= 0 || self.y <= 0
    }

    pub fn round_up_pow2(self) -> Self {
        Self {
            x: round_up_pow2(self.x),
            y: round_up_pow2(self.y),
        }
    }

    /// Tells whether this size makes a better bounding box than `other`.
    ///
    /// Smaller area wins. Among equal areas the squarer box wins, and among
    /// boxes that are equally square the wider one wins.
    pub fn better_than(self, other: Point) -> bool {
        let (area, other_area) = (self.area(), other.area());
        if area != other_area {
            return area < other_area;
        }

        let diff = (i64::from(self.x) - i64::from(self.y)).abs();
        let other_diff = (i64::from(other.x) - i64::from(other.y)).abs();
        if diff != other_diff {
            return diff < other_diff;
        }

        self.x > other.x
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}x{}", self.x, self.y)
    }
}

/// An axis-aligned rectangle. `min` is inclusive and `max` is exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    #[inline]
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn from_pos_size(pos: Point, size: Point) -> Self {
        Self {
            min: pos,
            max: Point::new(pos.x + size.x, pos.y + size.y),
        }
    }

    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.max.x - self.min.x, self.max.y - self.min.y)
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.size().area()
    }

    /// Tells whether the interiors of the two rectangles overlap. Rectangles
    /// that only share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }

    /// Tells whether `other` lies entirely within this rectangle, edges
    /// included.
    #[inline]
    pub fn contains(&self, other: &Rect) -> bool {
        self.min.x <= other.min.x
            && self.max.x >= other.max.x
            && self.min.y <= other.min.y
            && self.max.y >= other.max.y
    }

    #[inline]
    pub(crate) fn can_hold(&self, size: Point) -> bool {
        size.x <= self.max.x - self.min.x && size.y <= self.max.y - self.min.y
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "({}, {})-({}, {})",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

/// Rounds `x` up to the next power of two. Anything at or below 1 rounds to 1,
/// and results too large for an `i32` saturate at `i32::MAX`.
pub fn round_up_pow2(x: i32) -> i32 {
    if x <= 1 {
        return 1;
    }

    match (x as u32).checked_next_power_of_two() {
        Some(rounded) if rounded <= i32::MAX as u32 => rounded as i32,
        _ => i32::MAX,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Rect {
        Rect::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    #[test]
    fn shared_edges_do_not_intersect() {
        let a = rect(0, 0, 10, 10);

        assert!(!a.intersects(&rect(10, 0, 20, 10)));
        assert!(!a.intersects(&rect(0, 10, 10, 20)));
        assert!(!a.intersects(&rect(10, 10, 20, 20)));
    }

    #[test]
    fn overlapping_rects_intersect() {
        let a = rect(0, 0, 10, 10);

        assert!(a.intersects(&rect(9, 9, 20, 20)));
        assert!(a.intersects(&rect(2, 2, 4, 4)));
        assert!(rect(2, 2, 4, 4).intersects(&a));
        assert!(a.intersects(&rect(-5, 3, 15, 4)));
    }

    #[test]
    fn contains_is_inclusive() {
        let a = rect(0, 0, 10, 10);

        assert!(a.contains(&a));
        assert!(a.contains(&rect(0, 0, 10, 5)));
        assert!(a.contains(&rect(3, 3, 4, 4)));
        assert!(!a.contains(&rect(3, 3, 11, 4)));
        assert!(!rect(3, 3, 4, 4).contains(&a));
    }

    #[test]
    fn round_up() {
        assert_eq!(round_up_pow2(-4), 1);
        assert_eq!(round_up_pow2(0), 1);
        assert_eq!(round_up_pow2(1), 1);
        assert_eq!(round_up_pow2(2), 2);
        assert_eq!(round_up_pow2(3), 4);
        assert_eq!(round_up_pow2(64), 64);
        assert_eq!(round_up_pow2(65), 128);
        assert_eq!(round_up_pow2(1 << 30), 1 << 30);
        assert_eq!(round_up_pow2((1 << 30) + 1), i32::MAX);
    }

    #[test]
    fn smaller_area_is_better() {
        assert!(Point::new(4, 4).better_than(Point::new(8, 4)));
        assert!(!Point::new(8, 4).better_than(Point::new(4, 4)));
    }

    #[test]
    fn squarer_is_better() {
        assert!(Point::new(8, 8).better_than(Point::new(16, 4)));
        assert!(!Point::new(16, 4).better_than(Point::new(8, 8)));
    }

    #[test]
    fn wider_breaks_ties() {
        assert!(Point::new(16, 8).better_than(Point::new(8, 16)));
        assert!(!Point::new(8, 16).better_than(Point::new(16, 8)));
        assert!(!Point::new(8, 8).better_than(Point::new(8, 8)));
    }

    #[test]
    fn empty_sizes() {
        assert!(Point::new(0, 5).is_empty());
        assert!(Point::new(5, -1).is_empty());
        assert!(!Point::new(1, 1).is_empty());
    }
}
