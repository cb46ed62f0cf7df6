use crate::{
    geometry::{Point, Rect},
    max_rects::MaxRects,
    order::{Order, SortedPacker},
    types::Request,
};

/// A placement heuristic that packs rectangles into a container one at a time.
pub trait Packer {
    /// Name of the algorithm, used to pick it by name and in reports.
    fn name(&self) -> String;

    /// Empties the container and sets its size.
    fn reset(&mut self, bounds: Point);

    /// Finds room for a rectangle of the given size and claims it. Returns the
    /// minimum corner of the placed rectangle, or `None` if it doesn't fit.
    fn add_rect(&mut self, size: Point) -> Option<Point>;

    /// Reorders a batch of requests before they are placed.
    fn sort(&self, _requests: &mut [Request]) {}

    /// Whether this packer always fills the container from low to high Y. A
    /// Y-ordered packer can be given an unbounded height and will report how
    /// much it needed.
    fn is_y_ordered(&self) -> bool {
        false
    }
}

impl<P: Packer + ?Sized> Packer for Box<P> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn reset(&mut self, bounds: Point) {
        (**self).reset(bounds)
    }

    fn add_rect(&mut self, size: Point) -> Option<Point> {
        (**self).add_rect(size)
    }

    fn sort(&self, requests: &mut [Request]) {
        (**self).sort(requests)
    }

    fn is_y_ordered(&self) -> bool {
        (**self).is_y_ordered()
    }
}

/// MaxRects with bottom-left placement: every rectangle goes to the free spot
/// with the lowest Y coordinate, then the lowest X coordinate.
#[derive(Debug, Clone, Default)]
pub struct MaxRectsBl {
    free: MaxRects,
}

impl MaxRectsBl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn free_space(&self) -> &MaxRects {
        &self.free
    }

    /// Finds the bottom-left-most free corner that can hold `size` without
    /// claiming it.
    pub fn query(&self, size: Point) -> Option<Point> {
        self.free
            .free_rects()
            .iter()
            .filter(|rect| rect.can_hold(size))
            .min_by_key(|rect| (rect.min.y, rect.min.x))
            .map(|rect| rect.min)
    }
}

impl Packer for MaxRectsBl {
    fn name(&self) -> String {
        String::from("MaxRects.BL")
    }

    fn reset(&mut self, bounds: Point) {
        self.free.reset(bounds);
    }

    fn add_rect(&mut self, size: Point) -> Option<Point> {
        let pos = self.query(size)?;
        self.free.place(Rect::from_pos_size(pos, size));

        Some(pos)
    }

    fn is_y_ordered(&self) -> bool {
        true
    }
}

/// The packer to use when there's no reason to pick another: bottom-left
/// MaxRects fed the tallest rectangles first.
pub fn default_packer() -> SortedPacker<MaxRectsBl> {
    SortedPacker::new(MaxRectsBl::new(), Order::HeightDesc)
}

/// Every supported packer: each heuristic on its own, followed by the same
/// heuristic under each sort order. Each call builds fresh packers.
pub fn all_packers() -> Vec<Box<dyn Packer + Send>> {
    let mut packers: Vec<Box<dyn Packer + Send>> = vec![Box::new(MaxRectsBl::new())];

    for &order in Order::SORTED {
        packers.push(Box::new(SortedPacker::new(MaxRectsBl::new(), order)));
    }

    packers
}

pub fn find_packer(name: &str) -> Option<Box<dyn Packer + Send>> {
    all_packers()
        .into_iter()
        .find(|packer| packer.name() == name)
}

#[cfg(test)]
mod test {
    use super::*;

    use std::collections::HashSet;

    #[test]
    fn fills_bottom_row_first() {
        let mut packer = MaxRectsBl::new();
        packer.reset(Point::new(10, 10));

        assert_eq!(packer.add_rect(Point::new(4, 4)), Some(Point::new(0, 0)));
        assert_eq!(packer.add_rect(Point::new(4, 2)), Some(Point::new(4, 0)));
        assert_eq!(packer.add_rect(Point::new(2, 6)), Some(Point::new(8, 0)));
        assert_eq!(packer.add_rect(Point::new(4, 2)), Some(Point::new(4, 2)));
        assert_eq!(packer.add_rect(Point::new(3, 3)), Some(Point::new(0, 4)));
    }

    #[test]
    fn query_does_not_claim_space() {
        let mut packer = MaxRectsBl::new();
        packer.reset(Point::new(8, 8));

        assert_eq!(packer.query(Point::new(8, 8)), Some(Point::new(0, 0)));
        assert_eq!(packer.query(Point::new(8, 8)), Some(Point::new(0, 0)));
        assert_eq!(packer.free_space().len(), 1);
    }

    #[test]
    fn reports_no_fit() {
        let mut packer = MaxRectsBl::new();
        packer.reset(Point::new(8, 8));

        assert_eq!(packer.add_rect(Point::new(9, 1)), None);
        assert_eq!(packer.add_rect(Point::new(6, 6)), Some(Point::new(0, 0)));
        assert_eq!(packer.add_rect(Point::new(3, 3)), None);
        assert_eq!(packer.add_rect(Point::new(2, 2)), Some(Point::new(6, 0)));
    }

    #[test]
    fn reset_forgets_placements() {
        let mut packer = MaxRectsBl::new();
        packer.reset(Point::new(4, 4));
        assert!(packer.add_rect(Point::new(4, 4)).is_some());
        assert!(packer.add_rect(Point::new(1, 1)).is_none());

        packer.reset(Point::new(4, 4));
        assert_eq!(packer.add_rect(Point::new(4, 4)), Some(Point::new(0, 0)));
    }

    #[test]
    fn registry_has_every_order_once() {
        let packers = all_packers();
        assert_eq!(packers.len(), Order::ALL.len());

        let names: HashSet<String> = packers.iter().map(|packer| packer.name()).collect();
        assert_eq!(names.len(), packers.len());
        assert!(packers.iter().all(|packer| packer.is_y_ordered()));
    }

    #[test]
    fn find_by_name() {
        let packer = find_packer("MaxRects.BL.AreaAsc").unwrap();
        assert_eq!(packer.name(), "MaxRects.BL.AreaAsc");

        assert_eq!(find_packer("MaxRects.BL").unwrap().name(), "MaxRects.BL");
        assert!(find_packer("Skyline").is_none());
    }

    #[test]
    fn default_is_height_desc() {
        assert_eq!(default_packer().name(), "MaxRects.BL.HeightDesc");
    }
}
