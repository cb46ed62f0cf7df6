use std::{cmp::Ordering, fmt, str::FromStr};

use crate::{geometry::Point, packer::Packer, types::Request};

/// An order to sort rectangles in before packing them.
///
/// Packing heuristics are sensitive to the order they see rectangles in, so
/// trying several orders is a cheap way to find a tighter packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Keep the input order.
    Unsorted,
    /// Widest first, ties broken by tallest.
    WidthDesc,
    /// Narrowest first, ties broken by shortest.
    WidthAsc,
    /// Tallest first, ties broken by widest.
    HeightDesc,
    /// Shortest first, ties broken by narrowest.
    HeightAsc,
    AreaDesc,
    AreaAsc,
    PerimeterDesc,
    PerimeterAsc,
    /// Largest difference between width and height first.
    DifferenceDesc,
    DifferenceAsc,
    /// Largest width to height ratio first.
    RatioDesc,
    RatioAsc,
}

impl Order {
    pub const ALL: &'static [Order] = &[
        Order::Unsorted,
        Order::WidthDesc,
        Order::WidthAsc,
        Order::HeightDesc,
        Order::HeightAsc,
        Order::AreaDesc,
        Order::AreaAsc,
        Order::PerimeterDesc,
        Order::PerimeterAsc,
        Order::DifferenceDesc,
        Order::DifferenceAsc,
        Order::RatioDesc,
        Order::RatioAsc,
    ];

    /// Every order that actually reorders anything.
    pub const SORTED: &'static [Order] = &[
        Order::WidthDesc,
        Order::WidthAsc,
        Order::HeightDesc,
        Order::HeightAsc,
        Order::AreaDesc,
        Order::AreaAsc,
        Order::PerimeterDesc,
        Order::PerimeterAsc,
        Order::DifferenceDesc,
        Order::DifferenceAsc,
        Order::RatioDesc,
        Order::RatioAsc,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Order::Unsorted => "Unsorted",
            Order::WidthDesc => "WidthDesc",
            Order::WidthAsc => "WidthAsc",
            Order::HeightDesc => "HeightDesc",
            Order::HeightAsc => "HeightAsc",
            Order::AreaDesc => "AreaDesc",
            Order::AreaAsc => "AreaAsc",
            Order::PerimeterDesc => "PerimeterDesc",
            Order::PerimeterAsc => "PerimeterAsc",
            Order::DifferenceDesc => "DifferenceDesc",
            Order::DifferenceAsc => "DifferenceAsc",
            Order::RatioDesc => "RatioDesc",
            Order::RatioAsc => "RatioAsc",
        }
    }

    fn is_descending(self) -> bool {
        matches!(
            self,
            Order::WidthDesc
                | Order::HeightDesc
                | Order::AreaDesc
                | Order::PerimeterDesc
                | Order::DifferenceDesc
                | Order::RatioDesc
        )
    }

    /// Compares two sizes under this order. `Less` means `a` is packed first.
    ///
    /// Sizes with equal keys compare `Equal` both ways round, so a stable sort
    /// keeps them in input order.
    pub fn compare(self, a: Point, b: Point) -> Ordering {
        let ascending = match self {
            Order::Unsorted => return Ordering::Equal,
            Order::WidthDesc | Order::WidthAsc => (a.x, a.y).cmp(&(b.x, b.y)),
            Order::HeightDesc | Order::HeightAsc => (a.y, a.x).cmp(&(b.y, b.x)),
            Order::AreaDesc | Order::AreaAsc => a.area().cmp(&b.area()),
            Order::PerimeterDesc | Order::PerimeterAsc => {
                (i64::from(a.x) + i64::from(a.y)).cmp(&(i64::from(b.x) + i64::from(b.y)))
            }
            Order::DifferenceDesc | Order::DifferenceAsc => difference(a).cmp(&difference(b)),
            // a.x / a.y against b.x / b.y, cross-multiplied. Heights are
            // positive for anything that reaches a packer.
            Order::RatioDesc | Order::RatioAsc => {
                (i64::from(a.x) * i64::from(b.y)).cmp(&(i64::from(b.x) * i64::from(a.y)))
            }
        };

        if self.is_descending() {
            ascending.reverse()
        } else {
            ascending
        }
    }

    /// Stable sort of `requests` under this order.
    pub fn sort(self, requests: &mut [Request]) {
        if self == Order::Unsorted {
            return;
        }

        requests.sort_by(|a, b| self.compare(a.size, b.size));
    }
}

fn difference(size: Point) -> i64 {
    (i64::from(size.x) - i64::from(size.y)).abs()
}

impl Default for Order {
    fn default() -> Self {
        Order::Unsorted
    }
}

impl fmt::Display for Order {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for Order {
    type Err = String;

    fn from_str(value: &str) -> Result<Order, Self::Err> {
        Order::ALL
            .iter()
            .copied()
            .find(|order| order.name() == value)
            .ok_or_else(|| {
                let names: Vec<_> = Order::ALL.iter().map(|order| order.name()).collect();
                format!(
                    "Invalid sort order '{}'. Valid options are: {}",
                    value,
                    names.join(", ")
                )
            })
    }
}

/// Wraps a packer so that every batch is sorted before it is placed. Placement
/// itself is left entirely to the inner packer.
#[derive(Debug, Clone)]
pub struct SortedPacker<P> {
    inner: P,
    order: Order,
}

impl<P: Packer> SortedPacker<P> {
    pub fn new(inner: P, order: Order) -> Self {
        Self { inner, order }
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    #[inline]
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: Packer> Packer for SortedPacker<P> {
    fn name(&self) -> String {
        format!("{}.{}", self.inner.name(), self.order)
    }

    fn reset(&mut self, bounds: Point) {
        self.inner.reset(bounds);
    }

    fn add_rect(&mut self, size: Point) -> Option<Point> {
        self.inner.add_rect(size)
    }

    fn sort(&self, requests: &mut [Request]) {
        self.order.sort(requests);
    }

    fn is_y_ordered(&self) -> bool {
        self.inner.is_y_ordered()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::packer::MaxRectsBl;

    fn requests(sizes: &[(i32, i32)]) -> Vec<Request> {
        sizes
            .iter()
            .enumerate()
            .map(|(index, &size)| Request::new(index, size.into()))
            .collect()
    }

    fn sorted_indices(order: Order, sizes: &[(i32, i32)]) -> Vec<usize> {
        let mut requests = requests(sizes);
        order.sort(&mut requests);
        requests.iter().map(Request::index).collect()
    }

    #[test]
    fn names_round_trip() {
        for &order in Order::ALL {
            assert_eq!(order.to_string().parse::<Order>(), Ok(order));
        }

        assert!("Sideways".parse::<Order>().is_err());
    }

    #[test]
    fn width_and_height() {
        let sizes = [(3, 1), (1, 3), (2, 2), (3, 2)];

        assert_eq!(sorted_indices(Order::WidthDesc, &sizes), vec![3, 0, 2, 1]);
        assert_eq!(sorted_indices(Order::WidthAsc, &sizes), vec![1, 2, 0, 3]);
        assert_eq!(sorted_indices(Order::HeightDesc, &sizes), vec![1, 3, 2, 0]);
        assert_eq!(sorted_indices(Order::HeightAsc, &sizes), vec![0, 2, 3, 1]);
    }

    #[test]
    fn area_perimeter_difference() {
        let sizes = [(1, 8), (3, 3), (2, 2), (5, 1)];

        assert_eq!(sorted_indices(Order::AreaDesc, &sizes), vec![1, 0, 3, 2]);
        assert_eq!(sorted_indices(Order::AreaAsc, &sizes), vec![2, 3, 0, 1]);
        assert_eq!(sorted_indices(Order::PerimeterDesc, &sizes), vec![0, 1, 3, 2]);
        assert_eq!(sorted_indices(Order::PerimeterAsc, &sizes), vec![2, 1, 3, 0]);
        assert_eq!(sorted_indices(Order::DifferenceDesc, &sizes), vec![0, 3, 1, 2]);
        assert_eq!(sorted_indices(Order::DifferenceAsc, &sizes), vec![1, 2, 3, 0]);
    }

    #[test]
    fn ratio() {
        let sizes = [(1, 4), (4, 1), (2, 2), (3, 2)];

        assert_eq!(sorted_indices(Order::RatioDesc, &sizes), vec![1, 3, 2, 0]);
        assert_eq!(sorted_indices(Order::RatioAsc, &sizes), vec![0, 2, 3, 1]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        // Same area, perimeter, difference, and ratio in pairs.
        let sizes = [(2, 8), (4, 4), (8, 2), (4, 4), (2, 8)];

        assert_eq!(sorted_indices(Order::AreaDesc, &sizes), vec![0, 1, 2, 3, 4]);
        assert_eq!(sorted_indices(Order::AreaAsc, &sizes), vec![0, 1, 2, 3, 4]);
        assert_eq!(sorted_indices(Order::DifferenceDesc, &sizes), vec![0, 2, 4, 1, 3]);
        assert_eq!(sorted_indices(Order::RatioAsc, &sizes), vec![0, 4, 1, 3, 2]);
        assert_eq!(sorted_indices(Order::WidthDesc, &sizes), vec![2, 1, 3, 0, 4]);
        assert_eq!(sorted_indices(Order::Unsorted, &sizes), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn comparisons_are_symmetric() {
        let sizes = [
            Point::new(2, 8),
            Point::new(8, 2),
            Point::new(4, 4),
            Point::new(1, 16),
            Point::new(3, 5),
            Point::new(5, 3),
            Point::new(6, 6),
        ];

        for &order in Order::ALL {
            for &a in &sizes {
                for &b in &sizes {
                    assert_eq!(
                        order.compare(a, b),
                        order.compare(b, a).reverse(),
                        "{} is not symmetric for {} and {}",
                        order,
                        a,
                        b
                    );
                }

                assert_eq!(order.compare(a, a), Ordering::Equal);
            }
        }
    }

    #[test]
    fn decorator_names_and_delegates() {
        let mut packer = SortedPacker::new(MaxRectsBl::new(), Order::PerimeterAsc);

        assert_eq!(packer.name(), "MaxRects.BL.PerimeterAsc");
        assert!(packer.is_y_ordered());
        assert_eq!(packer.order(), Order::PerimeterAsc);

        packer.reset(Point::new(4, 4));
        assert_eq!(packer.add_rect(Point::new(2, 2)), Some(Point::new(0, 0)));
        assert_eq!(packer.inner().free_space().len(), 2);
    }
}
