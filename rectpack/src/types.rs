use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// A rectangle waiting to be packed.
///
/// `index` is the position of the rectangle in the caller's input, so results
/// can be handed back in input order no matter how the packer sorts its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub(crate) index: usize,
    pub(crate) size: Point,
}

impl Request {
    #[inline]
    pub fn new(index: usize, size: Point) -> Self {
        Self { index, size }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn size(&self) -> Point {
        self.size
    }
}

/// A request that found a home in a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub(crate) index: usize,
    pub(crate) size: Point,
    pub(crate) pos: Point,
}

impl Placement {
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// The result of packing everything into a single auto-sized container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinglePacking {
    pub(crate) bounds: Point,
    pub(crate) positions: Vec<Point>,
}

impl SinglePacking {
    /// The bounding box of all placed rectangles. Round this up to powers of
    /// two when the container has to be a power-of-two texture.
    #[inline]
    pub fn bounds(&self) -> Point {
        self.bounds
    }

    /// Positions of each input, in input order. Empty inputs sit at the origin.
    #[inline]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    #[inline]
    pub fn into_positions(self) -> Vec<Point> {
        self.positions
    }
}

/// A position inside one of several same-size containers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinPosition {
    pub bin: usize,
    pub pos: Point,
}

/// The result of packing into as many fixed-size containers as needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiPacking {
    pub(crate) bin_count: usize,
    pub(crate) positions: Vec<BinPosition>,
}

impl MultiPacking {
    #[inline]
    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    #[inline]
    pub fn positions(&self) -> &[BinPosition] {
        &self.positions
    }

    #[inline]
    pub fn into_positions(self) -> Vec<BinPosition> {
        self.positions
    }
}
