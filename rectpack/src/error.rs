use thiserror::Error;

use crate::geometry::Point;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    /// None of the container sizes that were tried could hold every rectangle.
    #[error("could not pack {count} rectangles")]
    PackFailed { count: usize },

    /// An input is larger than the fixed container size, so no number of
    /// containers will ever hold it.
    #[error("rectangle {index} ({size}) does not fit in a {bounds} container")]
    TooLarge {
        index: usize,
        size: Point,
        bounds: Point,
    },

    /// A fresh container accepted none of the remaining rectangles even though
    /// each of them fits in an empty container on its own. This is a bug in
    /// the packer.
    #[error("packer placed nothing in container {bin} with {remaining} rectangles left")]
    NoProgress { bin: usize, remaining: usize },
}
