//! rectpack packs rectangles into larger rectangles. It was built to lay out
//! texture atlases and font glyph sheets, where every image has to land in a
//! power-of-two texture without overlapping any other.
//!
//! Free space is tracked with the MaxRects method: a list of the largest free
//! rectangles left in the container. Placement heuristics implement the
//! [`Packer`][Packer] trait, and [`SortedPacker`][SortedPacker] composes any of
//! them with one of the sort orders in [`Order`][Order].
//!
//! Two drivers pick container sizes for you:
//!
//! - [`auto_pack_single`][auto_pack_single] grows a single container until
//!   everything fits.
//! - [`auto_pack_multiple`][auto_pack_multiple] fills as many fixed-size
//!   containers as it takes.
//!
//! ## Example
//! ```
//! use rectpack::{auto_pack_single, default_packer, Point};
//!
//! let sizes = &[Point::new(128, 64), Point::new(64, 64), Point::new(1, 300)];
//!
//! let mut packer = default_packer();
//! let packing = auto_pack_single(&mut packer, sizes).unwrap();
//!
//! // packing.positions()[i] is where sizes[i] ended up.
//! assert_eq!(packing.positions().len(), 3);
//! ```
//!
//! [Packer]: trait.Packer.html
//! [SortedPacker]: struct.SortedPacker.html
//! [Order]: enum.Order.html
//! [auto_pack_single]: fn.auto_pack_single.html
//! [auto_pack_multiple]: fn.auto_pack_multiple.html

mod auto;
mod error;
mod geometry;
mod max_rects;
mod order;
mod packer;
mod types;

pub use auto::*;
pub use error::*;
pub use geometry::*;
pub use max_rects::*;
pub use order::*;
pub use packer::*;
pub use types::*;
