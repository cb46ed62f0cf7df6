use crate::geometry::{Point, Rect};

/// Tracks the free space inside a single container as a list of maximal free
/// rectangles.
///
/// Free rectangles may overlap each other, but together they cover exactly the
/// parts of the container that no placed rectangle covers, and no free
/// rectangle is contained in another one.
#[derive(Debug, Clone, Default)]
pub struct MaxRects {
    free: Vec<Rect>,
}

impl MaxRects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the free space to the whole of `bounds`, anchored at the origin.
    pub fn reset(&mut self, bounds: Point) {
        self.free.clear();

        if !bounds.is_empty() {
            self.free.push(Rect::new(Point::default(), bounds));
        }
    }

    #[inline]
    pub fn free_rects(&self) -> &[Rect] {
        &self.free
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Removes `placed` from the free space.
    ///
    /// Every free rectangle overlapping `placed` is replaced by the parts of it
    /// left over on each side of `placed`. Leftovers already covered by another
    /// free rectangle are dropped, and leftovers covering earlier leftovers
    /// take their place.
    pub fn place(&mut self, placed: Rect) {
        let free = &mut self.free;

        // free[..pos] was checked and does not touch `placed`.
        // free[pos..unsplit] has not been checked yet.
        // free[unsplit..] holds the leftovers produced by this call.
        let mut pos = 0;
        let mut unsplit = free.len();

        while pos < unsplit {
            let current = free[pos];
            if !placed.intersects(&current) {
                pos += 1;
                continue;
            }

            unsplit -= 1;
            free.swap(pos, unsplit);
            free.swap_remove(unsplit);

            let splits = splits_around(&current, &placed);
            for split in splits.iter().flatten() {
                insert_split(free, unsplit, *split);
            }
        }
    }
}

/// The parts of `free` left over on each side of `placed`, at most four. Each
/// keeps the extent of `free` on the other three sides.
fn splits_around(free: &Rect, placed: &Rect) -> [Option<Rect>; 4] {
    let mut splits = [None; 4];

    if placed.max.x < free.max.x {
        let mut right = *free;
        right.min.x = placed.max.x;
        splits[0] = Some(right);
    }

    if placed.max.y < free.max.y {
        let mut above = *free;
        above.min.y = placed.max.y;
        splits[1] = Some(above);
    }

    if placed.min.x > free.min.x {
        let mut left = *free;
        left.max.x = placed.min.x;
        splits[2] = Some(left);
    }

    if placed.min.y > free.min.y {
        let mut below = *free;
        below.max.y = placed.min.y;
        splits[3] = Some(below);
    }

    splits
}

fn insert_split(free: &mut Vec<Rect>, unsplit: usize, split: Rect) {
    if free.iter().any(|existing| existing.contains(&split)) {
        return;
    }

    // Only leftovers from this round can be swallowed by a new leftover; the
    // older free rectangles are maximal and `split` is a piece of one of them.
    let mut replaced = false;
    let mut index = unsplit;
    while index < free.len() {
        if split.contains(&free[index]) {
            if replaced {
                free.swap_remove(index);
                continue;
            }

            free[index] = split;
            replaced = true;
        }

        index += 1;
    }

    if !replaced {
        free.push(split);
    }
}
