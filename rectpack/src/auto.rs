use crate::{
    error::PackError,
    geometry::{round_up_pow2, Point},
    packer::Packer,
    types::{BinPosition, MultiPacking, Placement, Request, SinglePacking},
};

/// How many times the starting container size is doubled before giving up.
const MAX_DOUBLINGS: u32 = 5;

/// Packs every rectangle into one container, growing the container as needed.
///
/// The container is sized to keep the bounding box small once it is rounded up
/// to powers of two. Returns the bounding box and the position of each input
/// in input order. Inputs with no area are placed at the origin and don't
/// count towards the bounds.
pub fn auto_pack_single<P>(packer: &mut P, sizes: &[Point]) -> Result<SinglePacking, PackError>
where
    P: Packer + ?Sized,
{
    let batch = Batch::new(packer, sizes);
    if batch.requests.is_empty() {
        return Ok(SinglePacking {
            bounds: Point::default(),
            positions: vec![Point::default(); sizes.len()],
        });
    }

    log::trace!(
        "Packing {} rectangles with {} (widest {}, tallest {}, area {})",
        batch.requests.len(),
        packer.name(),
        batch.max_width,
        batch.max_height,
        batch.area
    );

    let placements = if packer.is_y_ordered() {
        pack_by_width(packer, &batch)
    } else {
        pack_by_bounds(packer, &batch)
    };

    let placements = placements.ok_or(PackError::PackFailed {
        count: batch.requests.len(),
    })?;
    let bounds = placement_bounds(&placements);

    log::debug!(
        "Packed {} rectangles into {} with {}",
        placements.len(),
        bounds,
        packer.name()
    );

    let mut positions = vec![Point::default(); sizes.len()];
    for placement in &placements {
        positions[placement.index] = placement.pos;
    }

    Ok(SinglePacking { bounds, positions })
}

/// Packs every rectangle into as many containers of size `bounds` as it takes.
///
/// Returns the number of containers used and, for each input in input order,
/// the container it went into and its position there. Inputs with no area are
/// reported at the origin of container 0 and don't count towards the number
/// of containers, so if every input is empty the result has a `bin_count` of 0
/// while each position still names container 0.
pub fn auto_pack_multiple<P>(
    packer: &mut P,
    bounds: Point,
    sizes: &[Point],
) -> Result<MultiPacking, PackError>
where
    P: Packer + ?Sized,
{
    let batch = Batch::new(packer, sizes);

    if let Some(request) = batch
        .requests
        .iter()
        .find(|request| request.size.x > bounds.x || request.size.y > bounds.y)
    {
        return Err(PackError::TooLarge {
            index: request.index,
            size: request.size,
            bounds,
        });
    }

    let mut positions = vec![BinPosition::default(); sizes.len()];
    let mut remaining = batch.requests;
    let mut bin_count = 0;

    while !remaining.is_empty() {
        log::trace!(
            "Packing {} remaining rectangles into container {}",
            remaining.len(),
            bin_count
        );

        packer.reset(bounds);
        let (placed, unplaced) = place_all(packer, &remaining);

        if placed.is_empty() {
            return Err(PackError::NoProgress {
                bin: bin_count,
                remaining: remaining.len(),
            });
        }

        for placement in placed {
            positions[placement.index] = BinPosition {
                bin: bin_count,
                pos: placement.pos,
            };
        }

        remaining = unplaced;
        bin_count += 1;
    }

    log::debug!(
        "Packed {} rectangles into {} containers of size {} with {}",
        sizes.len(),
        bin_count,
        bounds,
        packer.name()
    );

    Ok(MultiPacking {
        bin_count,
        positions,
    })
}

/// The non-empty inputs of one packing call, sorted for the packer, along with
/// the numbers used to pick starting container sizes.
struct Batch {
    requests: Vec<Request>,
    max_width: i32,
    max_height: i32,
    area: i64,
}

impl Batch {
    fn new<P: Packer + ?Sized>(packer: &P, sizes: &[Point]) -> Self {
        let mut requests = Vec::with_capacity(sizes.len());
        let mut max_width = 0;
        let mut max_height = 0;
        let mut area = 0;

        for (index, &size) in sizes.iter().enumerate() {
            if size.is_empty() {
                continue;
            }

            requests.push(Request::new(index, size));
            max_width = max_width.max(size.x);
            max_height = max_height.max(size.y);
            area += size.area();
        }

        packer.sort(&mut requests);

        Self {
            requests,
            max_width,
            max_height,
            area,
        }
    }
}

/// For packers that fill from the bottom up: fix the width, let the height
/// grow without limit, and read back how tall the packing got.
fn pack_by_width<P>(packer: &mut P, batch: &Batch) -> Option<Vec<Placement>>
where
    P: Packer + ?Sized,
{
    let mut width = round_up_pow2(batch.max_width);
    while i64::from(width) * i64::from(width) * 4 <= batch.area {
        width = width.checked_mul(2)?;
    }

    let mut best: Option<(Point, Vec<Placement>)> = None;

    for doubling in 0..MAX_DOUBLINGS {
        let trial_width = match width.checked_mul(1 << doubling) {
            Some(trial_width) => trial_width,
            None => break,
        };

        packer.reset(Point::new(trial_width, i32::MAX));
        let (placed, unplaced) = place_all(packer, &batch.requests);

        if !unplaced.is_empty() {
            log::trace!(
                "Width {} left {} rectangles unplaced",
                trial_width,
                unplaced.len()
            );
            continue;
        }

        let padded = placement_bounds(&placed).round_up_pow2();
        log::trace!("Width {} packs into padded size {}", trial_width, padded);

        let is_better = match &best {
            Some((best_padded, _)) => padded.better_than(*best_padded),
            None => true,
        };
        if is_better {
            best = Some((padded, placed));
        }

        // Making the container wider can't make it any squarer from here.
        if padded.x >= padded.y {
            break;
        }
    }

    best.map(|(_, placements)| placements)
}

/// For packers with no particular fill order: try a few fixed container sizes
/// in order of preference and take the first that holds everything.
fn pack_by_bounds<P>(packer: &mut P, batch: &Batch) -> Option<Vec<Placement>>
where
    P: Packer + ?Sized,
{
    let mut size = batch.max_width.max(batch.max_height);
    while i64::from(size) * i64::from(size) * 2 <= batch.area {
        size = size.checked_mul(2)?;
    }

    for doubling in 0..MAX_DOUBLINGS {
        let side = size.checked_mul(1 << doubling)?;
        let double_side = side.checked_mul(2)?;

        let trials = [
            Point::new(side, side),
            Point::new(double_side, side),
            Point::new(side, double_side),
        ];

        for &trial in &trials {
            packer.reset(trial);
            let (placed, unplaced) = place_all(packer, &batch.requests);

            if unplaced.is_empty() {
                return Some(placed);
            }

            log::trace!(
                "Container {} left {} rectangles unplaced",
                trial,
                unplaced.len()
            );
        }
    }

    None
}

/// Offers every request to the packer in order. Returns the requests that were
/// placed and the ones that didn't fit, each in their original relative order.
fn place_all<P>(packer: &mut P, requests: &[Request]) -> (Vec<Placement>, Vec<Request>)
where
    P: Packer + ?Sized,
{
    let mut placed = Vec::with_capacity(requests.len());
    let mut unplaced = Vec::new();

    for request in requests {
        match packer.add_rect(request.size) {
            Some(pos) => placed.push(Placement {
                index: request.index,
                size: request.size,
                pos,
            }),
            None => unplaced.push(*request),
        }
    }

    (placed, unplaced)
}

fn placement_bounds(placements: &[Placement]) -> Point {
    placements
        .iter()
        .fold(Point::default(), |bounds, placement| {
            let max = placement.rect().max;
            Point::new(bounds.x.max(max.x), bounds.y.max(max.y))
        })
}
