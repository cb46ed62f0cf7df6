use rectpack::{MultiPacking, Point, SinglePacking};
use serde::Serialize;

/// Where every rectangle of a job ended up, written out by 'texpack pack'.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Layout {
    pub name: String,
    pub algorithm: String,

    /// The bounding box of a single-container packing. Not present when the
    /// job packed into fixed-size bins.
    pub bounds: Option<(i32, i32)>,

    pub bin_count: usize,
    pub rects: Vec<LayoutRect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutRect {
    pub index: usize,
    pub bin: usize,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Layout {
    pub fn from_single(
        name: String,
        algorithm: String,
        sizes: &[Point],
        packing: &SinglePacking,
    ) -> Self {
        let rects = sizes
            .iter()
            .zip(packing.positions())
            .enumerate()
            .map(|(index, (size, pos))| LayoutRect::new(index, 0, *pos, *size))
            .collect();

        let bounds = packing.bounds();
        let bin_count = if bounds.is_empty() { 0 } else { 1 };

        Self {
            name,
            algorithm,
            bounds: Some((bounds.x, bounds.y)),
            bin_count,
            rects,
        }
    }

    pub fn from_multiple(
        name: String,
        algorithm: String,
        sizes: &[Point],
        packing: &MultiPacking,
    ) -> Self {
        let rects = sizes
            .iter()
            .zip(packing.positions())
            .enumerate()
            .map(|(index, (size, position))| {
                LayoutRect::new(index, position.bin, position.pos, *size)
            })
            .collect();

        Self {
            name,
            algorithm,
            bounds: None,
            bin_count: packing.bin_count(),
            rects,
        }
    }
}

impl LayoutRect {
    fn new(index: usize, bin: usize, pos: Point, size: Point) -> Self {
        Self {
            index,
            bin,
            x: pos.x,
            y: pos.y,
            width: size.x,
            height: size.y,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use rectpack::{auto_pack_multiple, auto_pack_single, default_packer};

    #[test]
    fn single_layout_json() {
        let sizes = vec![Point::new(8, 8), Point::new(0, 3)];
        let packing = auto_pack_single(&mut default_packer(), &sizes).unwrap();
        let layout = Layout::from_single("one".into(), "default".into(), &sizes, &packing);

        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "one",
                "algorithm": "default",
                "bounds": [8, 8],
                "bin-count": 1,
                "rects": [
                    { "index": 0, "bin": 0, "x": 0, "y": 0, "width": 8, "height": 8 },
                    { "index": 1, "bin": 0, "x": 0, "y": 0, "width": 0, "height": 3 },
                ],
            })
        );
    }

    #[test]
    fn multiple_layout() {
        let sizes = vec![Point::new(40, 40); 3];
        let packing =
            auto_pack_multiple(&mut default_packer(), Point::new(64, 64), &sizes).unwrap();
        let layout = Layout::from_multiple("bins".into(), "default".into(), &sizes, &packing);

        assert_eq!(layout.bounds, None);
        assert_eq!(layout.bin_count, 3);
        let bins: Vec<usize> = layout.rects.iter().map(|rect| rect.bin).collect();
        assert_eq!(bins, vec![0, 1, 2]);
    }
}
