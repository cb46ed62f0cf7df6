use std::{
    convert::TryFrom,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::{bail, Context};
use fs_err as fs;
use rectpack::{auto_pack_multiple, auto_pack_single, BinPosition, Packer, Point};
use walkdir::WalkDir;

use crate::{
    asset_name::AssetName,
    commands::resolve_packer,
    data::{AtlasManifest, ImageSlice, PageManifest},
    glob::Glob,
    image::{Image, ImageError},
    options::AtlasOptions,
};

pub fn atlas(options: AtlasOptions) -> anyhow::Result<()> {
    let glob = Glob::new(&options.glob)?;
    let page_size = match &options.max_size {
        Some(max_size) => Some(parse_page_size(max_size)?),
        None => None,
    };
    let mut packer = resolve_packer(options.algorithm.as_deref())?;

    let inputs = discover_inputs(&options.input, &glob)?;
    log::info!(
        "Packing {} images from {} with {}",
        inputs.len(),
        options.input.display(),
        packer.name()
    );

    fs::create_dir_all(&options.output)?;
    let manifest = build_atlas(&mut packer, &inputs, page_size, &options.output)?;
    manifest.write_to_folder(&options.output)?;

    log::info!(
        "Wrote {} atlas pages to {}",
        manifest.pages.len(),
        options.output.display()
    );

    Ok(())
}

/// Largest atlas page side, matching the texture size limit of common GPUs.
const MAX_PAGE_SIDE: i32 = 16384;

/// An image that was found on disk and should be packed into the atlas.
struct AtlasInput {
    name: AssetName,
    image: Image,
}

fn parse_page_size(values: &[i32]) -> anyhow::Result<Point> {
    let size = match values {
        &[width, height] if width > 0 && height > 0 => Point::new(width, height),
        _ => bail!("--max-size takes a positive width and height, got {:?}", values),
    };

    check_page_size(size)?;
    Ok(size)
}

fn check_page_size(size: Point) -> anyhow::Result<()> {
    if size.x > MAX_PAGE_SIDE || size.y > MAX_PAGE_SIDE {
        bail!(
            "atlas page of {} is larger than the maximum of {}x{}",
            size,
            MAX_PAGE_SIDE,
            MAX_PAGE_SIDE
        );
    }

    Ok(())
}

/// Finds every file under `root` that matches `glob` and decodes it. Images
/// in formats we can't handle are skipped with a warning.
fn discover_inputs(root: &Path, glob: &Glob) -> anyhow::Result<Vec<AtlasInput>> {
    let search_path = root.join(glob.get_prefix());
    log::trace!(
        "Searching for images in '{}' matching '{}'",
        search_path.display(),
        glob
    );

    let mut inputs = Vec::new();

    for entry in WalkDir::new(&search_path) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = match AssetName::from_paths(root, entry.path()) {
            Some(name) => name,
            None => continue,
        };

        if !glob.is_match(name.as_ref()) {
            continue;
        }

        let file = BufReader::new(fs::File::open(entry.path())?);
        match Image::decode_png(file) {
            Ok(image) => {
                log::trace!("Found image {} ({:?})", name, image.size());
                inputs.push(AtlasInput { name, image });
            }
            Err(err @ ImageError::Unsupported { .. }) => {
                log::warn!("Skipping {}: {}", name, err);
            }
            Err(err) => {
                return Err(err).with_context(|| format!("could not decode {}", name));
            }
        }
    }

    // Walk order depends on the file system; packing should not.
    inputs.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(inputs)
}

/// Packs the inputs, writes each atlas page as a PNG into `output`, and
/// returns the manifest describing them.
fn build_atlas<P>(
    packer: &mut P,
    inputs: &[AtlasInput],
    page_size: Option<Point>,
    output: &Path,
) -> anyhow::Result<AtlasManifest>
where
    P: Packer + ?Sized,
{
    let sizes = inputs
        .iter()
        .map(image_size)
        .collect::<anyhow::Result<Vec<Point>>>()?;

    let (page_sizes, positions) = match page_size {
        Some(page_size) => {
            let packing = auto_pack_multiple(packer, page_size, &sizes)?;
            let page_sizes = vec![page_size; packing.bin_count()];

            (page_sizes, packing.into_positions())
        }
        None => {
            let packing = auto_pack_single(packer, &sizes)?;
            let page_sizes = if inputs.is_empty() {
                Vec::new()
            } else {
                let page_size = packing.bounds().round_up_pow2();
                check_page_size(page_size)?;

                vec![page_size]
            };
            let positions = packing
                .into_positions()
                .into_iter()
                .map(|pos| BinPosition { bin: 0, pos })
                .collect();

            (page_sizes, positions)
        }
    };

    let mut pages = page_sizes
        .iter()
        .map(|size| Image::new_empty_rgba8((size.x as u32, size.y as u32)))
        .collect::<Result<Vec<Image>, ImageError>>()?;

    let mut manifest = AtlasManifest::default();

    for (input, position) in inputs.iter().zip(&positions) {
        let min = (position.pos.x as u32, position.pos.y as u32);
        let (width, height) = input.image.size();

        pages[position.bin].blit(&input.image, min);

        manifest.images.insert(
            input.name.clone(),
            ImageSlice {
                page: position.bin,
                min,
                max: (min.0 + width, min.1 + height),
            },
        );
    }

    for (index, page) in pages.iter().enumerate() {
        let file_name = format!("atlas-{}.png", index);
        let file_path = output.join(&file_name);

        let mut file = BufWriter::new(fs::File::create(&file_path)?);
        page.encode_png(&mut file)
            .with_context(|| format!("could not encode {}", file_path.display()))?;
        file.flush()?;

        log::trace!("Wrote atlas page {}", file_path.display());

        manifest.pages.push(PageManifest {
            file: file_name,
            size: page.size(),
        });
    }

    Ok(manifest)
}

fn image_size(input: &AtlasInput) -> anyhow::Result<Point> {
    let (width, height) = input.image.size();
    let width = i32::try_from(width)
        .with_context(|| format!("{} is too wide to pack", input.name))?;
    let height = i32::try_from(height)
        .with_context(|| format!("{} is too tall to pack", input.name))?;

    Ok(Point::new(width, height))
}
