use std::{
    io,
    path::{Path, PathBuf},
};

use fs_err as fs;
use rectpack::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A batch of rectangles to pack, read from a TOML job file.
///
/// ```toml
/// name = "glyphs"
/// algorithm = "MaxRects.BL.HeightDesc"
/// bin-size = [256, 256]
/// sizes = [[50, 50], [50, 50], [30, 70]]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PackJob {
    /// The name of the job, currently only used in logs and output.
    pub name: String,

    /// The packing algorithm to use. Uses the default packer if not given.
    #[serde(default)]
    pub algorithm: Option<String>,

    /// If given, rectangles are packed into as many containers of this size as
    /// needed instead of one container sized to fit.
    #[serde(default)]
    pub bin_size: Option<(i32, i32)>,

    /// Width and height of each rectangle. Rectangles with no area are allowed
    /// and are placed at the origin.
    #[serde(default)]
    pub sizes: Vec<(i32, i32)>,
}

impl PackJob {
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, JobError> {
        let path = path.as_ref();
        let contents = fs::read(path)?;

        let job: Self = toml::from_slice(&contents).map_err(|source| JobError::Toml {
            path: path.to_owned(),
            source,
        })?;

        if let Some((width, height)) = job.bin_size {
            if width <= 0 || height <= 0 {
                return Err(JobError::InvalidBinSize {
                    path: path.to_owned(),
                    width,
                    height,
                });
            }
        }

        log::trace!("Read job \"{}\" from {}", job.name, path.display());

        Ok(job)
    }

    pub fn sizes(&self) -> Vec<Point> {
        self.sizes.iter().map(|&size| size.into()).collect()
    }

    pub fn bin_size(&self) -> Option<Point> {
        self.bin_size.map(Point::from)
    }
}

#[derive(Debug, Error)]
pub enum JobError {
    #[error("{} in {}", source, path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("bin size {width}x{height} in {} must be positive", path.display())]
    InvalidBinSize {
        path: PathBuf,
        width: i32,
        height: i32,
    },

    #[error(transparent)]
    Io {
        #[from]
        source: io::Error,
    },
}
