use std::{
    collections::BTreeMap,
    io::{self, BufWriter, Write},
    path::Path,
};

use fs_err as fs;
use serde::{Deserialize, Serialize};

use crate::asset_name::AssetName;

static MANIFEST_FILENAME: &str = "atlas.json";

/// Describes the pages written by 'texpack atlas' and which part of which page
/// holds each input image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtlasManifest {
    pub pages: Vec<PageManifest>,
    pub images: BTreeMap<AssetName, ImageSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageManifest {
    /// File name of the page, relative to the manifest.
    pub file: String,
    pub size: (u32, u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSlice {
    pub page: usize,
    pub min: (u32, u32),
    pub max: (u32, u32),
}

impl AtlasManifest {
    #[cfg(test)]
    pub fn read_from_folder<P: AsRef<Path>>(folder_path: P) -> Result<Self, io::Error> {
        let file_path = folder_path.as_ref().join(MANIFEST_FILENAME);
        let contents = fs::read(&file_path)?;

        serde_json::from_slice(&contents).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }

    pub fn write_to_folder<P: AsRef<Path>>(&self, folder_path: P) -> Result<(), io::Error> {
        let file_path = folder_path.as_ref().join(MANIFEST_FILENAME);

        let mut file = BufWriter::new(fs::File::create(&file_path)?);
        serde_json::to_writer_pretty(&mut file, self)?;
        file.flush()?;

        log::trace!("Saved atlas manifest to {}", file_path.display());

        Ok(())
    }
}
