use std::{
    fmt,
    path::{self, Path},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

/// The name of an input image: its path relative to the atlas input folder,
/// always separated with forward slashes.
///
/// This is really just a string, but an explicit type keeps manifest keys from
/// being mixed up with file system paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetName(Arc<str>);

impl AssetName {
    /// Returns `None` if `asset_path` is not inside `root_path`.
    pub fn from_paths(root_path: &Path, asset_path: &Path) -> Option<Self> {
        let relative = asset_path.strip_prefix(root_path).ok()?;

        let displayed = format!("{}", relative.display());

        // In order to make relative paths behave cross-platform, fix the path
        // separator to always be / on platforms where it isn't the main separator.
        let displayed = if path::MAIN_SEPARATOR == '/' {
            displayed
        } else {
            displayed.replace(path::MAIN_SEPARATOR, "/")
        };

        Some(AssetName(displayed.into()))
    }
}

impl AsRef<str> for AssetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn relative_names() {
        let root = Path::new("assets");

        let name = AssetName::from_paths(root, &root.join("icons").join("close.png")).unwrap();
        assert_eq!(name.as_ref(), "icons/close.png");

        assert!(AssetName::from_paths(root, Path::new("elsewhere/close.png")).is_none());
    }
}
