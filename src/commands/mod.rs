mod atlas;
mod bench;
mod pack;

pub use atlas::*;
pub use bench::*;
pub use pack::*;

use rectpack::{all_packers, default_packer, find_packer, Packer};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unknown algorithm '{name}'. Valid options are: {}", valid.join(", "))]
pub struct UnknownAlgorithm {
    name: String,
    valid: Vec<String>,
}

/// Looks up a packer by name, falling back to the default packer when no name
/// is given.
pub fn resolve_packer(name: Option<&str>) -> Result<Box<dyn Packer + Send>, UnknownAlgorithm> {
    let name = match name {
        Some(name) => name,
        None => return Ok(Box::new(default_packer())),
    };

    find_packer(name).ok_or_else(|| UnknownAlgorithm {
        name: name.to_owned(),
        valid: all_packers().iter().map(|packer| packer.name()).collect(),
    })
}
