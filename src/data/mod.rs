mod atlas_manifest;
mod job;
mod layout;

pub use atlas_manifest::*;
pub use job::*;
pub use layout::*;
