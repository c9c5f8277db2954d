// Voxel file decoding and mesh/texture export

pub mod obj;
pub mod vox;

pub use obj::{save_obj, write_obj};
pub use vox::{load_vox_from_bytes, load_vox_from_file};
