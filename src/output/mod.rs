//! Repackaging of the engine's hull records into independent output buffers.

pub use self::assembler::{assemble_combined, assemble_hulls};
pub use self::hull::OutputHull;
pub use self::soup::{HullRange, HullSoup};

use crate::error::{DecompositionError, Result};

mod assembler;
mod hull;
mod soup;

/// The zero-based offset of a hull whose `num_vertices` vertices are appended after
/// `base` other vertices.
///
/// Fails if one of the hull's indices would not fit in a `u32` face index.
pub(crate) fn index_offset(base: usize, num_vertices: usize) -> Result<u32> {
    let last = match base.checked_add(num_vertices) {
        Some(last) => last,
        None => return Err(DecompositionError::IndexOverflow),
    };
    if u32::try_from(last).is_err() {
        return Err(DecompositionError::IndexOverflow);
    }
    u32::try_from(base).map_err(|_| DecompositionError::IndexOverflow)
}
