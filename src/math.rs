//! Scalar and point aliases, and the constants of the face buffer encoding.

pub use na::{Point3, Vector3};

/// The scalar type used throughout this crate.
pub use f64 as Real;

/// The point type.
pub type Point = Point3<Real>;

/// The dimension of the space.
pub const DIM: usize = 3;

/// The arity marker written in front of every triangle of a face buffer.
pub const TRIANGLE_ARITY: u32 = 3;

/// The number of `u32` making one `[arity, i0, i1, i2]` face record.
pub const FACE_RECORD_STRIDE: usize = 4;

/// The offset added to zero-based indices when they are written to a face buffer.
pub const FACE_INDEX_BASE: u32 = 1;
