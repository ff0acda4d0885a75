use crate::math::{Point, Real, FACE_INDEX_BASE, FACE_RECORD_STRIDE};
use approx::AbsDiffEq;

/// One convex hull, in the array-based output format.
///
/// The vertex array has the shape `(M, 3)`. The face array is a flat sequence of
/// `[3, a, b, c]` records where `a`, `b`, `c` are **one-based** indices into this hull's
/// own vertex array.
///
/// An `OutputHull` owns all its buffers: it never refers to memory of the engine that
/// produced it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutputHull {
    pub(crate) vertices: Vec<[Real; 3]>,
    pub(crate) faces: Vec<u32>,
}

impl OutputHull {
    /// The `(M, 3)` vertex array of this hull.
    pub fn vertices(&self) -> &[[Real; 3]] {
        &self.vertices
    }

    /// The flat `[3, a, b, c, 3, ...]` face array of this hull, with one-based indices.
    pub fn faces(&self) -> &[u32] {
        &self.faces
    }

    /// The shape `(M, 3)` of the vertex array.
    pub fn shape(&self) -> (usize, usize) {
        (self.vertices.len(), 3)
    }

    /// The number of vertices of this hull.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// The number of triangles of this hull.
    pub fn num_triangles(&self) -> usize {
        self.faces.len() / FACE_RECORD_STRIDE
    }

    /// Iterates through the triangles of this hull, with zero-based indices.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = [u32; 3]> + '_ {
        self.faces.chunks_exact(FACE_RECORD_STRIDE).map(|record| {
            [
                record[1] - FACE_INDEX_BASE,
                record[2] - FACE_INDEX_BASE,
                record[3] - FACE_INDEX_BASE,
            ]
        })
    }

    /// The vertices of this hull, as points.
    pub fn points(&self) -> Vec<Point> {
        self.vertices.iter().map(|v| Point::from(*v)).collect()
    }

    /// The volume enclosed by this hull.
    pub fn volume(&self) -> Real {
        let triangles: Vec<_> = self.triangles().collect();
        crate::engine::signed_volume(&self.points(), &triangles).abs()
    }

    /// Consumes `self` to return its vertex array and its face array.
    pub fn into_parts(self) -> (Vec<[Real; 3]>, Vec<u32>) {
        (self.vertices, self.faces)
    }
}

impl AbsDiffEq for OutputHull {
    type Epsilon = Real;

    fn default_epsilon() -> Real {
        Real::default_epsilon()
    }

    /// Two hulls are approximately equal if they have the same faces and their vertices
    /// are equal up to `epsilon`, in the same order.
    fn abs_diff_eq(&self, other: &Self, epsilon: Real) -> bool {
        self.faces == other.faces
            && self.vertices.len() == other.vertices.len()
            && self
                .vertices
                .iter()
                .zip(other.vertices.iter())
                .all(|(a, b)| a.iter().zip(b).all(|(x, y)| x.abs_diff_eq(y, epsilon)))
    }
}
