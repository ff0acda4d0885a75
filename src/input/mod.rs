//! Validation and reshaping of the input buffers into the layout expected by the engine.

pub use self::faces::{triangulate_polygon_faces, triangulate_strided_faces, validate_indices};

use crate::error::{DecompositionError, Result};
use crate::math::{Point, Real, DIM};

mod faces;

/// A validated triangle mesh, ready to be submitted to a decomposition engine.
///
/// Every triangle index of an `InputMesh` is guaranteed to refer to one of its points,
/// and every coordinate is finite.
#[derive(Clone, Debug, PartialEq)]
pub struct InputMesh {
    points: Vec<Point>,
    triangles: Vec<[u32; 3]>,
}

impl InputMesh {
    /// Builds a mesh from an `(N, 3)` point array and a fixed-stride `[3, i0, i1, i2]` face buffer.
    pub fn from_strided_faces(points: &[[Real; 3]], faces: &[u32]) -> Result<Self> {
        let triangles = triangulate_strided_faces(faces)?;
        validate_indices(&triangles, points.len())?;
        let points = convert_points(points)?;

        log::debug!(
            "num_points = {}, num_faces = {}, num_triangle_indices = {}",
            points.len(),
            triangles.len(),
            triangles.len() * 3
        );

        Ok(Self { points, triangles })
    }

    /// Builds a mesh from a flat `[x0, y0, z0, x1, ...]` point buffer and a fixed-stride face buffer.
    pub fn from_flat_points(points: &[Real], faces: &[u32]) -> Result<Self> {
        if points.len() % DIM != 0 {
            return Err(DecompositionError::MalformedPoints { len: points.len() });
        }

        let points: Vec<[Real; 3]> = points
            .chunks_exact(DIM)
            .map(|pt| [pt[0], pt[1], pt[2]])
            .collect();
        Self::from_strided_faces(&points, faces)
    }

    /// Builds a mesh from an `(N, 3)` point array and a variable-arity `[n, i0, .., i(n-1)]`
    /// polygon buffer.
    ///
    /// Polygons are fan-triangulated, see [`triangulate_polygon_faces`]. Errors
    /// report the index of the polygon record, not of the generated triangle.
    pub fn from_polygon_faces(points: &[[Real; 3]], faces: &[u32]) -> Result<Self> {
        let (triangles, origins) = triangulate_polygon_faces(faces)?;

        if let Err(DecompositionError::IndexOutOfRange {
            face,
            index,
            num_points,
        }) = validate_indices(&triangles, points.len())
        {
            return Err(DecompositionError::IndexOutOfRange {
                face: origins[face],
                index,
                num_points,
            });
        }

        let points = convert_points(points)?;

        log::debug!(
            "num_points = {}, num_polygons = {}, num_triangles = {}",
            points.len(),
            origins.last().map(|f| f + 1).unwrap_or(0),
            triangles.len()
        );

        Ok(Self { points, triangles })
    }

    /// Builds a mesh from already triangulated buffers.
    pub fn from_triangles(points: Vec<Point>, triangles: Vec<[u32; 3]>) -> Result<Self> {
        validate_indices(&triangles, points.len())?;
        check_finite(&points)?;
        Ok(Self { points, triangles })
    }

    /// The vertices of this mesh.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The zero-based triangles of this mesh.
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// The triangle index buffer, flattened to `[i0, i1, i2, j0, j1, j2, ...]`.
    pub fn flat_triangles(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Consumes `self` to return its points and triangles.
    pub fn into_parts(self) -> (Vec<Point>, Vec<[u32; 3]>) {
        (self.points, self.triangles)
    }
}

fn convert_points(points: &[[Real; 3]]) -> Result<Vec<Point>> {
    let points: Vec<Point> = points.iter().map(|pt| Point::from(*pt)).collect();
    check_finite(&points)?;
    Ok(points)
}

fn check_finite(points: &[Point]) -> Result<()> {
    match points
        .iter()
        .position(|pt| pt.iter().any(|x| !x.is_finite()))
    {
        Some(point) => Err(DecompositionError::NonFinitePoint { point }),
        None => Ok(()),
    }
}
