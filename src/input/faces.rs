use crate::error::{DecompositionError, Result};
use crate::math::{FACE_RECORD_STRIDE, TRIANGLE_ARITY};

/// Packs a fixed-stride face buffer into a triangle index buffer.
///
/// The face buffer is made of `[3, i0, i1, i2]` records. The resulting buffer contains
/// one `[i0, i1, i2]` triangle per record, in the same order.
///
/// # Errors
///
/// - [`DecompositionError::MalformedFaces`] if `faces.len()` is not a multiple of 4.
/// - [`DecompositionError::UnsupportedArity`] if a record declares an arity other than 3.
///
/// Indices are not checked against any point buffer here, see [`validate_indices`].
///
/// ```
/// use decomp3d::input::triangulate_strided_faces;
///
/// let faces = [3, 0, 1, 2, 3, 2, 1, 3];
/// let triangles = triangulate_strided_faces(&faces).unwrap();
/// assert_eq!(triangles, vec![[0, 1, 2], [2, 1, 3]]);
/// ```
pub fn triangulate_strided_faces(faces: &[u32]) -> Result<Vec<[u32; 3]>> {
    if faces.len() % FACE_RECORD_STRIDE != 0 {
        return Err(DecompositionError::MalformedFaces { len: faces.len() });
    }

    faces
        .chunks_exact(FACE_RECORD_STRIDE)
        .enumerate()
        .map(|(face, record)| {
            if record[0] != TRIANGLE_ARITY {
                return Err(DecompositionError::UnsupportedArity {
                    face,
                    arity: record[0],
                });
            }

            Ok([record[1], record[2], record[3]])
        })
        .collect()
}

/// Triangulates a variable-arity polygon face buffer.
///
/// The face buffer is made of `[n, i0, .., i(n-1)]` records of varying lengths. Each
/// polygon is split into `n - 2` triangles fanning out of its first vertex, so it is
/// expected to be convex (or at least star-shaped from its first vertex).
///
/// The `face` reported by errors is the index of the polygon record, not the index of
/// a generated triangle.
pub fn triangulate_polygon_faces(faces: &[u32]) -> Result<(Vec<[u32; 3]>, Vec<usize>)> {
    let mut triangles = Vec::new();
    // For each triangle, the polygon record it comes from.
    let mut origins = Vec::new();
    let mut offset = 0;
    let mut face = 0;

    while offset < faces.len() {
        let arity = faces[offset];

        if arity < TRIANGLE_ARITY {
            return Err(DecompositionError::UnsupportedArity { face, arity });
        }

        let end = offset + 1 + arity as usize;
        let polygon = faces
            .get(offset + 1..end)
            .ok_or(DecompositionError::TruncatedPolygon { offset })?;

        for k in 1..polygon.len() - 1 {
            triangles.push([polygon[0], polygon[k], polygon[k + 1]]);
            origins.push(face);
        }

        offset = end;
        face += 1;
    }

    Ok((triangles, origins))
}

/// Checks that every index of `triangles` refers to one of `num_points` points.
///
/// The error reports the first offending triangle.
pub fn validate_indices(triangles: &[[u32; 3]], num_points: usize) -> Result<()> {
    for (face, triangle) in triangles.iter().enumerate() {
        if let Some(&index) = triangle.iter().find(|&&i| i as usize >= num_points) {
            return Err(DecompositionError::IndexOutOfRange {
                face,
                index,
                num_points,
            });
        }
    }

    Ok(())
}
