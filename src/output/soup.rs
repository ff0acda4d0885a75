use super::OutputHull;
use crate::error::Result;
use crate::math::{Real, FACE_RECORD_STRIDE};
use std::ops::Range;

/// The location of one hull inside a [`HullSoup`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HullRange {
    /// Range of the hull's vertices in [`HullSoup::vertices`].
    pub vertices: Range<usize>,
    /// Range of the hull's triangles, counted in face records of [`HullSoup::faces`].
    pub triangles: Range<usize>,
}

/// Every convex hull of a decomposition, concatenated into a single polygon soup.
///
/// The vertex array is the concatenation of every hull's vertices, in hull order. The face
/// array is made of `[3, a, b, c]` records whose one-based indices address the
/// **combined** vertex array: the indices of a hull are offset by the total vertex count of
/// the hulls before it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HullSoup {
    pub(crate) vertices: Vec<[Real; 3]>,
    pub(crate) faces: Vec<u32>,
    pub(crate) hulls: Vec<HullRange>,
}

impl HullSoup {
    /// Concatenates locally-indexed hulls.
    pub fn from_hulls(hulls: &[OutputHull]) -> Result<Self> {
        let mut soup = HullSoup::default();

        for hull in hulls {
            let base = soup.vertices.len();
            let last = base + hull.vertices.len();
            let offset = super::index_offset(base, hull.vertices.len())?;

            soup.vertices.extend_from_slice(&hull.vertices);
            let first_triangle = soup.faces.len() / FACE_RECORD_STRIDE;

            for record in hull.faces.chunks_exact(FACE_RECORD_STRIDE) {
                soup.faces.extend_from_slice(&[
                    record[0],
                    record[1] + offset,
                    record[2] + offset,
                    record[3] + offset,
                ]);
            }

            soup.hulls.push(HullRange {
                vertices: base..last,
                triangles: first_triangle..soup.faces.len() / FACE_RECORD_STRIDE,
            });
        }

        Ok(soup)
    }

    /// The combined `(M, 3)` vertex array.
    pub fn vertices(&self) -> &[[Real; 3]] {
        &self.vertices
    }

    /// The combined face array, with one-based indices into [`Self::vertices`].
    pub fn faces(&self) -> &[u32] {
        &self.faces
    }

    /// The location of each hull in the combined arrays.
    pub fn hulls(&self) -> &[HullRange] {
        &self.hulls
    }

    /// The number of hulls in this soup.
    pub fn num_hulls(&self) -> usize {
        self.hulls.len()
    }

    /// Splits this soup back into locally-indexed hulls.
    pub fn to_hulls(&self) -> Vec<OutputHull> {
        self.hulls
            .iter()
            .map(|range| {
                let offset = range.vertices.start as u32;
                let faces = self.faces[range.triangles.start * FACE_RECORD_STRIDE
                    ..range.triangles.end * FACE_RECORD_STRIDE]
                    .chunks_exact(FACE_RECORD_STRIDE)
                    .flat_map(|r| [r[0], r[1] - offset, r[2] - offset, r[3] - offset])
                    .collect();

                OutputHull {
                    vertices: self.vertices[range.vertices.clone()].to_vec(),
                    faces,
                }
            })
            .collect()
    }

    /// Writes this soup as a Wavefront (`.obj`) file, with one object per hull.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    #[cfg(feature = "wavefront")]
    pub fn write_obj(&self, out: &mut impl std::io::Write) -> std::result::Result<(), obj::ObjError> {
        use obj::{Group, IndexTuple, ObjData, Object, SimplePolygon};

        let objects = self
            .hulls
            .iter()
            .enumerate()
            .map(|(i, range)| Object {
                name: format!("hull_{i}"),
                groups: vec![Group {
                    name: String::new(),
                    index: 0,
                    material: None,
                    polys: self.faces[range.triangles.start * FACE_RECORD_STRIDE
                        ..range.triangles.end * FACE_RECORD_STRIDE]
                        .chunks_exact(FACE_RECORD_STRIDE)
                        .map(|r| {
                            // `obj` indices are zero-based.
                            SimplePolygon(
                                r[1..]
                                    .iter()
                                    .map(|i| IndexTuple(*i as usize - 1, None, None))
                                    .collect(),
                            )
                        })
                        .collect(),
                }],
            })
            .collect();

        ObjData {
            position: self
                .vertices
                .iter()
                .map(|v| [v[0] as f32, v[1] as f32, v[2] as f32])
                .collect(),
            objects,
            ..Default::default()
        }
        .write_to_buf(out)
    }
}
