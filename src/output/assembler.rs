use super::{HullRange, HullSoup, OutputHull};
use crate::engine::{ConvexHullRecord, DecompositionEngine};
use crate::error::{DecompositionError, Result};
use crate::math::{Real, FACE_INDEX_BASE, FACE_RECORD_STRIDE, TRIANGLE_ARITY};

/// Copies every hull of a completed engine into independent, locally-indexed output hulls.
///
/// `result[i]` is the engine's `i`-th hull. Face indices are one-based within each hull's
/// own vertex array, no offset is carried from one hull to the next.
pub fn assemble_hulls<E: DecompositionEngine + ?Sized>(engine: &E) -> Result<Vec<OutputHull>> {
    let num_hulls = engine.hull_count();
    let mut result = Vec::with_capacity(num_hulls);

    if num_hulls > 0 {
        log::debug!(
            "Exporting convex decomposition results of {} convex hulls.",
            num_hulls
        );
    }

    for i in 0..num_hulls {
        let record = fetch_hull(engine, i)?;
        let mut hull = OutputHull {
            vertices: Vec::with_capacity(record.points.len()),
            faces: Vec::with_capacity(record.triangles.len() * FACE_RECORD_STRIDE),
        };
        copy_hull(i, record, 0, &mut hull.vertices, &mut hull.faces)?;
        result.push(hull);
    }

    Ok(result)
}

/// Copies every hull of a completed engine into one globally-indexed polygon soup.
///
/// The indices of each hull are offset by the number of vertices of all the hulls
/// before it, see [`HullSoup`].
pub fn assemble_combined<E: DecompositionEngine + ?Sized>(engine: &E) -> Result<HullSoup> {
    let mut soup = HullSoup::default();
    let mut base_index = 0;

    for i in 0..engine.hull_count() {
        let record = fetch_hull(engine, i)?;
        let first_triangle = soup.faces.len() / FACE_RECORD_STRIDE;

        copy_hull(i, record, base_index, &mut soup.vertices, &mut soup.faces)?;

        soup.hulls.push(HullRange {
            vertices: base_index..soup.vertices.len(),
            triangles: first_triangle..soup.faces.len() / FACE_RECORD_STRIDE,
        });
        base_index = soup.vertices.len();
    }

    Ok(soup)
}

fn fetch_hull<E: DecompositionEngine + ?Sized>(engine: &E, i: usize) -> Result<&ConvexHullRecord> {
    engine.hull(i).ok_or_else(|| {
        DecompositionError::EngineFailure(format!(
            "the engine reported {} convex hulls but hull {} is missing",
            engine.hull_count(),
            i
        ))
    })
}

/// Appends the vertices and faces of one hull record, offsetting its indices by `base_index`.
///
/// Nothing is written if the record contains an invalid index.
fn copy_hull(
    hull_id: usize,
    record: &ConvexHullRecord,
    base_index: usize,
    vertices: &mut Vec<[Real; 3]>,
    faces: &mut Vec<u32>,
) -> Result<()> {
    let num_vertices = record.points.len();

    if let Some(&index) = record
        .triangles
        .iter()
        .flatten()
        .find(|&&i| i as usize >= num_vertices)
    {
        return Err(DecompositionError::HullIndexOutOfRange {
            hull: hull_id,
            index,
            num_vertices,
        });
    }

    // The largest index written is `base_index + num_vertices` (one-based).
    let offset = super::index_offset(base_index, num_vertices)?
        .checked_add(FACE_INDEX_BASE)
        .ok_or(DecompositionError::IndexOverflow)?;

    log::trace!(
        "Convex hull {} has {} vertices and {} faces.",
        hull_id,
        num_vertices,
        record.triangles.len()
    );

    for pt in &record.points {
        log::trace!("v {:.9} {:.9} {:.9}", pt.x, pt.y, pt.z);
        vertices.push([pt.x, pt.y, pt.z]);
    }

    for tri in &record.triangles {
        let face = [tri[0] + offset, tri[1] + offset, tri[2] + offset];
        log::trace!("f {} {} {}", face[0], face[1], face[2]);
        faces.extend_from_slice(&[TRIANGLE_ARITY, face[0], face[1], face[2]]);
    }

    Ok(())
}
