#[macro_use]
extern crate approx;

mod convex_input;
mod degenerate_input;
mod resource_hygiene;

use decomp3d::math::Real;

/// The unit cube, with outward-facing triangles.
pub fn unit_cube() -> (Vec<[Real; 3]>, Vec<u32>) {
    let points = (0..8)
        .map(|i| {
            [
                (i & 1) as Real,
                ((i >> 1) & 1) as Real,
                ((i >> 2) & 1) as Real,
            ]
        })
        .collect();
    let triangles: [[u32; 3]; 12] = [
        [0, 2, 3],
        [0, 3, 1],
        [4, 5, 7],
        [4, 7, 6],
        [0, 1, 5],
        [0, 5, 4],
        [2, 6, 7],
        [2, 7, 3],
        [0, 4, 6],
        [0, 6, 2],
        [1, 3, 7],
        [1, 7, 5],
    ];

    (points, to_face_buffer(&triangles))
}

/// Two unit cubes, the second one translated along `x` by `gap + 1`.
pub fn two_cubes(gap: Real) -> (Vec<[Real; 3]>, Vec<u32>) {
    let (mut points, mut faces) = unit_cube();
    let (second_points, second_faces) = unit_cube();

    points.extend(second_points.iter().map(|p| [p[0] + 1.0 + gap, p[1], p[2]]));
    faces.extend(
        second_faces
            .chunks_exact(4)
            .flat_map(|r| [r[0], r[1] + 8, r[2] + 8, r[3] + 8]),
    );

    (points, faces)
}

pub fn to_face_buffer(triangles: &[[u32; 3]]) -> Vec<u32> {
    triangles
        .iter()
        .flat_map(|t| [3, t[0], t[1], t[2]])
        .collect()
}

/// Checks that every face index of every hull refers to one of its own vertices.
pub fn assert_valid_indices(hulls: &[decomp3d::OutputHull]) {
    for hull in hulls {
        assert_eq!(hull.faces().len() % 4, 0);
        for record in hull.faces().chunks_exact(4) {
            assert_eq!(record[0], 3);
            for &index in &record[1..] {
                assert!(index >= 1, "face indices are one-based");
                assert!(((index - 1) as usize) < hull.num_vertices());
            }
        }
    }
}
