use super::{assert_valid_indices, unit_cube};
use decomp3d::engine::{EngineParameters, ExecutionMode};
use decomp3d::{DecompositionAdapter, DecompositionConfig};

fn adapter(execution: ExecutionMode) -> DecompositionAdapter {
    DecompositionAdapter::new(DecompositionConfig {
        engine: EngineParameters::with_execution(execution),
        ..DecompositionConfig::default()
    })
}

#[test]
fn cube_is_its_own_convex_hull() {
    let (points, faces) = unit_cube();

    for execution in [ExecutionMode::Synchronous, ExecutionMode::Asynchronous] {
        let hulls = adapter(execution)
            .compute_decomposition(&points, &faces)
            .unwrap();

        assert_eq!(hulls.len(), 1);
        assert_valid_indices(&hulls);

        let hull = &hulls[0];
        assert_eq!(hull.shape(), (8, 3));
        assert_eq!(hull.num_triangles(), 12);
        assert_relative_eq!(hull.volume(), 1.0, epsilon = 1.0e-6);

        for corner in &points {
            assert!(
                hull.vertices().iter().any(|v| v
                    .iter()
                    .zip(corner)
                    .all(|(a, b)| (a - b).abs() <= 1.0e-6)),
                "corner {:?} missing from the hull",
                corner
            );
        }
    }
}

#[test]
fn default_entry_point_matches_the_adapter() {
    let (points, faces) = unit_cube();
    let hulls = decomp3d::compute_decomposition(&points, &faces).unwrap();
    let expected = adapter(ExecutionMode::Synchronous)
        .compute_decomposition(&points, &faces)
        .unwrap();

    assert_eq!(hulls.len(), expected.len());
    for (a, b) in hulls.iter().zip(expected.iter()) {
        assert_abs_diff_eq!(a, b, epsilon = 1.0e-9);
    }
}

#[test]
fn flat_point_buffer_gives_the_same_hulls() {
    let (points, faces) = unit_cube();
    let flat: Vec<_> = points.iter().flatten().copied().collect();
    let mesh = decomp3d::InputMesh::from_flat_points(&flat, &faces).unwrap();

    let adapter = adapter(ExecutionMode::Synchronous);
    assert_eq!(
        adapter.compute_mesh(&mesh).unwrap(),
        adapter.compute_decomposition(&points, &faces).unwrap()
    );
}
