use decomp3d::engine::{EngineParameters, ExecutionMode};
use decomp3d::{DecompositionAdapter, DecompositionConfig};

#[test]
fn single_triangle_has_no_convex_hull() {
    let points = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    let faces = [3, 0, 1, 2];

    for execution in [ExecutionMode::Synchronous, ExecutionMode::Asynchronous] {
        let adapter = DecompositionAdapter::new(DecompositionConfig {
            engine: EngineParameters::with_execution(execution),
            ..DecompositionConfig::default()
        });

        assert_eq!(adapter.compute_decomposition(&points, &faces), Ok(vec![]));
    }
}

#[test]
fn mesh_without_faces_has_no_convex_hull() {
    let points = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
    assert_eq!(decomp3d::compute_decomposition(&points, &[]), Ok(vec![]));
    assert_eq!(decomp3d::compute_decomposition(&[], &[]), Ok(vec![]));
}
