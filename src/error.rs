use std::time::Duration;

/// Result type of the fallible operations of this crate.
pub type Result<T> = std::result::Result<T, DecompositionError>;

/// Errors that can occur while preparing, running, or repackaging a convex decomposition.
///
/// Input errors (`MalformedPoints`, `NonFinitePoint`, `MalformedFaces`, `UnsupportedArity`,
/// `TruncatedPolygon` and `IndexOutOfRange`) are always detected before any engine is created.
///
/// An engine producing zero convex hulls is **not** an error: it results in an empty
/// output sequence. Actual engine faults are reported with [`DecompositionError::EngineFailure`].
///
/// ```
/// use decomp3d::DecompositionError;
///
/// let points = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
///
/// // The second record points past the end of `points`.
/// let faces = [3, 0, 1, 2, 3, 0, 2, 7];
///
/// assert_eq!(
///     decomp3d::compute_decomposition(&points, &faces),
///     Err(DecompositionError::IndexOutOfRange {
///         face: 1,
///         index: 7,
///         num_points: 3
///     })
/// );
/// ```
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DecompositionError {
    /// A flat point buffer has a length that is not a multiple of 3.
    #[error("the point buffer length {len} is not a multiple of 3")]
    MalformedPoints {
        /// Length of the rejected buffer.
        len: usize,
    },

    /// A point has a NaN or infinite coordinate.
    #[error("point {point} has a non-finite coordinate")]
    NonFinitePoint {
        /// Index of the offending point.
        point: usize,
    },

    /// A fixed-stride face buffer has a length that is not a multiple of 4.
    #[error("the face buffer length {len} is not a multiple of the face record size (4)")]
    MalformedFaces {
        /// Length of the rejected buffer.
        len: usize,
    },

    /// A face record declares an arity this layout cannot represent.
    ///
    /// Fixed-stride face buffers only accept triangles (arity 3). Polygon face buffers accept
    /// any arity greater or equal to 3.
    #[error("face {face} declares an unsupported arity {arity}")]
    UnsupportedArity {
        /// Index of the offending face record.
        face: usize,
        /// The declared arity.
        arity: u32,
    },

    /// A polygon face record declares more indices than the buffer contains.
    #[error("the polygon record starting at offset {offset} runs past the end of the face buffer")]
    TruncatedPolygon {
        /// Offset of the record's arity field in the face buffer.
        offset: usize,
    },

    /// A face references a point that does not exist.
    #[error("face {face} references point {index} but only {num_points} points were given")]
    IndexOutOfRange {
        /// Index of the offending face record.
        face: usize,
        /// The out-of-range point index.
        index: u32,
        /// Number of points of the input mesh.
        num_points: usize,
    },

    /// The engine reported an internal fault.
    #[error("the decomposition engine failed: {0}")]
    EngineFailure(String),

    /// The engine did not complete within the configured time bound.
    #[error("the decomposition did not complete within {0:?}")]
    Timeout(Duration),

    /// The decomposition was cancelled through its cancellation token.
    #[error("the decomposition was cancelled")]
    Cancelled,

    /// A hull record produced by the engine references a vertex it does not have.
    #[error("hull {hull} references vertex {index} but only has {num_vertices} vertices")]
    HullIndexOutOfRange {
        /// Index of the offending hull.
        hull: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Number of vertices of that hull.
        num_vertices: usize,
    },

    /// The combined output has more vertices than a `u32` face index can address.
    #[error("the combined hulls have more vertices than a u32 face index can address")]
    IndexOverflow,
}
