/*!
decomp3d
========

**decomp3d** exposes approximate convex decomposition of 3D triangle meshes through
plain array-based buffers.

A mesh is given as an `(N, 3)` array of `f64` positions and a flat `u32` face buffer made
of `[3, i0, i1, i2]` records. The result is one `(vertices, faces)` pair per convex hull,
with faces encoded the same way and indices one-based within each hull:

```no_run
let points = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];
let faces = [3, 0, 2, 1, 3, 0, 1, 3, 3, 0, 3, 2, 3, 1, 2, 3];

for hull in decomp3d::compute_decomposition(&points, &faces).unwrap() {
    println!("{:?} vertices, {} triangles", hull.shape(), hull.num_triangles());
}
```

The decomposition itself is delegated to a [`DecompositionEngine`](engine::DecompositionEngine).
The default engine runs the VHACD implementation of `parry3d-f64`.
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(clippy::module_inception)]

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[cfg_attr(test, macro_use)]
extern crate approx;

pub extern crate nalgebra as na;
pub extern crate parry3d_f64 as parry;

pub use self::adapter::{compute_decomposition, DecompositionAdapter, DecompositionConfig};
pub use self::error::{DecompositionError, Result};
pub use self::input::InputMesh;
pub use self::output::{HullSoup, OutputHull};

pub mod adapter;
pub mod driver;
pub mod engine;
mod error;
pub mod input;
pub mod math;
pub mod output;
