//! Fixed-point supersampling triangle rasterizer
//!
//! Features:
//! - Subsample grid quantization in fixed-point units
//! - Backface culling via the bounding box
//! - Edge-function coverage with a fixed shared-edge rule
//! - Hash-based jitter (stochastic supersampling with no RNG state)
//! - Supersampled Z-buffer sink
//!
//! Nothing here holds state between calls: rasterizing different
//! triangles from different threads needs no locking. Only a shared
//! sink has to serialize its own writes.

mod geometry;
mod jitter;
mod math;
mod render;
mod types;
mod zbuffer;

pub use geometry::*;
pub use jitter::*;
pub use math::*;
pub use render::*;
pub use types::*;
pub use zbuffer::*;
