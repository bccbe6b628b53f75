//! Fixed-point triangle rasterizer with deterministic stochastic supersampling
//!
//! - `rasterizer`: bounding box, culling, coverage test, jitter, grid walk,
//!   plus a supersampled Z-buffer sink
//! - `scene`: RON scene files (config, screen, triangle list)

pub mod rasterizer;
pub mod scene;

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
