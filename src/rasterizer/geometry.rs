//! Backface culling and bounding boxes

use super::math::{cross, delta, floor_ss, max, min};
use super::types::{BoundingBox, Config, Sample, Screen, Triangle};

/// Check winding: a strictly positive signed area means the triangle faces away.
///
/// Zero-area triangles are not backfaces by this test alone.
pub fn is_backface(triangle: &Triangle) -> bool {
    let [v0, v1, v2] = &triangle.v;
    let ax = delta(v1.x, v0.x);
    let ay = delta(v1.y, v0.y);
    let bx = delta(v2.x, v0.x);
    let by = delta(v2.y, v0.y);

    cross(ax, ay, bx, by) > 0
}

/// Grid-aligned bounding box of the triangle, clamped to `[0, screen]`.
///
/// The box is marked invalid for backfaces, which makes it the only culling
/// gate in the pipeline, and for boxes that are empty after clamping.
pub fn get_bounding_box(triangle: &Triangle, screen: Screen, config: Config) -> BoundingBox {
    let [v0, v1, v2] = &triangle.v;
    let quantize = |v: i32| floor_ss(v, config.r_shift, config.ss_w_lg2);

    let mut lower_left = Sample::new(
        quantize(min(min(v0.x, v1.x), v2.x)),
        quantize(min(min(v0.y, v1.y), v2.y)),
    );
    let mut upper_right = Sample::new(
        quantize(max(max(v0.x, v1.x), v2.x)),
        quantize(max(max(v0.y, v1.y), v2.y)),
    );

    // Clamp to screen
    lower_left.x = max(lower_left.x, 0);
    lower_left.y = max(lower_left.y, 0);
    upper_right.x = min(upper_right.x, screen.width);
    upper_right.y = min(upper_right.y, screen.height);

    let valid = !is_backface(triangle)
        && lower_left.x <= upper_right.x
        && lower_left.y <= upper_right.y;

    BoundingBox {
        lower_left,
        upper_right,
        valid,
    }
}
