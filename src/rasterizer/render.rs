//! Core rendering functions
//! Sample containment and the supersampling grid walk

use log::{debug, trace};

use super::geometry::get_bounding_box;
use super::jitter::jitter_sample;
use super::math::{cross, delta};
use super::types::{Config, Fragment, Sample, Screen, Triangle};

/// Receiver for covered subsamples (a depth/color buffer).
///
/// Whether a fragment is kept, and how concurrent writes to the same slot
/// are resolved, is entirely up to the implementation.
pub trait FragmentSink {
    fn process_fragment(&mut self, pixel: Sample, subsample: Sample, fragment: Fragment);
}

impl<F> FragmentSink for F
where
    F: FnMut(Sample, Sample, Fragment),
{
    fn process_fragment(&mut self, pixel: Sample, subsample: Sample, fragment: Fragment) {
        self(pixel, subsample, fragment)
    }
}

/// Is `sample` inside the triangle?
///
/// Edge functions are taken on the vertices translated by `-sample`.
/// Edges 0 (v0-v1) and 2 (v2-v0) include samples exactly on them, edge 1
/// (v1-v2) excludes them, so a shared edge belongs to exactly one of the
/// triangles on either side.
pub fn sample_test(triangle: &Triangle, sample: Sample) -> bool {
    let [v0, v1, v2] = &triangle.v;
    let (v0_x, v0_y) = (delta(v0.x, sample.x), delta(v0.y, sample.y));
    let (v1_x, v1_y) = (delta(v1.x, sample.x), delta(v1.y, sample.y));
    let (v2_x, v2_y) = (delta(v2.x, sample.x), delta(v2.y, sample.y));

    let dist0 = cross(v0_x, v0_y, v1_x, v1_y);
    let dist1 = cross(v1_x, v1_y, v2_x, v2_y);
    let dist2 = cross(v2_x, v2_y, v0_x, v0_y);

    dist0 <= 0 && dist1 < 0 && dist2 <= 0
}

/// Rasterize a single triangle on the jittered subsample grid.
///
/// Returns the number of covered subsamples. When `zbuff` is given, every
/// hit is also forwarded to it with the pixel, the subsample index inside
/// that pixel and vertex 0's depth and color. Pass `None` to only count
/// coverage.
///
/// Panics if `config.ss_i <= 0` or `config.r_shift <= config.ss_w_lg2`.
pub fn rasterize_triangle(
    triangle: &Triangle,
    mut zbuff: Option<&mut dyn FragmentSink>,
    screen: Screen,
    config: Config,
) -> usize {
    assert!(config.ss_i > 0, "rasterize_triangle: ss_i ({}) must be positive", config.ss_i);

    let bbox = get_bounding_box(triangle, screen, config);
    if !bbox.valid {
        trace!("culled triangle {:?}", triangle.v);
        return 0;
    }

    let step = config.ss_i as usize;
    let fragment = Fragment::from_vertex(&triangle.v[0]);
    let mut hit_count = 0;

    for x in (bbox.lower_left.x..=bbox.upper_right.x).step_by(step) {
        for y in (bbox.lower_left.y..=bbox.upper_right.y).step_by(step) {
            let sample = Sample::new(x, y);

            // Jitter lands on quarter grid units, pinned at the i32 edge
            let jitter = jitter_sample(sample, config.ss_w_lg2);
            let jittered = Sample::new(
                x.saturating_add(jitter.x << 2),
                y.saturating_add(jitter.y << 2),
            );

            if !sample_test(triangle, jittered) {
                continue;
            }
            hit_count += 1;

            if let Some(sink) = zbuff.as_deref_mut() {
                // Located by the un-jittered grid point; x and y are never negative here
                let pixel_of = |v: i32| v.checked_shr(config.r_shift).unwrap_or(0);
                let origin_of = |p: i32| p.checked_shl(config.r_shift).unwrap_or(0);
                let pixel = Sample::new(pixel_of(x), pixel_of(y));
                let subsample = Sample::new(
                    (x - origin_of(pixel.x)) / config.ss_i,
                    (y - origin_of(pixel.y)) / config.ss_i,
                );
                sink.process_fragment(pixel, subsample, fragment);
            }
        }
    }

    debug!(
        "rasterized triangle: bbox {:?}..{:?}, {} hits",
        bbox.lower_left, bbox.upper_right, hit_count
    );
    hit_count
}
