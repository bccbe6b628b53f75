//! Supersampled depth/color buffer
//!
//! One slot per (pixel, subsample). Fragments pass the depth test when they
//! are strictly closer (smaller z) than what the slot holds.

use std::path::Path;

use image::{ImageResult, Rgb, RgbImage};
use log::trace;

use super::render::FragmentSink;
use super::types::{Color, Config, Fragment, Sample, Screen};

pub struct ZBuffer {
    pub colors: Vec<Color>,
    pub depths: Vec<i32>,
    /// Size in whole pixels
    pub width: usize,
    pub height: usize,
    /// Subsamples per pixel along each axis
    pub subsamples: usize,
}

impl ZBuffer {
    /// Buffer covering every pixel the bounding box clamp can reach.
    ///
    /// The clamp is inclusive at the screen edge, so one extra pixel row and
    /// column is kept past `screen >> r_shift`.
    pub fn new(screen: Screen, config: Config, background: Color) -> Self {
        // Arithmetic shift in 64 bits, so wide shifts settle at 0 or -1
        let pixels = |extent: i32| ((i64::from(extent) >> config.r_shift.min(63)) + 1).max(0) as usize;
        let width = pixels(screen.width);
        let height = pixels(screen.height);
        let subsamples = config.subsamples_per_axis();
        let len = width * height * subsamples * subsamples;

        Self {
            colors: vec![background; len],
            depths: vec![i32::MAX; len],
            width,
            height,
            subsamples,
        }
    }

    pub fn clear(&mut self, background: Color) {
        self.colors.fill(background);
        self.depths.fill(i32::MAX);
    }

    fn index(&self, pixel: Sample, subsample: Sample) -> Option<usize> {
        let in_range = |v: i32, limit: usize| v >= 0 && (v as usize) < limit;
        if !in_range(pixel.x, self.width)
            || !in_range(pixel.y, self.height)
            || !in_range(subsample.x, self.subsamples)
            || !in_range(subsample.y, self.subsamples)
        {
            return None;
        }

        let pixel_idx = pixel.y as usize * self.width + pixel.x as usize;
        let sub_idx = subsample.y as usize * self.subsamples + subsample.x as usize;
        Some(pixel_idx * self.subsamples * self.subsamples + sub_idx)
    }

    /// Depth stored at a slot, `None` if the slot was never written
    pub fn depth_at(&self, pixel: Sample, subsample: Sample) -> Option<i32> {
        self.index(pixel, subsample)
            .map(|idx| self.depths[idx])
            .filter(|&z| z != i32::MAX)
    }

    pub fn color_at(&self, pixel: Sample, subsample: Sample) -> Option<Color> {
        self.index(pixel, subsample).map(|idx| self.colors[idx])
    }

    /// Number of slots holding a fragment
    pub fn covered_slots(&self) -> usize {
        self.depths.iter().filter(|&&z| z != i32::MAX).count()
    }

    /// Average the subsamples of every pixel, row by row
    pub fn resolve(&self) -> Vec<Color> {
        let per_pixel = self.subsamples * self.subsamples;
        if per_pixel == 0 {
            return Vec::new();
        }

        self.colors
            .chunks(per_pixel)
            .map(|slots| {
                let (r, g, b) = slots.iter().fold((0u32, 0u32, 0u32), |(r, g, b), c| {
                    (r + c.r as u32, g + c.g as u32, b + c.b as u32)
                });
                let n = slots.len() as u32;
                Color::new((r / n) as u8, (g / n) as u8, (b / n) as u8)
            })
            .collect()
    }

    /// Resolved image, row 0 at y = 0
    pub fn to_image(&self) -> RgbImage {
        let resolved = self.resolve();
        let width = self.width;
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            Rgb(resolved[y as usize * width + x as usize].to_bytes())
        })
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.to_image().save_with_format(path, image::ImageFormat::Png)
    }
}

impl FragmentSink for ZBuffer {
    fn process_fragment(&mut self, pixel: Sample, subsample: Sample, fragment: Fragment) {
        let Some(idx) = self.index(pixel, subsample) else {
            trace!("dropped fragment outside buffer at {:?}/{:?}", pixel, subsample);
            return;
        };

        if fragment.z < self.depths[idx] {
            self.depths[idx] = fragment.z;
            self.colors[idx] = fragment.color;
        }
    }
}
