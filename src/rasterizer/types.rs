//! Core types for the rasterizer
//!
//! Positions are fixed-point integers: the low `r_shift` bits are the
//! fraction of a pixel.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to [u8; 3] for image output
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// A vertex in fixed-point screen space with a flat color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: i32, y: i32, z: i32, color: Color) -> Self {
        Self { x, y, z, color }
    }

    /// Vertex with depth 0 and a white color
    pub const fn from_xy(x: i32, y: i32) -> Self {
        Self { x, y, z: 0, color: Color::WHITE }
    }
}

/// Three ordered vertices. Winding decides front/back facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub v: [Vertex; 3],
}

impl Triangle {
    pub const fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self { v: [v0, v1, v2] }
    }

    /// Triangle from three (x, y) pairs, all vertices at depth 0 and white
    pub const fn from_xy(p0: (i32, i32), p1: (i32, i32), p2: (i32, i32)) -> Self {
        Self {
            v: [
                Vertex::from_xy(p0.0, p0.1),
                Vertex::from_xy(p1.0, p1.1),
                Vertex::from_xy(p2.0, p2.1),
            ],
        }
    }

    /// Same triangle with every vertex set to `z` and `color`
    pub fn with_flat(mut self, z: i32, color: Color) -> Self {
        for v in &mut self.v {
            v.z = z;
            v.color = color;
        }
        self
    }
}

/// Clamp bounds for the bounding box.
///
/// Compared directly against fixed-point coordinates, so `width` and
/// `height` must already be shifted by `r_shift`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    pub width: i32,
    pub height: i32,
}

impl Screen {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Screen bounds from a size in whole pixels.
    ///
    /// Returns `None` when a shifted dimension does not fit in an `i32`.
    pub fn from_pixels(width: i32, height: i32, config: &Config) -> Option<Self> {
        let shift = |pixels: i32| {
            let wide = i64::from(pixels).checked_shl(config.r_shift)?;
            // checked_shl only bounds the shift amount, so check the bits survived
            if wide >> config.r_shift != i64::from(pixels) {
                return None;
            }
            i32::try_from(wide).ok()
        };
        Some(Self {
            width: shift(width)?,
            height: shift(height)?,
        })
    }
}

/// Fixed-point and subsample grid settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Fractional bits in a fixed-point coordinate
    pub r_shift: u32,
    /// log2 of subsamples per pixel per axis
    pub ss_w_lg2: u32,
    /// Fixed-point distance between neighbouring grid points
    pub ss_i: i32,
}

/// Reasons a [`Config`] cannot drive the rasterizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("r_shift ({r_shift}) must be greater than ss_w_lg2 ({ss_w_lg2})")]
    NoSubsampleGrid { r_shift: u32, ss_w_lg2: u32 },
    #[error("r_shift ({0}) leaves no integer bits in an i32 coordinate")]
    ShiftTooLarge(u32),
    #[error("subsample step ss_i ({0}) must be positive")]
    NonPositiveStep(i32),
}

impl Config {
    /// Config with the canonical step of one subsample grid cell.
    ///
    /// Panics if `r_shift <= ss_w_lg2`, or if the step `1 << (r_shift - ss_w_lg2)`
    /// does not fit in an `i32`.
    pub fn new(r_shift: u32, ss_w_lg2: u32) -> Self {
        assert!(
            r_shift > ss_w_lg2,
            "Config: r_shift ({}) must be greater than ss_w_lg2 ({})",
            r_shift,
            ss_w_lg2
        );
        assert!(
            r_shift - ss_w_lg2 < 31,
            "Config: subsample step 1 << {} overflows i32",
            r_shift - ss_w_lg2
        );
        Self {
            r_shift,
            ss_w_lg2,
            ss_i: 1 << (r_shift - ss_w_lg2),
        }
    }

    /// Check the config without panicking
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.r_shift >= 31 {
            return Err(ConfigError::ShiftTooLarge(self.r_shift));
        }
        if self.r_shift <= self.ss_w_lg2 {
            return Err(ConfigError::NoSubsampleGrid {
                r_shift: self.r_shift,
                ss_w_lg2: self.ss_w_lg2,
            });
        }
        if self.ss_i <= 0 {
            return Err(ConfigError::NonPositiveStep(self.ss_i));
        }
        Ok(())
    }

    /// Number of distinct subsample indices along one pixel axis.
    ///
    /// Never less than 1. Configs that would fail [`Config::validate`] with a
    /// shift too wide for an `i32` or a non-positive step also report 1.
    pub fn subsamples_per_axis(&self) -> usize {
        1i32.checked_shl(self.r_shift)
            .filter(|&pixel| pixel > 0)
            .and_then(|pixel| pixel.checked_div(self.ss_i))
            .unwrap_or(1)
            .max(1) as usize
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(10, 2)
    }
}

/// A point in fixed-point units, or an integer pixel/subsample location
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sample {
    pub x: i32,
    pub y: i32,
}

impl Sample {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Grid-aligned box covering a triangle, clamped to the screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundingBox {
    pub lower_left: Sample,
    pub upper_right: Sample,
    /// False for backfaces and for boxes that end up empty after clamping
    pub valid: bool,
}

/// Depth and color of one covered subsample, taken from vertex 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fragment {
    pub z: i32,
    pub color: Color,
}

impl Fragment {
    pub fn from_vertex(v: &Vertex) -> Self {
        Self { z: v.z, color: v.color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new_derives_step() {
        let config = Config::new(8, 2);
        assert_eq!(config.ss_i, 64);
        assert_eq!(config.subsamples_per_axis(), 4);
        assert_eq!(Config::default().ss_i, 256);
    }

    #[test]
    #[should_panic]
    fn test_config_new_rejects_missing_grid() {
        Config::new(2, 2);
    }

    #[test]
    fn test_config_validate() {
        assert_eq!(Config::new(8, 2).validate(), Ok(()));
        assert_eq!(
            Config { r_shift: 2, ss_w_lg2: 3, ss_i: 1 }.validate(),
            Err(ConfigError::NoSubsampleGrid { r_shift: 2, ss_w_lg2: 3 })
        );
        assert_eq!(
            Config { r_shift: 8, ss_w_lg2: 2, ss_i: 0 }.validate(),
            Err(ConfigError::NonPositiveStep(0))
        );
        assert_eq!(
            Config { r_shift: 31, ss_w_lg2: 2, ss_i: 64 }.validate(),
            Err(ConfigError::ShiftTooLarge(31))
        );
    }

    #[test]
    fn test_screen_from_pixels() {
        let config = Config::new(8, 2);
        assert_eq!(Screen::from_pixels(2, 3, &config), Some(Screen::new(512, 768)));
        assert_eq!(Screen::from_pixels(-2, 0, &config), Some(Screen::new(-512, 0)));

        // 2^23 pixels is the largest width that survives r_shift 8
        assert_eq!(
            Screen::from_pixels((1 << 23) - 1, 1, &config),
            Some(Screen::new(((1 << 23) - 1) << 8, 256))
        );
        assert_eq!(Screen::from_pixels(1 << 23, 1, &config), None);
        assert_eq!(Screen::from_pixels(1, i32::MAX, &config), None);

        let wide = Config { r_shift: 40, ss_w_lg2: 2, ss_i: 64 };
        assert_eq!(Screen::from_pixels(1, 1, &wide), None);
    }

    #[test]
    fn test_subsamples_per_axis_for_unvalidated_configs() {
        assert_eq!(Config { r_shift: 40, ss_w_lg2: 2, ss_i: 64 }.subsamples_per_axis(), 1);
        assert_eq!(Config { r_shift: 32, ss_w_lg2: 2, ss_i: 64 }.subsamples_per_axis(), 1);
        assert_eq!(Config { r_shift: 31, ss_w_lg2: 2, ss_i: 64 }.subsamples_per_axis(), 1);
        assert_eq!(Config { r_shift: 8, ss_w_lg2: 2, ss_i: 0 }.subsamples_per_axis(), 1);
        assert_eq!(Config { r_shift: 8, ss_w_lg2: 2, ss_i: -64 }.subsamples_per_axis(), 1);
        assert_eq!(Config { r_shift: 30, ss_w_lg2: 2, ss_i: 1 << 28 }.subsamples_per_axis(), 4);
    }

    #[test]
    #[should_panic]
    fn test_config_new_rejects_oversized_step() {
        Config::new(40, 2);
    }

    #[test]
    fn test_fragment_from_vertex() {
        let v = Vertex::new(10, 20, 30, Color::RED);
        assert_eq!(Fragment::from_vertex(&v), Fragment { z: 30, color: Color::RED });
    }
}
