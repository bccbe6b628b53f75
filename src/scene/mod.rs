//! Scene description - a batch of triangles plus the grid they are drawn on
//!
//! Scenes are stored as RON files so test vectors stay human-readable.

mod file;

pub use file::*;

use serde::{Deserialize, Serialize};

use crate::rasterizer::{Color, Config, FragmentSink, Screen, Triangle, ZBuffer, rasterize_triangle};

/// Triangles in draw order with the settings they share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub config: Config,
    pub screen: Screen,
    /// Color of slots no fragment reaches
    #[serde(default)]
    pub background: Color,
    pub triangles: Vec<Triangle>,
}

impl Scene {
    pub fn new(config: Config, screen: Screen) -> Self {
        Self {
            config,
            screen,
            background: Color::BLACK,
            triangles: Vec::new(),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Empty Z-buffer sized for this scene
    pub fn zbuffer(&self) -> ZBuffer {
        ZBuffer::new(self.screen, self.config, self.background)
    }

    /// Per-triangle hit counts without emitting any fragments
    pub fn coverage(&self) -> Vec<usize> {
        self.triangles
            .iter()
            .map(|tri| rasterize_triangle(tri, None, self.screen, self.config))
            .collect()
    }

    /// Rasterize every triangle in order into `sink`, returning per-triangle hit counts
    pub fn rasterize_into<S: FragmentSink>(&self, sink: &mut S) -> Vec<usize> {
        self.triangles
            .iter()
            .map(|tri| {
                let sink = &mut *sink as &mut dyn FragmentSink;
                rasterize_triangle(tri, Some(sink), self.screen, self.config)
            })
            .collect()
    }
}
