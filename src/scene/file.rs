//! Scene loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::Scene;
use crate::rasterizer::ConfigError;

/// Error type for scene loading and output
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Load a scene from a RON file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
    let contents = fs::read_to_string(path)?;
    load_scene_from_str(&contents)
}

/// Load a scene from a RON string (for embedded scenes or testing)
///
/// The config is checked here so a bad file is reported as an error
/// rather than tripping the rasterizer's assertions later.
pub fn load_scene_from_str(s: &str) -> Result<Scene, SceneError> {
    let scene: Scene = ron::from_str(s)?;
    scene.config.validate()?;
    Ok(scene)
}

/// Save a scene to a RON file
pub fn save_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<(), SceneError> {
    let contents = scene_to_string(scene)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Pretty-printed RON for a scene
pub fn scene_to_string(scene: &Scene) -> Result<String, SceneError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    Ok(ron::ser::to_string_pretty(scene, config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{Color, Config, Screen, Triangle};

    const SCENE: &str = r#"
        (
            config: (r_shift: 8, ss_w_lg2: 2, ss_i: 64),
            screen: (width: 512, height: 512),
            triangles: [
                (v: (
                    (x: 0, y: 0, z: 7, color: (r: 255, g: 0, b: 0)),
                    (x: 0, y: 400, z: 7, color: (r: 255, g: 0, b: 0)),
                    (x: 400, y: 0, z: 7, color: (r: 255, g: 0, b: 0)),
                )),
            ],
        )
    "#;

    #[test]
    fn test_load_from_str() {
        let scene = load_scene_from_str(SCENE).unwrap();
        assert_eq!(scene.config, Config::new(8, 2));
        assert_eq!(scene.screen, Screen::new(512, 512));
        assert_eq!(scene.background, Color::BLACK);
        assert_eq!(scene.triangles.len(), 1);
        assert_eq!(scene.triangles[0].v[0].z, 7);
        assert_eq!(scene.coverage(), vec![15]);
    }

    #[test]
    fn test_round_trip() {
        let mut scene = Scene::new(Config::new(10, 2), Screen::new(4096, 4096));
        scene.background = Color::new(10, 20, 30);
        scene.add_triangle(Triangle::from_xy((0, 0), (0, 1024), (1024, 0)).with_flat(2, Color::GREEN));

        let text = scene_to_string(&scene).unwrap();
        assert_eq!(load_scene_from_str(&text).unwrap(), scene);
    }

    #[test]
    fn test_save_and_load_file() {
        let mut scene = Scene::new(Config::new(8, 2), Screen::new(512, 512));
        scene.add_triangle(Triangle::from_xy((0, 0), (0, 400), (400, 0)));

        let path = std::env::temp_dir().join(format!("fixed_raster_scene_{}.ron", std::process::id()));
        save_scene(&scene, &path).unwrap();
        let loaded = load_scene(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, scene);
    }

    #[test]
    fn test_bundled_scene() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/scenes/split_square.ron");
        let scene = load_scene(path).unwrap();
        assert_eq!(scene.background, Color::new(16, 16, 24));
        assert_eq!(scene.coverage(), vec![91, 91, 0]);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let bad = SCENE.replace("ss_w_lg2: 2", "ss_w_lg2: 8");
        match load_scene_from_str(&bad) {
            Err(SceneError::InvalidConfig(ConfigError::NoSubsampleGrid { r_shift: 8, ss_w_lg2: 8 })) => {}
            other => panic!("expected invalid config, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_malformed_text() {
        assert!(matches!(load_scene_from_str("(config: "), Err(SceneError::Parse(_))));
        assert!(matches!(load_scene("/nonexistent/scene.ron"), Err(SceneError::Io(_))));
    }
}
