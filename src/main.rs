//! Orbiting skills viewer.
//!
//! Environment:
//!
//! - `SKILLS_ORBIT_CONFIG`: JSON scene config. The built-in 16-skill catalog
//!   is used when unset.
//! - `SKILLS_ORBIT_ASSETS`: asset root, `./assets` by default.
//!
//! Each skill's `logo` is resolved against the asset root. The built-in
//! catalog expects one file per skill under `icons/`:
//!
//! ```text
//! assets/
//!   icons/
//!     python.png  java.png  react.png  vite.png  typescript.png  pandas.png
//!     numpy.png  pytorch.png  scikitlearn.png  machine-learning.png  nlp.png
//!     flask.png  fastapi.png  git.png  mongodb.png  typing.png
//! ```
//!
//! PNG, JPEG, GIF and WebP decode; SVG does not, so vector logos must be
//! rasterized first. No icons ship with the crate. A missing or undecodable
//! icon logs a warning and the skill is drawn with its initials instead.

use std::path::PathBuf;

use eframe::egui;

use skills_orbit::{Scene, SceneConfig};

mod app;

use app::OrbitApp;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::var_os("SKILLS_ORBIT_CONFIG") {
        Some(path) => SceneConfig::load(PathBuf::from(path))?,
        None => SceneConfig::default(),
    };
    let scene = Scene::new(config)?;

    let asset_root = std::env::var_os("SKILLS_ORBIT_ASSETS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 900.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Technical Skills",
        options,
        Box::new(move |cc| Ok(Box::new(OrbitApp::new(&cc.egui_ctx, scene, &asset_root)))),
    )?;
    Ok(())
}
