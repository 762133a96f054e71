//! Scene configuration: the skill catalog plus motion tunables.
//!
//! Loaded once before the scene starts (built-in default or a JSON file) and
//! validated up front. The scene never re-checks these values per frame.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{parse_hex_color, Rgba};
use crate::error::ConfigError;

/// Mesh hint for the renderer. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Geometry {
    Box,
    Sphere,
    Icosahedron,
}

/// Proficiency label shown on the info card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Expert,
    Intermediate,
    Beginner,
}

impl SkillLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Expert => "Expert",
            Self::Intermediate => "Intermediate",
            Self::Beginner => "Beginner",
        }
    }
}

/// Static description of one orbiting skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillConfig {
    /// Unique display name
    pub name: String,
    /// Icon path, relative to the asset root
    pub logo: String,
    /// Accent color as CSS hex
    pub color: String,
    #[serde(default = "default_geometry")]
    pub geometry: Geometry,
    /// Distance from the focal point (> 0)
    pub orbit_radius: f32,
    /// Base angular speed in rad/s; sign gives direction
    pub orbit_speed: f32,
    /// Tilt in degrees. Cosmetic: all orbits share the XZ plane.
    #[serde(default)]
    pub orbit_inclination: f32,
    pub level: SkillLevel,
    /// 0-100
    #[serde(default)]
    pub xp: u8,
}

fn default_geometry() -> Geometry {
    Geometry::Sphere
}

impl SkillConfig {
    /// Parsed accent color. Falls back to white for unvalidated configs.
    pub fn accent(&self) -> Rgba {
        parse_hex_color(&self.color).unwrap_or(Rgba::WHITE)
    }
}

/// Smoothing rates and the focus pull distance.
///
/// Rates are per tick, not per second: each tick closes that fraction of the
/// gap to the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Distance an entity is pulled toward the viewpoint while focused
    pub zoom_distance: f32,
    /// Speed rate while decelerating toward 0 (focused)
    pub pause_rate: f32,
    /// Speed rate while returning to base speed (unfocused)
    pub resume_rate: f32,
    /// Zoom rate while pulling forward (focused)
    pub engage_rate: f32,
    /// Zoom rate while falling back (unfocused)
    pub release_rate: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            zoom_distance: 1.5,
            pause_rate: 0.10,
            resume_rate: 0.08,
            engage_rate: 0.15,
            release_rate: 0.10,
        }
    }
}

/// Idle sway of the whole scene about the Y axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwayConfig {
    pub enabled: bool,
    /// Peak rotation in radians
    pub amplitude: f32,
    /// Angular frequency in rad/s
    pub frequency: f32,
}

impl Default for SwayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            amplitude: 0.3,
            frequency: 0.1,
        }
    }
}

/// Everything needed to build a [`crate::orbit::scene::Scene`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub motion: MotionConfig,
    pub sway: SwayConfig,
    pub skills: Vec<SkillConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            motion: MotionConfig::default(),
            sway: SwayConfig::default(),
            skills: default_skills(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON config. Missing sections take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_json_str(&text)?;
        log::info!(
            "Loaded {} skills from {}",
            cfg.skills.len(),
            path.display()
        );
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.motion;
        if !(m.zoom_distance.is_finite() && m.zoom_distance > 0.0) {
            return Err(ConfigError::InvalidZoom(m.zoom_distance));
        }
        for (field, value) in [
            ("pause_rate", m.pause_rate),
            ("resume_rate", m.resume_rate),
            ("engage_rate", m.engage_rate),
            ("release_rate", m.release_rate),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidRate { field, value });
            }
        }

        let sway = &self.sway;
        if !sway.amplitude.is_finite() {
            return Err(ConfigError::InvalidSway {
                field: "amplitude",
                value: sway.amplitude,
            });
        }
        if !(sway.frequency.is_finite() && sway.frequency >= 0.0) {
            return Err(ConfigError::InvalidSway {
                field: "frequency",
                value: sway.frequency,
            });
        }

        if self.skills.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let mut seen = HashSet::with_capacity(self.skills.len());
        for s in &self.skills {
            if !seen.insert(s.name.as_str()) {
                return Err(ConfigError::DuplicateName(s.name.clone()));
            }
            if !(s.orbit_radius.is_finite() && s.orbit_radius > 0.0) {
                return Err(ConfigError::InvalidRadius {
                    name: s.name.clone(),
                    radius: s.orbit_radius,
                });
            }
            if !s.orbit_speed.is_finite() {
                return Err(ConfigError::InvalidSpeed {
                    name: s.name.clone(),
                    speed: s.orbit_speed,
                });
            }
            if s.xp > 100 {
                return Err(ConfigError::InvalidXp {
                    name: s.name.clone(),
                    xp: s.xp,
                });
            }
            if parse_hex_color(&s.color).is_none() {
                return Err(ConfigError::InvalidColor {
                    name: s.name.clone(),
                    color: s.color.clone(),
                });
            }
        }
        Ok(())
    }
}

#[allow(clippy::too_many_arguments)]
fn skill(
    name: &str,
    logo: &str,
    color: &str,
    geometry: Geometry,
    orbit_radius: f32,
    orbit_speed: f32,
    orbit_inclination: f32,
    level: SkillLevel,
    xp: u8,
) -> SkillConfig {
    SkillConfig {
        name: name.to_string(),
        logo: logo.to_string(),
        color: color.to_string(),
        geometry,
        orbit_radius,
        orbit_speed,
        orbit_inclination,
        level,
        xp,
    }
}

/// The built-in 16-skill catalog.
pub fn default_skills() -> Vec<SkillConfig> {
    use Geometry::*;
    use SkillLevel::*;

    vec![
        skill("Python", "icons/python.png", "#3776ab", Icosahedron, 5.0, 0.30, 10.0, Expert, 95),
        skill("Java", "icons/java.png", "#f89820", Box, 6.5, 0.25, -15.0, Intermediate, 70),
        skill("React", "icons/react.png", "#61dafb", Sphere, 8.0, 0.40, 20.0, Intermediate, 90),
        skill("Vite", "icons/vite.png", "#646cff", Icosahedron, 5.8, 0.35, -25.0, Intermediate, 75),
        skill("TypeScript", "icons/typescript.png", "#3178c6", Box, 7.2, 0.28, 30.0, Intermediate, 88),
        skill("Pandas", "icons/pandas.png", "#150458", Sphere, 9.2, 0.22, -12.0, Intermediate, 92),
        skill("NumPy", "icons/numpy.png", "#4dabcf", Icosahedron, 8.7, 0.32, 18.0, Intermediate, 90),
        skill("PyTorch", "icons/pytorch.png", "#ee4c2c", Box, 10.5, 0.20, -22.0, Intermediate, 78),
        skill("Scikit-learn", "icons/scikitlearn.png", "#f89939", Sphere, 7.5, 0.38, 8.0, Intermediate, 85),
        skill("Machine Learning", "icons/machine-learning.png", "#ba68c8", Icosahedron, 9.8, 0.26, -28.0, Intermediate, 87),
        skill("NLP", "icons/nlp.png", "#9c27b0", Box, 8.3, 0.33, 15.0, Intermediate, 72),
        skill("Flask", "icons/flask.png", "#ffffff", Sphere, 6.2, 0.42, -18.0, Intermediate, 80),
        skill("FastAPI", "icons/fastapi.png", "#009688", Icosahedron, 6.8, 0.36, 25.0, Intermediate, 75),
        skill("Git", "icons/git.png", "#f05032", Box, 10.2, 0.24, -8.0, Expert, 93),
        skill("MongoDB", "icons/mongodb.png", "#47a248", Sphere, 9.0, 0.29, 22.0, Intermediate, 82),
        skill("Touch-typing", "icons/typing.png", "#4dd0e1", Icosahedron, 11.0, 0.18, -32.0, Expert, 98),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let cfg = SceneConfig::default();
        assert_eq!(cfg.skills.len(), 16);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r##"{
            "skills": [
                { "name": "Rust", "logo": "icons/rust.png", "color": "#dea584",
                  "orbit_radius": 4.0, "orbit_speed": -0.3, "level": "Expert" }
            ]
        }"##;
        let cfg = SceneConfig::from_json_str(json).unwrap();
        assert_eq!(cfg.skills.len(), 1);
        assert_eq!(cfg.skills[0].geometry, Geometry::Sphere);
        assert_eq!(cfg.motion, MotionConfig::default());
        assert!(cfg.sway.enabled);
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let mut cfg = SceneConfig::default();
        cfg.skills[1].name = cfg.skills[0].name.clone();
        assert!(matches!(cfg.validate(), Err(ConfigError::DuplicateName(n)) if n == "Python"));
    }

    #[test]
    fn test_rejects_bad_radius_and_speed() {
        let mut cfg = SceneConfig::default();
        cfg.skills[2].orbit_radius = 0.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidRadius { .. })));

        let mut cfg = SceneConfig::default();
        cfg.skills[2].orbit_radius = f32::NAN;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidRadius { .. })));

        let mut cfg = SceneConfig::default();
        cfg.skills[3].orbit_speed = f32::INFINITY;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidSpeed { .. })));
    }

    #[test]
    fn test_rejects_bad_rates_zoom_color_and_empty() {
        let mut cfg = SceneConfig::default();
        cfg.motion.resume_rate = 1.5;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidRate { field: "resume_rate", .. })
        ));

        let mut cfg = SceneConfig::default();
        cfg.motion.zoom_distance = -1.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidZoom(_))));

        let mut cfg = SceneConfig::default();
        cfg.skills[0].color = "blue".into();
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidColor { .. })));

        let mut cfg = SceneConfig::default();
        cfg.skills.clear();
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyCatalog)));
    }

    #[test]
    fn test_rejects_bad_sway() {
        let mut cfg = SceneConfig::default();
        cfg.sway.amplitude = f32::INFINITY;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidSway { field: "amplitude", .. })
        ));

        let mut cfg = SceneConfig::default();
        cfg.sway.frequency = f32::NAN;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidSway { field: "frequency", .. })
        ));

        let mut cfg = SceneConfig::default();
        cfg.sway.frequency = -0.1;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidSway { field: "frequency", .. })
        ));

        // 1e39 overflows f32 to infinity while parsing
        let json = r##"{
            "sway": { "amplitude": 1e39 },
            "skills": [
                { "name": "Rust", "logo": "icons/rust.png", "color": "#dea584",
                  "orbit_radius": 4.0, "orbit_speed": -0.3, "level": "Expert" }
            ]
        }"##;
        assert!(matches!(
            SceneConfig::from_json_str(json),
            Err(ConfigError::InvalidSway { field: "amplitude", .. })
        ));

        // Negative amplitude just mirrors the sway
        let mut cfg = SceneConfig::default();
        cfg.sway.amplitude = -0.3;
        cfg.sway.frequency = 0.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_rejects_xp_above_hundred() {
        let mut cfg = SceneConfig::default();
        cfg.skills[4].xp = 101;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidXp { xp: 101, .. })
        ));

        cfg.skills[4].xp = 100;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            SceneConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = SceneConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
