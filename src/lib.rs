pub mod color;
pub mod config;
pub mod error;
pub mod orbit;

// Icon decoding for the viewer; the simulation never touches pixels
pub mod assets;

pub use config::{MotionConfig, SceneConfig, SkillConfig};
pub use error::{AssetError, ConfigError};
pub use orbit::focus::{EntityId, FocusChange, FocusState};
pub use orbit::projector::{CardAnchor, PerspectiveCamera, ScreenProjector};
pub use orbit::scene::{FrameInput, Scene};
