//! Orbital skills visualization core.
//!
//! Leaves first:
//!   - `math`     : orbit positions, directions, billboard orientation
//!   - `motion`   : per-entity smoothed speed/zoom and phase
//!   - `focus`    : single hover focus and card anchor
//!   - `projector`: world → NDC seam, card placement, cameras
//!   - `scene`    : entity arena and the per-frame tick
//!
//! Single-threaded and frame-driven: the host calls `Scene::tick` once per
//! frame and delivers pointer events between ticks.

pub mod math;
pub mod motion;
pub mod focus;
pub mod projector;
pub mod scene;
