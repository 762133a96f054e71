//! World → screen projection and info-card anchoring.
//!
//! The simulation only needs two things from the renderer: where the
//! viewpoint is, and where a world point lands in normalized device
//! coordinates. [`ScreenProjector`] is that seam; [`PerspectiveCamera`] is the
//! stock implementation and [`OrbitCamera`] drives one around the scene.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Mat4, Quat, Vec2, Vec3};

/// NDC y beyond which the card flips above/below the entity.
const CARD_FLIP_Y: f32 = 0.2;
/// NDC x beyond which the card is pushed back toward the center.
const CARD_EDGE_X: f32 = 0.5;
const CARD_OFFSET_Y: f32 = 3.0;
const CARD_OFFSET_X: f32 = 2.0;

/// Boundary to the rendering collaborator.
pub trait ScreenProjector {
    /// Camera position in world space.
    fn viewpoint(&self) -> Vec3;

    /// Project a world point to NDC, roughly [-1, 1] on each axis with +y up.
    ///
    /// `None` when the point is behind the camera.
    fn project(&self, world: Vec3) -> Option<Vec2>;
}

/// Where the info card sits relative to its entity, in the entity's
/// billboard frame (x right, y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardAnchor {
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for CardAnchor {
    /// Centered, below the entity.
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: -CARD_OFFSET_Y,
        }
    }
}

impl CardAnchor {
    /// World position of the card for an entity at `entity_pos` facing the
    /// viewer with `orientation`.
    pub fn world_position(&self, entity_pos: Vec3, orientation: Quat) -> Vec3 {
        entity_pos + orientation * Vec3::new(self.offset_x, self.offset_y, 0.0)
    }
}

/// Pick a card offset that keeps the card on screen.
///
/// Entities low on screen get the card above, high ones below; near the
/// left/right edges it is pushed inward.
pub fn choose_card_anchor(screen: Vec2) -> CardAnchor {
    let offset_y = if screen.y < -CARD_FLIP_Y {
        CARD_OFFSET_Y
    } else {
        // above the band and inside it both default to below
        -CARD_OFFSET_Y
    };

    let offset_x = if screen.x < -CARD_EDGE_X {
        CARD_OFFSET_X
    } else if screen.x > CARD_EDGE_X {
        -CARD_OFFSET_X
    } else {
        0.0
    };

    CardAnchor { offset_x, offset_y }
}

/// Right-handed perspective camera looking at a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// width / height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 10.0, 28.0),
            target: Vec3::ZERO,
            fov_y: 45f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl PerspectiveCamera {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect.max(1e-3), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// NDC → pixel coordinates for a viewport of `size` (origin top-left).
    pub fn ndc_to_screen(ndc: Vec2, size: Vec2) -> Vec2 {
        Vec2::new((ndc.x + 1.0) * 0.5 * size.x, (1.0 - ndc.y) * 0.5 * size.y)
    }

    /// Pixel coordinates → NDC, inverse of [`Self::ndc_to_screen`].
    pub fn screen_to_ndc(px: Vec2, size: Vec2) -> Vec2 {
        let size = size.max(Vec2::ONE);
        Vec2::new(px.x / size.x * 2.0 - 1.0, 1.0 - px.y / size.y * 2.0)
    }
}

impl ScreenProjector for PerspectiveCamera {
    fn viewpoint(&self) -> Vec3 {
        self.eye
    }

    fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= self.near * 0.5 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        ndc.is_finite().then(|| Vec2::new(ndc.x, ndc.y))
    }
}

/// Orbit controls around a target: auto-rotate, pointer drag, damping.
///
/// Auto-rotate speed uses the familiar "units" where 2.0 is one turn per
/// 30 seconds.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub azimuth: f32,
    pub elevation: f32,
    pub distance: f32,
    pub target: Vec3,
    pub fov_y: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    /// Fraction of the drag velocity applied (and bled off) per tick
    pub damping: f32,
    /// Radians per pixel of drag
    pub drag_sensitivity: f32,
    velocity: Vec2,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        // Same framing as PerspectiveCamera::default(): eye at (0, 10, 28)
        let eye = Vec3::new(0.0, 10.0, 28.0);
        Self {
            azimuth: 0.0,
            elevation: (eye.y / eye.length()).asin(),
            distance: eye.length(),
            target: Vec3::ZERO,
            fov_y: 45f32.to_radians(),
            auto_rotate: true,
            auto_rotate_speed: 0.5,
            damping: 0.05,
            drag_sensitivity: 0.005,
            velocity: Vec2::ZERO,
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        let x = self.distance * self.elevation.cos() * self.azimuth.sin();
        let y = self.distance * self.elevation.sin();
        let z = self.distance * self.elevation.cos() * self.azimuth.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Feed a pointer drag in pixels. Applied gradually by [`Self::update`].
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.velocity += Vec2::new(-dx, dy) * self.drag_sensitivity;
    }

    pub fn update(&mut self, delta: f32) {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        if self.auto_rotate {
            self.azimuth += TAU / 60.0 * self.auto_rotate_speed * delta;
        }

        let step = self.velocity * self.damping;
        self.azimuth += step.x;
        self.elevation += step.y;
        self.velocity -= step;

        let max_elev = FRAC_PI_2 - 0.01;
        self.elevation = self.elevation.clamp(-max_elev, max_elev);
        self.azimuth = self.azimuth.rem_euclid(TAU);
    }

    pub fn camera(&self, aspect: f32) -> PerspectiveCamera {
        PerspectiveCamera {
            eye: self.eye(),
            target: self.target,
            fov_y: self.fov_y,
            aspect,
            ..PerspectiveCamera::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_anchor_vertical() {
        assert_eq!(choose_card_anchor(Vec2::new(0.0, -0.5)).offset_y, 3.0);
        assert_eq!(choose_card_anchor(Vec2::new(0.0, 0.5)).offset_y, -3.0);
        assert_eq!(choose_card_anchor(Vec2::new(0.0, 0.0)).offset_y, -3.0);
        // Band edges stay on the default
        assert_eq!(choose_card_anchor(Vec2::new(0.0, -0.2)).offset_y, -3.0);
    }

    #[test]
    fn test_card_anchor_horizontal() {
        assert_eq!(choose_card_anchor(Vec2::new(-0.8, 0.0)).offset_x, 2.0);
        assert_eq!(choose_card_anchor(Vec2::new(0.8, 0.0)).offset_x, -2.0);
        assert_eq!(choose_card_anchor(Vec2::new(0.3, 0.0)).offset_x, 0.0);
        assert_eq!(choose_card_anchor(Vec2::new(0.5, 0.0)).offset_x, 0.0);
    }

    #[test]
    fn test_card_world_position_uses_billboard_frame() {
        let anchor = CardAnchor { offset_x: 2.0, offset_y: -3.0 };
        let p = anchor.world_position(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY);
        assert!((p - Vec3::new(3.0, -3.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_target_projects_to_center() {
        let cam = PerspectiveCamera::default();
        let ndc = cam.project(cam.target).unwrap();
        assert!(ndc.length() < 1e-5);
    }

    #[test]
    fn test_behind_camera_is_none() {
        let cam = PerspectiveCamera::default();
        let behind = cam.eye + (cam.eye - cam.target);
        assert!(cam.project(behind).is_none());
    }

    #[test]
    fn test_projection_orientation() {
        let cam = PerspectiveCamera::default();
        let right = cam.project(Vec3::new(3.0, 0.0, 0.0)).unwrap();
        let up = cam.project(Vec3::new(0.0, 3.0, 0.0)).unwrap();
        assert!(right.x > 0.0);
        assert!(up.y > 0.0);
    }

    #[test]
    fn test_screen_ndc_roundtrip_corners() {
        let size = Vec2::new(800.0, 600.0);
        let tl = PerspectiveCamera::ndc_to_screen(Vec2::new(-1.0, 1.0), size);
        assert!(tl.length() < 1e-4);
        let ndc = PerspectiveCamera::screen_to_ndc(Vec2::new(800.0, 600.0), size);
        assert!((ndc - Vec2::new(1.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_orbit_camera_default_matches_scene_eye() {
        let oc = OrbitCamera::default();
        assert!((oc.eye() - Vec3::new(0.0, 10.0, 28.0)).length() < 1e-3);
    }

    #[test]
    fn test_orbit_camera_auto_rotate_and_drag() {
        let mut oc = OrbitCamera::default();
        oc.update(60.0);
        // speed 0.5 → half a turn per minute
        assert!((oc.azimuth - TAU / 2.0).abs() < 1e-4);

        let mut oc = OrbitCamera { auto_rotate: false, ..OrbitCamera::default() };
        let el = oc.elevation;
        oc.drag(0.0, 100.0);
        for _ in 0..500 {
            oc.update(1.0 / 60.0);
        }
        assert!((oc.elevation - (el + 0.5)).abs() < 1e-3);
    }
}
