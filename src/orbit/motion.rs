//! Per-entity orbit motion.
//!
//! Each entity owns one [`MotionController`]. Every tick it eases its speed
//! and zoom toward targets chosen by focus, advances its phase, and derives
//! a world position plus a billboard orientation facing the viewpoint.
//!
//! Smoothing is a fixed fraction per tick (`x += (target - x) * rate`), so
//! with rates in (0, 1] values approach their target from one side and never
//! overshoot.

use glam::{Quat, Vec3};

use crate::config::MotionConfig;
use crate::orbit::math::{
    billboard_orientation, direction_toward, normalize_angle, position_on_orbit,
};

/// Hover ring pulse: frequency (rad/s) and depth of the scale wobble.
const HALO_PULSE_FREQ: f32 = 3.0;
const HALO_PULSE_DEPTH: f32 = 0.15;
/// Hover ring spin in rad/s.
const HALO_SPIN_RATE: f32 = 2.0;

/// Static orbital parameters of one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    pub radius: f32,
    /// rad/s, sign gives direction
    pub base_speed: f32,
    /// Phase at scene setup
    pub initial_phase: f32,
}

/// Animated hover ring, present only while focused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Halo {
    pub scale: f32,
    /// Accumulated roll of the ring in radians
    pub spin: f32,
}

/// Per-tick inputs shared by every entity.
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Seconds since the scene started
    pub time: f32,
    /// Seconds since the previous tick
    pub delta: f32,
    /// Viewpoint, in the same frame as the orbit
    pub viewpoint: Vec3,
}

/// Mutable simulation state of one orbiting entity.
#[derive(Debug, Clone)]
pub struct MotionController {
    params: OrbitParams,
    angle: f32,
    speed: f32,
    zoom_offset: f32,
    position: Vec3,
    // Last good direction/orientation, kept when the viewpoint sits on us
    facing: Vec3,
    orientation: Quat,
    halo: Option<Halo>,
}

impl MotionController {
    pub fn new(params: OrbitParams) -> Self {
        let angle = normalize_angle(params.initial_phase);
        Self {
            params,
            angle,
            speed: params.base_speed,
            zoom_offset: 0.0,
            position: position_on_orbit(angle, params.radius),
            facing: Vec3::Z,
            orientation: Quat::IDENTITY,
            halo: None,
        }
    }

    pub fn params(&self) -> &OrbitParams {
        &self.params
    }

    /// Phase in [0, 2π)
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn zoom_offset(&self) -> f32 {
        self.zoom_offset
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Unit direction from the entity toward the viewpoint (last known good)
    pub fn facing(&self) -> Vec3 {
        self.facing
    }

    pub fn halo(&self) -> Option<Halo> {
        self.halo
    }

    /// Advance one tick.
    pub fn update(&mut self, input: &TickInput, focused: bool, cfg: &MotionConfig) {
        // Variable host cadence; a bogus delta freezes phase for this tick
        let delta = if input.delta.is_finite() && input.delta > 0.0 {
            input.delta
        } else {
            0.0
        };

        let (target_speed, speed_rate) = if focused {
            (0.0, cfg.pause_rate)
        } else {
            (self.params.base_speed, cfg.resume_rate)
        };
        self.speed += (target_speed - self.speed) * speed_rate;

        self.angle = normalize_angle(self.angle + self.speed * delta);

        let (target_zoom, zoom_rate) = if focused {
            (cfg.zoom_distance, cfg.engage_rate)
        } else {
            (0.0, cfg.release_rate)
        };
        self.zoom_offset += (target_zoom - self.zoom_offset) * zoom_rate;

        let base = position_on_orbit(self.angle, self.params.radius);
        if let Some(dir) = direction_toward(base, input.viewpoint) {
            self.facing = dir;
        }
        self.position = base + self.facing * self.zoom_offset;

        // Billboard toward the viewpoint from where we actually are. If the
        // pull landed us on the viewpoint, keep last frame's orientation.
        if let Some(dir) = direction_toward(self.position, input.viewpoint) {
            self.orientation = billboard_orientation(dir);
        }

        self.halo = if focused {
            let spin = self.halo.map_or(0.0, |h| h.spin) + delta * HALO_SPIN_RATE;
            Some(Halo {
                scale: 1.0 + (input.time * HALO_PULSE_FREQ).sin() * HALO_PULSE_DEPTH,
                spin,
            })
        } else {
            None
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    const VIEW: Vec3 = Vec3::new(0.0, 10.0, 28.0);

    fn controller(base_speed: f32) -> MotionController {
        MotionController::new(OrbitParams {
            radius: 5.0,
            base_speed,
            initial_phase: 0.0,
        })
    }

    fn tick(t: f32) -> TickInput {
        TickInput {
            time: t,
            delta: 1.0 / 60.0,
            viewpoint: VIEW,
        }
    }

    #[test]
    fn test_focus_converges_without_overshoot() {
        let cfg = MotionConfig::default();
        let mut m = controller(0.3);
        let mut prev_speed = m.speed();
        let mut prev_zoom = m.zoom_offset();

        for i in 0..300 {
            m.update(&tick(i as f32 / 60.0), true, &cfg);
            assert!(m.speed() <= prev_speed && m.speed() >= 0.0);
            assert!(m.zoom_offset() >= prev_zoom && m.zoom_offset() <= cfg.zoom_distance);
            prev_speed = m.speed();
            prev_zoom = m.zoom_offset();
        }
        assert!(m.speed().abs() < 1e-6);
        assert!((m.zoom_offset() - cfg.zoom_distance).abs() < 1e-6);
    }

    #[test]
    fn test_release_returns_to_base() {
        let cfg = MotionConfig::default();
        let mut m = controller(-0.25);
        for i in 0..300 {
            m.update(&tick(i as f32 / 60.0), true, &cfg);
        }
        let mut prev_speed = m.speed();
        for i in 300..800 {
            m.update(&tick(i as f32 / 60.0), false, &cfg);
            // Negative base speed: approaches from above, never past it
            assert!(m.speed() <= prev_speed && m.speed() >= -0.25);
            prev_speed = m.speed();
        }
        assert!((m.speed() + 0.25).abs() < 1e-5);
        assert!(m.zoom_offset().abs() < 1e-6);
    }

    #[test]
    fn test_pause_is_snappier_than_resume() {
        let cfg = MotionConfig::default();
        let mut pausing = controller(1.0);
        pausing.update(&tick(0.0), true, &cfg);
        let paused_by = 1.0 - pausing.speed();

        let mut resuming = controller(1.0);
        resuming.speed = 0.0;
        resuming.update(&tick(0.0), false, &cfg);
        assert!(paused_by > resuming.speed());
    }

    #[test]
    fn test_angle_stays_bounded_over_long_sessions() {
        let cfg = MotionConfig::default();
        let mut m = controller(0.42);
        // ~10 days at 1 tick per second, in large steps
        for i in 0..10_000 {
            m.update(
                &TickInput { time: i as f32 * 86.4, delta: 86.4, viewpoint: VIEW },
                false,
                &cfg,
            );
        }
        assert!(m.angle().is_finite());
        assert!((0.0..TAU).contains(&m.angle()));
        assert!(m.position().is_finite());
    }

    #[test]
    fn test_zoom_pulls_toward_viewpoint() {
        let cfg = MotionConfig::default();
        let mut m = controller(0.0);
        let before = m.position().distance(VIEW);
        for i in 0..120 {
            m.update(&tick(i as f32 / 60.0), true, &cfg);
        }
        let after = m.position().distance(VIEW);
        assert!((before - after - cfg.zoom_distance).abs() < 1e-3);
    }

    #[test]
    fn test_billboard_faces_viewpoint_every_tick() {
        let cfg = MotionConfig::default();
        let mut m = controller(0.3);
        for i in 0..30 {
            m.update(&tick(i as f32 / 60.0), false, &cfg);
            let to_view = (VIEW - m.position()).normalize();
            assert!((m.orientation() * Vec3::Z - to_view).length() < 1e-4);
        }
    }

    #[test]
    fn test_degenerate_viewpoint_keeps_previous_orientation() {
        let cfg = MotionConfig::default();
        let mut m = controller(0.0);
        m.update(&tick(0.0), false, &cfg);
        let before = m.orientation();

        let on_top = TickInput {
            time: 0.1,
            delta: 1.0 / 60.0,
            viewpoint: m.position(),
        };
        m.update(&on_top, false, &cfg);
        assert_eq!(m.orientation(), before);
        assert!(m.position().is_finite());
    }

    #[test]
    fn test_bad_delta_is_ignored() {
        let cfg = MotionConfig::default();
        let mut m = controller(0.3);
        let angle = m.angle();
        for delta in [f32::NAN, -1.0, f32::INFINITY] {
            m.update(&TickInput { time: 0.0, delta, viewpoint: VIEW }, false, &cfg);
        }
        assert_eq!(m.angle(), angle);
    }

    #[test]
    fn test_halo_only_while_focused() {
        let cfg = MotionConfig::default();
        let mut m = controller(0.3);
        m.update(&tick(0.0), false, &cfg);
        assert!(m.halo().is_none());

        m.update(&tick(0.5), true, &cfg);
        m.update(&tick(0.5 + 1.0 / 60.0), true, &cfg);
        let halo = m.halo().unwrap();
        assert!((halo.spin - 2.0 * 2.0 / 60.0).abs() < 1e-5);
        assert!((halo.scale - 1.0).abs() <= HALO_PULSE_DEPTH + 1e-6);

        m.update(&tick(1.0), false, &cfg);
        assert!(m.halo().is_none());
    }
}
