//! Orbit geometry. Pure functions, no state.

use std::f32::consts::TAU;

use glam::{Mat3, Quat, Vec3};

/// Squared distance below which two points count as coincident.
const DEGENERATE_EPS_SQ: f32 = 1e-12;

/// Point on a circular orbit in the shared XZ plane.
#[inline]
pub fn position_on_orbit(angle: f32, radius: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(radius * cos, 0.0, radius * sin)
}

/// Unit vector from `from` toward `to`.
///
/// `None` when the points coincide (or the inputs are not finite); the
/// direction is undefined there and the caller decides what to keep.
#[inline]
pub fn direction_toward(from: Vec3, to: Vec3) -> Option<Vec3> {
    let d = to - from;
    let len_sq = d.length_squared();
    if !len_sq.is_finite() || len_sq <= DEGENERATE_EPS_SQ {
        return None;
    }
    Some(d / len_sq.sqrt())
}

/// Wrap an angle into [0, 2π).
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Evenly spaced starting phase: `index / count * 2π`.
#[inline]
pub fn initial_phase(index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    normalize_angle(index as f32 / count as f32 * TAU)
}

/// Orientation that turns a flat billboard toward the viewer.
///
/// Local +Z ends up along `facing`, local +Y stays as close to world up as
/// possible. When `facing` is vertical there is no unique roll; world +X is
/// used as the right axis.
pub fn billboard_orientation(facing: Vec3) -> Quat {
    let forward = facing.normalize_or(Vec3::Z);
    let right = Vec3::Y
        .cross(forward)
        .try_normalize()
        .unwrap_or(Vec3::X);
    let up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize()
}

/// Rotation of the whole scene group about Y by `yaw` radians.
#[inline]
pub fn scene_rotation(yaw: f32) -> Quat {
    Quat::from_rotation_y(yaw)
}
