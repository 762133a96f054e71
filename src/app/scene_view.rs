//! Flat rendering of the orbit scene.
//!
//! Everything is projected through the same camera the scene was ticked
//! with, then painted back to front with the egui painter.

use std::f32::consts::TAU;

use eframe::egui;
use glam::{Quat, Vec2, Vec3};

use skills_orbit::color::Rgba;
use skills_orbit::orbit::scene::{Card, EntityView};
use skills_orbit::{PerspectiveCamera, Scene, ScreenProjector};

use super::icons::{initials, IconCache};

const RING_SEGMENTS: usize = 96;
/// Billboard plate radius in world units
const PLATE_RADIUS: f32 = 0.65;
const ICON_SIZE: f32 = 1.2;
const FOCUS_SCALE: f32 = 1.3;
const BURST_DOTS: usize = 8;
const BURST_DISTANCE: f32 = 1.2;
const STAR_COUNT: usize = 1000;
/// Half-width of the cube the stars are scattered in
const STAR_SPREAD: f32 = 50.0;
/// Backdrop spin about Y in rad/s
const STAR_SPIN: f32 = 0.012;

fn color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Deterministic hash in [0, 1]
fn star_hash(seed: usize) -> f32 {
    let x = seed.wrapping_mul(2654435761) ^ seed.wrapping_mul(340573321);
    ((x & 0xFFFF) as f32) / 65535.0
}

/// Background points scattered through a cube around the origin.
pub struct StarField {
    points: Vec<Vec3>,
}

impl StarField {
    pub fn new(count: usize) -> Self {
        let points = (0..count)
            .map(|i| {
                let c = |k: usize| (star_hash(i * 3 + k) - 0.5) * 2.0 * STAR_SPREAD;
                Vec3::new(c(0), c(1), c(2))
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}

impl Default for StarField {
    fn default() -> Self {
        Self::new(STAR_COUNT)
    }
}

struct Viewport<'a> {
    rect: egui::Rect,
    size: Vec2,
    cam: &'a PerspectiveCamera,
    /// Pixels per world unit at distance 1
    focal_px: f32,
}

impl<'a> Viewport<'a> {
    fn new(rect: egui::Rect, cam: &'a PerspectiveCamera) -> Self {
        let size = Vec2::new(rect.width(), rect.height());
        let focal_px = size.y * 0.5 / (cam.fov_y * 0.5).tan();
        Self { rect, size, cam, focal_px }
    }

    fn to_screen(&self, world: Vec3) -> Option<egui::Pos2> {
        let ndc = self.cam.project(world)?;
        let px = PerspectiveCamera::ndc_to_screen(ndc, self.size);
        Some(egui::pos2(self.rect.min.x + px.x, self.rect.min.y + px.y))
    }

    /// On-screen size of `world_len` at `world`.
    fn scale(&self, world: Vec3, world_len: f32) -> f32 {
        let depth = world.distance(self.cam.viewpoint()).max(0.1);
        world_len * self.focal_px / depth
    }
}

#[allow(clippy::too_many_arguments)]
pub fn paint(
    painter: &egui::Painter,
    rect: egui::Rect,
    scene: &Scene,
    cam: &PerspectiveCamera,
    stars: &StarField,
    icons: &IconCache,
    time: f32,
    show_rings: bool,
) {
    let vp = Viewport::new(rect, cam);

    paint_stars(painter, &vp, stars, time);
    if show_rings {
        paint_rings(painter, &vp, &scene.orbit_rings());
    }
    paint_sun(painter, &vp, time);

    // Back to front
    let mut views: Vec<EntityView<'_>> = scene.entities().collect();
    let eye = cam.viewpoint();
    views.sort_by(|a, b| {
        b.position
            .distance_squared(eye)
            .total_cmp(&a.position.distance_squared(eye))
    });
    for v in &views {
        paint_entity(painter, &vp, v, icons);
    }

    if let Some(card) = scene.card() {
        if let Some(v) = views.iter().find(|v| v.id == card.entity) {
            paint_card(painter, &vp, v, &card);
        }
    }
}

fn paint_stars(painter: &egui::Painter, vp: &Viewport<'_>, stars: &StarField, time: f32) {
    let rot = Quat::from_rotation_y(time * STAR_SPIN);
    let color = egui::Color32::from_rgba_unmultiplied(255, 255, 255, 153);
    for &p in stars.points() {
        let world = rot * p;
        if let Some(c) = vp.to_screen(world) {
            painter.circle_filled(c, vp.scale(world, 0.05).clamp(0.5, 1.5), color);
        }
    }
}

fn paint_rings(painter: &egui::Painter, vp: &Viewport<'_>, radii: &[f32]) {
    let stroke = egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(77, 208, 225, 70));
    for &r in radii {
        let mut prev: Option<egui::Pos2> = None;
        for i in 0..=RING_SEGMENTS {
            let a = i as f32 / RING_SEGMENTS as f32 * TAU;
            let p = vp.to_screen(Vec3::new(r * a.cos(), 0.0, r * a.sin()));
            if let (Some(p0), Some(p1)) = (prev, p) {
                painter.line_segment([p0, p1], stroke);
            }
            prev = p;
        }
    }
}

fn paint_sun(painter: &egui::Painter, vp: &Viewport<'_>, time: f32) {
    let Some(c) = vp.to_screen(Vec3::ZERO) else {
        return;
    };
    let pulse = 1.0 + (time * 0.5).sin() * 0.1;
    let layers: [(f32, [u8; 4]); 4] = [
        (2.5, [255, 255, 224, 25]),
        (2.0, [255, 245, 157, 60]),
        (1.6 * pulse, [255, 235, 59, 128]),
        (1.35, [255, 215, 0, 204]),
    ];
    for (radius, [r, g, b, a]) in layers {
        let px = vp.scale(Vec3::ZERO, radius);
        painter.circle_filled(c, px, egui::Color32::from_rgba_unmultiplied(r, g, b, a));
    }
    painter.circle_filled(c, vp.scale(Vec3::ZERO, 1.2), egui::Color32::WHITE);
}

fn paint_entity(painter: &egui::Painter, vp: &Viewport<'_>, v: &EntityView<'_>, icons: &IconCache) {
    let Some(c) = vp.to_screen(v.position) else {
        return;
    };
    let k = if v.focused { FOCUS_SCALE } else { 1.0 };
    let accent = color32(v.accent);

    // Plate and constant accent ring
    painter.circle_filled(
        c,
        vp.scale(v.position, 0.75),
        egui::Color32::from_rgba_unmultiplied(255, 255, 255, 76),
    );
    painter.circle_filled(
        c,
        vp.scale(v.position, PLATE_RADIUS),
        egui::Color32::from_rgba_unmultiplied(255, 255, 255, 230),
    );
    painter.circle_stroke(
        c,
        vp.scale(v.position, 0.68),
        egui::Stroke::new(2.0, color32(v.accent.with_alpha(0.3))),
    );

    let icon_px = vp.scale(v.position, ICON_SIZE * k);
    match icons.get(&v.skill.name) {
        Some(tex) => {
            painter.image(
                tex.id(),
                egui::Rect::from_center_size(c, egui::vec2(icon_px, icon_px)),
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        None => {
            painter.text(
                c,
                egui::Align2::CENTER_CENTER,
                initials(&v.skill.name),
                egui::FontId::proportional((icon_px * 0.4).clamp(8.0, 40.0)),
                accent,
            );
        }
    }

    if let Some(halo) = v.halo {
        painter.circle_stroke(
            c,
            vp.scale(v.position, 0.73 * halo.scale),
            egui::Stroke::new(3.0, color32(v.accent.with_alpha(0.7))),
        );
        painter.circle_stroke(
            c,
            vp.scale(v.position, 0.83),
            egui::Stroke::new(2.0, color32(v.accent.with_alpha(0.5))),
        );
        let burst_px = vp.scale(v.position, BURST_DISTANCE);
        let dot_px = vp.scale(v.position, 0.05).max(1.5);
        for i in 0..BURST_DOTS {
            let a = halo.spin + i as f32 / BURST_DOTS as f32 * TAU;
            let p = c + egui::vec2(a.cos(), -a.sin()) * burst_px;
            painter.circle_filled(p, dot_px, color32(v.accent.with_alpha(0.8)));
        }
    }
}

fn paint_card(painter: &egui::Painter, vp: &Viewport<'_>, v: &EntityView<'_>, card: &Card) {
    let Some(c) = vp.to_screen(card.world_position) else {
        return;
    };
    let accent = color32(v.accent);
    let card_rect = egui::Rect::from_center_size(c, egui::vec2(220.0, 96.0));

    painter.rect(
        card_rect,
        16.0,
        egui::Color32::from_rgba_unmultiplied(0, 0, 0, 235),
        egui::Stroke::new(2.0, accent),
    );
    painter.text(
        card_rect.center_top() + egui::vec2(0.0, 26.0),
        egui::Align2::CENTER_CENTER,
        &v.skill.name,
        egui::FontId::proportional(24.0),
        egui::Color32::WHITE,
    );
    painter.text(
        card_rect.center_top() + egui::vec2(0.0, 56.0),
        egui::Align2::CENTER_CENTER,
        v.skill.level.label(),
        egui::FontId::proportional(16.0),
        accent,
    );

    // xp bar
    let bar = egui::Rect::from_min_size(
        card_rect.left_bottom() + egui::vec2(20.0, -18.0),
        egui::vec2(card_rect.width() - 40.0, 6.0),
    );
    let filled = bar.width() * f32::from(v.skill.xp) / 100.0;
    painter.rect_filled(bar, 3.0, egui::Color32::from_gray(40));
    painter.rect_filled(
        egui::Rect::from_min_size(bar.min, egui::vec2(filled, bar.height())),
        3.0,
        accent,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_field_is_seeded_and_bounded() {
        let a = StarField::default();
        let b = StarField::default();
        assert_eq!(a.points().len(), STAR_COUNT);
        assert_eq!(a.points(), b.points());
        assert!(a
            .points()
            .iter()
            .all(|p| p.abs().max_element() <= STAR_SPREAD));
        // Not collapsed onto a line or plane
        let spread = a
            .points()
            .iter()
            .fold(Vec3::ZERO, |acc, p| acc.max(p.abs()));
        assert!(spread.min_element() > STAR_SPREAD * 0.9);
    }
}
