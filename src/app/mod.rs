//! `OrbitApp`: the egui host for the orbit scene.
//!
//! This module owns the app state and the frame loop. Drawing is split out:
//!
//! - `icons`     : skill icon textures (placeholder when missing)
//! - `scene_view`: star backdrop, projected orbit scene, halo, info card

pub mod icons;
pub mod scene_view;

use std::path::Path;

use eframe::egui;
use glam::Vec2;

use skills_orbit::orbit::projector::OrbitCamera;
use skills_orbit::{EntityId, FocusChange, FrameInput, PerspectiveCamera, Scene};

use icons::IconCache;
use scene_view::StarField;

/// Pointer pick radius in pixels.
const PICK_RADIUS_PX: f32 = 28.0;

// ─── Application state ───────────────────────────────────────────────────────

pub struct OrbitApp {
    pub scene: Scene,
    pub camera: OrbitCamera,
    pub icons: IconCache,
    pub stars: StarField,
    /// Entity currently under the pointer, as last reported to the scene
    pub hovered: Option<EntityId>,
    pub start_time: Option<f64>,
    pub show_rings: bool,
}

impl OrbitApp {
    pub fn new(ctx: &egui::Context, scene: Scene, asset_root: &Path) -> Self {
        let icons = IconCache::load(ctx, asset_root, scene.config().skills.iter());
        Self {
            scene,
            camera: OrbitCamera::default(),
            icons,
            stars: StarField::default(),
            hovered: None,
            start_time: None,
            show_rings: true,
        }
    }

    /// Turn the pointer position into enter/leave events for the scene.
    fn update_hover(&mut self, pointer_ndc: Option<Vec2>, cam: &PerspectiveCamera, size: Vec2) {
        let radius_ndc = 2.0 * PICK_RADIUS_PX / size.y.max(1.0);
        let picked = pointer_ndc.and_then(|ndc| self.scene.pick(ndc, cam, radius_ndc));
        if picked == self.hovered {
            return;
        }

        if let Some(old) = self.hovered {
            self.scene.pointer_leave(old);
        }
        if let Some(new) = picked {
            if let FocusChange::Gained { id, .. } = self.scene.pointer_enter(new, cam) {
                if let Some(e) = self.scene.entity(id) {
                    log::debug!("hover {}", e.skill.name);
                }
            }
        }
        self.hovered = picked;
    }
}

impl eframe::App for OrbitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (now, dt) = ctx.input(|i| (i.time, i.stable_dt));
        let start = *self.start_time.get_or_insert(now);
        let time = (now - start) as f32;

        egui::TopBottomPanel::bottom("hint").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Drag to rotate · Hover a skill to pause its orbit");
                ui.separator();
                ui.checkbox(&mut self.camera.auto_rotate, "Auto-rotate");
                ui.checkbox(&mut self.show_rings, "Orbit rings");
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::from_rgb(4, 4, 14)))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
                let rect = response.rect;
                let size = Vec2::new(rect.width(), rect.height());

                if response.dragged() {
                    let d = response.drag_delta();
                    self.camera.drag(d.x, d.y);
                }
                self.camera.update(dt);
                let cam = self.camera.camera(size.x / size.y.max(1.0));

                // Pointer events land between frames, before the tick
                let pointer_ndc = response.hover_pos().map(|p| {
                    PerspectiveCamera::screen_to_ndc(Vec2::new(p.x - rect.min.x, p.y - rect.min.y), size)
                });
                self.update_hover(pointer_ndc, &cam, size);

                self.scene.tick(FrameInput { time, delta: dt }, &cam);

                scene_view::paint(
                    &painter,
                    rect,
                    &self.scene,
                    &cam,
                    &self.stars,
                    &self.icons,
                    time,
                    self.show_rings,
                );
            });

        ctx.request_repaint();
    }
}
