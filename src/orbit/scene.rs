//! Scene composition and the per-frame contract.
//!
//! A [`Scene`] owns every orbiting entity (array-of-structs, addressed by
//! [`EntityId`]) plus the single shared focus. The host calls [`Scene::tick`]
//! once per frame and forwards pointer events in between; everything the
//! renderer needs comes back out through [`Scene::entities`] and
//! [`Scene::card`].
//!
//! The whole group sways gently about Y while nothing is focused. Entities
//! simulate in the group's local frame, so the viewpoint is brought into that
//! frame first and results are rotated back out to world space.

use glam::{Quat, Vec2, Vec3};

use crate::color::Rgba;
use crate::config::{SceneConfig, SkillConfig};
use crate::error::ConfigError;
use crate::orbit::focus::{EntityId, FocusChange, FocusState, HoverController};
use crate::orbit::math::{initial_phase, scene_rotation};
use crate::orbit::motion::{Halo, MotionController, OrbitParams, TickInput};
use crate::orbit::projector::{CardAnchor, ScreenProjector};

/// Radii closer than this share one ring guide.
const RING_MERGE_EPS: f32 = 1e-3;

/// Timing supplied by the host render loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Seconds since the scene started
    pub time: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

/// One orbiting skill: static metadata plus its motion state.
#[derive(Debug, Clone)]
pub struct OrbitingEntity {
    pub skill: SkillConfig,
    pub accent: Rgba,
    motion: MotionController,
}

impl OrbitingEntity {
    pub fn motion(&self) -> &MotionController {
        &self.motion
    }
}

/// Per-frame render data for one entity, in world space.
#[derive(Debug, Clone, Copy)]
pub struct EntityView<'a> {
    pub id: EntityId,
    pub skill: &'a SkillConfig,
    pub accent: Rgba,
    pub position: Vec3,
    /// Billboard orientation: local +Z faces the viewpoint
    pub orientation: Quat,
    pub focused: bool,
    pub halo: Option<Halo>,
}

/// The focused entity's info card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Card {
    pub entity: EntityId,
    pub anchor: CardAnchor,
    pub world_position: Vec3,
}

pub struct Scene {
    config: SceneConfig,
    entities: Vec<OrbitingEntity>,
    hover: HoverController,
    /// Current group rotation about Y
    sway_yaw: f32,
}

impl Scene {
    /// Validate `config` and lay the entities out with evenly spaced phases.
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let count = config.skills.len();
        let entities: Vec<OrbitingEntity> = config
            .skills
            .iter()
            .enumerate()
            .map(|(i, skill)| OrbitingEntity {
                skill: skill.clone(),
                accent: skill.accent(),
                motion: MotionController::new(OrbitParams {
                    radius: skill.orbit_radius,
                    base_speed: skill.orbit_speed,
                    initial_phase: initial_phase(i, count),
                }),
            })
            .collect();

        log::info!("Orbit scene ready: {} entities", entities.len());

        Ok(Self {
            hover: HoverController::new(entities.len()),
            config,
            entities,
            sway_yaw: 0.0,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entity(&self, id: EntityId) -> Option<&OrbitingEntity> {
        self.entities.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<EntityId> {
        self.entities
            .iter()
            .position(|e| e.skill.name == name)
            .map(EntityId)
    }

    pub fn focus(&self) -> FocusState {
        self.hover.focus()
    }

    pub fn sway_yaw(&self) -> f32 {
        self.sway_yaw
    }

    fn group_rotation(&self) -> Quat {
        scene_rotation(self.sway_yaw)
    }

    /// World position of an entity as of the last tick.
    pub fn world_position(&self, id: EntityId) -> Option<Vec3> {
        let rot = self.group_rotation();
        self.entity(id).map(|e| rot * e.motion.position())
    }

    /// Advance every entity by one frame.
    ///
    /// Each entity reads only the shared focus, which is settled before the
    /// loop, so update order does not matter.
    pub fn tick(&mut self, frame: FrameInput, projector: &dyn ScreenProjector) {
        let sway = self.config.sway;
        if sway.enabled && self.hover.focused().is_none() {
            let yaw = (frame.time * sway.frequency).sin() * sway.amplitude;
            // time * frequency can still overflow; hold the last yaw
            if yaw.is_finite() {
                self.sway_yaw = yaw;
            }
        }

        let rot = self.group_rotation();
        let input = TickInput {
            time: frame.time,
            delta: frame.delta,
            viewpoint: rot.inverse() * projector.viewpoint(),
        };

        let focus = self.hover.focus();
        let motion_cfg = self.config.motion;
        for (i, entity) in self.entities.iter_mut().enumerate() {
            entity.motion.update(&input, focus.is(EntityId(i)), &motion_cfg);
        }

        if let Some(id) = focus.entity() {
            if let Some(pos) = self.world_position(id) {
                self.hover.refresh_card(pos, projector);
            }
        }
    }

    pub fn pointer_enter(&mut self, id: EntityId, projector: &dyn ScreenProjector) -> FocusChange {
        match self.world_position(id) {
            Some(pos) => self.hover.on_pointer_enter(id, pos, projector),
            None => {
                log::debug!("pointer enter for unknown entity {:?}, ignored", id);
                FocusChange::Unchanged
            }
        }
    }

    pub fn pointer_leave(&mut self, id: EntityId) -> FocusChange {
        self.hover.on_pointer_leave(id)
    }

    /// Render data for every entity, in id order.
    pub fn entities(&self) -> impl Iterator<Item = EntityView<'_>> + '_ {
        let rot = self.group_rotation();
        let focus = self.hover.focus();
        self.entities.iter().enumerate().map(move |(i, e)| EntityView {
            id: EntityId(i),
            skill: &e.skill,
            accent: e.accent,
            position: rot * e.motion.position(),
            orientation: rot * e.motion.orientation(),
            focused: focus.is(EntityId(i)),
            halo: e.motion.halo(),
        })
    }

    /// The active info card, if an entity is focused.
    pub fn card(&self) -> Option<Card> {
        let id = self.hover.focused()?;
        let anchor = self.hover.card_anchor()?;
        let e = self.entity(id)?;
        let rot = self.group_rotation();
        let world_position =
            anchor.world_position(rot * e.motion.position(), rot * e.motion.orientation());
        Some(Card {
            entity: id,
            anchor,
            world_position,
        })
    }

    /// Distinct orbit radii, ascending, for drawing ring guides.
    pub fn orbit_rings(&self) -> Vec<f32> {
        let mut radii: Vec<f32> = self.entities.iter().map(|e| e.skill.orbit_radius).collect();
        radii.sort_by(f32::total_cmp);
        radii.dedup_by(|a, b| (*a - *b).abs() < RING_MERGE_EPS);
        radii
    }

    /// Entity under a pointer at `ndc`, if any lies within `radius_ndc`.
    ///
    /// Closest on screen wins; ties go to the one nearer the viewpoint.
    pub fn pick(
        &self,
        ndc: Vec2,
        projector: &dyn ScreenProjector,
        radius_ndc: f32,
    ) -> Option<EntityId> {
        let eye = projector.viewpoint();
        let r_sq = radius_ndc * radius_ndc;
        self.entities()
            .filter_map(|v| {
                let screen = projector.project(v.position)?;
                let d_sq = screen.distance_squared(ndc);
                (d_sq <= r_sq).then(|| (v.id, d_sq, v.position.distance_squared(eye)))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.2.total_cmp(&b.2)))
            .map(|(id, _, _)| id)
    }
}
