//! Hover focus.
//!
//! One entity at most holds focus. Pointer events arrive one at a time from
//! the host, between frames, so plain `&mut self` is enough: last enter wins,
//! and a leave only counts if it comes from the entity that holds focus.

use glam::Vec3;

use crate::orbit::projector::{choose_card_anchor, CardAnchor, ScreenProjector};

/// Index of an entity in its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

/// Which entity, if any, is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    None,
    Entity(EntityId),
}

impl FocusState {
    pub fn entity(self) -> Option<EntityId> {
        match self {
            Self::None => None,
            Self::Entity(id) => Some(id),
        }
    }

    pub fn is(self, id: EntityId) -> bool {
        self == Self::Entity(id)
    }
}

/// Outcome of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusChange {
    /// Focus moved to this entity (from nothing or from another entity)
    Gained { id: EntityId, previous: Option<EntityId> },
    /// Focus dropped back to none
    Cleared { id: EntityId },
    /// Event had no effect (repeat enter, stale leave, unknown id)
    Unchanged,
}

/// Owner of the scene's [`FocusState`] and the focused entity's card anchor.
#[derive(Debug, Clone)]
pub struct HoverController {
    entity_count: usize,
    focus: FocusState,
    card: Option<CardAnchor>,
}

impl HoverController {
    pub fn new(entity_count: usize) -> Self {
        Self {
            entity_count,
            focus: FocusState::None,
            card: None,
        }
    }

    pub fn focus(&self) -> FocusState {
        self.focus
    }

    pub fn focused(&self) -> Option<EntityId> {
        self.focus.entity()
    }

    pub fn is_focused(&self, id: EntityId) -> bool {
        self.focus.is(id)
    }

    /// Anchor of the focused entity's info card.
    pub fn card_anchor(&self) -> Option<CardAnchor> {
        self.card
    }

    fn known(&self, id: EntityId) -> bool {
        id.0 < self.entity_count
    }

    /// Pointer entered `id` at world position `position`.
    ///
    /// Takes focus and places the card for this entity only.
    pub fn on_pointer_enter(
        &mut self,
        id: EntityId,
        position: Vec3,
        projector: &dyn ScreenProjector,
    ) -> FocusChange {
        if !self.known(id) {
            log::debug!("pointer enter for unknown entity {:?}, ignored", id);
            return FocusChange::Unchanged;
        }
        if self.focus.is(id) {
            return FocusChange::Unchanged;
        }

        let previous = self.focus.entity();
        self.focus = FocusState::Entity(id);
        self.card = Some(
            projector
                .project(position)
                .map(choose_card_anchor)
                .unwrap_or_default(),
        );
        log::debug!("focus {:?} -> {:?}", previous, id);
        FocusChange::Gained { id, previous }
    }

    /// Pointer left `id`. No-op unless `id` holds focus.
    pub fn on_pointer_leave(&mut self, id: EntityId) -> FocusChange {
        if !self.focus.is(id) {
            return FocusChange::Unchanged;
        }
        self.focus = FocusState::None;
        self.card = None;
        log::debug!("focus cleared by {:?}", id);
        FocusChange::Cleared { id }
    }

    /// Re-place the card for the focused entity now at `position`.
    ///
    /// Called every tick while focused. If the entity cannot be projected
    /// (behind the camera) the previous anchor stays.
    pub fn refresh_card(&mut self, position: Vec3, projector: &dyn ScreenProjector) {
        if self.focus == FocusState::None {
            return;
        }
        if let Some(screen) = projector.project(position) {
            self.card = Some(choose_card_anchor(screen));
        }
    }
}
