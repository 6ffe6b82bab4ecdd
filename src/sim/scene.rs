//! Scene object registry
//!
//! The host renders whatever is registered here; the core spawns and despawns
//! through `add`/`remove`. Iteration is ordered by entity ID for determinism.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{Ball, Block, Heart, LifeIcon, LifeLabel, Paddle, Wall};

/// Stable handle to a registered object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Render/collision layer an object lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layer {
    /// HUD: lives label and icons
    Background,
    /// Bricks
    StaticObjects,
    /// Balls, paddles, hearts, walls
    Default,
}

/// Anything the scene can hold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SceneObject {
    Wall(Wall),
    Block(Block),
    Ball(Ball),
    Heart(Heart),
    Paddle(Paddle),
    LifeIcon(LifeIcon),
    LifeLabel(LifeLabel),
}

impl SceneObject {
    pub fn rect(&self) -> &Rect {
        match self {
            SceneObject::Wall(w) => &w.rect,
            SceneObject::Block(b) => &b.rect,
            SceneObject::Ball(b) => &b.rect,
            SceneObject::Heart(h) => &h.rect,
            SceneObject::Paddle(p) => &p.rect,
            SceneObject::LifeIcon(i) => &i.rect,
            SceneObject::LifeLabel(l) => &l.rect,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    layer: Layer,
    object: SceneObject,
}

/// Registry of live scene objects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    entries: BTreeMap<EntityId, Entry>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object and return its handle
    pub fn add(&mut self, object: SceneObject, layer: Layer) -> EntityId {
        self.next_id += 1;
        let id = EntityId(self.next_id);
        self.entries.insert(id, Entry { layer, object });
        id
    }

    /// Remove an object from `layer`. Returns `None` if it is not registered
    /// on that layer (already removed, or never added there).
    pub fn remove(&mut self, id: EntityId, layer: Layer) -> Option<SceneObject> {
        match self.entries.get(&id) {
            Some(entry) if entry.layer == layer => self.entries.remove(&id).map(|e| e.object),
            _ => None,
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn layer_of(&self, id: EntityId) -> Option<Layer> {
        self.entries.get(&id).map(|e| e.layer)
    }

    pub fn get(&self, id: EntityId) -> Option<&SceneObject> {
        self.entries.get(&id).map(|e| &e.object)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SceneObject> {
        self.entries.get_mut(&id).map(|e| &mut e.object)
    }

    /// Number of registered objects
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Objects on a layer, in ID order
    pub fn iter_layer(&self, layer: Layer) -> impl Iterator<Item = (EntityId, &SceneObject)> {
        self.entries
            .iter()
            .filter(move |(_, e)| e.layer == layer)
            .map(|(id, e)| (*id, &e.object))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut SceneObject)> {
        self.entries.iter_mut().map(|(id, e)| (*id, &mut e.object))
    }

    pub fn block(&self, id: EntityId) -> Option<&Block> {
        match self.get(id) {
            Some(SceneObject::Block(block)) => Some(block),
            _ => None,
        }
    }

    pub fn block_mut(&mut self, id: EntityId) -> Option<&mut Block> {
        match self.get_mut(id) {
            Some(SceneObject::Block(block)) => Some(block),
            _ => None,
        }
    }

    pub fn ball(&self, id: EntityId) -> Option<&Ball> {
        match self.get(id) {
            Some(SceneObject::Ball(ball)) => Some(ball),
            _ => None,
        }
    }

    pub fn ball_mut(&mut self, id: EntityId) -> Option<&mut Ball> {
        match self.get_mut(id) {
            Some(SceneObject::Ball(ball)) => Some(ball),
            _ => None,
        }
    }

    pub fn paddle(&self, id: EntityId) -> Option<&Paddle> {
        match self.get(id) {
            Some(SceneObject::Paddle(paddle)) => Some(paddle),
            _ => None,
        }
    }

    pub fn paddle_mut(&mut self, id: EntityId) -> Option<&mut Paddle> {
        match self.get_mut(id) {
            Some(SceneObject::Paddle(paddle)) => Some(paddle),
            _ => None,
        }
    }

    pub fn life_label(&self, id: EntityId) -> Option<&LifeLabel> {
        match self.get(id) {
            Some(SceneObject::LifeLabel(label)) => Some(label),
            _ => None,
        }
    }

    /// IDs of every registered ball
    pub fn ball_ids(&self) -> Vec<EntityId> {
        self.ids_matching(|o| matches!(o, SceneObject::Ball(_)))
    }

    /// IDs of every registered heart
    pub fn heart_ids(&self) -> Vec<EntityId> {
        self.ids_matching(|o| matches!(o, SceneObject::Heart(_)))
    }

    /// IDs of every registered paddle
    pub fn paddle_ids(&self) -> Vec<EntityId> {
        self.ids_matching(|o| matches!(o, SceneObject::Paddle(_)))
    }

    /// IDs of every registered block
    pub fn block_ids(&self) -> Vec<EntityId> {
        self.ids_matching(|o| matches!(o, SceneObject::Block(_)))
    }

    fn ids_matching(&self, pred: impl Fn(&SceneObject) -> bool) -> Vec<EntityId> {
        self.entries
            .iter()
            .filter(|(_, e)| pred(&e.object))
            .map(|(id, _)| *id)
            .collect()
    }
}
