//! Lives ledger
//!
//! Keeps the logical life count and its two HUD projections (a numeric label
//! and a row of heart icons) in sync. Counter changes are cheap and immediate;
//! the scene is only touched by [`LivesLedger::reconcile`], once per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::scene::{EntityId, Layer, Scene, SceneObject};
use super::state::{AssetId, LabelColor, LifeIcon, LifeLabel};
use crate::tuning::HudLayout;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivesLedger {
    lives: u32,
    initial_lives: u32,
    max_lives: u32,
    /// Count the HUD currently shows
    last_rendered: u32,
    label: Option<EntityId>,
    /// One slot per possible life; `Some` while that icon is in the scene
    icons: Vec<Option<EntityId>>,
    hud: HudLayout,
    hud_y: f32,
    heart_sprite: AssetId,
}

impl LivesLedger {
    /// Create the ledger and register the initial HUD objects
    pub fn new(
        initial_lives: u32,
        max_lives: u32,
        window_size: Vec2,
        hud: HudLayout,
        heart_sprite: AssetId,
        scene: &mut Scene,
    ) -> Self {
        let initial_lives = initial_lives.min(max_lives);
        let mut ledger = Self {
            lives: initial_lives,
            initial_lives,
            max_lives,
            last_rendered: initial_lives,
            label: None,
            icons: vec![None; max_lives as usize],
            hud,
            hud_y: window_size.y - hud.bottom,
            heart_sprite,
        };
        ledger.replace_label(scene);
        ledger.show_icons_below(initial_lives, scene);
        ledger
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn max_lives(&self) -> u32 {
        self.max_lives
    }

    pub fn is_losing(&self) -> bool {
        self.lives == 0
    }

    /// Grant one life, up to the maximum
    pub fn increment(&mut self) {
        if self.lives < self.max_lives {
            self.lives += 1;
        }
    }

    /// Lose one life, never below zero
    pub fn decrement(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// Back to the initial count. The HUD follows on the next reconcile.
    pub fn restart(&mut self) {
        self.lives = self.initial_lives;
    }

    /// Slots whose icon is currently in the scene
    pub fn visible_icons(&self) -> Vec<usize> {
        self.icons
            .iter()
            .enumerate()
            .filter_map(|(slot, icon)| icon.map(|_| slot))
            .collect()
    }

    pub fn label(&self) -> Option<EntityId> {
        self.label
    }

    /// Bring the HUD in line with the logical count.
    ///
    /// No-op when nothing changed since the last call. Returns true if the
    /// HUD was updated.
    pub fn reconcile(&mut self, scene: &mut Scene) -> bool {
        if self.lives == self.last_rendered {
            return false;
        }
        let gained = self.lives > self.last_rendered;
        self.last_rendered = self.lives;

        self.replace_label(scene);
        if gained {
            self.show_icons_below(self.lives, scene);
        } else {
            // Normally exactly the icon at index `lives`
            for slot in (self.lives as usize..self.icons.len()).rev() {
                if let Some(id) = self.icons[slot].take() {
                    scene.remove(id, Layer::Background);
                }
            }
        }
        log::debug!("Lives HUD now shows {}", self.lives);
        true
    }

    fn show_icons_below(&mut self, count: u32, scene: &mut Scene) {
        for slot in 0..(count as usize).min(self.icons.len()) {
            if self.icons[slot].is_some() {
                continue;
            }
            let icon = LifeIcon {
                slot,
                rect: Rect::new(self.icon_position(slot), Vec2::splat(self.hud.icon_size)),
                sprite: self.heart_sprite,
            };
            self.icons[slot] = Some(scene.add(SceneObject::LifeIcon(icon), Layer::Background));
        }
    }

    fn replace_label(&mut self, scene: &mut Scene) {
        if let Some(old) = self.label.take() {
            scene.remove(old, Layer::Background);
        }
        let label = LifeLabel {
            rect: Rect::new(self.label_position(), Vec2::splat(self.hud.icon_size)),
            text: self.lives.to_string(),
            color: LabelColor::for_lives(self.lives),
        };
        self.label = Some(scene.add(SceneObject::LifeLabel(label), Layer::Background));
    }

    fn icon_position(&self, slot: usize) -> Vec2 {
        Vec2::new(
            self.hud.left + slot as f32 * (self.hud.icon_spacing + self.hud.icon_size),
            self.hud_y,
        )
    }

    /// Label sits right of the last possible icon
    fn label_position(&self) -> Vec2 {
        Vec2::new(
            self.hud.left
                + self.max_lives as f32 * (self.hud.icon_size + self.hud.icon_spacing)
                + self.hud.icon_spacing,
            self.hud_y,
        )
    }
}
