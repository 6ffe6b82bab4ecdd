//! Effect catalog: the labeled outcomes a brick can be assigned and their weights

use serde::{Deserialize, Serialize};

use crate::tuning::EffectWeights;

/// The special effects: everything except plain removal and composition.
///
/// Composite sub-effects are drawn from this set only, so a composite can
/// never contain another composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialEffect {
    /// Drop a heart that grants a life when caught
    AddLife,
    /// Spawn a temporary duplicate paddle
    SecondPaddle,
    /// Make the camera follow the primary ball for a few hits
    TrackingCamera,
    /// Spawn two small extra balls
    ExtraBalls,
}

impl SpecialEffect {
    pub const ALL: [SpecialEffect; 4] = [
        SpecialEffect::AddLife,
        SpecialEffect::SecondPaddle,
        SpecialEffect::TrackingCamera,
        SpecialEffect::ExtraBalls,
    ];

    pub fn weight(self, weights: &EffectWeights) -> u32 {
        match self {
            SpecialEffect::AddLife => weights.add_life,
            SpecialEffect::SecondPaddle => weights.second_paddle,
            SpecialEffect::TrackingCamera => weights.tracking_camera,
            SpecialEffect::ExtraBalls => weights.extra_balls,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpecialEffect::AddLife => "AddLife",
            SpecialEffect::SecondPaddle => "SecondPaddle",
            SpecialEffect::TrackingCamera => "TrackingCamera",
            SpecialEffect::ExtraBalls => "ExtraBalls",
        }
    }
}

/// The six outcomes of the top-level draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Remove,
    AddLife,
    SecondPaddle,
    TrackingCamera,
    ExtraBalls,
    Composite,
}

impl EffectKind {
    pub const ALL: [EffectKind; 6] = [
        EffectKind::Remove,
        EffectKind::AddLife,
        EffectKind::SecondPaddle,
        EffectKind::TrackingCamera,
        EffectKind::ExtraBalls,
        EffectKind::Composite,
    ];

    pub fn weight(self, weights: &EffectWeights) -> u32 {
        match self {
            EffectKind::Remove => weights.remove,
            EffectKind::Composite => weights.composite,
            other => other.special().map_or(0, |s| s.weight(weights)),
        }
    }

    /// The special effect this outcome names, if it names exactly one
    pub fn special(self) -> Option<SpecialEffect> {
        match self {
            EffectKind::AddLife => Some(SpecialEffect::AddLife),
            EffectKind::SecondPaddle => Some(SpecialEffect::SecondPaddle),
            EffectKind::TrackingCamera => Some(SpecialEffect::TrackingCamera),
            EffectKind::ExtraBalls => Some(SpecialEffect::ExtraBalls),
            EffectKind::Remove | EffectKind::Composite => None,
        }
    }
}
