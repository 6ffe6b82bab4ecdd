//! Effect factory: weighted random effect assignment
//!
//! Each call to [`EffectFactory::create_effect`] is one independent draw.
//! Composites draw their two halves from [`SpecialEffect`], which has no
//! composite variant, so nesting is impossible by construction.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::catalog::{EffectKind, SpecialEffect};
use super::effect::Effect;
use crate::tuning::EffectWeights;

pub struct EffectFactory {
    weights: EffectWeights,
    rng: Pcg32,
}

impl EffectFactory {
    pub fn new(weights: EffectWeights, seed: u64) -> Self {
        Self::with_rng(weights, Pcg32::seed_from_u64(seed))
    }

    pub fn with_rng(weights: EffectWeights, rng: Pcg32) -> Self {
        Self { weights, rng }
    }

    /// Draw a fresh effect for one brick
    pub fn create_effect(&mut self) -> Effect {
        let kind = self.draw_kind();
        let effect = match kind {
            EffectKind::Remove => Effect::Remove,
            EffectKind::Composite => {
                let first = self.draw_special();
                let second = self.draw_special();
                Effect::Composite(first, second)
            }
            other => match other.special() {
                Some(special) => Effect::Special(special),
                None => Effect::Remove,
            },
        };
        log::trace!("Drew {:?}", effect);
        effect
    }

    fn draw_kind(&mut self) -> EffectKind {
        let weights = self.weights;
        pick_weighted(
            &mut self.rng,
            EffectKind::ALL.iter().map(|k| (*k, k.weight(&weights))),
        )
        .unwrap_or(EffectKind::Remove)
    }

    fn draw_special(&mut self) -> SpecialEffect {
        let weights = self.weights;
        pick_weighted(
            &mut self.rng,
            SpecialEffect::ALL.iter().map(|s| (*s, s.weight(&weights))),
        )
        // All specials weighted zero: fall back to a uniform pick
        .unwrap_or_else(|| SpecialEffect::ALL[self.rng.random_range(0..SpecialEffect::ALL.len())])
    }
}

/// Pick one item with probability proportional to its weight.
/// `None` when every weight is zero.
fn pick_weighted<T, R, I>(rng: &mut R, items: I) -> Option<T>
where
    T: Copy,
    R: Rng + ?Sized,
    I: Iterator<Item = (T, u32)> + Clone,
{
    let total: u64 = items.clone().map(|(_, w)| u64::from(w)).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.random_range(0..total);
    for (item, weight) in items {
        let weight = u64::from(weight);
        if roll < weight {
            return Some(item);
        }
        roll -= weight;
    }
    None
}
