//! Expected-value baseline: the keep mask maximizing E[best open score] after
//! one reroll of the non-kept dice.
//!
//! E(mask) = Σ_{o ∈ distribution(k)} P(o) · max_{c open} s(kept ∪ o, c),
//! with k = number of rerolled dice; for k = 0 it is simply the best open
//! score of the current dice.

use rayon::prelude::*;

use crate::constants::NUM_DICE;
use crate::dice_mechanics::{find_dice_set_index, merge_kept_with_outcome, sort_dice_set};
use crate::types::{CategorySet, KeepMask, YachtContext};

/// Winner of the baseline scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvBaseline {
    pub keep_mask: KeepMask,
    pub expected_value: f64,
}

/// max_{c open} s(r, c) for a sorted hand; 0 if nothing scores.
#[inline]
pub fn best_open_score(ctx: &YachtContext, sorted: &[i32; 5], open: CategorySet) -> i32 {
    let row = &ctx.precomputed_scores[find_dice_set_index(ctx, sorted)];
    open.iter().map(|c| row[c.index()]).fold(0, i32::max)
}

/// Single mask evaluation.
pub fn compute_expected_value_for_keep_mask(
    ctx: &YachtContext,
    dice: &[i32; 5],
    mask: KeepMask,
    open: CategorySet,
) -> f64 {
    let (kept, n) = mask.kept_values(dice);
    let k = NUM_DICE - n;

    if k == 0 {
        let mut sorted = kept;
        sort_dice_set(&mut sorted);
        return best_open_score(ctx, &sorted, open) as f64;
    }

    let mut ev = 0.0;
    for outcome in &ctx.distribution(k).outcomes {
        let hand = merge_kept_with_outcome(&kept[..n], &outcome.faces[..k]);
        ev += outcome.probability * best_open_score(ctx, &hand, open) as f64;
    }
    ev
}

/// Expected value of every candidate mask, ascending mask order.
pub fn compute_keep_mask_values(
    ctx: &YachtContext,
    dice: &[i32; 5],
    open: CategorySet,
    rolls_left: u32,
) -> Vec<(KeepMask, f64)> {
    let masks: Vec<KeepMask> = KeepMask::candidates(rolls_left).collect();
    masks
        .par_iter()
        .map(|&m| (m, compute_expected_value_for_keep_mask(ctx, dice, m, open)))
        .collect()
}

/// Find argmax mask. Strictly greater wins, so on an exact tie the lower mask
/// (the one enumerated first) is retained.
pub fn choose_best_keep_mask(
    ctx: &YachtContext,
    dice: &[i32; 5],
    open: CategorySet,
    rolls_left: u32,
) -> EvBaseline {
    let mut best = EvBaseline {
        keep_mask: KeepMask::ALL,
        expected_value: f64::NEG_INFINITY,
    };
    for (mask, ev) in compute_keep_mask_values(ctx, dice, open, rolls_left) {
        if ev > best.expected_value {
            best = EvBaseline {
                keep_mask: mask,
                expected_value: ev,
            };
        }
    }
    best
}
