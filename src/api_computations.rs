//! Recommendation fusion: the public `solve_best_move` entry point.
//!
//! Combines the EV baseline ([`crate::ev_solver`]) with the best hand strategy
//! ([`crate::pattern_solver`]). The top-ranked hand strategy is adopted when
//! its own expected value is not below the baseline maximum; otherwise the
//! baseline mask stands.

use serde::Serialize;
use tracing::{debug, trace};

use crate::breakdown::{build_breakdown, recommendation_message, BreakdownEntry};
use crate::constants::EPS;
use crate::dice_mechanics::validate_dice;
use crate::error::{AdvisorError, AdvisorResult};
use crate::ev_solver::{choose_best_keep_mask, compute_expected_value_for_keep_mask};
use crate::pattern_solver::{solve_hand_categories, HandStrategy};
use crate::types::{Category, CategorySet, KeepMask, YachtContext};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DieAction {
    Keep,
    Reroll,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DieRecommendation {
    pub index: usize,
    pub value: i32,
    pub action: DieAction,
}

/// The hand the final keep is going for.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PursuedHand {
    pub category: Category,
    pub probability: f64,
    pub conditional_value: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recommendation {
    pub keep_mask: KeepMask,
    pub keep_indices: Vec<usize>,
    /// EV of the chosen mask, rounded to 2 decimals.
    pub expected_value: f64,
    pub dice_recommendations: Vec<DieRecommendation>,
    pub message: String,
    pub pursued: Option<PursuedHand>,
    pub breakdown: Vec<BreakdownEntry>,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Ranking order: probability (within EPS), then category priority, then
/// larger kept faces.
fn outranks(a: &HandStrategy, b: &HandStrategy, dice: &[i32; 5]) -> bool {
    if (a.probability - b.probability).abs() > EPS {
        return a.probability > b.probability;
    }
    let (pa, pb) = (a.category.hand_priority(), b.category.hand_priority());
    if pa != pb {
        return pa > pb;
    }
    a.kept_values_desc(dice) > b.kept_values_desc(dice)
}

/// Top-ranked strategy among those with nonzero probability.
pub fn rank_target_strategy<'a>(
    strategies: &'a [HandStrategy],
    dice: &[i32; 5],
) -> Option<&'a HandStrategy> {
    let mut best: Option<&HandStrategy> = None;
    for s in strategies.iter().filter(|s| s.probability > 0.0) {
        match best {
            Some(b) if !outranks(s, b, dice) => {}
            _ => best = Some(s),
        }
    }
    best
}

/// Fusion over validated inputs.
pub fn compute_recommendation(
    ctx: &YachtContext,
    dice: &[i32; 5],
    rolls_left: u32,
    open: CategorySet,
) -> Recommendation {
    let baseline = choose_best_keep_mask(ctx, dice, open, rolls_left);
    let strategies = solve_hand_categories(ctx, dice, open, rolls_left);
    for s in &strategies {
        trace!(
            category = s.category.name(),
            probability = s.probability,
            keep = s.keep_mask.bits(),
            ties = s.tie_keeps.len(),
            "hand strategy"
        );
    }

    let mut keep_mask = baseline.keep_mask;
    let mut expected_value = baseline.expected_value;
    let mut pursued = None;

    if let Some(target) = rank_target_strategy(&strategies, dice) {
        let target_ev = compute_expected_value_for_keep_mask(ctx, dice, target.keep_mask, open);
        debug!(
            target = target.category.name(),
            target_ev,
            best_ev = baseline.expected_value,
            "target strategy"
        );
        if target_ev >= baseline.expected_value {
            keep_mask = target.keep_mask;
            expected_value = target_ev;
            pursued = Some(PursuedHand {
                category: target.category,
                probability: target.probability,
                conditional_value: target.conditional_value,
            });
        }
    }

    let dice_recommendations = dice
        .iter()
        .enumerate()
        .map(|(index, &value)| DieRecommendation {
            index,
            value,
            action: if keep_mask.keeps(index) {
                DieAction::Keep
            } else {
                DieAction::Reroll
            },
        })
        .collect();

    let message = recommendation_message(dice, keep_mask, pursued.map(|p| p.category), rolls_left);

    Recommendation {
        keep_mask,
        keep_indices: keep_mask.indices().collect(),
        expected_value: round2(expected_value),
        dice_recommendations,
        message,
        pursued,
        breakdown: build_breakdown(dice, open, &strategies, rolls_left),
    }
}

/// Recommend which dice to keep.
///
/// `open_categories` holds category ids 0..=11 (duplicates collapse).
///
/// # Panics
/// Panics if `ctx` has not been built.
pub fn solve_best_move(
    ctx: &YachtContext,
    dice: &[i32],
    rolls_left: i32,
    open_categories: &[i32],
) -> AdvisorResult<Recommendation> {
    assert!(ctx.is_built(), "YachtContext used before its tables were built");

    let dice = validate_dice(dice)?;
    if rolls_left < 0 {
        return Err(AdvisorError::NegativeRolls(rolls_left));
    }
    let open = CategorySet::from_ids(open_categories)?;
    if open.is_empty() {
        return Err(AdvisorError::NoOpenCategories);
    }

    debug!(?dice, rolls_left, open = open.bits(), "solve_best_move");
    let rec = compute_recommendation(ctx, &dice, rolls_left as u32, open);
    debug!(
        keep = rec.keep_mask.bits(),
        ev = rec.expected_value,
        pursued = rec.pursued.map(|p| p.category.name()),
        "recommendation"
    );
    Ok(rec)
}
