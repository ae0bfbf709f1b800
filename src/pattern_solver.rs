//! Per-hand keep strategies: for each open hand category (Yacht, Four of a
//! Kind, Full House, Small/Large Straight), the keep mask maximizing the
//! probability that the next reroll yields a nonzero score in that category,
//! regardless of how many points it is worth.
//!
//! The scan visits masks in ascending order; probabilities within [`EPS`] are
//! tied. Default tie-break prefers the larger kept faces (sorted descending,
//! compared lexicographically). Category overrides:
//!
//! | Category | Rule |
//! |---|---|
//! | Four of a Kind | 4-run or 3-run in the current dice short-circuits the scan |
//! | Full House | "keep nothing" wins any tie it is part of |
//! | Straights | fewest kept dice first, then larger kept faces |

use std::cmp::Ordering;

use serde::Serialize;

use crate::constants::*;
use crate::dice_mechanics::{count_faces, merge_kept_with_outcome, positions_of_face, sort_dice_set};
use crate::types::{Category, CategorySet, KeepMask, YachtContext};

/// How a strategy's keep was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategySource {
    /// Probability scan over the candidate masks.
    Scan,
    /// Four of a Kind shortcut: keep `run` dice showing `face`.
    KindRun { face: i32, run: usize },
}

/// Best keep for one hand category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HandStrategy {
    pub category: Category,
    pub probability: f64,
    pub keep_mask: KeepMask,
    /// Expected score given the hand is completed, when known.
    pub conditional_value: Option<f64>,
    /// Every tied keep, sorted by descending kept face values.
    pub tie_keeps: Vec<KeepMask>,
    pub source: StrategySource,
}

impl HandStrategy {
    /// Kept face values, descending.
    pub fn kept_values_desc(&self, dice: &[i32; 5]) -> Vec<i32> {
        self.keep_mask.kept_values_desc(dice)
    }
}

/// Kept faces sorted descending, without allocating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TieKey {
    vals: [i32; 5],
    len: usize,
}

impl TieKey {
    fn of(mask: KeepMask, dice: &[i32; 5]) -> Self {
        let (mut vals, len) = mask.kept_values(dice);
        vals[..len].sort_unstable_by(|a, b| b.cmp(a));
        Self { vals, len }
    }

    fn as_slice(&self) -> &[i32] {
        &self.vals[..self.len]
    }
}

impl Ord for TieKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl PartialOrd for TieKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// P(nonzero score in `category`) and Σ P · score over the successful outcomes.
fn success_stats(
    ctx: &YachtContext,
    dice: &[i32; 5],
    mask: KeepMask,
    category: Category,
) -> (f64, f64) {
    let (kept, n) = mask.kept_values(dice);
    let k = NUM_DICE - n;

    if k == 0 {
        let mut sorted = kept;
        sort_dice_set(&mut sorted);
        let s = ctx.score_sorted(&sorted, category);
        return if s > 0 { (1.0, s as f64) } else { (0.0, 0.0) };
    }

    let mut prob = 0.0;
    let mut weighted = 0.0;
    for outcome in &ctx.distribution(k).outcomes {
        let hand = merge_kept_with_outcome(&kept[..n], &outcome.faces[..k]);
        let s = ctx.score_sorted(&hand, category);
        if s > 0 {
            prob += outcome.probability;
            weighted += outcome.probability * s as f64;
        }
    }
    (prob, weighted)
}

/// Probability that keeping `mask` and rerolling the rest scores nonzero in
/// `category`. With nothing rerolled this is 1.0 or 0.0.
pub fn success_probability(
    ctx: &YachtContext,
    dice: &[i32; 5],
    mask: KeepMask,
    category: Category,
) -> f64 {
    success_stats(ctx, dice, mask, category).0
}

/// Expected score in `category` given success, or `None` if success is impossible.
pub fn conditional_value(
    ctx: &YachtContext,
    dice: &[i32; 5],
    mask: KeepMask,
    category: Category,
) -> Option<f64> {
    let (prob, weighted) = success_stats(ctx, dice, mask, category);
    (prob > 0.0).then(|| weighted / prob)
}

/// Four of a Kind shortcut on the current dice: a face showing 4+ times is
/// kept as exactly 4 dice (certain success); otherwise the largest face showing
/// 3 times is kept with the fixed heuristic probability.
fn four_kind_shortcut(dice: &[i32; 5]) -> Option<HandStrategy> {
    let face_count = count_faces(dice);
    let sum_all: i32 = dice.iter().sum();

    let (face, run, probability, value) =
        if let Some(face) = (1..=6).rev().find(|&f| face_count[f as usize] >= 4) {
            (face, 4, 1.0, sum_all as f64)
        } else if let Some(face) = (1..=6).rev().find(|&f| face_count[f as usize] == 3) {
            (
                face,
                3,
                FOUR_KIND_THREE_RUN_PROBABILITY,
                (4 * face) as f64 + MEAN_DIE_VALUE,
            )
        } else {
            return None;
        };

    let positions: Vec<usize> = positions_of_face(dice, face).into_iter().take(run).collect();
    Some(HandStrategy {
        category: Category::FourOfAKind,
        probability,
        keep_mask: KeepMask::from_indices(&positions),
        conditional_value: Some(value),
        tie_keeps: Vec::new(),
        source: StrategySource::KindRun { face, run },
    })
}

/// General scan over the candidate masks. Returns `None` when no candidate
/// can score in `category`.
pub fn scan_category(
    ctx: &YachtContext,
    dice: &[i32; 5],
    category: Category,
    rolls_left: u32,
) -> Option<HandStrategy> {
    let mut probs = [0.0f64; NUM_KEEP_MASKS];
    let mut max_prob = -1.0f64;
    let mut best = KeepMask::NONE;
    let mut best_key = TieKey::of(best, dice);
    // Bit m set = mask m ties the maximum.
    let mut tied: u32 = 0;

    for mask in KeepMask::candidates(rolls_left) {
        let p = success_probability(ctx, dice, mask, category);
        probs[mask.bits() as usize] = p;
        let key = TieKey::of(mask, dice);
        if p > max_prob + EPS {
            max_prob = p;
            best = mask;
            best_key = key;
            tied = 1 << mask.bits();
        } else if (p - max_prob).abs() <= EPS && p > 0.0 {
            tied |= 1 << mask.bits();
            if key > best_key {
                best = mask;
                best_key = key;
            }
        }
    }

    if max_prob <= 0.0 {
        return None;
    }

    let tied_masks: Vec<KeepMask> = KeepMask::all()
        .filter(|m| tied & (1 << m.bits()) != 0)
        .collect();

    match category {
        Category::FullHouse => {
            if tied & 1 != 0 {
                best = KeepMask::NONE;
            }
        }
        Category::SmallStraight | Category::LargeStraight => {
            let mut choice = tied_masks[0];
            let mut choice_key = TieKey::of(choice, dice);
            for &m in &tied_masks[1..] {
                let key = TieKey::of(m, dice);
                if m.kept_count() < choice.kept_count()
                    || (m.kept_count() == choice.kept_count() && key > choice_key)
                {
                    choice = m;
                    choice_key = key;
                }
            }
            best = choice;
        }
        _ => {}
    }

    let mut tie_keeps = tied_masks;
    tie_keeps.sort_by(|a, b| TieKey::of(*b, dice).cmp(&TieKey::of(*a, dice)));

    Some(HandStrategy {
        category,
        probability: probs[best.bits() as usize],
        keep_mask: best,
        conditional_value: conditional_value(ctx, dice, best, category),
        tie_keeps,
        source: StrategySource::Scan,
    })
}

/// Best strategy for one hand category, or `None` if it cannot be completed.
pub fn solve_hand_category(
    ctx: &YachtContext,
    dice: &[i32; 5],
    category: Category,
    rolls_left: u32,
) -> Option<HandStrategy> {
    debug_assert!(category.is_hand(), "{:?} is not a hand category", category);
    if category == Category::FourOfAKind && rolls_left > 0 {
        if let Some(strategy) = four_kind_shortcut(dice) {
            return Some(strategy);
        }
    }
    scan_category(ctx, dice, category, rolls_left)
}

/// Strategies for every open hand category that can still be completed,
/// in [`Category::HANDS`] order.
pub fn solve_hand_categories(
    ctx: &YachtContext,
    dice: &[i32; 5],
    open: CategorySet,
    rolls_left: u32,
) -> Vec<HandStrategy> {
    Category::HANDS
        .iter()
        .filter(|&&c| open.contains(c))
        .filter_map(|&c| solve_hand_category(ctx, dice, c, rolls_left))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> YachtContext {
        YachtContext::build()
    }

    #[test]
    fn test_success_probability_no_reroll() {
        let ctx = ctx();
        let dice = [2, 2, 3, 3, 3];
        assert_eq!(
            success_probability(&ctx, &dice, KeepMask::ALL, Category::FullHouse),
            1.0
        );
        assert_eq!(
            success_probability(&ctx, &dice, KeepMask::ALL, Category::Yacht),
            0.0
        );
    }

    #[test]
    fn test_success_probability_reroll_all_yacht() {
        let ctx = ctx();
        let p = success_probability(&ctx, &[1, 2, 3, 4, 5], KeepMask::NONE, Category::Yacht);
        assert!((p - 6.0 / 7776.0).abs() < 1e-15);
    }

    #[test]
    fn test_four_kind_shortcut_four_run() {
        let ctx = ctx();
        let s = solve_hand_category(&ctx, &[6, 6, 6, 6, 1], Category::FourOfAKind, 1).unwrap();
        assert_eq!(s.keep_mask, KeepMask::from_indices(&[0, 1, 2, 3]));
        assert_eq!(s.probability, 1.0);
        assert_eq!(s.conditional_value, Some(25.0));
        assert_eq!(s.source, StrategySource::KindRun { face: 6, run: 4 });
        assert!(s.tie_keeps.is_empty());
    }

    #[test]
    fn test_four_kind_shortcut_five_run_keeps_four() {
        let ctx = ctx();
        let s = solve_hand_category(&ctx, &[2, 2, 2, 2, 2], Category::FourOfAKind, 2).unwrap();
        assert_eq!(s.keep_mask, KeepMask::from_indices(&[0, 1, 2, 3]));
        assert_eq!(s.conditional_value, Some(10.0));
    }

    #[test]
    fn test_four_kind_shortcut_three_run_uses_heuristic() {
        let ctx = ctx();
        let s = solve_hand_category(&ctx, &[1, 5, 3, 5, 5], Category::FourOfAKind, 1).unwrap();
        assert_eq!(s.keep_mask, KeepMask::from_indices(&[1, 3, 4]));
        assert_eq!(s.probability, 0.33);
        assert_eq!(s.conditional_value, Some(23.5));
        assert_eq!(s.source, StrategySource::KindRun { face: 5, run: 3 });
    }

    #[test]
    fn test_four_kind_scan_prefers_larger_face() {
        let ctx = ctx();
        // Reroll-all and every single keep tie at 26/1296; the kept 6 wins.
        let s = solve_hand_category(&ctx, &[1, 2, 3, 4, 6], Category::FourOfAKind, 1).unwrap();
        assert_eq!(s.source, StrategySource::Scan);
        assert_eq!(s.keep_mask, KeepMask::from_indices(&[4]));
        assert!((s.probability - 26.0 / 1296.0).abs() < 1e-12);
        assert_eq!(s.tie_keeps.len(), 6);
        assert_eq!(s.tie_keeps[0], KeepMask::from_indices(&[4]));
        assert_eq!(s.tie_keeps[5], KeepMask::NONE);
    }

    #[test]
    fn test_full_house_prefers_reroll_everything() {
        let ctx = ctx();
        let s = solve_hand_category(&ctx, &[1, 2, 3, 4, 6], Category::FullHouse, 1).unwrap();
        assert_eq!(s.keep_mask, KeepMask::NONE);
        assert!((s.probability - 306.0 / 7776.0).abs() < 1e-12);
        assert!(s.tie_keeps.contains(&KeepMask::NONE));
        assert!(s.tie_keeps.len() > 1);
    }

    #[test]
    fn test_small_straight_prefers_fewest_kept() {
        let ctx = ctx();
        let s = solve_hand_category(&ctx, &[1, 2, 3, 4, 6], Category::SmallStraight, 1).unwrap();
        assert!((s.probability - 1.0).abs() < 1e-12);
        assert_eq!(s.keep_mask, KeepMask::from_indices(&[0, 1, 2, 3]));
        assert!((s.conditional_value.unwrap() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_large_straight_prefers_larger_faces_at_equal_size() {
        let ctx = ctx();
        let s = solve_hand_category(&ctx, &[1, 2, 3, 4, 6], Category::LargeStraight, 1).unwrap();
        assert_eq!(s.keep_mask, KeepMask::from_indices(&[1, 2, 3, 4]));
        assert!((s.probability - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_rolls_left() {
        let ctx = ctx();
        let dice = [6, 6, 6, 6, 6];
        let yacht = solve_hand_category(&ctx, &dice, Category::Yacht, 0).unwrap();
        assert_eq!(yacht.keep_mask, KeepMask::ALL);
        assert_eq!(yacht.probability, 1.0);
        assert_eq!(yacht.conditional_value, Some(50.0));
        assert!(solve_hand_category(&ctx, &dice, Category::SmallStraight, 0).is_none());

        // The three-run heuristic needs a reroll.
        let s = solve_hand_category(&ctx, &[5, 5, 5, 1, 2], Category::FourOfAKind, 0);
        assert!(s.is_none());
    }

    #[test]
    fn test_solve_hand_categories_filters_closed() {
        let ctx = ctx();
        let open: CategorySet = [Category::Yacht, Category::Choice, Category::FullHouse]
            .into_iter()
            .collect();
        let all = solve_hand_categories(&ctx, &[3, 3, 2, 5, 6], open, 2);
        let cats: Vec<_> = all.iter().map(|s| s.category).collect();
        assert_eq!(cats, vec![Category::Yacht, Category::FullHouse]);
    }

    #[test]
    fn test_conditional_value_full_house() {
        let ctx = ctx();
        // Keep [2,2,3,3]: success on a 2 (sum 12) or a 3 (sum 13).
        let v = conditional_value(
            &ctx,
            &[2, 2, 3, 3, 6],
            KeepMask::from_indices(&[0, 1, 2, 3]),
            Category::FullHouse,
        )
        .unwrap();
        assert!((v - 12.5).abs() < 1e-12);
    }
}
