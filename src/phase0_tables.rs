//! Phase 0: precompute all static lookup tables.
//!
//! The orchestrator [`precompute_lookup_tables`] runs 3 sub-steps in dependency order:
//!
//! 1. **Dice combinations**: enumerate R_{5,6} (252 sorted 5-dice multisets) + reverse lookup
//! 2. **Category scores**: the Score Table, s(r, c) for all 252 × 12 pairs
//! 3. **Outcome distributions**: for k = 0..=5, the 6^k equally likely reroll
//!    sequences grouped by sorted value (7776 raw outcomes collapse to 252 for k = 5)
//!
//! Every step is a pure function of its inputs, so building twice yields
//! bit-identical tables.

use std::time::Instant;

use tracing::{debug, info};

use crate::constants::*;
use crate::game_mechanics::calculate_category_score;
use crate::types::{Category, Outcome, OutcomeDistribution, YachtContext};

/// Enumerate all C(10,5) = 252 sorted 5-dice multisets R_{5,6} and build
/// a 5D reverse lookup table: `index_lookup[d1-1][d2-1][d3-1][d4-1][d5-1] = index`.
pub fn build_all_dice_combinations(ctx: &mut YachtContext) {
    ctx.num_combinations = 0;
    for a in 1..=6i32 {
        for b in a..=6 {
            for c in b..=6 {
                for d in c..=6 {
                    for e in d..=6 {
                        let idx = ctx.num_combinations;
                        ctx.all_dice_sets[idx] = [a, b, c, d, e];
                        ctx.index_lookup[(a - 1) as usize][(b - 1) as usize][(c - 1) as usize]
                            [(d - 1) as usize][(e - 1) as usize] = idx as u8;
                        ctx.num_combinations += 1;
                    }
                }
            }
        }
    }
}

/// Precompute s(r, c) for all r in R_{5,6} and all 12 categories.
pub fn precompute_category_scores(ctx: &mut YachtContext) {
    for i in 0..NUM_DICE_SETS {
        let dice = ctx.all_dice_sets[i];
        for cat in Category::ALL {
            ctx.precomputed_scores[i][cat.index()] = calculate_category_score(&dice, cat);
        }
    }
}

/// Distribution of sorted outcomes when rerolling `k` fair dice.
///
/// Walks the 6^k raw sequences in lexicographic order and groups them by
/// sorted value; groups appear in first-seen order, which is ascending
/// lexicographic order of the sorted outcome. P(group) = count / 6^k.
pub fn build_outcome_distribution(k: usize) -> OutcomeDistribution {
    assert!(k <= NUM_DICE, "cannot reroll {} dice", k);

    let total = 6usize.pow(k as u32);
    // Sorted outcomes keyed in base 7 (faces 1..=6, so no key collisions).
    let mut slot_of_key = vec![usize::MAX; 7usize.pow(k as u32)];
    let mut faces: Vec<[i32; 5]> = Vec::new();
    let mut counts: Vec<u32> = Vec::new();

    for raw in 0..total {
        let mut seq = [0i32; 5];
        let mut r = raw;
        for j in (0..k).rev() {
            seq[j] = (r % 6) as i32 + 1;
            r /= 6;
        }
        seq[..k].sort_unstable();
        let key = seq[..k]
            .iter()
            .fold(0usize, |acc, &f| acc * 7 + f as usize);

        match slot_of_key[key] {
            usize::MAX => {
                slot_of_key[key] = faces.len();
                faces.push(seq);
                counts.push(1);
            }
            slot => counts[slot] += 1,
        }
    }

    let inv_total = 1.0 / total as f64;
    let outcomes = faces
        .into_iter()
        .zip(counts)
        .map(|(faces, count)| Outcome {
            faces,
            probability: count as f64 * inv_total,
        })
        .collect();

    OutcomeDistribution {
        rerolled: k,
        outcomes,
    }
}

/// Fill the Outcome Distribution Cache for k = 0..=5.
pub fn precompute_outcome_distributions(ctx: &mut YachtContext) {
    ctx.distributions = (0..=NUM_DICE).map(build_outcome_distribution).collect();
}

/// Phase 0 orchestrator: build all static lookup tables in dependency order.
pub fn precompute_lookup_tables(ctx: &mut YachtContext) {
    let phase0_start = Instant::now();

    macro_rules! timed {
        ($label:expr, $body:expr) => {{
            let t0 = Instant::now();
            $body;
            let dt = t0.elapsed().as_secs_f64() * 1000.0;
            debug!("  {:<32} {:>8.3} ms", $label, dt);
        }};
    }

    timed!("Dice combinations (252)", build_all_dice_combinations(ctx));
    timed!("Category scores", precompute_category_scores(ctx));
    timed!(
        "Outcome distributions (k=0..5)",
        precompute_outcome_distributions(ctx)
    );

    let total = phase0_start.elapsed().as_secs_f64() * 1000.0;
    info!(
        dice_sets = ctx.num_combinations,
        outcomes_k5 = ctx.distributions[NUM_DICE].len(),
        "lookup tables built in {:.3} ms",
        total
    );
}
