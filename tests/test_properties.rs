//! Property-based tests for scoring, distributions and recommendations.

use std::sync::OnceLock;

use proptest::prelude::*;

use yacht::api_computations::solve_best_move;
use yacht::constants::*;
use yacht::dice_mechanics::{find_dice_set_index, sort_dice_set};
use yacht::game_mechanics::calculate_category_score;
use yacht::types::{Category, YachtContext};

static CTX: OnceLock<YachtContext> = OnceLock::new();

fn ctx() -> &'static YachtContext {
    CTX.get_or_init(YachtContext::build)
}

/// Strategy: generate a valid dice array (each die 1-6).
fn dice_strategy() -> impl Strategy<Value = [i32; 5]> {
    prop::array::uniform5(1..=6i32)
}

/// Strategy: generate a valid category index (0-11).
fn category_strategy() -> impl Strategy<Value = usize> {
    0..CATEGORY_COUNT
}

/// Strategy: a non-empty open-category id list.
fn open_strategy() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(0..CATEGORY_COUNT as i32, 1..=CATEGORY_COUNT)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // 1. Scores are always non-negative
    #[test]
    fn score_non_negative(dice in dice_strategy(), cat in category_strategy()) {
        let score = calculate_category_score(&dice, Category::ALL[cat]);
        prop_assert!(score >= 0, "score={score} for dice={dice:?} cat={cat}");
    }

    // 2. Scoring is order-independent
    #[test]
    fn score_order_independent(dice in dice_strategy(), cat in category_strategy()) {
        let c = Category::ALL[cat];
        let mut sorted = dice;
        sort_dice_set(&mut sorted);
        let mut reversed = dice;
        reversed.reverse();
        prop_assert_eq!(calculate_category_score(&dice, c), calculate_category_score(&sorted, c));
        prop_assert_eq!(calculate_category_score(&dice, c), calculate_category_score(&reversed, c));
    }

    // 3. Score Table agrees with the direct rules
    #[test]
    fn table_matches_rules(dice in dice_strategy(), cat in category_strategy()) {
        let c = Category::ALL[cat];
        prop_assert_eq!(ctx().score(&dice, c), calculate_category_score(&dice, c));
    }

    // 4. Every sorted hand maps back to itself through the index
    #[test]
    fn index_lookup_round_trip(dice in dice_strategy()) {
        let mut sorted = dice;
        sort_dice_set(&mut sorted);
        let idx = find_dice_set_index(ctx(), &sorted);
        prop_assert!(idx < NUM_DICE_SETS);
        prop_assert_eq!(ctx().all_dice_sets[idx], sorted);
    }

    // 5. Recommendations are idempotent and well-formed
    #[test]
    fn recommendation_idempotent(
        dice in dice_strategy(),
        rolls in 0..3i32,
        open in open_strategy(),
    ) {
        let a = solve_best_move(ctx(), &dice, rolls, &open).unwrap();
        let b = solve_best_move(ctx(), &dice, rolls, &open).unwrap();
        prop_assert_eq!(&a, &b);

        prop_assert!(a.keep_indices.iter().all(|&i| i < NUM_DICE));
        prop_assert!(a.keep_indices.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(a.dice_recommendations.len(), NUM_DICE);
        prop_assert!(a.expected_value >= 0.0);
        if rolls == 0 {
            prop_assert_eq!(a.keep_indices.len(), NUM_DICE);
        }
        for entry in &a.breakdown {
            prop_assert!((0.0..=1.0 + 1e-9).contains(&entry.probability));
        }
    }
}

#[test]
fn distributions_sum_to_one() {
    for k in 0..=NUM_DICE {
        let sum = ctx().distribution(k).total_probability();
        assert!((sum - 1.0).abs() < 1e-9, "k={} sum={}", k, sum);
    }
}
