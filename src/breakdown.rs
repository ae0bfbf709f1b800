//! Display rows for the recommendation breakdown (fixed English locale).
//!
//! One row per open hand category in [`Category::HAND_DISPLAY_ORDER`]; when no
//! hand can still be made and a reroll remains, rows for the open upper
//! categories follow.

use serde::Serialize;

use crate::constants::NUM_DICE;
use crate::dice_mechanics::positions_of_face;
use crate::pattern_solver::{HandStrategy, StrategySource};
use crate::types::{Category, CategorySet, KeepMask};

/// At most this many tied keep alternatives are listed in one row.
const MAX_LISTED_CANDIDATES: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Hand,
    Upper,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BreakdownEntry {
    pub category: Category,
    pub name: &'static str,
    pub probability: f64,
    /// Probability as a percentage with 2 decimals; empty when impossible.
    pub probability_text: String,
    pub kind: EntryKind,
    pub keep_text: String,
    pub keep_indices: Vec<usize>,
}

/// "[6, 6, 5]"
pub fn format_values(vals: &[i32]) -> String {
    let parts: Vec<String> = vals.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

pub fn probability_text(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

/// Kept values in position order.
fn kept_in_position_order(dice: &[i32; 5], mask: KeepMask) -> Vec<i32> {
    mask.indices().map(|i| dice[i]).collect()
}

fn score_text(strategy: &HandStrategy) -> String {
    match strategy.category {
        Category::Yacht => "50 (fixed)".to_string(),
        Category::LargeStraight => "30 (fixed)".to_string(),
        Category::SmallStraight => "15 (fixed)".to_string(),
        Category::FullHouse => "sum of dice".to_string(),
        _ => match strategy.conditional_value {
            Some(v) => format!("expected {:.1} on completion", v),
            None => "?".to_string(),
        },
    }
}

/// Distinct tied value sets (descending faces), best first.
fn distinct_tie_values(dice: &[i32; 5], strategy: &HandStrategy) -> Vec<Vec<i32>> {
    let mut seen: Vec<Vec<i32>> = Vec::new();
    for mask in &strategy.tie_keeps {
        let vals = mask.kept_values_desc(dice);
        if !seen.contains(&vals) {
            seen.push(vals);
        }
    }
    seen
}

fn keep_text(dice: &[i32; 5], strategy: &HandStrategy) -> String {
    if let StrategySource::KindRun { face, run } = strategy.source {
        return format!(
            "{} keep → {}",
            format_values(&vec![face; run]),
            score_text(strategy)
        );
    }

    let listable = matches!(
        strategy.category,
        Category::FullHouse | Category::FourOfAKind
    );
    let reroll_all_tied = strategy.tie_keeps.contains(&KeepMask::NONE);
    if listable && !(strategy.category == Category::FullHouse && reroll_all_tied) {
        let candidates = distinct_tie_values(dice, strategy);
        if candidates.len() > 1 {
            let listed: Vec<String> = candidates
                .iter()
                .take(MAX_LISTED_CANDIDATES)
                .map(|v| format_values(v))
                .collect();
            return format!("keep candidates: {}", listed.join(", "));
        }
    }

    if strategy.keep_mask == KeepMask::NONE {
        format!("reroll everything → {}", score_text(strategy))
    } else {
        format!(
            "{} keep → {}",
            format_values(&kept_in_position_order(dice, strategy.keep_mask)),
            score_text(strategy)
        )
    }
}

/// Row for one open hand category; `None` means it cannot be completed.
pub fn hand_entry(
    dice: &[i32; 5],
    category: Category,
    strategy: Option<&HandStrategy>,
) -> BreakdownEntry {
    match strategy.filter(|s| s.probability > 0.0) {
        Some(s) => BreakdownEntry {
            category,
            name: category.name(),
            probability: s.probability,
            probability_text: probability_text(s.probability),
            kind: EntryKind::Hand,
            keep_text: keep_text(dice, s),
            keep_indices: s.keep_mask.indices().collect(),
        },
        None => BreakdownEntry {
            category,
            name: category.name(),
            probability: 0.0,
            probability_text: String::new(),
            kind: EntryKind::Hand,
            keep_text: "impossible".to_string(),
            keep_indices: Vec::new(),
        },
    }
}

/// P(at least one more `face` when every non-matching die is rerolled once).
pub fn upper_gain_probability(dice: &[i32; 5], face: i32) -> f64 {
    let matching = dice.iter().filter(|&&d| d == face).count();
    let rerolled = NUM_DICE - matching;
    if rerolled == 0 {
        1.0
    } else {
        1.0 - (5.0f64 / 6.0).powi(rerolled as i32)
    }
}

/// Fallback rows for open Ones..Sixes.
pub fn upper_entries(dice: &[i32; 5], open: CategorySet) -> Vec<BreakdownEntry> {
    Category::UPPER
        .iter()
        .filter(|&&c| open.contains(c))
        .filter_map(|&c| {
            let face = c.upper_face()?;
            let p = upper_gain_probability(dice, face);
            Some(BreakdownEntry {
                category: c,
                name: c.name(),
                probability: p,
                probability_text: probability_text(p),
                kind: EntryKind::Upper,
                keep_text: format!("at least one more {}", face),
                keep_indices: positions_of_face(dice, face),
            })
        })
        .collect()
}

/// Full breakdown: hand rows, then upper rows if no open hand is reachable
/// and a reroll remains.
pub fn build_breakdown(
    dice: &[i32; 5],
    open: CategorySet,
    strategies: &[HandStrategy],
    rolls_left: u32,
) -> Vec<BreakdownEntry> {
    let mut entries: Vec<BreakdownEntry> = Category::HAND_DISPLAY_ORDER
        .iter()
        .filter(|&&c| open.contains(c))
        .map(|&c| hand_entry(dice, c, strategies.iter().find(|s| s.category == c)))
        .collect();

    if rolls_left > 0 && entries.iter().all(|e| e.probability == 0.0) {
        entries.extend(upper_entries(dice, open));
    }
    entries
}

/// Short advice line naming the pursued hand, if any.
pub fn recommendation_message(
    dice: &[i32; 5],
    keep_mask: KeepMask,
    pursued: Option<Category>,
    rolls_left: u32,
) -> String {
    if rolls_left == 0 {
        return match pursued {
            Some(c) => format!("No rerolls left: score {}", c.name()),
            None => "No rerolls left: pick a category".to_string(),
        };
    }

    let action = if keep_mask == KeepMask::NONE {
        "Reroll everything".to_string()
    } else if keep_mask == KeepMask::ALL {
        "Keep all dice".to_string()
    } else {
        format!(
            "Keep {}",
            format_values(&kept_in_position_order(dice, keep_mask))
        )
    };

    match pursued {
        Some(c) => format!("{} (going for {})", action, c.name()),
        None => action,
    }
}
