//! # Yacht: keep/reroll advisor for five-dice Yacht
//!
//! Given the five current dice, the rerolls remaining and the set of open
//! categories, recommends which dice to keep so that the expected score is
//! maximized, and explains the recommendation per hand category.
//!
//! ## Pipeline
//!
//! | Step | Rust module | Description |
//! |------|-------------|-------------|
//! | 0 | [`phase0_tables`] | Build static tables once: 252 sorted dice sets, Score Table (252 × 12), outcome distributions for rerolling 0..=5 dice |
//! | 1 | [`ev_solver`] | Baseline: over all 32 keep masks, maximize E[best open score] after one reroll |
//! | 2 | [`pattern_solver`] | Per hand category: keep mask maximizing P(nonzero score), with category-specific tie-breaks |
//! | 3 | [`api_computations`] | Fuse baseline and best hand strategy into a [`api_computations::Recommendation`] |
//!
//! The tables live in [`types::YachtContext`], built once by
//! [`types::YachtContext::build`] and then shared read-only (`&YachtContext` or
//! `Arc<YachtContext>`) by any number of concurrent callers.
//!
//! ## Keep masks
//!
//! A keep mask is a 5-bit set over die *positions*: bit j set means die j is
//! kept. Masks are always enumerated in ascending order 0..=31, and every
//! "first best wins" tie rule refers to that order.
//!
//! ```no_run
//! use yacht::api_computations::solve_best_move;
//! use yacht::types::YachtContext;
//!
//! let ctx = YachtContext::build();
//! let rec = solve_best_move(&ctx, &[6, 6, 6, 6, 1], 1, &[7, 11]).unwrap();
//! assert_eq!(rec.keep_indices, vec![0, 1, 2, 3]);
//! ```

#![allow(clippy::needless_range_loop)]

pub mod api_computations;
pub mod breakdown;
pub mod constants;
pub mod dice_mechanics;
pub mod env_config;
pub mod error;
pub mod ev_solver;
pub mod game_mechanics;
pub mod pattern_solver;
pub mod phase0_tables;
pub mod scorecard;
pub mod types;
