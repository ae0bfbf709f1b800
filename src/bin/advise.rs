//! Keep/reroll advice for one Yacht roll, printed as JSON.
//!
//! Open categories come either from `--open` (ids 0..=11) or from a
//! `--scorecard` of 12 comma-separated slots where `-` marks an unscored
//! category.

use std::time::Instant;

use yacht::api_computations::solve_best_move;
use yacht::env_config::{init_rayon_threads_lenient, init_tracing};
use yacht::scorecard::Scorecard;
use yacht::types::YachtContext;

struct Args {
    dice: Vec<i32>,
    rolls_left: i32,
    open: Vec<i32>,
}

fn parse_list<T: std::str::FromStr>(flag: &str, raw: &str) -> Vec<T> {
    raw.split(',')
        .map(|s| {
            s.trim().parse().unwrap_or_else(|_| {
                eprintln!("Invalid {} value: {}", flag, raw);
                std::process::exit(1);
            })
        })
        .collect()
}

fn parse_scorecard(raw: &str) -> Scorecard {
    let slots: Vec<Option<u32>> = raw
        .split(',')
        .map(|s| match s.trim() {
            "-" | "" => None,
            v => Some(v.parse().unwrap_or_else(|_| {
                eprintln!("Invalid --scorecard value: {}", raw);
                std::process::exit(1);
            })),
        })
        .collect();
    Scorecard::from_slots(&slots)
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut dice: Option<Vec<i32>> = None;
    let mut rolls_left = 2i32;
    let mut open: Option<Vec<i32>> = None;
    let mut scorecard: Option<Scorecard> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dice" => {
                i += 1;
                if i < args.len() {
                    dice = Some(parse_list("--dice", &args[i]));
                }
            }
            "--rolls" => {
                i += 1;
                if i < args.len() {
                    rolls_left = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --rolls value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--open" => {
                i += 1;
                if i < args.len() {
                    open = Some(parse_list("--open", &args[i]));
                }
            }
            "--scorecard" => {
                i += 1;
                if i < args.len() {
                    scorecard = Some(parse_scorecard(&args[i]));
                }
            }
            "--help" | "-h" => {
                println!("Usage: yacht-advise --dice D1,D2,D3,D4,D5 [--rolls N] (--open IDS | --scorecard SLOTS)");
                println!();
                println!("Recommend which dice to keep for the current roll.");
                println!("  --dice LIST       Five dice values in 1..6, in position order");
                println!("  --rolls N         Rerolls remaining this turn (default: 2)");
                println!("  --open IDS        Open category ids 0..11, comma-separated");
                println!("  --scorecard SLOTS 12 comma-separated scores, '-' for unscored");
                println!();
                println!("Logging is controlled by YACHT_LOG (default: info).");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(dice) = dice else {
        eprintln!("Missing --dice (see --help)");
        std::process::exit(1);
    };
    let open = match (open, scorecard) {
        (Some(ids), _) => ids,
        (None, Some(card)) => card
            .open_categories()
            .iter()
            .map(|c| c.index() as i32)
            .collect(),
        (None, None) => (0..12).collect(),
    };

    Args {
        dice,
        rolls_left,
        open,
    }
}

fn main() {
    init_tracing();
    let args = parse_args();
    init_rayon_threads_lenient();

    let t0 = Instant::now();
    let ctx = YachtContext::build();
    tracing::debug!("context ready in {:.3} ms", t0.elapsed().as_secs_f64() * 1000.0);

    match solve_best_move(&ctx, &args.dice, args.rolls_left, &args.open) {
        Ok(rec) => match serde_json::to_string_pretty(&rec) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize recommendation: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    }
}
