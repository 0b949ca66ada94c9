//! Command-line driver for the decimal-memory chess engine.
//!
//! Modes, selected by the first argument (mirroring the way the closest
//! sibling chess engine's own cli binary dispatches on `args[1]` rather than
//! reaching for an argument-parsing crate):
//!
//! - (none) or `search` — read a position-record deck from stdin (see
//!   spec.md §6), run one fixed-depth search, print the `YXYX`/`0000` move
//!   token.
//! - `fen <FEN...>` — same search, but the position comes from a FEN string
//!   given on the command line instead of a record deck on stdin.
//! - `perft <depth> <FEN...>` — count pseudo-legal move sequences to
//!   `depth` plies from a FEN position, with no legality filtering. Useful
//!   for regression-testing the move generator's fixed emission order
//!   without running a full search.

use std::env;
use std::io::{self, Read};

use eniac_chess_core::{apply, load_fen, parse_records, unapply, Board, GeneratorCursor};
use eniac_chess_engine::{search as run_fixed_depth_search, EngineSession, MoveToken, SearchConfig, StopHandle};

fn main() {
    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("perft") => run_perft(&args[2..]),
        Some("fen") => run_search_from_fen(&args[2..]),
        Some("search") => run_search_from_stdin(),
        None => run_search_from_stdin(),
        Some(other) => {
            eprintln!("unrecognized mode {other:?}");
            print_usage();
            std::process::exit(2);
        }
    }
}

fn print_usage() {
    eprintln!("modes:");
    eprintln!("  search                    read a position-record deck from stdin, print the move token");
    eprintln!("  fen <FEN...>              search a position given as a FEN string");
    eprintln!("  perft <depth> <FEN...>    count pseudo-legal move sequences to <depth> plies");
}

fn run_search_from_stdin() {
    let mut input = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut input) {
        eprintln!("failed to read position records from stdin: {err}");
        std::process::exit(1);
    }
    let records = match parse_records(&input) {
        Ok(records) => records,
        Err(err) => {
            eprintln!("malformed position record: {err}");
            std::process::exit(1);
        }
    };

    let mut session = EngineSession::new();
    if let Err(err) = session.load_position(records) {
        eprintln!("invalid position: {err}");
        std::process::exit(1);
    }

    match session.search(SearchConfig::default()) {
        Ok(token) => println!("{token}"),
        Err(err) => {
            eprintln!("search failed: {err}");
            std::process::exit(1);
        }
    }
}

fn run_search_from_fen(args: &[String]) {
    if args.is_empty() {
        eprintln!("usage: eniac_chess fen <FEN...>");
        std::process::exit(2);
    }
    let fen = args.join(" ");
    let mut board = match load_fen(&fen) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("bad FEN: {err}");
            std::process::exit(1);
        }
    };

    let stop = StopHandle::new();
    match run_fixed_depth_search(&mut board, SearchConfig::default(), &stop) {
        Ok(result) => println!("{}", MoveToken::from_move(result.best_move)),
        Err(err) => {
            eprintln!("search failed: {err}");
            std::process::exit(1);
        }
    }
}

fn run_perft(args: &[String]) {
    if args.len() < 2 {
        eprintln!("usage: eniac_chess perft <depth> <FEN...>");
        std::process::exit(2);
    }
    let depth: u32 = match args[0].parse() {
        Ok(depth) => depth,
        Err(_) => {
            eprintln!("depth must be a non-negative integer");
            std::process::exit(2);
        }
    };
    let fen = args[1..].join(" ");
    let mut board = match load_fen(&fen) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("bad FEN: {err}");
            std::process::exit(1);
        }
    };

    println!("{}", perft(&mut board, depth));
}

/// Count pseudo-legal move sequences from `board` to `depth` plies, with no
/// check-legality filtering — this engine's generator is pseudo-legal by
/// design (see spec.md §4.2), so this is a node count, not a conventional
/// chess perft.
fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let side = board.side_to_move();
    let mut cursor = GeneratorCursor::new();
    let mut total = 0u64;
    while let Some(mv) = cursor.next(board, side) {
        let undo = apply(board, mv).expect("the move generator only yields moves the applier accepts");
        total += perft(board, depth - 1);
        unapply(board, &undo).expect("unapply is apply's strict inverse");
    }
    total
}
