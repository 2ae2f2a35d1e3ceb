//! ELEMWAR Core - Game rules and match simulation
//!
//! This crate provides the core game logic for ELEMWAR:
//! - Elements, depth values and the rotation rule
//! - Inventory-constrained move resolution
//! - Engine codes (adaptive and fixed encodings)
//! - 13-round match simulation
//! - Round adjudication under cyclic dominance

pub mod element;
pub mod resolver;
pub mod engine;
pub mod adjudicator;
pub mod simulator;

// Re-exports for convenient access
pub use element::{
    element_at, rotate, to_symbols, Depth, DepthOutOfRange, Element, CYCLE_LEN, ELEMENTS,
};
pub use resolver::{choose_available, choose_forced, Inventory, INITIAL_STOCK, MOVES_PER_MATCH};
pub use engine::{Engine, EngineError, Strategy, ADAPTIVE_LEN, FIXED_LEN};
pub use adjudicator::{resolve, resolve_symbols, Verdict};
pub use simulator::{
    derive_moves, simulate_codes, simulate_game, Match, MatchError, ScorePair, ROUNDS,
};
