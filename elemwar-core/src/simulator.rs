//! Match simulation - turns two engines into 13 rounds of moves and a score
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: simulate_game, simulate_codes (entry points)
//! - Level 2: play_adaptive, derive_moves, play_fixed (drive modes)
//! - Level 3: PlayerState (per-round move selection)
//! - Level 4: desire (rotation lookup)

use serde::Serialize;

use crate::adjudicator::{resolve, Verdict};
use crate::element::{element_at, rotate, Depth, Element};
use crate::engine::{Engine, EngineError, Strategy, ADAPTIVE_LEN, FIXED_LEN};
use crate::resolver::{choose_available, choose_forced, Inventory, MOVES_PER_MATCH};

/// Rounds in a match
pub const ROUNDS: usize = MOVES_PER_MATCH;

/// Error types for match simulation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("malformed engine: {0}")]
    Malformed(#[from] EngineError),

    #[error("no legal move left in round {round}")]
    Stalled { round: usize },
}

/// Rounds won by each player
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ScorePair {
    pub first: u8,
    pub second: u8,
}

impl ScorePair {
    pub fn new(first: u8, second: u8) -> Self {
        Self { first, second }
    }

    /// Same result seen from the other player
    pub fn swapped(self) -> Self {
        Self::new(self.second, self.first)
    }

    /// First player's margin
    pub fn differential(self) -> i32 {
        self.first as i32 - self.second as i32
    }

    /// Match outcome from the first player's side
    pub fn verdict(self) -> Verdict {
        match self.first.cmp(&self.second) {
            std::cmp::Ordering::Greater => Verdict::FirstWins,
            std::cmp::Ordering::Less => Verdict::SecondWins,
            std::cmp::Ordering::Equal => Verdict::Tie,
        }
    }

    fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::FirstWins => self.first += 1,
            Verdict::SecondWins => self.second += 1,
            Verdict::Tie => {}
        }
    }
}

/// Full record of a simulated match
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Match {
    pub moves_first: [Element; ROUNDS],
    pub moves_second: [Element; ROUNDS],
    pub verdicts: [Verdict; ROUNDS],
    pub score: ScorePair,
}

impl Match {
    /// Same match with the players exchanged
    pub fn swapped(&self) -> Self {
        Self {
            moves_first: self.moves_second,
            moves_second: self.moves_first,
            verdicts: self.verdicts.map(Verdict::flipped),
            score: self.score.swapped(),
        }
    }
}

// ============================================================================
// Level 1 - Entry points
// ============================================================================

/// Simulate a match between two validated engines
pub fn simulate_game(first: &Engine, second: &Engine) -> Result<Match, MatchError> {
    match (first.strategy(), second.strategy()) {
        (Strategy::Adaptive(a), Strategy::Adaptive(b)) => play_adaptive(a, b),
        (Strategy::Fixed(a), Strategy::Fixed(b)) => Ok(play_fixed(a, b)),
        (Strategy::Adaptive(depths), Strategy::Fixed(literal)) => {
            let derived = derive_moves(depths, literal)?;
            Ok(play_fixed(&derived, literal))
        }
        (Strategy::Fixed(literal), Strategy::Adaptive(depths)) => {
            let derived = derive_moves(depths, literal)?;
            Ok(play_fixed(literal, &derived))
        }
    }
}

/// Simulate a match from raw codes; malformed codes invalidate the match
pub fn simulate_codes(first: &str, second: &str) -> Result<ScorePair, MatchError> {
    let first = Engine::parse(first)?;
    let second = Engine::parse(second)?;
    simulate_game(&first, &second).map(|m| m.score)
}

// ============================================================================
// Level 2 - Drive modes
// ============================================================================

/// Both sides adaptive: each reacts to the other's previous move
fn play_adaptive(
    first: &[Depth; ADAPTIVE_LEN],
    second: &[Depth; ADAPTIVE_LEN],
) -> Result<Match, MatchError> {
    let mut p1 = PlayerState::new();
    let mut p2 = PlayerState::new();

    for round in 0..ADAPTIVE_LEN {
        let want1 = desire(first[round], p2.last_move());
        let want2 = desire(second[round], p1.last_move());
        p1.play(want1, round)?;
        p2.play(want2, round)?;
    }

    p1.play_forced()?;
    p2.play_forced()?;

    Ok(play_fixed(&p1.moves, &p2.moves))
}

/// Concrete moves of an adaptive engine facing a literal opponent
pub fn derive_moves(
    depths: &[Depth; ADAPTIVE_LEN],
    opponent: &[Element; FIXED_LEN],
) -> Result<[Element; ROUNDS], MatchError> {
    let mut player = PlayerState::new();

    for (round, &depth) in depths.iter().enumerate() {
        let previous = round.checked_sub(1).map(|r| opponent[r]);
        player.play(desire(depth, previous), round)?;
    }
    player.play_forced()?;

    Ok(player.moves)
}

/// Adjudicate two literal sequences round by round
fn play_fixed(first: &[Element; ROUNDS], second: &[Element; ROUNDS]) -> Match {
    let mut verdicts = [Verdict::Tie; ROUNDS];
    let mut score = ScorePair::default();

    for (round, verdict) in verdicts.iter_mut().enumerate() {
        *verdict = resolve(first[round], second[round]);
        score.record(*verdict);
    }

    Match {
        moves_first: *first,
        moves_second: *second,
        verdicts,
        score,
    }
}

// ============================================================================
// Level 3 - Player state
// ============================================================================

/// Per-match state of one adaptive player
struct PlayerState {
    inventory: Inventory,
    moves: [Element; ROUNDS],
    move_count: usize,
}

impl PlayerState {
    fn new() -> Self {
        Self {
            inventory: Inventory::new(),
            moves: [Element::Wild; ROUNDS],
            move_count: 0,
        }
    }

    fn last_move(&self) -> Option<Element> {
        self.move_count.checked_sub(1).map(|i| self.moves[i])
    }

    /// Play `desired` or its nearest available substitute
    fn play(&mut self, desired: Element, round: usize) -> Result<Element, MatchError> {
        let mv = choose_available(desired, &self.inventory).ok_or(MatchError::Stalled { round })?;
        self.commit(mv);
        Ok(mv)
    }

    /// Play the single element left for the final round
    fn play_forced(&mut self) -> Result<Element, MatchError> {
        let round = self.move_count;
        let mv = choose_forced(&self.inventory).ok_or(MatchError::Stalled { round })?;
        self.commit(mv);
        Ok(mv)
    }

    fn commit(&mut self, mv: Element) {
        let taken = self.inventory.take(mv);
        debug_assert!(taken, "resolver picked {mv} without stock");
        self.moves[self.move_count] = mv;
        self.move_count += 1;
    }
}

// ============================================================================
// Level 4 - Utilities
// ============================================================================

/// Desired element: absolute on the opening round, else relative to the opponent
fn desire(depth: Depth, opponent_previous: Option<Element>) -> Element {
    match opponent_previous {
        None => element_at(depth),
        Some(previous) => rotate(previous, depth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::to_symbols;
    use crate::resolver::INITIAL_STOCK;

    fn engine(code: &str) -> Engine {
        Engine::parse(code).unwrap()
    }

    fn depths(code: &str) -> [Depth; ADAPTIVE_LEN] {
        match engine(code).strategy() {
            Strategy::Adaptive(d) => *d,
            Strategy::Fixed(_) => panic!("{code} is not adaptive"),
        }
    }

    fn literal(code: &str) -> [Element; FIXED_LEN] {
        match engine(code).strategy() {
            Strategy::Fixed(m) => *m,
            Strategy::Adaptive(_) => panic!("{code} is not fixed"),
        }
    }

    fn element_counts(moves: &[Element]) -> [u8; 5] {
        let mut counts = [0u8; 5];
        for m in moves {
            counts[m.index()] += 1;
        }
        counts
    }

    #[test]
    fn test_score_pair_helpers() {
        let s = ScorePair::new(5, 3);
        assert_eq!(s.swapped(), ScorePair::new(3, 5));
        assert_eq!(s.differential(), 2);
        assert_eq!(s.verdict(), Verdict::FirstWins);
        assert_eq!(s.swapped().verdict(), Verdict::SecondWins);
        assert_eq!(ScorePair::new(4, 4).verdict(), Verdict::Tie);
    }

    #[test]
    fn test_identical_fixed_engines_all_tie() {
        let code = "WVALWVALWVALW";
        let m = simulate_game(&engine(code), &engine(code)).unwrap();
        assert_eq!(m.score, ScorePair::new(0, 0));
        assert!(m.verdicts.iter().all(|&v| v == Verdict::Tie));
    }

    #[test]
    fn test_fixed_scores_follow_dominance() {
        // W beats V every round except the last, where D ties
        let m = simulate_game(&engine("WWWWWWWWWWWWD"), &engine("VVVVVVVVVVVVV")).unwrap();
        assert_eq!(m.score, ScorePair::new(12, 0));
        assert_eq!(m.verdicts[12], Verdict::Tie);
    }

    #[test]
    fn test_all_ones_mirror_match() {
        let code = "111111111111";
        let m = simulate_game(&engine(code), &engine(code)).unwrap();
        assert_eq!(m.moves_first, m.moves_second);
        assert!(m.verdicts.iter().all(|&v| v == Verdict::Tie));
        assert_eq!(m.score, ScorePair::new(0, 0));
        // Opening is W, then one step along the cycle each round
        assert_eq!(&to_symbols(&m.moves_first)[..4], "WLAV");
    }

    #[test]
    fn test_adaptive_moves_use_full_inventory() {
        let m = simulate_game(&engine("123451234512"), &engine("555555555555")).unwrap();
        assert_eq!(element_counts(&m.moves_first), INITIAL_STOCK);
        assert_eq!(element_counts(&m.moves_second), INITIAL_STOCK);
    }

    #[test]
    fn test_repeated_wild_requests_never_stall() {
        let moves = derive_moves(&depths("555555555555"), &literal("DDDDDDDDDDDDD")).unwrap();
        assert_eq!(moves[0], Element::Wild);
        assert_eq!(element_counts(&moves), INITIAL_STOCK);
    }

    #[test]
    fn test_wild_previous_is_treated_as_air() {
        // Opponent opens with D; depth 1 then answers as if it were L (-> A)
        let moves = derive_moves(&depths("111111111111"), &literal("DWWWWWWWWWWWW")).unwrap();
        assert_eq!(moves[0], Element::Water);
        assert_eq!(moves[1], Element::Earth);
        assert_eq!(moves[2], Element::Air);
    }

    #[test]
    fn test_mixed_matches_derived_fixed_game() {
        let adaptive = engine("314253142531");
        let fixed = engine("LAVWDLAVWLAVW");
        let derived = derive_moves(&depths(adaptive.code()), &literal(fixed.code())).unwrap();

        let mixed = simulate_game(&adaptive, &fixed).unwrap();
        let direct = simulate_game(&Engine::fixed(derived), &fixed).unwrap();
        assert_eq!(mixed.score, direct.score);
        assert_eq!(mixed.moves_first, derived);
    }

    #[test]
    fn test_mixed_order_is_symmetric() {
        let adaptive = engine("432143214321");
        let fixed = engine("VVVAAALLLWWWD");
        let forward = simulate_game(&adaptive, &fixed).unwrap();
        let backward = simulate_game(&fixed, &adaptive).unwrap();
        assert_eq!(forward, backward.swapped());
    }

    #[test]
    fn test_adaptive_symmetry() {
        let a = engine("123412341234");
        let b = engine("441133225511");
        let ab = simulate_game(&a, &b).unwrap();
        let ba = simulate_game(&b, &a).unwrap();
        assert_eq!(ab.score, ba.score.swapped());
        assert_eq!(ab, ba.swapped());
    }

    #[test]
    fn test_simulate_codes_rejects_malformed() {
        assert!(matches!(
            simulate_codes("1234512345", "111111111111"),
            Err(MatchError::Malformed(EngineError::BadLength { len: 10, .. }))
        ));
        assert!(matches!(
            simulate_codes("WVALWVALWVALW", "WVALWVALWVALX"),
            Err(MatchError::Malformed(EngineError::BadSymbol { .. }))
        ));
        assert!(matches!(
            simulate_codes("111111111110", "WVALWVALWVALW"),
            Err(MatchError::Malformed(EngineError::BadDepth { .. }))
        ));
    }

    #[test]
    fn test_simulate_codes_valid() {
        let score = simulate_codes("WWWWWWWWWWWWD", "VVVVVVVVVVVVV").unwrap();
        assert_eq!(score, ScorePair::new(12, 0));
    }

    #[test]
    fn test_player_state_stalls_on_empty_inventory() {
        let mut player = PlayerState::new();
        player.inventory = Inventory::from_counts([0; 5]);
        assert_eq!(player.play(Element::Water, 3), Err(MatchError::Stalled { round: 3 }));
        assert_eq!(player.play_forced(), Err(MatchError::Stalled { round: 0 }));
    }

    #[test]
    fn test_forced_move_is_the_last_stock() {
        let mut player = PlayerState::new();
        let spent = [
            (Element::Water, 3),
            (Element::Fire, 3),
            (Element::Air, 3),
            (Element::Wild, 1),
            (Element::Earth, 2),
        ];
        for (element, times) in spent {
            for _ in 0..times {
                player.commit(element);
            }
        }
        assert_eq!(player.move_count, ROUNDS - 1);
        assert_eq!(player.inventory.total(), 1);
        assert_eq!(player.play_forced(), Ok(Element::Earth));
        assert_eq!(player.inventory.total(), 0);
    }
}
