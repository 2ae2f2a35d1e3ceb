//! Round adjudication under cyclic dominance

use serde::{Deserialize, Serialize};

use crate::element::Element;

/// Outcome of a single round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    FirstWins,
    SecondWins,
    Tie,
}

impl Verdict {
    /// Same round seen from the other player
    pub fn flipped(self) -> Self {
        match self {
            Verdict::FirstWins => Verdict::SecondWins,
            Verdict::SecondWins => Verdict::FirstWins,
            Verdict::Tie => Verdict::Tie,
        }
    }
}

const F: Verdict = Verdict::FirstWins;
const S: Verdict = Verdict::SecondWins;
const T: Verdict = Verdict::Tie;

/// Dominance table indexed by `[first][second]` in absolute order W, V, A, L, D
const DOMINANCE: [[Verdict; 5]; 5] = [
    [T, F, T, S, T], // W
    [S, T, F, T, T], // V
    [T, S, T, F, T], // A
    [F, T, S, T, T], // L
    [T, T, T, T, T], // D
];

/// Resolve one round
pub fn resolve(first: Element, second: Element) -> Verdict {
    DOMINANCE[first.index()][second.index()]
}

/// Resolve one round from raw symbols. Unknown symbols count as a tie.
pub fn resolve_symbols(first: char, second: char) -> Verdict {
    match (Element::from_symbol(first), Element::from_symbol(second)) {
        (Some(a), Some(b)) => resolve(a, b),
        _ => {
            tracing::warn!(
                first = %first,
                second = %second,
                "unknown move symbol, scoring round as a tie"
            );
            Verdict::Tie
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{CYCLE_LEN, ELEMENTS};

    #[test]
    fn test_each_element_beats_next() {
        assert_eq!(resolve(Element::Water, Element::Fire), Verdict::FirstWins);
        assert_eq!(resolve(Element::Fire, Element::Earth), Verdict::FirstWins);
        assert_eq!(resolve(Element::Earth, Element::Air), Verdict::FirstWins);
        assert_eq!(resolve(Element::Air, Element::Water), Verdict::FirstWins);
    }

    #[test]
    fn test_opposite_elements_tie() {
        assert_eq!(resolve(Element::Water, Element::Earth), Verdict::Tie);
        assert_eq!(resolve(Element::Fire, Element::Air), Verdict::Tie);
    }

    #[test]
    fn test_antisymmetric() {
        for a in ELEMENTS {
            for b in ELEMENTS {
                assert_eq!(resolve(a, b), resolve(b, a).flipped(), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_self_tie() {
        for element in &ELEMENTS[..CYCLE_LEN] {
            assert_eq!(resolve(*element, *element), Verdict::Tie);
        }
    }

    #[test]
    fn test_wild_always_ties() {
        for element in ELEMENTS {
            assert_eq!(resolve(Element::Wild, element), Verdict::Tie);
            assert_eq!(resolve(element, Element::Wild), Verdict::Tie);
        }
    }

    #[test]
    fn test_rotation_step_beats_previous() {
        // One rotation step picks the element that beats the previous move
        for element in &ELEMENTS[..CYCLE_LEN] {
            assert_eq!(resolve(element.counter(), *element), Verdict::FirstWins);
        }
    }

    #[test]
    fn test_resolve_symbols() {
        assert_eq!(resolve_symbols('L', 'W'), Verdict::FirstWins);
        assert_eq!(resolve_symbols('W', 'L'), Verdict::SecondWins);
        assert_eq!(resolve_symbols('D', 'V'), Verdict::Tie);
    }

    #[test]
    fn test_unknown_symbol_is_tie() {
        assert_eq!(resolve_symbols('X', 'W'), Verdict::Tie);
        assert_eq!(resolve_symbols('W', '?'), Verdict::Tie);
    }
}
