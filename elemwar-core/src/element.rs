//! Game elements, depth values and the rotation rule
//!
//! Symbols follow the Dutch initials of the four cyclic elements
//! (Water, Vuur, Aarde, Lucht) plus `D` for the wildcard.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Number of elements on the cycle (the wildcard is not part of it)
pub const CYCLE_LEN: usize = 4;

/// All elements in absolute order
pub const ELEMENTS: [Element; 5] = [
    Element::Water,
    Element::Fire,
    Element::Earth,
    Element::Air,
    Element::Wild,
];

/// Rotation table indexed by `[previous][depth - 1]` for depths 1-4.
/// One step yields the element that beats `previous`; four steps come back.
const ROTATION: [[Element; CYCLE_LEN]; CYCLE_LEN] = [
    [Element::Air, Element::Earth, Element::Fire, Element::Water],   // from Water
    [Element::Water, Element::Air, Element::Earth, Element::Fire],   // from Fire
    [Element::Fire, Element::Water, Element::Air, Element::Earth],   // from Earth
    [Element::Earth, Element::Fire, Element::Water, Element::Air],   // from Air
];

// ============================================================================
// CORE TYPES
// ============================================================================

/// A single move in the game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    /// `W`
    Water = 0,
    /// `V`
    Fire = 1,
    /// `A`
    Earth = 2,
    /// `L`
    Air = 3,
    /// `D` - always ties, one per player per match
    Wild = 4,
}

impl Element {
    /// Index into per-element tables (absolute order)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Encoding symbol
    pub fn symbol(self) -> char {
        match self {
            Element::Water => 'W',
            Element::Fire => 'V',
            Element::Earth => 'A',
            Element::Air => 'L',
            Element::Wild => 'D',
        }
    }

    /// Parse an encoding symbol
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'W' => Some(Element::Water),
            'V' => Some(Element::Fire),
            'A' => Some(Element::Earth),
            'L' => Some(Element::Air),
            'D' => Some(Element::Wild),
            _ => None,
        }
    }

    pub fn is_wild(self) -> bool {
        self == Element::Wild
    }

    /// Position on the cycle. The wildcard has none of its own and
    /// takes the place of the last cyclic element.
    fn on_cycle(self) -> Element {
        if self.is_wild() {
            Element::Air
        } else {
            self
        }
    }

    /// One step along the rotation cycle (W -> L -> A -> V -> W)
    pub fn counter(self) -> Element {
        ROTATION[self.on_cycle().index()][0]
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Depth value outside 1-5
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("depth {0} out of range, expected 1-5")]
pub struct DepthOutOfRange(pub u8);

/// Control value 1-5 of an adaptive engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Depth(u8);

impl Depth {
    /// Depth that always forces the wildcard
    pub const WILD: Depth = Depth(5);

    pub fn new(value: u8) -> Option<Self> {
        (1..=5).contains(&value).then_some(Depth(value))
    }

    /// Parse a depth digit `'1'..='5'`
    pub fn from_char(symbol: char) -> Option<Self> {
        symbol
            .to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .and_then(Self::new)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Depth {
    type Error = DepthOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(DepthOutOfRange(value))
    }
}

impl From<Depth> for u8 {
    fn from(depth: Depth) -> Self {
        depth.0
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// RULES
// ============================================================================

/// Absolute element for a depth (opening move of an adaptive engine)
pub fn element_at(depth: Depth) -> Element {
    ELEMENTS[depth.get() as usize - 1]
}

/// Next desired element given the opponent's previous move
pub fn rotate(previous: Element, depth: Depth) -> Element {
    if depth == Depth::WILD {
        return Element::Wild;
    }
    ROTATION[previous.on_cycle().index()][depth.get() as usize - 1]
}

/// Render a move sequence in its encoding symbols
pub fn to_symbols(moves: &[Element]) -> String {
    moves.iter().map(|m| m.symbol()).collect()
}
