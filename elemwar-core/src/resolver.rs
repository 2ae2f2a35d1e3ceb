//! Move resolution against a player's remaining inventory

use crate::element::{Element, CYCLE_LEN, ELEMENTS};

/// Starting stock per element, in absolute order (W, V, A, L, D)
pub const INITIAL_STOCK: [u8; 5] = [3, 3, 3, 3, 1];

/// Moves each player makes in a match (sum of the starting stock)
pub const MOVES_PER_MATCH: usize = 13;

/// Remaining element counts for one player
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Inventory {
    counts: [u8; 5],
}

impl Inventory {
    /// Full starting inventory
    pub fn new() -> Self {
        Self {
            counts: INITIAL_STOCK,
        }
    }

    /// Inventory with explicit counts
    pub fn from_counts(counts: [u8; 5]) -> Self {
        Self { counts }
    }

    pub fn count(&self, element: Element) -> u8 {
        self.counts[element.index()]
    }

    pub fn has(&self, element: Element) -> bool {
        self.count(element) > 0
    }

    /// Total moves left
    pub fn total(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    /// Spend one element. Returns false (and changes nothing) when out of stock.
    pub fn take(&mut self, element: Element) -> bool {
        let slot = &mut self.counts[element.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the desired element, or the nearest substitute still in stock.
///
/// Substitutes are probed along the rotation cycle starting after `desired`,
/// then the wildcard. A spent wildcard probes the successors of `L` (A, V, W)
/// and then `L` itself. `None` means no legal move is left.
pub fn choose_available(desired: Element, inventory: &Inventory) -> Option<Element> {
    if inventory.has(desired) {
        return Some(desired);
    }

    let mut current = desired;
    for _ in 0..CYCLE_LEN {
        current = current.counter();
        if inventory.has(current) {
            return Some(current);
        }
    }

    inventory.has(Element::Wild).then_some(Element::Wild)
}

/// The forced final move: first element in stock, in absolute order
pub fn choose_forced(inventory: &Inventory) -> Option<Element> {
    ELEMENTS.into_iter().find(|&e| inventory.has(e))
}
