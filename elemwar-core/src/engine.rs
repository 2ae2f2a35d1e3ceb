//! Engine codes - parsing and validation of strategy encodings

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::{to_symbols, Depth, Element};
use crate::resolver::MOVES_PER_MATCH;

/// Length of an adaptive (depth) code
pub const ADAPTIVE_LEN: usize = MOVES_PER_MATCH - 1;

/// Length of a fixed (literal) code
pub const FIXED_LEN: usize = MOVES_PER_MATCH;

/// Error types for engine codes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("engine code is empty")]
    Empty,

    #[error("engine code '{code}' has length {len}, expected 12 digits or 13 symbols")]
    BadLength { code: String, len: usize },

    #[error("invalid depth digit '{symbol}' at position {position} in '{code}'")]
    BadDepth {
        code: String,
        position: usize,
        symbol: char,
    },

    #[error("invalid element symbol '{symbol}' at position {position} in '{code}'")]
    BadSymbol {
        code: String,
        position: usize,
        symbol: char,
    },
}

/// Decoded strategy
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Reacts to the opponent's previous move, one depth per round
    Adaptive([Depth; ADAPTIVE_LEN]),
    /// Plays every move literally
    Fixed([Element; FIXED_LEN]),
}

/// A validated engine together with the code it was parsed from
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Engine {
    code: String,
    strategy: Strategy,
}

impl Engine {
    /// Parse an exact engine code
    pub fn parse(code: &str) -> Result<Self, EngineError> {
        let symbols: Vec<char> = code.chars().collect();
        let strategy = match symbols.len() {
            0 => return Err(EngineError::Empty),
            ADAPTIVE_LEN => Strategy::Adaptive(parse_depths(code, &symbols)?),
            FIXED_LEN => Strategy::Fixed(parse_elements(code, &symbols)?),
            len => {
                return Err(EngineError::BadLength {
                    code: code.to_string(),
                    len,
                })
            }
        };

        Ok(Self {
            code: code.to_string(),
            strategy,
        })
    }

    /// Extract an engine from a free-form input line.
    ///
    /// Lines shaped like `name:label:CODE...` use the third field. The code
    /// is the leading 12 depth digits if present, otherwise the leading 13
    /// element symbols; trailing text is ignored.
    pub fn from_line(line: &str) -> Result<Self, EngineError> {
        let fields: Vec<&str> = line.split(':').collect();
        let field = (if fields.len() > 2 { fields[2] } else { line }).trim();

        if field.is_empty() {
            return Err(EngineError::Empty);
        }

        if let Some(prefix) = leading(field, ADAPTIVE_LEN) {
            if prefix.chars().all(|c| Depth::from_char(c).is_some()) {
                return Self::parse(prefix);
            }
        }
        if let Some(prefix) = leading(field, FIXED_LEN) {
            if prefix.chars().all(|c| Element::from_symbol(c).is_some()) {
                return Self::parse(prefix);
            }
        }

        // Neither prefix fits; report why the field itself is rejected
        Self::parse(field)
    }

    /// Fixed engine playing the given moves
    pub fn fixed(moves: [Element; FIXED_LEN]) -> Self {
        Self {
            code: to_symbols(&moves),
            strategy: Strategy::Fixed(moves),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn is_adaptive(&self) -> bool {
        matches!(self.strategy, Strategy::Adaptive(_))
    }
}

impl FromStr for Engine {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Engine {
    type Error = EngineError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::parse(&code)
    }
}

impl From<Engine> for String {
    fn from(engine: Engine) -> Self {
        engine.code
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

fn parse_depths(code: &str, symbols: &[char]) -> Result<[Depth; ADAPTIVE_LEN], EngineError> {
    let mut depths = [Depth::WILD; ADAPTIVE_LEN];
    for (position, (&symbol, slot)) in symbols.iter().zip(depths.iter_mut()).enumerate() {
        *slot = Depth::from_char(symbol).ok_or_else(|| EngineError::BadDepth {
            code: code.to_string(),
            position,
            symbol,
        })?;
    }
    Ok(depths)
}

fn parse_elements(code: &str, symbols: &[char]) -> Result<[Element; FIXED_LEN], EngineError> {
    let mut moves = [Element::Wild; FIXED_LEN];
    for (position, (&symbol, slot)) in symbols.iter().zip(moves.iter_mut()).enumerate() {
        *slot = Element::from_symbol(symbol).ok_or_else(|| EngineError::BadSymbol {
            code: code.to_string(),
            position,
            symbol,
        })?;
    }
    Ok(moves)
}

/// First `n` characters of `s`, if it has at least that many
fn leading(s: &str, n: usize) -> Option<&str> {
    match s.char_indices().nth(n) {
        Some((end, _)) => Some(&s[..end]),
        None if s.chars().count() == n => Some(s),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_adaptive() {
        let engine = Engine::parse("123451234512").unwrap();
        assert!(engine.is_adaptive());
        assert_eq!(engine.code(), "123451234512");
        match engine.strategy() {
            Strategy::Adaptive(depths) => {
                assert_eq!(depths[0], Depth::new(1).unwrap());
                assert_eq!(depths[4], Depth::WILD);
            }
            Strategy::Fixed(_) => panic!("expected adaptive strategy"),
        }
    }

    #[test]
    fn test_parse_fixed() {
        let engine = Engine::parse("WVALDWVALWVAL").unwrap();
        assert!(!engine.is_adaptive());
        match engine.strategy() {
            Strategy::Fixed(moves) => {
                assert_eq!(moves[0], Element::Water);
                assert_eq!(moves[4], Element::Wild);
            }
            Strategy::Adaptive(_) => panic!("expected fixed strategy"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        assert_eq!(Engine::parse(""), Err(EngineError::Empty));
        assert!(matches!(
            Engine::parse("1234512345"),
            Err(EngineError::BadLength { len: 10, .. })
        ));
        assert!(matches!(
            Engine::parse("WVALWVALWVALWV"),
            Err(EngineError::BadLength { len: 14, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_symbols() {
        assert!(matches!(
            Engine::parse("123456123451"),
            Err(EngineError::BadDepth { position: 5, symbol: '6', .. })
        ));
        assert!(matches!(
            Engine::parse("WVALXWVALWVAL"),
            Err(EngineError::BadSymbol { position: 4, symbol: 'X', .. })
        ));
        // A 12-character literal is not a valid adaptive code
        assert!(matches!(
            Engine::parse("WVALWVALWVAL"),
            Err(EngineError::BadDepth { position: 0, .. })
        ));
    }

    #[test]
    fn test_from_line_plain() {
        let engine = Engine::from_line("  111122223333  ").unwrap();
        assert_eq!(engine.code(), "111122223333");
    }

    #[test]
    fn test_from_line_third_field() {
        let engine = Engine::from_line("42:best:WVALWVALWVALW").unwrap();
        assert_eq!(engine.code(), "WVALWVALWVALW");

        let engine = Engine::from_line("rank 1: score 30: 543215432154 extra").unwrap();
        assert_eq!(engine.code(), "543215432154");
    }

    #[test]
    fn test_from_line_takes_prefix() {
        // 13 digits: the adaptive prefix wins
        let engine = Engine::from_line("1234512345123").unwrap();
        assert_eq!(engine.code(), "123451234512");

        let engine = Engine::from_line("WVALWVALWVALW (score: 5)").unwrap();
        assert_eq!(engine.code(), "WVALWVALWVALW");
    }

    #[test]
    fn test_from_line_rejects_garbage() {
        assert_eq!(Engine::from_line("   "), Err(EngineError::Empty));
        assert!(Engine::from_line("hello").is_err());
        assert!(Engine::from_line("a:b:1234").is_err());
    }

    #[test]
    fn test_fixed_constructor_roundtrip() {
        let moves = [Element::Air; FIXED_LEN];
        let engine = Engine::fixed(moves);
        assert_eq!(engine.code(), "LLLLLLLLLLLLL");
        assert_eq!(Engine::parse(engine.code()).unwrap(), engine);
    }

    #[test]
    fn test_serde_as_code_string() {
        let engine = Engine::parse("555555555555").unwrap();
        let json = serde_json::to_string(&engine).unwrap();
        assert_eq!(json, "\"555555555555\"");
        let back: Engine = serde_json::from_str(&json).unwrap();
        assert_eq!(back, engine);
        assert!(serde_json::from_str::<Engine>("\"12\"").is_err());
    }
}
