//! Move notation: parsing, canonicalization and reversal of tokens.
//!
//! An atomic token is a move letter, an optional repeat count and an optional
//! trailing apostrophe (`R`, `U'`, `F2`, `M13'`). Repeat counts are reduced
//! modulo 4, so every token collapses to one of three canonical forms or to
//! nothing at all.

use std::fmt;
use std::str::FromStr;

use crate::error::NotationError;
use crate::geometry::Layer;

/// The amount a canonical move turns its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    /// `X`
    Clockwise,
    /// `X'`
    CounterClockwise,
    /// `X2`
    Half,
}

impl Turn {
    pub const fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Half => "2",
        }
    }

    /// Physical quarter turns needed to perform this turn.
    pub const fn quarter_turns(self) -> usize {
        match self {
            Turn::Clockwise | Turn::CounterClockwise => 1,
            Turn::Half => 2,
        }
    }

    /// Whether the quarter turns run against the layer's clockwise direction.
    pub const fn is_inverted(self) -> bool {
        matches!(self, Turn::CounterClockwise)
    }

    pub const fn reverse(self) -> Self {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Half => Turn::Half,
        }
    }
}

/// A canonical move: a layer and how far it turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub layer: Layer,
    pub turn: Turn,
}

impl Move {
    pub const fn new(layer: Layer, turn: Turn) -> Self {
        Self { layer, turn }
    }

    pub const fn reverse(self) -> Self {
        Self {
            layer: self.layer,
            turn: self.turn.reverse(),
        }
    }

    /// Parses exactly one of the canonical forms `X`, `X'` or `X2`.
    pub fn from_canonical(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let layer = Layer::from_letter(chars.next()?)?;
        let turn = match (chars.next(), chars.next()) {
            (None, _) => Turn::Clockwise,
            (Some('\''), None) => Turn::CounterClockwise,
            (Some('2'), None) => Turn::Half,
            _ => return None,
        };
        Some(Self { layer, turn })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.layer, self.turn.suffix())
    }
}

impl FromStr for Move {
    type Err = NotationError;

    /// Parses any atomic token. Tokens that cancel out (`R4`, `U0'`) have no
    /// move and are reported as invalid here; use [`parse_atomic`] to tell
    /// them apart.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_atomic(s)?.ok_or_else(|| NotationError::InvalidToken(s.to_owned()))
    }
}

/// Repeat count and inversion mark trailing a move letter or sequence name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suffix<'a> {
    pub digits: &'a str,
    pub inverted: bool,
}

/// Splits `rest` as `\d*'?`, or `None` if it has any other shape.
pub fn parse_suffix(rest: &str) -> Option<Suffix<'_>> {
    let (digits, inverted) = match rest.strip_suffix('\'') {
        Some(digits) => (digits, true),
        None => (rest, false),
    };
    digits
        .bytes()
        .all(|b| b.is_ascii_digit())
        .then_some(Suffix { digits, inverted })
}

/// Whether `token` matches the atomic grammar `^[LMRUEDFSB]\d*'?$`.
pub fn is_atomic(token: &str) -> bool {
    split_atomic(token).is_some()
}

fn split_atomic(token: &str) -> Option<(Layer, Suffix<'_>)> {
    let first = token.chars().next()?;
    let layer = Layer::from_letter(first)?;
    let suffix = parse_suffix(&token[first.len_utf8()..])?;
    Some((layer, suffix))
}

/// Canonicalizes an atomic token.
///
/// Returns `Ok(None)` when the repeat count is a multiple of four: the token
/// is valid but performs no turn and leaves no trace in history.
///
/// | repeat mod 4 | result |
/// |---|---|
/// | 0 | nothing |
/// | 1 (or no count) | `X`, or `X'` if marked |
/// | 2 | `X2`, the mark is irrelevant |
/// | 3 | the opposite mark of the original |
pub fn parse_atomic(token: &str) -> Result<Option<Move>, NotationError> {
    let (layer, suffix) =
        split_atomic(token).ok_or_else(|| NotationError::InvalidToken(token.to_owned()))?;
    let repeat = if suffix.digits.is_empty() {
        1
    } else {
        repeat_mod4(suffix.digits)
    };
    let turn = match (repeat, suffix.inverted) {
        (0, _) => return Ok(None),
        (2, _) => Turn::Half,
        (1, false) | (3, true) => Turn::Clockwise,
        _ => Turn::CounterClockwise,
    };
    Ok(Some(Move { layer, turn }))
}

/// A decimal string reduced modulo 4 digit by digit, so no length overflows.
fn repeat_mod4(digits: &str) -> u8 {
    digits
        .bytes()
        .fold(0, |acc, b| (acc * 10 + (b - b'0')) % 4)
}

/// Parses a named-sequence repeat count; an empty count means once.
///
/// Unlike move repeats these are not reduced, so they must fit in a `u64`.
pub fn parse_repeat(digits: &str, token: &str) -> Result<u64, NotationError> {
    if digits.is_empty() {
        return Ok(1);
    }
    digits
        .parse()
        .map_err(|_| NotationError::RepeatOutOfRange(token.to_owned()))
}

/// Reverses a single token.
///
/// A primed token loses its mark, a canonical half turn is its own reverse and
/// anything else gains a mark, which also covers repeated moves and sequence
/// names (`R3` -> `R3'`, `sune2` -> `sune2'`).
pub fn reverse_token(token: &str) -> String {
    if let Some(unprimed) = token.strip_suffix('\'') {
        return unprimed.to_owned();
    }
    match Move::from_canonical(token) {
        Some(Move {
            turn: Turn::Half, ..
        }) => token.to_owned(),
        _ => format!("{token}'"),
    }
}

/// Reverses a whole sequence: token order and each token's direction.
pub fn reverse_sequence(sequence: &str) -> String {
    sequence
        .split_whitespace()
        .rev()
        .map(reverse_token)
        .collect::<Vec<_>>()
        .join(" ")
}
