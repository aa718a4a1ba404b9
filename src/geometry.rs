//! Rotation axes and the move letters that turn about them.
//!
//! Coordinates are right-handed: +X points out of the R face, +Y out of U and
//! +Z out of F. Every move letter turns clockwise as seen from its own side,
//! which means a signed axis per letter: R turns about +X, L about -X, and so on.
//! Slices follow the face they share an axis sign with (M like L, E like D,
//! S like F).

use std::fmt;
use std::str::FromStr;

use crate::error::NotationError;
use crate::pieces::Face;

/// One of the three spatial axes.
///
/// Also the axis group used by the simplifier: letters on the same axis are
/// treated as commuting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// The sticker cycle for one forward quarter turn about this axis.
    ///
    /// The colour on `cycle[n]` moves to `cycle[n + 1]`, wrapping around:
    /// - X: F -> U -> B -> D -> F
    /// - Y: L -> B -> R -> F -> L
    /// - Z: L -> U -> R -> D -> L
    pub const fn cycle(self) -> [Face; 4] {
        match self {
            Axis::X => [Face::F, Face::U, Face::B, Face::D],
            Axis::Y => [Face::L, Face::B, Face::R, Face::F],
            Axis::Z => [Face::L, Face::U, Face::R, Face::D],
        }
    }
}

/// An axis together with the direction a forward turn runs about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignedAxis {
    pub axis: Axis,
    pub negative: bool,
}

impl SignedAxis {
    const fn positive(axis: Axis) -> Self {
        Self {
            axis,
            negative: false,
        }
    }

    const fn negative(axis: Axis) -> Self {
        Self {
            axis,
            negative: true,
        }
    }
}

/// A move letter: one of the six outer faces or the three middle slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    U,
    L,
    F,
    R,
    B,
    D,
    E,
    S,
    M,
}

impl Layer {
    /// All move letters, outer faces first.
    pub const ALL: [Layer; 9] = [
        Layer::U,
        Layer::L,
        Layer::F,
        Layer::R,
        Layer::B,
        Layer::D,
        Layer::E,
        Layer::S,
        Layer::M,
    ];

    /// Position in [`Layer::ALL`], used for table lookups.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn letter(self) -> char {
        match self {
            Layer::U => 'U',
            Layer::L => 'L',
            Layer::F => 'F',
            Layer::R => 'R',
            Layer::B => 'B',
            Layer::D => 'D',
            Layer::E => 'E',
            Layer::S => 'S',
            Layer::M => 'M',
        }
    }

    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'U' => Some(Layer::U),
            'L' => Some(Layer::L),
            'F' => Some(Layer::F),
            'R' => Some(Layer::R),
            'B' => Some(Layer::B),
            'D' => Some(Layer::D),
            'E' => Some(Layer::E),
            'S' => Some(Layer::S),
            'M' => Some(Layer::M),
            _ => None,
        }
    }

    /// The signed axis a clockwise turn of this layer rotates about.
    pub const fn signed_axis(self) -> SignedAxis {
        match self {
            Layer::U => SignedAxis::positive(Axis::Y),
            Layer::D | Layer::E => SignedAxis::negative(Axis::Y),
            Layer::F | Layer::S => SignedAxis::positive(Axis::Z),
            Layer::B => SignedAxis::negative(Axis::Z),
            Layer::R => SignedAxis::positive(Axis::X),
            Layer::L | Layer::M => SignedAxis::negative(Axis::X),
        }
    }

    #[inline]
    pub const fn axis(self) -> Axis {
        self.signed_axis().axis
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Layer {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Layer::from_letter(letter)
                .ok_or_else(|| NotationError::InvalidToken(s.to_owned())),
            _ => Err(NotationError::InvalidToken(s.to_owned())),
        }
    }
}
