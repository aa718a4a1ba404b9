//! Sticker colours, face labels and the single-piece orientation state.
//!
//! Every piece carries a colour for all six outer faces, including the ones
//! hidden inside the cube. Rotations only permute which face holds which
//! colour, so the set of colours on a piece never changes.

use std::fmt;

use crate::geometry::{Axis, Layer};

/// One of the six sticker colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Orange,
    Green,
    Red,
    Blue,
    Yellow,
}

impl Color {
    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Orange => "orange",
            Color::Green => "green",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
        }
    }

    /// Single-letter abbreviation used by compact listings.
    pub const fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Orange => 'O',
            Color::Green => 'G',
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pads to the widest name so rendered rows line up
        f.pad(self.name())
    }
}

/// One of the six outer faces of a piece (and of the cube).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    U,
    L,
    F,
    R,
    B,
    D,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::L, Face::F, Face::R, Face::B, Face::D];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The colour this face shows on a solved cube.
    pub const fn solved_color(self) -> Color {
        match self {
            Face::U => Color::White,
            Face::L => Color::Orange,
            Face::F => Color::Green,
            Face::R => Color::Red,
            Face::B => Color::Blue,
            Face::D => Color::Yellow,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Face::U => "up",
            Face::L => "left",
            Face::F => "front",
            Face::R => "right",
            Face::B => "back",
            Face::D => "down",
        }
    }
}

/// Identity of a piece, assigned once at cube construction.
pub type PieceId = usize;

/// A single sub-cube: its identity and the colour on each of its six faces.
///
/// Deliberately not `Clone`: a piece exists exactly once in its grid and is
/// only ever moved between slots.
#[derive(Debug, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    stickers: [Color; 6],
}

impl Piece {
    /// Creates a piece in the solved orientation.
    pub fn new(id: PieceId) -> Self {
        Self {
            id,
            stickers: Face::ALL.map(Face::solved_color),
        }
    }

    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub fn color(&self, face: Face) -> Color {
        self.stickers[face.index()]
    }

    /// Re-orients the stickers for one quarter turn of `layer`.
    ///
    /// Layers on a negative axis flip the direction. An inverted turn is the
    /// forward cycle applied three times, never a separate inverse table.
    pub fn rotate(&mut self, layer: Layer, invert: bool) {
        let signed = layer.signed_axis();
        let invert = invert != signed.negative;
        let applications = if invert { 3 } else { 1 };
        for _ in 0..applications {
            self.cycle(signed.axis);
        }
    }

    /// One forward quarter turn about `axis`.
    fn cycle(&mut self, axis: Axis) {
        let [a, b, c, d] = axis.cycle().map(Face::index);
        let moved_off = self.stickers[d];
        self.stickers[d] = self.stickers[c];
        self.stickers[c] = self.stickers[b];
        self.stickers[b] = self.stickers[a];
        self.stickers[a] = moved_off;
    }
}
