//! Twisty Puzzle Library
//!
//! Models a 3x3x3 twisty puzzle as a grid of pieces, with a move notation,
//! named sequences and a self-simplifying move history.

pub mod cube;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod kinds;
pub mod layers;
pub mod notation;
pub mod persistence;
pub mod pieces;
pub mod sequences;
pub mod simplify;

use cube::Cube;
use error::{NotationError, SequenceError};
use grid::CubeGrid;
use kinds::CubeType;
use notation::Move;
use sequences::SequenceMap;

/// Trait that erases the cube type for dynamic dispatch.
///
/// Hosts pick a cube type at run time and drive it through a
/// `Box<dyn CubeOps>` without naming the type parameter.
pub trait CubeOps {
    fn name(&self) -> &'static str;
    fn grid(&self) -> &CubeGrid;
    fn history(&self) -> &str;
    fn sequences(&self) -> &SequenceMap;
    fn edit_sequence(&mut self, name: &str, body: &str) -> Result<(), SequenceError>;
    fn enqueue(&mut self, sequence: &str);
    fn step(&mut self) -> Option<Move>;
    fn is_idle(&self) -> bool;
    fn do_sequence(&mut self, sequence: &str) -> Vec<NotationError>;
    fn scramble(&mut self, length: usize) -> String;
    fn solution(&self) -> String;
    fn solve(&mut self) -> String;
    fn reset(&mut self);
    fn is_solved(&self) -> bool;
}

impl<T: CubeType> CubeOps for Cube<T> {
    fn name(&self) -> &'static str {
        Cube::name(self)
    }

    fn grid(&self) -> &CubeGrid {
        Cube::grid(self)
    }

    fn history(&self) -> &str {
        Cube::history(self)
    }

    fn sequences(&self) -> &SequenceMap {
        Cube::sequences(self)
    }

    fn edit_sequence(&mut self, name: &str, body: &str) -> Result<(), SequenceError> {
        Cube::edit_sequence(self, name, body)
    }

    fn enqueue(&mut self, sequence: &str) {
        Cube::enqueue(self, sequence)
    }

    fn step(&mut self) -> Option<Move> {
        Cube::step(self)
    }

    fn is_idle(&self) -> bool {
        Cube::is_idle(self)
    }

    fn do_sequence(&mut self, sequence: &str) -> Vec<NotationError> {
        Cube::do_sequence(self, sequence)
    }

    fn scramble(&mut self, length: usize) -> String {
        Cube::scramble(self, length)
    }

    fn solution(&self) -> String {
        Cube::solution(self)
    }

    fn solve(&mut self) -> String {
        Cube::solve(self)
    }

    fn reset(&mut self) {
        Cube::reset(self)
    }

    fn is_solved(&self) -> bool {
        Cube::is_solved(self)
    }
}
