//! Cube types: dimensions, ring tables and the quarter-turn executor.
//!
//! A cube type is data plus two small hooks; the grid and rotation engine stay
//! size-generic, so a new size only needs a new ring table.

use crate::geometry::Layer;
use crate::grid::{CubeGrid, Dims};
use crate::layers::{LayerRings, LayerTable};
use crate::notation::Move;

/// One physical quarter turn of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuarterTurn {
    pub layer: Layer,
    pub invert: bool,
}

/// What a cube type provides to the executor.
pub trait CubeType {
    /// Key used for stored sequences and saved histories.
    fn name(&self) -> &'static str;

    fn dims(&self) -> Dims;

    /// Ring lists for every move letter, built once per cube.
    fn layer_table(&self) -> LayerTable;

    /// Quarter turns that make up one canonical move.
    ///
    /// Half turns are two forward quarter turns; a primed move is a single
    /// inverted quarter turn.
    fn quarter_turns(&self, mv: Move) -> Vec<QuarterTurn> {
        let turn = QuarterTurn {
            layer: mv.layer,
            invert: mv.turn.is_inverted(),
        };
        vec![turn; mv.turn.quarter_turns()]
    }

    /// Executes one quarter turn on the grid.
    fn turn(&self, grid: &mut CubeGrid, layers: &LayerTable, turn: QuarterTurn) {
        grid.rotate_layer(layers.rings(turn.layer), turn.layer, turn.invert);
    }
}

/// The standard 3x3x3 cube.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreeByThree;

impl ThreeByThree {
    pub const DIMS: Dims = Dims { x: 3, y: 3, z: 3 };
}

impl CubeType for ThreeByThree {
    fn name(&self) -> &'static str {
        "ThreeByThree"
    }

    fn dims(&self) -> Dims {
        Self::DIMS
    }

    fn layer_table(&self) -> LayerTable {
        LayerTable::build(Self::DIMS, THREE_BY_THREE_LAYERS)
            .unwrap_or_else(|e| panic!("built-in 3x3x3 ring table is inconsistent: {e}"))
    }
}

/// Clockwise rings for every 3x3x3 layer: a center ring, then the boundary
/// ring starting from the slot nearest the origin.
#[rustfmt::skip]
pub const THREE_BY_THREE_LAYERS: &[LayerRings] = &[
    (Layer::U, &[
        &[(0, 1, 1)],
        &[(0, 0, 0), (0, 1, 0), (0, 2, 0), (0, 2, 1), (0, 2, 2), (0, 1, 2), (0, 0, 2), (0, 0, 1)],
    ]),
    (Layer::F, &[
        &[(1, 0, 1)],
        &[(0, 0, 0), (0, 0, 1), (0, 0, 2), (1, 0, 2), (2, 0, 2), (2, 0, 1), (2, 0, 0), (1, 0, 0)],
    ]),
    (Layer::L, &[
        &[(1, 1, 0)],
        &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (2, 1, 0), (2, 2, 0), (1, 2, 0), (0, 2, 0), (0, 1, 0)],
    ]),
    (Layer::D, &[
        &[(2, 1, 1)],
        &[(2, 0, 0), (2, 0, 1), (2, 0, 2), (2, 1, 2), (2, 2, 2), (2, 2, 1), (2, 2, 0), (2, 1, 0)],
    ]),
    (Layer::B, &[
        &[(1, 2, 1)],
        &[(0, 2, 0), (1, 2, 0), (2, 2, 0), (2, 2, 1), (2, 2, 2), (1, 2, 2), (0, 2, 2), (0, 2, 1)],
    ]),
    (Layer::R, &[
        &[(1, 1, 2)],
        &[(0, 0, 2), (0, 1, 2), (0, 2, 2), (1, 2, 2), (2, 2, 2), (2, 1, 2), (2, 0, 2), (1, 0, 2)],
    ]),
    (Layer::E, &[
        &[(1, 1, 1)],
        &[(1, 0, 0), (1, 0, 1), (1, 0, 2), (1, 1, 2), (1, 2, 2), (1, 2, 1), (1, 2, 0), (1, 1, 0)],
    ]),
    (Layer::S, &[
        &[(1, 1, 1)],
        &[(0, 1, 0), (0, 1, 1), (0, 1, 2), (1, 1, 2), (2, 1, 2), (2, 1, 1), (2, 1, 0), (1, 1, 0)],
    ]),
    (Layer::M, &[
        &[(1, 1, 1)],
        &[(0, 0, 1), (1, 0, 1), (2, 0, 1), (2, 1, 1), (2, 2, 1), (1, 2, 1), (0, 2, 1), (0, 1, 1)],
    ]),
];
