//! Slot storage for a cube's pieces, face readouts and the layer rotation engine.
//!
//! Slots are addressed `(i, j, k)`: depth along y (0 is the U layer), along z
//! (0 is the F layer) and along x (0 is the L layer). The grid is stored as a
//! flat vector in that order, so `index = (i * z + j) * x + k`.

use crate::geometry::Layer;
use crate::layers::{Ring, Slot};
use crate::pieces::{Color, Face, Piece, PieceId};

/// Grid extent along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dims {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Dims {
    pub const fn cell_count(self) -> usize {
        self.x * self.y * self.z
    }

    /// Converts a slot address to its flat index, or `None` if out of bounds.
    #[inline]
    pub const fn slot_index(self, (i, j, k): Slot) -> Option<usize> {
        if i < self.y && j < self.z && k < self.x {
            Some((i * self.z + j) * self.x + k)
        } else {
            None
        }
    }
}

/// The pieces of one cube, each owned by exactly one slot.
#[derive(Debug, PartialEq, Eq)]
pub struct CubeGrid {
    dims: Dims,
    slots: Vec<Piece>,
}

impl CubeGrid {
    /// Allocates a solved grid. Piece ids follow slot order.
    pub fn new(dims: Dims) -> Self {
        Self {
            dims,
            slots: (0..dims.cell_count()).map(Piece::new).collect(),
        }
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Panics if the address lies outside the grid.
    #[inline]
    pub fn piece(&self, i: usize, j: usize, k: usize) -> &Piece {
        let index = self
            .dims
            .slot_index((i, j, k))
            .unwrap_or_else(|| panic!("slot ({i}, {j}, {k}) outside {:?}", self.dims));
        &self.slots[index]
    }

    #[inline]
    pub fn color_at(&self, i: usize, j: usize, k: usize, face: Face) -> Color {
        self.piece(i, j, k).color(face)
    }

    /// Piece ids in slot order.
    pub fn piece_ids(&self) -> Vec<PieceId> {
        self.slots.iter().map(Piece::id).collect()
    }

    /// Executes one quarter turn of `layer` over its rings.
    ///
    /// Ring contents shift first (forward, or backward when inverted) by a
    /// quarter of the ring length, then every piece on the layer is
    /// re-oriented. Single-slot rings are only re-oriented.
    pub fn rotate_layer(&mut self, rings: &[Ring], layer: Layer, invert: bool) {
        for ring in rings {
            if ring.len() > 1 {
                for _ in 0..ring.quarter_shift() {
                    self.shift_ring(ring.slots(), invert);
                }
            }
            for &slot in ring.slots() {
                self.slots[slot].rotate(layer, invert);
            }
        }
    }

    /// Moves every piece in the ring one position along it.
    ///
    /// Done with swaps only, so pieces are permuted and never copied.
    fn shift_ring(&mut self, ring: &[usize], backward: bool) {
        if backward {
            for pair in ring.windows(2) {
                self.slots.swap(pair[0], pair[1]);
            }
        } else {
            for pair in ring.windows(2).rev() {
                self.slots.swap(pair[0], pair[1]);
            }
        }
    }

    /// Colours of one face in its fixed reading order.
    pub fn side(&self, face: Face) -> Vec<Color> {
        match face {
            Face::U => self.up(),
            Face::L => self.left(),
            Face::F => self.front(),
            Face::R => self.right(),
            Face::B => self.back(),
            Face::D => self.down(),
        }
    }

    /// Rows from the back edge to the front edge, each left to right.
    pub fn up(&self) -> Vec<Color> {
        let Dims { x, z, .. } = self.dims;
        (0..z)
            .rev()
            .flat_map(|j| (0..x).map(move |k| (j, k)))
            .map(|(j, k)| self.color_at(0, j, k, Face::U))
            .collect()
    }

    /// Rows top to bottom, each from the back edge to the front edge.
    pub fn left(&self) -> Vec<Color> {
        let Dims { y, z, .. } = self.dims;
        (0..y)
            .flat_map(|i| (0..z).rev().map(move |j| (i, j)))
            .map(|(i, j)| self.color_at(i, j, 0, Face::L))
            .collect()
    }

    /// Rows top to bottom, each left to right.
    pub fn front(&self) -> Vec<Color> {
        let Dims { x, y, .. } = self.dims;
        (0..y)
            .flat_map(|i| (0..x).map(move |k| (i, k)))
            .map(|(i, k)| self.color_at(i, 0, k, Face::F))
            .collect()
    }

    /// Rows top to bottom, each from the front edge to the back edge.
    pub fn right(&self) -> Vec<Color> {
        let Dims { x, y, z } = self.dims;
        (0..y)
            .flat_map(|i| (0..z).map(move |j| (i, j)))
            .map(|(i, j)| self.color_at(i, j, x - 1, Face::R))
            .collect()
    }

    /// Rows top to bottom, each right to left (as seen from the front).
    pub fn back(&self) -> Vec<Color> {
        let Dims { x, y, z } = self.dims;
        (0..y)
            .flat_map(|i| (0..x).rev().map(move |k| (i, k)))
            .map(|(i, k)| self.color_at(i, z - 1, k, Face::B))
            .collect()
    }

    /// Rows from the front edge to the back edge, each left to right.
    pub fn down(&self) -> Vec<Color> {
        let Dims { x, y, z } = self.dims;
        (0..z)
            .flat_map(|j| (0..x).map(move |k| (j, k)))
            .map(|(j, k)| self.color_at(y - 1, j, k, Face::D))
            .collect()
    }

    /// True iff every face shows a single colour.
    pub fn is_solved(&self) -> bool {
        Face::ALL
            .iter()
            .all(|&face| is_side_solved(&self.side(face)))
    }

    /// One line per face: `U: WWW WWW WWW`, rows separated by spaces.
    pub fn format_faces(&self) -> String {
        let mut output = String::new();
        for face in Face::ALL {
            let colors = self.side(face);
            let row_len = colors.len() / self.face_rows(face).max(1);
            let rows: Vec<String> = colors
                .chunks(row_len.max(1))
                .map(|row| row.iter().map(|c| c.letter()).collect())
                .collect();
            output.push_str(&format!("{face:?}: {}\n", rows.join(" ")));
        }
        output
    }

    /// Renders one face as `[a|b|c]` rows under a `Printing <side>:` header.
    pub fn format_side(&self, face: Face) -> String {
        let colors = self.side(face);
        let row_len = colors.len() / self.face_rows(face).max(1);
        let mut output = format!("Printing {}:\n", face.name());
        for row in colors.chunks(row_len.max(1)) {
            output.push_str(&format_row(row));
            output.push('\n');
        }
        output
    }

    /// Renders the unfolded cube: U on top, then L F R B side by side, D below.
    pub fn format_net(&self) -> String {
        let Dims { x, y, z } = self.dims;
        let up = self.up();
        let down = self.down();
        let sides = [Face::L, Face::F, Face::R, Face::B].map(|face| self.side(face));
        // each cell is a six-wide colour plus one separator, the left face is z cells wide
        let padding = " ".repeat(7 * z + 1);

        let mut output = String::new();
        for row in up.chunks(x) {
            output.push_str(&padding);
            output.push_str(&format_row(row));
            output.push('\n');
        }
        let row_widths = [z, x, z, x];
        for i in 0..y {
            for (colors, width) in sides.iter().zip(row_widths) {
                output.push_str(&format_row(&colors[i * width..(i + 1) * width]));
            }
            output.push('\n');
        }
        for row in down.chunks(x) {
            output.push_str(&padding);
            output.push_str(&format_row(row));
            output.push('\n');
        }
        output
    }

    fn face_rows(&self, face: Face) -> usize {
        match face {
            Face::U | Face::D => self.dims.z,
            Face::L | Face::F | Face::R | Face::B => self.dims.y,
        }
    }
}

/// True iff every colour equals the first one.
pub fn is_side_solved(colors: &[Color]) -> bool {
    colors.iter().all(|&color| Some(&color) == colors.first())
}

fn format_row(colors: &[Color]) -> String {
    let cells: Vec<String> = colors.iter().map(|color| format!("{color:<6}")).collect();
    format!("[{}]", cells.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{CubeType, ThreeByThree};

    const DIMS: Dims = Dims { x: 3, y: 3, z: 3 };

    /// Boundary ring of the U layer for a 3x3x3 grid.
    fn up_ring() -> Ring {
        let table = ThreeByThree.layer_table();
        table.rings(Layer::U)[1].clone()
    }

    #[test]
    fn test_slot_index_roundtrip() {
        let mut seen = vec![false; DIMS.cell_count()];
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    let index = DIMS.slot_index((i, j, k)).unwrap();
                    assert!(!seen[index], "two slots map to index {index}");
                    seen[index] = true;
                }
            }
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(DIMS.slot_index((0, 3, 0)), None);
    }

    #[test]
    fn test_slot_index_is_size_generic() {
        let dims = Dims { x: 2, y: 4, z: 3 };
        assert_eq!(dims.cell_count(), 24);
        assert_eq!(dims.slot_index((3, 2, 1)), Some(23));
        assert_eq!(dims.slot_index((0, 0, 2)), None);
    }

    #[test]
    fn test_new_grid_is_solved() {
        let grid = CubeGrid::new(DIMS);
        assert!(grid.is_solved());
        assert_eq!(grid.piece_ids(), (0..27).collect::<Vec<_>>());
        for face in Face::ALL {
            let side = grid.side(face);
            assert_eq!(side.len(), 9);
            assert!(side.iter().all(|&c| c == face.solved_color()));
        }
    }

    #[test]
    fn test_shift_ring_forward_and_back() {
        let mut grid = CubeGrid::new(DIMS);
        let ring = up_ring();
        grid.shift_ring(ring.slots(), false);
        // forward: each slot receives the piece from the slot before it
        assert_eq!(grid.slots[ring.slots()[1]].id(), ring.slots()[0]);
        assert_eq!(grid.slots[ring.slots()[0]].id(), ring.slots()[7]);
        grid.shift_ring(ring.slots(), true);
        assert_eq!(grid.piece_ids(), (0..27).collect::<Vec<_>>());
    }

    #[test]
    fn test_rotate_layer_is_a_permutation() {
        let mut grid = CubeGrid::new(DIMS);
        let table = ThreeByThree.layer_table();
        for layer in Layer::ALL {
            grid.rotate_layer(table.rings(layer), layer, false);
        }
        let mut ids = grid.piece_ids();
        ids.sort_unstable();
        assert_eq!(ids, (0..27).collect::<Vec<_>>());
    }

    #[test]
    fn test_side_solved_predicate() {
        assert!(is_side_solved(&[]));
        assert!(is_side_solved(&[Color::Red, Color::Red]));
        assert!(!is_side_solved(&[Color::Red, Color::Blue]));
    }

    #[test]
    fn test_solved_faces_listing() {
        let grid = CubeGrid::new(DIMS);
        insta::assert_snapshot!(grid.format_faces(), @r"
        U: WWW WWW WWW
        L: OOO OOO OOO
        F: GGG GGG GGG
        R: RRR RRR RRR
        B: BBB BBB BBB
        D: YYY YYY YYY
        ");
    }

    #[test]
    fn test_format_side_front() {
        let grid = CubeGrid::new(DIMS);
        let expected = "Printing front:\n\
                        [green |green |green ]\n\
                        [green |green |green ]\n\
                        [green |green |green ]\n";
        assert_eq!(grid.format_side(Face::F), expected);
    }

    #[test]
    fn test_format_net_layout() {
        let grid = CubeGrid::new(DIMS);
        let net = grid.format_net();
        let lines: Vec<&str> = net.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(
            lines[0],
            format!("{}[white |white |white ]", " ".repeat(22))
        );
        assert_eq!(
            lines[3],
            "[orange|orange|orange][green |green |green ][red   |red   |red   ][blue  |blue  |blue  ]"
        );
        assert_eq!(
            lines[8],
            format!("{}[yellow|yellow|yellow]", " ".repeat(22))
        );
    }
}
