//! Rings of grid slots that move together under a layer turn.
//!
//! A ring lists slots clockwise as seen from outside the turning face,
//! starting at the slot nearest the grid origin. A layer is one or more rings;
//! a single-slot ring (a face or core center) is re-oriented but never moved.

use crate::error::LayerTableError;
use crate::geometry::Layer;
use crate::grid::Dims;

/// Grid address `(i, j, k)`: depth along y (from U), along z (from F) and
/// along x (from L).
pub type Slot = (usize, usize, usize);

/// Static ring description for one layer, as written in a cube-type table.
pub type LayerRings = (Layer, &'static [&'static [Slot]]);

/// An ordered group of slot indices that co-rotate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    slots: Vec<usize>,
}

impl Ring {
    #[inline]
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// How many positions one quarter turn advances the ring's contents.
    #[inline]
    pub fn quarter_shift(&self) -> usize {
        self.slots.len() / 4
    }
}

/// Ring lists for every move letter, resolved to slot indices.
///
/// Built once per cube and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerTable {
    layers: [Vec<Ring>; 9],
}

impl LayerTable {
    /// Resolves a static ring table against the grid dimensions.
    ///
    /// Every move letter must be present, every slot must lie inside the grid
    /// and every ring must hold one slot or a multiple of four.
    pub fn build(dims: Dims, table: &[LayerRings]) -> Result<Self, LayerTableError> {
        let mut layers: [Option<Vec<Ring>>; 9] = Default::default();

        for &(layer, rings) in table {
            let mut resolved = Vec::with_capacity(rings.len());
            for ring in rings {
                if ring.len() != 1 && ring.len() % 4 != 0 {
                    return Err(LayerTableError::RingLength {
                        layer,
                        len: ring.len(),
                    });
                }
                let slots = ring
                    .iter()
                    .map(|&slot| {
                        dims.slot_index(slot)
                            .ok_or(LayerTableError::SlotOutOfBounds { layer, slot })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                resolved.push(Ring { slots });
            }
            layers[layer.index()] = Some(resolved);
        }

        let mut built: [Vec<Ring>; 9] = Default::default();
        for layer in Layer::ALL {
            built[layer.index()] = layers[layer.index()]
                .take()
                .ok_or(LayerTableError::MissingLayer(layer))?;
        }
        Ok(Self { layers: built })
    }

    #[inline]
    pub fn rings(&self, layer: Layer) -> &[Ring] {
        &self.layers[layer.index()]
    }
}
