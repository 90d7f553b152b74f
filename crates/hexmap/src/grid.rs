use std::collections::HashSet;

use bevy::prelude::*;

use crate::cell::{CellId, CellState, HexCell};
use crate::config::{
    CHUNK_SIZE_X, CHUNK_SIZE_Z, INNER_RADIUS, OUTER_RADIUS, PERTURB_SEED,
};
use crate::coordinates::HexCoordinates;
use crate::direction::HexDirection;
use crate::edge::HexEdgeType;
use crate::perturb::HeightPerturb;
use crate::refresh::ChunkId;

/// The cell arena. Owns every cell, the symmetric neighbor links between
/// them, the dirty-chunk set, and the height-perturbation sampler. All
/// two-sided mutations (neighbor links, roads, rivers) complete both sides
/// under one `&mut self` call, so callers never observe torn mirror state.
#[derive(Resource, Debug)]
pub struct HexGrid {
    pub(crate) cells: Vec<HexCell>,
    cells_x: usize,
    cells_z: usize,
    chunks_x: usize,
    pub(crate) dirty: HashSet<ChunkId>,
    pub(crate) perturb: HeightPerturb,
}

impl HexGrid {
    /// Build a grid of `cells_x` by `cells_z` cells: coordinates fixed,
    /// neighbor links wired row by row, then elevation initialized to 0
    /// through the public setter so position caches and dirty state go
    /// through the same path as ordinary edits.
    pub fn new(cells_x: usize, cells_z: usize) -> Self {
        let mut grid = Self {
            cells: Vec::with_capacity(cells_x * cells_z),
            cells_x,
            cells_z,
            chunks_x: cells_x.div_ceil(CHUNK_SIZE_X),
            dirty: HashSet::new(),
            perturb: HeightPerturb::new(PERTURB_SEED),
        };
        for z in 0..cells_z {
            for x in 0..cells_x {
                grid.cells
                    .push(HexCell::new(HexCoordinates::from_offset(x as i32, z as i32)));
            }
        }
        for z in 0..cells_z {
            for x in 0..cells_x {
                grid.wire_neighbors(x, z);
            }
        }
        for i in 0..grid.cells.len() {
            grid.set_elevation(CellId(i), 0);
        }
        grid
    }

    /// Links to the west neighbor and into the previous row. Even and odd
    /// rows mirror the SE/SW pair because odd rows are shifted half a cell.
    fn wire_neighbors(&mut self, x: usize, z: usize) {
        let id = CellId(self.index(x, z));
        if x > 0 {
            self.set_neighbor(id, HexDirection::W, CellId(id.0 - 1));
        }
        if z > 0 {
            if z % 2 == 0 {
                self.set_neighbor(id, HexDirection::SE, CellId(id.0 - self.cells_x));
                if x > 0 {
                    self.set_neighbor(id, HexDirection::SW, CellId(id.0 - self.cells_x - 1));
                }
            } else {
                self.set_neighbor(id, HexDirection::SW, CellId(id.0 - self.cells_x));
                if x < self.cells_x - 1 {
                    self.set_neighbor(id, HexDirection::SE, CellId(id.0 - self.cells_x + 1));
                }
            }
        }
    }

    #[inline]
    pub fn cells_x(&self) -> usize {
        self.cells_x
    }

    #[inline]
    pub fn cells_z(&self) -> usize {
        self.cells_z
    }

    #[inline]
    pub(crate) fn chunks_x(&self) -> usize {
        self.chunks_x
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn index(&self, x: usize, z: usize) -> usize {
        z * self.cells_x + x
    }

    #[inline]
    pub(crate) fn offset_of(&self, id: CellId) -> (usize, usize) {
        (id.0 % self.cells_x, id.0 / self.cells_x)
    }

    #[inline]
    pub fn cell(&self, id: CellId) -> &HexCell {
        &self.cells[id.0]
    }

    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> {
        (0..self.cells.len()).map(CellId)
    }

    pub fn cell_at_offset(&self, x: usize, z: usize) -> Option<CellId> {
        (x < self.cells_x && z < self.cells_z).then(|| CellId(self.index(x, z)))
    }

    pub fn cell_at(&self, coordinates: HexCoordinates) -> Option<CellId> {
        let z = coordinates.z();
        let x = coordinates.x() + z / 2;
        if x < 0 || z < 0 {
            return None;
        }
        self.cell_at_offset(x as usize, z as usize)
    }

    #[inline]
    pub fn neighbor(&self, id: CellId, direction: HexDirection) -> Option<CellId> {
        self.cells[id.0].neighbors[direction.index()]
    }

    /// Store the forward link and the symmetric reverse link in one step.
    /// Overwriting an existing link silently orphans the old reverse link;
    /// grid construction never does this, and the behavior is pinned by a
    /// test rather than guarded.
    pub fn set_neighbor(&mut self, id: CellId, direction: HexDirection, other: CellId) {
        self.cells[id.0].neighbors[direction.index()] = Some(other);
        self.cells[other.0].neighbors[direction.opposite().index()] = Some(id);
    }

    pub fn edge_type(&self, id: CellId, direction: HexDirection) -> Option<HexEdgeType> {
        self.neighbor(id, direction)
            .map(|other| self.edge_type_between(id, other))
    }

    pub fn edge_type_between(&self, a: CellId, b: CellId) -> HexEdgeType {
        HexEdgeType::between(self.cells[a.0].elevation, self.cells[b.0].elevation)
    }

    /// World-space x/z of a cell center, derived from its storage offset.
    pub fn world_xz(&self, id: CellId) -> (f32, f32) {
        let (x, z) = self.offset_of(id);
        let wx = (x as f32 + 0.5 * (z % 2) as f32) * (INNER_RADIUS * 2.0);
        let wz = z as f32 * (OUTER_RADIUS * 1.5);
        (wx, wz)
    }

    pub fn world_position(&self, id: CellId) -> (f32, f32, f32) {
        let (wx, wz) = self.world_xz(id);
        (wx, self.cells[id.0].position_y, wz)
    }

    #[inline]
    pub(crate) fn chunk_of_offset(&self, x: usize, z: usize) -> ChunkId {
        ChunkId((z / CHUNK_SIZE_Z) * self.chunks_x + x / CHUNK_SIZE_X)
    }

    /// Deserialization seam: overwrite every persisted attribute of one cell
    /// verbatim, refresh its cached world height, and mark its chunk (and
    /// bordering chunks) for rebuild. Deliberately runs no invariant repair,
    /// so a load reproduces the saved bytes exactly.
    pub fn restore_cell(&mut self, id: CellId, state: &CellState) {
        let cell = &mut self.cells[id.0];
        cell.terrain_type_index = state.terrain_type_index;
        cell.elevation = state.elevation as i32;
        cell.water_level = state.water_level as i32;
        cell.urban_level = state.urban_level;
        cell.farm_level = state.farm_level;
        cell.plant_level = state.plant_level;
        cell.special_index = state.special_index;
        cell.walled = state.walled;
        cell.incoming_river = state.incoming_river;
        cell.outgoing_river = state.outgoing_river;
        cell.roads = state.roads;
        self.refresh_position(id);
        self.refresh(id);
    }
}
