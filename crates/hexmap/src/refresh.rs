//! Dirty-chunk tracking. The grid never renders anything; it only records
//! which render chunks an edit invalidated, at one of two levels:
//!
//! - full refresh: the cell's own chunk plus every neighboring cell's chunk
//!   that differs (elevation, terrain type, water, walls — anything visible
//!   on a shared edge);
//! - self-only refresh: just the cell's own chunk (roads, rivers, feature
//!   densities, specials — visuals confined to the cell interior).
//!
//! Over-marking is always safe; under-marking leaves stale meshes on screen.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cell::CellId;
use crate::direction::HexDirection;
use crate::grid::HexGrid;

/// Identifier of a render chunk, the rebuild unit owned by the rendering
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkId(pub usize);

/// A chunk whose cells changed appearance since the last drain. Consumed by
/// the rendering layer to regenerate that chunk's mesh.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRebuild(pub ChunkId);

impl HexGrid {
    pub fn chunk_of(&self, id: CellId) -> ChunkId {
        let (x, z) = self.offset_of(id);
        self.chunk_of_offset(x, z)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks_x() * self.cells_z().div_ceil(crate::config::CHUNK_SIZE_Z)
    }

    pub(crate) fn refresh(&mut self, id: CellId) {
        let own = self.chunk_of(id);
        self.dirty.insert(own);
        for direction in HexDirection::ALL {
            if let Some(other) = self.neighbor(id, direction) {
                let chunk = self.chunk_of(other);
                if chunk != own {
                    self.dirty.insert(chunk);
                }
            }
        }
    }

    pub(crate) fn refresh_self_only(&mut self, id: CellId) {
        let own = self.chunk_of(id);
        self.dirty.insert(own);
    }

    #[inline]
    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Drain the accumulated dirty set, sorted for deterministic consumption.
    pub fn take_dirty(&mut self) -> Vec<ChunkId> {
        let mut chunks: Vec<ChunkId> = self.dirty.drain().collect();
        chunks.sort();
        chunks
    }
}

/// Forwards drained dirty chunks to whoever rebuilds meshes. The immutable
/// emptiness probe keeps idle frames from flagging the grid as changed.
pub fn flush_dirty_chunks(mut grid: ResMut<HexGrid>, mut rebuilds: EventWriter<ChunkRebuild>) {
    if !grid.has_dirty() {
        return;
    }
    for chunk in grid.take_dirty() {
        rebuilds.send(ChunkRebuild(chunk));
    }
}
