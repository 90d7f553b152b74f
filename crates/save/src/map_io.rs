// ---------------------------------------------------------------------------
// map_io – whole-map persistence
// ---------------------------------------------------------------------------
//
// Map format: two u32 little-endian cell counts (width, height), then one
// 11-byte record per cell in row-major order. No version tag, checksum, or
// compression; the header exists so a reader can rebuild the grid and detect
// a payload that disagrees with the declared dimensions.

use std::fs;
use std::path::Path;

use bevy::prelude::*;

use hexmap::cell::CellId;
use hexmap::grid::HexGrid;

use crate::cell_codec::{decode_cell, encode_cell, CELL_RECORD_LEN};
use crate::save_error::SaveError;

/// Size of the map header in bytes: two u32 cell counts.
pub const MAP_HEADER_LEN: usize = 8;

/// Encode a whole grid: header plus row-major cell records.
pub fn encode_map(grid: &HexGrid) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAP_HEADER_LEN + grid.len() * CELL_RECORD_LEN);
    out.extend_from_slice(&(grid.cells_x() as u32).to_le_bytes());
    out.extend_from_slice(&(grid.cells_z() as u32).to_le_bytes());
    for id in grid.cell_ids() {
        encode_cell(grid.cell(id), &mut out);
    }
    out
}

/// Rebuild a grid from encoded bytes.
///
/// Cells start from their default state and are overwritten verbatim by the
/// decoded records — no invariant repair runs, so a load reproduces the
/// saved attributes exactly. Cached world heights are recomputed and every
/// chunk comes back marked dirty, ready for a full rebuild.
pub fn decode_map(bytes: &[u8]) -> Result<HexGrid, SaveError> {
    if bytes.len() < MAP_HEADER_LEN {
        return Err(SaveError::Truncated {
            needed: MAP_HEADER_LEN,
            found: bytes.len(),
        });
    }
    let cells_x = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let cells_z = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let cell_count = cells_x as usize * cells_z as usize;

    let payload = &bytes[MAP_HEADER_LEN..];
    let expected = cell_count * CELL_RECORD_LEN;
    if payload.len() < expected {
        return Err(SaveError::SizeMismatch {
            cells_x,
            cells_z,
            expected,
            found: payload.len(),
        });
    }
    if payload.len() > expected {
        return Err(SaveError::TrailingData {
            extra: payload.len() - expected,
        });
    }

    let mut grid = HexGrid::new(cells_x as usize, cells_z as usize);
    for i in 0..cell_count {
        let state = decode_cell(&payload[i * CELL_RECORD_LEN..])?;
        grid.restore_cell(CellId(i), &state);
    }
    Ok(grid)
}

pub fn save_to_path(path: &Path, grid: &HexGrid) -> Result<(), SaveError> {
    let bytes = encode_map(grid);
    fs::write(path, &bytes)?;
    info!(
        "Saved {}x{} map ({} bytes) to {}",
        grid.cells_x(),
        grid.cells_z(),
        bytes.len(),
        path.display()
    );
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<HexGrid, SaveError> {
    let bytes = fs::read(path)?;
    let grid = decode_map(&bytes)?;
    info!(
        "Loaded {}x{} map from {}",
        grid.cells_x(),
        grid.cells_z(),
        path.display()
    );
    Ok(grid)
}
