// ---------------------------------------------------------------------------
// cell_codec – fixed positional byte layout for one cell
// ---------------------------------------------------------------------------
//
// Record format (11 bytes, fixed order, no framing):
//   [0]  terrain_type_index
//   [1]  elevation
//   [2]  water_level
//   [3]  urban_level
//   [4]  farm_level
//   [5]  plant_level
//   [6]  special_index
//   [7]  walled (0 or 1)
//   [8]  incoming river: 0 = none, else 128 + direction index (128..=133)
//   [9]  outgoing river: same encoding
//   [10] road flags: bit i set iff a road crosses direction i (bits 6-7 zero)
//
// The layout is positional and versionless; readers must know the field
// count and order in advance. Decoding is strict — any byte outside its
// encoding is a hard error, never silently reinterpreted.

use hexmap::cell::{CellState, HexCell};
use hexmap::direction::HexDirection;

use crate::save_error::SaveError;

/// Size of one encoded cell record in bytes.
pub const CELL_RECORD_LEN: usize = 11;

/// High bit marks a river as present; the low bits carry its direction.
const RIVER_PRESENT: u8 = 0b1000_0000;

/// Only the six direction bits may be set in the road flags byte.
const ROAD_MASK: u8 = 0b0011_1111;

fn river_byte(river: Option<HexDirection>) -> u8 {
    match river {
        Some(direction) => RIVER_PRESENT + direction.index() as u8,
        None => 0,
    }
}

fn decode_river(field: &'static str, byte: u8) -> Result<Option<HexDirection>, SaveError> {
    if byte == 0 {
        return Ok(None);
    }
    let direction = byte
        .checked_sub(RIVER_PRESENT)
        .and_then(HexDirection::from_index)
        .ok_or(SaveError::InvalidField { field, value: byte })?;
    Ok(Some(direction))
}

/// Append one cell's 11-byte record to `out`.
pub fn encode_cell(cell: &HexCell, out: &mut Vec<u8>) {
    let state = cell.state();
    let mut road_flags = 0u8;
    for (i, &road) in state.roads.iter().enumerate() {
        if road {
            road_flags |= 1 << i;
        }
    }
    out.extend_from_slice(&[
        state.terrain_type_index,
        state.elevation,
        state.water_level,
        state.urban_level,
        state.farm_level,
        state.plant_level,
        state.special_index,
        state.walled as u8,
        river_byte(state.incoming_river),
        river_byte(state.outgoing_river),
        road_flags,
    ]);
}

/// Read one cell record from the front of `bytes`.
pub fn decode_cell(bytes: &[u8]) -> Result<CellState, SaveError> {
    if bytes.len() < CELL_RECORD_LEN {
        return Err(SaveError::Truncated {
            needed: CELL_RECORD_LEN,
            found: bytes.len(),
        });
    }

    let walled = match bytes[7] {
        0 => false,
        1 => true,
        value => {
            return Err(SaveError::InvalidField {
                field: "walled",
                value,
            })
        }
    };
    let incoming_river = decode_river("incoming_river", bytes[8])?;
    let outgoing_river = decode_river("outgoing_river", bytes[9])?;
    if bytes[10] & !ROAD_MASK != 0 {
        return Err(SaveError::InvalidField {
            field: "roads",
            value: bytes[10],
        });
    }
    let mut roads = [false; 6];
    for (i, road) in roads.iter_mut().enumerate() {
        *road = bytes[10] & (1 << i) != 0;
    }

    Ok(CellState {
        terrain_type_index: bytes[0],
        elevation: bytes[1],
        water_level: bytes[2],
        urban_level: bytes[3],
        farm_level: bytes[4],
        plant_level: bytes[5],
        special_index: bytes[6],
        walled,
        incoming_river,
        outgoing_river,
        roads,
    })
}
