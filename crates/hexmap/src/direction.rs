use serde::{Deserialize, Serialize};

/// One of the six edge directions around a hexagonal cell, clockwise from
/// north-east. The discriminant doubles as the edge index (0..5) used by
/// neighbor slots, road flags, and the persistence format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HexDirection {
    NE,
    E,
    SE,
    SW,
    W,
    NW,
}

impl HexDirection {
    pub const ALL: [HexDirection; 6] = [
        HexDirection::NE,
        HexDirection::E,
        HexDirection::SE,
        HexDirection::SW,
        HexDirection::W,
        HexDirection::NW,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: u8) -> Option<HexDirection> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn opposite(self) -> HexDirection {
        Self::ALL[(self as usize + 3) % 6]
    }

    pub fn next(self) -> HexDirection {
        Self::ALL[(self as usize + 1) % 6]
    }

    pub fn previous(self) -> HexDirection {
        Self::ALL[(self as usize + 5) % 6]
    }
}
