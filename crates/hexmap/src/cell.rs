use serde::{Deserialize, Serialize};

use crate::config::ELEVATION_UNSET;
use crate::coordinates::HexCoordinates;
use crate::direction::HexDirection;

/// Index of a cell in its grid's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId(pub usize);

/// One hexagonal tile. All mutation goes through the `HexGrid` setters so the
/// cross-cell invariants (river legality, road symmetry, special/river
/// exclusivity) are repaired on every change; this type only exposes reads.
#[derive(Debug, Clone)]
pub struct HexCell {
    pub(crate) coordinates: HexCoordinates,
    pub(crate) neighbors: [Option<CellId>; 6],
    pub(crate) terrain_type_index: u8,
    pub(crate) elevation: i32,
    pub(crate) water_level: i32,
    pub(crate) urban_level: u8,
    pub(crate) farm_level: u8,
    pub(crate) plant_level: u8,
    pub(crate) special_index: u8,
    pub(crate) walled: bool,
    pub(crate) incoming_river: Option<HexDirection>,
    pub(crate) outgoing_river: Option<HexDirection>,
    pub(crate) roads: [bool; 6],
    /// World-space height cache: elevation * step + perturbation offset.
    /// Refreshed before invariant re-checks whenever elevation changes.
    pub(crate) position_y: f32,
}

impl HexCell {
    pub(crate) fn new(coordinates: HexCoordinates) -> Self {
        Self {
            coordinates,
            neighbors: [None; 6],
            terrain_type_index: 0,
            elevation: ELEVATION_UNSET,
            water_level: 0,
            urban_level: 0,
            farm_level: 0,
            plant_level: 0,
            special_index: 0,
            walled: false,
            incoming_river: None,
            outgoing_river: None,
            roads: [false; 6],
            position_y: 0.0,
        }
    }

    #[inline]
    pub fn coordinates(&self) -> HexCoordinates {
        self.coordinates
    }

    #[inline]
    pub fn neighbor(&self, direction: HexDirection) -> Option<CellId> {
        self.neighbors[direction.index()]
    }

    #[inline]
    pub fn terrain_type_index(&self) -> u8 {
        self.terrain_type_index
    }

    #[inline]
    pub fn elevation(&self) -> i32 {
        self.elevation
    }

    #[inline]
    pub fn water_level(&self) -> i32 {
        self.water_level
    }

    #[inline]
    pub fn urban_level(&self) -> u8 {
        self.urban_level
    }

    #[inline]
    pub fn farm_level(&self) -> u8 {
        self.farm_level
    }

    #[inline]
    pub fn plant_level(&self) -> u8 {
        self.plant_level
    }

    #[inline]
    pub fn special_index(&self) -> u8 {
        self.special_index
    }

    #[inline]
    pub fn is_special(&self) -> bool {
        self.special_index > 0
    }

    #[inline]
    pub fn walled(&self) -> bool {
        self.walled
    }

    #[inline]
    pub fn position_y(&self) -> f32 {
        self.position_y
    }

    /// Submersion is derived, never stored.
    #[inline]
    pub fn is_underwater(&self) -> bool {
        self.water_level > self.elevation
    }

    #[inline]
    pub fn incoming_river(&self) -> Option<HexDirection> {
        self.incoming_river
    }

    #[inline]
    pub fn outgoing_river(&self) -> Option<HexDirection> {
        self.outgoing_river
    }

    #[inline]
    pub fn has_incoming_river(&self) -> bool {
        self.incoming_river.is_some()
    }

    #[inline]
    pub fn has_outgoing_river(&self) -> bool {
        self.outgoing_river.is_some()
    }

    #[inline]
    pub fn has_river(&self) -> bool {
        self.incoming_river.is_some() || self.outgoing_river.is_some()
    }

    /// True at a river source or mouth: exactly one of incoming/outgoing set.
    #[inline]
    pub fn has_river_begin_or_end(&self) -> bool {
        self.incoming_river.is_some() != self.outgoing_river.is_some()
    }

    pub fn has_river_through_edge(&self, direction: HexDirection) -> bool {
        self.incoming_river == Some(direction) || self.outgoing_river == Some(direction)
    }

    pub fn river_begin_or_end_direction(&self) -> Option<HexDirection> {
        self.incoming_river.or(self.outgoing_river)
    }

    #[inline]
    pub fn has_roads(&self) -> bool {
        self.roads.iter().any(|&road| road)
    }

    pub fn has_road_through_edge(&self, direction: HexDirection) -> bool {
        self.roads[direction.index()]
    }

    /// Snapshot of every persisted attribute, in the shape the save codec
    /// works with. Neighbor links and the position cache are reconstructed,
    /// not persisted.
    pub fn state(&self) -> CellState {
        CellState {
            terrain_type_index: self.terrain_type_index,
            elevation: self.elevation as u8,
            water_level: self.water_level as u8,
            urban_level: self.urban_level,
            farm_level: self.farm_level,
            plant_level: self.plant_level,
            special_index: self.special_index,
            walled: self.walled,
            incoming_river: self.incoming_river,
            outgoing_river: self.outgoing_river,
            roads: self.roads,
        }
    }
}

/// The persisted attributes of one cell. Elevation and water level are
/// stored in their unsigned-byte persistence range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellState {
    pub terrain_type_index: u8,
    pub elevation: u8,
    pub water_level: u8,
    pub urban_level: u8,
    pub farm_level: u8,
    pub plant_level: u8,
    pub special_index: u8,
    pub walled: bool,
    pub incoming_river: Option<HexDirection>,
    pub outgoing_river: Option<HexDirection>,
    pub roads: [bool; 6],
}
