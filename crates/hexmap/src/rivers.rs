//! The river state machine. A river is a directed edge between two adjacent
//! cells and may never ascend: it can only be created while legal, and any
//! elevation or water-level change re-validates the endpoints it touches.

use crate::cell::{CellId, HexCell};
use crate::direction::HexDirection;
use crate::grid::HexGrid;

/// Water flowing from `source` into `destination` is legal when it flows
/// downhill or level, or when the source's water surface sits exactly at the
/// destination's elevation (a river entering a lake or sea).
fn is_valid_destination(source: &HexCell, destination: &HexCell) -> bool {
    source.elevation >= destination.elevation || source.water_level == destination.elevation
}

impl HexGrid {
    pub fn is_valid_river_destination(&self, id: CellId, direction: HexDirection) -> bool {
        self.neighbor(id, direction)
            .map_or(false, |other| is_valid_destination(self.cell(id), self.cell(other)))
    }

    /// Start (or redirect) the river flowing out of this cell. Illegal
    /// requests are dropped without mutation; a legal one evicts whatever it
    /// collides with: the old outgoing river, an incoming river on the same
    /// edge, the special features of both endpoints, and any road on the
    /// edge.
    pub fn set_outgoing_river(&mut self, id: CellId, direction: HexDirection) {
        if self.cells[id.0].outgoing_river == Some(direction) {
            return;
        }
        let Some(other) = self.neighbor(id, direction) else {
            return;
        };
        if !is_valid_destination(self.cell(id), self.cell(other)) {
            return;
        }

        self.remove_outgoing_river(id);
        if self.cells[id.0].incoming_river == Some(direction) {
            self.remove_incoming_river(id);
        }
        self.cells[id.0].outgoing_river = Some(direction);
        self.cells[id.0].special_index = 0;

        self.remove_incoming_river(other);
        self.cells[other.0].incoming_river = Some(direction.opposite());
        self.cells[other.0].special_index = 0;

        // Clearing the edge's road also issues both self-only refreshes.
        self.set_road(id, direction, false);
    }

    /// Idempotent: clears the local flag and the paired incoming flag on the
    /// destination, each side refreshing itself.
    pub fn remove_outgoing_river(&mut self, id: CellId) {
        let Some(direction) = self.cells[id.0].outgoing_river else {
            return;
        };
        self.cells[id.0].outgoing_river = None;
        self.refresh_self_only(id);

        if let Some(other) = self.neighbor(id, direction) {
            self.cells[other.0].incoming_river = None;
            self.refresh_self_only(other);
        }
    }

    /// Idempotent: clears the local flag and the paired outgoing flag on the
    /// source, each side refreshing itself.
    pub fn remove_incoming_river(&mut self, id: CellId) {
        let Some(direction) = self.cells[id.0].incoming_river else {
            return;
        };
        self.cells[id.0].incoming_river = None;
        self.refresh_self_only(id);

        if let Some(other) = self.neighbor(id, direction) {
            self.cells[other.0].outgoing_river = None;
            self.refresh_self_only(other);
        }
    }

    pub fn remove_river(&mut self, id: CellId) {
        self.remove_outgoing_river(id);
        self.remove_incoming_river(id);
    }

    /// Re-check both river endpoints after an elevation or water-level
    /// change: the outgoing river against this cell's own destination rule,
    /// and the incoming river against the incoming neighbor's rule. Either
    /// one is removed the moment it would ascend.
    pub(crate) fn validate_rivers(&mut self, id: CellId) {
        if let Some(direction) = self.cells[id.0].outgoing_river {
            let legal = self
                .neighbor(id, direction)
                .map_or(false, |other| is_valid_destination(self.cell(id), self.cell(other)));
            if !legal {
                self.remove_outgoing_river(id);
            }
        }
        if let Some(direction) = self.cells[id.0].incoming_river {
            let legal = self
                .neighbor(id, direction)
                .map_or(false, |other| is_valid_destination(self.cell(other), self.cell(id)));
            if !legal {
                self.remove_incoming_river(id);
            }
        }
    }
}
