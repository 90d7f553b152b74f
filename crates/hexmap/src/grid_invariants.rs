//! Runtime invariant audit for the cell arena.
//!
//! The mutation API is supposed to make these violations unrepresentable;
//! the audit exists as the safety net behind it, running periodically and
//! logging warnings when something slipped through. Integration tests use
//! the violation counts to assert that operation sequences leave the grid
//! consistent.
//!
//! Audited invariants:
//! 1. **Neighbor symmetry**: A→B in direction d implies B→A in opposite(d).
//! 2. **Road symmetry**: a road flag mirrors across its edge.
//! 3. **River pairing and legality**: every river edge has matching flags on
//!    both endpoints and never ascends.
//! 4. **Edge exclusivity**: no edge carries both a road and a river.

use bevy::prelude::*;

use crate::direction::HexDirection;
use crate::grid::HexGrid;
use crate::AuditTimer;

/// Violation counts from the last audit pass.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvariantViolations {
    /// Neighbor links whose mirror does not point back.
    pub neighbor_asymmetry: u32,
    /// Road flags whose mirrored flag disagrees.
    pub road_asymmetry: u32,
    /// Rivers with a missing neighbor, an unpaired endpoint, or an ascending
    /// flow.
    pub river_mismatch: u32,
    /// Edges carrying both a road and a river.
    pub road_river_overlap: u32,
}

impl InvariantViolations {
    pub fn total(&self) -> u32 {
        self.neighbor_asymmetry + self.road_asymmetry + self.river_mismatch
            + self.road_river_overlap
    }
}

/// Walk the whole grid and count every invariant violation, logging each one.
pub fn audit(grid: &HexGrid) -> InvariantViolations {
    let mut violations = InvariantViolations::default();

    for id in grid.cell_ids() {
        let cell = grid.cell(id);
        for direction in HexDirection::ALL {
            if let Some(other) = cell.neighbor(direction) {
                if grid.cell(other).neighbor(direction.opposite()) != Some(id) {
                    warn!(
                        "Invariant violation: neighbor link {:?} -> {:?} in {:?} has no mirror",
                        id, other, direction
                    );
                    violations.neighbor_asymmetry += 1;
                }
            }

            if cell.has_road_through_edge(direction) {
                match cell.neighbor(direction) {
                    Some(other)
                        if grid.cell(other).has_road_through_edge(direction.opposite()) => {}
                    _ => {
                        warn!(
                            "Invariant violation: road on {:?} edge {:?} is not mirrored",
                            id, direction
                        );
                        violations.road_asymmetry += 1;
                    }
                }
            }

            if cell.has_road_through_edge(direction) && cell.has_river_through_edge(direction) {
                warn!(
                    "Invariant violation: edge {:?} of {:?} carries both road and river",
                    direction, id
                );
                violations.road_river_overlap += 1;
            }
        }

        if let Some(direction) = cell.outgoing_river() {
            let paired = cell.neighbor(direction).map(|other| grid.cell(other));
            let legal = paired.is_some_and(|destination| {
                destination.incoming_river() == Some(direction.opposite())
                    && (cell.elevation() >= destination.elevation()
                        || cell.water_level() == destination.elevation())
            });
            if !legal {
                warn!(
                    "Invariant violation: outgoing river on {:?} toward {:?} is unpaired or ascending",
                    id, direction
                );
                violations.river_mismatch += 1;
            }
        }
        if let Some(direction) = cell.incoming_river() {
            let paired = cell
                .neighbor(direction)
                .map_or(false, |other| {
                    grid.cell(other).outgoing_river() == Some(direction.opposite())
                });
            if !paired {
                warn!(
                    "Invariant violation: incoming river on {:?} from {:?} has no outgoing source",
                    id, direction
                );
                violations.river_mismatch += 1;
            }
        }
    }

    violations
}

/// Periodic audit, throttled so a large grid is not walked every frame.
pub fn audit_system(
    timer: Res<AuditTimer>,
    grid: Res<HexGrid>,
    mut violations: ResMut<InvariantViolations>,
) {
    if !timer.should_run() {
        return;
    }
    *violations = audit(&grid);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellId;

    #[test]
    fn test_fresh_grid_is_clean() {
        let grid = HexGrid::new(8, 8);
        assert_eq!(audit(&grid).total(), 0);
    }

    #[test]
    fn test_edit_sequence_leaves_grid_clean() {
        let mut grid = HexGrid::new(8, 8);
        let a = grid.cell_at_offset(3, 3).unwrap();
        let b = grid.neighbor(a, HexDirection::NE).unwrap();

        grid.set_elevation(a, 3);
        grid.set_elevation(b, 2);
        grid.set_outgoing_river(a, HexDirection::NE);
        grid.add_road(a, HexDirection::E);
        grid.add_road(a, HexDirection::W);
        grid.set_water_level(b, 1);
        grid.set_elevation(b, 5);
        grid.set_special_index(a, 1);
        grid.set_walled(b, true);
        grid.remove_roads(a);
        grid.set_urban_level(a, 2);

        assert_eq!(audit(&grid), InvariantViolations::default());
    }

    #[test]
    fn test_torn_neighbor_link_is_counted() {
        let mut grid = HexGrid::new(4, 4);
        let a = grid.cell_at_offset(1, 1).unwrap();
        grid.cells[a.0].neighbors[HexDirection::E.index()] = Some(CellId(0));

        let violations = audit(&grid);
        assert!(violations.neighbor_asymmetry > 0);
    }

    #[test]
    fn test_one_sided_road_is_counted() {
        let mut grid = HexGrid::new(4, 4);
        let a = grid.cell_at_offset(1, 1).unwrap();
        grid.cells[a.0].roads[HexDirection::E.index()] = true;

        let violations = audit(&grid);
        assert_eq!(violations.road_asymmetry, 1);
    }

    #[test]
    fn test_unpaired_river_is_counted() {
        let mut grid = HexGrid::new(4, 4);
        let a = grid.cell_at_offset(1, 1).unwrap();
        grid.cells[a.0].outgoing_river = Some(HexDirection::E);

        let violations = audit(&grid);
        assert_eq!(violations.river_mismatch, 1);
    }

    #[test]
    fn test_ascending_river_is_counted() {
        let mut grid = HexGrid::new(4, 4);
        let a = grid.cell_at_offset(1, 1).unwrap();
        let b = grid.neighbor(a, HexDirection::E).unwrap();
        grid.set_elevation(a, 1);
        grid.set_elevation(b, 1);
        grid.set_outgoing_river(a, HexDirection::E);
        // Tear the invariant behind the setters' back: raise the destination
        // without the repair pass.
        grid.cells[b.0].elevation = 4;

        let violations = audit(&grid);
        assert_eq!(violations.river_mismatch, 1);
    }
}
