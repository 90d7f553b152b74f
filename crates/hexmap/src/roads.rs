//! Road flags: undirected per-edge passability, mirrored like neighbor
//! links. `set_road` is the single choke point that writes both sides, so
//! road symmetry cannot be broken by any higher-level operation.

use crate::cell::CellId;
use crate::direction::HexDirection;
use crate::grid::HexGrid;

impl HexGrid {
    /// Lay a road across one edge. Rejected without mutation when the edge
    /// already carries a road or a river, when either endpoint holds a
    /// special feature, or when the endpoints differ by more than one
    /// elevation step.
    pub fn add_road(&mut self, id: CellId, direction: HexDirection) {
        let Some(other) = self.neighbor(id, direction) else {
            return;
        };
        let cell = self.cell(id);
        let neighbor = self.cell(other);
        if cell.roads[direction.index()]
            || cell.has_river_through_edge(direction)
            || cell.is_special()
            || neighbor.is_special()
            || (cell.elevation - neighbor.elevation).abs() > 1
        {
            return;
        }
        self.set_road(id, direction, true);
    }

    /// Clear every road on the cell, mirroring each removal to the neighbor
    /// across that edge. Idempotent.
    pub fn remove_roads(&mut self, id: CellId) {
        for direction in HexDirection::ALL {
            if self.cells[id.0].roads[direction.index()] {
                self.set_road(id, direction, false);
            }
        }
    }

    pub(crate) fn set_road(&mut self, id: CellId, direction: HexDirection, state: bool) {
        self.cells[id.0].roads[direction.index()] = state;
        if let Some(other) = self.neighbor(id, direction) {
            self.cells[other.0].roads[direction.opposite().index()] = state;
            self.refresh_self_only(other);
        }
        self.refresh_self_only(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> HexGrid {
        HexGrid::new(6, 6)
    }

    fn pair(grid: &HexGrid) -> (CellId, CellId) {
        let a = grid.cell_at_offset(2, 2).unwrap();
        let b = grid.neighbor(a, HexDirection::NE).unwrap();
        (a, b)
    }

    #[test]
    fn test_add_road_mirrors_both_sides() {
        let mut grid = grid();
        let (a, b) = pair(&grid);

        grid.add_road(a, HexDirection::NE);

        assert!(grid.cell(a).has_road_through_edge(HexDirection::NE));
        assert!(grid.cell(b).has_road_through_edge(HexDirection::SW));
        assert!(grid.cell(a).has_roads());
    }

    #[test]
    fn test_road_rejected_across_river() {
        let mut grid = grid();
        let (a, b) = pair(&grid);
        grid.set_elevation(a, 3);
        grid.set_elevation(b, 3);
        grid.set_outgoing_river(a, HexDirection::NE);

        grid.add_road(a, HexDirection::NE);

        assert!(!grid.cell(a).has_road_through_edge(HexDirection::NE));
        assert!(!grid.cell(b).has_road_through_edge(HexDirection::SW));
    }

    #[test]
    fn test_road_rejected_across_cliff() {
        let mut grid = grid();
        let (a, b) = pair(&grid);
        grid.set_elevation(b, 2);

        grid.add_road(a, HexDirection::NE);

        assert!(!grid.cell(a).has_road_through_edge(HexDirection::NE));
    }

    #[test]
    fn test_road_allowed_on_slope() {
        let mut grid = grid();
        let (a, b) = pair(&grid);
        grid.set_elevation(b, 1);

        grid.add_road(a, HexDirection::NE);

        assert!(grid.cell(a).has_road_through_edge(HexDirection::NE));
    }

    #[test]
    fn test_road_rejected_at_special_endpoint() {
        let mut grid = grid();
        let (a, b) = pair(&grid);
        grid.set_special_index(b, 1);

        grid.add_road(a, HexDirection::NE);

        assert!(!grid.cell(a).has_road_through_edge(HexDirection::NE));
    }

    #[test]
    fn test_road_off_grid_edge_is_rejected() {
        let mut grid = grid();
        let corner = grid.cell_at_offset(0, 0).unwrap();
        grid.add_road(corner, HexDirection::W);
        assert!(!grid.cell(corner).has_roads());
    }

    #[test]
    fn test_remove_roads_clears_every_edge_and_is_idempotent() {
        let mut grid = grid();
        let a = grid.cell_at_offset(2, 2).unwrap();
        for direction in [HexDirection::NE, HexDirection::E, HexDirection::SW] {
            grid.add_road(a, direction);
        }
        assert!(grid.cell(a).has_roads());

        grid.remove_roads(a);
        let after_once = grid.cell(a).state();
        grid.remove_roads(a);

        assert!(!grid.cell(a).has_roads());
        assert_eq!(grid.cell(a).state(), after_once);
        for direction in HexDirection::ALL {
            if let Some(other) = grid.neighbor(a, direction) {
                assert!(
                    !grid.cell(other).has_road_through_edge(direction.opposite()),
                    "neighbor across {direction:?} kept a mirrored road flag"
                );
            }
        }
    }

    #[test]
    fn test_river_and_road_never_share_an_edge() {
        let mut grid = grid();
        let (a, _) = pair(&grid);
        grid.add_road(a, HexDirection::NE);

        // The river evicts the road from the shared edge.
        grid.set_outgoing_river(a, HexDirection::NE);

        for direction in HexDirection::ALL {
            assert!(
                !(grid.cell(a).has_road_through_edge(direction)
                    && grid.cell(a).has_river_through_edge(direction)),
                "edge {direction:?} carries both a road and a river"
            );
        }
        assert!(!grid.cell(a).has_road_through_edge(HexDirection::NE));
        assert!(grid.cell(a).has_river_through_edge(HexDirection::NE));
    }

    #[test]
    fn test_duplicate_add_road_marks_nothing_dirty() {
        let mut grid = grid();
        let (a, _) = pair(&grid);
        grid.add_road(a, HexDirection::NE);
        grid.take_dirty();

        grid.add_road(a, HexDirection::NE);

        assert!(grid.take_dirty().is_empty());
    }
}
