//! Attribute setters and their invariant-repair cascades. Every setter
//! short-circuits on value equality, so callers cannot distinguish "rejected"
//! from "already in that state", and every state change ends in a dirty-chunk
//! notification at the narrowest level that keeps rendering correct.

use crate::cell::CellId;
use crate::config::ELEVATION_STEP;
use crate::direction::HexDirection;
use crate::grid::HexGrid;

impl HexGrid {
    /// Change a cell's elevation, then repair everything the change can
    /// invalidate: the cached world height first (so downstream consumers of
    /// the position see the new geometry), then river legality, then roads
    /// whose edge now spans more than one elevation step.
    pub fn set_elevation(&mut self, id: CellId, value: i32) {
        if self.cells[id.0].elevation == value {
            return;
        }
        self.cells[id.0].elevation = value;
        self.refresh_position(id);
        self.validate_rivers(id);
        for direction in HexDirection::ALL {
            if !self.cells[id.0].roads[direction.index()] {
                continue;
            }
            let still_passable = self
                .neighbor(id, direction)
                .map_or(false, |other| (value - self.cells[other.0].elevation).abs() <= 1);
            if !still_passable {
                self.set_road(id, direction, false);
            }
        }
        self.refresh(id);
    }

    /// Change a cell's water level. Submersion can legalize or illegalize a
    /// river endpoint, so rivers are re-validated.
    pub fn set_water_level(&mut self, id: CellId, value: i32) {
        if self.cells[id.0].water_level == value {
            return;
        }
        self.cells[id.0].water_level = value;
        self.validate_rivers(id);
        self.refresh(id);
    }

    pub fn set_terrain_type_index(&mut self, id: CellId, value: u8) {
        if self.cells[id.0].terrain_type_index == value {
            return;
        }
        self.cells[id.0].terrain_type_index = value;
        self.refresh(id);
    }

    pub fn set_urban_level(&mut self, id: CellId, value: u8) {
        if self.cells[id.0].urban_level == value {
            return;
        }
        self.cells[id.0].urban_level = value;
        self.refresh_self_only(id);
    }

    pub fn set_farm_level(&mut self, id: CellId, value: u8) {
        if self.cells[id.0].farm_level == value {
            return;
        }
        self.cells[id.0].farm_level = value;
        self.refresh_self_only(id);
    }

    pub fn set_plant_level(&mut self, id: CellId, value: u8) {
        if self.cells[id.0].plant_level == value {
            return;
        }
        self.cells[id.0].plant_level = value;
        self.refresh_self_only(id);
    }

    /// Special features are mutually exclusive with rivers, and claiming a
    /// cell for one evicts its roads.
    pub fn set_special_index(&mut self, id: CellId, value: u8) {
        if self.cells[id.0].special_index == value || self.cells[id.0].has_river() {
            return;
        }
        self.cells[id.0].special_index = value;
        self.remove_roads(id);
        self.refresh_self_only(id);
    }

    /// Walls live on shared edges, so neighbor chunks need a rebuild too.
    pub fn set_walled(&mut self, id: CellId, value: bool) {
        if self.cells[id.0].walled == value {
            return;
        }
        self.cells[id.0].walled = value;
        self.refresh(id);
    }

    /// Recompute the cached world height from elevation and the perturbation
    /// sampler. Runs before invariant re-checks on every elevation change.
    pub(crate) fn refresh_position(&mut self, id: CellId) {
        let (wx, wz) = self.world_xz(id);
        let y = self.cells[id.0].elevation as f32 * ELEVATION_STEP + self.perturb.sample(wx, wz);
        self.cells[id.0].position_y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ELEVATION_PERTURB_STRENGTH;

    fn grid() -> HexGrid {
        HexGrid::new(6, 6)
    }

    fn center(grid: &HexGrid) -> CellId {
        grid.cell_at_offset(2, 2).unwrap()
    }

    #[test]
    fn test_elevation_updates_position_cache() {
        let mut grid = grid();
        let id = center(&grid);
        grid.set_elevation(id, 4);
        let expected = 4.0 * ELEVATION_STEP;
        let (_, y, _) = grid.world_position(id);
        assert_eq!(y, grid.cell(id).position_y());
        assert!(
            (y - expected).abs() <= ELEVATION_PERTURB_STRENGTH,
            "cached height {y} strayed more than the perturbation bound from {expected}"
        );
    }

    #[test]
    fn test_elevation_noop_marks_nothing_dirty() {
        let mut grid = grid();
        let id = center(&grid);
        grid.set_elevation(id, 3);
        grid.take_dirty();
        grid.set_elevation(id, 3);
        assert!(grid.take_dirty().is_empty());
    }

    #[test]
    fn test_elevation_change_removes_steep_road() {
        let mut grid = grid();
        let a = center(&grid);
        let b = grid.neighbor(a, HexDirection::E).unwrap();
        grid.add_road(a, HexDirection::E);
        assert!(grid.cell(a).has_road_through_edge(HexDirection::E));

        grid.set_elevation(b, 2);

        assert!(
            !grid.cell(a).has_road_through_edge(HexDirection::E),
            "road should not survive a two-step elevation difference"
        );
        assert!(!grid.cell(b).has_road_through_edge(HexDirection::W));
    }

    #[test]
    fn test_elevation_change_keeps_gentle_road() {
        let mut grid = grid();
        let a = center(&grid);
        let b = grid.neighbor(a, HexDirection::E).unwrap();
        grid.add_road(a, HexDirection::E);

        grid.set_elevation(b, 1);

        assert!(grid.cell(a).has_road_through_edge(HexDirection::E));
        assert!(grid.cell(b).has_road_through_edge(HexDirection::W));
    }

    #[test]
    fn test_special_index_rejected_on_river_cell() {
        let mut grid = grid();
        let a = center(&grid);
        grid.set_outgoing_river(a, HexDirection::E);
        grid.set_special_index(a, 3);
        assert_eq!(grid.cell(a).special_index(), 0);
        assert!(!grid.cell(a).is_special());
    }

    #[test]
    fn test_special_index_clears_roads() {
        let mut grid = grid();
        let a = center(&grid);
        grid.add_road(a, HexDirection::E);
        grid.add_road(a, HexDirection::W);

        grid.set_special_index(a, 2);

        assert!(grid.cell(a).is_special());
        assert!(!grid.cell(a).has_roads());
        let east = grid.neighbor(a, HexDirection::E).unwrap();
        assert!(!grid.cell(east).has_road_through_edge(HexDirection::W));
    }

    #[test]
    fn test_water_level_submerges() {
        let mut grid = grid();
        let id = center(&grid);
        grid.set_elevation(id, 2);
        grid.set_water_level(id, 3);
        assert!(grid.cell(id).is_underwater());
        grid.set_water_level(id, 2);
        assert!(!grid.cell(id).is_underwater());
    }

    #[test]
    fn test_decorative_levels_are_independent() {
        let mut grid = grid();
        let id = center(&grid);
        grid.set_urban_level(id, 3);
        grid.set_farm_level(id, 2);
        grid.set_plant_level(id, 1);
        let cell = grid.cell(id);
        assert_eq!(cell.urban_level(), 3);
        assert_eq!(cell.farm_level(), 2);
        assert_eq!(cell.plant_level(), 1);
    }
}
