use bevy::prelude::*;

pub mod cell;
pub mod config;
pub mod coordinates;
pub mod direction;
pub mod edge;
pub mod grid;
pub mod grid_invariants;
pub mod perturb;
pub mod refresh;
pub mod rivers;
pub mod roads;
pub mod terrain;

use grid::HexGrid;

/// Map dimensions used when the plugin builds the grid at startup.
#[derive(Resource, Debug, Clone, Copy)]
pub struct MapConfig {
    pub cells_x: usize,
    pub cells_z: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            cells_x: config::MAP_CELLS_X,
            cells_z: config::MAP_CELLS_Z,
        }
    }
}

/// Throttle for the periodic invariant audit: walking every cell each tick
/// would be wasted work on a grid that only changes at editing speed.
#[derive(Resource, Default)]
pub struct AuditTimer {
    pub counter: u32,
}

impl AuditTimer {
    pub const INTERVAL: u32 = 100;

    pub fn tick(&mut self) {
        self.counter = self.counter.wrapping_add(1);
    }

    pub fn should_run(&self) -> bool {
        self.counter.is_multiple_of(Self::INTERVAL)
    }
}

fn tick_audit_timer(mut timer: ResMut<AuditTimer>) {
    timer.tick();
}

fn init_grid(mut commands: Commands, map: Res<MapConfig>) {
    commands.insert_resource(HexGrid::new(map.cells_x, map.cells_z));
}

pub struct HexMapPlugin;

impl Plugin for HexMapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapConfig>()
            .init_resource::<AuditTimer>()
            .init_resource::<grid_invariants::InvariantViolations>()
            .add_event::<refresh::ChunkRebuild>()
            .add_systems(Startup, init_grid)
            .add_systems(
                Update,
                refresh::flush_dirty_chunks.run_if(resource_exists::<HexGrid>),
            )
            .add_systems(
                FixedUpdate,
                (tick_audit_timer, grid_invariants::audit_system)
                    .chain()
                    .run_if(resource_exists::<HexGrid>),
            );
    }
}
