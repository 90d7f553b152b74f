pub const CHUNK_SIZE_X: usize = 5;
pub const CHUNK_SIZE_Z: usize = 5;
pub const MAP_CELLS_X: usize = 20;
pub const MAP_CELLS_Z: usize = 15;

pub const OUTER_RADIUS: f32 = 10.0;
pub const INNER_RADIUS: f32 = OUTER_RADIUS * 0.866025404;

/// World-space height of one elevation level.
pub const ELEVATION_STEP: f32 = 3.0;

/// Maximum vertical offset the perturbation sampler may add to a cell's
/// cached world height, in either direction.
pub const ELEVATION_PERTURB_STRENGTH: f32 = 1.5;

pub const PERTURB_SEED: i32 = 1337;
pub const PERTURB_FREQUENCY: f32 = 0.03;

/// Elevation value of a cell that has never been assigned one. Guarantees the
/// first real assignment is never swallowed by the value-equality short
/// circuit in `set_elevation`.
pub const ELEVATION_UNSET: i32 = i32::MIN;
