use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::config::{ELEVATION_PERTURB_STRENGTH, PERTURB_FREQUENCY};

/// Deterministic height-perturbation sampler: the same world position always
/// yields the same vertical offset, so cached cell heights survive
/// save/load and repeated elevation edits without drift.
pub struct HeightPerturb {
    noise: FastNoiseLite,
}

impl std::fmt::Debug for HeightPerturb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeightPerturb").finish_non_exhaustive()
    }
}

impl HeightPerturb {
    pub fn new(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(PERTURB_FREQUENCY));
        Self { noise }
    }

    /// Vertical offset for a world-space position, in
    /// [-ELEVATION_PERTURB_STRENGTH, ELEVATION_PERTURB_STRENGTH].
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        self.noise.get_noise_2d(x, z) * ELEVATION_PERTURB_STRENGTH
    }
}
