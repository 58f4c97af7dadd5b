use rand::Rng;

use crate::data::dataset::{Dataset, Number, WholeNumber};

/// Draws same-size resamples with replacement.
#[derive(Clone, Copy, Debug, Default)]
pub struct BootstrapSampler;

impl BootstrapSampler {
    /// `n` indices drawn independently and uniformly from `0..n`.
    pub fn sample_indices<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
        (0..n).map(|_| rng.gen_range(0..n)).collect()
    }

    pub fn sample<XT: Number, YT: WholeNumber, R: Rng>(
        dataset: &Dataset<XT, YT>,
        rng: &mut R,
    ) -> Dataset<XT, YT> {
        let indices = Self::sample_indices(dataset.nrows(), rng);
        dataset.select_rows(&indices)
    }
}
