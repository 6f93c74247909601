use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::model::{FeatureVector, SeedSong};

/// Compute the mean feature vector of the given seed songs.
///
/// Each seed is resolved with [`Dataset::find_seed`]. Seeds missing from the
/// dataset are skipped; only the dataset is consulted, never the remote
/// catalog.
///
/// # Errors
/// Returns [`Error::NoValidSeeds`] if no seed resolves.
pub fn mean_vector(dataset: &Dataset, seeds: &[SeedSong]) -> Result<FeatureVector> {
    let mut sum = vec![0.0; dataset.feature_columns().len()];
    let mut resolved = 0_usize;

    for seed in seeds {
        let Some(track) = dataset.find_seed(seed) else {
            log::debug!("Seed song not in dataset: {}", seed);
            continue;
        };

        for (acc, value) in sum.iter_mut().zip(track.features.as_slice()) {
            *acc += value;
        }
        resolved += 1;
    }

    if resolved == 0 {
        return Err(Error::NoValidSeeds);
    }

    log::debug!("Resolved {} of {} seed songs", resolved, seeds.len());

    let count = resolved as f64;
    Ok(sum.into_iter().map(|total| total / count).collect::<Vec<_>>().into())
}
