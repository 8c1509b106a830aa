//! Parallel executor for batch combination of partner pairs.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;

use crate::combine::combine;
use crate::config::SpliceConfig;
use crate::data::{DataSet, DataSetCollection, DataSetLoader};

use super::partners::load_partners;

/// Errors raised while setting up the runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] ThreadPoolBuildError),
}

/// Batch runtime combining every partner pair of a collection.
pub struct Runtime {
    /// Configuration.
    config: SpliceConfig,
    /// Worker pool, sized by `config.worker_count`.
    pool: ThreadPool,
}

impl Runtime {
    /// Create a runtime with its own worker pool.
    pub fn new(config: SpliceConfig) -> Result<Self, RuntimeError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_count.max(1))
            .thread_name(|i| format!("pxrdrs-worker-{i}"))
            .build()?;

        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &SpliceConfig {
        &self.config
    }

    /// Index pairs `(primary, secondary)` whose partner is present by name.
    ///
    /// Each pair is reported once, from its lower-position member.
    pub fn find_pairs(&self, collection: &DataSetCollection) -> Vec<(usize, usize)> {
        collection
            .iter()
            .enumerate()
            .filter_map(|(i, dataset)| {
                let position = dataset.position()?;
                let partner = position.partner()?;
                if partner < position {
                    return None;
                }
                let partner_name = dataset.partner_name().ok()?;
                let j = collection.position_of_name(&partner_name)?;
                Some((i, j))
            })
            .collect()
    }

    /// Combine every partner pair in parallel.
    ///
    /// Failures are logged and the pair is left out of the result.
    pub fn combine_pairs(&self, collection: &DataSetCollection) -> Vec<DataSet> {
        let pairs = self.find_pairs(collection);
        let method = self.config.method;
        let options = self.config.combine_options();

        log::info!(
            "Combining {} pair(s) with {:?} on {} worker(s)",
            pairs.len(),
            method,
            self.pool.current_num_threads()
        );

        self.pool.install(|| {
            pairs
                .par_iter()
                .filter_map(|&(i, j)| {
                    let (a, b) = (collection.get(i)?, collection.get(j)?);
                    match combine(a, b, method, &options) {
                        Ok(combined) => Some(combined),
                        Err(e) => {
                            log::warn!("Skipping {} + {}: {e}", a.name(), b.name());
                            None
                        }
                    }
                })
                .collect()
        })
    }

    /// Load missing partners, then combine all pairs and append the results.
    ///
    /// Returns the number of combined datasets added.
    pub fn run(&self, collection: &mut DataSetCollection, loader: &dyn DataSetLoader) -> usize {
        let loaded = load_partners(collection, loader);
        log::info!("Loaded {loaded} partner dataset(s)");

        let combined = self.combine_pairs(collection);
        let count = combined.len();
        collection.extend(combined);
        count
    }
}
