//! Loading of partner scans that are not yet in a collection.

use crate::data::{DataSet, DataSetCollection, DataSetLoader};

/// Load the missing merge partner of every dataset in `collection`.
///
/// A dataset is skipped when its partner cannot be resolved (no position,
/// no pair, no source), when the partner is already present, when the
/// partner file does not exist, or when loading it fails. Skips are logged;
/// they never abort the batch. Returns the number of datasets added.
pub fn load_partners(collection: &mut DataSetCollection, loader: &dyn DataSetLoader) -> usize {
    let mut loaded = Vec::new();

    for dataset in collection.iter() {
        let resolved = dataset
            .partner_name()
            .and_then(|name| dataset.partner_path().map(|path| (name, path)));
        let (partner_name, path) = match resolved {
            Ok(resolved) => resolved,
            Err(e) => {
                log::debug!("Skipping partner lookup for {}: {e}", dataset.name());
                continue;
            }
        };

        let already_present = collection.contains_name(&partner_name)
            || loaded.iter().any(|ds: &DataSet| ds.name() == partner_name);
        if already_present {
            continue;
        }

        if !path.exists() {
            log::debug!("Partner file {} not found", path.display());
            continue;
        }

        match loader.load(&path) {
            Ok(partner) => {
                log::info!("Loaded partner {} for {}", partner.name(), dataset.name());
                loaded.push(partner);
            }
            Err(e) => log::warn!("Failed to load partner {}: {e}", path.display()),
        }
    }

    let count = loaded.len();
    collection.extend(loaded);
    count
}
